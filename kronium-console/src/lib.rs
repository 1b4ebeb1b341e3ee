//! Kronium Console - HTTP surface of the admin console
//!
//! Routes, controllers, admin-session extractors, DTOs and middleware on top
//! of the use cases in `kronium-core`. Everything except sign-in, token
//! refresh and health checks requires an admin session.
//!
//! ```text
//! /                      service description
//! /health                liveness
//! /docs                  Swagger UI (server.enable_docs)
//! /api/v1/auth/*         login, refresh, logout, me
//! /api/v1/dashboard      overview counts and recent activity
//! /api/v1/users          customer and staff accounts
//! /api/v1/services       service catalog and image uploads
//! /api/v1/bookings       bookings and status transitions
//! /api/v1/projects       customer projects
//! /api/v1/analytics      windowed reports
//! /api/v1/chat/*         support chat
//! ```

pub mod presentation;

pub use presentation::controllers::{ConsoleBackends, ConsoleState};
pub use presentation::routes::{ApiDoc, create_router};
