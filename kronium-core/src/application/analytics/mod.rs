//! Analytics application services
//!
//! The analytics screen is backed by a three-stage pipeline:
//!
//! ```text
//! IAnalyticsSource ──fetch (concurrent)──► AnalyticsSnapshot
//!                                              │
//!                    ┌─────────────────────────┼───────────────────────┐
//!                    ▼                         ▼                       ▼
//!            aggregation (monthly,     growth (users, bookings,    totals
//!            categories, services)     revenue vs. prior window)
//!                    └─────────────────────────┴───────────────────────┘
//!                                              ▼
//!                                       AnalyticsReport
//! ```
//!
//! Each refresh is tagged with a ticket from [`AnalyticsSessions`]; only the
//! newest ticket of a session may replace its last-known report.

pub mod aggregation;
pub mod analytics_service;
pub mod growth;
pub mod sessions;
pub mod use_cases;

pub use aggregation::*;
pub use analytics_service::*;
pub use growth::*;
pub use sessions::*;
pub use use_cases::*;
