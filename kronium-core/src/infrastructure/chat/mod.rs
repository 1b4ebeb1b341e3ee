//! Chat store implementations

mod canned;

pub use canned::CannedChatStore;
