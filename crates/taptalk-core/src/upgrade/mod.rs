//! Upgrade pipeline domain types: errors and events.
//!
//! The scheduler implementation lives in the `taptalk-upgrade` crate;
//! this module holds the types it shares with the rest of the system.

mod errors;
mod events;

pub use errors::{UpgradeError, UpgradeResult};
pub use events::UpgradeEvent;
