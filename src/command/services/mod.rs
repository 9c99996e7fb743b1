//! Services operating on the command registry.

mod sync;

pub use sync::{CommandSynchronizer, SyncError, SyncReport};
