//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the cache store.

pub mod cleanup;
pub mod config;
pub mod dump;
pub mod gather;
pub mod index;
pub mod rescan;
pub mod roots;
pub mod search;
pub mod show;

// Re-export execute functions for convenience
pub use cleanup::execute as cleanup;
pub use self::config::execute as config;
pub use dump::execute as dump;
pub use gather::execute as gather;
pub use index::execute as index;
pub use rescan::execute as rescan;
pub use roots::execute as roots;
pub use search::execute as search;
pub use show::execute as show;
