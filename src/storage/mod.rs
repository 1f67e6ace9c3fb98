//! Town file persistence

pub mod loader;
pub mod writer;

pub use loader::{load_from_file, parse_town, StorageError};
pub use writer::{save_to_file, write_town, TownFile};
