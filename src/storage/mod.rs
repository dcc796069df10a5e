//! Storage implementations for different backends

pub mod async_storage;
pub mod file;
pub mod in_memory;
#[cfg(feature = "lmdb")]
pub mod lmdb;

pub use async_storage::{AsyncStorage, load_from_storage, save_to_storage};
pub use file::FileBackend;
pub use in_memory::MemoryBackend;
#[cfg(feature = "lmdb")]
pub use lmdb::LmdbBackend;
