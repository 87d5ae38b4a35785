//! On-device storage for the active draft: key-value backends and the snapshot writer/reader.

mod error;
pub use error::StoreError;

pub mod snapshot;
pub mod storage;

pub use snapshot::{
    SNAPSHOT_KEY, Snapshot, SnapshotConfig, SnapshotStore, SnapshotWriter, restore_into,
};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
