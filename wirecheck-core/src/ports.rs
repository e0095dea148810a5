//! Port traits abstracting state and I/O away from the engine.

use camino::Utf8Path;
use std::sync::{Arc, Mutex};
use wirecheck_types::Assembly;

/// Keyed cache of the most recent assembly per `assembly_id`.
///
/// Callers that read, mutate and re-store an assembly hold the mutex returned
/// by [`lock`](AssemblyStore::lock) for the whole sequence.
pub trait AssemblyStore: Send + Sync {
    fn load(&self, assembly_id: &str) -> anyhow::Result<Option<Assembly>>;

    /// Store `assembly`, replacing whatever was kept under its id.
    fn remember(&self, assembly: &Assembly) -> anyhow::Result<()>;

    /// The writer lock for `assembly_id`. Same id, same mutex.
    fn lock(&self, assembly_id: &str) -> Arc<Mutex<()>>;

    /// Drop the writer lock for an id that has nothing stored and no other
    /// holder. Called after a lookup for `assembly_id` came back empty.
    fn release(&self, _assembly_id: &str) {}
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
