//! Default port implementations.

use crate::ports::{AssemblyStore, WritePort};
use anyhow::Context;
use camino::Utf8Path;
use fs_err as fs;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;
use wirecheck_types::Assembly;

/// Process-lifetime store. Holds the latest assembly per id; no history, no eviction.
#[derive(Debug, Default)]
pub struct InMemoryAssemblyStore {
    assemblies: RwLock<HashMap<String, Assembly>>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl InMemoryAssemblyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.assemblies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of per-id writer locks currently held in the table.
    pub fn lock_count(&self) -> usize {
        self.lock_table().len()
    }

    fn lock_table(&self) -> MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssemblyStore for InMemoryAssemblyStore {
    fn load(&self, assembly_id: &str) -> anyhow::Result<Option<Assembly>> {
        let assemblies = self
            .assemblies
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(assemblies.get(assembly_id).cloned())
    }

    fn remember(&self, assembly: &Assembly) -> anyhow::Result<()> {
        debug!(
            assembly_id = %assembly.assembly_id,
            schema_hash = %assembly.schema_hash,
            "remember assembly"
        );
        self.assemblies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(assembly.assembly_id.clone(), assembly.clone());
        Ok(())
    }

    fn lock(&self, assembly_id: &str) -> Arc<Mutex<()>> {
        self.lock_table()
            .entry(assembly_id.to_string())
            .or_default()
            .clone()
    }

    fn release(&self, assembly_id: &str) {
        let mut locks = self.lock_table();
        let idle = locks
            .get(assembly_id)
            .is_some_and(|handle| Arc::strong_count(handle) == 1);
        if !idle {
            return;
        }
        let stored = self
            .assemblies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(assembly_id);
        if !stored {
            debug!(assembly_id, "release unused lock");
            locks.remove(assembly_id);
        }
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
