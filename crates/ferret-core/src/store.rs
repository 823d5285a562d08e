use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::AppError;
use crate::job::JobRecord;
use crate::traits::ResultStore;

#[derive(Debug, Default)]
struct StoreInner {
    records: BTreeMap<i64, JobRecord>,
    last_id: i64,
}

/// Process-local result store.
///
/// The map and the id counter live behind one mutex, so ids are handed out in
/// the same critical section that inserts the record. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, AppError> {
        self.inner
            .lock()
            .map_err(|e| AppError::Store(format!("result store lock poisoned: {e}")))
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.lock()?.records.is_empty())
    }
}

impl ResultStore for InMemoryResultStore {
    async fn create(&self, mut record: JobRecord) -> Result<i64, AppError> {
        let mut inner = self.lock()?;
        inner.last_id += 1;
        let id = inner.last_id;
        record.id = id;
        inner.records.insert(id, record);
        Ok(id)
    }

    async fn update(&self, id: i64, mut record: JobRecord) -> Result<(), AppError> {
        let mut inner = self.lock()?;
        let slot = inner.records.get_mut(&id).ok_or(AppError::NotFound(id))?;
        record.id = id;
        *slot = record;
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<JobRecord, AppError> {
        self.lock()?
            .records
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<JobRecord>, AppError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, AppError> {
        self.len()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.lock()?
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound(id))
    }
}
