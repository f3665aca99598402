//! JSON snapshot of the task table.

use crate::error::StoreError;
use crate::store::Store;
use crate::task::{Filter, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub exported_at: DateTime<Utc>,
    pub filter: Filter,
    pub count: usize,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn capture(store: &Store, filter: Filter) -> Result<Self, StoreError> {
        let tasks = store.select(filter)?;
        Ok(Self {
            exported_at: Utc::now(),
            filter,
            count: tasks.len(),
            tasks,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
