//! In-memory [`RosterStore`] used by tests and local experiments.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::store::{EdgeSet, RosterStore};
use crate::types::StudentId;

#[derive(Debug, Default)]
struct Tables {
    registrations: BTreeSet<(String, String)>,
    opt_ins: BTreeSet<(String, String)>,
    suspensions: BTreeSet<String>,
}

impl Tables {
    fn edges(&self, set: EdgeSet) -> &BTreeSet<(String, String)> {
        match set {
            EdgeSet::Registration => &self.registrations,
            EdgeSet::NotificationOptIn => &self.opt_ins,
        }
    }

    fn edges_mut(&mut self, set: EdgeSet) -> &mut BTreeSet<(String, String)> {
        match set {
            EdgeSet::Registration => &mut self.registrations,
            EdgeSet::NotificationOptIn => &mut self.opt_ins,
        }
    }
}

/// Writes allowed before the store starts failing; `usize::MAX` means no limit.
const UNLIMITED_WRITES: usize = usize::MAX;

/// A [`RosterStore`] kept entirely in process memory.
///
/// Writes can be made to fail on demand with [`set_fail_writes`] or
/// [`fail_writes_after`] so callers can exercise their persistence error
/// paths.
///
/// [`set_fail_writes`]: MemoryRosterStore::set_fail_writes
/// [`fail_writes_after`]: MemoryRosterStore::fail_writes_after
#[derive(Debug)]
pub struct MemoryRosterStore {
    tables: RwLock<Tables>,
    writes_left: AtomicUsize,
}

impl Default for MemoryRosterStore {
    fn default() -> Self {
        Self {
            tables: RwLock::default(),
            writes_left: AtomicUsize::new(UNLIMITED_WRITES),
        }
    }
}

impl MemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write return [`CoreError::Persistence`], or
    /// lift that again.
    pub fn set_fail_writes(&self, fail: bool) {
        let left = if fail { 0 } else { UNLIMITED_WRITES };
        self.writes_left.store(left, Ordering::SeqCst);
    }

    /// Let the next `writes` writes succeed, then fail all later ones.
    pub fn fail_writes_after(&self, writes: usize) {
        self.writes_left.store(writes, Ordering::SeqCst);
    }

    /// Number of edges currently stored in `set`.
    pub async fn edge_count(&self, set: EdgeSet) -> usize {
        self.tables.read().await.edges(set).len()
    }

    fn check_writable(&self) -> Result<(), CoreError> {
        let spent = self
            .writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                0 => None,
                UNLIMITED_WRITES => Some(UNLIMITED_WRITES),
                n => Some(n - 1),
            });
        if spent.is_err() {
            return Err(CoreError::Persistence("Storage is not writable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RosterStore for MemoryRosterStore {
    async fn edge_exists(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .edges(set)
            .contains(&(teacher.to_string(), student.to_string())))
    }

    async fn insert_edge_if_absent(
        &self,
        set: EdgeSet,
        teacher: &str,
        student: &str,
    ) -> Result<bool, CoreError> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        Ok(tables
            .edges_mut(set)
            .insert((teacher.to_string(), student.to_string())))
    }

    async fn edges_by_source(
        &self,
        set: EdgeSet,
        teacher: &str,
    ) -> Result<Vec<StudentId>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .edges(set)
            .iter()
            .filter(|(t, _)| t == teacher)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn is_suspended(&self, student: &str) -> Result<bool, CoreError> {
        Ok(self.tables.read().await.suspensions.contains(student))
    }

    async fn suspend(&self, student: &str) -> Result<bool, CoreError> {
        self.check_writable()?;
        Ok(self
            .tables
            .write()
            .await
            .suspensions
            .insert(student.to_string()))
    }

    async fn common_students(&self, teachers: &[String]) -> Result<Vec<StudentId>, CoreError> {
        let tables = self.tables.read().await;
        let mut per_teacher = teachers.iter().map(|teacher| {
            tables
                .registrations
                .iter()
                .filter(|(t, _)| t == teacher)
                .map(|(_, s)| s.clone())
                .collect::<BTreeSet<_>>()
        });

        let Some(first) = per_teacher.next() else {
            return Ok(Vec::new());
        };
        let common = per_teacher.fold(first, |acc, students| {
            acc.intersection(&students).cloned().collect()
        });
        Ok(common.into_iter().collect())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
