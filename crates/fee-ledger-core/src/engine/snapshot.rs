//! Immutable view of both collections at one point in time.
//!
//! A snapshot is never patched after a write; callers pull a new one.

use std::collections::HashSet;

use serde::Serialize;

use super::aggregate::{
    aggregate_for_student, pending_fees, student_rows, summarize, DashboardSummary, PendingFee,
    StudentAggregate, StudentRow,
};
use crate::error::Result;
use crate::storage::{Collection, Payment, StorageBackend, StoredRecord, Student, StudentId};

/// Students and payments as loaded from a backend, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    students: Vec<Student>,
    payments: Vec<Payment>,
    /// Every stored student id, including records too damaged to load
    #[serde(skip)]
    stored_student_ids: HashSet<StudentId>,
}

impl Snapshot {
    pub fn new(students: Vec<Student>, payments: Vec<Payment>) -> Self {
        let stored_student_ids = students.iter().map(|s| s.id.clone()).collect();
        Self {
            students,
            payments,
            stored_student_ids,
        }
    }

    /// Pull both collections from `backend`.
    ///
    /// # Errors
    ///
    /// Returns `FeeLedgerError::BackendUnavailable` if either read fails.
    /// Records that are not JSON objects are skipped with a warning.
    pub fn load(backend: &dyn StorageBackend) -> Result<Self> {
        let students: Vec<Student> = normalize(backend.list_all(Collection::Students)?);
        let payments = normalize(backend.list_all(Collection::Payments)?);
        let stored_student_ids: HashSet<StudentId> = backend
            .list_ids(Collection::Students)?
            .into_iter()
            .map(StudentId::from)
            .collect();
        tracing::debug!(
            students = students.len(),
            unreadable_students = stored_student_ids.len().saturating_sub(students.len()),
            payments = payments.len(),
            "snapshot loaded"
        );
        Ok(Self {
            students,
            payments,
            stored_student_ids,
        })
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    /// A student's payments in load order.
    pub fn payments_for_student(&self, id: &StudentId) -> Vec<&Payment> {
        self.payments.iter().filter(|p| &p.student_id == id).collect()
    }

    /// Payments referencing a student that no longer exists.
    ///
    /// A student record that is stored but unreadable still counts as
    /// existing, so its payments are never treated as orphans.
    pub fn orphans(&self) -> Vec<&Payment> {
        self.payments
            .iter()
            .filter(|p| !self.stored_student_ids.contains(&p.student_id))
            .collect()
    }

    pub fn aggregate_for(&self, id: &StudentId) -> StudentAggregate {
        aggregate_for_student(id, &self.payments)
    }

    pub fn summary(&self) -> DashboardSummary {
        summarize(&self.students, &self.payments)
    }

    pub fn rows(&self, query: &str) -> Vec<StudentRow<'_>> {
        student_rows(&self.students, &self.payments, query)
    }

    pub fn pending(&self) -> Vec<PendingFee<'_>> {
        pending_fees(&self.students, &self.payments)
    }
}

fn normalize<T>(records: Vec<StoredRecord>) -> Vec<T>
where
    for<'r> T: TryFrom<&'r StoredRecord, Error = crate::error::FeeLedgerError>,
{
    records
        .iter()
        .filter_map(|record| match T::try_from(record) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(record = %record.id, error = %err, "skipping unreadable record");
                None
            }
        })
        .collect()
}
