//! Cascade delete and orphan sweep.
//!
//! Backends offer no transaction spanning both collections, so deleting a
//! student is a two-step protocol: remove the student, then each of its
//! payments. A failure in the second step is reported as
//! `FeeLedgerError::PartialCascade` and the leftovers become orphans that
//! `sweep_orphans` can later remove.
//!
//! A payment created for the student while a cascade is running is not
//! seen by step one and survives as an orphan. This race is accepted; the
//! sweep is the reconciliation path.

use serde::Serialize;

use super::snapshot::Snapshot;
use super::FeeLedger;
use crate::error::{FeeLedgerError, Result};
use crate::storage::{Collection, PaymentId, StorageBackend, StudentId};

/// Outcome of a completed cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub student_id: StudentId,
    /// Payments removed by this call
    pub payments_deleted: usize,
    /// Payments that were already gone when their turn came
    pub payments_already_gone: usize,
}

/// Outcome of an orphan sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub removed: Vec<PaymentId>,
    /// Orphans deleted by someone else between the scan and our delete
    pub already_gone: Vec<PaymentId>,
    pub failed: Vec<PaymentId>,
}

impl<S: StorageBackend> FeeLedger<S> {
    /// Delete a student and every payment that references it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the student does not exist; nothing is deleted.
    /// - `BackendUnavailable` if the payment scan or the student delete fails;
    ///   nothing is deleted.
    /// - `PartialCascade` if the student was deleted but at least one payment
    ///   could not be.
    pub fn delete_student(&self, student_id: &StudentId) -> Result<CascadeReport> {
        let targets: Vec<PaymentId> = Snapshot::load(&self.backend)?
            .payments_for_student(student_id)
            .into_iter()
            .map(|p| p.id.clone())
            .collect();

        if !self
            .backend
            .delete(Collection::Students, &student_id.record_id())?
        {
            return Err(FeeLedgerError::NotFound(format!("Student {}", student_id)));
        }
        tracing::info!(student = %student_id, payments = targets.len(), "student deleted; cascading");

        let mut report = CascadeReport {
            student_id: student_id.clone(),
            payments_deleted: 0,
            payments_already_gone: 0,
        };
        let mut failed = Vec::new();

        for payment_id in targets {
            match self
                .backend
                .delete(Collection::Payments, &payment_id.record_id())
            {
                Ok(true) => report.payments_deleted += 1,
                Ok(false) => report.payments_already_gone += 1,
                Err(err) => {
                    tracing::warn!(payment = %payment_id, error = %err, "cascade delete failed");
                    failed.push(payment_id);
                }
            }
        }

        if !failed.is_empty() {
            return Err(FeeLedgerError::PartialCascade {
                student_id: student_id.to_string(),
                deleted: report.payments_deleted,
                failed,
            });
        }

        Ok(report)
    }

    /// Delete every payment whose student no longer exists.
    ///
    /// Individual failures are collected in the report rather than aborting
    /// the sweep.
    pub fn sweep_orphans(&self) -> Result<SweepReport> {
        let snapshot = Snapshot::load(&self.backend)?;
        let mut report = SweepReport::default();

        for orphan in snapshot.orphans() {
            match self
                .backend
                .delete(Collection::Payments, &orphan.id.record_id())
            {
                Ok(true) => report.removed.push(orphan.id.clone()),
                Ok(false) => report.already_gone.push(orphan.id.clone()),
                Err(err) => {
                    tracing::warn!(payment = %orphan.id, error = %err, "orphan sweep delete failed");
                    report.failed.push(orphan.id.clone());
                }
            }
        }

        if !report.removed.is_empty() || !report.failed.is_empty() {
            tracing::info!(
                removed = report.removed.len(),
                already_gone = report.already_gone.len(),
                failed = report.failed.len(),
                "orphan sweep finished"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, NewPayment, NewStudent, RecordId, StoredRecord};
    use rust_decimal_macros::dec;

    fn seeded() -> (FeeLedger<MemoryStorage>, StudentId, StudentId) {
        let ledger = FeeLedger::new(MemoryStorage::new());
        let s1 = ledger
            .add_student(&NewStudent::new("Asha", "101", "veg"))
            .unwrap();
        let s2 = ledger
            .add_student(&NewStudent::new("Bilal", "102", "non-veg"))
            .unwrap();
        for (sid, total, paid) in [(&s1, dec!(500), dec!(500)), (&s1, dec!(500), dec!(100)), (&s2, dec!(800), dec!(800))] {
            ledger
                .add_payment(&NewPayment::new(sid.clone(), total, paid, "cash", "2024-06-01"))
                .unwrap();
        }
        (ledger, s1, s2)
    }

    #[test]
    fn test_cascade_removes_student_and_only_its_payments() {
        let (ledger, s1, s2) = seeded();

        let report = ledger.delete_student(&s1).unwrap();
        assert_eq!(report.payments_deleted, 2);

        let snapshot = ledger.load_all().unwrap();
        assert!(snapshot.student(&s1).is_none());
        assert_eq!(snapshot.payments().len(), 1);
        assert_eq!(snapshot.payments()[0].student_id, s2);
    }

    #[test]
    fn test_second_delete_is_not_found_and_harmless() {
        let (ledger, s1, _s2) = seeded();
        ledger.delete_student(&s1).unwrap();

        let err = ledger.delete_student(&s1).unwrap_err();
        assert!(matches!(err, FeeLedgerError::NotFound(_)));
        let snapshot = ledger.load_all().unwrap();
        assert_eq!(snapshot.students().len(), 1);
        assert_eq!(snapshot.payments().len(), 1);
    }

    #[test]
    fn test_partial_cascade_is_reported_and_sweep_recovers() {
        let (ledger, s1, _s2) = seeded();
        // Student delete + one payment delete succeed, the second payment fails.
        ledger.backend().fail_deletes_after(2).unwrap();

        let err = ledger.delete_student(&s1).unwrap_err();
        match err {
            FeeLedgerError::PartialCascade {
                deleted, failed, ..
            } => {
                assert_eq!(deleted, 1);
                assert_eq!(failed.len(), 1);
            }
            other => panic!("expected partial cascade, got {other:?}"),
        }

        let snapshot = ledger.load_all().unwrap();
        assert_eq!(snapshot.orphans().len(), 1);

        ledger.backend().fail_deletes_after(usize::MAX).unwrap();
        let sweep = ledger.sweep_orphans().unwrap();
        assert_eq!(sweep.removed.len(), 1);
        assert!(sweep.failed.is_empty());
        assert!(ledger.load_all().unwrap().orphans().is_empty());
    }

    #[test]
    fn test_backend_down_before_student_delete_changes_nothing() {
        let (ledger, s1, _s2) = seeded();
        ledger.backend().fail_deletes_after(0).unwrap();

        let err = ledger.delete_student(&s1).unwrap_err();
        assert!(err.is_backend());

        ledger.backend().fail_deletes_after(usize::MAX).unwrap();
        let snapshot = ledger.load_all().unwrap();
        assert_eq!(snapshot.students().len(), 2);
        assert_eq!(snapshot.payments().len(), 3);
    }

    #[test]
    fn test_sweep_on_consistent_ledger_is_noop() {
        let (ledger, _s1, _s2) = seeded();
        assert_eq!(ledger.sweep_orphans().unwrap(), SweepReport::default());
    }

    /// Deletes the payment underneath the sweep, as a concurrent cascade would.
    struct RacingStorage {
        inner: MemoryStorage,
    }

    impl StorageBackend for RacingStorage {
        fn create(&self, collection: Collection, record: &serde_json::Value) -> Result<RecordId> {
            self.inner.create(collection, record)
        }

        fn list_all(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
            self.inner.list_all(collection)
        }

        fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool> {
            self.inner.delete(collection, id)?;
            self.inner.delete(collection, id)
        }
    }

    #[test]
    fn test_sweep_counts_vanished_orphans_separately() {
        let inner = MemoryStorage::new();
        inner
            .create(
                Collection::Payments,
                &serde_json::json!({"studentId": "ghost", "balance": "5"}),
            )
            .unwrap();
        let ledger = FeeLedger::new(RacingStorage { inner });

        let sweep = ledger.sweep_orphans().unwrap();
        assert!(sweep.removed.is_empty());
        assert_eq!(sweep.already_gone.len(), 1);
        assert!(sweep.failed.is_empty());
    }

    #[test]
    fn test_sweep_keeps_payments_of_unreadable_students() {
        let (ledger, _s1, _s2) = seeded();
        let damaged = ledger
            .backend()
            .create(Collection::Students, &serde_json::json!(42))
            .unwrap();
        ledger
            .backend()
            .create(
                Collection::Payments,
                &serde_json::json!({"studentId": damaged.as_str(), "balance": "5"}),
            )
            .unwrap();

        assert_eq!(ledger.sweep_orphans().unwrap(), SweepReport::default());
        assert_eq!(ledger.load_all().unwrap().payments().len(), 4);
    }
}
