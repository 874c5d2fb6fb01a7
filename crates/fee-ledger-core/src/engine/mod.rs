//! The fee ledger engine.
//!
//! `FeeLedger` wraps a storage backend and owns the write path (validation,
//! referential checks) and the cascade protocol. Everything on the read
//! side is computed from an immutable [`Snapshot`].

pub mod aggregate;
pub mod audit;
pub mod cascade;
pub mod filter;
pub mod snapshot;

pub use aggregate::{
    aggregate_for_student, pending_fees, student_rows, summarize, DashboardSummary, LastPayment,
    PendingFee, StudentAggregate, StudentRow,
};
pub use audit::{audit, AuditReport, BalanceMismatch, OrphanPayment};
pub use cascade::{CascadeReport, SweepReport};
pub use filter::filter_students;
pub use snapshot::Snapshot;

use crate::error::{FeeLedgerError, Result};
use crate::storage::{
    Collection, NewPayment, NewStudent, PaymentId, StorageBackend, StudentId, Subscription,
};

/// Ledger operations over a single backend.
pub struct FeeLedger<S> {
    backend: S,
}

impl<S: StorageBackend> FeeLedger<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Pull a fresh snapshot of both collections.
    pub fn load_all(&self) -> Result<Snapshot> {
        Snapshot::load(&self.backend)
    }

    /// Persist a new student.
    ///
    /// # Errors
    ///
    /// Returns `FeeLedgerError::Validation` if the name is blank.
    pub fn add_student(&self, student: &NewStudent) -> Result<StudentId> {
        student.validate()?;
        let id = self
            .backend
            .create(Collection::Students, &student.to_document()?)?;
        tracing::info!(student = %id, name = %student.name, "student added");
        Ok(StudentId::from(id))
    }

    /// Persist a new payment for an existing student.
    ///
    /// The balance carried by `payment` is stored as-is.
    ///
    /// # Errors
    ///
    /// - `Validation` for negative amounts or a blank student reference
    /// - `NotFound` if the student does not exist
    pub fn add_payment(&self, payment: &NewPayment) -> Result<PaymentId> {
        payment.validate()?;

        let target = payment.student_id.record_id();
        let exists = self
            .backend
            .list_all(Collection::Students)?
            .iter()
            .any(|record| record.id == target);
        if !exists {
            return Err(FeeLedgerError::NotFound(format!(
                "Student {}",
                payment.student_id
            )));
        }

        let id = self
            .backend
            .create(Collection::Payments, &payment.to_document()?)?;
        tracing::info!(
            payment = %id,
            student = %payment.student_id,
            balance = %payment.balance,
            "payment added"
        );
        Ok(PaymentId::from(id))
    }

    /// Subscribe to changes in `collection`, if the backend supports it.
    pub fn subscribe(&self, collection: Collection) -> Option<Subscription> {
        self.backend.subscribe(collection)
    }

    /// Turn change events into fresh snapshots.
    ///
    /// Each event triggers a full reload; the last snapshot pulled reflects
    /// the backend's latest state.
    pub fn refresh_on(
        &self,
        subscription: Subscription,
    ) -> impl Iterator<Item = Result<Snapshot>> + '_ {
        subscription.map(move |event| {
            tracing::debug!(collection = %event.collection, "change notification; reloading");
            self.load_all()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_payment_requires_existing_student() {
        let ledger = FeeLedger::new(MemoryStorage::new());
        let payment = NewPayment::new(StudentId::from("nobody"), dec!(1), dec!(1), "cash", "2024-01-01");

        let err = ledger.add_payment(&payment).unwrap_err();
        assert!(matches!(err, FeeLedgerError::NotFound(_)));
        assert_eq!(ledger.backend().len(Collection::Payments).unwrap(), 0);
    }

    #[test]
    fn test_add_student_rejects_blank_name() {
        let ledger = FeeLedger::new(MemoryStorage::new());
        let err = ledger
            .add_student(&NewStudent::new("", "101", "veg"))
            .unwrap_err();
        assert!(matches!(err, FeeLedgerError::Validation(_)));
    }

    #[test]
    fn test_stored_balance_is_kept_verbatim() {
        let ledger = FeeLedger::new(MemoryStorage::new());
        let sid = ledger
            .add_student(&NewStudent::new("Asha", "101", "veg"))
            .unwrap();
        let mut payment = NewPayment::new(sid.clone(), dec!(500), dec!(200), "cash", "2024-01-01");
        payment.balance = dec!(250);
        ledger.add_payment(&payment).unwrap();

        let snapshot = ledger.load_all().unwrap();
        assert_eq!(snapshot.aggregate_for(&sid).total_balance, dec!(250));
    }

    #[test]
    fn test_refresh_on_reloads_per_event() {
        let ledger = FeeLedger::new(MemoryStorage::new());
        let sub = ledger.subscribe(Collection::Students).unwrap();
        ledger
            .add_student(&NewStudent::new("Asha", "101", "veg"))
            .unwrap();
        ledger
            .add_student(&NewStudent::new("Bilal", "102", "veg"))
            .unwrap();

        let counts: Vec<usize> = ledger
            .refresh_on(sub)
            .take(2)
            .map(|snapshot| snapshot.unwrap().students().len())
            .collect();
        // Both events were queued before the first reload ran.
        assert_eq!(counts, vec![2, 2]);
    }
}
