//! Consistency report over a snapshot.
//!
//! Stored balances are trusted for every aggregate. The audit surfaces the
//! places where that trust is misplaced; it never rewrites anything.

use rust_decimal::Decimal;
use serde::Serialize;

use super::snapshot::Snapshot;
use crate::storage::{PaymentId, StudentId};

/// A payment whose stored balance disagrees with its amounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceMismatch {
    pub payment_id: PaymentId,
    pub student_id: StudentId,
    pub stored: Decimal,
    pub derived: Decimal,
}

/// Orphan payment reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanPayment {
    pub payment_id: PaymentId,
    pub student_id: StudentId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    pub orphans: Vec<OrphanPayment>,
    pub balance_mismatches: Vec<BalanceMismatch>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.balance_mismatches.is_empty()
    }
}

pub fn audit(snapshot: &Snapshot) -> AuditReport {
    let orphans = snapshot
        .orphans()
        .into_iter()
        .map(|p| OrphanPayment {
            payment_id: p.id.clone(),
            student_id: p.student_id.clone(),
        })
        .collect();

    let balance_mismatches = snapshot
        .payments()
        .iter()
        .filter(|p| p.balance != p.derived_balance())
        .map(|p| BalanceMismatch {
            payment_id: p.id.clone(),
            student_id: p.student_id.clone(),
            stored: p.balance,
            derived: p.derived_balance(),
        })
        .collect();

    AuditReport {
        orphans,
        balance_mismatches,
    }
}
