//! Per-student and dashboard aggregates.
//!
//! All sums are exact decimal reductions over the stored values; nothing is
//! rounded until display.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::filter::filter_students;
use crate::storage::{Payment, Student, StudentId};

/// Date of a student's most recent payment, or the "no payment" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LastPayment {
    #[default]
    None,
    On(String),
}

impl LastPayment {
    pub fn date(&self) -> Option<&str> {
        match self {
            LastPayment::None => None,
            LastPayment::On(date) => Some(date),
        }
    }
}

impl fmt::Display for LastPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastPayment::None => f.write_str("No payment"),
            LastPayment::On(date) => f.write_str(date),
        }
    }
}

impl Serialize for LastPayment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.date().serialize(serializer)
    }
}

/// Totals for a single student.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StudentAggregate {
    pub total_paid: Decimal,
    pub total_balance: Decimal,
    pub last_payment: LastPayment,
}

/// Aggregate every payment belonging to `student_id`.
///
/// `last_payment` is the date of the matching payment that comes last in
/// load order. No matches yields zeros and `LastPayment::None`.
pub fn aggregate_for_student(student_id: &StudentId, payments: &[Payment]) -> StudentAggregate {
    payments
        .iter()
        .filter(|p| &p.student_id == student_id)
        .fold(StudentAggregate::default(), |mut acc, p| {
            acc.total_paid = acc.total_paid.saturating_add(p.paid_amount);
            acc.total_balance = acc.total_balance.saturating_add(p.balance);
            acc.last_payment = LastPayment::On(p.date.clone());
            acc
        })
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub student_count: usize,
    pub payment_count: usize,
    pub total_pending: Decimal,
}

/// Count both collections and sum every stored balance.
///
/// `total_pending` is one global reduction over all payments, orphans
/// included, not a sum of per-student totals. Sums saturate at the
/// `Decimal` bounds.
pub fn summarize(students: &[Student], payments: &[Payment]) -> DashboardSummary {
    DashboardSummary {
        student_count: students.len(),
        payment_count: payments.len(),
        total_pending: payments
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.balance)),
    }
}

/// One line of the student table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRow<'a> {
    pub student: &'a Student,
    #[serde(flatten)]
    pub aggregate: StudentAggregate,
}

/// Students matching `query`, each with its aggregate, in original order.
pub fn student_rows<'a>(
    students: &'a [Student],
    payments: &[Payment],
    query: &str,
) -> Vec<StudentRow<'a>> {
    filter_students(students, query)
        .into_iter()
        .map(|student| StudentRow {
            student,
            aggregate: aggregate_for_student(&student.id, payments),
        })
        .collect()
}

/// A student with an outstanding balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingFee<'a> {
    pub student: &'a Student,
    pub pending: Decimal,
}

/// Students whose summed balance is above zero, in student order.
pub fn pending_fees<'a>(students: &'a [Student], payments: &[Payment]) -> Vec<PendingFee<'a>> {
    students
        .iter()
        .filter_map(|student| {
            let pending = aggregate_for_student(&student.id, payments).total_balance;
            (pending > Decimal::ZERO).then_some(PendingFee { student, pending })
        })
        .collect()
}
