//! Text and table output for ledger views.

use rust_decimal::Decimal;

use fee_ledger_core::amount::format_amount;
use fee_ledger_core::engine::{AuditReport, DashboardSummary, PendingFee, StudentRow};
use fee_ledger_core::storage::Payment;

use crate::helpers::display_date;
use crate::ui::{kv, table, Column, UiContext};

/// Format an amount for humans.
///
/// Pretty output carries the currency symbol; plain output is the bare
/// two-place number so scripts can parse it.
pub fn money(ctx: &UiContext, amount: Decimal) -> String {
    if ctx.mode.is_pretty() {
        format!("{}{}", ctx.currency, format_amount(amount))
    } else {
        format_amount(amount)
    }
}

pub fn student_table(ctx: &UiContext, rows: &[StudentRow<'_>], date_format: &str) -> String {
    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Room"),
        Column::new("Phone"),
        Column::new("Lunch"),
        Column::numeric("Paid"),
        Column::numeric("Balance"),
        Column::new("Last payment"),
    ];
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let last = match row.aggregate.last_payment.date() {
                Some(date) => display_date(date, date_format),
                None => row.aggregate.last_payment.to_string(),
            };
            vec![
                row.student.id.to_string(),
                row.student.name.clone(),
                row.student.room.clone(),
                row.student.phone.clone().unwrap_or_default(),
                row.student.lunch_type.clone(),
                money(ctx, row.aggregate.total_paid),
                money(ctx, row.aggregate.total_balance),
                last,
            ]
        })
        .collect();
    table(ctx, &columns, &body)
}

pub fn payment_table(ctx: &UiContext, payments: &[&Payment], date_format: &str) -> String {
    let columns = [
        Column::new("ID"),
        Column::new("Date"),
        Column::new("Mode"),
        Column::numeric("Fees"),
        Column::numeric("Paid"),
        Column::numeric("Balance"),
    ];
    let body: Vec<Vec<String>> = payments
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                display_date(&p.date, date_format),
                p.payment_mode.clone(),
                money(ctx, p.total_fees),
                money(ctx, p.paid_amount),
                money(ctx, p.balance),
            ]
        })
        .collect();
    table(ctx, &columns, &body)
}

pub fn pending_table(ctx: &UiContext, pending: &[PendingFee<'_>]) -> String {
    let columns = [
        Column::new("ID"),
        Column::new("Name"),
        Column::new("Room"),
        Column::new("Phone"),
        Column::numeric("Pending"),
    ];
    let body: Vec<Vec<String>> = pending
        .iter()
        .map(|p| {
            vec![
                p.student.id.to_string(),
                p.student.name.clone(),
                p.student.room.clone(),
                p.student.phone.clone().unwrap_or_default(),
                money(ctx, p.pending),
            ]
        })
        .collect();
    table(ctx, &columns, &body)
}

pub fn summary_lines(ctx: &UiContext, summary: &DashboardSummary) -> Vec<String> {
    vec![
        kv(ctx, "Students", &summary.student_count.to_string()),
        kv(ctx, "Payments", &summary.payment_count.to_string()),
        kv(ctx, "Total pending", &money(ctx, summary.total_pending)),
    ]
}

/// One line per audit finding.
pub fn audit_lines(ctx: &UiContext, report: &AuditReport) -> Vec<String> {
    let orphans = report.orphans.iter().map(|o| {
        format!(
            "orphan payment {} references missing student {}",
            o.payment_id, o.student_id
        )
    });
    let mismatches = report.balance_mismatches.iter().map(|m| {
        format!(
            "payment {} stores balance {} but fees minus paid is {}",
            m.payment_id,
            money(ctx, m.stored),
            money(ctx, m.derived)
        )
    });
    orphans.chain(mismatches).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use fee_ledger_core::engine::LastPayment;
    use fee_ledger_core::engine::StudentAggregate;
    use fee_ledger_core::storage::{Student, StudentId};

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            mode,
            currency: "\u{20B9}".to_string(),
        }
    }

    #[test]
    fn test_money_symbol_only_when_pretty() {
        let amount = Decimal::new(3005, 1);
        assert_eq!(money(&ctx(OutputMode::Plain), amount), "300.50");
        assert_eq!(money(&ctx(OutputMode::Pretty), amount), "\u{20B9}300.50");
    }

    #[test]
    fn test_student_table_plain_row() {
        let student = Student {
            id: StudentId::from("s1"),
            name: "Asha".to_string(),
            room: "101".to_string(),
            phone: None,
            lunch_type: "veg".to_string(),
        };
        let rows = vec![StudentRow {
            student: &student,
            aggregate: StudentAggregate {
                total_paid: Decimal::new(1200, 0),
                total_balance: Decimal::new(300, 0),
                last_payment: LastPayment::None,
            },
        }];
        let out = student_table(&ctx(OutputMode::Plain), &rows, "%Y-%m-%d");
        assert_eq!(out, "s1\tAsha\t101\t\tveg\t1200.00\t300.00\tNo payment");
    }

    #[test]
    fn test_summary_lines_plain() {
        let summary = DashboardSummary {
            student_count: 2,
            payment_count: 3,
            total_pending: Decimal::new(300, 0),
        };
        assert_eq!(
            summary_lines(&ctx(OutputMode::Plain), &summary),
            vec!["students=2", "payments=3", "total_pending=300.00"]
        );
    }
}
