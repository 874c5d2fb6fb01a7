//! JSON output.
//!
//! Amounts are emitted as exact decimal strings, unrounded.

use chrono::Utc;
use serde::Serialize;

use fee_ledger_core::{Snapshot, VERSION};

/// Pretty-print any serializable value to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Full export document: every record plus the dashboard summary.
pub fn export_json(snapshot: &Snapshot) -> serde_json::Value {
    serde_json::json!({
        "version": VERSION,
        "exported_at": Utc::now().to_rfc3339(),
        "summary": snapshot.summary(),
        "students": snapshot.students(),
        "payments": snapshot.payments(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fee_ledger_core::storage::{Payment, PaymentId, Student, StudentId};
    use rust_decimal::Decimal;

    #[test]
    fn test_export_contains_records_and_summary() {
        let snapshot = Snapshot::new(
            vec![Student {
                id: StudentId::from("s1"),
                name: "Asha".to_string(),
                room: "101".to_string(),
                phone: None,
                lunch_type: "veg".to_string(),
            }],
            vec![Payment {
                id: PaymentId::from("p1"),
                student_id: StudentId::from("s1"),
                total_fees: Decimal::new(500, 0),
                paid_amount: Decimal::new(300, 0),
                balance: Decimal::new(200, 0),
                payment_mode: "cash".to_string(),
                date: "2024-06-01".to_string(),
            }],
        );

        let doc = export_json(&snapshot);
        assert_eq!(doc["students"][0]["name"], "Asha");
        assert_eq!(doc["payments"][0]["studentId"], "s1");
        assert_eq!(doc["payments"][0]["balance"], "200");
        assert_eq!(doc["summary"]["student_count"], 1);
        assert_eq!(doc["summary"]["total_pending"], "200");
    }
}
