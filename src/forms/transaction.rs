use crate::models;
use crate::models::{Plan, TransactionKind, TransactionStatus};
use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use serde_valid::Validate;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TransactionForm {
    #[validate(minimum = 1)]
    pub organization_id: i32,
    /// Refunds are recorded with a positive amount and `kind = refund`.
    #[validate(minimum = 0)]
    #[validate(maximum = 100000000000)]
    pub amount_cents: i64,
    #[serde(default = "default_currency")]
    #[validate(pattern = r"^[A-Z]{3}$")]
    pub currency: String,
    #[serde(default)]
    pub kind: TransactionKind,
    #[serde(default)]
    pub status: TransactionStatus,
    pub plan: Option<Plan>,
    #[validate(max_length = 500)]
    pub description: Option<String>,
}

impl TransactionForm {
    pub fn check_initial_status(&self) -> Result<(), String> {
        if self.status.is_initial() {
            Ok(())
        } else {
            Err(format!(
                "New transactions must be pending or completed, got {:?}",
                self.status
            ))
        }
    }
}

impl From<&TransactionForm> for models::Transaction {
    fn from(form: &TransactionForm) -> Self {
        let mut transaction = models::Transaction::default();
        transaction.organization_id = form.organization_id;
        transaction.amount_cents = form.amount_cents;
        transaction.currency = form.currency.clone();
        transaction.kind = form.kind;
        transaction.status = form.status;
        transaction.plan = form.plan;
        transaction.description = form.description.clone();
        transaction.created_at = Utc::now();
        transaction.updated_at = Utc::now();
        transaction
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatusForm {
    pub status: TransactionStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionListQuery {
    pub organization_id: Option<i32>,
    pub status: Option<TransactionStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let form: TransactionForm =
            serde_json::from_str(r#"{"organization_id": 3, "amount_cents": 4900}"#).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.currency, "USD");
        assert_eq!(form.kind, TransactionKind::Subscription);
        assert_eq!(form.status, TransactionStatus::Pending);
    }

    #[test]
    fn negative_amount_and_bad_currency_fail() {
        let form: TransactionForm = serde_json::from_str(
            r#"{"organization_id": 3, "amount_cents": -1, "currency": "usd"}"#,
        )
        .unwrap();
        let errors = form.validate().unwrap_err().to_string();
        assert!(errors.contains("amount_cents"));
        assert!(errors.contains("currency"));
    }

    #[test]
    fn amount_has_an_upper_bound() {
        let form: TransactionForm = serde_json::from_str(
            r#"{"organization_id": 3, "amount_cents": 9223372036854775807}"#,
        )
        .unwrap();
        let errors = form.validate().unwrap_err().to_string();
        assert!(errors.contains("amount_cents"));
    }

    #[test]
    fn new_transactions_cannot_start_refunded_or_failed() {
        for (status, allowed) in [
            ("pending", true),
            ("completed", true),
            ("refunded", false),
            ("failed", false),
        ] {
            let form: TransactionForm = serde_json::from_str(&format!(
                r#"{{"organization_id": 3, "amount_cents": 4900, "status": "{}"}}"#,
                status
            ))
            .unwrap();
            assert_eq!(form.check_initial_status().is_ok(), allowed, "{}", status);
        }
    }
}
