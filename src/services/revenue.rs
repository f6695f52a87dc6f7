use crate::models::{Transaction, TransactionKind, TransactionStatus};
use serde_derive::Serialize;
use std::collections::BTreeMap;

const UNASSIGNED: &str = "unassigned";

/// Revenue figures in cents. Amounts are summed as stored; mixed currencies
/// are not converted.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RevenueAnalytics {
    pub total_cents: i64,
    pub refunded_cents: i64,
    pub net_cents: i64,
    pub transaction_count: usize,
    pub refund_count: usize,
    pub by_plan: BTreeMap<String, i64>,
    pub by_month: BTreeMap<String, i64>,
}

/// Gross counts every charge that went through (completed, or completed and
/// later refunded). Refunds are refunded charges plus completed transactions
/// of kind `refund`. Pending and failed transactions are ignored. The plan
/// and month breakdowns are net.
pub fn summarize(transactions: &[Transaction]) -> RevenueAnalytics {
    let mut analytics = RevenueAnalytics::default();

    for transaction in transactions {
        let (gross, refunded) = match (transaction.kind, transaction.status) {
            (TransactionKind::Refund, TransactionStatus::Completed) => {
                (0, transaction.amount_cents)
            }
            (TransactionKind::Refund, _) => continue,
            (_, TransactionStatus::Completed) => (transaction.amount_cents, 0),
            (_, TransactionStatus::Refunded) => {
                (transaction.amount_cents, transaction.amount_cents)
            }
            (_, TransactionStatus::Pending | TransactionStatus::Failed) => continue,
        };

        if gross > 0 {
            analytics.transaction_count += 1;
        }
        if refunded > 0 {
            analytics.refund_count += 1;
        }
        analytics.total_cents = analytics.total_cents.saturating_add(gross);
        analytics.refunded_cents = analytics.refunded_cents.saturating_add(refunded);

        let net = gross.saturating_sub(refunded);
        let plan = transaction
            .plan
            .map(|plan| plan.as_str())
            .unwrap_or(UNASSIGNED);
        add_to(analytics.by_plan.entry(plan.to_string()).or_insert(0), net);
        add_to(
            analytics
                .by_month
                .entry(transaction.created_at.format("%Y-%m").to_string())
                .or_insert(0),
            net,
        );
    }

    analytics.net_cents = analytics
        .total_cents
        .saturating_sub(analytics.refunded_cents);
    analytics
}

/// Sums clamp at the `i64` bounds instead of overflowing.
fn add_to(sum: &mut i64, amount: i64) {
    *sum = sum.saturating_add(amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;
    use chrono::{TimeZone, Utc};

    fn transaction(
        amount_cents: i64,
        kind: TransactionKind,
        status: TransactionStatus,
        plan: Option<Plan>,
        month: u32,
    ) -> Transaction {
        Transaction {
            amount_cents,
            kind,
            status,
            plan,
            currency: "USD".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, month, 15, 12, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(summarize(&[]), RevenueAnalytics::default());
    }

    #[test]
    fn fixed_transaction_set() {
        use TransactionKind::*;
        use TransactionStatus::*;

        let transactions = vec![
            transaction(4900, Subscription, Completed, Some(Plan::Basic), 1),
            transaction(9900, Subscription, Completed, Some(Plan::Pro), 1),
            transaction(9900, Upgrade, Refunded, Some(Plan::Pro), 2),
            transaction(1500, Refund, Completed, Some(Plan::Basic), 2),
            transaction(25000, Subscription, Pending, Some(Plan::Premium), 2),
            transaction(25000, Subscription, Failed, Some(Plan::Premium), 2),
            transaction(2000, OneTime, Completed, None, 3),
        ];

        let analytics = summarize(&transactions);

        assert_eq!(analytics.total_cents, 4900 + 9900 + 9900 + 2000);
        assert_eq!(analytics.refunded_cents, 9900 + 1500);
        assert_eq!(analytics.net_cents, 4900 + 9900 + 2000 - 1500);
        assert_eq!(analytics.transaction_count, 4);
        assert_eq!(analytics.refund_count, 2);

        assert_eq!(analytics.by_plan["basic"], 4900 - 1500);
        assert_eq!(analytics.by_plan["pro"], 9900);
        assert_eq!(analytics.by_plan["unassigned"], 2000);
        assert!(!analytics.by_plan.contains_key("premium"));

        assert_eq!(analytics.by_month["2024-01"], 4900 + 9900);
        assert_eq!(analytics.by_month["2024-02"], -1500);
        assert_eq!(analytics.by_month["2024-03"], 2000);
    }

    #[test]
    fn huge_amounts_clamp_instead_of_overflowing() {
        let large = transaction(
            i64::MAX / 2 + 1,
            TransactionKind::Subscription,
            TransactionStatus::Completed,
            Some(Plan::Premium),
            4,
        );
        let refund = transaction(
            i64::MAX,
            TransactionKind::Refund,
            TransactionStatus::Completed,
            Some(Plan::Premium),
            4,
        );

        let analytics = summarize(&[large.clone(), large.clone(), refund.clone(), refund]);

        assert_eq!(analytics.total_cents, i64::MAX);
        assert_eq!(analytics.refunded_cents, i64::MAX);
        assert_eq!(analytics.net_cents, 0);
        assert_eq!(analytics.transaction_count, 2);
        // MAX, then MAX - MAX, then 0 - MAX
        assert_eq!(analytics.by_plan["premium"], -i64::MAX);
        assert_eq!(analytics.by_month["2024-04"], -i64::MAX);
    }
}
