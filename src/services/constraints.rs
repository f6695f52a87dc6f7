//! Data consistency checks the schema cannot express.

use crate::db;
use crate::models::Plan;
use serde_derive::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    OrphanedUser,
    NegativeAmount,
    UnknownPlan,
    LegacyPlanName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub record_id: i32,
    pub detail: String,
}

impl Violation {
    /// Legacy names still resolve, so they do not fail the check.
    pub fn is_error(&self) -> bool {
        !matches!(self.kind, ViolationKind::LegacyPlanName)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} #{}: {}", self.kind, self.record_id, self.detail)
    }
}

/// Stored plan names that are unknown (gated as free) or only known as a
/// legacy alias.
pub fn plan_violations(plans: &[(i32, String)]) -> Vec<Violation> {
    plans
        .iter()
        .filter_map(|(id, raw)| match Plan::parse(raw) {
            None => Some(Violation {
                kind: ViolationKind::UnknownPlan,
                record_id: *id,
                detail: format!("organization plan {:?} is unknown and is gated as free", raw),
            }),
            Some(plan) if plan.as_str() != raw => Some(Violation {
                kind: ViolationKind::LegacyPlanName,
                record_id: *id,
                detail: format!("organization plan {:?} should be stored as {:?}", raw, plan.as_str()),
            }),
            Some(_) => None,
        })
        .collect()
}

pub async fn check(pool: &sqlx::PgPool) -> Result<Vec<Violation>, String> {
    let mut violations = Vec::new();

    for (user_id, organization_id) in db::user::fetch_orphaned(pool).await? {
        violations.push(Violation {
            kind: ViolationKind::OrphanedUser,
            record_id: user_id,
            detail: format!("user references missing organization {}", organization_id),
        });
    }

    for transaction_id in db::transaction::fetch_negative_amounts(pool).await? {
        violations.push(Violation {
            kind: ViolationKind::NegativeAmount,
            record_id: transaction_id,
            detail: "transaction amount is negative".to_string(),
        });
    }

    let plans = db::organization::fetch_raw_plans(pool).await?;
    violations.extend(plan_violations(&plans));

    Ok(violations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_and_legacy_plans_are_reported() {
        let plans = vec![
            (1, "premium".to_string()),
            (2, "enterprise".to_string()),
            (3, "gold".to_string()),
        ];
        let violations = plan_violations(&plans);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, ViolationKind::LegacyPlanName);
        assert_eq!(violations[0].record_id, 2);
        assert!(!violations[0].is_error());
        assert_eq!(violations[1].kind, ViolationKind::UnknownPlan);
        assert!(violations[1].is_error());
    }
}
