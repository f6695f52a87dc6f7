use serde_derive::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::Postgres;
use std::fmt;
use std::str::FromStr;

/// Subscription tier of an organization.
///
/// This is the one authoritative tier list. Older names used by billing and
/// the front end (`professional`, `enterprise`, `starter`, ...) are accepted as
/// aliases when parsing but never produced.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    #[serde(alias = "starter")]
    Basic,
    #[serde(alias = "professional")]
    Pro,
    #[serde(alias = "enterprise")]
    Premium,
    #[serde(alias = "satellite")]
    SatelliteEnterprise,
    #[serde(alias = "driving")]
    DrivingEnterprise,
}

const ALIASES: &[(&str, Plan)] = &[
    ("starter", Plan::Basic),
    ("professional", Plan::Pro),
    ("enterprise", Plan::Premium),
    ("satellite", Plan::SatelliteEnterprise),
    ("driving", Plan::DrivingEnterprise),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan: {0}")]
pub struct UnknownPlan(pub String);

impl Plan {
    pub const ALL: [Plan; 6] = [
        Plan::Free,
        Plan::Basic,
        Plan::Pro,
        Plan::Premium,
        Plan::SatelliteEnterprise,
        Plan::DrivingEnterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Pro => "pro",
            Plan::Premium => "premium",
            Plan::SatelliteEnterprise => "satellite_enterprise",
            Plan::DrivingEnterprise => "driving_enterprise",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Free => "Free",
            Plan::Basic => "Basic",
            Plan::Pro => "Pro",
            Plan::Premium => "Premium",
            Plan::SatelliteEnterprise => "Satellite Enterprise",
            Plan::DrivingEnterprise => "Driving Enterprise",
        }
    }

    /// Every normalized name that reads back as this plan: the canonical name
    /// followed by its aliases.
    pub fn stored_names(&self) -> Vec<&'static str> {
        std::iter::once(self.as_str())
            .chain(
                ALIASES
                    .iter()
                    .filter(|(_, plan)| plan == self)
                    .map(|(alias, _)| *alias),
            )
            .collect()
    }

    /// All canonical names and aliases.
    pub fn known_names() -> Vec<&'static str> {
        Plan::ALL
            .iter()
            .map(Plan::as_str)
            .chain(ALIASES.iter().map(|(alias, _)| *alias))
            .collect()
    }

    /// Canonical names win over aliases. Case, surrounding whitespace and
    /// `-`/space separators are ignored.
    pub fn parse(value: &str) -> Option<Plan> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");

        Plan::ALL
            .iter()
            .find(|plan| plan.as_str() == normalized)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == normalized)
                    .map(|(_, plan)| plan)
            })
            .copied()
    }

    /// Unknown plans get the most restrictive tier.
    pub fn parse_or_free(value: &str) -> Plan {
        Plan::parse(value).unwrap_or_else(|| {
            tracing::debug!(plan = value, "unknown plan, falling back to free");
            Plan::Free
        })
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    pub fn is_enterprise(&self) -> bool {
        matches!(self, Plan::SatelliteEnterprise | Plan::DrivingEnterprise)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::parse(s).ok_or_else(|| UnknownPlan(s.to_string()))
    }
}

// Stored as TEXT. Rows carrying a plan this build does not know decode as free.
impl sqlx::Type<Postgres> for Plan {
    fn type_info() -> PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for Plan {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as sqlx::Decode<Postgres>>::decode(value)?;
        Ok(Plan::parse_or_free(raw))
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for Plan {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <&str as sqlx::Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_names_include_aliases() {
        assert_eq!(Plan::Pro.stored_names(), vec!["pro", "professional"]);
        assert_eq!(Plan::Free.stored_names(), vec!["free"]);
        for plan in Plan::ALL {
            for name in plan.stored_names() {
                assert_eq!(Plan::parse(name), Some(plan));
                assert!(Plan::known_names().contains(&name));
            }
        }
    }

    #[test]
    fn canonical_names_parse() {
        for plan in Plan::ALL {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!(Plan::parse("  Premium "), Some(Plan::Premium));
        assert_eq!(
            Plan::parse("Satellite-Enterprise"),
            Some(Plan::SatelliteEnterprise)
        );
        assert_eq!(
            Plan::parse("driving enterprise"),
            Some(Plan::DrivingEnterprise)
        );
    }

    #[test]
    fn legacy_aliases_map_to_canonical_tiers() {
        assert_eq!(Plan::parse("professional"), Some(Plan::Pro));
        assert_eq!(Plan::parse("enterprise"), Some(Plan::Premium));
        assert_eq!(Plan::parse("starter"), Some(Plan::Basic));
    }

    #[test]
    fn unknown_plan_falls_back_to_free() {
        assert_eq!(Plan::parse("platinum"), None);
        assert_eq!(Plan::parse_or_free("platinum"), Plan::Free);
        assert_eq!(Plan::parse_or_free(""), Plan::Free);
        assert!("platinum".parse::<Plan>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Plan::SatelliteEnterprise).unwrap();
        assert_eq!(json, "\"satellite_enterprise\"");

        let plan: Plan = serde_json::from_str("\"professional\"").unwrap();
        assert_eq!(plan, Plan::Pro);
    }

    #[test]
    fn only_free_is_unpaid() {
        assert!(!Plan::Free.is_paid());
        assert!(Plan::Basic.is_paid());
        assert!(Plan::DrivingEnterprise.is_enterprise());
        assert!(!Plan::Premium.is_enterprise());
    }
}
