use super::matrix::{FeatureMatrix, MATRIX_VERSION};
use super::rules::{FeatureOverride, Rule, Tier, DEFAULT_RULES};
use crate::models::{FeatureKey, FeatureState, Plan};
use std::collections::HashMap;

/// Maps `(plan, feature)` to a display state.
///
/// Resolution order: the exact rule for the plan, then the wildcard rule for
/// the feature, then `not_shown`. Resolution never fails.
#[derive(Debug, Clone)]
pub struct Resolver {
    version: u32,
    exact: HashMap<(Plan, FeatureKey), FeatureState>,
    wildcard: HashMap<FeatureKey, FeatureState>,
}

impl Resolver {
    /// Later rules replace earlier ones for the same slot.
    pub fn new(rules: &[Rule]) -> Self {
        let mut resolver = Self {
            version: MATRIX_VERSION,
            exact: HashMap::new(),
            wildcard: HashMap::new(),
        };
        for rule in rules {
            resolver.apply(rule);
        }
        resolver
    }

    pub fn with_overrides(mut self, overrides: &[FeatureOverride]) -> Self {
        for item in overrides {
            tracing::info!(
                plan = ?item.plan,
                feature = %item.feature,
                state = %item.state,
                "applying feature matrix override"
            );
            self.apply(&Rule::from(item));
        }
        self
    }

    fn apply(&mut self, rule: &Rule) {
        match rule.tier {
            Tier::Exact(plan) => {
                self.exact.insert((plan, rule.feature), rule.state);
            }
            Tier::Any => {
                self.wildcard.insert(rule.feature, rule.state);
            }
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn resolve(&self, plan: Plan, feature: FeatureKey) -> FeatureState {
        self.exact
            .get(&(plan, feature))
            .or_else(|| self.wildcard.get(&feature))
            .copied()
            .unwrap_or(FeatureState::NotShown)
    }

    /// String boundary: unknown plans resolve as free, unknown features as
    /// `not_shown`.
    pub fn resolve_str(&self, plan: &str, feature: &str) -> FeatureState {
        let plan = Plan::parse_or_free(plan);
        match FeatureKey::parse(feature) {
            Some(feature) => self.resolve(plan, feature),
            None => {
                tracing::debug!(feature, "unknown feature key, hiding it");
                FeatureState::NotShown
            }
        }
    }

    pub fn matrix(&self, plan: Plan) -> FeatureMatrix {
        let mut matrix = FeatureMatrix::new(self.version, plan);
        for feature in FeatureKey::ALL {
            matrix.insert(feature, self.resolve(plan, feature));
        }
        matrix
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new(DEFAULT_RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureState::*;

    #[test]
    fn documented_examples() {
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve(Plan::Free, FeatureKey::ExportPdf), Paywall);
        assert_eq!(resolver.resolve(Plan::Premium, FeatureKey::ExportPdf), Shown);
        assert_eq!(
            resolver.resolve(Plan::Basic, FeatureKey::SatelliteScan),
            NotShown
        );
        assert_eq!(
            resolver.resolve(Plan::Free, FeatureKey::AssetManager),
            SampleData
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = Resolver::default();
        for plan in Plan::ALL {
            for feature in FeatureKey::ALL {
                let first = resolver.resolve(plan, feature);
                assert_eq!(first, resolver.resolve(plan, feature));
                assert_eq!(first, Resolver::default().resolve(plan, feature));
            }
        }
    }

    #[test]
    fn unknown_plan_resolves_like_free() {
        let resolver = Resolver::default();
        for feature in FeatureKey::ALL {
            assert_eq!(
                resolver.resolve_str("gold-tier", feature.as_str()),
                resolver.resolve(Plan::Free, feature)
            );
        }
    }

    #[test]
    fn unknown_feature_is_not_shown() {
        let resolver = Resolver::default();
        for plan in Plan::ALL {
            assert_eq!(resolver.resolve_str(plan.as_str(), "holodeck"), NotShown);
        }
        assert_eq!(resolver.resolve_str("nonsense", "holodeck"), NotShown);
    }

    #[test]
    fn aliases_resolve_like_their_canonical_plan() {
        let resolver = Resolver::default();
        for feature in FeatureKey::ALL {
            assert_eq!(
                resolver.resolve_str("enterprise", feature.as_str()),
                resolver.resolve(Plan::Premium, feature)
            );
            assert_eq!(
                resolver.resolve_str("professional", feature.as_str()),
                resolver.resolve(Plan::Pro, feature)
            );
        }
    }

    #[test]
    fn exact_rule_beats_wildcard_in_any_order() {
        let rules = [
            Rule {
                tier: Tier::Exact(Plan::Basic),
                feature: FeatureKey::Analytics,
                state: Paywall,
            },
            Rule {
                tier: Tier::Any,
                feature: FeatureKey::Analytics,
                state: Shown,
            },
        ];
        let resolver = Resolver::new(&rules);
        assert_eq!(resolver.resolve(Plan::Basic, FeatureKey::Analytics), Paywall);
        assert_eq!(resolver.resolve(Plan::Pro, FeatureKey::Analytics), Shown);
    }

    #[test]
    fn missing_configuration_is_not_shown() {
        let resolver = Resolver::new(&[]);
        assert_eq!(resolver.resolve(Plan::Premium, FeatureKey::NavMap), NotShown);
        assert_eq!(resolver.matrix(Plan::Premium).len(), FeatureKey::ALL.len());
    }

    #[test]
    fn overrides_replace_built_in_rules() {
        let resolver = Resolver::default().with_overrides(&[
            FeatureOverride {
                plan: Some(Plan::Pro),
                feature: FeatureKey::SatelliteScan,
                state: Shown,
            },
            FeatureOverride {
                plan: None,
                feature: FeatureKey::NavBilling,
                state: NotShown,
            },
        ]);

        assert_eq!(resolver.resolve(Plan::Pro, FeatureKey::SatelliteScan), Shown);
        assert_eq!(
            resolver.resolve(Plan::Basic, FeatureKey::SatelliteScan),
            NotShown
        );
        assert_eq!(resolver.resolve(Plan::Premium, FeatureKey::NavBilling), NotShown);
    }

    #[test]
    fn matrix_covers_every_feature() {
        let resolver = Resolver::default();
        for plan in Plan::ALL {
            let matrix = resolver.matrix(plan);
            assert_eq!(matrix.len(), FeatureKey::ALL.len());
            for feature in FeatureKey::ALL {
                assert_eq!(matrix.get(feature), resolver.resolve(plan, feature));
            }
        }
    }

    #[test]
    fn matrix_round_trips_through_json() {
        let resolver = Resolver::default();
        for plan in Plan::ALL {
            let matrix = resolver.matrix(plan);
            let json = serde_json::to_string(&matrix).unwrap();
            let reloaded: FeatureMatrix = serde_json::from_str(&json).unwrap();
            assert_eq!(matrix, reloaded);
        }
    }

    #[test]
    fn matrix_json_uses_wire_names() {
        let matrix = Resolver::default().matrix(Plan::Free);
        let json = serde_json::to_value(&matrix).unwrap();

        assert_eq!(json["plan"], "free");
        assert_eq!(json["dashboard"]["exportPDF"], "paywall");
        assert_eq!(json["navMenu"]["navWorkOrders"], "not_shown");
        assert!(json["dashboard"].get("navMap").is_none());
    }

    #[test]
    fn enterprise_variants_differ_on_scanning_features() {
        let resolver = Resolver::default();
        let satellite = resolver.matrix(Plan::SatelliteEnterprise);
        let driving = resolver.matrix(Plan::DrivingEnterprise);

        assert_eq!(satellite.get(FeatureKey::SatelliteScan), Shown);
        assert_eq!(satellite.get(FeatureKey::DrivingSurvey), NotShown);
        assert_eq!(driving.get(FeatureKey::DrivingSurvey), Shown);
        assert_eq!(driving.get(FeatureKey::NavSatellite), NotShown);
    }
}
