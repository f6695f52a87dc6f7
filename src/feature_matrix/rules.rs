use crate::models::{FeatureKey, FeatureState, Plan};
use serde_derive::{Deserialize, Serialize};

/// Which plans a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Default for every plan without an exact rule.
    Any,
    Exact(Plan),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub tier: Tier,
    pub feature: FeatureKey,
    pub state: FeatureState,
}

const fn any(feature: FeatureKey, state: FeatureState) -> Rule {
    Rule {
        tier: Tier::Any,
        feature,
        state,
    }
}

const fn exact(plan: Plan, feature: FeatureKey, state: FeatureState) -> Rule {
    Rule {
        tier: Tier::Exact(plan),
        feature,
        state,
    }
}

use FeatureKey::*;
use FeatureState::*;
use Plan::*;

/// Built-in gating table. Features without a wildcard rule are hidden for
/// every plan not listed explicitly.
pub const DEFAULT_RULES: &[Rule] = &[
    any(AssetManager, Shown),
    exact(Free, AssetManager, SampleData),
    any(IssueReports, Shown),
    any(RoadNetwork, Shown),
    exact(Free, RoadNetwork, SampleData),
    any(Analytics, Shown),
    exact(Free, Analytics, Paywall),
    exact(Basic, Analytics, SampleData),
    any(ExportPdf, Shown),
    exact(Free, ExportPdf, Paywall),
    exact(Basic, ExportPdf, Paywall),
    any(ExportCsv, Shown),
    exact(Free, ExportCsv, Paywall),
    any(WorkOrders, Shown),
    exact(Free, WorkOrders, NotShown),
    exact(Basic, WorkOrders, Paywall),
    any(BudgetPlanner, Shown),
    exact(Free, BudgetPlanner, NotShown),
    exact(Basic, BudgetPlanner, NotShown),
    exact(Pro, BudgetPlanner, Paywall),
    exact(Pro, SatelliteScan, Paywall),
    exact(Premium, SatelliteScan, Shown),
    exact(SatelliteEnterprise, SatelliteScan, Shown),
    exact(Pro, DrivingSurvey, Paywall),
    exact(Premium, DrivingSurvey, Shown),
    exact(DrivingEnterprise, DrivingSurvey, Shown),
    any(NavDashboard, Shown),
    any(NavAssets, Shown),
    any(NavIssues, Shown),
    any(NavMap, Shown),
    any(NavAnalytics, Shown),
    exact(Free, NavAnalytics, Paywall),
    any(NavWorkOrders, Shown),
    exact(Free, NavWorkOrders, NotShown),
    exact(Basic, NavWorkOrders, Paywall),
    exact(Premium, NavSatellite, Shown),
    exact(SatelliteEnterprise, NavSatellite, Shown),
    exact(Premium, NavDriving, Shown),
    exact(DrivingEnterprise, NavDriving, Shown),
    any(NavBilling, Shown),
    any(NavSettings, Shown),
];

/// Operator-supplied rule from `feature_matrix.overrides` in the configuration.
/// A missing `plan` replaces the wildcard entry of the feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOverride {
    #[serde(default)]
    pub plan: Option<Plan>,
    pub feature: FeatureKey,
    pub state: FeatureState,
}

impl From<&FeatureOverride> for Rule {
    fn from(value: &FeatureOverride) -> Self {
        Rule {
            tier: value.plan.map(Tier::Exact).unwrap_or(Tier::Any),
            feature: value.feature,
            state: value.state,
        }
    }
}
