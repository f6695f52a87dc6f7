use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Resolved visibility of a gated feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureState {
    /// Live data, fully interactive.
    Shown,
    /// Canned data, interactive but nothing is persisted.
    SampleData,
    /// Locked preview; interaction surfaces an upgrade prompt.
    Paywall,
    /// Omitted entirely.
    NotShown,
}

impl FeatureState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureState::Shown => "shown",
            FeatureState::SampleData => "sample_data",
            FeatureState::Paywall => "paywall",
            FeatureState::NotShown => "not_shown",
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, FeatureState::NotShown)
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, FeatureState::Shown | FeatureState::SampleData)
    }

    pub fn uses_live_data(&self) -> bool {
        matches!(self, FeatureState::Shown)
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    Dashboard,
    NavMenu,
}

/// Registry of every gated UI capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    AssetManager,
    IssueReports,
    RoadNetwork,
    Analytics,
    #[serde(rename = "exportPDF")]
    ExportPdf,
    #[serde(rename = "exportCSV")]
    ExportCsv,
    WorkOrders,
    BudgetPlanner,
    SatelliteScan,
    DrivingSurvey,
    NavDashboard,
    NavAssets,
    NavIssues,
    NavMap,
    NavAnalytics,
    NavWorkOrders,
    NavSatellite,
    NavDriving,
    NavBilling,
    NavSettings,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 20] = [
        FeatureKey::AssetManager,
        FeatureKey::IssueReports,
        FeatureKey::RoadNetwork,
        FeatureKey::Analytics,
        FeatureKey::ExportPdf,
        FeatureKey::ExportCsv,
        FeatureKey::WorkOrders,
        FeatureKey::BudgetPlanner,
        FeatureKey::SatelliteScan,
        FeatureKey::DrivingSurvey,
        FeatureKey::NavDashboard,
        FeatureKey::NavAssets,
        FeatureKey::NavIssues,
        FeatureKey::NavMap,
        FeatureKey::NavAnalytics,
        FeatureKey::NavWorkOrders,
        FeatureKey::NavSatellite,
        FeatureKey::NavDriving,
        FeatureKey::NavBilling,
        FeatureKey::NavSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::AssetManager => "assetManager",
            FeatureKey::IssueReports => "issueReports",
            FeatureKey::RoadNetwork => "roadNetwork",
            FeatureKey::Analytics => "analytics",
            FeatureKey::ExportPdf => "exportPDF",
            FeatureKey::ExportCsv => "exportCSV",
            FeatureKey::WorkOrders => "workOrders",
            FeatureKey::BudgetPlanner => "budgetPlanner",
            FeatureKey::SatelliteScan => "satelliteScan",
            FeatureKey::DrivingSurvey => "drivingSurvey",
            FeatureKey::NavDashboard => "navDashboard",
            FeatureKey::NavAssets => "navAssets",
            FeatureKey::NavIssues => "navIssues",
            FeatureKey::NavMap => "navMap",
            FeatureKey::NavAnalytics => "navAnalytics",
            FeatureKey::NavWorkOrders => "navWorkOrders",
            FeatureKey::NavSatellite => "navSatellite",
            FeatureKey::NavDriving => "navDriving",
            FeatureKey::NavBilling => "navBilling",
            FeatureKey::NavSettings => "navSettings",
        }
    }

    pub fn group(&self) -> FeatureGroup {
        match self {
            FeatureKey::NavDashboard
            | FeatureKey::NavAssets
            | FeatureKey::NavIssues
            | FeatureKey::NavMap
            | FeatureKey::NavAnalytics
            | FeatureKey::NavWorkOrders
            | FeatureKey::NavSatellite
            | FeatureKey::NavDriving
            | FeatureKey::NavBilling
            | FeatureKey::NavSettings => FeatureGroup::NavMenu,
            _ => FeatureGroup::Dashboard,
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(value: &str) -> Option<FeatureKey> {
        FeatureKey::ALL
            .iter()
            .find(|key| key.as_str() == value)
            .copied()
    }

    pub fn in_group(group: FeatureGroup) -> impl Iterator<Item = FeatureKey> {
        FeatureKey::ALL
            .into_iter()
            .filter(move |key| key.group() == group)
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
