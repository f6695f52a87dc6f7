use crate::models::{FeatureGroup, FeatureKey, FeatureState, Plan};
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bumped whenever the built-in gating table changes meaning.
pub const MATRIX_VERSION: u32 = 1;

/// Every known feature of one plan, split by where the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMatrix {
    pub version: u32,
    pub plan: Plan,
    pub dashboard: BTreeMap<FeatureKey, FeatureState>,
    pub nav_menu: BTreeMap<FeatureKey, FeatureState>,
}

impl FeatureMatrix {
    pub fn new(version: u32, plan: Plan) -> Self {
        Self {
            version,
            plan,
            dashboard: BTreeMap::new(),
            nav_menu: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: FeatureKey, state: FeatureState) {
        match key.group() {
            FeatureGroup::Dashboard => self.dashboard.insert(key, state),
            FeatureGroup::NavMenu => self.nav_menu.insert(key, state),
        };
    }

    /// Absent keys read as `not_shown`.
    pub fn get(&self, key: FeatureKey) -> FeatureState {
        let group = match key.group() {
            FeatureGroup::Dashboard => &self.dashboard,
            FeatureGroup::NavMenu => &self.nav_menu,
        };
        group.get(&key).copied().unwrap_or(FeatureState::NotShown)
    }

    pub fn len(&self) -> usize {
        self.dashboard.len() + self.nav_menu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureKey, FeatureState)> + '_ {
        self.dashboard
            .iter()
            .chain(self.nav_menu.iter())
            .map(|(key, state)| (*key, *state))
    }

    /// Keys the UI should render at all, in registry order.
    pub fn visible(&self) -> Vec<FeatureKey> {
        self.iter()
            .filter(|(_, state)| state.is_visible())
            .map(|(key, _)| key)
            .collect()
    }
}
