use super::{FeatureMatrix, Resolver};
use crate::db;
use crate::helpers::TtlCache;
use crate::models::{FeatureKey, FeatureState, Plan};
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::RwLock;

/// Resolver plus the short-lived caches in front of it. Built once at
/// startup and shared through `web::Data`.
///
/// Organization plans read from the database are only cached when no plan
/// change happened since the read started (`epoch` is unchanged), so a slow
/// lookup cannot put a superseded plan back after a change.
pub struct FeatureMatrixService {
    resolver: Resolver,
    matrices: TtlCache<Plan, FeatureMatrix>,
    organization_plans: TtlCache<i32, Plan>,
    epoch: RwLock<u64>,
}

impl FeatureMatrixService {
    pub fn new(resolver: Resolver, ttl: Duration) -> Self {
        Self {
            resolver,
            matrices: TtlCache::new(ttl),
            organization_plans: TtlCache::new(ttl),
            epoch: RwLock::new(0),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolve(&self, plan: Plan, feature: FeatureKey) -> FeatureState {
        self.resolver.resolve(plan, feature)
    }

    pub async fn matrix(&self, plan: Plan) -> FeatureMatrix {
        if let Some(matrix) = self.matrices.get(&plan).await {
            return matrix;
        }

        let matrix = self.resolver.matrix(plan);
        self.matrices.insert(plan, matrix.clone()).await;
        matrix
    }

    /// Snapshot to take before reading an organization from the database.
    pub async fn epoch(&self) -> u64 {
        *self.epoch.read().await
    }

    /// Effective plan of an organization, `None` when it does not exist.
    #[tracing::instrument(name = "Lookup organization plan.", skip(self, pool))]
    pub async fn organization_plan(
        &self,
        pool: &PgPool,
        organization_id: i32,
    ) -> Result<Option<Plan>, String> {
        if let Some(plan) = self.organization_plans.get(&organization_id).await {
            return Ok(Some(plan));
        }

        let epoch = self.epoch().await;
        let organization = db::organization::fetch(pool, organization_id).await?;
        match organization {
            Some(organization) => {
                let plan = organization.effective_plan();
                self.remember_organization_plan(organization_id, plan, epoch)
                    .await;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// Caches a plan read at `epoch`. Returns false, caching nothing, when a
    /// plan change happened in the meantime.
    pub async fn remember_organization_plan(
        &self,
        organization_id: i32,
        plan: Plan,
        epoch: u64,
    ) -> bool {
        let current = self.epoch.read().await;
        if *current != epoch {
            tracing::debug!(organization_id, "plan changed during lookup, not caching");
            return false;
        }
        self.organization_plans.insert(organization_id, plan).await;
        true
    }

    /// Records the plan that a committed change produced.
    pub async fn set_organization_plan(&self, organization_id: i32, plan: Plan) {
        let mut epoch = self.epoch.write().await;
        *epoch += 1;
        self.organization_plans.insert(organization_id, plan).await;
    }

    /// Must be called whenever an organization disappears or its plan or
    /// status changes without a known new value.
    pub async fn invalidate_organization(&self, organization_id: i32) {
        let mut epoch = self.epoch.write().await;
        *epoch += 1;
        if self.organization_plans.invalidate(&organization_id).await {
            tracing::debug!(organization_id, "dropped cached organization plan");
        }
    }

    pub async fn state_for_organization(
        &self,
        pool: &PgPool,
        organization_id: i32,
        feature: FeatureKey,
    ) -> Result<Option<(Plan, FeatureState)>, String> {
        Ok(self
            .organization_plan(pool, organization_id)
            .await?
            .map(|plan| (plan, self.resolve(plan, feature))))
    }
}
