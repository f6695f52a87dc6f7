//! Turns a resolved feature state into what a gated endpoint may return.

use super::sample_data::SampleDataProvider;
use crate::feature_matrix::FeatureMatrixService;
use crate::helpers::JsonResponse;
use crate::models::{FeatureKey, FeatureState, Plan};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_derive::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureAccessError {
    #[error("Upgrade required: {feature} is not included in the {plan} plan")]
    UpgradeRequired { feature: FeatureKey, plan: Plan },
    #[error("Not found")]
    Hidden(FeatureKey),
}

impl ResponseError for FeatureAccessError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UpgradeRequired { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::Hidden(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::UpgradeRequired { feature, plan } => json!({
                "message": self.to_string(),
                "meta": {
                    "feature": feature,
                    "plan": plan,
                    "upgrade_required": true,
                },
            }),
            Self::Hidden(_) => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Where a gated response gets its rows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Live,
    Sample { locked: bool },
}

/// Resolved access of one organization to one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Access {
    pub organization_id: i32,
    pub plan: Plan,
    pub feature: FeatureKey,
    pub state: FeatureState,
}

impl Access {
    pub fn source(&self) -> Result<Source, FeatureAccessError> {
        match self.state {
            FeatureState::Shown => Ok(Source::Live),
            FeatureState::SampleData => Ok(Source::Sample { locked: false }),
            FeatureState::Paywall => Ok(Source::Sample { locked: true }),
            FeatureState::NotShown => Err(FeatureAccessError::Hidden(self.feature)),
        }
    }

    /// Writes only go through on `shown`.
    pub fn ensure_writable(&self) -> Result<(), FeatureAccessError> {
        match self.state {
            FeatureState::Shown => Ok(()),
            FeatureState::SampleData | FeatureState::Paywall => {
                Err(FeatureAccessError::UpgradeRequired {
                    feature: self.feature,
                    plan: self.plan,
                })
            }
            FeatureState::NotShown => Err(FeatureAccessError::Hidden(self.feature)),
        }
    }
}

/// Looks up the organization's plan and resolves `feature` for it.
pub async fn access(
    service: &FeatureMatrixService,
    pool: &PgPool,
    organization_id: i32,
    feature: FeatureKey,
) -> Result<Access, actix_web::Error> {
    service
        .state_for_organization(pool, organization_id, feature)
        .await
        .map_err(|err| JsonResponse::<()>::build().internal_server_error(err))?
        .map(|(plan, state)| Access {
            organization_id,
            plan,
            feature,
            state,
        })
        .ok_or_else(|| JsonResponse::<()>::build().not_found("Organization not found"))
}

pub struct Gated<T> {
    pub access: Access,
    pub source: Source,
    pub items: Vec<T>,
}

impl<T> Gated<T> {
    pub fn locked(&self) -> bool {
        matches!(self.source, Source::Sample { locked: true })
    }

    pub fn meta(&self) -> serde_json::Value {
        json!({
            "feature": self.access.feature,
            "plan": self.access.plan,
            "state": self.access.state,
            "sample": self.source != Source::Live,
            "locked": self.locked(),
            "interactive": self.access.state.is_interactive(),
        })
    }
}

/// Live rows on `shown`, provider rows on `sample_data`, locked provider rows
/// on `paywall`. `live` is only awaited for `shown`.
pub async fn gate<T, P, F, Fut>(
    access: Access,
    provider: &P,
    live: F,
) -> Result<Gated<T>, actix_web::Error>
where
    P: SampleDataProvider<Item = T> + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, actix_web::Error>>,
{
    let source = access.source()?;
    let items = match source {
        Source::Live => live().await?,
        Source::Sample { .. } => {
            tracing::debug!(
                organization_id = access.organization_id,
                feature = %access.feature,
                state = %access.state,
                "serving sample data"
            );
            provider.sample(access.organization_id)
        }
    };

    Ok(Gated {
        access,
        source,
        items,
    })
}
