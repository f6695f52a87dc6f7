//! Plan-based feature gating.
//!
//! [`Resolver`] is a pure lookup over a rule table (built-in defaults plus
//! configured overrides). [`FeatureMatrixService`] puts a TTL cache in front
//! of it and knows how to find an organization's plan.

mod matrix;
mod resolver;
mod rules;
mod service;

pub use matrix::{FeatureMatrix, MATRIX_VERSION};
pub use resolver::Resolver;
pub use rules::{FeatureOverride, Rule, Tier, DEFAULT_RULES};
pub use service::FeatureMatrixService;
