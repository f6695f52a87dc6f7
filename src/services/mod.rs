pub mod bootstrap;
pub mod constraints;
pub mod gating;
pub mod revenue;
pub mod sample_data;

pub use gating::{Access, FeatureAccessError, Gated, Source};
pub use revenue::RevenueAnalytics;
pub use sample_data::{AssetSamples, IssueSamples, RoadSamples, SampleDataProvider};
