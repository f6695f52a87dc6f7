//! External Service Connectors
//!
//! Adapters for services outside of this process. Routes receive a trait
//! object through `web::Data` and never touch the HTTP client directly, so
//! tests can swap in their own implementation.
//!
//! 1. Trait and HTTP client live in `{service}.rs`
//! 2. Configuration in `config.rs` enables/disables each connector
//! 3. `init` picks the implementation at startup

pub mod config;
pub mod errors;
pub mod overpass;

pub use config::{ConnectorConfig, OverpassConfig};
pub use errors::ConnectorError;
pub use overpass::init as init_overpass;
pub use overpass::{DisabledRoadData, OverpassClient, RoadDataConnector};
