mod cache;
pub(crate) mod json;
pub mod jwt;

pub use cache::TtlCache;
pub use json::*;
