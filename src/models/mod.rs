mod asset;
mod feature;
mod issue;
mod organization;
mod plan;
mod plan_change;
mod principal;
mod road;
mod setting;
mod transaction;
pub mod user;

pub use asset::*;
pub use feature::*;
pub use issue::*;
pub use organization::*;
pub use plan::*;
pub use plan_change::*;
pub use principal::*;
pub use road::*;
pub use setting::*;
pub use transaction::*;
pub use user::*;
