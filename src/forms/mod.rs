pub mod asset;
pub mod issue;
pub mod organization;
mod pagination;
pub mod road;
pub mod setting;
pub mod transaction;
pub mod user;

pub use asset::*;
pub use issue::*;
pub use organization::*;
pub use pagination::*;
pub use road::*;
pub use setting::*;
pub use transaction::*;
pub use user::*;
