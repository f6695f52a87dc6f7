mod add;
mod delete;
mod get;
mod plan;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use plan::*;
pub use update::*;
