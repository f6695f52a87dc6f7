mod add;
mod get;
mod update;

pub use add::*;
pub use get::*;
pub use update::*;
