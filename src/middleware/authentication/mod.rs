//! Resolves the caller of every request. A valid bearer token puts an
//! `Arc<Principal>` into the request extensions; requests without a token
//! continue anonymously.

mod getheader;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;
