//! Authentication and authorization
//!
//! The identity provider is an external oracle; this module consumes its
//! tokens (`validate(token) → principal`) and gates every operation
//! through one capability matrix instead of inline role comparisons.

pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, Principal, create_token};
pub use middleware::auth_middleware;
pub use permissions::Operation;
