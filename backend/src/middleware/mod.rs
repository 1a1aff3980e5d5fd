//! Request-time middleware.

pub mod guard;

pub use guard::RouteGuard;
