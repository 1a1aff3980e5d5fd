//! HTTP inbound adapter exposing the session-gated REST surface.

pub mod auth;
pub mod health;
pub mod resources;
pub mod session;

pub use session::{SessionContext, SessionPolicy};
