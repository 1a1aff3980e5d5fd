//! Outbound adapters owning transport concerns.

pub mod upstream;
