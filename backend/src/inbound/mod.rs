//! Inbound adapters translating protocol requests into gateway calls.

pub mod http;
