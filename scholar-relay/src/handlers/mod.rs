//! HTTP handlers for scholar-relay.

pub mod advisor;
pub mod chat;
pub mod health;
pub mod metrics;
pub mod scholarships;
