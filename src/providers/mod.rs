//! Typed domain model, namespaced by provider and then by service.
//!
//! Everything here is plain data produced by the adapters. Each object
//! carries its own [`Metadata`](crate::types::Metadata) and collections keep
//! source order.

pub mod aws;
pub mod azure;
pub mod digitalocean;
pub mod google;
pub mod kubernetes;
