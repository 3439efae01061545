//! # repfind-client -- Typed client for the reputation.ru registry API
//!
//! Looks up companies by INN (Russian taxpayer identification number)
//! against the reputation.ru business registry and normalizes the
//! heterogeneous JSON payloads into fixed [`Entity`] records.
//!
//! ## Architecture
//!
//! - [`RegistryClient`] owns a reusable HTTP session configured with a
//!   bearer credential. One search request per identifier; batch lookups
//!   fan out concurrently under a configurable cap and return results
//!   aligned with the input order.
//! - [`Entity::from_raw`] is the pure normalizer from a raw registry
//!   object to the fixed record shape. It never fails on merely missing
//!   fields; only genuinely malformed data (an unparseable registration
//!   date) is an error.
//!
//! Per-item failure containment is the batch contract: a transport error
//! or a non-2xx status on one identifier leaves a hole in that slot and
//! never aborts the rest of the batch.

pub mod config;
pub mod entity;
pub mod error;
pub mod search;

pub use config::RegistryConfig;
pub use entity::{Entity, RawEntity};
pub use error::RegistryError;
pub use search::RegistryClient;
