//! Typed client for the gas-station recommendation backend.
//!
//! The backend speaks JSON over HTTP and wraps every response in a
//! `{"success": bool, ...}` envelope. This crate turns those envelopes into
//! [`gasrec_core`] types and typed errors; it performs no retries.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::BackendClient;
pub use error::ClientError;
pub use types::{BackendConfig, FuelEstimate, SearchResults};
