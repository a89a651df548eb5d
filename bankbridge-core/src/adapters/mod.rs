//! Adapters - concrete implementations for external systems
//!
//! - bankfrick: upstream bank web API (authentication + data retrieval)
//! - iplicit: downstream accounting API (transaction posting)
//! - signer: RSA request signing for the authorization flow

pub mod bankfrick;
pub mod iplicit;
pub mod signer;
