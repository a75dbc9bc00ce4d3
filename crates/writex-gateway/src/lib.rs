//! # WriteX Gateway
//!
//! The collaborators the publish and verify pipelines talk to but do not own.
//!
//! ## Overview
//!
//! - [`StorageGateway`] stores a document and hands back an opaque
//!   [`Locator`](writex_core::Locator); later it fetches the document again.
//! - [`Ledger`] records the `(locator, author, commitment)` triple produced
//!   by a publish. It is optional.
//!
//! ## Implementations
//!
//! - [`PinataGateway`] - IPFS pinning through the Pinata HTTP API
//! - [`LocalGateway`] - content-addressed JSON files in a local directory
//! - [`MemoryGateway`] - content-addressed in-memory store for tests
//! - [`TracingLedger`] - emits each record as a structured log event
//! - [`MemoryLedger`] - keeps records in memory for tests
//!
//! Retry, backoff and timeouts belong to the implementation (for Pinata, the
//! HTTP client configuration). Callers see one attempt per call.

pub mod error;
pub mod ledger;
pub mod local;
pub mod memory;
pub mod pinata;
pub mod traits;

pub use error::{GatewayError, LedgerError, Result};
pub use ledger::TracingLedger;
pub use local::LocalGateway;
pub use memory::{cid_v0, MemoryGateway, MemoryLedger};
pub use pinata::{PinataConfig, PinataGateway};
pub use traits::{Ledger, LedgerAck, LedgerEntry, StorageGateway};
