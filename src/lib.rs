//! # gazetteer
//!
//! An in-memory record store for cities with:
//! - Case-insensitive (name, region) keys with uniqueness enforced at insert
//! - Merge-sort ordering over any scalar attribute
//! - Population/region filters and aggregate statistics
//! - Durable persistence to a flat quoted-CSV text file
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Interactive Shell                         │
//! │              (tokenizer + command dispatch)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Store                                 │
//! │        (insert / find / update / sort / filter / stats)      │
//! └─────────┬───────────────────────────────────────┬───────────┘
//!           │                                       │
//!           ▼                                       ▼
//!    ┌─────────────┐                         ┌─────────────┐
//!    │   Record    │                         │   Persist   │
//!    │ (validated) │◄──────── Codec ────────►│ (flat file) │
//!    └─────────────┘                         └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod codec;
pub mod persist;
pub mod geo;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GazetteerError, Result};
pub use config::{Config, Strictness};
pub use record::{Attribute, Record, RecordKey};
pub use store::{InsertOutcome, SortKey, Statistics, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gazetteer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
