//! prooflog-core: benchmark log parsing and comparison.
//!
//! This crate exposes the parsing and comparison layers as public modules,
//! plus the shared types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! lines ──► Parser (format table + extractors) ──► RecordSet
//!                                                     │
//!            ComparisonTable ◄── Comparison (join) ◄──┘
//!                  │
//!                  └──► Summary (means, ratios)
//! ```
//!
//! Everything here is synchronous and free of I/O apart from
//! [`config::Config::load`].

pub mod compare;
pub mod config;
pub mod extract;
pub mod format;
pub mod parser;
pub mod payload;
pub mod stats;
pub mod types;

pub use format::LogFormat;
pub use parser::{parse_str, InvalidNumberPolicy, ParseError, Parser};
pub use types::{Field, NumberKind, RecordSet, TransactionRecord, Value};
