//! prooflog: parse zk proving benchmark logs into comparison tables.
//!
//! The binary is a thin clap front end over [`commands`]; the parsing and
//! comparison logic lives in the workspace crates.
//!
//! # Architecture
//!
//! ```text
//! prooflog-sources ──► prooflog-core ──► prooflog-report
//!  (file, dir, stdin)   (parse, join,     (csv, json lines,
//!                        means, ratios)    summaries)
//! ```

pub mod commands;
