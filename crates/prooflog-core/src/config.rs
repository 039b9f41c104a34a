//! Configuration types for prooflog.
//!
//! [`Config::load`] reads `~/.config/prooflog/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file layered over the same defaults, and [`Config::defaults`]
//! returns the defaults without touching the filesystem (useful in tests).
//!
//! Comparison jobs live in `[[jobs]]` tables:
//!
//! ```toml
//! [[jobs]]
//! name    = "hashes"
//! join    = "left"
//! output  = "bench_1_output_hashes.csv"
//! shared  = ["cpu_cycles", "cpu_trace_len"]
//! metrics = ["proving_time", "verifying_time", "proof_size"]
//! inputs  = [
//!     { label = "keccak",   path = "bench_1/medium_fast_prover_keccak.log",   format = "bench1-hashes" },
//!     { label = "poseidon", path = "bench_1/medium_fast_prover_poseidon.log", format = "bench1-hashes" },
//! ]
//! deltas  = [{ metric = "proving_time", from = "poseidon", to = "keccak" }]
//! ratios  = [{ delta = "proving_time_diff", reference_label = "poseidon", reference_field = "proving_time" }]
//! ```

use crate::compare::{Comparison, Delta, JoinPolicy};
use crate::format::LogFormat;
use crate::parser::InvalidNumberPolicy;
use crate::stats::Ratio;
use crate::types::{Field, RecordSet};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[parser]
on_invalid_number = "fail"

[report]
top_n           = 5
float_precision = 4
output_dir      = "."
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// `[parser]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub on_invalid_number: InvalidNumberPolicy,
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_float_precision")]
    pub float_precision: usize,
    /// Relative job outputs are resolved against this directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_top_n() -> usize { 5 }
fn default_float_precision() -> usize { 4 }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            float_precision: default_float_precision(),
            output_dir: default_output_dir(),
        }
    }
}

/// One `[[jobs]]` entry: a comparison of two or more logs.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub name: String,
    #[serde(default)]
    pub join: JoinPolicy,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub shared: Vec<Field>,
    #[serde(default)]
    pub metrics: Vec<Field>,
    #[serde(default)]
    pub require: Vec<Field>,
    pub inputs: Vec<InputConfig>,
    #[serde(default)]
    pub deltas: Vec<Delta>,
    #[serde(default)]
    pub ratios: Vec<Ratio>,
}

/// A labelled log file inside a job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    pub label: String,
    pub path: PathBuf,
    pub format: LogFormat,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no job named {name:?} (configured: {available})")]
    UnknownJob { name: String, available: String },
    #[error("job {0:?} has no inputs")]
    EmptyJob(String),
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/prooflog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::layered(&path, false)
    }

    /// Load an explicit config file (which must exist) over the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, true)
    }

    fn layered(path: &Path, required: bool) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(required))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Parse a TOML document over the defaults without touching the
    /// filesystem.
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn job(&self, name: &str) -> Result<&JobConfig, ConfigError> {
        let job = self
            .jobs
            .iter()
            .find(|j| j.name == name)
            .ok_or_else(|| ConfigError::UnknownJob {
                name: name.to_string(),
                available: self
                    .jobs
                    .iter()
                    .map(|j| j.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
        if job.inputs.is_empty() {
            return Err(ConfigError::EmptyJob(job.name.clone()));
        }
        Ok(job)
    }
}

impl JobConfig {
    /// Build the comparison for this job from already-parsed inputs, given
    /// in the same order as [`JobConfig::inputs`].
    pub fn comparison(&self, sets: Vec<RecordSet>) -> Comparison {
        self.inputs
            .iter()
            .zip(sets)
            .fold(Comparison::new(self.join), |c, (input, set)| {
                c.input(input.label.clone(), set)
            })
            .shared(self.shared.iter().copied())
            .metrics(self.metrics.iter().copied())
            .requires(self.require.iter().copied())
            .deltas(self.deltas.iter().cloned())
    }

    /// Where the CSV goes, resolved against `output_dir`.
    pub fn output_path(&self, report: &ReportConfig) -> PathBuf {
        let file = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.csv", self.name)));
        report.output_dir.join(file)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("prooflog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
