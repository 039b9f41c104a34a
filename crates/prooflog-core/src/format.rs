//! Log format table: one delimiter and extractor list per benchmark grammar.
//!
//! The four grammars share most of their extractors; what differs is how a
//! new transaction block is recognised and which optional lines are present.

use crate::extract::Extractor;
use crate::types::Field;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// How the parser recognises the start of a new transaction block.
#[derive(Debug, Clone)]
pub enum Delimiter {
    /// A header line; capture group 1 is the transaction index. With
    /// `whole_line`, the line is trimmed before matching.
    Header { pattern: Regex, whole_line: bool },
    /// Headerless logs: every match of this field's extractor opens a new
    /// block with an implicit index counting up from 0.
    Counter(Field),
}

/// The complete grammar of one log format.
#[derive(Debug, Clone)]
pub struct FormatSpec {
    pub delimiter: Delimiter,
    pub extractors: Vec<Extractor>,
}

/// Identifier of a supported log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    /// Single-transaction bench_1 logs with `Transaction N` headers.
    Bench1,
    /// bench_1 runs under different FRI configurations; adds proof size and
    /// padded CPU trace length.
    Bench1Fri,
    /// bench_1 runs under different hash functions (Poseidon, Keccak).
    Bench1Hashes,
    /// bench_2 recursive-proving logs without transaction headers.
    Bench2,
}

impl LogFormat {
    pub const ALL: [LogFormat; 4] = [
        LogFormat::Bench1,
        LogFormat::Bench1Fri,
        LogFormat::Bench1Hashes,
        LogFormat::Bench2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Bench1 => "bench1",
            LogFormat::Bench1Fri => "bench1-fri",
            LogFormat::Bench1Hashes => "bench1-hashes",
            LogFormat::Bench2 => "bench2",
        }
    }

    pub fn spec(self) -> &'static FormatSpec {
        match self {
            LogFormat::Bench1 => &BENCH_1,
            LogFormat::Bench1Fri => &BENCH_1_DETAILED,
            LogFormat::Bench1Hashes => &BENCH_1_DETAILED,
            LogFormat::Bench2 => &BENCH_2,
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format {0:?}; expected one of bench1, bench1-fri, bench1-hashes, bench2")]
pub struct UnknownFormat(pub String);

impl std::str::FromStr for LogFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Built-in grammars
// ---------------------------------------------------------------------------

const CPU_HALTED: &str = r"CPU halted after (\d+) cycles";
const TO_PROVE: &str = r"(\d+\.\d+)s to prove";
const TO_VERIFY: &str = r"(\d+\.\d+)s to verify";

fn header(pattern: &str, whole_line: bool) -> Delimiter {
    Delimiter::Header {
        pattern: Regex::new(pattern).expect("built-in header pattern must be a valid regex"),
        whole_line,
    }
}

static BENCH_1: LazyLock<FormatSpec> = LazyLock::new(|| FormatSpec {
    delimiter: header(r"Transaction (\d+)", false),
    extractors: vec![
        Extractor::scalar(Field::CpuCycles, CPU_HALTED),
        Extractor::scalar(Field::ProvingTime, TO_PROVE),
        Extractor::scalar(Field::VerifyingTime, TO_VERIFY),
        Extractor::checkpoint(r"TraceCheckpoint \{(.*)\}"),
    ],
});

static BENCH_1_DETAILED: LazyLock<FormatSpec> = LazyLock::new(|| FormatSpec {
    delimiter: header(r"^\*{8} Transaction (\d+) \*{8}", true),
    extractors: vec![
        Extractor::scalar(Field::CpuCycles, CPU_HALTED),
        Extractor::scalar(Field::CpuTraceLen, r"CPU trace padded to (\d+) cycles"),
        Extractor::checkpoint(r"Trace lengths \(before padding\): TraceCheckpoint \{(.*)\}"),
        Extractor::scalar(Field::ProvingTime, TO_PROVE),
        Extractor::scalar(Field::ProofSize, r"Proof size: (\d+) KB"),
        Extractor::scalar(Field::VerifyingTime, TO_VERIFY),
    ],
});

static BENCH_2: LazyLock<FormatSpec> = LazyLock::new(|| FormatSpec {
    delimiter: Delimiter::Counter(Field::CpuCycles),
    extractors: vec![
        Extractor::scalar(Field::CpuCycles, CPU_HALTED),
        Extractor::scalar_any(
            Field::ProvingTime,
            &[
                r"proved in (\d+\.\d+)s",
                r"Proving time: (\d+\.\d+)s",
                r"Time to prove: (\d+\.\d+)s",
            ],
        ),
    ],
});
