//! Command implementations behind the `prooflog` subcommands.
//!
//! Each command writes its human-readable output to the `out` writer it is
//! given, so integration tests can capture it.

use anyhow::Context;
use prooflog_core::compare::JoinPolicy;
use prooflog_core::config::Config;
use prooflog_core::stats::{self, Summary};
use prooflog_core::{Field, InvalidNumberPolicy, LogFormat, Parser, RecordSet};
use prooflog_sources::{scan_dir, FileSource, LogSource, StdinSource};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Criteria ranked by `top` when none are given.
pub const DEFAULT_TOP_FIELDS: [Field; 10] = [
    Field::ProvingTime,
    Field::VerifyingTime,
    Field::CpuCycles,
    Field::ArithmeticLen,
    Field::BytePackingLen,
    Field::CpuLen,
    Field::KeccakLen,
    Field::KeccakSpongeLen,
    Field::LogicLen,
    Field::MemoryLen,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RecordOutput {
    Json,
    Csv,
}

/// Read and parse one source.
pub fn load(
    source: &dyn LogSource,
    format: LogFormat,
    policy: InvalidNumberPolicy,
) -> anyhow::Result<RecordSet> {
    let lines = source.read_lines()?;
    let set = Parser::for_format(format)
        .with_policy(policy)
        .parse_lines(&lines)
        .with_context(|| format!("failed to parse {} as {format}", source.label()))?;
    tracing::info!(source = source.label(), %format, records = set.len(), "parsed log");
    Ok(set)
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

/// Dump the records of one log (`-` reads stdin).
pub fn parse<W: Write>(
    input: &Path,
    format: LogFormat,
    output: RecordOutput,
    policy: InvalidNumberPolicy,
    out: W,
) -> anyhow::Result<()> {
    let set = if input == Path::new("-") {
        load(&StdinSource, format, policy)?
    } else {
        load(&FileSource::new(input), format, policy)?
    };

    match output {
        RecordOutput::Json => prooflog_report::write_json_lines(&set, out)?,
        RecordOutput::Csv => prooflog_report::write_records(&set, out)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// top
// ---------------------------------------------------------------------------

/// Rank transactions of every log under `paths`. Directories are scanned for
/// files ending in `suffix`.
pub fn top<W: Write>(
    paths: &[PathBuf],
    suffix: &str,
    format: LogFormat,
    fields: &[Field],
    n: usize,
    policy: InvalidNumberPolicy,
    mut out: W,
) -> anyhow::Result<()> {
    let fields = if fields.is_empty() {
        &DEFAULT_TOP_FIELDS[..]
    } else {
        fields
    };

    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            sources.extend(scan_dir(path, suffix)?);
        } else {
            sources.push(FileSource::new(path));
        }
    }

    for source in &sources {
        let set = load(source, format, policy)?;
        writeln!(out, "\nAnalyzing file: {}", source.path().display())?;
        for field in fields {
            let ranked = stats::top_n(&set, *field, n);
            write!(out, "{}", prooflog_report::render_top(*field, &ranked))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

/// Run a configured comparison job: write its CSV and print its summary.
/// Returns the path of the CSV.
pub fn compare<W: Write>(
    config: &Config,
    job_name: &str,
    join: Option<JoinPolicy>,
    output: Option<PathBuf>,
    mut out: W,
) -> anyhow::Result<PathBuf> {
    let job = config.job(job_name)?;
    let policy = config.parser.on_invalid_number;

    let sets = job
        .inputs
        .iter()
        .map(|input| {
            let source = FileSource::new(&input.path).with_label(input.label.clone());
            load(&source, input.format, policy)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut comparison = job.comparison(sets);
    if let Some(join) = join {
        comparison = comparison.join(join);
    }
    let table = comparison
        .run()
        .with_context(|| format!("job {job_name:?} is misconfigured"))?;
    let summary = Summary::of(&table, &job.ratios)
        .with_context(|| format!("job {job_name:?} has an invalid ratio"))?;

    let path = output.unwrap_or_else(|| job.output_path(&config.report));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    prooflog_report::write_comparison(&table, file)?;

    write!(
        out,
        "{}",
        prooflog_report::render_summary(&summary, config.report.float_precision)
    )?;
    writeln!(out, "Wrote {}", path.display())?;
    Ok(path)
}

/// List the configured comparison jobs.
pub fn jobs<W: Write>(config: &Config, mut out: W) -> anyhow::Result<()> {
    for job in &config.jobs {
        let labels: Vec<&str> = job.inputs.iter().map(|i| i.label.as_str()).collect();
        writeln!(out, "{} ({} join): {}", job.name, job.join, labels.join(", "))?;
    }
    Ok(())
}
