use anyhow::Context;
use clap::{Parser, Subcommand};
use prooflog::commands::{self, RecordOutput};
use prooflog_core::compare::JoinPolicy;
use prooflog_core::config::Config;
use prooflog_core::{Field, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prooflog", about = "prooflog: zk proving benchmark log analysis")]
struct Cli {
    /// Log at debug level on stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/prooflog/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the records parsed from one log (`-` for stdin).
    Parse {
        input: PathBuf,
        #[arg(long, short)]
        format: LogFormat,
        #[arg(long, short, value_enum, default_value = "json")]
        output: RecordOutput,
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Rank transactions of each log by one or more fields.
    Top {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, short)]
        format: LogFormat,
        /// Field to rank by; repeatable. Defaults to times, cycles and trace lengths.
        #[arg(long = "field")]
        fields: Vec<Field>,
        #[arg(short)]
        n: Option<usize>,
        /// File name suffix used when scanning directories.
        #[arg(long, default_value = ".log")]
        suffix: String,
    },
    /// Run a comparison job from the config.
    Compare {
        job: String,
        /// Override the job's join policy.
        #[arg(long)]
        join: Option<JoinPolicy>,
        /// Override the job's CSV output path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List configured comparison jobs.
    Jobs,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Config::defaults()
        })),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    let config = load_config(cli.config.as_ref())?;
    let policy = config.parser.on_invalid_number;
    let stdout = std::io::stdout().lock();

    match cli.command {
        Command::Parse {
            input,
            format,
            output,
            out: Some(path),
        } => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            commands::parse(&input, format, output, policy, std::io::BufWriter::new(file))
        }
        Command::Parse {
            input,
            format,
            output,
            out: None,
        } => commands::parse(&input, format, output, policy, stdout),
        Command::Top {
            paths,
            format,
            fields,
            n,
            suffix,
        } => commands::top(
            &paths,
            &suffix,
            format,
            &fields,
            n.unwrap_or(config.report.top_n),
            policy,
            stdout,
        ),
        Command::Compare { job, join, out } => {
            commands::compare(&config, &job, join, out, stdout).map(|_| ())
        }
        Command::Jobs => commands::jobs(&config, stdout),
    }
}
