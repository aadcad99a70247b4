//! Paper Mortality CLI - Entry Point
//!
//! Estimates paper death years from citation data on disk.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_mortality::cohort::CohortFilter;
use paper_mortality::config::defaults;
use paper_mortality::error::AnalysisResult;
use paper_mortality::formatters;
use paper_mortality::models::{DeathRecord, PaperRecord, ResponseFormat};
use paper_mortality::population::summarize_by_taxon;
use paper_mortality::sources::{CitationGraph, MergedSource, YearTable};
use paper_mortality::{AnalysisError, Config, DeathDefinition, MortalityAnalyzer, Window};

#[derive(Parser, Debug)]
#[command(name = "paper-mortality")]
#[command(about = "Estimate when academic papers stop being cited")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for values otherwise read from the environment.
#[derive(Args, Debug)]
struct AnalysisArgs {
    /// Window width in years
    #[arg(long, global = true)]
    years: Option<u32>,

    /// Citations a window needs for the paper to stay alive
    #[arg(long = "citations-threshold", global = true)]
    citations_threshold: Option<u32>,

    /// How death years are derived
    #[arg(long, value_enum, global = true)]
    definition: Option<DeathDefinition>,

    /// Clamp death years to this year (last year with complete citation data)
    #[arg(long, global = true)]
    observation_end: Option<i32>,

    /// Papers looked up concurrently
    #[arg(long, global = true)]
    concurrency: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the death year of a single paper
    Estimate {
        /// Publication year
        #[arg(long)]
        birth_year: i32,

        /// Years the paper was cited in, one entry per citation (comma separated)
        #[arg(long, value_delimiter = ',')]
        cited_in: Vec<i32>,
    },

    /// Estimate death years for a list of papers
    Analyze {
        /// JSON array of papers: [{"id": ..., "birthYear": ..., "taxon": ...}]
        #[arg(long)]
        papers: PathBuf,

        /// JSON object mapping keys to citation years
        #[arg(long)]
        citations: Option<PathBuf>,

        /// Prefix on keys in the citations table
        #[arg(long, default_value = defaults::OPENALEX_KEY_PREFIX)]
        key_prefix: String,

        /// JSON array of citation links: [{"citingYear": ..., "citedKey": ...}]
        #[arg(long)]
        links: Option<PathBuf>,

        /// Only keep papers that died no later than this year
        #[arg(long)]
        max_death_year: Option<i32>,

        /// Only keep papers born no earlier than this year
        #[arg(long)]
        min_birth_year: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: ResponseFormat,

        /// Write output here instead of stdout (extension added if missing)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Alive, birth, death and citation counts per year and taxon
    Population {
        /// Records written by `analyze --format json`, or a JSON array of records
        #[arg(long)]
        records: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: ResponseFormat,

        /// Write output here instead of stdout (extension added if missing)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

/// Apply command-line overrides on top of the environment configuration.
fn apply_overrides(mut config: Config, args: &AnalysisArgs) -> anyhow::Result<Config> {
    if args.years.is_some() || args.citations_threshold.is_some() {
        config.window = Window::new(
            args.years.unwrap_or(config.window.year_threshold()),
            args.citations_threshold.unwrap_or(config.window.citation_threshold()),
        )?;
    }
    if let Some(definition) = args.definition {
        config = config.with_definition(definition);
    }
    if args.observation_end.is_some() {
        config = config.with_observation_end(args.observation_end);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }

    Ok(config)
}

/// Estimate one paper from explicit citation years, applying the same rules as
/// a batch run (validation, uncited fallback, observation horizon).
async fn estimate(
    config: Config,
    birth_year: i32,
    cited_in: Vec<i32>,
) -> AnalysisResult<DeathRecord> {
    let paper = PaperRecord::new("command-line", birth_year);
    let mut table = YearTable::new("command line");
    table.insert(paper.lookup_key(), cited_in);

    MortalityAnalyzer::new(Arc::new(table), config).analyze_paper(&paper).await
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes =
        tokio::fs::read(path).await.with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn output_path(path: &Path, format: ResponseFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

async fn write_output(
    output: Option<&Path>,
    format: ResponseFormat,
    text: &str,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let path = output_path(path, format);
            tokio::fs::write(&path, text)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Accepts either a bare array of records or an object with a `records` field.
/// Records with impossible years are dropped with a warning.
fn extract_records(value: serde_json::Value) -> anyhow::Result<Vec<DeathRecord>> {
    let records = match value {
        serde_json::Value::Object(mut obj) => {
            obj.remove("records").context("expected a 'records' field")?
        }
        other => other,
    };
    let records: Vec<DeathRecord> = serde_json::from_value(records)?;

    Ok(records
        .into_iter()
        .filter(|record| match record.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(paper = %record.id, error = %e, "Skipping record");
                false
            }
        })
        .collect())
}

/// Error text for the terminal: analysis errors get their short form, anything
/// else its full context chain.
fn user_message(err: &anyhow::Error) -> String {
    err.downcast_ref::<AnalysisError>()
        .map_or_else(|| format!("{err:#}"), AnalysisError::to_user_message)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = apply_overrides(Config::from_env()?, &cli.analysis)?;
    tracing::debug!(?config, "Resolved configuration");

    match cli.command {
        Command::Estimate { birth_year, cited_in } => {
            let record = estimate(config, birth_year, cited_in).await?;
            tracing::info!(
                birth_year,
                citations = record.citation_count,
                death_year = record.death_year,
                clamped = record.clamped,
                "Estimated"
            );
            println!("{}", record.death_year);
        }
        Command::Analyze {
            papers,
            citations,
            key_prefix,
            links,
            max_death_year,
            min_birth_year,
            format,
            output,
        } => {
            let mut source = MergedSource::new();
            if let Some(path) = citations {
                let table = YearTable::from_json_file("citations", &path)
                    .await
                    .map_err(AnalysisError::from)?;
                source.push(Arc::new(table.with_prefix(key_prefix)));
            }
            if let Some(path) = links {
                let graph = CitationGraph::from_json_file("links", &path)
                    .await
                    .map_err(AnalysisError::from)?;
                source.push(Arc::new(graph));
            }
            if source.is_empty() {
                anyhow::bail!("at least one of --citations or --links is required");
            }

            let papers: Vec<PaperRecord> = read_json(&papers).await?;
            let analyzer = MortalityAnalyzer::new(Arc::new(source), config);

            let mut report = analyzer.analyze_batch(&papers).await;
            let cohort = CohortFilter::new(max_death_year, min_birth_year);
            report.records = cohort.apply(report.records);

            let text = format.render(
                || formatters::format_report_markdown(&report),
                || formatters::batch_report(&report),
            )?;
            write_output(output.as_deref(), format, &text).await?;
        }
        Command::Population { records, format, output } => {
            let records = extract_records(read_json(&records).await?)?;
            let summaries = summarize_by_taxon(&records);
            tracing::info!(records = records.len(), taxa = summaries.len(), "Built populations");

            let text = format.render(
                || formatters::format_population_markdown(&summaries),
                || formatters::population_report(&summaries),
            )?;
            write_output(output.as_deref(), format, &text).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}
