// Repository catalog CLI
//
// Harvests repositories from the configured GitHub organizations, enriches
// them and maintains the JSON corpus, its CSV export and the summary report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use kodegen_tools_catalog::catalog::{
    CatalogConfig, Corpus, DemoScorer, Enricher, FeaturedPolicy, Harvester, SummaryReport,
    export_csv, normalize_featured_values,
};
use kodegen_tools_catalog::GitHubClient;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Scored checklist with a structured verdict
    Checklist,
    /// Quality and engagement tiers with a boolean flag
    Tiered,
}

impl From<PolicyArg> for FeaturedPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Checklist => FeaturedPolicy::Checklist,
            PolicyArg::Tiered => FeaturedPolicy::Tiered,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "kodegen-catalog")]
#[command(about = "Repository catalog enrichment and featured eligibility", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured featured policy
    #[arg(long, value_enum, global = true)]
    featured_policy: Option<PolicyArg>,

    /// Convert structured featured verdicts to booleans before writing
    #[arg(long, global = true)]
    normalize_featured: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Harvest, enrich and persist repositories from every organization
    Fetch {
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long, env = "GH_SECRET", hide_env_values = true)]
        token: Option<String>,

        /// Corpus output file
        #[arg(short, long, default_value = "data/repositories.json")]
        output: PathBuf,

        /// CSV output file
        #[arg(long, default_value = "data/repositories.csv")]
        csv: PathBuf,

        /// Summary report output file
        #[arg(long, default_value = "data/summary_report.json")]
        report: PathBuf,
    },

    /// Re-enrich an existing corpus
    Enrich {
        /// Corpus file
        input: PathBuf,

        /// Output file (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a corpus and write the summary report
    Validate {
        /// Corpus file
        input: PathBuf,

        /// Summary report output file
        #[arg(long, default_value = "data/summary_report.json")]
        report: PathBuf,
    },

    /// Export a corpus as CSV
    ExportCsv {
        /// Corpus file
        input: PathBuf,

        /// CSV output file
        output: PathBuf,
    },

    /// Print seeded demonstration scores for a corpus
    DemoScore {
        /// Corpus file
        input: PathBuf,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if let Some(policy) = cli.featured_policy {
        config.engine.featured_policy = policy.into();
    }
    let policy = config.engine.featured_policy;
    info!(
        "Featured policy: {} (writes {} featured fields)",
        policy.as_str(),
        policy.shape().as_str()
    );

    match cli.command {
        Commands::Fetch {
            token,
            output,
            csv,
            report,
        } => {
            let token = token.or_else(|| std::env::var("GITHUB_TOKEN").ok());
            let client = match token {
                Some(token) => GitHubClient::with_token(token),
                None => {
                    warn!("No GitHub token provided, using unauthenticated requests");
                    GitHubClient::builder().build()
                }
            }
            .context("Failed to create GitHub client")?;

            let enricher = Enricher::new(config.engine);
            let now = enricher.reference_time();
            let harvester = Harvester::new(client, config.harvest, enricher);
            let outcome = harvester.run().await;

            if !outcome.failed_organizations.is_empty() {
                warn!(
                    "Organizations skipped after errors: {}",
                    outcome.failed_organizations.join(", ")
                );
            }

            // An empty harvest leaves the existing corpus untouched
            let mut corpus = outcome.into_corpus()?;
            normalize_if_requested(&mut corpus, cli.normalize_featured);
            write_outputs(&corpus, &output, Some(csv.as_path()))?;

            let summary = SummaryReport::build(&corpus, Some(policy), now)
                .context("Failed to build summary report")?;
            summary
                .save(&report)
                .with_context(|| format!("Failed to write {}", report.display()))?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Enrich { input, output } => {
            let mut corpus = load(&input)?;
            let enricher = Enricher::new(config.engine);
            enricher.enrich_corpus(&mut corpus);
            normalize_if_requested(&mut corpus, cli.normalize_featured);
            write_outputs(&corpus, output.as_deref().unwrap_or(&input), None)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Validate { input, report } => {
            let mut entries = Corpus::read_values(&input)
                .with_context(|| format!("Failed to read corpus {}", input.display()))?;
            if cli.normalize_featured {
                let converted = normalize_featured_values(&mut entries);
                info!("Normalized {converted} featured verdicts to booleans");
            }

            let summary = SummaryReport::from_values(&entries, None, chrono::Utc::now())
                .context("Failed to validate corpus")?;
            if let Some(shape) = summary.featured_shape {
                info!("Featured field shape: {}", shape.as_str());
            }
            for warning in &summary.validation.warnings {
                warn!("{warning}");
            }
            for finding in &summary.validation.errors {
                error!("{finding}");
            }

            let stats = &summary.statistics;
            info!(
                "{} repositories, {} featured ({}%), average quality {}",
                stats.total_repositories,
                stats.featured_repositories,
                stats.featured_percentage,
                stats.average_quality_score
            );
            summary
                .save(&report)
                .with_context(|| format!("Failed to write {}", report.display()))?;

            if summary.validation.valid {
                info!("Corpus is valid");
                Ok(ExitCode::SUCCESS)
            } else {
                error!(
                    "Corpus is invalid: {} errors",
                    summary.validation.errors.len()
                );
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::ExportCsv { input, output } => {
            let mut corpus = load(&input)?;
            normalize_if_requested(&mut corpus, cli.normalize_featured);
            export_csv(&corpus, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::DemoScore { input, seed } => {
            let corpus = load(&input)?;
            let mut scorer = DemoScorer::with_seed(seed);
            for record in corpus.records() {
                println!("{:>3}  {}", scorer.score(record), record.display_name());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(path: &Path) -> Result<Corpus> {
    Corpus::load(path).with_context(|| format!("Failed to read corpus {}", path.display()))
}

fn normalize_if_requested(corpus: &mut Corpus, requested: bool) {
    if requested {
        let converted = corpus.normalize_featured();
        info!("Normalized {converted} featured verdicts to booleans");
    }
}

fn write_outputs(corpus: &Corpus, json: &Path, csv: Option<&Path>) -> Result<()> {
    corpus
        .save(json)
        .with_context(|| format!("Failed to write {}", json.display()))?;
    if let Some(csv) = csv {
        export_csv(corpus, csv).with_context(|| format!("Failed to write {}", csv.display()))?;
    }
    Ok(())
}
