use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use biorep_cli::config::{ReportConfig, default_config_path, load_config, save_config};
use biorep_cli::pipeline::{self, GenerateRequest};
use biorep_core::models::language::Language;
use biorep_core::models::report::ReportKind;
use biorep_core::models::search::{PatientQuery, SearchMode};

#[derive(Debug, Parser)]
#[command(name = "biorep", version, about = "Biomarker report generator")]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a report or annex for one patient
    Generate(GenerateArgs),
    /// Print the patient record a search resolves to
    Lookup(SearchArgs),
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// patient-id, sample-id or name
    #[arg(long, default_value = "patient-id")]
    search_by: SearchMode,

    #[arg(long)]
    value: String,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    search: SearchArgs,

    /// Directory with the classification workbook and numbered figures
    #[arg(long)]
    workdir: PathBuf,

    #[arg(long, default_value = "DE")]
    lang: Language,

    #[arg(long, default_value = "report")]
    kind: ReportKind,

    /// Skip the PDF conversion
    #[arg(long, default_value_t = false)]
    no_pdf: bool,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json);

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Commands::Config(ConfigCommand::Show) => {
            let config = load_config(&config_path)?;
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Config(ConfigCommand::Init { force }) => {
            if config_path.exists() && !force {
                eyre::bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            save_config(&ReportConfig::default(), &config_path)?;
            println!("wrote {}", config_path.display());
        }
        Commands::Lookup(search) => {
            let config = load_config(&config_path)?;
            let query = PatientQuery::new(search.search_by, &search.value)?;
            let patient = pipeline::lookup(&config, &query)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        Commands::Generate(args) => {
            let config = load_config(&config_path)?;
            let request = GenerateRequest {
                query: PatientQuery::new(args.search.search_by, &args.search.value)?,
                working_dir: args.workdir,
                language: args.lang,
                kind: args.kind,
            };
            let today = jiff::Zoned::now().date();
            let generated = pipeline::generate(&config, &request, today)?;
            println!("{} saved as {}", request.kind, generated.document.display());

            if !args.no_pdf {
                match pipeline::convert_document(&config, &generated.document).await {
                    Ok(pdf) => println!("PDF saved as {}", pdf.display()),
                    Err(e) => {
                        tracing::warn!(error = %e, "PDF conversion failed");
                        eprintln!("PDF conversion failed: {e}");
                    }
                }
            }
        }
    }

    Ok(())
}
