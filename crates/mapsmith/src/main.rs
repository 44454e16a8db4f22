use clap::{Parser, Subcommand, ValueEnum};
use mapsmith::commands::{UniverseArgs, run_explain, run_resolve, run_roundtrip, run_schema};
use mapsmith::logging::init_logging;
use mapsmith_common::config::OutputFormat;
use starbase::{App, AppResult, AppSession};
use std::path::{Path, PathBuf};

/// Mapsmith CLI - resolve serialization mappings over a type universe
#[derive(Parser)]
#[command(name = "mapsmith")]
#[command(about = "Detect how each type of a universe maps to universal values", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file (defaults to the nearest mapsmith.toml or mapsmith.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Resolve every root of a type universe
    Resolve {
        /// Path to the universe descriptor (JSON or TOML)
        universe: PathBuf,
        /// Output format (overrides the configuration)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Also print the state log
        #[arg(long)]
        state_log: bool,
    },
    /// Show the scan information of one type
    Explain {
        /// Path to the universe descriptor (JSON or TOML)
        universe: PathBuf,
        /// Type to explain, e.g. com.example.Person or List<String>
        type_name: String,
        /// Output format (overrides the configuration)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// Read a JSON value as a type and write it back
    Roundtrip {
        /// Path to the universe descriptor (JSON or TOML)
        universe: PathBuf,
        /// Type the input represents
        type_name: String,
        /// JSON input file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Generate JSON Schema for universe descriptors
    Schema {
        /// Output file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Application session for the Mapsmith CLI
#[derive(Clone)]
struct MapsmithSession {
    command: Commands,
    config: Option<PathBuf>,
}

impl MapsmithSession {
    fn universe(&self, universe: &Path) -> UniverseArgs {
        UniverseArgs {
            universe: universe.to_path_buf(),
            config: self.config.clone(),
        }
    }
}

#[async_trait::async_trait]
impl AppSession for MapsmithSession {
    async fn execute(&mut self) -> AppResult {
        let result = match &self.command {
            Commands::Resolve {
                universe,
                format,
                state_log,
            } => run_resolve(self.universe(universe), format.map(Into::into), *state_log),
            Commands::Explain {
                universe,
                type_name,
                format,
            } => run_explain(self.universe(universe), type_name.clone(), format.map(Into::into)),
            Commands::Roundtrip {
                universe,
                type_name,
                input,
            } => run_roundtrip(self.universe(universe), type_name.clone(), input.clone()),
            Commands::Schema { output } => run_schema(output.clone()),
        };

        match result {
            Ok(0) => Ok(None),
            Ok(code) => Ok(Some(code)),
            Err(e) => Err(miette::miette!("{:#}", e)),
        }
    }
}

#[tokio::main]
async fn main() -> starbase::MainResult {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let session = MapsmithSession {
        command: cli.command,
        config: cli.config,
    };

    let exit_code = App::default()
        .run(session, |mut session| async move { session.execute().await })
        .await?;

    Ok(std::process::ExitCode::from(exit_code))
}
