//! rostercheck CLI - Roster lookup
//!
//! Command-line interface for resolving a person's AM/PM assignments from
//! the color-coded roster spreadsheet.
//!
//! ## Exit Codes
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success |
//! | 1 | The roster lookup failed (unknown name, no date column, network, ...) |
//! | 2 | Bad usage or configuration |

mod config;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rostercheck_core::{column, Credential, CredentialSlot, Progress, Renderer, ScheduleQuery};
use rostercheck_render::{FetchControl, HtmlRenderer, JsonRenderer, StatusLine, TextRenderer};
use rostercheck_resolver::RosterResolver;
use rostercheck_sheets::SheetsClient;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "rostercheck")]
#[command(author, version, about = "Look up your roster assignment", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (defaults to ./rostercheck.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the AM/PM assignments for a person on a day
    Show(ShowArgs),

    /// List the roster legend
    Legend {
        #[command(flatten)]
        auth: AuthArgs,

        /// Disable colored swatches
        #[arg(long)]
        no_color: bool,
    },

    /// Convert between column numbers and letters (27 <-> AA)
    Column {
        /// Column number or label
        #[arg(value_name = "COLUMN")]
        value: String,
    },
}

#[derive(Args)]
struct AuthArgs {
    /// OAuth access token with the spreadsheets.readonly scope
    #[arg(long, env = "ROSTERCHECK_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Args)]
struct ShowArgs {
    /// Name as written on the roster (case-insensitive)
    #[arg(short, long, env = "ROSTERCHECK_NAME")]
    name: String,

    /// Day to look up, YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored swatches in text output
    #[arg(long)]
    no_color: bool,

    #[command(flatten)]
    auth: AuthArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Usage.into()
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Show(args) => {
            let config = Config::load(cli.config.as_deref())?;
            show(config, args, cli.quiet).await
        }
        Commands::Legend { auth, no_color } => {
            let config = Config::load(cli.config.as_deref())?;
            legend(config, auth, no_color).await
        }
        Commands::Column { value } => {
            println!("{}", convert_column(&value)?);
            Ok(ExitCode::Success)
        }
    }
}

fn build_resolver(config: Config, auth: AuthArgs) -> Result<RosterResolver<SheetsClient>> {
    let credentials = CredentialSlot::new();
    if let Some(token) = auth.token {
        let credential = Credential::bearer(token).context("--token must not be blank")?;
        credentials.set(credential);
    }
    let client = SheetsClient::new(config.sheets, credentials).context("invalid [sheets] config")?;
    Ok(RosterResolver::new(client, config.layout))
}

async fn show(config: Config, args: ShowArgs, quiet: bool) -> Result<ExitCode> {
    let resolver = build_resolver(config, args.auth)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let query = ScheduleQuery::new(args.name, date);

    let control = FetchControl::new();
    let mut status = StatusLine::new();
    let result = {
        let _busy = control.acquire().context("a fetch is already running")?;
        status.begin();
        resolver
            .resolve_with_progress(&query, |progress: Progress| {
                status.progress(progress);
                if !quiet {
                    eprintln!("{}", status.info);
                }
            })
            .await
    };

    let schedule = match result {
        Ok(schedule) => schedule,
        Err(e) => {
            status.fail(&e);
            eprintln!("error: {}", status.error);
            if args.format == OutputFormat::Html {
                print!("{}", HtmlRenderer::new().render_failure(&status)?);
            }
            return Ok(ExitCode::Failure);
        }
    };
    status.success(query.trimmed_person(), query.date);

    let output = match args.format {
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            TextRenderer::new().with_color(color).render(&query, &schedule)?
        }
        OutputFormat::Json => format!("{}\n", JsonRenderer::new().render(&query, &schedule)?),
        OutputFormat::Html => HtmlRenderer::new().render(&query, &schedule)?,
    };
    print!("{output}");
    Ok(ExitCode::Success)
}

async fn legend(config: Config, auth: AuthArgs, no_color: bool) -> Result<ExitCode> {
    let resolver = build_resolver(config, auth)?;
    match resolver.fetch_legend().await {
        Ok(entries) => {
            let color = !no_color && std::io::stdout().is_terminal();
            print!("{}", TextRenderer::new().with_color(color).render_legend(&entries));
            Ok(ExitCode::Success)
        }
        Err(e) => {
            let mut status = StatusLine::new();
            status.fail(&e);
            eprintln!("error: {}", status.error);
            Ok(ExitCode::Failure)
        }
    }
}

/// `27` -> `AA`, `aa` -> `27`
fn convert_column(value: &str) -> Result<String> {
    let value = value.trim();
    if let Ok(number) = value.parse::<i64>() {
        let label = column::to_label(number);
        if label.is_empty() {
            bail!("column numbers start at 1, got {number}");
        }
        return Ok(label);
    }
    match column::from_label(value) {
        Some(number) => Ok(number.to_string()),
        None => bail!("{value:?} is neither a column number nor a column label"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from([
            "rostercheck",
            "show",
            "--name",
            "Bob",
            "--date",
            "2023-06-15",
            "--format",
            "json",
            "--token",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.name, "Bob");
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2023, 6, 15));
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.auth.token.as_deref(), Some("abc"));
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn bad_date_rejected() {
        let result = Cli::try_parse_from(["rostercheck", "show", "-n", "Bob", "-d", "15/06/2023"]);
        assert!(result.is_err());
    }

    #[test]
    fn column_conversion() {
        assert_eq!(convert_column("27").unwrap(), "AA");
        assert_eq!(convert_column("53").unwrap(), "BA");
        assert_eq!(convert_column("az").unwrap(), "52");
        assert!(convert_column("0").is_err());
        assert!(convert_column("-4").is_err());
        assert!(convert_column("A1").is_err());
    }

    #[test]
    fn blank_token_rejected() {
        let auth = AuthArgs {
            token: Some("  ".into()),
        };
        assert!(build_resolver(Config::default(), auth).is_err());
    }
}
