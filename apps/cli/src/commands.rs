//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use sheetsite_feedback::{Attachment, FeedbackClient, FeedbackForm};
use sheetsite_loader::{SheetLoader, map_kind};
use sheetsite_shared::{
    AppConfig, SectionKind, config_file_path, init_config, init_config_at, load_config,
    load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// sheetsite: campaign site content from published spreadsheets.
#[derive(Parser)]
#[command(
    name = "sheetsite",
    version,
    about = "Load campaign site content from published Google Sheets and submit citizen feedback.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.sheetsite/sheetsite.toml).
    #[arg(long, global = true, env = "SHEETSITE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Load every section (or one) from its sheet and print the content as JSON.
    Fetch {
        /// Only load this section (hero, biography, profile, laws, ...).
        #[arg(short, long)]
        section: Option<String>,

        /// Write JSON here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Map a local CSV export onto a section without touching the network.
    Map {
        /// Section the CSV belongs to.
        #[arg(short, long)]
        section: String,

        /// CSV file to map.
        file: PathBuf,
    },

    /// List sections and their configured sheet URLs.
    Sections,

    /// Submit a message to the citizen feedback mailbox.
    Feedback {
        #[arg(long)]
        name: String,

        /// Canton or province.
        #[arg(long)]
        region: String,

        #[arg(long)]
        email: String,

        /// WhatsApp number.
        #[arg(long)]
        phone: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        message: String,

        /// JPG, PNG or PDF file, up to 1MB.
        #[arg(long)]
        attachment: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sheetsite=info",
        1 => "sheetsite=debug",
        _ => "sheetsite=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so JSON on stdout stays pipeable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Fetch { section, out } => {
            let config = resolve_config(config_path)?;
            cmd_fetch(&config, section.as_deref(), out.as_deref()).await
        }
        Command::Map { section, file } => cmd_map(&section, &file),
        Command::Sections => cmd_sections(&resolve_config(config_path)?),
        Command::Feedback {
            name,
            region,
            email,
            phone,
            subject,
            message,
            attachment,
        } => {
            let config = resolve_config(config_path)?;
            let attachment = attachment
                .as_deref()
                .map(Attachment::from_path)
                .transpose()?;
            let form = FeedbackForm {
                name,
                region,
                email,
                phone,
                subject,
                message,
                attachment,
            };
            cmd_feedback(&config, &form).await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

/// Load the `--config` file when given (it must exist), else the default
/// location, which falls back to defaults when absent.
fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(config: &AppConfig, section: Option<&str>, out: Option<&Path>) -> Result<()> {
    let kind = section.map(|s| s.parse::<SectionKind>()).transpose()?;
    let loader = SheetLoader::new(config)?;

    let spinner = Spinner::new()?;
    let value = match kind {
        Some(kind) => {
            spinner.message(format!("Loading {kind}..."));
            loader.load_kind(kind).await?
        }
        None => {
            spinner.message("Loading all sections...".to_string());
            let site = loader.load_site().await;
            info!(live = site.live_count(), "fetch complete");
            serde_json::to_value(&site)?
        }
    };
    spinner.finish();

    write_json(&value, out)
}

fn cmd_map(section: &str, file: &Path) -> Result<()> {
    let kind: SectionKind = section.parse()?;
    let body = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;

    info!(section = %kind, file = %file.display(), "mapping local export");
    let value = map_kind(kind, &body)?;
    write_json(&value, None)
}

fn cmd_sections(config: &AppConfig) -> Result<()> {
    for kind in SectionKind::ALL {
        let url = config.sources.raw(kind).trim();
        let url = if url.is_empty() { "(no sheet published)" } else { url };
        println!("  {:<13} {url}", kind.as_str());
    }
    Ok(())
}

async fn cmd_feedback(config: &AppConfig, form: &FeedbackForm) -> Result<()> {
    let client = FeedbackClient::new(config)?;

    let spinner = Spinner::new()?;
    spinner.message("Sending feedback...".to_string());
    let result = client.submit(form).await;
    spinner.finish();

    let receipt = result.wrap_err("feedback was not delivered; nothing was lost, try again")?;
    match receipt.message {
        Some(message) => println!("Feedback sent: {message}"),
        None => println!("Feedback sent. Thank you!"),
    }
    Ok(())
}

fn cmd_config_init(explicit: Option<&Path>) -> Result<()> {
    let target = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };
    if target.exists() {
        return Err(eyre!("config already exists at {}", target.display()));
    }

    let path = match explicit {
        Some(path) => init_config_at(path)?,
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(explicit: Option<&Path>) -> Result<()> {
    let config = resolve_config(explicit)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn write_json(value: &serde_json::Value, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            std::fs::write(path, json)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Stderr spinner shown while requests are in flight.
struct Spinner(ProgressBar);

impl Spinner {
    fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")?
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Ok(Self(bar))
    }

    fn message(&self, msg: String) {
        self.0.set_message(msg);
    }

    fn finish(&self) {
        self.0.finish_and_clear();
    }
}
