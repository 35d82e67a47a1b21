mod config;

/// Version injected at compile time via CMA_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CMA_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cma::{AccessToken, Client, ClientConfig, Locale, Query, Resource, Space};
use config::Config;
use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for the content management API
#[derive(Parser, Debug)]
#[command(name = "cma", version, about, long_about = None)]
struct Args {
    /// Management access token (falls back to config, then CONTENTFUL_ACCESS_TOKEN)
    #[arg(long)]
    access_token: Option<String>,

    /// API host, e.g. 127.0.0.1:5000
    #[arg(long)]
    host: Option<String>,

    /// Use plain HTTP (local test servers)
    #[arg(long)]
    insecure: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List spaces
    Spaces {
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Show one space
    Space { id: String },
    /// List organizations
    Orgs,
    /// Create a space
    CreateSpace {
        name: String,
        /// Organization id (falls back to config, then CONTENTFUL_ORGANIZATION)
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        default_locale: Option<String>,
    },
    /// Rename a space
    RenameSpace { id: String, name: String },
    /// Delete a space
    DeleteSpace { id: String },
    /// List locales of a space
    Locales {
        /// Space id (defaults to the last space shown)
        #[arg(long)]
        space: Option<String>,
    },
    /// Add a locale to a space
    CreateLocale {
        name: String,
        code: String,
        #[arg(long)]
        space: Option<String>,
    },
    /// List content types of a space
    ContentTypes {
        #[arg(long)]
        space: Option<String>,
    },
    /// List entries of a space
    Entries {
        #[arg(long)]
        space: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cma {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cma").join("cma.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cma").join("cma.log");
    }
    PathBuf::from("cma.log")
}

fn build_client(args: &Args, config: &Config) -> Result<Client> {
    let token = config
        .effective_token(args.access_token.as_deref())
        .context("No access token configured. Set CONTENTFUL_ACCESS_TOKEN or use --access-token")?;

    let mut client_config = ClientConfig::new(AccessToken::new(token)?)
        .with_insecure(args.insecure || config.insecure)
        .with_user_agent(format!("cma-cli/{}", VERSION));

    if let Some(host) = args.host.as_ref().or(config.host.as_ref()) {
        client_config = client_config.with_host(host.as_str());
    }

    Ok(Client::new(client_config)?)
}

fn print<T: Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered);
    Ok(())
}

async fn open_space(
    client: &Client,
    config: &Config,
    space: Option<&str>,
) -> Result<Resource<Space>> {
    let id = config
        .effective_space(space)
        .context("No space given. Pass --space or run `cma space <id>` first")?;
    Ok(client.get_space(&id).await?)
}

async fn run(args: &Args, client: &Client, config: &mut Config) -> Result<()> {
    let out = args.output;

    match &args.command {
        Command::Spaces { limit } => {
            let query = match limit {
                Some(limit) => Query::new().limit(*limit),
                None => Query::new(),
            };
            let spaces = client.get_spaces(&query).await?;
            tracing::info!("Loaded {} of {} spaces", spaces.len(), spaces.total);
            print(out, &spaces.items)?;
        }
        Command::Space { id } => {
            let space = client.get_space(id).await?;
            if let Err(e) = config.set_space(space.id()) {
                tracing::warn!("Failed to save config: {}", e);
            }
            print(out, &space)?;
        }
        Command::Orgs => {
            let orgs = client.get_organizations().await?;
            print(out, &orgs.items)?;
        }
        Command::CreateSpace {
            name,
            org,
            default_locale,
        } => {
            let mut space = Space::new(name);
            if let Some(code) = default_locale {
                space = space.with_default_locale(code);
            }
            let org = config.effective_organization(org.as_deref());
            let created = client.create_space(space, org.as_deref()).await?;
            print(out, &created)?;
        }
        Command::RenameSpace { id, name } => {
            let mut space = client.get_space(id).await?;
            space.name = name.clone();
            let updated = space.update().await?;
            print(out, &updated)?;
        }
        Command::DeleteSpace { id } => {
            let mut space = client.get_space(id).await?;
            space.delete().await?;
            println!("Deleted space {}", id);
        }
        Command::Locales { space } => {
            let space = open_space(client, config, space.as_deref()).await?;
            let locales = space.get_locales().await?;
            print(out, &locales.items)?;
        }
        Command::CreateLocale { name, code, space } => {
            let space = open_space(client, config, space.as_deref()).await?;
            let locale = space.create_locale(Locale::new(name, code)).await?;
            print(out, &locale)?;
        }
        Command::ContentTypes { space } => {
            let space = open_space(client, config, space.as_deref()).await?;
            let content_types = space.get_content_types(&Query::new()).await?;
            print(out, &content_types.items)?;
        }
        Command::Entries {
            space,
            content_type,
        } => {
            let space = open_space(client, config, space.as_deref()).await?;
            let mut query = Query::new();
            if let Some(ct) = content_type {
                query = query.param("content_type", ct);
            }
            let entries = client
                .collect_all::<cma::Entry>(&format!("{}/entries", space.path()), query)
                .await?;
            print(out, &entries)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let mut config = Config::load();
    let client = build_client(&args, &config)?;

    if let Err(err) = run(&args, &client, &mut config).await {
        tracing::error!("Command failed: {:#}", err);
        match err.downcast_ref::<cma::Error>() {
            Some(api_err) => {
                eprintln!("Error: {}", cma::format_error(api_err));
                if let Some(request_id) = api_err.details().and_then(|d| d.request_id.as_deref()) {
                    eprintln!("Request id: {}", request_id);
                }
            }
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }

    Ok(())
}
