//! `nullpass`: command-line front-end.
//!
//! Thin by design: argument parsing, secret input, output and exit codes.
//! Derivation lives in `nullpass-core`, profiles and settings in
//! `nullpass-vault`.

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use nullpass_vault::{GenerateRequest, PolicyOverrides, SettingsPatch, Vault};
use secrecy::SecretString;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroize;

/// Environment variable holding the master secret.
const MASTER_ENV: &str = "NULLPASS_MASTER";

#[derive(Parser, Debug)]
#[command(
    name = "nullpass",
    version,
    about = "Stateless deterministic password generator"
)]
struct Cli {
    /// Directory holding profiles.json and settings.json [default: ~/.nullpass].
    #[arg(long, env = "NULLPASS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the password for a site.
    ///
    /// The master secret is read from NULLPASS_MASTER, or else from the
    /// first line of stdin.
    #[command(args_override_self = true)]
    Generate {
        /// Site identifier, e.g. example.com.
        site: String,

        /// Login for the site. Defaults to the saved profile's login.
        #[arg(long)]
        login: Option<String>,

        #[command(flatten)]
        overrides: PolicyOverrides,
    },

    /// Manage per-site profiles.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Show or change settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Save a site's login and policy. Overrides edit the existing profile,
    /// or the default policy for a new one.
    #[command(args_override_self = true)]
    Save {
        /// Site identifier.
        site: String,

        /// Login for the site.
        #[arg(long)]
        login: Option<String>,

        #[command(flatten)]
        overrides: PolicyOverrides,
    },
    /// Print a site's profile as JSON.
    Show {
        /// Site identifier.
        site: String,
    },
    /// Delete a site's profile.
    Delete {
        /// Site identifier.
        site: String,
    },
    /// List saved profiles.
    List,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print settings as JSON.
    Show,
    /// Change settings. Policy flags edit the default policy.
    #[command(args_override_self = true)]
    Set {
        /// Whether front-ends detect password fields automatically.
        #[arg(long, value_name = "BOOL")]
        auto_detect: Option<bool>,

        #[command(flatten)]
        overrides: PolicyOverrides,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr through a non-blocking writer. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .init();
    guard
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    tracing::debug!(data_dir = %data_dir.display(), "Using data directory");
    let vault = Vault::new(&data_dir);

    match cli.cmd {
        Commands::Generate {
            site,
            login,
            overrides,
        } => cmd_generate(&vault, site, login, &overrides),
        Commands::Profile(cmd) => cmd_profile(&vault, cmd),
        Commands::Settings(cmd) => cmd_settings(&vault, cmd),
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".nullpass"),
        |home| PathBuf::from(home).join(".nullpass"),
    )
}

fn ensure_data_dir(path: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create data directory {}", path.display()))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_generate(
    vault: &Vault,
    site: String,
    login: Option<String>,
    overrides: &PolicyOverrides,
) -> anyhow::Result<()> {
    let policy = vault.resolve_policy(&site, None, overrides);
    let request = GenerateRequest {
        site,
        login: login.unwrap_or_default(),
        master_secret: read_master_secret()?,
        policy: Some(policy),
        overrides: None,
    };
    let password = vault.generate(&request)?;
    println!("{password}");
    Ok(())
}

/// `NULLPASS_MASTER`, or else the first line of stdin without its newline.
fn read_master_secret() -> anyhow::Result<SecretString> {
    if let Ok(secret) = std::env::var(MASTER_ENV) {
        return Ok(SecretString::from(secret));
    }
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read master secret from stdin")?;
    let secret = SecretString::from(line.trim_end_matches(['\r', '\n']).to_owned());
    line.zeroize();
    Ok(secret)
}

fn cmd_profile(vault: &Vault, cmd: ProfileCommand) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Save {
            site,
            login,
            overrides,
        } => {
            let login = login
                .or_else(|| vault.profile(&site).map(|p| p.login))
                .unwrap_or_default();
            let policy = vault.resolve_policy(&site, None, &overrides);
            ensure_data_dir(vault.data_dir())?;
            let profile = vault.save_profile(&site, &login, Some(policy))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileCommand::Show { site } => {
            let profile = vault
                .profile(&site)
                .with_context(|| format!("no profile saved for {site}"))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileCommand::Delete { site } => {
            vault.delete_profile(&site)?;
            eprintln!("Deleted profile for {site}");
        }
        ProfileCommand::List => {
            for profile in vault.profiles() {
                println!("{}\t{}", profile.site, profile.login);
            }
        }
    }
    Ok(())
}

fn cmd_settings(vault: &Vault, cmd: SettingsCommand) -> anyhow::Result<()> {
    match cmd {
        SettingsCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&vault.settings())?);
        }
        SettingsCommand::Set {
            auto_detect,
            overrides,
        } => {
            let default_policy = (!overrides.is_empty())
                .then(|| overrides.apply(vault.settings().default_policy));
            ensure_data_dir(vault.data_dir())?;
            let settings = vault.update_settings(SettingsPatch {
                auto_detect,
                default_policy,
            })?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
