use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use quest_session::config::ConfigError;
use quest_session::{FileStore, ProviderKind, SessionConfig, SessionError, SessionManager, UserRecord};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("login through {0} did not complete; see log output")]
    LoginFailed(ProviderKind),
    #[error("signed out locally but the stored session remains: {0}")]
    Logout(#[source] SessionError),
    #[error("failed to render session: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "quest-session", about = "Inspect and drive the local quest session")]
struct Cli {
    /// Storage file holding the session.
    #[arg(long, env = "QUEST_SESSION_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the restored session.
    Status,
    /// Sign in through a provider (discord, twitter, google, wallet).
    Login { provider: ProviderKind },
    /// Sign out and clear the stored session.
    Logout,
    /// Sign in through Google and print a display-only admin preview.
    #[cfg(feature = "dev-admin")]
    Admin,
}

fn default_store_path() -> PathBuf {
    let base = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    base.join(".quest-session").join("storage.json")
}

fn print_user(user: &UserRecord) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(user)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = SessionConfig::from_env()?;
    let path = cli.store.unwrap_or_else(default_store_path);
    tracing::debug!(path = %path.display(), "using session store");

    let manager = SessionManager::start(Arc::new(FileStore::new(path)), config);
    manager.ready().await;

    match cli.command {
        Command::Status => match manager.current_user() {
            Some(user) => print_user(&user),
            None => {
                println!("signed out");
                Ok(())
            }
        },
        Command::Login { provider } => {
            let before = manager.current_user().map(|u| u.id);
            manager.login(provider).await;
            match manager.current_user() {
                Some(user) if Some(&user.id) != before.as_ref() => print_user(&user),
                _ => Err(CliError::LoginFailed(provider)),
            }
        }
        Command::Logout => {
            manager.logout().map_err(CliError::Logout)?;
            println!("signed out");
            Ok(())
        }
        #[cfg(feature = "dev-admin")]
        Command::Admin => match quest_session::session::admin::admin_preview_login(&manager).await {
            Some(preview) => print_user(&preview),
            None => Err(CliError::LoginFailed(ProviderKind::Google)),
        },
    }
}
