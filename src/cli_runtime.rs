use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast::{self, error::TryRecvError};

use socialctl::config::{self, ConfigOverrides};
use socialctl::guard::SessionGuard;
use socialctl::model::ClientConfig;
use socialctl::remote::ApiClient;
use socialctl::session::{AuthStore, NoticeLevel, SessionContext, SessionEvent};
use socialctl::store::LocalStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "socialctl")]
#[command(about = "Admin client for the social video platform", long_about = None)]
pub(crate) struct Cli {
    /// State directory holding config.json and tokens.json (default ~/.socialctl)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Backend base URL, including the /api/v1 prefix
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Emit JSON
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();
    socialctl::logging::init(cli.verbose);

    let state_dir = match cli.state_dir {
        Some(dir) => dir,
        None => LocalStore::default_dir()?,
    };
    let store = LocalStore::open(&state_dir)?;
    let flags = ConfigOverrides {
        base_url: cli.api_url,
        timeout_ms: None,
    };
    let overrides = ConfigOverrides::from_env()?.or(flags);

    crate::cli_exec::handle_command(store, overrides, cli.json, cli.command).await
}

/// The wired-up client stack for one command.
pub(crate) struct App {
    pub(crate) store: LocalStore,
    pub(crate) client: ApiClient,
    pub(crate) auth: AuthStore,
    pub(crate) guard: SessionGuard,
    pub(crate) json: bool,
    events: broadcast::Receiver<SessionEvent>,
}

impl App {
    pub(crate) fn new(store: LocalStore, overrides: &ConfigOverrides, json: bool) -> Result<Self> {
        let cfg = config::load(&store, overrides)?;
        Self::with_config(store, cfg, json)
    }

    fn with_config(store: LocalStore, cfg: ClientConfig, json: bool) -> Result<Self> {
        let session = Arc::new(SessionContext::new());
        let events = session.subscribe();
        let client = ApiClient::new(cfg, session, Arc::new(store.clone()))
            .context("build api client")?;
        let auth = AuthStore::new(client.clone());
        let guard = SessionGuard::new(client.clone());
        auth.restore();
        Ok(Self {
            store,
            client,
            auth,
            guard,
            json,
            events,
        })
    }

    /// Fails unless a token was restored from the state directory.
    pub(crate) fn require_session(&self) -> Result<()> {
        if !self.client.session().is_authenticated() {
            anyhow::bail!("not logged in (run `socialctl login --username ...`)");
        }
        Ok(())
    }

    /// Prints queued notices to stderr.
    pub(crate) fn flush_notices(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(SessionEvent::Notice(notice)) => match notice.level {
                    NoticeLevel::Success => eprintln!("{}", notice.message),
                    NoticeLevel::Error => eprintln!("error: {}", notice.message),
                },
                Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    pub(crate) fn print_json<T: serde::Serialize>(&self, value: &T, what: &str) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string_pretty(value).with_context(|| format!("serialize {what} json"))?
        );
        Ok(())
    }
}
