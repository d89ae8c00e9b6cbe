use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;
use wealth_dashboard::{
    app::{Dashboard, report},
    config::{Settings, StoreBackend},
    logging,
    models::{Credentials, PortfolioSummary},
    services::{
        AuthProvider, IdentityContext, LocalAuth, PriceLookup, RecordStore, SqliteStore,
        SupabaseAuth, SupabaseStore, YahooPriceService,
    },
};

#[derive(Parser)]
#[command(version, about = "Net worth with live market prices")]
struct Cli {
    /// Print the summary as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Supabase account email
    #[arg(long, env = "WEALTH_EMAIL", global = true)]
    email: Option<String>,

    /// Supabase account password
    #[arg(long, env = "WEALTH_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// User name for the local sqlite store
    #[arg(long, env = "WEALTH_USER", global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh once and print the portfolio
    Show,
    /// Keep refreshing until Ctrl-C
    Watch {
        #[arg(long, default_value_t = 60)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    logging::init("info")?;

    let cli = Cli::parse();

    let (auth, store, credentials) = build_backend(&settings, &cli).await?;
    let prices: Arc<dyn PriceLookup> = Arc::new(YahooPriceService::from_settings(&settings)?);

    let identity = IdentityContext::new();
    let dashboard = Dashboard::new(identity.clone(), store, prices);

    identity.sign_in(auth.as_ref(), &credentials).await?;

    let outcome = match cli.command {
        Command::Show => match dashboard.refresh().await {
            Ok(Some(summary)) => print_summary(&summary, cli.json),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        },
        Command::Watch { interval } => {
            let mut summaries = dashboard.summaries();
            let printer = async {
                while summaries.changed().await.is_ok() {
                    let latest = summaries.borrow_and_update().clone();
                    if let Some(summary) = latest {
                        print_summary(&summary, cli.json)?;
                    }
                }
                Ok::<_, anyhow::Error>(())
            };
            let shutdown = async {
                let _ = tokio::signal::ctrl_c().await;
            };

            tokio::select! {
                _ = dashboard.run(Some(Duration::from_secs(interval.max(1))), shutdown) => Ok(()),
                printed = printer => printed,
            }
        }
    };

    identity.sign_out(auth.as_ref()).await;

    outcome
}

async fn build_backend(
    settings: &Settings,
    cli: &Cli,
) -> Result<(Arc<dyn AuthProvider>, Arc<dyn RecordStore>, Credentials)> {
    match settings.store_backend() {
        StoreBackend::Supabase => {
            let (url, anon_key) = settings.supabase()?;
            let client = Client::builder()
                .timeout(*settings.quote_timeout())
                .build()
                .with_context(|| "Failed to build HTTP client")?;
            let email = cli
                .email
                .clone()
                .with_context(|| "Missing --email (or WEALTH_EMAIL)")?;

            let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(
                client.clone(),
                url.to_string(),
                anon_key.to_string(),
            ));
            let store: Arc<dyn RecordStore> = Arc::new(SupabaseStore::new(
                client,
                url.to_string(),
                anon_key.to_string(),
            ));

            Ok((auth, store, Credentials::new(email, cli.password.clone())))
        }
        StoreBackend::Sqlite => {
            let user = cli
                .user
                .clone()
                .with_context(|| "Missing --user (or WEALTH_USER)")?;
            let store = SqliteStore::open(settings.database_path()).await?;

            let auth: Arc<dyn AuthProvider> = Arc::new(LocalAuth);
            let store: Arc<dyn RecordStore> = Arc::new(store);

            Ok((auth, store, Credentials::new(user, None)))
        }
    }
}

fn print_summary(summary: &PortfolioSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", report::render_json(summary)?);
    } else {
        println!("{}", report::render_text(summary)?);
    }
    Ok(())
}
