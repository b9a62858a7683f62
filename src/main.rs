use std::fs;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use apna_server::auth::{TokenSigner, hash_password};
use apna_server::config::ServerConfig;
use apna_server::mail::ResendMailer;
use apna_server::server::{AppState, create_router};
use apna_server::store::{SqliteStore, Store};
use apna_server::types::Admin;

const DEFAULT_ADMIN_EMAIL: &str = "admin@gmail.com";
const DEFAULT_ADMIN_PASSWORD: &str = "123456789";

#[derive(Parser)]
#[command(name = "apna-server")]
#[command(about = "Lead-capture and SSR backend for the Apna Project site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, short, env = "PORT", default_value = "5000")]
        port: u16,

        /// Data directory for the database
        #[arg(long, env = "APNA_DATA_DIR", default_value = "./data")]
        data_dir: String,

        /// Built frontend directory (SSR shell + assets)
        #[arg(long, env = "FRONTEND_DIST", default_value = "../apna_project/dist")]
        frontend_dist: String,

        /// Directory served under /uploads
        #[arg(long, env = "UPLOADS_DIR", default_value = "./uploads")]
        uploads_dir: String,

        /// Shared secret for signing admin cookie tokens
        #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
        token_secret: String,

        /// Resend API key for confirmation emails
        #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
        resend_api_key: String,
    },
}

/// Idempotent check-then-create for the bootstrap admin. Not safe against
/// concurrent process starts racing on a fresh store; a single instance per
/// store is the deployment assumption.
fn seed_default_admin(store: &dyn Store) -> anyhow::Result<()> {
    if store.get_admin_by_email(DEFAULT_ADMIN_EMAIL)?.is_some() {
        info!("Default admin already exists");
        return Ok(());
    }

    let admin = Admin {
        id: Uuid::new_v4().to_string(),
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
        created_at: Utc::now(),
    };
    store.create_admin(&admin)?;

    info!("Default admin created ({DEFAULT_ADMIN_EMAIL})");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("apna_server=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
            frontend_dist,
            uploads_dir,
            token_secret,
            resend_api_key,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                frontend_dist: frontend_dist.into(),
                uploads_dir: uploads_dir.into(),
                token_secret,
                resend_api_key,
            };

            fs::create_dir_all(&config.data_dir)?;
            fs::create_dir_all(&config.uploads_dir)?;

            let store: Arc<dyn Store> = Arc::new(SqliteStore::new(config.db_path())?);
            store.initialize()?;
            seed_default_admin(store.as_ref())?;

            let state = Arc::new(AppState {
                store: store.clone(),
                mailer: Arc::new(ResendMailer::new(config.resend_api_key.clone())?),
                signer: TokenSigner::new(config.token_secret.as_bytes()),
                frontend_dist: config.frontend_dist.clone(),
                uploads_dir: config.uploads_dir.clone(),
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;

            store.close()?;
        }
    }

    Ok(())
}
