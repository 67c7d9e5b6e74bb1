/// Tuneshelf Server - catalog and playlist HTTP service
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tuneshelf_server::{
    config::ServerConfig,
    create_router,
    services::{AuthService, InMemoryCache, InProcessQueue},
    state::AppState,
};
use tuneshelf_storage::{users, Database};

#[derive(Parser)]
#[command(name = "tuneshelf-server")]
#[command(about = "Tuneshelf catalog and playlist server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        fullname: String,
    },
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tuneshelf_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            password,
            fullname,
        } => add_user(&config, &username, &password, &fullname).await?,
        Commands::Migrate => migrate(&config).await?,
    }

    Ok(())
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<Database> {
    let db = Database::connect(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    db.migrate().await?;
    tracing::info!("Database ready at {}", config.storage.database_url);
    Ok(db)
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Tuneshelf Server");

    let db = open_database(&config).await?;

    let cache = InMemoryCache::from_settings(&config.cache)?;
    tracing::info!(
        "Like-count cache: capacity {}, ttl {:?}",
        config.cache.capacity,
        config.cache.entry_ttl()
    );

    let queue = InProcessQueue::from_settings(&config.queue)?;
    tracing::info!(
        "Export jobs publish on {} (capacity {})",
        config.queue.export_topic,
        queue.capacity()
    );

    let app_state = AppState::new(
        db,
        Arc::new(auth_service(&config)),
        Arc::new(cache),
        Arc::new(queue),
        config.queue.export_topic.clone(),
    );

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: &ServerConfig,
    username: &str,
    password: &str,
    fullname: &str,
) -> anyhow::Result<()> {
    let db = open_database(config).await?;

    let password_hash = auth_service(config).hash_password(password)?;
    let user_id = users::create(db.pool(), username, &password_hash, fullname).await?;

    println!("Created user {} ({})", username, user_id);

    Ok(())
}

async fn migrate(config: &ServerConfig) -> anyhow::Result<()> {
    open_database(config).await?;
    println!("Migrations applied");
    Ok(())
}
