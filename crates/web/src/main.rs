use anyhow::Context;
use clap::{Parser, Subcommand};
use storage::{
    Database,
    repository::client::{ClientRepository, NewUser},
};
use tokio::net::TcpListener;
use web::{
    auth::{SessionService, password::hash_password},
    config::Config,
    routes,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "web")]
#[command(about = "Sports competition manager", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Create an administrator account
    CreateSuperuser {
        #[arg(long, env = "SUPERUSER_USERNAME")]
        username: String,

        #[arg(long, env = "SUPERUSER_EMAIL", default_value = "")]
        email: String,

        #[arg(long, env = "SUPERUSER_PASSWORD")]
        password: String,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::CreateSuperuser {
            username,
            email,
            password,
            database_url,
        } => create_superuser(username, email, password, &database_url).await,
    }
}

async fn connect(database_url: &str) -> anyhow::Result<Database> {
    let db = Database::new(database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    Ok(db)
}

async fn serve() -> anyhow::Result<()> {
    tracing::info!("Starting competition manager");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = connect(&config.database_url).await?;

    let sessions = SessionService::new(
        &config.secret_key,
        config.session_ttl_minutes,
        config.secure_cookies,
    );
    let app = routes::configure(AppState::new(db, sessions), &config.allowed_origins);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn create_superuser(
    username: String,
    email: String,
    password: String,
    database_url: &str,
) -> anyhow::Result<()> {
    let db = connect(database_url).await?;

    let new_user = NewUser {
        username,
        first_name: String::new(),
        last_name: String::new(),
        email,
        password_hash: hash_password(&password).context("Failed to hash password")?,
        is_superuser: true,
    };

    let user = ClientRepository::new(db.pool())
        .create_superuser(new_user)
        .await
        .context("Failed to create superuser")?;
    tracing::info!(id = %user.id, username = %user.username, "Superuser created");

    Ok(())
}
