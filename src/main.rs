use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use studentdesk::cli::create_user;
use studentdesk::logging::init_tracing;
use studentdesk::router::init_router;
use studentdesk::state::init_app_state;
use studentdesk_auth::Role;
use studentdesk_config::ServerConfig;
use studentdesk_db::{DatabaseConfig, init_db_pool};
use tracing::info;

#[derive(Parser)]
#[command(name = "studentdesk")]
#[command(about = "StudentDesk - student management API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Create a login account
    CreateUser {
        username: String,
        password: String,
        /// `admin`, `student`, or any other role name
        #[arg(default_value = "student")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::CreateUser {
            username,
            password,
            role,
        } => handle_create_user(&username, &password, Role::from(role)).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    init_tracing()?;

    let state = init_app_state().await?;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn handle_create_user(username: &str, password: &str, role: Role) -> anyhow::Result<()> {
    let db_config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    let user = create_user(&pool, username, password, &role).await?;

    println!("User created successfully!");
    println!("   Id: {}", user.id);
    println!("   Username: {}", user.username);
    println!("   Role: {}", role);
    Ok(())
}
