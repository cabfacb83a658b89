//! Register a teacher identifier so it can manage announcements.
//!
//! Usage: add-teacher USERNAME [--display-name NAME]

use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use noticeboard_api::db::{self, teachers::PgTeacherStore};

#[derive(Parser)]
#[command(name = "add-teacher", about = "Register a teacher allowed to manage announcements")]
struct Args {
    /// Identifier the teacher will pass as `teacher_username`
    username: String,

    /// Human-readable name shown alongside the identifier
    #[arg(long)]
    display_name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let username = args.username.trim();
    if username.is_empty() {
        anyhow::bail!("username must not be empty");
    }

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    db::run_migrations(&pool).await?;

    let teacher = PgTeacherStore::new(pool)
        .upsert(username, args.display_name.as_deref())
        .await?;
    tracing::info!(
        "Teacher {} registered (display name: {})",
        teacher.username,
        teacher.display_name.as_deref().unwrap_or("-")
    );

    Ok(())
}
