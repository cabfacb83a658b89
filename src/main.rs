use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noticeboard_api::{
    build_router,
    config::{Config, StoreBackend},
    db::{
        self,
        announcements::{AnnouncementStore, PgAnnouncementStore},
        memory::MemoryStore,
        teachers::{PgTeacherStore, TeacherStore},
    },
    services::{announcements::AnnouncementService, credentials::CredentialGate},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (announcement_store, teacher_store): (Arc<dyn AnnouncementStore>, Arc<dyn TeacherStore>) =
        match config.store_backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;
                let pool = db::create_pool(url).await?;
                db::run_migrations(&pool).await?;
                info!("Database connected and migrations applied");
                let announcements: Arc<dyn AnnouncementStore> =
                    Arc::new(PgAnnouncementStore::new(pool.clone()));
                let teachers: Arc<dyn TeacherStore> = Arc::new(PgTeacherStore::new(pool));
                (announcements, teachers)
            }
            StoreBackend::Memory => {
                let store = Arc::new(MemoryStore::new());
                for username in &config.teacher_usernames {
                    store.add_teacher(username, None).await;
                }
                info!(
                    "Using in-memory store with {} teacher(s); data is lost on restart",
                    config.teacher_usernames.len()
                );
                let announcements: Arc<dyn AnnouncementStore> = store.clone();
                let teachers: Arc<dyn TeacherStore> = store;
                (announcements, teachers)
            }
        };

    let state = AppState {
        announcements: AnnouncementService::new(announcement_store),
        credentials: CredentialGate::new(teacher_store),
    };

    // Allow the app base URL; localhost is always allowed for development.
    let base = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let Ok(o) = origin.to_str() else {
            return false;
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-teacher-username"),
        ]))
        .allow_origin(cors_origin);

    let app = build_router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Announcements API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
