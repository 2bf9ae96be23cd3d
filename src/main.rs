//!
//! REST backend for the construction defects tracking system.
//! Reads configuration from TOML file (~/.config/defects-service/config.toml).

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use defects_service::auth::token::JwtConfig;
use defects_service::infrastructure::database::migrator::Migrator;
use defects_service::{create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("DEFECTS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Construction Defects System...");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        ttl_minutes: app_cfg.security.token_ttl_minutes,
    };
    info!(
        "Access tokens configured with {}min expiration",
        jwt_config.ttl_minutes
    );
    if app_cfg.security.allow_legacy_test_hashes {
        warn!("Legacy test-hash accounts are enabled; disable security.allow_legacy_test_hashes in production");
    }

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Create default admin user if not exists
    create_default_admin(&db, &app_cfg).await;

    // ── REST API server ────────────────────────────────────────
    let api_router = create_api_router(db.clone(), jwt_config, &app_cfg);

    let api_addr = app_cfg.listen_address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    axum::serve(listener, api_router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Construction Defects System shutdown complete");
    Ok(())
}

/// Create default admin user if no users exist
async fn create_default_admin(db: &sea_orm::DatabaseConnection, app_cfg: &AppConfig) {
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

    use defects_service::auth::password::hash_password;
    use defects_service::infrastructure::database::entities::user::{self, UserRole};

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);

    if users_count == 0 {
        info!("Creating default admin user...");

        let password_hash = match hash_password(&app_cfg.admin.password) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to hash admin password: {}", e);
                return;
            }
        };

        let admin = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(app_cfg.admin.username.clone()),
            password_hash: Set(password_hash),
            role: Set(UserRole::Admin),
            full_name: Set(Some("Administrator".to_string())),
            email: Set(Some(app_cfg.admin.email.clone())),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
        };

        match admin.insert(db).await {
            Ok(_) => {
                info!("Default admin created: {}", app_cfg.admin.username);
                warn!("Please change the admin password immediately!");
            }
            Err(e) => {
                error!("Failed to create admin user: {}", e);
            }
        }
    }
}
