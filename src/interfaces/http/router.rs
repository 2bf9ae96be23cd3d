//! API Router with Swagger UI

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{DefectService, IdentityService, ProjectService, ReportService};
use crate::auth::token::JwtConfig;
use crate::config::AppConfig;
use crate::infrastructure::database::repositories::{
    DefectRepository, ProjectRepository, UserRepository,
};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, defects, health, projects, reports, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::root,
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::create_test_users,
        // Users
        users::list_users,
        users::create_user,
        users::get_me,
        users::update_me,
        users::change_role,
        users::delete_user,
        // Projects
        projects::create_project,
        projects::list_projects,
        // Defects
        defects::create_defect,
        defects::list_defects,
        defects::get_defect,
        defects::update_defect,
        defects::upload_attachment,
        // Reports
        reports::export_defects_csv,
    ),
    components(
        schemas(
            // Auth
            auth::LoginForm,
            auth::TokenResponse,
            auth::RegisterRequest,
            auth::SeededUsersResponse,
            // Users
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateProfileRequest,
            users::ChangeRoleRequest,
            // Projects
            projects::ProjectDto,
            projects::CreateProjectRequest,
            // Defects
            defects::DefectDto,
            defects::CreateDefectRequest,
            defects::UpdateDefectRequest,
            defects::AttachmentResponse,
            // Health
            health::HealthResponse,
            health::ServiceInfo,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check endpoints"),
        (name = "Authentication", description = "Login (token), registration, dev-account seeding"),
        (name = "Users", description = "User management and own-profile access"),
        (name = "Projects", description = "Construction project management"),
        (name = "Defects", description = "Defect tracking and attachments"),
        (name = "Reports", description = "CSV exports"),
    ),
    info(
        title = "Construction Defects System API",
        version = "1.0.0",
        description = "REST API for tracking construction-site defects across projects",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig, cfg: &AppConfig) -> Router {
    // ── Repositories ───────────────────────────────────────────
    let users_repo = Arc::new(UserRepository::new(db.clone()));
    let projects_repo = Arc::new(ProjectRepository::new(db.clone()));
    let defects_repo = Arc::new(DefectRepository::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let identity = Arc::new(IdentityService::new(
        users_repo.clone(),
        jwt_config.clone(),
        cfg.security.allow_legacy_test_hashes,
    ));
    let project_service = Arc::new(ProjectService::new(projects_repo.clone()));
    let defect_service = Arc::new(DefectService::new(defects_repo.clone(), projects_repo));
    let report_service = Arc::new(ReportService::new(defects_repo));

    let auth_state = AuthState {
        jwt_config,
        users: users_repo,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/token", post(auth::login))
        .route("/register", post(auth::register))
        .route("/create-test-users", post(auth::create_test_users))
        .with_state(auth::AuthHandlerState {
            identity: identity.clone(),
            allow_legacy_seeding: cfg.security.allow_legacy_test_hashes,
        });

    // User routes (protected)
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/me", get(users::get_me).put(users::update_me))
        .route("/{id}/role", put(users::change_role))
        .route("/{id}", delete(users::delete_user))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(users::UserHandlerState { identity });

    // Project routes (protected)
    let project_routes = Router::new()
        .route(
            "/",
            get(projects::list_projects).post(projects::create_project),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(projects::ProjectHandlerState {
            projects: project_service,
        });

    // Defect routes (protected)
    let defect_routes = Router::new()
        .route("/", get(defects::list_defects).post(defects::create_defect))
        .route(
            "/{id}",
            get(defects::get_defect).put(defects::update_defect),
        )
        .route("/{id}/attachments", post(defects::upload_attachment))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(defects::DefectHandlerState {
            defects: defect_service,
            upload_dir: PathBuf::from(&cfg.uploads.dir),
        });

    // Report routes (protected)
    let report_routes = Router::new()
        .route("/defects/csv", get(reports::export_defects_csv))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(reports::ReportHandlerState {
            reports: report_service,
        });

    // Health routes (public)
    let health_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .with_state(health::HealthState { db });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/defects", defect_routes)
        .nest("/reports", report_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
