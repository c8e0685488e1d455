use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config;
use crate::task::TaskState;

pub mod api;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::task::api::get_tasks_handler,
        crate::task::api::get_task_by_id_handler,
        crate::task::api::get_tasks_by_due_date_handler,
        crate::task::api::create_task_handler,
        crate::task::api::update_task_handler,
        crate::task::api::delete_task_handler,
    ),
    components(schemas(
        crate::task::api::TaskJson,
        crate::task::api::CreateTaskRequest,
        crate::task::api::UpdateTaskRequest,
        crate::task::TaskStatus,
        api::ServerErrorResponse,
    )),
    tags(
        (name = "Tasks", description = "APIs for managing tasks")
    )
)]
struct ApiDoc;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    use axum::Router;

    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let task_state = Arc::new(TaskState { db: Arc::new(db) });

    let api_router = api::create_api_router(task_state);

    let app = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
