//! Triage REST API server binary.
//!
//! ## Purpose
//! Serves the classification engine over HTTP for the patient portal.
//!
//! ## Intended use
//! The portal's walk-in care flow posts a symptom input to `/triage` and
//! renders the returned assessment. The engine itself is an in-process
//! function; this binary is the only network surface in the workspace.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{
    AnswerReq, AssessmentRes, ClassifyReq, ErrorRes, HealthRes, InputReq, KioskSavingsRes,
    MedicalContextDto, NarrativeReq, StructuredReq,
};
use triage_core::{Lexicon, TriageEngine};

/// Application state for the REST API server
///
/// Holds the classification engine behind an `Arc`; the engine is stateless
/// apart from its lexicon, so one instance serves all requests.
#[derive(Clone)]
struct AppState {
    engine: Arc<TriageEngine>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, classify),
    components(schemas(
        HealthRes,
        ErrorRes,
        ClassifyReq,
        InputReq,
        NarrativeReq,
        StructuredReq,
        AnswerReq,
        MedicalContextDto,
        AssessmentRes,
        KioskSavingsRes,
    ))
)]
struct ApiDoc;

/// Main entry point for the triage REST API server
///
/// Starts the REST server on the configured address (default: 0.0.0.0:3000)
/// with OpenAPI/Swagger documentation at `/swagger-ui`.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `TRIAGE_LEXICON_PATH`: Optional path to a replacement lexicon YAML
///   document; the built-in tables are used when unset
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the lexicon document cannot be loaded or fails validation,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let lexicon = match std::env::var("TRIAGE_LEXICON_PATH") {
        Ok(path) => {
            tracing::info!("-- Loading lexicon document from {}", path);
            Lexicon::from_yaml_file(&path)?
        }
        Err(_) => Lexicon::builtin(),
    };
    tracing::info!("-- Lexicon version {}", lexicon.version);

    let engine = TriageEngine::new(lexicon)?;

    tracing::info!("-- Starting triage REST API on {}", addr);

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/triage", post(classify))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the triage service. Used for
/// monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Triage API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/triage",
    request_body = ClassifyReq,
    responses(
        (status = 200, description = "Triage assessment", body = AssessmentRes),
        (status = 400, description = "Invalid input for the chosen variant", body = ErrorRes)
    )
)]
/// Classify a symptom input into a triage assessment
///
/// Accepts either input variant (narrative or structured checklist) plus
/// optional opaque medical context. Soft gaps like an unset duration are not
/// errors; a missing required field for the chosen variant is a 400.
#[axum::debug_handler]
async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyReq>,
) -> Result<Json<AssessmentRes>, (StatusCode, Json<ErrorRes>)> {
    match req.into_domain() {
        Ok((input, context)) => {
            let assessment = state.engine.classify(&input, context);
            Ok(Json(AssessmentRes::from(assessment)))
        }
        Err(e) => {
            tracing::warn!("Classify request rejected: {e}");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorRes {
                    message: e.to_string(),
                }),
            ))
        }
    }
}
