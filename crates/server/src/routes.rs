pub mod owners;
pub mod pets;
pub mod vets;
pub mod visits;
pub mod welcome;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use service::ClinicService;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use owners::OwnerController;
use pets::PetController;
use vets::VetController;
use visits::VisitController;

/// Controllers shared by every request; each wraps the same clinic service.
#[derive(Clone)]
pub struct ServerState {
    pub owners: Arc<OwnerController>,
    pub pets: Arc<PetController>,
    pub visits: Arc<VisitController>,
    pub vets: Arc<VetController>,
}

impl ServerState {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self {
        Self {
            owners: Arc::new(OwnerController::new(Arc::clone(&clinic))),
            pets: Arc::new(PetController::new(Arc::clone(&clinic))),
            visits: Arc::new(VisitController::new(Arc::clone(&clinic))),
            vets: Arc::new(VetController::new(clinic)),
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router. Stylesheets and other assets are
/// served from `<static_dir>/resources` under `/resources`.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let resources = ServeDir::new(format!("{static_dir}/resources"));

    let pages = Router::new()
        .route("/", get(welcome::welcome))
        .route("/oups", get(welcome::trigger_exception))
        .route("/owners/new", get(owners::init_creation_form).post(owners::process_creation_form))
        .route("/owners/find", get(owners::init_find_form))
        .route("/owners", get(owners::process_find_form))
        .route("/owners/:owner_id", get(owners::show_owner))
        .route("/owners/:owner_id/edit", get(owners::init_update_form).post(owners::process_update_form))
        .route("/owners/:owner_id/pets/new", get(pets::init_creation_form).post(pets::process_creation_form))
        .route(
            "/owners/:owner_id/pets/:pet_id/edit",
            get(pets::init_update_form).post(pets::process_update_form),
        )
        .route(
            "/owners/:owner_id/pets/:pet_id/visits/new",
            get(visits::init_new_visit_form).post(visits::process_new_visit_form),
        )
        .route("/owners/:owner_id/pets/:pet_id/visits", get(visits::show_visits))
        .route("/vets.html", get(vets::show_vet_list));

    let api = Router::new()
        .route("/vets", get(vets::show_resources_vet_list))
        .route("/health", get(welcome::health))
        .route("/api-docs/openapi.json", get(openapi_json));

    pages
        .merge(api)
        .nest_service("/resources", resources)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
