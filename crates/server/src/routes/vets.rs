use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use service::clinic::domain::Vets;
use service::ClinicService;
use tracing::instrument;

use crate::errors::WebError;
use crate::mvc::{ModelAndView, View};
use crate::routes::ServerState;

pub struct VetController {
    clinic: Arc<dyn ClinicService>,
}

impl VetController {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self { Self { clinic } }

    #[instrument(skip(self))]
    pub async fn show_vet_list(&self) -> Result<ModelAndView, WebError> {
        let vets = Vets::from(self.clinic.find_vets().await?);
        Ok(ModelAndView::Render(View::VetList { vets }))
    }

    /// Same collection as [`Self::show_vet_list`], for the JSON endpoint.
    #[instrument(skip(self))]
    pub async fn show_resources_vet_list(&self) -> Result<Vets, WebError> {
        Ok(Vets::from(self.clinic.find_vets().await?))
    }
}

pub async fn show_vet_list(State(state): State<ServerState>) -> Result<ModelAndView, WebError> {
    state.vets.show_vet_list().await
}

/// All vets with their specialties.
#[utoipa::path(
    get,
    path = "/vets",
    tag = "vets",
    responses(
        (status = 200, description = "Vet list", body = crate::openapi::VetsDoc),
        (status = 500, description = "Data access failure")
    )
)]
pub async fn show_resources_vet_list(State(state): State<ServerState>) -> Result<Json<Vets>, WebError> {
    state.vets.show_resources_vet_list().await.map(Json)
}
