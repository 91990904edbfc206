use std::sync::Arc;

use axum::extract::{Form, Path, Query, State};
use serde::Deserialize;
use service::clinic::domain::Owner;
use service::clinic::validation::{self, BindingResult};
use service::ClinicService;
use tracing::{info, instrument};

use crate::errors::WebError;
use crate::mvc::{ModelAndView, View};
use crate::routes::ServerState;

/// Owner form fields as posted by `owners/createOrUpdateOwnerForm`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerForm {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerForm {
    fn into_owner(self, id: Option<i32>) -> Owner {
        Owner {
            id,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            telephone: self.telephone.trim().to_string(),
            pets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindOwnersQuery {
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

pub struct OwnerController {
    clinic: Arc<dyn ClinicService>,
}

impl OwnerController {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self { Self { clinic } }

    pub fn init_creation_form(&self) -> ModelAndView {
        ModelAndView::Render(View::OwnerForm { owner: Owner::default(), errors: BindingResult::new() })
    }

    #[instrument(skip(self, form))]
    pub async fn process_creation_form(&self, form: OwnerForm) -> Result<ModelAndView, WebError> {
        let mut owner = form.into_owner(None);
        let errors = validation::validate_owner(&owner);
        if errors.has_errors() {
            return Ok(ModelAndView::Render(View::OwnerForm { owner, errors }));
        }
        self.clinic.save_owner(&mut owner).await?;
        let id = owner.id.ok_or_else(|| WebError::Internal("saved owner has no id".into()))?;
        info!(event = "owner_created", owner_id = id);
        Ok(ModelAndView::redirect_to_owner(id))
    }

    pub fn init_find_form(&self) -> ModelAndView {
        ModelAndView::Render(View::FindOwners { owner: Owner::default(), errors: BindingResult::new() })
    }

    /// Prefix search on last name; a missing name matches every owner.
    #[instrument(skip(self))]
    pub async fn process_find_form(&self, last_name: Option<String>) -> Result<ModelAndView, WebError> {
        let last_name = last_name.unwrap_or_default();
        let mut results = self.clinic.find_owner_by_last_name(&last_name).await?;
        match results.len() {
            0 => {
                let mut errors = BindingResult::new();
                errors.reject_value("lastName", validation::NOT_FOUND, "has not been found");
                let owner = Owner { last_name, ..Owner::default() };
                Ok(ModelAndView::Render(View::FindOwners { owner, errors }))
            }
            1 => match results.pop().and_then(|o| o.id) {
                Some(id) => Ok(ModelAndView::redirect_to_owner(id)),
                None => Err(WebError::Internal("owner without id in search results".into())),
            },
            _ => Ok(ModelAndView::Render(View::OwnersList { selections: results })),
        }
    }

    #[instrument(skip(self))]
    pub async fn show_owner(&self, owner_id: i32) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        Ok(ModelAndView::Render(View::OwnerDetails { owner }))
    }

    #[instrument(skip(self))]
    pub async fn init_update_form(&self, owner_id: i32) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        Ok(ModelAndView::Render(View::OwnerForm { owner, errors: BindingResult::new() }))
    }

    #[instrument(skip(self, form))]
    pub async fn process_update_form(&self, owner_id: i32, form: OwnerForm) -> Result<ModelAndView, WebError> {
        let mut owner = form.into_owner(Some(owner_id));
        let errors = validation::validate_owner(&owner);
        if errors.has_errors() {
            return Ok(ModelAndView::Render(View::OwnerForm { owner, errors }));
        }
        self.clinic.save_owner(&mut owner).await?;
        info!(event = "owner_updated", owner_id);
        Ok(ModelAndView::redirect_to_owner(owner_id))
    }

    async fn load_owner(&self, owner_id: i32) -> Result<Owner, WebError> {
        self.clinic
            .find_owner_by_id(owner_id)
            .await?
            .ok_or_else(|| WebError::not_found("owner", owner_id))
    }
}

pub async fn init_creation_form(State(state): State<ServerState>) -> ModelAndView {
    state.owners.init_creation_form()
}

pub async fn process_creation_form(
    State(state): State<ServerState>,
    Form(form): Form<OwnerForm>,
) -> Result<ModelAndView, WebError> {
    state.owners.process_creation_form(form).await
}

pub async fn init_find_form(State(state): State<ServerState>) -> ModelAndView {
    state.owners.init_find_form()
}

pub async fn process_find_form(
    State(state): State<ServerState>,
    Query(query): Query<FindOwnersQuery>,
) -> Result<ModelAndView, WebError> {
    state.owners.process_find_form(query.last_name).await
}

pub async fn show_owner(State(state): State<ServerState>, Path(owner_id): Path<i32>) -> Result<ModelAndView, WebError> {
    state.owners.show_owner(owner_id).await
}

pub async fn init_update_form(
    State(state): State<ServerState>,
    Path(owner_id): Path<i32>,
) -> Result<ModelAndView, WebError> {
    state.owners.init_update_form(owner_id).await
}

pub async fn process_update_form(
    State(state): State<ServerState>,
    Path(owner_id): Path<i32>,
    Form(form): Form<OwnerForm>,
) -> Result<ModelAndView, WebError> {
    state.owners.process_update_form(owner_id, form).await
}
