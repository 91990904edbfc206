use std::sync::Arc;

use axum::extract::{Form, Path, State};
use chrono::NaiveDate;
use serde::Deserialize;
use service::clinic::domain::{Owner, Pet, Visit};
use service::clinic::validation::{self, BindingResult};
use service::ClinicService;
use tracing::{info, instrument};

use crate::errors::WebError;
use crate::mvc::{ModelAndView, View};
use crate::routes::pets::DATE_FORMAT;
use crate::routes::ServerState;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VisitForm {
    /// `yyyy-MM-dd`; today when empty.
    pub date: String,
    pub description: String,
}

impl VisitForm {
    fn bind(self, visit: &mut Visit) -> BindingResult {
        let mut errors = BindingResult::new();
        visit.description = self.description.trim().to_string();
        let date = self.date.trim();
        if !date.is_empty() {
            match NaiveDate::parse_from_str(date, DATE_FORMAT) {
                Ok(d) => visit.date = d,
                Err(_) => errors.reject_value("date", validation::TYPE_MISMATCH, "invalid date"),
            }
        }
        errors.merge(validation::validate_visit(visit));
        errors
    }
}

pub struct VisitController {
    clinic: Arc<dyn ClinicService>,
}

impl VisitController {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self { Self { clinic } }

    /// Owner and pet for the form, the pet carrying its visit history.
    async fn load(&self, owner_id: i32, pet_id: i32) -> Result<(Owner, Pet), WebError> {
        let owner = self
            .clinic
            .find_owner_by_id(owner_id)
            .await?
            .ok_or_else(|| WebError::not_found("owner", owner_id))?;
        let mut pet = match self.clinic.find_pet_by_id(pet_id).await? {
            Some(pet) if pet.owner_id == owner.id => pet,
            _ => return Err(WebError::not_found("pet", pet_id)),
        };
        pet.set_visits(self.clinic.find_visits_by_pet_id(pet_id).await?);
        Ok((owner, pet))
    }

    #[instrument(skip(self))]
    pub async fn init_new_visit_form(&self, owner_id: i32, pet_id: i32) -> Result<ModelAndView, WebError> {
        let (owner, pet) = self.load(owner_id, pet_id).await?;
        let visit = Visit { pet_id: pet.id, ..Visit::new() };
        Ok(ModelAndView::Render(View::VisitForm { owner, pet, visit, errors: BindingResult::new() }))
    }

    #[instrument(skip(self, form))]
    pub async fn process_new_visit_form(&self, owner_id: i32, pet_id: i32, form: VisitForm) -> Result<ModelAndView, WebError> {
        let (owner, pet) = self.load(owner_id, pet_id).await?;
        let mut visit = Visit { pet_id: pet.id, ..Visit::new() };
        let errors = form.bind(&mut visit);
        if errors.has_errors() {
            return Ok(ModelAndView::Render(View::VisitForm { owner, pet, visit, errors }));
        }
        self.clinic.save_visit(&mut visit).await?;
        info!(event = "visit_created", owner_id, pet_id, visit_id = ?visit.id);
        Ok(ModelAndView::redirect_to_owner(owner_id))
    }

    #[instrument(skip(self))]
    pub async fn show_visits(&self, pet_id: i32) -> Result<ModelAndView, WebError> {
        let visits = self.clinic.find_visits_by_pet_id(pet_id).await?;
        Ok(ModelAndView::Render(View::VisitList { visits }))
    }
}

pub async fn init_new_visit_form(
    State(state): State<ServerState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<ModelAndView, WebError> {
    state.visits.init_new_visit_form(owner_id, pet_id).await
}

pub async fn process_new_visit_form(
    State(state): State<ServerState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<VisitForm>,
) -> Result<ModelAndView, WebError> {
    state.visits.process_new_visit_form(owner_id, pet_id, form).await
}

pub async fn show_visits(
    State(state): State<ServerState>,
    Path((_owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<ModelAndView, WebError> {
    state.visits.show_visits(pet_id).await
}
