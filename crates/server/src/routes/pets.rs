use std::sync::Arc;

use axum::extract::{Form, Path, State};
use chrono::NaiveDate;
use serde::Deserialize;
use service::clinic::domain::{Owner, Pet, PetType};
use service::clinic::validation::{self, BindingResult};
use service::ClinicService;
use tracing::{info, instrument};

use crate::errors::WebError;
use crate::mvc::{ModelAndView, View};
use crate::routes::ServerState;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetForm {
    pub name: String,
    /// `yyyy-MM-dd`
    pub birth_date: String,
    /// Pet type name, e.g. `cat`.
    #[serde(rename = "type")]
    pub pet_type: String,
}

impl PetForm {
    /// Copy the form onto `pet`, reporting values that cannot be converted.
    fn bind(self, pet: &mut Pet, types: &[PetType]) -> BindingResult {
        let mut errors = BindingResult::new();
        pet.name = self.name.trim().to_string();

        let birth_date = self.birth_date.trim();
        pet.birth_date = None;
        if !birth_date.is_empty() {
            match NaiveDate::parse_from_str(birth_date, DATE_FORMAT) {
                Ok(d) => pet.birth_date = Some(d),
                Err(_) => errors.reject_value("birthDate", validation::TYPE_MISMATCH, "invalid date"),
            }
        }

        let type_name = self.pet_type.trim();
        if !type_name.is_empty() {
            match types.iter().find(|t| t.name == type_name) {
                Some(t) => pet.pet_type = Some(t.clone()),
                None => {
                    pet.pet_type = None;
                    errors.reject_value("type", validation::TYPE_MISMATCH, format!("unknown pet type '{type_name}'"));
                }
            }
        }
        errors
    }
}

/// Binding errors first, then rule violations on fields that bound cleanly.
fn check(binding: BindingResult, pet: &Pet, owner: &Owner) -> BindingResult {
    let mut errors = binding;
    for e in validation::validate_pet(pet, owner).errors() {
        if !errors.has_field_errors(&e.field) {
            errors.reject_value(&e.field, &e.code, e.message.clone());
        }
    }
    errors
}

pub struct PetController {
    clinic: Arc<dyn ClinicService>,
}

impl PetController {
    pub fn new(clinic: Arc<dyn ClinicService>) -> Self { Self { clinic } }

    async fn load_owner(&self, owner_id: i32) -> Result<Owner, WebError> {
        self.clinic
            .find_owner_by_id(owner_id)
            .await?
            .ok_or_else(|| WebError::not_found("owner", owner_id))
    }

    /// The pet only exists under the owner it belongs to.
    async fn load_pet(&self, owner: &Owner, pet_id: i32) -> Result<Pet, WebError> {
        match self.clinic.find_pet_by_id(pet_id).await? {
            Some(pet) if pet.owner_id == owner.id => Ok(pet),
            _ => Err(WebError::not_found("pet", pet_id)),
        }
    }

    #[instrument(skip(self))]
    pub async fn init_creation_form(&self, owner_id: i32) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        let types = self.clinic.find_pet_types().await?;
        let pet = Pet { owner_id: owner.id, ..Pet::default() };
        Ok(ModelAndView::Render(View::PetForm { owner, pet, types, errors: BindingResult::new() }))
    }

    #[instrument(skip(self, form))]
    pub async fn process_creation_form(&self, owner_id: i32, form: PetForm) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        let types = self.clinic.find_pet_types().await?;
        let mut pet = Pet { owner_id: owner.id, ..Pet::default() };
        let binding = form.bind(&mut pet, &types);
        let errors = check(binding, &pet, &owner);
        if errors.has_errors() {
            return Ok(ModelAndView::Render(View::PetForm { owner, pet, types, errors }));
        }
        self.clinic.save_pet(&mut pet).await?;
        info!(event = "pet_created", owner_id, pet_id = ?pet.id);
        Ok(ModelAndView::redirect_to_owner(owner_id))
    }

    #[instrument(skip(self))]
    pub async fn init_update_form(&self, owner_id: i32, pet_id: i32) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        let types = self.clinic.find_pet_types().await?;
        let pet = self.load_pet(&owner, pet_id).await?;
        Ok(ModelAndView::Render(View::PetForm { owner, pet, types, errors: BindingResult::new() }))
    }

    #[instrument(skip(self, form))]
    pub async fn process_update_form(&self, owner_id: i32, pet_id: i32, form: PetForm) -> Result<ModelAndView, WebError> {
        let owner = self.load_owner(owner_id).await?;
        let stored = self.load_pet(&owner, pet_id).await?;
        let types = self.clinic.find_pet_types().await?;
        // A form without a type keeps the one already stored.
        let mut pet = Pet { id: stored.id, owner_id: owner.id, pet_type: stored.pet_type, ..Pet::default() };
        let binding = form.bind(&mut pet, &types);
        let errors = check(binding, &pet, &owner);
        if errors.has_errors() {
            return Ok(ModelAndView::Render(View::PetForm { owner, pet, types, errors }));
        }
        self.clinic.save_pet(&mut pet).await?;
        info!(event = "pet_updated", owner_id, pet_id);
        Ok(ModelAndView::redirect_to_owner(owner_id))
    }
}

pub async fn init_creation_form(
    State(state): State<ServerState>,
    Path(owner_id): Path<i32>,
) -> Result<ModelAndView, WebError> {
    state.pets.init_creation_form(owner_id).await
}

pub async fn process_creation_form(
    State(state): State<ServerState>,
    Path(owner_id): Path<i32>,
    Form(form): Form<PetForm>,
) -> Result<ModelAndView, WebError> {
    state.pets.process_creation_form(owner_id, form).await
}

pub async fn init_update_form(
    State(state): State<ServerState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
) -> Result<ModelAndView, WebError> {
    state.pets.init_update_form(owner_id, pet_id).await
}

pub async fn process_update_form(
    State(state): State<ServerState>,
    Path((owner_id, pet_id)): Path<(i32, i32)>,
    Form(form): Form<PetForm>,
) -> Result<ModelAndView, WebError> {
    state.pets.process_update_form(owner_id, pet_id, form).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> Vec<PetType> { vec![PetType::new(1, "cat"), PetType::new(2, "dog")] }

    fn form(name: &str, birth_date: &str, pet_type: &str) -> PetForm {
        PetForm { name: name.into(), birth_date: birth_date.into(), pet_type: pet_type.into() }
    }

    #[test]
    fn binds_known_type_and_iso_date() {
        let mut pet = Pet::default();
        let errors = form("Betty", "2015-02-12", "dog").bind(&mut pet, &types());
        assert!(!errors.has_errors());
        assert_eq!(pet.birth_date, NaiveDate::from_ymd_opt(2015, 2, 12));
        assert_eq!(pet.pet_type, Some(PetType::new(2, "dog")));
    }

    #[test]
    fn unparsable_values_are_type_mismatches() {
        let mut pet = Pet::default();
        let errors = form("Betty", "12/02/2015", "dragon").bind(&mut pet, &types());
        assert_eq!(errors.fields(), vec!["birthDate", "type"]);
        assert!(errors.errors().iter().all(|e| e.code == validation::TYPE_MISMATCH));
    }

    #[test]
    fn binding_errors_are_not_doubled_by_rules() {
        let mut pet = Pet::default();
        let binding = form("", "nope", "").bind(&mut pet, &types());
        let errors = check(binding, &pet, &Owner::default());
        assert_eq!(errors.fields(), vec!["birthDate", "name", "type"]);
        assert_eq!(errors.field_errors("birthDate").count(), 1);
    }
}
