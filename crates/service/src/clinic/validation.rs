//! Form rules for owners, pets and visits.
//!
//! Validators never fail; they collect [`FieldError`]s into a
//! [`BindingResult`] which the web layer renders next to the inputs.

use serde::Serialize;

use super::domain::{Owner, Pet, Visit};

pub const REQUIRED: &str = "required";
pub const DIGITS: &str = "digits";
pub const DUPLICATE: &str = "duplicate";
pub const TYPE_MISMATCH: &str = "typeMismatch";
pub const NOT_FOUND: &str = "notFound";

const MAX_TELEPHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BindingResult {
    errors: Vec<FieldError>,
}

impl BindingResult {
    pub fn new() -> Self { Self::default() }

    pub fn reject_value(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), code: code.into(), message: message.into() });
    }

    pub fn has_errors(&self) -> bool { !self.errors.is_empty() }

    pub fn has_field_errors(&self, field: &str) -> bool { self.errors.iter().any(|e| e.field == field) }

    pub fn field_errors(&self, field: &str) -> impl Iterator<Item = &FieldError> {
        let field = field.to_string();
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// First message for `field`, as shown under the input.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> &[FieldError] { &self.errors }

    /// Distinct fields that carry at least one error, in rejection order.
    pub fn fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.errors {
            if !out.contains(&e.field.as_str()) {
                out.push(&e.field);
            }
        }
        out
    }

    pub fn merge(&mut self, other: BindingResult) { self.errors.extend(other.errors); }
}

fn require(result: &mut BindingResult, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        result.reject_value(field, REQUIRED, "must not be empty");
        return false;
    }
    true
}

pub fn validate_owner(owner: &Owner) -> BindingResult {
    let mut result = BindingResult::new();
    require(&mut result, "firstName", &owner.first_name);
    require(&mut result, "lastName", &owner.last_name);
    require(&mut result, "address", &owner.address);
    require(&mut result, "city", &owner.city);
    if require(&mut result, "telephone", &owner.telephone) {
        let phone = owner.telephone.trim();
        if phone.len() > MAX_TELEPHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
            result.reject_value(
                "telephone",
                DIGITS,
                format!("numeric value out of bounds (<{MAX_TELEPHONE_DIGITS} digits> expected)"),
            );
        }
    }
    result
}

/// `owner` is the pet's owner as loaded, used for the duplicate-name rule.
pub fn validate_pet(pet: &Pet, owner: &Owner) -> BindingResult {
    let mut result = BindingResult::new();
    if require(&mut result, "name", &pet.name) && pet.is_new() && owner.get_pet(&pet.name, true).is_some() {
        result.reject_value("name", DUPLICATE, "already exists");
    }
    if pet.is_new() && pet.pet_type.is_none() {
        result.reject_value("type", REQUIRED, "must not be empty");
    }
    if pet.birth_date.is_none() {
        result.reject_value("birthDate", REQUIRED, "must not be empty");
    }
    result
}

pub fn validate_visit(visit: &Visit) -> BindingResult {
    let mut result = BindingResult::new();
    require(&mut result, "description", &visit.description);
    result
}
