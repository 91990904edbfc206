//! Controller results: a named view with its model, or a redirect.
//!
//! Every rendered response carries [`ViewName`] and [`ViewModel`] in its
//! extensions so in-process callers can check what was rendered without
//! parsing HTML.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use service::clinic::domain::{Owner, Pet, PetType, Visit, Vets};
use service::clinic::validation::BindingResult;

use crate::views;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelAndView {
    Render(View),
    /// Target path, sent as `302 Found`.
    Redirect(String),
}

impl ModelAndView {
    pub fn redirect_to_owner(owner_id: i32) -> Self { Self::Redirect(format!("/owners/{owner_id}")) }

    pub fn view_name(&self) -> String {
        match self {
            Self::Render(view) => view.name().to_string(),
            Self::Redirect(to) => format!("redirect:{to}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Welcome,
    OwnerForm { owner: Owner, errors: BindingResult },
    FindOwners { owner: Owner, errors: BindingResult },
    OwnersList { selections: Vec<Owner> },
    OwnerDetails { owner: Owner },
    PetForm { owner: Owner, pet: Pet, types: Vec<PetType>, errors: BindingResult },
    VisitForm { owner: Owner, pet: Pet, visit: Visit, errors: BindingResult },
    VisitList { visits: Vec<Visit> },
    VetList { vets: Vets },
    Error { status: StatusCode, message: String },
}

/// A value that fails to serialize is logged and stored as `null`; the HTML
/// still renders from the typed view.
fn entry(model: &mut Map<String, Value>, key: &str, value: &impl Serialize) {
    let value = serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(key, error = %e, "model entry is not serializable");
        Value::Null
    });
    model.insert(key.to_string(), value);
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Welcome => "welcome",
            View::OwnerForm { .. } => "owners/createOrUpdateOwnerForm",
            View::FindOwners { .. } => "owners/findOwners",
            View::OwnersList { .. } => "owners/ownersList",
            View::OwnerDetails { .. } => "owners/ownerDetails",
            View::PetForm { .. } => "pets/createOrUpdatePetForm",
            View::VisitForm { .. } => "pets/createOrUpdateVisitForm",
            View::VisitList { .. } => "visitList",
            View::VetList { .. } => "vets/vetList",
            View::Error { .. } => "error",
        }
    }

    /// Model entries keyed the way the templates refer to them.
    pub fn model(&self) -> Map<String, Value> {
        let mut model = Map::new();
        match self {
            View::Welcome => {}
            View::OwnerForm { owner, .. } | View::FindOwners { owner, .. } | View::OwnerDetails { owner } => {
                entry(&mut model, "owner", owner)
            }
            View::OwnersList { selections } => entry(&mut model, "selections", selections),
            View::PetForm { owner, pet, types, .. } => {
                entry(&mut model, "owner", owner);
                entry(&mut model, "pet", pet);
                entry(&mut model, "types", types);
            }
            View::VisitForm { owner, pet, visit, .. } => {
                entry(&mut model, "owner", owner);
                entry(&mut model, "pet", pet);
                entry(&mut model, "visit", visit);
            }
            View::VisitList { visits } => entry(&mut model, "visits", visits),
            View::VetList { vets } => entry(&mut model, "vets", vets),
            View::Error { status, message } => {
                entry(&mut model, "status", &status.as_u16());
                entry(&mut model, "message", message);
            }
        }
        model
    }

    pub fn errors(&self) -> Option<&BindingResult> {
        match self {
            View::OwnerForm { errors, .. }
            | View::FindOwners { errors, .. }
            | View::PetForm { errors, .. }
            | View::VisitForm { errors, .. } => Some(errors),
            _ => None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            View::Error { status, .. } => *status,
            _ => StatusCode::OK,
        }
    }
}

/// Response extension naming the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewName(pub &'static str);

/// Response extension with the rendered model and any field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub model: Map<String, Value>,
    pub errors: BindingResult,
}

impl IntoResponse for ModelAndView {
    fn into_response(self) -> Response {
        match self {
            ModelAndView::Render(view) => {
                let body = views::render(&view).into_string();
                let headers = [(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))];
                let mut response = (view.status(), headers, body).into_response();
                let extensions = response.extensions_mut();
                extensions.insert(ViewName(view.name()));
                extensions.insert(ViewModel { model: view.model(), errors: view.errors().cloned().unwrap_or_default() });
                response
            }
            ModelAndView::Redirect(to) => match HeaderValue::try_from(to) {
                Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            },
        }
    }
}
