//! HTML templates, one function per view name.

mod owners;
mod pets;
mod vets;

use maud::{html, Markup, DOCTYPE};

use service::clinic::validation::BindingResult;

use crate::mvc::View;

pub fn render(view: &View) -> Markup {
    let body = match view {
        View::Welcome => welcome(),
        View::OwnerForm { owner, errors } => owners::owner_form(owner, errors),
        View::FindOwners { owner, errors } => owners::find_owners(owner, errors),
        View::OwnersList { selections } => owners::owners_list(selections),
        View::OwnerDetails { owner } => owners::owner_details(owner),
        View::PetForm { owner, pet, types, errors } => pets::pet_form(owner, pet, types, errors),
        View::VisitForm { owner, pet, visit, errors } => pets::visit_form(owner, pet, visit, errors),
        View::VisitList { visits } => pets::visit_list(visits),
        View::VetList { vets } => vets::vet_list(vets),
        View::Error { status, message } => error_page(status.as_u16(), message),
    };
    layout(body)
}

fn layout(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "PetClinic :: a Rust demonstration" }
                link rel="stylesheet" href="/resources/css/petclinic.css";
            }
            body {
                nav {
                    a href="/" { "Home" }
                    a href="/owners/find" { "Find owners" }
                    a href="/vets.html" { "Veterinarians" }
                    a href="/oups" title="trigger a server error" { "Error" }
                }
                main { (body) }
            }
        }
    }
}

fn welcome() -> Markup {
    html! {
        h2 { "Welcome" }
        p { "Find an owner, register their pets and record visits, or browse our veterinarians." }
    }
}

fn error_page(status: u16, message: &str) -> Markup {
    html! {
        h2 { "Something happened..." }
        p class="status" { (status) }
        p class="message" { (message) }
    }
}

/// Labelled text input with the first error for `name` shown under it.
pub(crate) fn input_field(label: &str, name: &str, value: &str, kind: &str, errors: &BindingResult) -> Markup {
    let invalid = errors.has_field_errors(name);
    html! {
        div.form-group.has-error[invalid] {
            label for=(name) { (label) }
            input id=(name) name=(name) type=(kind) value=(value);
            @if let Some(message) = errors.message(name) {
                span class="help-inline" { (message) }
            }
        }
    }
}
