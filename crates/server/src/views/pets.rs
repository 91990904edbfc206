use maud::{html, Markup};

use service::clinic::domain::{Owner, Pet, PetType, Visit};
use service::clinic::validation::BindingResult;

use super::input_field;

pub(super) fn pet_form(owner: &Owner, pet: &Pet, types: &[PetType], errors: &BindingResult) -> Markup {
    let owner_id = owner.id.unwrap_or_default();
    let action = match pet.id {
        Some(pet_id) => format!("/owners/{owner_id}/pets/{pet_id}/edit"),
        None => format!("/owners/{owner_id}/pets/new"),
    };
    let birth_date = pet.birth_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    let selected = pet.pet_type.as_ref().map(|t| t.name.as_str());
    html! {
        h2 { @if pet.is_new() { "New " } "Pet" }
        form method="post" action=(action) {
            div.form-group {
                label { "Owner" }
                span { (owner.full_name()) }
            }
            (input_field("Name", "name", &pet.name, "text", errors))
            (input_field("Birth Date", "birthDate", &birth_date, "date", errors))
            div.form-group.has-error[errors.has_field_errors("type")] {
                label for="type" { "Type" }
                select id="type" name="type" {
                    @for t in types {
                        option value=(t.name) selected[selected == Some(t.name.as_str())] { (t.name) }
                    }
                }
                @if let Some(message) = errors.message("type") {
                    span class="help-inline" { (message) }
                }
            }
            button type="submit" {
                @if pet.is_new() { "Add Pet" } @else { "Update Pet" }
            }
        }
    }
}

pub(super) fn visit_form(owner: &Owner, pet: &Pet, visit: &Visit, errors: &BindingResult) -> Markup {
    let owner_id = owner.id.unwrap_or_default();
    let pet_id = pet.id.unwrap_or_default();
    let date = visit.date.format("%Y-%m-%d").to_string();
    html! {
        h2 { "New Visit" }
        b { "Pet" }
        table class="pet" {
            thead { tr { th { "Name" } th { "Birth Date" } th { "Type" } th { "Owner" } } }
            tr {
                td { (pet.name) }
                td { @if let Some(d) = pet.birth_date { (d.format("%Y-%m-%d")) } }
                td { @if let Some(t) = &pet.pet_type { (t.name) } }
                td { (owner.full_name()) }
            }
        }
        form method="post" action={ "/owners/" (owner_id) "/pets/" (pet_id) "/visits/new" } {
            (input_field("Date", "date", &date, "date", errors))
            (input_field("Description", "description", &visit.description, "text", errors))
            button type="submit" { "Add Visit" }
        }
        b { "Previous Visits" }
        (visit_table(&pet.visits))
    }
}

pub(super) fn visit_list(visits: &[Visit]) -> Markup {
    html! {
        h2 { "Visits" }
        (visit_table(visits))
    }
}

fn visit_table(visits: &[Visit]) -> Markup {
    html! {
        table class="visits" {
            tr { th { "Date" } th { "Description" } }
            @for visit in visits {
                tr { td { (visit.date.format("%Y-%m-%d")) } td { (visit.description) } }
            }
        }
    }
}
