use maud::{html, Markup};

use service::clinic::domain::Owner;
use service::clinic::validation::BindingResult;

use super::input_field;

pub(super) fn owner_form(owner: &Owner, errors: &BindingResult) -> Markup {
    let action = match owner.id {
        Some(id) => format!("/owners/{id}/edit"),
        None => "/owners/new".to_string(),
    };
    html! {
        h2 { "Owner" }
        form id="add-owner-form" method="post" action=(action) {
            (input_field("First Name", "firstName", &owner.first_name, "text", errors))
            (input_field("Last Name", "lastName", &owner.last_name, "text", errors))
            (input_field("Address", "address", &owner.address, "text", errors))
            (input_field("City", "city", &owner.city, "text", errors))
            (input_field("Telephone", "telephone", &owner.telephone, "text", errors))
            button type="submit" {
                @if owner.is_new() { "Add Owner" } @else { "Update Owner" }
            }
        }
    }
}

pub(super) fn find_owners(owner: &Owner, errors: &BindingResult) -> Markup {
    html! {
        h2 { "Find Owners" }
        form id="search-owner-form" method="get" action="/owners" {
            (input_field("Last name", "lastName", &owner.last_name, "text", errors))
            button type="submit" { "Find Owner" }
        }
        a href="/owners/new" { "Add Owner" }
    }
}

pub(super) fn owners_list(selections: &[Owner]) -> Markup {
    html! {
        h2 { "Owners" }
        table id="owners" {
            thead { tr { th { "Name" } th { "Address" } th { "City" } th { "Telephone" } th { "Pets" } } }
            tbody {
                @for owner in selections {
                    tr {
                        td {
                            @if let Some(id) = owner.id {
                                a href={ "/owners/" (id) } { (owner.full_name()) }
                            }
                        }
                        td { (owner.address) }
                        td { (owner.city) }
                        td { (owner.telephone) }
                        td { (owner.pets.iter().map(|p| p.name.as_str()).collect::<Vec<_>>().join(", ")) }
                    }
                }
            }
        }
    }
}

pub(super) fn owner_details(owner: &Owner) -> Markup {
    let id = owner.id.unwrap_or_default();
    html! {
        h2 { "Owner Information" }
        table class="owner" {
            tr { th { "Name" } td { b { (owner.full_name()) } } }
            tr { th { "Address" } td { (owner.address) } }
            tr { th { "City" } td { (owner.city) } }
            tr { th { "Telephone" } td { (owner.telephone) } }
        }
        a href={ "/owners/" (id) "/edit" } { "Edit Owner" }
        " "
        a href={ "/owners/" (id) "/pets/new" } { "Add New Pet" }

        h2 { "Pets and Visits" }
        @for pet in &owner.pets {
            @let pet_id = pet.id.unwrap_or_default();
            dl class="pet" {
                dt { "Name" } dd { (pet.name) }
                dt { "Birth Date" }
                dd { @if let Some(d) = pet.birth_date { (d.format("%Y-%m-%d")) } }
                dt { "Type" }
                dd { @if let Some(t) = &pet.pet_type { (t.name) } }
            }
            table class="visits" {
                thead { tr { th { "Visit Date" } th { "Description" } } }
                @for visit in &pet.visits {
                    tr { td { (visit.date.format("%Y-%m-%d")) } td { (visit.description) } }
                }
            }
            a href={ "/owners/" (id) "/pets/" (pet_id) "/edit" } { "Edit Pet" }
            " "
            a href={ "/owners/" (id) "/pets/" (pet_id) "/visits/new" } { "Add Visit" }
        }
    }
}
