use maud::{html, Markup};

use service::clinic::domain::Vets;

pub(super) fn vet_list(vets: &Vets) -> Markup {
    html! {
        h2 { "Veterinarians" }
        table id="vets" {
            thead { tr { th { "Name" } th { "Specialties" } } }
            tbody {
                @for vet in &vets.vet_list {
                    tr {
                        td { (vet.first_name) " " (vet.last_name) }
                        td {
                            @if vet.nr_of_specialties() == 0 {
                                "none"
                            } @else {
                                (vet.specialties.iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(" "))
                            }
                        }
                    }
                }
            }
        }
        a href="/vets" { "View as JSON" }
    }
}
