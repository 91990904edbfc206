use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pet owner with their pets (pets kept ordered by name).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    pub fn is_new(&self) -> bool { self.id.is_none() }

    pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }

    /// Attach a pet, replacing one with the same id, and keep name order.
    pub fn add_pet(&mut self, mut pet: Pet) {
        pet.owner_id = self.id;
        match pet.id {
            Some(id) => match self.pets.iter_mut().find(|p| p.id == Some(id)) {
                Some(existing) => *existing = pet,
                None => self.pets.push(pet),
            },
            None => self.pets.push(pet),
        }
        self.pets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    /// Case-insensitive lookup by pet name, optionally skipping unsaved pets.
    pub fn get_pet(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.to_lowercase();
        self.pets
            .iter()
            .filter(|p| !(ignore_new && p.is_new()))
            .find(|p| p.name.to_lowercase() == wanted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Option<i32>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    pub owner_id: Option<i32>,
    /// Most recent first.
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Pet {
    pub fn is_new(&self) -> bool { self.id.is_none() }

    pub fn add_visit(&mut self, mut visit: Visit) {
        visit.pet_id = self.id;
        self.visits.push(visit);
        self.sort_visits();
    }

    pub fn set_visits(&mut self, visits: Vec<Visit>) {
        self.visits = visits;
        self.sort_visits();
    }

    fn sort_visits(&mut self) {
        self.visits.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PetType {
    pub id: Option<i32>,
    pub name: String,
}

impl PetType {
    pub fn new(id: i32, name: impl Into<String>) -> Self { Self { id: Some(id), name: name.into() } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: Option<i32>,
    pub date: NaiveDate,
    pub description: String,
    pub pet_id: Option<i32>,
}

impl Visit {
    /// A new visit dated today.
    pub fn new() -> Self {
        Self { id: None, date: Local::now().date_naive(), description: String::new(), pet_id: None }
    }

    pub fn is_new(&self) -> bool { self.id.is_none() }
}

impl Default for Visit {
    fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    /// Ordered by name.
    #[serde(default)]
    pub specialties: Vec<Specialty>,
}

impl Vet {
    pub fn add_specialty(&mut self, specialty: Specialty) {
        if !self.specialties.contains(&specialty) {
            self.specialties.push(specialty);
            self.specialties.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    pub fn nr_of_specialties(&self) -> usize { self.specialties.len() }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Specialty {
    pub id: Option<i32>,
    pub name: String,
}

/// Vet list wrapper for the JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vets {
    #[serde(rename = "vetList")]
    pub vet_list: Vec<Vet>,
}

impl From<Vec<Vet>> for Vets {
    fn from(vet_list: Vec<Vet>) -> Self { Self { vet_list } }
}
