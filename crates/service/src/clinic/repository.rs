use async_trait::async_trait;

use super::domain::{Owner, Pet, PetType, Vet, Visit};
use crate::errors::DataAccessError;

/// Persistence of owners. `find_*` results carry the owners' pets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Owners whose last name starts with `last_name`, ignoring case.
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError>;
    /// Insert when new (assigning `owner.id`), update otherwise.
    async fn save(&self, owner: &mut Owner) -> Result<(), DataAccessError>;
}

/// Persistence of pets and the pet type catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError>;
    async fn save(&self, pet: &mut Pet) -> Result<(), DataAccessError>;
}

/// Read-only access to vets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Vet>, DataAccessError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn save(&self, visit: &mut Visit) -> Result<(), DataAccessError>;
    async fn find_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError>;
}

/// In-memory implementation of all four repositories, for tests, doc
/// examples and running the web layer without a database.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    use crate::clinic::domain::Specialty;

    #[derive(Default)]
    struct Tables {
        owners: BTreeMap<i32, Owner>,
        pets: BTreeMap<i32, Pet>,
        visits: BTreeMap<i32, Visit>,
        vets: BTreeMap<i32, Vet>,
        pet_types: BTreeMap<i32, PetType>,
        next_owner: i32,
        next_pet: i32,
        next_visit: i32,
        next_vet: i32,
        next_type: i32,
    }

    fn next(seq: &mut i32) -> i32 {
        *seq += 1;
        *seq
    }

    impl Tables {
        fn visits_of(&self, pet_id: i32) -> Vec<Visit> {
            self.visits.values().filter(|v| v.pet_id == Some(pet_id)).cloned().collect()
        }

        fn compose_pet(&self, stored: &Pet) -> Pet {
            let mut pet = stored.clone();
            if let Some(id) = pet.id {
                pet.set_visits(self.visits_of(id));
            }
            pet
        }

        fn compose_owner(&self, stored: &Owner) -> Owner {
            let mut owner = stored.clone();
            owner.pets.clear();
            let owner_id = owner.id;
            for pet in self.pets.values().filter(|p| p.owner_id == owner_id) {
                let pet = self.compose_pet(pet);
                owner.add_pet(pet);
            }
            owner
        }
    }

    #[derive(Default)]
    pub struct InMemoryClinicStore {
        tables: RwLock<Tables>,
    }

    impl InMemoryClinicStore {
        pub fn new() -> Self { Self::default() }

        /// Register a vet, assigning ids to it and to new specialties.
        pub async fn add_vet(&self, first_name: &str, last_name: &str, specialties: &[&str]) -> Vet {
            let mut t = self.tables.write().await;
            let id = next(&mut t.next_vet);
            let mut vet = Vet { id: Some(id), first_name: first_name.into(), last_name: last_name.into(), specialties: Vec::new() };
            for (i, name) in specialties.iter().enumerate() {
                vet.add_specialty(Specialty { id: Some(id * 100 + i as i32), name: (*name).to_string() });
            }
            t.vets.insert(id, vet.clone());
            vet
        }

        pub async fn add_pet_type(&self, name: &str) -> PetType {
            let mut t = self.tables.write().await;
            let id = next(&mut t.next_type);
            let pet_type = PetType::new(id, name);
            t.pet_types.insert(id, pet_type.clone());
            pet_type
        }
    }

    #[async_trait]
    impl OwnerRepository for InMemoryClinicStore {
        async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError> {
            let t = self.tables.read().await;
            let prefix = last_name.to_lowercase();
            let mut found: Vec<Owner> = t
                .owners
                .values()
                .filter(|o| o.last_name.to_lowercase().starts_with(&prefix))
                .map(|o| t.compose_owner(o))
                .collect();
            found.sort_by(|a, b| {
                a.last_name.cmp(&b.last_name).then_with(|| a.first_name.cmp(&b.first_name)).then_with(|| a.id.cmp(&b.id))
            });
            Ok(found)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError> {
            let t = self.tables.read().await;
            Ok(t.owners.get(&id).map(|o| t.compose_owner(o)))
        }

        async fn save(&self, owner: &mut Owner) -> Result<(), DataAccessError> {
            let mut t = self.tables.write().await;
            let id = match owner.id {
                Some(id) if t.owners.contains_key(&id) => id,
                Some(id) => return Err(DataAccessError::not_found("owner", id)),
                None => next(&mut t.next_owner),
            };
            owner.id = Some(id);
            let mut stored = owner.clone();
            stored.pets.clear();
            t.owners.insert(id, stored);
            Ok(())
        }
    }

    #[async_trait]
    impl PetRepository for InMemoryClinicStore {
        async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError> {
            let t = self.tables.read().await;
            let mut types: Vec<PetType> = t.pet_types.values().cloned().collect();
            types.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(types)
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError> {
            let t = self.tables.read().await;
            Ok(t.pets.get(&id).map(|p| t.compose_pet(p)))
        }

        async fn save(&self, pet: &mut Pet) -> Result<(), DataAccessError> {
            let mut t = self.tables.write().await;
            match pet.owner_id {
                Some(owner_id) if t.owners.contains_key(&owner_id) => {}
                Some(owner_id) => return Err(DataAccessError::not_found("owner", owner_id)),
                None => return Err(DataAccessError::Integrity("pet has no owner".into())),
            }
            match pet.pet_type.as_ref().and_then(|ty| ty.id) {
                Some(type_id) if t.pet_types.contains_key(&type_id) => {}
                _ => return Err(DataAccessError::Integrity("pet type required".into())),
            }
            let id = match pet.id {
                Some(id) if t.pets.contains_key(&id) => id,
                Some(id) => return Err(DataAccessError::not_found("pet", id)),
                None => next(&mut t.next_pet),
            };
            pet.id = Some(id);
            let mut stored = pet.clone();
            stored.visits.clear();
            t.pets.insert(id, stored);
            Ok(())
        }
    }

    #[async_trait]
    impl VetRepository for InMemoryClinicStore {
        async fn find_all(&self) -> Result<Vec<Vet>, DataAccessError> {
            let t = self.tables.read().await;
            let mut vets: Vec<Vet> = t.vets.values().cloned().collect();
            vets.sort_by(|a, b| a.last_name.cmp(&b.last_name).then_with(|| a.first_name.cmp(&b.first_name)));
            Ok(vets)
        }
    }

    #[async_trait]
    impl VisitRepository for InMemoryClinicStore {
        async fn save(&self, visit: &mut Visit) -> Result<(), DataAccessError> {
            let mut t = self.tables.write().await;
            match visit.pet_id {
                Some(pet_id) if t.pets.contains_key(&pet_id) => {}
                Some(pet_id) => return Err(DataAccessError::not_found("pet", pet_id)),
                None => return Err(DataAccessError::Integrity("visit has no pet".into())),
            }
            let id = match visit.id {
                Some(id) if t.visits.contains_key(&id) => id,
                Some(id) => return Err(DataAccessError::not_found("visit", id)),
                None => next(&mut t.next_visit),
            };
            visit.id = Some(id);
            t.visits.insert(id, visit.clone());
            Ok(())
        }

        async fn find_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError> {
            let t = self.tables.read().await;
            let mut visits = t.visits_of(pet_id);
            visits.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
            Ok(visits)
        }
    }

}
