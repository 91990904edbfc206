use std::collections::HashMap;

use sea_orm::{DatabaseConnection, EntityTrait};

use crate::clinic::domain::{Owner, Pet, PetType, Specialty, Vet, Visit};
use crate::clinic::repository::{OwnerRepository, PetRepository, VetRepository, VisitRepository};
use crate::errors::DataAccessError;

pub struct SeaOrmOwnerRepository {
    pub db: DatabaseConnection,
}

pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

pub struct SeaOrmVetRepository {
    pub db: DatabaseConnection,
}

pub struct SeaOrmVisitRepository {
    pub db: DatabaseConnection,
}

fn to_visit(v: models::visit::Model) -> Visit {
    Visit { id: Some(v.id), date: v.visit_date, description: v.description, pet_id: Some(v.pet_id) }
}

fn to_pet_type(t: models::pet_type::Model) -> PetType { PetType::new(t.id, t.name) }

/// Pets of the given owners with their types and visits, three queries in total.
async fn load_pets(db: &DatabaseConnection, owner_ids: &[i32]) -> Result<Vec<Pet>, DataAccessError> {
    let rows = models::pet::find_by_owner_ids(db, owner_ids).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut type_ids: Vec<i32> = rows.iter().map(|p| p.type_id).collect();
    type_ids.sort_unstable();
    type_ids.dedup();
    let types: HashMap<i32, PetType> = models::pet_type::find_by_ids(db, &type_ids)
        .await?
        .into_iter()
        .map(|t| (t.id, to_pet_type(t)))
        .collect();

    let pet_ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
    let mut visits: HashMap<i32, Vec<Visit>> = HashMap::new();
    for v in models::visit::find_by_pet_ids(db, &pet_ids).await? {
        visits.entry(v.pet_id).or_default().push(to_visit(v));
    }

    Ok(rows
        .into_iter()
        .map(|p| {
            let mut pet = Pet {
                id: Some(p.id),
                name: p.name,
                birth_date: Some(p.birth_date),
                pet_type: types.get(&p.type_id).cloned(),
                owner_id: Some(p.owner_id),
                visits: Vec::new(),
            };
            pet.set_visits(visits.remove(&p.id).unwrap_or_default());
            pet
        })
        .collect())
}

async fn attach_pets(db: &DatabaseConnection, rows: Vec<models::owner::Model>) -> Result<Vec<Owner>, DataAccessError> {
    let ids: Vec<i32> = rows.iter().map(|o| o.id).collect();
    let mut pets = load_pets(db, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|o| {
            let mut owner = Owner {
                id: Some(o.id),
                first_name: o.first_name,
                last_name: o.last_name,
                address: o.address,
                city: o.city,
                telephone: o.telephone,
                pets: Vec::new(),
            };
            let (mine, rest): (Vec<Pet>, Vec<Pet>) = pets.drain(..).partition(|p| p.owner_id == owner.id);
            pets = rest;
            for pet in mine {
                owner.add_pet(pet);
            }
            owner
        })
        .collect())
}

#[async_trait::async_trait]
impl OwnerRepository for SeaOrmOwnerRepository {
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError> {
        let rows = models::owner::find_by_last_name_prefix(&self.db, last_name).await?;
        attach_pets(&self.db, rows).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError> {
        let Some(row) = models::owner::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(attach_pets(&self.db, vec![row]).await?.pop())
    }

    async fn save(&self, owner: &mut Owner) -> Result<(), DataAccessError> {
        let m = models::owner::Model {
            id: owner.id.unwrap_or_default(),
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        };
        let saved = match owner.id {
            None => models::owner::insert(&self.db, m).await?,
            Some(_) => models::owner::update(&self.db, m).await?,
        };
        owner.id = Some(saved.id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError> {
        let types = models::pet_type::find_all(&self.db).await?;
        Ok(types.into_iter().map(to_pet_type).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError> {
        let Some(row) = models::pet::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let pet_type = models::pet_type::Entity::find_by_id(row.type_id).one(&self.db).await?;
        let mut pet = Pet {
            id: Some(row.id),
            name: row.name,
            birth_date: Some(row.birth_date),
            pet_type: pet_type.map(to_pet_type),
            owner_id: Some(row.owner_id),
            visits: Vec::new(),
        };
        let visits = models::visit::find_by_pet_id(&self.db, row.id).await?;
        pet.set_visits(visits.into_iter().map(to_visit).collect());
        Ok(Some(pet))
    }

    async fn save(&self, pet: &mut Pet) -> Result<(), DataAccessError> {
        let owner_id = pet.owner_id.ok_or_else(|| DataAccessError::Integrity("pet has no owner".into()))?;
        let type_id = pet
            .pet_type
            .as_ref()
            .and_then(|t| t.id)
            .ok_or_else(|| DataAccessError::Integrity("pet type required".into()))?;
        let birth_date = pet.birth_date.ok_or_else(|| DataAccessError::Integrity("pet birth date required".into()))?;
        let m = models::pet::Model {
            id: pet.id.unwrap_or_default(),
            name: pet.name.clone(),
            birth_date,
            type_id,
            owner_id,
        };
        let saved = match pet.id {
            None => models::pet::insert(&self.db, m).await?,
            Some(_) => models::pet::update(&self.db, m).await?,
        };
        pet.id = Some(saved.id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl VetRepository for SeaOrmVetRepository {
    async fn find_all(&self) -> Result<Vec<Vet>, DataAccessError> {
        let rows = models::vet::find_all(&self.db).await?;
        let ids: Vec<i32> = rows.iter().map(|v| v.id).collect();
        let mut by_vet: HashMap<i32, Vec<Specialty>> = HashMap::new();
        for (vet_id, s) in models::vet_specialty::find_specialties_for(&self.db, &ids).await? {
            by_vet.entry(vet_id).or_default().push(Specialty { id: Some(s.id), name: s.name });
        }
        Ok(rows
            .into_iter()
            .map(|v| {
                let mut vet = Vet { id: Some(v.id), first_name: v.first_name, last_name: v.last_name, specialties: Vec::new() };
                for s in by_vet.remove(&v.id).unwrap_or_default() {
                    vet.add_specialty(s);
                }
                vet
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl VisitRepository for SeaOrmVisitRepository {
    async fn save(&self, visit: &mut Visit) -> Result<(), DataAccessError> {
        let pet_id = visit.pet_id.ok_or_else(|| DataAccessError::Integrity("visit has no pet".into()))?;
        let m = models::visit::Model {
            id: visit.id.unwrap_or_default(),
            pet_id,
            visit_date: visit.date,
            description: visit.description.clone(),
        };
        let saved = match visit.id {
            None => models::visit::insert(&self.db, m).await?,
            Some(_) => models::visit::update(&self.db, m).await?,
        };
        visit.id = Some(saved.id);
        Ok(())
    }

    async fn find_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError> {
        let rows = models::visit::find_by_pet_id(&self.db, pet_id).await?;
        Ok(rows.into_iter().map(to_visit).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, get_seeded_db};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn finds_owners_by_last_name_with_pets() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let repo = SeaOrmOwnerRepository { db };

        let davis = repo.find_by_last_name("Davis").await?;
        assert_eq!(davis.len(), 2);
        assert_eq!(davis[0].first_name, "Betty");
        assert_eq!(davis[0].pets[0].name, "Basil");
        assert_eq!(davis[0].pets[0].pet_type.as_ref().map(|t| t.name.as_str()), Some("hamster"));

        assert!(repo.find_by_last_name("Daviss").await?.is_empty());
        assert_eq!(repo.find_by_last_name("").await?.len(), 10);
        Ok(())
    }

    #[tokio::test]
    async fn last_name_search_ignores_case_and_wildcards() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let repo = SeaOrmOwnerRepository { db };

        let davis = repo.find_by_last_name("davis").await?;
        assert_eq!(davis.iter().map(|o| o.first_name.as_str()).collect::<Vec<_>>(), vec!["Betty", "Harold"]);
        assert_eq!(repo.find_by_last_name("DAV").await?.len(), 2);
        assert!(repo.find_by_last_name("%").await?.is_empty());
        assert!(repo.find_by_last_name("_avis").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn owner_by_id_carries_pets_and_visits() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let repo = SeaOrmOwnerRepository { db };

        let coleman = repo.find_by_id(6).await?.expect("owner 6");
        assert_eq!(coleman.last_name, "Coleman");
        let names: Vec<&str> = coleman.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);
        let samantha = coleman.get_pet("Samantha", true).expect("Samantha");
        assert_eq!(samantha.visits.len(), 2);
        assert_eq!(samantha.visits[0].description, "spayed");

        assert!(repo.find_by_id(999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn owner_save_inserts_then_updates() -> anyhow::Result<()> {
        let db = get_db().await?;
        let repo = SeaOrmOwnerRepository { db };
        let mut owner = Owner {
            first_name: "Sam".into(),
            last_name: "Schultz".into(),
            address: "4, Evans Street".into(),
            city: "Wollongong".into(),
            telephone: "4444444444".into(),
            ..Owner::default()
        };
        repo.save(&mut owner).await?;
        let id = owner.id.expect("assigned id");

        owner.city = "Sydney".into();
        repo.save(&mut owner).await?;
        assert_eq!(owner.id, Some(id));
        let stored = repo.find_by_id(id).await?.expect("stored owner");
        assert_eq!(stored.city, "Sydney");

        let mut ghost = Owner { id: Some(404), ..owner.clone() };
        assert!(matches!(repo.save(&mut ghost).await, Err(DataAccessError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn pet_save_and_lookup() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let pets = SeaOrmPetRepository { db: db.clone() };
        let owners = SeaOrmOwnerRepository { db };

        let types = pets.find_pet_types().await?;
        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["bird", "cat", "dog", "hamster", "lizard", "snake"]);

        let dog = types.iter().find(|t| t.name == "dog").cloned();
        let mut bowser = Pet {
            name: "bowser".into(),
            birth_date: NaiveDate::from_ymd_opt(2020, 2, 2),
            pet_type: dog,
            owner_id: Some(6),
            ..Pet::default()
        };
        pets.save(&mut bowser).await?;
        let id = bowser.id.expect("assigned id");

        let found = pets.find_by_id(id).await?.expect("saved pet");
        assert_eq!(found.pet_type.map(|t| t.name), Some("dog".to_string()));
        let coleman = owners.find_by_id(6).await?.expect("owner 6");
        assert_eq!(coleman.pets.len(), 3);

        let mut untyped = Pet { name: "nobody".into(), owner_id: Some(6), ..Pet::default() };
        assert!(matches!(pets.save(&mut untyped).await, Err(DataAccessError::Integrity(_))));
        Ok(())
    }

    #[tokio::test]
    async fn visits_saved_and_listed_newest_first() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let visits = SeaOrmVisitRepository { db };

        let mut visit = Visit {
            date: NaiveDate::from_ymd_opt(2014, 5, 5).expect("date"),
            description: "checkup".into(),
            pet_id: Some(7),
            ..Visit::new()
        };
        visits.save(&mut visit).await?;
        assert!(visit.id.is_some());

        let listed = visits.find_by_pet_id(7).await?;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].description, "checkup");
        assert!(visits.find_by_pet_id(1).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn vets_come_with_sorted_specialties() -> anyhow::Result<()> {
        let db = get_seeded_db().await?;
        let vets = SeaOrmVetRepository { db }.find_all().await?;
        assert_eq!(vets.len(), 6);
        let douglas = vets.iter().find(|v| v.last_name == "Douglas").expect("Douglas");
        let names: Vec<&str> = douglas.specialties.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["dentistry", "surgery"]);
        let carter = vets.iter().find(|v| v.last_name == "Carter").expect("Carter");
        assert_eq!(carter.nr_of_specialties(), 0);
        Ok(())
    }
}
