//! Sample data for demos and local runs: the classic clinic with six vets,
//! ten owners and their pets.

use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};
use tracing::info;

use crate::{errors::ModelError, owner, pet, pet_type, specialty, vet, vet_specialty, visit};

const SPECIALTIES: [&str; 3] = ["radiology", "surgery", "dentistry"];

/// `(first, last, specialty indexes)`
const VETS: [(&str, &str, &[usize]); 6] = [
    ("James", "Carter", &[]),
    ("Helen", "Leary", &[0]),
    ("Linda", "Douglas", &[1, 2]),
    ("Rafael", "Ortega", &[1]),
    ("Henry", "Stevens", &[0]),
    ("Sharon", "Jenkins", &[]),
];

const PET_TYPES: [&str; 6] = ["cat", "dog", "lizard", "snake", "bird", "hamster"];

/// `(first, last, address, city, telephone)`
const OWNERS: [(&str, &str, &str, &str, &str); 10] = [
    ("George", "Franklin", "110 W. Liberty St.", "Madison", "6085551023"),
    ("Betty", "Davis", "638 Cardinal Ave.", "Sun Prairie", "6085551749"),
    ("Eduardo", "Rodriquez", "2693 Commerce St.", "McFarland", "6085558763"),
    ("Harold", "Davis", "563 Friendly St.", "Windsor", "6085553198"),
    ("Peter", "McTavish", "2387 S. Fair Way", "Madison", "6085552765"),
    ("Jean", "Coleman", "105 N. Lake St.", "Monona", "6085552654"),
    ("Jeff", "Black", "1450 Oak Blvd.", "Monona", "6085555387"),
    ("Maria", "Escobito", "345 Maple St.", "Madison", "6085557683"),
    ("David", "Schroeder", "2749 Blackhawk Trail", "Madison", "6085559435"),
    ("Carlos", "Estaban", "2335 Independence La.", "Waunakee", "6085555487"),
];

/// `(name, birth date, type index, owner index)`
const PETS: [(&str, (i32, u32, u32), usize, usize); 13] = [
    ("Leo", (2010, 9, 7), 0, 0),
    ("Basil", (2012, 8, 6), 5, 1),
    ("Rosy", (2011, 4, 17), 1, 2),
    ("Jewel", (2010, 3, 7), 1, 2),
    ("Iggy", (2010, 11, 30), 2, 3),
    ("George", (2010, 1, 20), 3, 4),
    ("Samantha", (2012, 9, 4), 0, 5),
    ("Max", (2012, 9, 4), 0, 5),
    ("Lucky", (2011, 8, 6), 4, 6),
    ("Mulligan", (2007, 2, 24), 1, 7),
    ("Freddy", (2010, 3, 9), 4, 8),
    ("Lucky", (2010, 6, 24), 1, 9),
    ("Sly", (2012, 6, 8), 0, 9),
];

/// `(pet index, date, description)`
const VISITS: [(usize, (i32, u32, u32), &str); 4] = [
    (6, (2013, 1, 1), "rabies shot"),
    (7, (2013, 1, 2), "rabies shot"),
    (7, (2013, 1, 3), "neutered"),
    (6, (2013, 1, 4), "spayed"),
];

fn date((y, m, d): (i32, u32, u32)) -> Result<NaiveDate, ModelError> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| ModelError::Validation(format!("invalid date {y}-{m}-{d}")))
}

/// Insert the sample data in one transaction. Does nothing and returns
/// `false` when the database already holds owners.
pub async fn populate_sample_data(db: &DatabaseConnection) -> Result<bool, ModelError> {
    if owner::Entity::find().count(db).await? > 0 {
        info!(event = "seed_skipped", "owners present; sample data not loaded");
        return Ok(false);
    }

    let txn = db.begin().await?;

    let mut specialty_ids = Vec::with_capacity(SPECIALTIES.len());
    for name in SPECIALTIES {
        specialty_ids.push(specialty::create(&txn, name).await?.id);
    }
    for (first, last, specs) in VETS {
        let v = vet::create(&txn, first, last).await?;
        for &idx in specs {
            vet_specialty::link(&txn, v.id, specialty_ids[idx]).await?;
        }
    }

    let mut type_ids = Vec::with_capacity(PET_TYPES.len());
    for name in PET_TYPES {
        type_ids.push(pet_type::create(&txn, name).await?.id);
    }

    let mut owner_ids = Vec::with_capacity(OWNERS.len());
    for (first_name, last_name, address, city, telephone) in OWNERS {
        let o = owner::insert(
            &txn,
            owner::Model {
                id: 0,
                first_name: first_name.into(),
                last_name: last_name.into(),
                address: address.into(),
                city: city.into(),
                telephone: telephone.into(),
            },
        )
        .await?;
        owner_ids.push(o.id);
    }

    let mut pet_ids = Vec::with_capacity(PETS.len());
    for (name, birth, type_idx, owner_idx) in PETS {
        let p = pet::insert(
            &txn,
            pet::Model { id: 0, name: name.into(), birth_date: date(birth)?, type_id: type_ids[type_idx], owner_id: owner_ids[owner_idx] },
        )
        .await?;
        pet_ids.push(p.id);
    }

    for (pet_idx, on, description) in VISITS {
        visit::insert(
            &txn,
            visit::Model { id: 0, pet_id: pet_ids[pet_idx], visit_date: date(on)?, description: description.into() },
        )
        .await?;
    }

    txn.commit().await?;
    info!(
        event = "seed_loaded",
        vets = VETS.len(),
        owners = OWNERS.len(),
        pets = PETS.len(),
        visits = VISITS.len(),
        "sample data loaded"
    );
    Ok(true)
}
