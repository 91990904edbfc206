mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use chrono::NaiveDate;
use service::clinic::domain::{Owner, Pet};
use service::clinic::repository::memory::InMemoryClinicStore;
use service::clinic::repository::{OwnerRepository, PetRepository};
use service::ClinicServiceImpl;

use support::*;

/// Owner 1 (George Franklin) with a cat named Leo (pet 1).
async fn clinic() -> (Arc<InMemoryClinicStore>, Router) {
    let store = Arc::new(InMemoryClinicStore::new());
    let cat = store.add_pet_type("cat").await;
    store.add_pet_type("dog").await;

    let mut george = Owner { id: None, ..owner(0, "George", "Franklin") };
    OwnerRepository::save(store.as_ref(), &mut george).await.expect("owner saved");
    let mut leo = Pet {
        name: "Leo".into(),
        birth_date: NaiveDate::from_ymd_opt(2010, 9, 7),
        pet_type: Some(cat),
        owner_id: george.id,
        ..Pet::default()
    };
    PetRepository::save(store.as_ref(), &mut leo).await.expect("pet saved");

    let app = app_with(Arc::new(ClinicServiceImpl::with_store(store.clone())));
    (store, app)
}

async fn pets_of_owner_1(store: &InMemoryClinicStore) -> Vec<Pet> {
    OwnerRepository::find_by_id(store, 1).await.expect("lookup").expect("owner 1").pets
}

#[tokio::test]
async fn new_pet_form_lists_types() {
    let (_, app) = clinic().await;
    let res = send(app, get("/owners/1/pets/new")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("pets/createOrUpdatePetForm"));
    assert_eq!(view_model(&res).model["types"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn create_pet_redirects_and_persists() {
    let (store, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/new", "name=Betty&birthDate=2015-02-12&type=dog")).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/owners/1"));

    let pets = pets_of_owner_1(&store).await;
    let betty = pets.iter().find(|p| p.name == "Betty").expect("Betty saved");
    assert_eq!(betty.pet_type.as_ref().map(|t| t.name.as_str()), Some("dog"));
}

#[tokio::test]
async fn create_pet_with_bad_input_rerenders() {
    let (store, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/new", "name=&birthDate=12-02-2015&type=dragon")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("pets/createOrUpdatePetForm"));
    let errors = view_model(&res).errors;
    assert_eq!(errors.fields(), vec!["birthDate", "type", "name"]);
    assert_eq!(pets_of_owner_1(&store).await.len(), 1);
}

#[tokio::test]
async fn duplicate_pet_name_rejected() {
    let (_, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/new", "name=leo&birthDate=2015-02-12&type=cat")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let errors = view_model(&res).errors;
    assert_eq!(errors.field_errors("name").next().map(|e| e.code.as_str()), Some("duplicate"));
}

#[tokio::test]
async fn pet_for_unknown_owner_is_404() {
    let (_, app) = clinic().await;
    let res = send(app, get("/owners/9/pets/new")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_pet_roundtrip() {
    let (store, app) = clinic().await;
    let res = send(app.clone(), get("/owners/1/pets/1/edit")).await;
    assert_eq!(view_name(&res), Some("pets/createOrUpdatePetForm"));
    assert_eq!(view_model(&res).model["pet"]["name"], "Leo");

    let res = send(app, post_form("/owners/1/pets/1/edit", "name=Leonardo&birthDate=2010-09-07&type=cat")).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let pets = pets_of_owner_1(&store).await;
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].name, "Leonardo");
}

#[tokio::test]
async fn edit_unknown_pet_is_404() {
    let (_, app) = clinic().await;
    let res = send(app, get("/owners/1/pets/99/edit")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(view_name(&res), Some("error"));
}

#[tokio::test]
async fn posting_edit_for_unknown_pet_is_404() {
    let (store, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/99/edit", "name=Ghost&birthDate=2010-09-07&type=cat")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(view_name(&res), Some("error"));
    assert_eq!(pets_of_owner_1(&store).await.len(), 1);
}

#[tokio::test]
async fn pet_of_another_owner_is_404_on_edit() {
    let (store, app) = clinic().await;
    let mut betty = Owner { id: None, ..owner(0, "Betty", "Davis") };
    OwnerRepository::save(store.as_ref(), &mut betty).await.expect("owner saved");

    let res = send(app.clone(), get("/owners/2/pets/1/edit")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // No type posted: would otherwise reach the store without one.
    let res = send(app.clone(), post_form("/owners/2/pets/1/edit", "name=Leo&birthDate=2010-09-07&type=")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(pets_of_owner_1(&store).await[0].owner_id, Some(1));

    let res = send(app, post_form("/owners/2/pets/1/visits/new", "description=checkup")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_without_type_keeps_stored_type() {
    let (store, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/1/edit", "name=Leo&birthDate=2011-01-01&type=")).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let pets = pets_of_owner_1(&store).await;
    assert_eq!(pets[0].pet_type.as_ref().map(|t| t.name.as_str()), Some("cat"));
    assert_eq!(pets[0].birth_date, NaiveDate::from_ymd_opt(2011, 1, 1));
}

#[tokio::test]
async fn add_visit_then_list() {
    let (_, app) = clinic().await;
    let res = send(app.clone(), get("/owners/1/pets/1/visits/new")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("pets/createOrUpdateVisitForm"));

    let res = send(app.clone(), post_form("/owners/1/pets/1/visits/new", "date=2024-01-05&description=checkup")).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/owners/1"));

    let res = send(app.clone(), get("/owners/1/pets/1/visits")).await;
    assert_eq!(view_name(&res), Some("visitList"));
    let visits = view_model(&res).model["visits"].clone();
    assert_eq!(visits.as_array().map(Vec::len), Some(1));
    assert_eq!(visits[0]["date"], "2024-01-05");

    let html = body_string(send(app, get("/owners/1")).await).await;
    assert!(html.contains("checkup"));
}

#[tokio::test]
async fn visit_without_description_rerenders() {
    let (_, app) = clinic().await;
    let res = send(app, post_form("/owners/1/pets/1/visits/new", "date=2024-01-05&description=")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_model(&res).errors.fields(), vec!["description"]);
}
