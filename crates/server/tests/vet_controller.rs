mod support;

use std::sync::Arc;

use axum::http::StatusCode;
use service::clinic::domain::{Vet, Vets};
use service::clinic::repository::memory::InMemoryClinicStore;
use service::errors::DataAccessError;
use service::ClinicServiceImpl;

use support::*;

async fn one_vet_app() -> axum::Router {
    let store = Arc::new(InMemoryClinicStore::new());
    store.add_vet("James", "Carter", &[]).await;
    app_with(Arc::new(ClinicServiceImpl::with_store(store)))
}

#[tokio::test]
async fn vet_list_page_carries_vets() {
    let res = send(one_vet_app().await, get("/vets.html")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("vets/vetList"));
    let vets = &view_model(&res).model["vets"];
    assert!(!vets.is_null());
    assert_eq!(vets["vetList"].as_array().map(Vec::len), Some(1));
    assert!(body_string(res).await.contains("James Carter"));
}

#[tokio::test]
async fn vet_resource_returns_wrapper() {
    let res = send(one_vet_app().await, get("/vets")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let vets: Vets = serde_json::from_str(&body_string(res).await).expect("vets json");
    assert_eq!(vets.vet_list.len(), 1);
    assert_eq!(vets.vet_list[0].last_name, "Carter");
}

#[tokio::test]
async fn each_path_queries_vets_once() {
    for path in ["/vets.html", "/vets"] {
        let mut clinic = MockClinic::new();
        clinic.expect_find_vets().times(1).returning(|| {
            Ok(vec![Vet { id: Some(1), first_name: "Helen".into(), last_name: "Leary".into(), specialties: Vec::new() }])
        });
        let res = send(app(clinic), get(path)).await;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn vet_failure_is_500() {
    let mut clinic = MockClinic::new();
    clinic.expect_find_vets().times(1).returning(|| Err(DataAccessError::Db("down".into())));
    let res = send(app(clinic), get("/vets.html")).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(view_name(&res), Some("error"));
}

#[tokio::test]
async fn welcome_health_and_docs() {
    let res = send(app(MockClinic::new()), get("/")).await;
    assert_eq!(view_name(&res), Some("welcome"));

    let res = send(app(MockClinic::new()), get("/health")).await;
    assert_eq!(body_string(res).await, r#"{"status":"ok"}"#);

    let res = send(app(MockClinic::new()), get("/api-docs/openapi.json")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_string(res).await.contains("/vets"));
}

#[tokio::test]
async fn oups_shows_error_page() {
    let res = send(app(MockClinic::new()), get("/oups")).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(view_name(&res), Some("error"));
}
