#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use mockall::mock;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::mvc::{ViewModel, ViewName};
use server::{build_router, ServerState};
use service::clinic::domain::{Owner, Pet, PetType, Vet, Visit};
use service::errors::DataAccessError;
use service::ClinicService;

mock! {
    pub Clinic {}

    #[async_trait]
    impl ClinicService for Clinic {
        async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError>;
        async fn find_owner_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError>;
        async fn find_owner_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError>;
        async fn save_owner(&self, owner: &mut Owner) -> Result<(), DataAccessError>;
        async fn save_pet(&self, pet: &mut Pet) -> Result<(), DataAccessError>;
        async fn save_visit(&self, visit: &mut Visit) -> Result<(), DataAccessError>;
        async fn find_pet_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError>;
        async fn find_vets(&self) -> Result<Vec<Vet>, DataAccessError>;
        async fn find_visits_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError>;
    }
}

pub fn app_with(clinic: Arc<dyn ClinicService>) -> Router {
    build_router(ServerState::new(clinic), CorsLayer::very_permissive(), "static")
}

pub fn app(clinic: MockClinic) -> Router { app_with(Arc::new(clinic)) }

pub async fn send(app: Router, req: Request<Body>) -> Response {
    app.oneshot(req).await.expect("router is infallible")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn view_name(res: &Response) -> Option<&'static str> { res.extensions().get::<ViewName>().map(|v| v.0) }

pub fn view_model(res: &Response) -> ViewModel {
    res.extensions().get::<ViewModel>().cloned().expect("rendered view carries its model")
}

pub fn location(res: &Response) -> Option<String> {
    res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()).map(str::to_string)
}

pub async fn body_string(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn owner(id: i32, first: &str, last: &str) -> Owner {
    Owner {
        id: Some(id),
        first_name: first.into(),
        last_name: last.into(),
        address: "110 W. Liberty St.".into(),
        city: "Madison".into(),
        telephone: "6085551023".into(),
        pets: Vec::new(),
    }
}
