use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct SpecialtyDoc { pub id: Option<i32>, pub name: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VetDoc {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<SpecialtyDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct VetsDoc {
    #[serde(rename = "vetList")]
    pub vet_list: Vec<VetDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::welcome::health,
        crate::routes::vets::show_resources_vet_list,
    ),
    components(schemas(HealthResponse, SpecialtyDoc, VetDoc, VetsDoc)),
    tags((name = "health"), (name = "vets"))
)]
pub struct ApiDoc;
