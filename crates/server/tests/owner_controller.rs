mod support;

use axum::http::StatusCode;
use mockall::predicate::eq;
use service::errors::DataAccessError;

use support::*;

const COMPLETE_OWNER: &str = "firstName=Joe&lastName=Bloggs&address=123+Caramel+Street&city=London&telephone=0131676163";

#[tokio::test]
async fn new_owner_form_is_empty() {
    let res = send(app(MockClinic::new()), get("/owners/new")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/createOrUpdateOwnerForm"));
    let model = view_model(&res);
    assert_eq!(model.model["owner"]["id"], serde_json::Value::Null);
    assert!(!model.errors.has_errors());
}

#[tokio::test]
async fn create_owner_redirects_to_details() {
    let mut clinic = MockClinic::new();
    clinic
        .expect_save_owner()
        .withf(|o| o.first_name == "Joe" && o.last_name == "Bloggs" && o.is_new())
        .times(1)
        .returning(|o| {
            o.id = Some(11);
            Ok(())
        });

    let res = send(app(clinic), post_form("/owners/new", COMPLETE_OWNER)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/owners/11"));
}

#[tokio::test]
async fn create_owner_with_missing_fields_rerenders_form() {
    let clinic = MockClinic::new();
    let res = send(app(clinic), post_form("/owners/new", "firstName=Joe&lastName=Bloggs&city=London")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/createOrUpdateOwnerForm"));
    let model = view_model(&res);
    assert_eq!(model.errors.fields(), vec!["address", "telephone"]);
    assert_eq!(model.model["owner"]["firstName"], "Joe");
}

#[tokio::test]
async fn create_owner_rejects_long_telephone() {
    let body = "firstName=Joe&lastName=Bloggs&address=1+Main&city=London&telephone=01316761638";
    let res = send(app(MockClinic::new()), post_form("/owners/new", body)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_model(&res).errors.fields(), vec!["telephone"]);
}

#[tokio::test]
async fn find_form_renders() {
    let res = send(app(MockClinic::new()), get("/owners/find")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/findOwners"));
}

#[tokio::test]
async fn search_with_single_match_redirects() {
    let mut clinic = MockClinic::new();
    clinic
        .expect_find_owner_by_last_name()
        .withf(|name| name == "Franklin")
        .times(1)
        .returning(|_| Ok(vec![owner(1, "George", "Franklin")]));

    let res = send(app(clinic), get("/owners?lastName=Franklin")).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/owners/1"));
}

#[tokio::test]
async fn search_without_name_lists_everyone() {
    let mut clinic = MockClinic::new();
    clinic
        .expect_find_owner_by_last_name()
        .withf(|name| name.is_empty())
        .times(1)
        .returning(|_| Ok(vec![owner(1, "George", "Franklin"), owner(2, "Betty", "Davis")]));

    let res = send(app(clinic), get("/owners")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/ownersList"));
    let selections = view_model(&res).model["selections"].as_array().map(Vec::len);
    assert_eq!(selections, Some(2));
}

#[tokio::test]
async fn search_without_match_reports_not_found() {
    let mut clinic = MockClinic::new();
    clinic.expect_find_owner_by_last_name().times(1).returning(|_| Ok(Vec::new()));

    let res = send(app(clinic), get("/owners?lastName=Unknown%20Surname")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/findOwners"));
    let model = view_model(&res);
    assert_eq!(model.errors.errors()[0].field, "lastName");
    assert_eq!(model.errors.errors()[0].code, "notFound");
    assert_eq!(model.model["owner"]["lastName"], "Unknown Surname");
}

#[tokio::test]
async fn show_owner_renders_details() {
    let mut clinic = MockClinic::new();
    clinic.expect_find_owner_by_id().with(eq(1)).times(1).returning(|_| Ok(Some(owner(1, "George", "Franklin"))));

    let res = send(app(clinic), get("/owners/1")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_name(&res), Some("owners/ownerDetails"));
    let html = body_string(res).await;
    assert!(html.contains("George Franklin"));
    assert!(html.contains("/owners/1/edit"));
}

#[tokio::test]
async fn unknown_owner_is_404() {
    let mut clinic = MockClinic::new();
    clinic.expect_find_owner_by_id().times(1).returning(|_| Ok(None));

    let res = send(app(clinic), get("/owners/77")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(view_name(&res), Some("error"));
}

#[tokio::test]
async fn data_access_failure_renders_error_page() {
    let mut clinic = MockClinic::new();
    clinic
        .expect_find_owner_by_last_name()
        .times(1)
        .returning(|_| Err(DataAccessError::Db("connection refused".into())));

    let res = send(app(clinic), get("/owners?lastName=Davis")).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(view_name(&res), Some("error"));
    let html = body_string(res).await;
    assert!(html.contains("Something happened while talking to the database."));
    assert!(!html.contains("connection refused"));
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let mut clinic = MockClinic::new();
    clinic.expect_find_owner_by_id().with(eq(1)).times(1).returning(|_| Ok(Some(owner(1, "George", "Franklin"))));

    let res = send(app(clinic), get("/owners/1/edit")).await;
    assert_eq!(view_name(&res), Some("owners/createOrUpdateOwnerForm"));
    assert_eq!(view_model(&res).model["owner"]["lastName"], "Franklin");
}

#[tokio::test]
async fn update_owner_keeps_path_id() {
    let mut clinic = MockClinic::new();
    clinic.expect_save_owner().withf(|o| o.id == Some(1) && o.city == "London").times(1).returning(|_| Ok(()));

    let res = send(app(clinic), post_form("/owners/1/edit", COMPLETE_OWNER)).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/owners/1"));
}

#[tokio::test]
async fn update_owner_with_errors_stays_on_form() {
    let res = send(app(MockClinic::new()), post_form("/owners/1/edit", "firstName=Joe")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(view_model(&res).errors.fields(), vec!["lastName", "address", "city", "telephone"]);
}
