use actix_web::{App, http::StatusCode, test, web};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use fieldservice_crm::domain::client::NewClient;
use fieldservice_crm::domain::intervention::NewIntervention;
use fieldservice_crm::models::config::{CalendarSettings, ServerConfig};
use fieldservice_crm::repository::{
    ClientReader, ClientWriter, InterventionListQuery, InterventionReader, InterventionWriter,
};
use fieldservice_crm::routes::api::{delete_client, list_clients, notify_completion};

mod common;

fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        operational_database_url: String::new(),
        billing_database_url: String::new(),
        calendar: CalendarSettings::default(),
    }
}

macro_rules! spawn_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .service(
                    web::scope("/api")
                        .service(list_clients)
                        .service(delete_client)
                        .service(notify_completion),
                )
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new(reqwest::Client::new()))
                .app_data(web::Data::new(server_config())),
        )
        .await
    };
}

#[actix_web::test]
async fn client_list_carries_intervention_counts() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_clients(&[NewClient::individual("Jean", "Dupont")])
        .unwrap();
    let client = repo.list_clients().unwrap().remove(0);
    repo.create_interventions(&[NewIntervention::new(client.id, "INT-1", date(2026, 2, 1))])
        .unwrap();

    let app = spawn_app!(repo);
    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["last_name"], "Dupont");
    assert_eq!(body[0]["intervention_count"], 1);
}

#[actix_web::test]
async fn delete_endpoint_maps_the_guard_outcomes() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_clients(&[
        NewClient::individual("Jean", "Dupont"),
        NewClient::individual("Marie", "Durand"),
    ])
    .unwrap();
    let clients = repo.list_clients().unwrap();
    let (dupont, durand) = (clients[0].id, clients[1].id);
    repo.create_interventions(&[NewIntervention::new(dupont, "INT-1", date(2026, 2, 1))])
        .unwrap();

    let app = spawn_app!(repo);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/clients/{}", dupont.get()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["interventionCount"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/clients/{}", durand.get()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body.get("interventionCount").is_none());

    let req = test::TestRequest::delete()
        .uri("/api/v1/clients/999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn notify_endpoint_reports_structured_outcomes() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    repo.create_clients(&[NewClient::individual("Jean", "Dupont")])
        .unwrap();
    let client = repo.list_clients().unwrap().remove(0);
    repo.create_interventions(&[
        NewIntervention::new(client.id, "INT-1", date(2026, 2, 1)).gcal_event_id("evt-1"),
        NewIntervention::new(client.id, "INT-2", date(2026, 2, 2)),
    ])
    .unwrap();
    let interventions = repo.list_interventions(InterventionListQuery::new()).unwrap();
    let (with_event, without_event) = (interventions[0].id, interventions[1].id);

    let app = spawn_app!(repo);

    // No endpoint configured: acknowledged but inert.
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/v1/interventions/{}/notify-completion",
            with_event.get()
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["result"]["status"], "misconfigured");

    // No calendar event id: skipped.
    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/v1/interventions/{}/notify-completion",
            without_event.get()
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["result"]["status"], "skipped");

    // Unknown intervention: 404.
    let req = test::TestRequest::post()
        .uri("/api/v1/interventions/999/notify-completion")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
