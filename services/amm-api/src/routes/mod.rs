pub mod certificates;
pub mod common;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod login;
pub mod maintenance;
pub mod missions;
pub mod notifications;
pub mod parts;
pub mod problems;
pub mod reports;
pub mod status;
pub mod users;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Fixed mission paths are registered ahead of /v1/missions/{reference}.
    cfg.service(health::health)
        .service(status::status)
        .service(login::login)
        .service(missions::list_missions)
        .service(missions::report_candidates)
        .service(missions::get_mission)
        .service(missions::create_mission)
        .service(missions::update_mission_status)
        .service(missions::delete_mission)
        .service(notifications::list_notifications)
        .service(notifications::resolve_notification)
        .service(reports::submit_report)
        .service(reports::list_reports)
        .service(reports::get_report)
        .service(reports::review_report)
        .service(reports::download_attachment)
        .service(problems::list_problems)
        .service(problems::get_problem)
        .service(problems::create_problem)
        .service(problems::update_problem_status)
        .service(parts::list_parts)
        .service(parts::low_stock)
        .service(parts::usage_history)
        .service(parts::upsert_part)
        .service(parts::use_parts)
        .service(parts::delete_part)
        .service(maintenance::list_maintenance)
        .service(maintenance::get_maintenance)
        .service(maintenance::create_maintenance)
        .service(certificates::list_certificates)
        .service(certificates::create_certificate)
        .service(certificates::download_certificate)
        .service(certificates::delete_certificate)
        .service(documents::list_documents)
        .service(documents::upload_document)
        .service(documents::download_document)
        .service(documents::delete_document)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(dashboard::chief_dashboard)
        .service(dashboard::atsep_dashboard);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use amm_config::{Environment, ServiceConfig};
    use amm_core::{AssignmentState, Mission, MissionStatus, Notification};
    use amm_identity::Subject;
    use serde_json::json;

    use crate::state::AppState;

    fn test_config() -> ServiceConfig {
        ServiceConfig {
            service_name: "amm-api".to_string(),
            environment: Environment::Test,
            bind_addr: "127.0.0.1:0".to_string(),
            metrics_addr: None,
            log_level: "info".to_string(),
            seed_demo_data: true,
        }
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::from_config(test_config())))
                    .configure(super::configure),
            )
            .await
        };
    }

    fn as_chief(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("x-amm-user", "chief"))
            .insert_header(("x-amm-role", "chief_of_unit"))
    }

    fn as_atsep(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("x-amm-user", "houcine"))
            .insert_header(("x-amm-role", "atsep"))
    }

    fn as_client(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("x-amm-user", "airport1"))
            .insert_header(("x-amm-role", "client"))
    }

    fn mission_payload(reference: &str) -> serde_json::Value {
        json!({
            "reference": reference,
            "airport": "CDG",
            "date_start": "2025-07-01",
            "date_finish": "2025-07-02",
            "duration": "1d",
            "problem": "ILS antenna inspection",
            "group_chief": "houcine",
            "pilot": "jamal",
            "data_analyst": "sara",
        })
    }

    #[actix_web::test]
    async fn login_round_trip() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/v1/login")
            .set_json(json!({
                "username": "chief",
                "password": "chief123",
                "role": "chief_of_unit",
            }))
            .to_request();
        let subject: Subject = test::call_and_read_body_json(&app, req).await;
        assert_eq!(subject.username, "chief");

        let req = test::TestRequest::post()
            .uri("/v1/login")
            .set_json(json!({
                "username": "chief",
                "password": "wrong",
                "role": "chief_of_unit",
            }))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn mission_hand_off_between_roles() {
        let app = test_app!();

        let req = as_chief(test::TestRequest::post().uri("/v1/missions"))
            .set_json(mission_payload("M100"))
            .to_request();
        let mission: Mission = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mission.status, MissionStatus::New);
        assert_eq!(mission.assignment, AssignmentState::New);

        let req = as_atsep(test::TestRequest::get().uri("/v1/notifications")).to_request();
        let notifications: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].mission_ref, "M100");

        let req = as_atsep(test::TestRequest::post().uri("/v1/notifications/M100/resolve"))
            .set_json(json!({"decision": "accept"}))
            .to_request();
        let mission: Mission = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mission.assignment, AssignmentState::Accepted);

        let req = as_atsep(test::TestRequest::get().uri("/v1/notifications")).to_request();
        let notifications: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
        assert!(notifications.is_empty());
    }

    #[actix_web::test]
    async fn duplicate_reference_is_conflict() {
        let app = test_app!();

        let req = as_chief(test::TestRequest::post().uri("/v1/missions"))
            .set_json(mission_payload("M100"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let req = as_chief(test::TestRequest::post().uri("/v1/missions"))
            .set_json(mission_payload("M100"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn clients_cannot_create_missions() {
        let app = test_app!();
        let req = as_client(test::TestRequest::post().uri("/v1/missions"))
            .set_json(mission_payload("M500"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get().uri("/v1/missions").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn overdrawing_stock_is_conflict() {
        let app = test_app!();

        // Seeded battery stock is 3.
        let req = as_atsep(test::TestRequest::post().uri("/v1/parts/use"))
            .set_json(json!({"name": "Battery", "quantity": 10}))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let req = as_atsep(test::TestRequest::post().uri("/v1/parts/use"))
            .set_json(json!({"name": "Battery", "quantity": 1, "note": "bench test"}))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
