use actix_web::{HttpRequest, HttpResponse, get, web};
use amm_core::{AssignmentState, MissionStatus, ProblemStatus, ReviewStatus};
use amm_identity::Permission;
use amm_storage::{MissionRepository, MissionReportRepository, ProblemReportRepository};
use serde::Serialize;

use crate::auth::authorize_request;
use crate::routes::common::internal_error;
use crate::state::AppState;

const LIST_ALL: usize = usize::MAX;

#[derive(Debug, Serialize)]
struct ChiefDashboard {
    total_missions: usize,
    in_progress: usize,
    completed: usize,
    accepted: usize,
    unassigned: usize,
    new_problems: usize,
    submitted_reports: usize,
}

#[derive(Debug, Serialize)]
struct AtsepDashboard {
    completed: usize,
    in_progress: usize,
    new_assignments: usize,
}

#[get("/v1/dashboard/chief")]
pub async fn chief_dashboard(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ReviewMissionReports)
    {
        return response;
    }

    let missions = match MissionRepository::list(state.store.as_ref(), LIST_ALL, 0).await {
        Ok(missions) => missions,
        Err(err) => return internal_error(err.message),
    };
    let problems = match ProblemReportRepository::list(state.store.as_ref(), LIST_ALL, 0).await {
        Ok(problems) => problems,
        Err(err) => return internal_error(err.message),
    };
    let reports = match MissionReportRepository::list(state.store.as_ref(), LIST_ALL, 0).await {
        Ok(reports) => reports,
        Err(err) => return internal_error(err.message),
    };

    let dashboard = ChiefDashboard {
        total_missions: missions.len(),
        in_progress: missions
            .iter()
            .filter(|m| m.status == MissionStatus::EnCours)
            .count(),
        completed: missions
            .iter()
            .filter(|m| m.status == MissionStatus::Done)
            .count(),
        accepted: missions
            .iter()
            .filter(|m| m.assignment == AssignmentState::Accepted)
            .count(),
        unassigned: missions
            .iter()
            .filter(|m| m.assignment == AssignmentState::New)
            .count(),
        new_problems: problems
            .iter()
            .filter(|p| p.status == ProblemStatus::New)
            .count(),
        submitted_reports: reports
            .iter()
            .filter(|r| r.status == ReviewStatus::Submitted)
            .count(),
    };

    HttpResponse::Ok().json(dashboard)
}

#[get("/v1/dashboard/atsep")]
pub async fn atsep_dashboard(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Err(response) = authorize_request(&req, &state.policy, Permission::ResolveAssignments) {
        return response;
    }

    let missions = match MissionRepository::list(state.store.as_ref(), LIST_ALL, 0).await {
        Ok(missions) => missions,
        Err(err) => return internal_error(err.message),
    };

    let dashboard = AtsepDashboard {
        completed: missions
            .iter()
            .filter(|m| {
                m.status == MissionStatus::Done && m.assignment == AssignmentState::Accepted
            })
            .count(),
        in_progress: missions
            .iter()
            .filter(|m| {
                m.status == MissionStatus::EnCours && m.assignment == AssignmentState::Accepted
            })
            .count(),
        new_assignments: missions
            .iter()
            .filter(|m| m.assignment == AssignmentState::New)
            .count(),
    };

    HttpResponse::Ok().json(dashboard)
}
