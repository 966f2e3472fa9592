use amm_core::{
    AmmError, AmmResult, AssignmentState, ErrorCode, FileAttachment, Mission, MissionId,
    MissionOutcome, MissionReport, MissionReportId, MissionStatus, Notification, NotificationId,
    ReviewStatus, now_epoch_millis,
};
use amm_storage::{
    MissionRepository, MissionReportRepository, NotificationRepository, StorageError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LIST_ALL: usize = usize::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentDecision {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approve,
    NeedsRevision,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissionDraft {
    pub reference: String,
    pub airport: String,
    pub date_start: String,
    pub date_finish: String,
    #[serde(default)]
    pub duration: String,
    pub problem: String,
    #[serde(default)]
    pub group_chief: String,
    #[serde(default)]
    pub pilot: String,
    #[serde(default)]
    pub data_analyst: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissionReportDraft {
    pub airport: String,
    pub date_start: String,
    pub date_finish: String,
    pub outcome: MissionOutcome,
    pub pilot: String,
    pub data_analyst: String,
    pub findings: String,
    pub actions: String,
    pub recommendations: String,
    #[serde(default)]
    pub flight_profile: Option<FileAttachment>,
    #[serde(default)]
    pub report_file: Option<FileAttachment>,
}

fn storage_error(err: StorageError) -> AmmError {
    AmmError::new(ErrorCode::Internal, err.message)
}

/// Mission hand-off and completion rules. Assignment and status are
/// separate axes: assignment resolves once, status walks
/// New -> EnCours -> Done, and only report submission may close a mission.
pub struct MissionLifecycle<S> {
    store: Arc<S>,
}

impl<S> MissionLifecycle<S>
where
    S: MissionRepository + NotificationRepository + MissionReportRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create_mission(&self, draft: MissionDraft) -> AmmResult<Mission> {
        if draft.reference.trim().is_empty() {
            return Err(AmmError::invalid_input("mission reference is required"));
        }
        if draft.airport.trim().is_empty() {
            return Err(AmmError::invalid_input("airport is required"));
        }
        if self
            .store
            .find_by_reference(&draft.reference)
            .await
            .map_err(storage_error)?
            .is_some()
        {
            return Err(AmmError::new(
                ErrorCode::DuplicateReference,
                format!("mission reference {} already exists", draft.reference),
            ));
        }

        let now = now_epoch_millis();
        let mission = Mission {
            id: MissionId::new(),
            reference: draft.reference,
            airport: draft.airport,
            date_start: draft.date_start,
            date_finish: draft.date_finish,
            duration: draft.duration,
            problem: draft.problem,
            status: MissionStatus::New,
            assignment: AssignmentState::New,
            group_chief: draft.group_chief,
            pilot: draft.pilot,
            data_analyst: draft.data_analyst,
            created_at_ms: now,
            updated_at_ms: now,
        };
        MissionRepository::upsert(self.store.as_ref(), mission.clone())
            .await
            .map_err(storage_error)?;
        self.store
            .push(Notification {
                id: NotificationId::new(),
                mission_id: mission.id,
                mission_ref: mission.reference.clone(),
                airport: mission.airport.clone(),
                problem: mission.problem.clone(),
                created_at_ms: now,
            })
            .await
            .map_err(storage_error)?;

        tracing::info!(
            reference = %mission.reference,
            airport = %mission.airport,
            "mission created"
        );
        metrics::counter!("amm_missions_created_total").increment(1);
        Ok(mission)
    }

    /// Applies an accept/reject decision and consumes the pending
    /// notification. Re-applying the same decision is a no-op; reversing a
    /// decision is rejected.
    pub async fn resolve_assignment(
        &self,
        reference: &str,
        decision: AssignmentDecision,
    ) -> AmmResult<Mission> {
        let mut mission = self
            .store
            .find_by_reference(reference)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AmmError::not_found(format!("no mission with reference {reference}")))?;

        let target = match decision {
            AssignmentDecision::Accept => AssignmentState::Accepted,
            AssignmentDecision::Reject => AssignmentState::Rejected,
        };
        if mission.assignment == target {
            return Ok(mission);
        }
        if mission.assignment != AssignmentState::New {
            return Err(AmmError::new(
                ErrorCode::IllegalTransition,
                format!(
                    "assignment already resolved as {:?} for {reference}",
                    mission.assignment
                ),
            ));
        }

        mission.assignment = target;
        mission.updated_at_ms = now_epoch_millis();
        MissionRepository::upsert(self.store.as_ref(), mission.clone())
            .await
            .map_err(storage_error)?;
        self.store
            .take_by_reference(reference)
            .await
            .map_err(storage_error)?;

        tracing::info!(reference = %reference, decision = ?decision, "assignment resolved");
        Ok(mission)
    }

    /// Submitting a report is the sole completion trigger: the mission is
    /// forced to Done whatever outcome the field team reported.
    pub async fn submit_report(
        &self,
        reference: &str,
        draft: MissionReportDraft,
    ) -> AmmResult<MissionReport> {
        let mut mission = self
            .store
            .find_by_reference(reference)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AmmError::not_found(format!("no mission with reference {reference}")))?;

        if mission.assignment != AssignmentState::Accepted {
            return Err(AmmError::new(
                ErrorCode::IllegalTransition,
                format!("mission {reference} has not been accepted"),
            ));
        }
        if mission.status == MissionStatus::Done {
            return Err(AmmError::new(
                ErrorCode::IllegalTransition,
                format!("mission {reference} is already done"),
            ));
        }

        let now = now_epoch_millis();
        let report = MissionReport {
            id: MissionReportId::new(),
            mission_ref: mission.reference.clone(),
            airport: draft.airport,
            date_start: draft.date_start,
            date_finish: draft.date_finish,
            status: ReviewStatus::Submitted,
            outcome: draft.outcome,
            pilot: draft.pilot,
            data_analyst: draft.data_analyst,
            findings: draft.findings,
            actions: draft.actions,
            recommendations: draft.recommendations,
            flight_profile: draft.flight_profile,
            report_file: draft.report_file,
            created_at_ms: now,
            updated_at_ms: now,
        };
        MissionReportRepository::upsert(self.store.as_ref(), report.clone())
            .await
            .map_err(storage_error)?;

        mission.status = MissionStatus::Done;
        mission.updated_at_ms = now;
        MissionRepository::upsert(self.store.as_ref(), mission)
            .await
            .map_err(storage_error)?;

        tracing::info!(reference = %reference, outcome = ?report.outcome, "mission report submitted");
        metrics::counter!("amm_reports_submitted_total").increment(1);
        Ok(report)
    }

    pub async fn review_report(
        &self,
        id: MissionReportId,
        decision: ReviewDecision,
    ) -> AmmResult<MissionReport> {
        let mut report = MissionReportRepository::get(self.store.as_ref(), id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AmmError::not_found(format!("no mission report {id}")))?;

        if report.status != ReviewStatus::Submitted {
            return Err(AmmError::new(
                ErrorCode::IllegalTransition,
                format!("report {id} has already been reviewed"),
            ));
        }
        report.status = match decision {
            ReviewDecision::Approve => ReviewStatus::Approved,
            ReviewDecision::NeedsRevision => ReviewStatus::NeedsRevision,
        };
        report.updated_at_ms = now_epoch_millis();
        MissionReportRepository::upsert(self.store.as_ref(), report.clone())
            .await
            .map_err(storage_error)?;

        tracing::info!(report = %id, decision = ?decision, "mission report reviewed");
        Ok(report)
    }

    /// Constrained status edit for the mission table. Same-status writes are
    /// no-ops; Done is terminal and only reachable through `submit_report`.
    pub async fn update_status(
        &self,
        reference: &str,
        new_status: MissionStatus,
    ) -> AmmResult<Mission> {
        let mut mission = self
            .store
            .find_by_reference(reference)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AmmError::not_found(format!("no mission with reference {reference}")))?;

        if mission.status == new_status {
            return Ok(mission);
        }
        let legal = matches!(
            (mission.status, new_status),
            (MissionStatus::New, MissionStatus::EnCours)
        ) && mission.assignment == AssignmentState::Accepted;
        if !legal {
            return Err(AmmError::new(
                ErrorCode::IllegalTransition,
                format!(
                    "cannot move mission {reference} from {:?} to {:?} while {:?}",
                    mission.status, new_status, mission.assignment
                ),
            ));
        }

        mission.status = new_status;
        mission.updated_at_ms = now_epoch_millis();
        MissionRepository::upsert(self.store.as_ref(), mission.clone())
            .await
            .map_err(storage_error)?;
        Ok(mission)
    }

    pub async fn pending_notifications(&self) -> AmmResult<Vec<Notification>> {
        NotificationRepository::list(self.store.as_ref())
            .await
            .map_err(storage_error)
    }

    /// Missions eligible for a report: accepted and not yet done.
    pub async fn report_candidates(&self) -> AmmResult<Vec<Mission>> {
        let missions = MissionRepository::list(self.store.as_ref(), LIST_ALL, 0)
            .await
            .map_err(storage_error)?;
        Ok(missions
            .into_iter()
            .filter(|m| {
                m.assignment == AssignmentState::Accepted && m.status != MissionStatus::Done
            })
            .collect())
    }

    /// Missions a team member is assigned to, by exact username match on
    /// any team slot.
    pub async fn missions_for(&self, member: &str) -> AmmResult<Vec<Mission>> {
        let missions = MissionRepository::list(self.store.as_ref(), LIST_ALL, 0)
            .await
            .map_err(storage_error)?;
        Ok(missions
            .into_iter()
            .filter(|m| m.group_chief == member || m.pilot == member || m.data_analyst == member)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_storage_memory::MemoryStore;

    fn lifecycle() -> MissionLifecycle<MemoryStore> {
        MissionLifecycle::new(Arc::new(MemoryStore::new()))
    }

    fn draft(reference: &str) -> MissionDraft {
        MissionDraft {
            reference: reference.to_string(),
            airport: "JFK".to_string(),
            date_start: "2025-05-01".to_string(),
            date_finish: "2025-05-03".to_string(),
            duration: "2d".to_string(),
            problem: "Radar issue".to_string(),
            group_chief: "houcine".to_string(),
            pilot: "ahmed".to_string(),
            data_analyst: "sara".to_string(),
        }
    }

    fn report_draft(outcome: MissionOutcome) -> MissionReportDraft {
        MissionReportDraft {
            airport: "JFK".to_string(),
            date_start: "2025-05-01".to_string(),
            date_finish: "2025-05-03".to_string(),
            outcome,
            pilot: "ahmed".to_string(),
            data_analyst: "sara".to_string(),
            findings: "Radar interference traced to cabling".to_string(),
            actions: "Replaced feeder cable".to_string(),
            recommendations: "Schedule follow-up inspection".to_string(),
            flight_profile: None,
            report_file: None,
        }
    }

    #[tokio::test]
    async fn create_then_accept_consumes_notification() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        assert_eq!(lifecycle.pending_notifications().await.unwrap().len(), 1);

        let mission = lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();
        assert_eq!(mission.assignment, AssignmentState::Accepted);
        assert!(lifecycle.pending_notifications().await.unwrap().is_empty());

        // Re-applying the same decision is a no-op, not an error.
        let again = lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();
        assert_eq!(again.assignment, AssignmentState::Accepted);
    }

    #[tokio::test]
    async fn duplicate_reference_is_rejected() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        let err = lifecycle.create_mission(draft("M100")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateReference);
    }

    #[tokio::test]
    async fn blank_required_fields_are_rejected() {
        let lifecycle = lifecycle();
        let mut missing_ref = draft("  ");
        missing_ref.reference = " ".to_string();
        assert_eq!(
            lifecycle.create_mission(missing_ref).await.unwrap_err().code,
            ErrorCode::InvalidInput
        );

        let mut missing_airport = draft("M101");
        missing_airport.airport = String::new();
        assert_eq!(
            lifecycle
                .create_mission(missing_airport)
                .await
                .unwrap_err()
                .code,
            ErrorCode::InvalidInput
        );
    }

    #[tokio::test]
    async fn resolving_unknown_reference_is_not_found() {
        let lifecycle = lifecycle();
        let err = lifecycle
            .resolve_assignment("M404", AssignmentDecision::Accept)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn reversing_a_decision_is_illegal() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        lifecycle
            .resolve_assignment("M100", AssignmentDecision::Reject)
            .await
            .unwrap();
        let err = lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalTransition);
    }

    #[tokio::test]
    async fn submit_report_forces_done_regardless_of_outcome() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();

        let report = lifecycle
            .submit_report("M100", report_draft(MissionOutcome::PartiallyCompleted))
            .await
            .unwrap();
        assert_eq!(report.status, ReviewStatus::Submitted);
        assert_eq!(report.outcome, MissionOutcome::PartiallyCompleted);

        let candidates = lifecycle.report_candidates().await.unwrap();
        assert!(candidates.is_empty());
        let mission = lifecycle.missions_for("ahmed").await.unwrap().remove(0);
        assert_eq!(mission.status, MissionStatus::Done);
    }

    #[tokio::test]
    async fn submit_report_requires_accepted_mission() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        let err = lifecycle
            .submit_report("M100", report_draft(MissionOutcome::Completed))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalTransition);
    }

    #[tokio::test]
    async fn submit_report_rejects_finished_mission() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();
        lifecycle
            .submit_report("M100", report_draft(MissionOutcome::Completed))
            .await
            .unwrap();
        let err = lifecycle
            .submit_report("M100", report_draft(MissionOutcome::Completed))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalTransition);
    }

    #[tokio::test]
    async fn review_is_single_shot() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();
        let report = lifecycle
            .submit_report("M100", report_draft(MissionOutcome::Completed))
            .await
            .unwrap();

        let reviewed = lifecycle
            .review_report(report.id, ReviewDecision::Approve)
            .await
            .unwrap();
        assert_eq!(reviewed.status, ReviewStatus::Approved);

        let err = lifecycle
            .review_report(report.id, ReviewDecision::NeedsRevision)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IllegalTransition);
    }

    #[tokio::test]
    async fn status_edit_follows_transition_table() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();

        // Unaccepted missions cannot start.
        assert_eq!(
            lifecycle
                .update_status("M100", MissionStatus::EnCours)
                .await
                .unwrap_err()
                .code,
            ErrorCode::IllegalTransition
        );

        lifecycle
            .resolve_assignment("M100", AssignmentDecision::Accept)
            .await
            .unwrap();
        let mission = lifecycle
            .update_status("M100", MissionStatus::EnCours)
            .await
            .unwrap();
        assert_eq!(mission.status, MissionStatus::EnCours);

        // Same-status write is a no-op.
        lifecycle
            .update_status("M100", MissionStatus::EnCours)
            .await
            .unwrap();

        // Done is only reachable through submit_report.
        assert_eq!(
            lifecycle
                .update_status("M100", MissionStatus::Done)
                .await
                .unwrap_err()
                .code,
            ErrorCode::IllegalTransition
        );
    }

    #[tokio::test]
    async fn missions_for_matches_exact_username() {
        let lifecycle = lifecycle();
        lifecycle.create_mission(draft("M100")).await.unwrap();
        assert_eq!(lifecycle.missions_for("ahmed").await.unwrap().len(), 1);
        assert_eq!(lifecycle.missions_for("sara").await.unwrap().len(), 1);
        assert!(lifecycle.missions_for("ahm").await.unwrap().is_empty());
    }
}
