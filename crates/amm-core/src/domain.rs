use crate::ids::{
    CertificateId, DocumentId, MaintenanceRecordId, MissionId, MissionReportId, NotificationId,
    PartId, ProblemReportId, UsageId, UserId,
};
use crate::time::EpochMillis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    New,
    EnCours,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    New,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemStatus {
    New,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Submitted,
    Approved,
    NeedsRevision,
}

/// Completion state reported by the field team, distinct from
/// `Mission::status` (submitting a report always closes the mission).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionOutcome {
    Completed,
    PartiallyCompleted,
    NeedFollowUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceKind {
    Preventive,
    Corrective,
    Upgrade,
    Inspection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Completed,
    InProgress,
    Scheduled,
    Postponed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Mission,
    Checklist,
    Manual,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    GroupChief,
    Pilot,
    DataAnalyst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Uploaded file passed through unchanged; contents are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub reference: String,
    pub airport: String,
    pub date_start: String,
    pub date_finish: String,
    pub duration: String,
    pub problem: String,
    pub status: MissionStatus,
    pub assignment: AssignmentState,
    pub group_chief: String,
    pub pilot: String,
    pub data_analyst: String,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

/// Pending assignment hand-off; consumed when the technician accepts
/// or rejects the mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub mission_id: MissionId,
    pub mission_ref: String,
    pub airport: String,
    pub problem: String,
    pub created_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemReport {
    pub id: ProblemReportId,
    pub airport: String,
    pub system: String,
    pub priority: ProblemPriority,
    pub reporter: String,
    pub contact: String,
    pub date: String,
    pub description: String,
    pub impact: String,
    #[serde(default)]
    pub additional_info: String,
    pub status: ProblemStatus,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionReport {
    pub id: MissionReportId,
    pub mission_ref: String,
    pub airport: String,
    pub date_start: String,
    pub date_finish: String,
    pub status: ReviewStatus,
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
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePart {
    pub id: PartId,
    pub part_number: String,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub minimum: u32,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

impl SparePart {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartUsage {
    pub id: UsageId,
    pub part_id: PartId,
    pub part_number: String,
    pub name: String,
    pub quantity_used: u32,
    pub used_by: String,
    #[serde(default)]
    pub note: Option<String>,
    pub used_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceRecordId,
    pub equipment: String,
    pub kind: MaintenanceKind,
    pub date: String,
    pub technician: String,
    pub status: MaintenanceStatus,
    pub next_date: String,
    pub description: String,
    pub findings: String,
    pub actions: String,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub name: String,
    pub validation: String,
    pub acquired: String,
    pub expires: String,
    pub file: FileAttachment,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub category: DocumentCategory,
    pub file: FileAttachment,
    pub uploaded_by: String,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    pub staff_role: StaffRole,
    #[serde(default)]
    pub status: AccountStatus,
    pub password: String,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}
