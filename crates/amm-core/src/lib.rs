pub mod domain;
pub mod error;
pub mod ids;
pub mod time;

pub use domain::{
    AccountStatus, AssignmentState, Certificate, Document, DocumentCategory, FileAttachment,
    MaintenanceKind, MaintenanceRecord, MaintenanceStatus, Mission, MissionOutcome, MissionReport,
    MissionStatus, Notification, PartUsage, ProblemPriority, ProblemReport, ProblemStatus,
    ReviewStatus, SparePart, StaffRole, UserAccount,
};
pub use error::{AmmError, AmmResult, ErrorCode};
pub use ids::{
    CertificateId, DocumentId, MaintenanceRecordId, MissionId, MissionReportId, NotificationId,
    PartId, ProblemReportId, UsageId, UserId,
};
pub use time::{EpochMillis, now_epoch_millis};
