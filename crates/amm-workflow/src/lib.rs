pub mod inventory;
pub mod missions;

pub use inventory::{Inventory, PartDraft, UsageRequest};
pub use missions::{
    AssignmentDecision, MissionDraft, MissionLifecycle, MissionReportDraft, ReviewDecision,
};
