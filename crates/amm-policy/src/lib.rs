use amm_identity::{Permission, Role, Subject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyDecision {
    Permit,
    Deny,
}

pub trait PolicyEngine {
    fn evaluate(&self, subject: &Subject, permission: Permission) -> PolicyDecision;
}

/// Static role dispatch table. One row per role, no runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy;

impl RolePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyEngine for RolePolicy {
    fn evaluate(&self, subject: &Subject, permission: Permission) -> PolicyDecision {
        if permissions_for(subject.role).contains(&permission) {
            PolicyDecision::Permit
        } else {
            PolicyDecision::Deny
        }
    }
}

pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::ChiefOfUnit => &[
            Permission::ViewMissions,
            Permission::ManageMissions,
            Permission::ReviewMissionReports,
            Permission::ViewProblems,
            Permission::UpdateProblemStatus,
            Permission::ManageInventory,
            Permission::RecordPartUsage,
            Permission::ViewMaintenance,
            Permission::ManageCertificates,
            Permission::ManageDocuments,
            Permission::ManageUsers,
            Permission::ViewNotifications,
        ],
        Role::Atsep => &[
            Permission::ViewMissions,
            Permission::ResolveAssignments,
            Permission::SubmitMissionReports,
            Permission::RecordPartUsage,
            Permission::ViewMaintenance,
            Permission::ManageMaintenance,
            Permission::ViewNotifications,
        ],
        Role::Client => &[Permission::ViewProblems, Permission::ReportProblems],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(role: Role) -> Subject {
        Subject::new("test", role)
    }

    #[test]
    fn chief_manages_missions_but_does_not_submit_reports() {
        let policy = RolePolicy::new();
        assert_eq!(
            policy.evaluate(&subject(Role::ChiefOfUnit), Permission::ManageMissions),
            PolicyDecision::Permit
        );
        assert_eq!(
            policy.evaluate(
                &subject(Role::ChiefOfUnit),
                Permission::SubmitMissionReports
            ),
            PolicyDecision::Deny
        );
    }

    #[test]
    fn atsep_resolves_assignments_but_cannot_manage_users() {
        let policy = RolePolicy::new();
        assert_eq!(
            policy.evaluate(&subject(Role::Atsep), Permission::ResolveAssignments),
            PolicyDecision::Permit
        );
        assert_eq!(
            policy.evaluate(&subject(Role::Atsep), Permission::ManageUsers),
            PolicyDecision::Deny
        );
    }

    #[test]
    fn client_only_reports_and_views_problems() {
        let policy = RolePolicy::new();
        assert_eq!(
            policy.evaluate(&subject(Role::Client), Permission::ReportProblems),
            PolicyDecision::Permit
        );
        assert_eq!(
            policy.evaluate(&subject(Role::Client), Permission::ViewMissions),
            PolicyDecision::Deny
        );
    }
}
