use amm_core::{AmmError, AmmResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ChiefOfUnit,
    Atsep,
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::ChiefOfUnit => "chief_of_unit",
            Self::Atsep => "atsep",
            Self::Client => "client",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "chief_of_unit" | "chief-of-unit" | "chief" => Ok(Self::ChiefOfUnit),
            "atsep" => Ok(Self::Atsep),
            "client" => Ok(Self::Client),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewMissions,
    ManageMissions,
    ResolveAssignments,
    SubmitMissionReports,
    ReviewMissionReports,
    ViewProblems,
    ReportProblems,
    UpdateProblemStatus,
    ManageInventory,
    RecordPartUsage,
    ViewMaintenance,
    ManageMaintenance,
    ManageCertificates,
    ManageDocuments,
    ManageUsers,
    ViewNotifications,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub username: String,
    pub role: Role,
}

impl Subject {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}

struct DemoAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
}

// Hardcoded demo roster; passwords are plaintext.
const DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        username: "chief",
        password: "chief123",
        role: Role::ChiefOfUnit,
    },
    DemoAccount {
        username: "houcine",
        password: "atsep123",
        role: Role::Atsep,
    },
    DemoAccount {
        username: "airport1",
        password: "client123",
        role: Role::Client,
    },
];

pub fn authenticate(username: &str, password: &str, role: Role) -> AmmResult<Subject> {
    let username = username.trim();
    DEMO_ACCOUNTS
        .iter()
        .find(|account| {
            account.username == username && account.password == password && account.role == role
        })
        .map(|account| Subject::new(account.username, account.role))
        .ok_or_else(|| {
            AmmError::new(
                ErrorCode::Unauthorized,
                "invalid username, password, or role",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_accepts_known_account() {
        let subject = authenticate("chief", "chief123", Role::ChiefOfUnit).unwrap();
        assert_eq!(subject.username, "chief");
        assert_eq!(subject.role, Role::ChiefOfUnit);
    }

    #[test]
    fn authenticate_rejects_role_mismatch() {
        let err = authenticate("chief", "chief123", Role::Client).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn authenticate_trims_username() {
        assert!(authenticate(" houcine ", "atsep123", Role::Atsep).is_ok());
    }
}
