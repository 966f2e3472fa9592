use amm_core::{
    AccountStatus, AssignmentState, Certificate, CertificateId, Document, DocumentId,
    FileAttachment, MaintenanceKind, MaintenanceRecord, MaintenanceRecordId, MaintenanceStatus,
    Mission, MissionId, MissionReport, MissionReportId, MissionStatus, Notification, PartId,
    PartUsage, ProblemReport, ProblemReportId, SparePart, StaffRole, UserAccount, UserId,
    now_epoch_millis,
};
use amm_storage::{
    CertificateRepository, DocumentRepository, MaintenanceRecordRepository, MissionRepository,
    MissionReportRepository, NotificationRepository, PartUsageRepository,
    ProblemReportRepository, SparePartRepository, StorageError, UserRepository,
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Session-scoped store. Every collection lives behind its own lock and is
/// lost when the store is dropped; nothing touches disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Collections>,
}

#[derive(Debug, Default)]
struct Collections {
    missions: RwLock<Vec<Mission>>,
    notifications: RwLock<Vec<Notification>>,
    problems: RwLock<Vec<ProblemReport>>,
    reports: RwLock<Vec<MissionReport>>,
    parts: RwLock<Vec<SparePart>>,
    usage: RwLock<Vec<PartUsage>>,
    maintenance: RwLock<Vec<MaintenanceRecord>>,
    certificates: RwLock<Vec<Certificate>>,
    documents: RwLock<Vec<Document>>,
    users: RwLock<Vec<UserAccount>>,
}

fn read<T>(lock: &RwLock<Vec<T>>) -> Result<RwLockReadGuard<'_, Vec<T>>, StorageError> {
    lock.read()
        .map_err(|_| StorageError::new("collection lock poisoned"))
}

fn write<T>(lock: &RwLock<Vec<T>>) -> Result<RwLockWriteGuard<'_, Vec<T>>, StorageError> {
    lock.write()
        .map_err(|_| StorageError::new("collection lock poisoned"))
}

fn page<T: Clone>(items: &[T], limit: usize, offset: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).cloned().collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    /// Store pre-loaded with the demo rows the portal ships with.
    pub fn with_demo_data() -> Self {
        let now = now_epoch_millis();
        let missions = vec![
            Mission {
                id: MissionId::new(),
                reference: "M001".to_string(),
                airport: "JFK".to_string(),
                date_start: "2025-05-01".to_string(),
                date_finish: "2025-05-03".to_string(),
                duration: "2d".to_string(),
                problem: "Radar issue".to_string(),
                status: MissionStatus::EnCours,
                assignment: AssignmentState::Accepted,
                group_chief: "houcine".to_string(),
                pilot: "ahmed".to_string(),
                data_analyst: "sara".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
            Mission {
                id: MissionId::new(),
                reference: "M002".to_string(),
                airport: "LAX".to_string(),
                date_start: "2025-04-20".to_string(),
                date_finish: "2025-04-22".to_string(),
                duration: "2d".to_string(),
                problem: "Comms check".to_string(),
                status: MissionStatus::Done,
                assignment: AssignmentState::Accepted,
                group_chief: "hassan".to_string(),
                pilot: "jamal".to_string(),
                data_analyst: "salma".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
        ];
        let parts = vec![
            SparePart {
                id: PartId::new(),
                part_number: "P001".to_string(),
                name: "Propeller".to_string(),
                description: "Main propeller".to_string(),
                quantity: 10,
                minimum: 5,
                created_at_ms: now,
                updated_at_ms: now,
            },
            SparePart {
                id: PartId::new(),
                part_number: "P002".to_string(),
                name: "Battery".to_string(),
                description: "LiPo battery".to_string(),
                quantity: 3,
                minimum: 5,
                created_at_ms: now,
                updated_at_ms: now,
            },
        ];
        let maintenance = vec![
            MaintenanceRecord {
                id: MaintenanceRecordId::new(),
                equipment: "D001".to_string(),
                kind: MaintenanceKind::Inspection,
                date: "2025-05-10".to_string(),
                technician: "houcine".to_string(),
                status: MaintenanceStatus::Completed,
                next_date: "2026-05-10".to_string(),
                description: "Annual calibration".to_string(),
                findings: String::new(),
                actions: String::new(),
                created_at_ms: now,
                updated_at_ms: now,
            },
            MaintenanceRecord {
                id: MaintenanceRecordId::new(),
                equipment: "D002".to_string(),
                kind: MaintenanceKind::Corrective,
                date: "2025-04-15".to_string(),
                technician: "houcine".to_string(),
                status: MaintenanceStatus::Completed,
                next_date: "2025-10-15".to_string(),
                description: "Motor replaced".to_string(),
                findings: String::new(),
                actions: "Motor".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
        ];
        let certificates = vec![
            Certificate {
                id: CertificateId::new(),
                name: "Calib2025".to_string(),
                validation: "1 year".to_string(),
                acquired: "2025-01-01".to_string(),
                expires: "2026-01-01".to_string(),
                file: FileAttachment {
                    name: "calib2025.pdf".to_string(),
                    data: b"Sample certificate 2025".to_vec(),
                },
                created_at_ms: now,
                updated_at_ms: now,
            },
            Certificate {
                id: CertificateId::new(),
                name: "Calib2024".to_string(),
                validation: "1 year".to_string(),
                acquired: "2024-01-01".to_string(),
                expires: "2025-01-01".to_string(),
                file: FileAttachment {
                    name: "calib2024.pdf".to_string(),
                    data: b"Sample certificate 2024".to_vec(),
                },
                created_at_ms: now,
                updated_at_ms: now,
            },
        ];
        let users = vec![
            UserAccount {
                id: UserId::new(),
                name: "houcine fath".to_string(),
                username: "houcine".to_string(),
                email: "houcine@example.com".to_string(),
                staff_role: StaffRole::GroupChief,
                status: AccountStatus::Active,
                password: "chief123".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
            UserAccount {
                id: UserId::new(),
                name: "jamal Jon".to_string(),
                username: "jamal".to_string(),
                email: "jam@example.com".to_string(),
                staff_role: StaffRole::Pilot,
                status: AccountStatus::Active,
                password: "pilot123".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
            UserAccount {
                id: UserId::new(),
                name: "sara walo".to_string(),
                username: "sara".to_string(),
                email: "sara@example.com".to_string(),
                staff_role: StaffRole::DataAnalyst,
                status: AccountStatus::Inactive,
                password: "analyst123".to_string(),
                created_at_ms: now,
                updated_at_ms: now,
            },
        ];

        Self {
            inner: Arc::new(Collections {
                missions: RwLock::new(missions),
                parts: RwLock::new(parts),
                maintenance: RwLock::new(maintenance),
                certificates: RwLock::new(certificates),
                users: RwLock::new(users),
                ..Default::default()
            }),
        }
    }
}

#[async_trait]
impl MissionRepository for MemoryStore {
    async fn get(&self, id: MissionId) -> Result<Option<Mission>, StorageError> {
        let missions = read(&self.inner.missions)?;
        Ok(missions.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Mission>, StorageError> {
        let missions = read(&self.inner.missions)?;
        Ok(missions.iter().find(|m| m.reference == reference).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Mission>, StorageError> {
        let missions = read(&self.inner.missions)?;
        Ok(page(&missions, limit, offset))
    }

    async fn upsert(&self, mission: Mission) -> Result<(), StorageError> {
        let mut missions = write(&self.inner.missions)?;
        match missions.iter().position(|m| m.id == mission.id) {
            Some(index) => missions[index] = mission,
            None => missions.push(mission),
        }
        Ok(())
    }

    async fn delete(&self, id: MissionId) -> Result<(), StorageError> {
        let mut missions = write(&self.inner.missions)?;
        missions.retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Notification>, StorageError> {
        let notifications = read(&self.inner.notifications)?;
        Ok(notifications.clone())
    }

    async fn push(&self, notification: Notification) -> Result<(), StorageError> {
        let mut notifications = write(&self.inner.notifications)?;
        notifications.push(notification);
        Ok(())
    }

    async fn take_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Notification>, StorageError> {
        let mut notifications = write(&self.inner.notifications)?;
        match notifications.iter().position(|n| n.mission_ref == reference) {
            Some(index) => Ok(Some(notifications.remove(index))),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProblemReportRepository for MemoryStore {
    async fn get(&self, id: ProblemReportId) -> Result<Option<ProblemReport>, StorageError> {
        let problems = read(&self.inner.problems)?;
        Ok(problems.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ProblemReport>, StorageError> {
        let problems = read(&self.inner.problems)?;
        Ok(page(&problems, limit, offset))
    }

    async fn upsert(&self, report: ProblemReport) -> Result<(), StorageError> {
        let mut problems = write(&self.inner.problems)?;
        match problems.iter().position(|p| p.id == report.id) {
            Some(index) => problems[index] = report,
            None => problems.push(report),
        }
        Ok(())
    }
}

#[async_trait]
impl MissionReportRepository for MemoryStore {
    async fn get(&self, id: MissionReportId) -> Result<Option<MissionReport>, StorageError> {
        let reports = read(&self.inner.reports)?;
        Ok(reports.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<MissionReport>, StorageError> {
        let reports = read(&self.inner.reports)?;
        Ok(page(&reports, limit, offset))
    }

    async fn upsert(&self, report: MissionReport) -> Result<(), StorageError> {
        let mut reports = write(&self.inner.reports)?;
        match reports.iter().position(|r| r.id == report.id) {
            Some(index) => reports[index] = report,
            None => reports.push(report),
        }
        Ok(())
    }
}

#[async_trait]
impl SparePartRepository for MemoryStore {
    async fn get(&self, id: PartId) -> Result<Option<SparePart>, StorageError> {
        let parts = read(&self.inner.parts)?;
        Ok(parts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<SparePart>, StorageError> {
        let parts = read(&self.inner.parts)?;
        Ok(parts.iter().find(|p| p.name == name).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<SparePart>, StorageError> {
        let parts = read(&self.inner.parts)?;
        Ok(page(&parts, limit, offset))
    }

    async fn upsert(&self, part: SparePart) -> Result<(), StorageError> {
        let mut parts = write(&self.inner.parts)?;
        match parts.iter().position(|p| p.id == part.id) {
            Some(index) => parts[index] = part,
            None => parts.push(part),
        }
        Ok(())
    }

    async fn delete(&self, id: PartId) -> Result<(), StorageError> {
        let mut parts = write(&self.inner.parts)?;
        parts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl PartUsageRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<PartUsage>, StorageError> {
        let usage = read(&self.inner.usage)?;
        Ok(usage.clone())
    }

    async fn append(&self, entry: PartUsage) -> Result<(), StorageError> {
        let mut usage = write(&self.inner.usage)?;
        usage.push(entry);
        Ok(())
    }
}

#[async_trait]
impl MaintenanceRecordRepository for MemoryStore {
    async fn get(
        &self,
        id: MaintenanceRecordId,
    ) -> Result<Option<MaintenanceRecord>, StorageError> {
        let maintenance = read(&self.inner.maintenance)?;
        Ok(maintenance.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<MaintenanceRecord>, StorageError> {
        let maintenance = read(&self.inner.maintenance)?;
        Ok(page(&maintenance, limit, offset))
    }

    async fn upsert(&self, record: MaintenanceRecord) -> Result<(), StorageError> {
        let mut maintenance = write(&self.inner.maintenance)?;
        match maintenance.iter().position(|r| r.id == record.id) {
            Some(index) => maintenance[index] = record,
            None => maintenance.push(record),
        }
        Ok(())
    }
}

#[async_trait]
impl CertificateRepository for MemoryStore {
    async fn get(&self, id: CertificateId) -> Result<Option<Certificate>, StorageError> {
        let certificates = read(&self.inner.certificates)?;
        Ok(certificates.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Certificate>, StorageError> {
        let certificates = read(&self.inner.certificates)?;
        Ok(page(&certificates, limit, offset))
    }

    async fn upsert(&self, certificate: Certificate) -> Result<(), StorageError> {
        let mut certificates = write(&self.inner.certificates)?;
        match certificates.iter().position(|c| c.id == certificate.id) {
            Some(index) => certificates[index] = certificate,
            None => certificates.push(certificate),
        }
        Ok(())
    }

    async fn delete(&self, id: CertificateId) -> Result<(), StorageError> {
        let mut certificates = write(&self.inner.certificates)?;
        certificates.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MemoryStore {
    async fn get(&self, id: DocumentId) -> Result<Option<Document>, StorageError> {
        let documents = read(&self.inner.documents)?;
        Ok(documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Document>, StorageError> {
        let documents = read(&self.inner.documents)?;
        Ok(page(&documents, limit, offset))
    }

    async fn upsert(&self, document: Document) -> Result<(), StorageError> {
        let mut documents = write(&self.inner.documents)?;
        match documents.iter().position(|d| d.id == document.id) {
            Some(index) => documents[index] = document,
            None => documents.push(document),
        }
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<(), StorageError> {
        let mut documents = write(&self.inner.documents)?;
        documents.retain(|d| d.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get(&self, id: UserId) -> Result<Option<UserAccount>, StorageError> {
        let users = read(&self.inner.users)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserAccount>, StorageError> {
        let users = read(&self.inner.users)?;
        Ok(page(&users, limit, offset))
    }

    async fn upsert(&self, user: UserAccount) -> Result<(), StorageError> {
        let mut users = write(&self.inner.users)?;
        match users.iter().position(|u| u.id == user.id) {
            Some(index) => users[index] = user,
            None => users.push(user),
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StorageError> {
        let mut users = write(&self.inner.users)?;
        users.retain(|u| u.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_core::ProblemPriority;
    use amm_core::ProblemStatus;

    fn mission(reference: &str) -> Mission {
        let now = now_epoch_millis();
        Mission {
            id: MissionId::new(),
            reference: reference.to_string(),
            airport: "JFK".to_string(),
            date_start: "2025-05-01".to_string(),
            date_finish: "2025-05-03".to_string(),
            duration: "2d".to_string(),
            problem: "Radar issue".to_string(),
            status: MissionStatus::New,
            assignment: AssignmentState::New,
            group_chief: "houcine".to_string(),
            pilot: "ahmed".to_string(),
            data_analyst: "sara".to_string(),
            created_at_ms: now,
            updated_at_ms: now,
        }
    }

    #[tokio::test]
    async fn mission_round_trip() {
        let store = MemoryStore::new();
        let created = mission("M100");
        let id = created.id;
        MissionRepository::upsert(&store, created).await.unwrap();

        let fetched = MissionRepository::get(&store, id).await.unwrap().unwrap();
        assert_eq!(fetched.reference, "M100");

        let by_ref = store.find_by_reference("M100").await.unwrap().unwrap();
        assert_eq!(by_ref.id, id);

        MissionRepository::delete(&store, id).await.unwrap();
        assert!(MissionRepository::get(&store, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_by_reference_returns_first_match() {
        let store = MemoryStore::new();
        let first = mission("M200");
        let first_id = first.id;
        MissionRepository::upsert(&store, first).await.unwrap();
        MissionRepository::upsert(&store, mission("M201")).await.unwrap();

        let found = store.find_by_reference("M200").await.unwrap().unwrap();
        assert_eq!(found.id, first_id);
        assert!(store.find_by_reference("M999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn take_by_reference_consumes_notification() {
        let store = MemoryStore::new();
        store
            .push(Notification {
                id: amm_core::NotificationId::new(),
                mission_id: MissionId::new(),
                mission_ref: "M300".to_string(),
                airport: "LAX".to_string(),
                problem: "Comms check".to_string(),
                created_at_ms: now_epoch_millis(),
            })
            .await
            .unwrap();

        let taken = store.take_by_reference("M300").await.unwrap();
        assert!(taken.is_some());
        assert!(store.take_by_reference("M300").await.unwrap().is_none());
        assert!(NotificationRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn problem_upsert_updates_in_place() {
        let store = MemoryStore::new();
        let now = now_epoch_millis();
        let mut problem = ProblemReport {
            id: ProblemReportId::new(),
            airport: "JFK".to_string(),
            system: "ILS".to_string(),
            priority: ProblemPriority::High,
            reporter: "airport1".to_string(),
            contact: "ops@jfk.example".to_string(),
            date: "2025-06-01".to_string(),
            description: "Glide slope drift".to_string(),
            impact: "Approaches limited".to_string(),
            additional_info: String::new(),
            status: ProblemStatus::New,
            created_at_ms: now,
            updated_at_ms: now,
        };
        ProblemReportRepository::upsert(&store, problem.clone()).await.unwrap();

        problem.status = ProblemStatus::InProgress;
        ProblemReportRepository::upsert(&store, problem.clone()).await.unwrap();

        let listed = ProblemReportRepository::list(&store, 100, 0).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, ProblemStatus::InProgress);
    }

    #[tokio::test]
    async fn demo_data_seeds_expected_collections() {
        let store = MemoryStore::with_demo_data();
        assert_eq!(MissionRepository::list(&store, 100, 0).await.unwrap().len(), 2);
        assert_eq!(SparePartRepository::list(&store, 100, 0).await.unwrap().len(), 2);
        assert_eq!(UserRepository::list(&store, 100, 0).await.unwrap().len(), 3);
        assert_eq!(
            CertificateRepository::list(&store, 100, 0).await.unwrap().len(),
            2
        );
        let battery = store.find_by_name("Battery").await.unwrap().unwrap();
        assert!(battery.is_low_stock());
    }

    #[tokio::test]
    async fn list_paginates() {
        let store = MemoryStore::new();
        for index in 0..5 {
            MissionRepository::upsert(&store, mission(&format!("M{index}"))).await.unwrap();
        }
        let window = MissionRepository::list(&store, 2, 2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].reference, "M2");
        assert_eq!(window[1].reference, "M3");
    }
}
