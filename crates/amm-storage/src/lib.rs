use amm_core::{
    Certificate, CertificateId, Document, DocumentId, MaintenanceRecord, MaintenanceRecordId,
    Mission, MissionId, MissionReport, MissionReportId, Notification, PartId, PartUsage,
    ProblemReport, ProblemReportId, SparePart, UserAccount, UserId,
};
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone)]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

#[async_trait]
pub trait MissionRepository: Send + Sync {
    async fn get(&self, id: MissionId) -> Result<Option<Mission>, StorageError>;
    /// First match wins; references are unique at the controller layer.
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Mission>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Mission>, StorageError>;
    async fn upsert(&self, mission: Mission) -> Result<(), StorageError>;
    async fn delete(&self, id: MissionId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Notification>, StorageError>;
    async fn push(&self, notification: Notification) -> Result<(), StorageError>;
    /// Removes and returns the first pending notification for the reference.
    async fn take_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Notification>, StorageError>;
}

#[async_trait]
pub trait ProblemReportRepository: Send + Sync {
    async fn get(&self, id: ProblemReportId) -> Result<Option<ProblemReport>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<ProblemReport>, StorageError>;
    async fn upsert(&self, report: ProblemReport) -> Result<(), StorageError>;
}

#[async_trait]
pub trait MissionReportRepository: Send + Sync {
    async fn get(&self, id: MissionReportId) -> Result<Option<MissionReport>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<MissionReport>, StorageError>;
    async fn upsert(&self, report: MissionReport) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SparePartRepository: Send + Sync {
    async fn get(&self, id: PartId) -> Result<Option<SparePart>, StorageError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<SparePart>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<SparePart>, StorageError>;
    async fn upsert(&self, part: SparePart) -> Result<(), StorageError>;
    async fn delete(&self, id: PartId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait PartUsageRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<PartUsage>, StorageError>;
    async fn append(&self, usage: PartUsage) -> Result<(), StorageError>;
}

#[async_trait]
pub trait MaintenanceRecordRepository: Send + Sync {
    async fn get(&self, id: MaintenanceRecordId)
    -> Result<Option<MaintenanceRecord>, StorageError>;
    async fn list(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<MaintenanceRecord>, StorageError>;
    async fn upsert(&self, record: MaintenanceRecord) -> Result<(), StorageError>;
}

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn get(&self, id: CertificateId) -> Result<Option<Certificate>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Certificate>, StorageError>;
    async fn upsert(&self, certificate: Certificate) -> Result<(), StorageError>;
    async fn delete(&self, id: CertificateId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn get(&self, id: DocumentId) -> Result<Option<Document>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<Document>, StorageError>;
    async fn upsert(&self, document: Document) -> Result<(), StorageError>;
    async fn delete(&self, id: DocumentId) -> Result<(), StorageError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<UserAccount>, StorageError>;
    async fn list(&self, limit: usize, offset: usize) -> Result<Vec<UserAccount>, StorageError>;
    async fn upsert(&self, user: UserAccount) -> Result<(), StorageError>;
    async fn delete(&self, id: UserId) -> Result<(), StorageError>;
}
