use amm_core::{
    AmmError, AmmResult, ErrorCode, PartId, PartUsage, SparePart, UsageId, now_epoch_millis,
};
use amm_storage::{PartUsageRepository, SparePartRepository, StorageError};
use serde::Deserialize;
use std::sync::Arc;

const LIST_ALL: usize = usize::MAX;

#[derive(Debug, Clone, Deserialize)]
pub struct PartDraft {
    pub part_number: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub quantity: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageRequest {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub note: Option<String>,
}

fn storage_error(err: StorageError) -> AmmError {
    AmmError::new(ErrorCode::Internal, err.message)
}

/// Spare-parts stock. `use_parts` is the only guarded decrement; upserts
/// overwrite freely, so the low-stock report is recomputed on every read.
pub struct Inventory<S> {
    store: Arc<S>,
}

impl<S> Inventory<S>
where
    S: SparePartRepository + PartUsageRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Insert, or overwrite the part carrying the same part number.
    pub async fn upsert_part(&self, draft: PartDraft) -> AmmResult<SparePart> {
        if draft.part_number.trim().is_empty() {
            return Err(AmmError::invalid_input("part number is required"));
        }
        if draft.name.trim().is_empty() {
            return Err(AmmError::invalid_input("part name is required"));
        }

        let now = now_epoch_millis();
        let existing = self
            .existing_by_part_number(&draft.part_number)
            .await?;
        let part = match existing {
            Some(mut part) => {
                part.name = draft.name;
                part.description = draft.description;
                part.quantity = draft.quantity;
                part.minimum = draft.minimum;
                part.updated_at_ms = now;
                part
            }
            None => SparePart {
                id: PartId::new(),
                part_number: draft.part_number,
                name: draft.name,
                description: draft.description,
                quantity: draft.quantity,
                minimum: draft.minimum,
                created_at_ms: now,
                updated_at_ms: now,
            },
        };
        self.store
            .upsert(part.clone())
            .await
            .map_err(storage_error)?;
        Ok(part)
    }

    /// Guarded decrement: the running quantity can never go negative. A
    /// rejected request leaves stock untouched.
    pub async fn use_parts(&self, request: UsageRequest, used_by: &str) -> AmmResult<PartUsage> {
        if request.quantity == 0 {
            return Err(AmmError::invalid_input("usage quantity must be positive"));
        }
        let mut part = self
            .store
            .find_by_name(&request.name)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| AmmError::not_found(format!("no spare part named {}", request.name)))?;

        if part.quantity < request.quantity {
            return Err(AmmError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "insufficient stock: only {} {}(s) available",
                    part.quantity, part.name
                ),
            ));
        }

        part.quantity -= request.quantity;
        part.updated_at_ms = now_epoch_millis();
        self.store
            .upsert(part.clone())
            .await
            .map_err(storage_error)?;

        let usage = PartUsage {
            id: UsageId::new(),
            part_id: part.id,
            part_number: part.part_number.clone(),
            name: part.name.clone(),
            quantity_used: request.quantity,
            used_by: used_by.to_string(),
            note: request.note,
            used_at_ms: now_epoch_millis(),
        };
        self.store
            .append(usage.clone())
            .await
            .map_err(storage_error)?;

        tracing::info!(
            part = %usage.name,
            quantity = usage.quantity_used,
            remaining = part.quantity,
            user = %usage.used_by,
            "spare parts used"
        );
        metrics::counter!("amm_parts_used_total").increment(u64::from(usage.quantity_used));
        if part.is_low_stock() {
            tracing::warn!(
                part = %part.name,
                quantity = part.quantity,
                minimum = part.minimum,
                "spare part at or below minimum stock"
            );
        }
        Ok(usage)
    }

    /// Recomputed from the full collection on every call; never cached.
    pub async fn low_stock_report(&self) -> AmmResult<Vec<SparePart>> {
        let parts = SparePartRepository::list(self.store.as_ref(), LIST_ALL, 0)
            .await
            .map_err(storage_error)?;
        Ok(parts.into_iter().filter(SparePart::is_low_stock).collect())
    }

    /// Usage entries, most recent first.
    pub async fn usage_history(&self) -> AmmResult<Vec<PartUsage>> {
        let mut usage = PartUsageRepository::list(self.store.as_ref())
            .await
            .map_err(storage_error)?;
        usage.reverse();
        Ok(usage)
    }

    async fn existing_by_part_number(&self, part_number: &str) -> AmmResult<Option<SparePart>> {
        let parts = SparePartRepository::list(self.store.as_ref(), LIST_ALL, 0)
            .await
            .map_err(storage_error)?;
        Ok(parts.into_iter().find(|p| p.part_number == part_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_storage_memory::MemoryStore;

    fn inventory() -> Inventory<MemoryStore> {
        Inventory::new(Arc::new(MemoryStore::new()))
    }

    fn gimbal() -> PartDraft {
        PartDraft {
            part_number: "P010".to_string(),
            name: "Gimbal".to_string(),
            description: "Camera gimbal".to_string(),
            quantity: 4,
            minimum: 5,
        }
    }

    fn usage(name: &str, quantity: u32) -> UsageRequest {
        UsageRequest {
            name: name.to_string(),
            quantity,
            note: None,
        }
    }

    #[tokio::test]
    async fn low_stock_part_stays_low_after_use() {
        let inventory = inventory();
        inventory.upsert_part(gimbal()).await.unwrap();

        let low = inventory.low_stock_report().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Gimbal");

        inventory
            .use_parts(usage("Gimbal", 1), "houcine")
            .await
            .unwrap();
        let low = inventory.low_stock_report().await.unwrap();
        assert_eq!(low[0].quantity, 3);

        let err = inventory
            .use_parts(usage("Gimbal", 10), "houcine")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        let low = inventory.low_stock_report().await.unwrap();
        assert_eq!(low[0].quantity, 3);
    }

    #[tokio::test]
    async fn quantity_never_goes_negative() {
        let inventory = inventory();
        inventory.upsert_part(gimbal()).await.unwrap();

        for _ in 0..4 {
            inventory
                .use_parts(usage("Gimbal", 1), "houcine")
                .await
                .unwrap();
        }
        let err = inventory
            .use_parts(usage("Gimbal", 1), "houcine")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let low = inventory.low_stock_report().await.unwrap();
        assert_eq!(low[0].quantity, 0);
    }

    #[tokio::test]
    async fn unknown_part_is_not_found() {
        let inventory = inventory();
        let err = inventory
            .use_parts(usage("Flux capacitor", 1), "houcine")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn zero_quantity_is_invalid() {
        let inventory = inventory();
        inventory.upsert_part(gimbal()).await.unwrap();
        let err = inventory
            .use_parts(usage("Gimbal", 0), "houcine")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn empty_collection_reports_no_low_stock() {
        let inventory = inventory();
        assert!(inventory.low_stock_report().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn usage_history_records_actor_and_note() {
        let inventory = inventory();
        inventory.upsert_part(gimbal()).await.unwrap();
        inventory
            .use_parts(
                UsageRequest {
                    name: "Gimbal".to_string(),
                    quantity: 2,
                    note: Some("Field swap at JFK".to_string()),
                },
                "houcine",
            )
            .await
            .unwrap();
        inventory
            .use_parts(usage("Gimbal", 1), "chief")
            .await
            .unwrap();

        let history = inventory.usage_history().await.unwrap();
        assert_eq!(history.len(), 2);
        // Most recent first.
        assert_eq!(history[0].used_by, "chief");
        assert_eq!(history[1].quantity_used, 2);
        assert_eq!(history[1].note.as_deref(), Some("Field swap at JFK"));
    }

    #[tokio::test]
    async fn upsert_overwrites_by_part_number() {
        let inventory = inventory();
        let first = inventory.upsert_part(gimbal()).await.unwrap();
        let mut replacement = gimbal();
        replacement.quantity = 9;
        let second = inventory.upsert_part(replacement).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 9);
        assert!(inventory.low_stock_report().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_part_number_is_invalid() {
        let inventory = inventory();
        let mut blank = gimbal();
        blank.part_number = "  ".to_string();
        let err = inventory.upsert_part(blank).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
