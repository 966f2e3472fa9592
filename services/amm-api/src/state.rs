use amm_config::ServiceConfig;
use amm_policy::RolePolicy;
use amm_storage_memory::MemoryStore;
use amm_workflow::{Inventory, MissionLifecycle};
use std::sync::Arc;

pub struct AppState {
    pub config: ServiceConfig,
    pub policy: RolePolicy,
    pub store: Arc<MemoryStore>,
    pub lifecycle: MissionLifecycle<MemoryStore>,
    pub inventory: Inventory<MemoryStore>,
}

impl AppState {
    pub fn from_config(config: ServiceConfig) -> Self {
        let store = if config.seed_demo_data {
            Arc::new(MemoryStore::with_demo_data())
        } else {
            Arc::new(MemoryStore::new())
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServiceConfig, store: Arc<MemoryStore>) -> Self {
        Self {
            config,
            policy: RolePolicy::new(),
            lifecycle: MissionLifecycle::new(store.clone()),
            inventory: Inventory::new(store.clone()),
            store,
        }
    }
}
