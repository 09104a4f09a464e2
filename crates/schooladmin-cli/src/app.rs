//! Construction of the session manager and services from configuration.

use std::sync::Arc;

use tracing::debug;

use schooladmin_auth::{AuthService, FileKeyValueStore, SessionManager, SessionStore};
use schooladmin_core::config::AppConfig;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{HttpTransport, KeyValueStore};
use schooladmin_http::{ApiClient, ReqwestTransport};
use schooladmin_service::{
    AdminContext, AvailabilityService, BlockService, CatalogService, DashboardService,
    PreferenceService, ScheduleService, SchoolService, SlotService,
};

/// Everything a command needs, built once per process.
#[derive(Debug, Clone)]
pub struct App {
    pub config: AppConfig,
    pub session: Arc<SessionManager>,
    pub school: SchoolService,
    pub catalog: CatalogService,
    pub slots: SlotService,
    pub schedule: ScheduleService,
    pub availability: AvailabilityService,
    pub blocks: BlockService,
    pub dashboard: DashboardService,
    pub preferences: PreferenceService,
}

impl App {
    /// Production wiring: `reqwest` transport and the JSON session file.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        let kv = Arc::new(FileKeyValueStore::new(&config.storage.session_file));
        debug!(
            base_url = %config.api.base_url,
            session_file = %config.storage.session_file,
            "Wiring console"
        );
        Ok(Self::build(config, transport, kv))
    }

    /// Wire the application over any transport and key-value backend.
    pub fn build(
        config: AppConfig,
        transport: Arc<dyn HttpTransport>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let store = SessionStore::new(kv.clone());
        let api = ApiClient::new(transport, Arc::new(store.clone()));
        let auth = AuthService::new(api.clone(), store.clone());
        let session = Arc::new(SessionManager::new(auth, store, config.auth.clone()));

        let slots = SlotService::new(api.clone(), config.scheduling.clone());
        Self {
            school: SchoolService::new(api.clone()),
            catalog: CatalogService::new(api.clone()),
            schedule: ScheduleService::new(slots.clone(), config.scheduling.clone()),
            availability: AvailabilityService::new(slots.clone(), config.scheduling.clone()),
            blocks: BlockService::new(api.clone()),
            dashboard: DashboardService::new(api),
            preferences: PreferenceService::new(kv),
            slots,
            session,
            config,
        }
    }

    /// Context for dashboard commands; fails unless signed in with a
    /// permanent password.
    pub async fn context(&self) -> AppResult<AdminContext> {
        AdminContext::from_session(&self.session).await
    }
}
