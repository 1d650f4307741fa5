use std::sync::Arc;

use crate::auth::JwtVerifier;
use crate::config::AppConfig;
use crate::database::store::RadarStore;
use crate::services::RadarService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn RadarStore>,
    radar: RadarService,
    verifier: JwtVerifier,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn RadarStore>, verifier: JwtVerifier) -> Self {
        let radar = RadarService::new(store.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                radar,
                verifier,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn RadarStore> {
        &self.inner.store
    }

    pub fn radar(&self) -> &RadarService {
        &self.inner.radar
    }

    pub fn verifier(&self) -> &JwtVerifier {
        &self.inner.verifier
    }
}
