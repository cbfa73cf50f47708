use std::sync::Arc;

use crate::{config::AuthSettings, store::ProductStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub auth: Arc<AuthSettings>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, auth: AuthSettings) -> Self {
        Self {
            store,
            auth: Arc::new(auth),
        }
    }
}
