use crate::sync::SyncController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SyncController>,
}

impl AppState {
    pub fn new(controller: Arc<SyncController>) -> Self {
        Self { controller }
    }
}
