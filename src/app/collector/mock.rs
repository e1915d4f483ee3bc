use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::{CollectorState, RefreshStats};

/// Canned answers of a mock collector.
#[derive(Debug, Clone)]
pub struct MockData {
    pub stats: RefreshStats,
    pub state: CollectorState,
}

impl Default for MockData {
    fn default() -> Self {
        Self {
            stats: RefreshStats::default(),
            state: CollectorState::Running,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    pub fn new(data: MockData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn stats(&self) -> RefreshStats {
        self.data.lock().await.stats.clone()
    }

    pub async fn state(&self) -> CollectorState {
        self.data.lock().await.state
    }
}
