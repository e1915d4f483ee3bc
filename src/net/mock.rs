use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::ArcStr;
use crate::net::NetError;

#[derive(Debug, Default)]
struct MockData {
    responses: HashMap<ArcStr, Result<ArcStr, NetError>>,
    requested: Vec<ArcStr>,
}

/// Mock implementation of the Net actor for testing purposes.
///
/// Holds a canned result for each URL so tests run without network access.
/// Unknown URLs fail like an unreachable host would.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    pub fn new(responses: HashMap<ArcStr, Result<ArcStr, NetError>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData {
                responses,
                requested: Vec::new(),
            })),
        }
    }

    /// Performs an HTTP GET request using mock responses. Headers are ignored.
    pub async fn get(
        &self,
        url: ArcStr,
        _headers: Option<HashMap<ArcStr, ArcStr>>,
    ) -> Result<ArcStr, NetError> {
        let mut data = self.data.lock().await;
        data.requested.push(url.clone());
        data.responses.get(&url).cloned().unwrap_or_else(|| {
            Err(NetError::Transport(format!(
                "GET request not found in mock responses: {url}"
            )))
        })
    }

    pub async fn requested_urls(&self) -> Vec<ArcStr> {
        self.data.lock().await.requested.clone()
    }
}
