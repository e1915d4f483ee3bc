use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{FetchError, NewsItem, NewsQuery};
use crate::net::NetError;

#[derive(Debug, Default)]
struct MockData {
    responses: VecDeque<Result<Vec<NewsItem>, FetchError>>,
    queries: Vec<NewsQuery>,
}

/// Mock implementation of the Finnhub API for testing purposes.
///
/// Answers requests from a queue of canned results, one per request, and
/// remembers every query it was asked.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<MockData>>,
}

impl Mock {
    pub fn new(responses: impl IntoIterator<Item = Result<Vec<NewsItem>, FetchError>>) -> Self {
        Self {
            data: Arc::new(Mutex::new(MockData {
                responses: responses.into_iter().collect(),
                queries: Vec::new(),
            })),
        }
    }

    /// Pops the next queued result. Once the queue is drained every request
    /// fails with a transport error.
    pub async fn company_news(&self, query: NewsQuery) -> Result<Vec<NewsItem>, FetchError> {
        let mut data = self.data.lock().await;
        data.queries.push(query);
        data.responses.pop_front().unwrap_or_else(|| {
            Err(FetchError::Net(NetError::Transport(
                "no mock response queued".to_string(),
            )))
        })
    }

    pub async fn push_response(&self, response: Result<Vec<NewsItem>, FetchError>) {
        self.data.lock().await.responses.push_back(response);
    }

    pub async fn queries(&self) -> Vec<NewsQuery> {
        self.data.lock().await.queries.clone()
    }
}
