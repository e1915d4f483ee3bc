use tokio::sync::oneshot;

use super::{FetchError, NewsItem, NewsQuery};

/// Messages that can be sent to the Finnhub API actor.
#[derive(Debug)]
pub enum FinnhubApiMessage {
    /// Fetch the company news published in the query's date range
    CompanyNews {
        query: NewsQuery,
        tx: oneshot::Sender<Result<Vec<NewsItem>, FetchError>>,
    },
}
