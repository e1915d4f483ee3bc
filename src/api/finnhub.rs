use chrono::NaiveDate;
use tokio::sync::mpsc::Sender;

use crate::{ArcStr, net::Net};

mod core;
pub mod data;
mod error;
mod message;
mod mock;
pub mod parse;

pub use self::core::TOKEN_HEADER;
pub use data::{NewsItem, NewsQuery};
pub use error::FetchError;
pub use message::FinnhubApiMessage;

/// The Finnhub API actor that fetches company news.
///
/// This actor intermediates calls to the networking actor, turning a symbol
/// and a date range into an authenticated Finnhub request and decoding the
/// list of stories it returns.
///
/// # Examples
/// ```ignore
/// let finnhub = FinnhubApi::spawn(net, token);
/// let news = finnhub.company_news("AAPL".into(), from, to).await?;
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum FinnhubApi {
    /// A real Finnhub API actor that performs HTTP requests through the networking actor
    Actual(Sender<FinnhubApiMessage>),
    /// A mock implementation for testing
    Mock(mock::Mock),
}

impl FinnhubApi {
    /// Creates a new Finnhub API actor against `https://finnhub.io`.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    /// * `token` - API token sent with every request
    pub fn spawn(net: Net, token: ArcStr) -> Self {
        let (finnhub, _) = core::Core::new(net, token).spawn();
        finnhub
    }

    /// Creates a new Finnhub API actor with a custom domain.
    ///
    /// # Arguments
    /// * `net` - The networking actor for making HTTP requests
    /// * `token` - API token sent with every request
    /// * `domain` - The base domain for API requests, without a trailing path
    pub fn spawn_with_domain(net: Net, token: ArcStr, domain: ArcStr) -> Self {
        let (finnhub, _) = core::Core::with_domain(net, token, domain).spawn();
        finnhub
    }

    /// Creates a new mock Finnhub API that answers requests with `responses`,
    /// in order.
    pub fn mock(responses: impl IntoIterator<Item = Result<Vec<NewsItem>, FetchError>>) -> Self {
        Self::Mock(mock::Mock::new(responses))
    }

    /// Fetches the news published about `symbol` between `from` and `to`,
    /// both dates inclusive.
    ///
    /// # Returns
    /// The stories in the order Finnhub sent them, most recent first.
    pub async fn company_news(
        &self,
        symbol: ArcStr,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsItem>, FetchError> {
        let query = NewsQuery { symbol, from, to };
        match self {
            FinnhubApi::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(FinnhubApiMessage::CompanyNews { query, tx })
                    .await
                    .map_err(|_| FetchError::Closed)?;
                rx.await.map_err(|_| FetchError::Closed)?
            }
            FinnhubApi::Mock(mock) => mock.company_news(query).await,
        }
    }

    /// Queues one more result on a mock. Does nothing on the real actor.
    pub async fn push_mock_response(&self, response: Result<Vec<NewsItem>, FetchError>) {
        if let FinnhubApi::Mock(mock) = self {
            mock.push_response(response).await;
        }
    }

    /// Lists the queries a mock received, in request order.
    ///
    /// # Returns
    /// `None` for the real Finnhub API actor.
    pub async fn recorded_queries(&self) -> Option<Vec<NewsQuery>> {
        match self {
            FinnhubApi::Actual(_) => None,
            FinnhubApi::Mock(mock) => Some(mock.queries().await),
        }
    }
}
