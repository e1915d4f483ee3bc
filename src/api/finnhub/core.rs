use std::collections::HashMap;

use reqwest::Url;
use tokio::task::JoinHandle;

use super::{FetchError, FinnhubApi, NewsItem, NewsQuery, message::FinnhubApiMessage, parse};
use crate::{ArcStr, net::Net};

/// Header carrying the API token on every request
pub const TOKEN_HEADER: &str = "X-Finnhub-Token";

const COMPANY_NEWS_PATH: &str = "/api/v1/company-news";

/// The core of the Finnhub API actor.
///
/// Builds company news requests, sends them through the networking actor
/// and decodes the responses.
#[derive(Debug)]
pub struct Core {
    /// The networking actor for making HTTP requests
    net: Net,
    /// The base domain for Finnhub API requests
    domain: ArcStr,
    /// API token sent in the [`TOKEN_HEADER`] header
    token: ArcStr,
}

impl Core {
    pub fn new(net: Net, token: ArcStr) -> Self {
        Self::with_domain(net, token, ArcStr::from("https://finnhub.io"))
    }

    pub fn with_domain(net: Net, token: ArcStr, domain: ArcStr) -> Self {
        Self { net, domain, token }
    }

    /// Transforms the Finnhub API core instance into an actor.
    ///
    /// # Returns
    /// A tuple containing:
    /// - The `FinnhubApi` interface
    /// - A join handle for the spawned task
    pub fn spawn(self) -> (FinnhubApi, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);

        let handle = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    FinnhubApiMessage::CompanyNews { query, tx } => {
                        let response = self.handle_company_news(&query).await;
                        let _ = tx.send(response);
                    }
                }
            }
        });

        (FinnhubApi::Actual(tx), handle)
    }

    /// Builds the company news URL, with the query parameters in the order
    /// `symbol`, `from`, `to` and dates as `YYYY-MM-DD`.
    pub fn company_news_url(&self, query: &NewsQuery) -> Result<ArcStr, FetchError> {
        let base = format!("{}{COMPANY_NEWS_PATH}", self.domain.trim_end_matches('/'));
        let from = query.from.format("%Y-%m-%d").to_string();
        let to = query.to.format("%Y-%m-%d").to_string();

        let url = Url::parse_with_params(
            &base,
            [
                ("symbol", &*query.symbol),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ],
        )
        .map_err(|err| FetchError::InvalidUrl(format!("{base}: {err}")))?;

        Ok(ArcStr::from(String::from(url)))
    }

    pub fn headers(&self) -> HashMap<ArcStr, ArcStr> {
        HashMap::from([(ArcStr::from(TOKEN_HEADER), self.token.clone())])
    }

    async fn handle_company_news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, FetchError> {
        let url = self.company_news_url(query)?;
        let body = self.net.get(url, Some(self.headers())).await?;
        Ok(parse::parse_company_news(&body)?)
    }
}
