use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ArcStr;

/// A company news story as published by Finnhub.
///
/// Only the fields the service displays are kept; see
/// <https://finnhub.io/docs/api/company-news> for the full payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Identifier assigned by the source
    pub id: i64,
    /// Publication time, sent as UNIX seconds in the `datetime` field
    #[serde(rename = "datetime", with = "chrono::serde::ts_seconds")]
    pub published_at: DateTime<Utc>,
    pub headline: ArcStr,
    #[serde(default)]
    pub summary: ArcStr,
    #[serde(default)]
    pub source: ArcStr,
    pub url: ArcStr,
}

/// The arguments of one company news request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub symbol: ArcStr,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[cfg(test)]
impl NewsItem {
    /// Builds a story whose fields are all derived from `id`, published
    /// `id` minutes after 2024-03-04 09:00 UTC.
    pub fn sample(id: i64) -> Self {
        use chrono::TimeZone;

        let base = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        Self {
            id,
            published_at: base + chrono::Duration::minutes(id),
            headline: ArcStr::from(format!("Headline {id}")),
            summary: ArcStr::from(format!("Summary {id}")),
            source: ArcStr::from("Reuters"),
            url: ArcStr::from(format!("https://news.test/{id}")),
        }
    }
}
