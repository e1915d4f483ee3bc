use std::fmt::Write;

use crate::api::finnhub::NewsItem;

const TITLE: &str = "Recent News Stories";
const ITEM_RULE: &str = "===============================";
const HEADLINE_RULE: &str = "-------------------------------";
const DATETIME_FORMAT: &str = "%B, %-d %Y %H:%M%p";

/// Renders news items as the plain text page served on `/news`.
///
/// ```text
/// Recent News Stories
/// ===============================
///
/// <headline> -- March, 4 2024 10:00AM
/// -------------------------------
/// Summary: <summary>
/// Read more: <url>
///
/// ```
///
/// Times are shown in UTC. An empty slice renders the title line only.
pub fn format_news(items: &[NewsItem]) -> String {
    let mut page = format!("{TITLE}\n");

    for item in items {
        // Writing into a String never fails
        let _ = write!(
            page,
            "{ITEM_RULE}\n\n{} -- {}\n{HEADLINE_RULE}\nSummary: {}\nRead more: {}\n\n",
            item.headline,
            item.published_at.format(DATETIME_FORMAT),
            item.summary,
            item.url,
        );
    }

    page
}
