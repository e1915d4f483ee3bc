use super::NewsItem;

/// Decodes a company news response body. Finnhub returns the stories most
/// recent first; the order is kept as is.
pub fn parse_company_news(body: &str) -> Result<Vec<NewsItem>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "category": "company",
            "datetime": 1710000000,
            "headline": "Apple unveils new product",
            "id": 126012345,
            "image": "https://img.example.test/1.jpg",
            "related": "AAPL",
            "source": "Yahoo",
            "summary": "Apple announced something.",
            "url": "https://news.example.test/1"
        },
        {
            "category": "company",
            "datetime": 1709990000,
            "headline": "Analysts weigh in",
            "id": 126012300,
            "image": "",
            "related": "AAPL",
            "source": "MarketWatch",
            "summary": "",
            "url": "https://news.example.test/2"
        }
    ]"#;

    #[test]
    fn test_parse_company_news() {
        let items = parse_company_news(SAMPLE).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 126012345);
        assert_eq!(items[0].published_at.timestamp(), 1710000000);
        assert_eq!(&*items[0].headline, "Apple unveils new product");
        assert_eq!(&*items[0].source, "Yahoo");
        assert_eq!(&*items[1].url, "https://news.example.test/2");
        assert!(items[1].summary.is_empty());
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_company_news("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_error_object() {
        assert!(parse_company_news(r#"{"error":"Invalid API key"}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_headline() {
        assert!(parse_company_news(r#"[{"id":1,"datetime":0,"url":"u"}]"#).is_err());
    }
}
