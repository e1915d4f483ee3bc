use std::collections::HashMap;

use super::*;
use crate::app::config::{Config, Data};

#[tokio::test]
async fn test_mock_returns_canned_body() {
    let url = ArcStr::from("https://example.test/news");
    let net = Net::mock(HashMap::from([(url.clone(), Ok(ArcStr::from("[]")))]));

    let body = net.get(url.clone(), None).await;
    assert_eq!(body, Ok(ArcStr::from("[]")));
    assert_eq!(net.requested_urls().await, Some(vec![url]));
}

#[tokio::test]
async fn test_mock_returns_canned_status_failure() {
    let url = ArcStr::from("https://example.test/news");
    let net = Net::mock(HashMap::from([(url.clone(), Err(NetError::Status(429)))]));

    assert_eq!(net.get(url, None).await, Err(NetError::Status(429)));
}

#[tokio::test]
async fn test_mock_empty_fails_with_transport_error() {
    let net = Net::mock_empty();
    let result = net.get(ArcStr::from("https://unknown.test"), None).await;
    assert!(matches!(result, Err(NetError::Transport(_))));
}

#[tokio::test]
async fn test_actual_net_creation() -> anyhow::Result<()> {
    let net = Net::spawn(Config::mock(Data::default()), Log::mock()).await?;
    assert!(matches!(net, Net::Actual(_)));
    assert!(net.requested_urls().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_actual_net_reports_transport_failure() -> anyhow::Result<()> {
    let log = Log::mock();
    let net = Net::spawn(Config::mock(Data::default()), log.clone()).await?;

    // Nothing listens on the discard port of the loopback interface.
    let result = net.get(ArcStr::from("http://127.0.0.1:9/news"), None).await;
    assert!(matches!(result, Err(NetError::Transport(_))));
    assert_eq!(log.get_messages().unwrap().len(), 1);
    Ok(())
}
