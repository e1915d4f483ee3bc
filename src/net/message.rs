use std::collections::HashMap;

use tokio::sync::oneshot::Sender;

use crate::ArcStr;

use super::NetError;

/// Messages that can be sent to the networking actor.
#[derive(Debug)]
pub enum Message {
    /// Performs an HTTP GET request to the specified URL
    Get {
        url: ArcStr,
        headers: Option<HashMap<ArcStr, ArcStr>>,
        tx: Sender<Result<ArcStr, NetError>>,
    },
}
