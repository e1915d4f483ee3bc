use tokio::sync::oneshot;

use super::data::LogMessage;

/// Messages that can be sent to the logging actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Writes everything queued before it, acknowledges and stops the actor
    Flush { tx: oneshot::Sender<()> },
    /// Runs the log garbage collector to delete old log files
    CollectGarbage,
}
