use anyhow::Context;
use tokio::{fs::File, io::AsyncWriteExt, task::JoinHandle};

use super::data::{LogLevel, LogMessage};
use super::message::Message;
use crate::ArcPath;

const LOG_PREFIX: &str = "snowflake-news_";
const SCOPE: &str = "log";

/// The core of the logging system that manages logging to both stderr and log files.
///
/// Every message is appended to a timestamped log file and to `latest.log`.
/// Messages at or above `print_level` are echoed to stderr as they arrive,
/// since a long running server has no natural point to dump a buffer.
#[derive(Debug)]
pub struct Core {
    /// Directory where log files are stored
    log_dir: ArcPath,
    /// Handle to the current log file
    log_file: File,
    /// Handle to the "latest" log file
    latest_log_file: File,
    /// Minimum level of messages to be printed to stderr
    print_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
}

impl Core {
    pub async fn build(level: LogLevel, max_age: usize, log_dir: ArcPath) -> anyhow::Result<Self> {
        let log_path = log_dir.join(format!(
            "{LOG_PREFIX}{}.log",
            chrono::Utc::now().format("%Y-%m-%d-%H-%M-%S")
        ));
        let latest_log_path = log_dir.join("latest.log");

        tokio::fs::create_dir_all(&log_dir)
            .await
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_file = File::create(&log_path)
            .await
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        let latest_log_file = File::create(&latest_log_path).await.with_context(|| {
            format!(
                "Failed to create latest log file: {}",
                latest_log_path.display()
            )
        })?;

        Ok(Self {
            log_dir,
            log_file,
            latest_log_file,
            print_level: level,
            max_age,
        })
    }

    pub fn spawn(mut self) -> (super::Log, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Message::Log(msg) => {
                        self.log(msg).await;
                    }
                    Message::Flush { tx } => {
                        rx.close();
                        while let Ok(Message::Log(msg)) = rx.try_recv() {
                            self.log(msg).await;
                        }
                        let _ = tx.send(());
                        break;
                    }
                    Message::CollectGarbage => {
                        self.collect_garbage().await;
                    }
                }
            }
        });
        (super::Log::Actual(tx), handle)
    }

    async fn log(&mut self, message: LogMessage) {
        let line = format!("{}\n", &message);

        for file in [&mut self.log_file, &mut self.latest_log_file] {
            if let Err(err) = write_line(file, &line).await {
                eprintln!("Failed to write to log file: {err}");
            }
        }

        if message.level >= self.print_level {
            eprint!("{line}");
        }
    }

    async fn collect_garbage(&mut self) {
        if self.max_age == 0 {
            return;
        }
        let now = std::time::SystemTime::now();
        let Ok(mut entries) = tokio::fs::read_dir(&self.log_dir).await else {
            self.log(LogMessage {
                level: LogLevel::Error,
                scope: SCOPE,
                message: "Failed to read the logs directory during garbage collection".into(),
            })
            .await;
            return;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let filename = entry.file_name();
            let filename = filename.to_string_lossy();
            if !filename.starts_with(LOG_PREFIX) || !filename.ends_with(".log") {
                continue;
            }
            let Ok(Ok(modified)) = entry.metadata().await.map(|meta| meta.modified()) else {
                continue;
            };
            let Ok(age) = now.duration_since(modified) else {
                continue;
            };
            let age = age.as_secs() / 60 / 60 / 24;
            if age as usize > self.max_age && tokio::fs::remove_file(entry.path()).await.is_err() {
                self.log(LogMessage {
                    level: LogLevel::Warning,
                    scope: SCOPE,
                    message: format!("Failed to remove the log file: {filename}"),
                })
                .await;
            }
        }
    }
}

async fn write_line(file: &mut File, line: &str) -> std::io::Result<()> {
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
