use std::path::{Path, PathBuf};

use crate::{
    ArcPath, ArcStr,
    app::config::{Config, StrOpt},
};

/// Values given on the command line. They take precedence over the
/// configuration file for this run and are not written back to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub token: Option<ArcStr>,
    pub ticker: Option<ArcStr>,
    pub listen_addr: Option<ArcStr>,
}

impl Overrides {
    pub async fn apply(&self, config: &Config) {
        let values = [
            (StrOpt::ApiToken, &self.token),
            (StrOpt::Ticker, &self.ticker),
            (StrOpt::ListenAddr, &self.listen_addr),
        ];
        for (opt, value) in values {
            if let Some(value) = value {
                config.set_str(opt, value.clone()).await;
            }
        }
    }
}

/// `$HOME/.config/snowflake-news/config.toml`, or `config.toml` in the
/// working directory when `HOME` is not set.
pub fn default_config_path(home: Option<&Path>) -> ArcPath {
    match home {
        Some(home) => ArcPath::from(
            home.join(".config")
                .join("snowflake-news")
                .join("config.toml"),
        ),
        None => ArcPath::from(PathBuf::from("config.toml")),
    }
}
