use std::{collections::HashMap, path::Path, path::PathBuf, str::FromStr};

use log::LevelFilter;
use time::{Date, OffsetDateTime};

use crate::api::err::{RosterError, RosterResult};
use crate::api::validator::parse_date;

pub const LOG_LEVEL_KEY: &str = "ROSTER_LOG_LEVEL";
pub const LOG_FILE_KEY: &str = "ROSTER_LOG_FILE";
pub const TODAY_KEY: &str = "ROSTER_TODAY";

/// 运行配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    // 日志级别
    pub log_level: LevelFilter,
    // 日志文件, 未设置时只输出到终端
    pub log_file: Option<PathBuf>,
    // 固定的"今天", 用于演示和测试
    pub today: Option<Date>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            log_file: None,
            today: None,
        }
    }
}

impl Settings {
    /// Loads `.env` (if there is one) into the process environment, then
    /// reads the settings from it.
    pub fn load() -> RosterResult<Self> {
        match dotenv::dotenv() {
            Ok(_) => {}
            Err(dotenv::Error::Io(_)) => {}
            Err(err) => return Err(err.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads a specific `.env` file without touching the process environment.
    pub fn from_env_file(path: &Path) -> RosterResult<Self> {
        let mut values = HashMap::new();
        // `from_path_iter` only fails on opening the file; keep that as an I/O error.
        let iter = dotenv::from_path_iter(path).map_err(|err| match err {
            dotenv::Error::Io(err) => RosterError::Io(err),
            other => other.into(),
        })?;
        for item in iter {
            let (key, value) = item?;
            values.insert(key, value);
        }
        Self::from_lookup(|key| values.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> RosterResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(level) = non_empty(lookup(LOG_LEVEL_KEY)) {
            settings.log_level = LevelFilter::from_str(&level).map_err(|_| {
                RosterError::Config(format!("{} has unknown level '{}'", LOG_LEVEL_KEY, level))
            })?;
        }
        settings.log_file = non_empty(lookup(LOG_FILE_KEY)).map(PathBuf::from);
        if let Some(raw) = non_empty(lookup(TODAY_KEY)) {
            let today = parse_date(&raw).ok_or_else(|| {
                RosterError::Config(format!("{} must look like YYYY-MM-DD, got '{}'", TODAY_KEY, raw))
            })?;
            settings.today = Some(today);
        }

        Ok(settings)
    }

    /// The pinned date, or the local date (UTC when the offset is unknown).
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| {
            OffsetDateTime::now_local()
                .unwrap_or_else(|_| OffsetDateTime::now_utc())
                .date()
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
