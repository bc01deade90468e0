use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::Args;
use lib_skycal::sources::settings::USNO_BASE_URL;
use lib_skycal::sources::{Observer, SourceSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file read when `--config-path` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "skycal.conf";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown time zone `{0}`")]
    Timezone(String),
}

#[derive(Args, Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[arg(long, global = true, env = "SKYCAL_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[arg(long, global = true, env = "SKYCAL_BASE_URL", help = "USNO API root.")]
    pub base_url: Option<String>,

    #[arg(long, global = true, env = "SKYCAL_LATITUDE", allow_negative_numbers = true, help = "Observer latitude for eclipse visibility.")]
    pub latitude: Option<f64>,

    #[arg(long, global = true, env = "SKYCAL_LONGITUDE", allow_negative_numbers = true, help = "Observer longitude for eclipse visibility.")]
    pub longitude: Option<f64>,

    #[arg(long, global = true, env = "SKYCAL_HEIGHT", allow_negative_numbers = true, help = "Observer height in metres.")]
    pub height: Option<i32>,

    #[arg(long, global = true, env = "SKYCAL_TIMEOUT_SECS", help = "Per-request timeout in seconds.")]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true, env = "SKYCAL_MAX_RETRIES", help = "Retries for transient HTTP failures.")]
    pub max_retries: Option<u32>,

    #[arg(long, global = true, env = "SKYCAL_TIMEZONE", help = "IANA time zone deciding today's date (default: system local).")]
    pub timezone: Option<String>,

    #[arg(long, global = true, env = "SKYCAL_CATALOG_PATH", help = "JSON event catalog replacing the bundled one.")]
    pub catalog_path: Option<PathBuf>,

    #[arg(long, global = true, env = "SKYCAL_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "SKYCAL_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,
}

impl Config {
    // 'other' wins wherever it has a value
    fn merge(self, other: Config) -> Config {
        Config {
            config_path: other.config_path.or(self.config_path),
            base_url: other.base_url.or(self.base_url),
            latitude: other.latitude.or(self.latitude),
            longitude: other.longitude.or(self.longitude),
            height: other.height.or(self.height),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            max_retries: other.max_retries.or(self.max_retries),
            timezone: other.timezone.or(self.timezone),
            catalog_path: other.catalog_path.or(self.catalog_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
        }
    }

    fn defaults() -> Config {
        let observer = Observer::default();
        let settings = SourceSettings::default();
        Config {
            base_url: Some(USNO_BASE_URL.to_string()),
            latitude: Some(observer.latitude),
            longitude: Some(observer.longitude),
            height: Some(observer.height),
            timeout_secs: Some(settings.timeout_secs),
            max_retries: Some(settings.max_retries),
            log_dir: Some(PathBuf::from("./logs")),
            log_level: Some("info".to_string()),
            ..Default::default()
        }
    }

    /// Library-side settings.
    pub fn source_settings(&self) -> SourceSettings {
        let defaults = SourceSettings::default();
        SourceSettings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            observer: Observer {
                latitude: self.latitude.unwrap_or(defaults.observer.latitude),
                longitude: self.longitude.unwrap_or(defaults.observer.longitude),
                height: self.height.unwrap_or(defaults.observer.height),
            },
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
        }
    }

    /// The configured zone; `None` means the system zone.
    pub fn zone(&self) -> Result<Option<Tz>, SettingsError> {
        self.timezone
            .as_deref()
            .map(|name| name.parse::<Tz>().map_err(|_| SettingsError::Timezone(name.to_string())))
            .transpose()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from("./logs"))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

/// Today's civil date in `zone`, or in the system zone.
pub fn today(zone: Option<Tz>) -> NaiveDate {
    date_in_zone(Utc::now(), zone)
}

/// The civil date `now` falls on in `zone`. Read in the zone itself, never
/// from the UTC date: late evening west of Greenwich is already tomorrow in UTC.
pub fn date_in_zone(now: DateTime<Utc>, zone: Option<Tz>) -> NaiveDate {
    match zone {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.with_timezone(&Local).date_naive(),
    }
}

/// Layers defaults < config file < environment and command line.
///
/// `cli` is the already parsed command line (clap fills it from the
/// environment too). A missing default config file is fine; a missing file
/// named explicitly is an error, as is any file that does not parse.
pub fn load_config(cli: Config) -> Result<Config, SettingsError> {
    let mut current = Config::defaults();

    let (path, explicit) = match &cli.config_path {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if explicit || path.exists() {
        current = current.merge(read_config_file(&path)?);
    }

    Ok(current.merge(cli))
}

fn read_config_file(path: &Path) -> Result<Config, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn config_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn file_overrides_defaults_and_cli_overrides_file() {
        let file = config_file(r#"{ "latitude": 51.5, "maxRetries": 2, "logLevel": "debug" }"#);
        let cli = Config {
            config_path: Some(file.path().to_path_buf()),
            latitude: Some(-33.9),
            ..Default::default()
        };

        let config = load_config(cli).unwrap();
        let settings = config.source_settings();

        assert_eq!(settings.observer.latitude, -33.9);
        assert_eq!(settings.observer.longitude, 73.1147);
        assert_eq!(settings.max_retries, 2);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(settings.base_url, USNO_BASE_URL);
    }

    #[test]
    fn named_but_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Config {
            config_path: Some(dir.path().join("absent.conf")),
            ..Default::default()
        };
        assert!(matches!(load_config(cli), Err(SettingsError::Read { .. })));
    }

    #[test]
    fn broken_file_is_an_error() {
        let file = config_file("{ not json");
        let cli = Config {
            config_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(load_config(cli), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn zones_are_validated() {
        let mut config = Config::default();
        assert_eq!(config.zone().unwrap(), None);

        config.timezone = Some("Asia/Kolkata".into());
        assert_eq!(config.zone().unwrap(), Some(chrono_tz::Asia::Kolkata));

        config.timezone = Some("Mars/Olympus".into());
        assert!(matches!(config.zone(), Err(SettingsError::Timezone(_))));
    }

    #[test]
    fn evening_west_of_greenwich_stays_on_its_own_day() {
        // 03:30 UTC on 16 July is 23:30 on 15 July in New York (UTC-4).
        let now = Utc.with_ymd_and_hms(2025, 7, 16, 3, 30, 0).unwrap();
        let zone = Some(chrono_tz::America::New_York);
        assert_eq!(date_in_zone(now, zone), NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());

        let now = Utc.with_ymd_and_hms(2025, 7, 16, 6, 59, 0).unwrap();
        let zone = Some(chrono_tz::America::Los_Angeles);
        assert_eq!(date_in_zone(now, zone), NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
    }

    #[test]
    fn zone_ahead_of_utc_is_already_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();
        let zone = Some(chrono_tz::Asia::Kolkata);
        assert_eq!(date_in_zone(now, zone), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }
}
