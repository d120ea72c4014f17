use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{FormError, Result},
    utils::{app_data_dir, config_file_in},
};

const TMP_SUFFIX: &str = "tmp";

/// Settings for the posting form and the vacancy API it submits to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// The single currency unit offered by the salary control.
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_salary_floor")]
    pub salary_floor: u64,
    #[serde(default = "Config::default_schedule_start")]
    pub schedule_start: String,
    #[serde(default = "Config::default_schedule_end")]
    pub schedule_end: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            company_id: None,
            auth_token: None,
            currency: Self::default_currency(),
            salary_floor: Self::default_salary_floor(),
            schedule_start: Self::default_schedule_start(),
            schedule_end: Self::default_schedule_end(),
            request_timeout_secs: Self::default_request_timeout_secs(),
        }
    }
}

impl Config {
    fn default_api_base_url() -> String {
        "http://localhost:3000/api".into()
    }

    fn default_currency() -> String {
        "mxn".into()
    }

    fn default_salary_floor() -> u64 {
        1000
    }

    fn default_schedule_start() -> String {
        "09:00".into()
    }

    fn default_schedule_end() -> String {
        "17:00".into()
    }

    fn default_request_timeout_secs() -> u64 {
        30
    }
}

/// Loads and persists [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            FormError::Configuration(format!("`{}` has no parent", self.path.display()))
        })?;
        fs::create_dir_all(parent)?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let tmp = tmp_path(Path::new("/a/config.json"));
        assert_eq!(tmp, PathBuf::from("/a/config.json.tmp"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api_base_url":"https://api.example.com"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.salary_floor, 1000);
        assert_eq!(config.schedule_start, "09:00");
        assert_eq!(config.schedule_end, "17:00");
        assert_eq!(config.currency, "mxn");
        assert!(config.company_id.is_none());
    }
}
