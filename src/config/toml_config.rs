use crate::domain::SettingsProvider;
use crate::utils::error::{RecordsError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_CREDITS: u32 = 18;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppInfo,
    pub records: RecordsConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub max_credits_per_semester: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_directory: PathBuf,
    pub backup_directory: PathBuf,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "Campus Course Records Manager".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            max_credits_per_semester: DEFAULT_MAX_CREDITS,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            backup_directory: PathBuf::from("backups"),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| RecordsError::FileAccessError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecordsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecordsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn with_data_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_directory = dir.into();
        self
    }

    pub fn with_backup_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.backup_directory = dir.into();
        self
    }

    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.records.max_credits_per_semester = max_credits;
        self
    }
}

impl SettingsProvider for AppConfig {
    fn max_credits_per_semester(&self) -> u32 {
        self.records.max_credits_per_semester
    }

    fn data_directory(&self) -> &Path {
        &self.storage.data_directory
    }

    fn backup_directory(&self) -> &Path {
        &self.storage.backup_directory
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("app.name", &self.app.name)?;
        validation::validate_range(
            "records.max_credits_per_semester",
            self.records.max_credits_per_semester,
            1,
            60,
        )?;
        validation::validate_path(
            "storage.data_directory",
            &self.storage.data_directory.to_string_lossy(),
        )?;
        validation::validate_path(
            "storage.backup_directory",
            &self.storage.backup_directory.to_string_lossy(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_credits_per_semester(), 18);
        assert_eq!(config.data_directory(), Path::new("data"));
        assert_eq!(config.backup_directory(), Path::new("backups"));
        assert_eq!(config.app.name, "Campus Course Records Manager");
        assert_eq!(config.app.version, "1.0.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[app]
name = "Registrar"
version = "2.0.0"

[records]
max_credits_per_semester = 21

[storage]
data_directory = "/srv/records/data"
backup_directory = "/srv/records/backups"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app.name, "Registrar");
        assert_eq!(config.max_credits_per_semester(), 21);
        assert_eq!(config.data_directory(), Path::new("/srv/records/data"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CAMPUS_RECORDS_TEST_DATA_DIR", "/tmp/campus-data");

        let toml_content = r#"
[storage]
data_directory = "${CAMPUS_RECORDS_TEST_DATA_DIR}"
backup_directory = "${CAMPUS_RECORDS_TEST_UNSET_VAR}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_directory(), Path::new("/tmp/campus-data"));
        assert_eq!(
            config.backup_directory(),
            Path::new("${CAMPUS_RECORDS_TEST_UNSET_VAR}")
        );

        std::env::remove_var("CAMPUS_RECORDS_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[records]\nmax_credits_per_semester = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::default().with_data_directory("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[records\nmax = ").unwrap_err();
        assert!(matches!(err, RecordsError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[records]\nmax_credits_per_semester = 12\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.max_credits_per_semester(), 12);

        assert!(matches!(
            AppConfig::from_file("/nonexistent/campus-records.toml"),
            Err(RecordsError::FileAccessError { .. })
        ));
    }
}
