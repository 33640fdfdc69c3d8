use crate::core::scan::{InvalidMarkerPolicy, DEFAULT_MARKER};
use crate::utils::error::{ExpiryError, Result};
use crate::utils::validation::{
    validate_bare_name, validate_marker_path, validate_non_empty_list, validate_one_of, validate_path,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_CONFIG_FILE: &str = "expiry.toml";

const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryConfig {
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub marker: String,
    pub paths: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            paths: vec!["src".to_string()],
            exclude: vec!["target".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: String,
    pub on_invalid_marker: InvalidMarkerPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            on_invalid_marker: InvalidMarkerPolicy::Report,
        }
    }
}

impl ExpiryConfig {
    /// Defaults scanning the given roots.
    pub fn for_paths<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Self {
        let mut config = Self::default();
        config.scan.paths = paths.into_iter().map(Into::into).collect();
        config
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExpiryError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExpiryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// An explicit file must exist; otherwise `expiry.toml` is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::debug!("Loading {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${SRC_DIR})
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_marker_path("scan.marker", &self.scan.marker)?;
        validate_non_empty_list("scan.paths", &self.scan.paths)?;
        for path in &self.scan.paths {
            validate_path("scan.paths", path)?;
        }
        for name in &self.scan.exclude {
            validate_bare_name("scan.exclude", name)?;
        }
        validate_one_of("report.format", &self.report.format, &OUTPUT_FORMATS)?;
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.report.format == "json"
    }
}

impl Validate for ExpiryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
