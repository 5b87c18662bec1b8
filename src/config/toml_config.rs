use crate::adapters::http::DEFAULT_PAGE_SIZE;
use crate::domain::model::Credentials;
use crate::utils::error::{DescriberError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.mashery.com/v3/rest";
pub const DEFAULT_TOKEN_URL: &str = "https://api.mashery.com/v3/token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub account: AccountConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub user_id: String,
    pub password: String,
    pub api_key: String,
    pub secret: String,
    /// 沒有 --area 時使用的預設 area UUID
    pub area_uuid: Option<String>,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .field("api_key", &self.api_key)
            .field("secret", &"***")
            .field("area_uuid", &self.area_uuid)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    pub page_size: Option<usize>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_url: default_token_url(),
            page_size: None,
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DescriberError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${PLAN_PASSWORD})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DescriberError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_required_string("account.user_id", &self.account.user_id)?;
        validation::validate_required_string("account.password", &self.account.password)?;
        validation::validate_required_string("account.api_key", &self.account.api_key)?;
        validation::validate_required_string("account.secret", &self.account.secret)?;

        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_url("api.token_url", &self.api.token_url)?;

        if let Some(page_size) = self.api.page_size {
            validation::validate_positive_number("api.page_size", page_size, 1)?;
        }

        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.account.user_id.clone(),
            password: self.account.password.clone(),
            client_key: self.account.api_key.clone(),
            client_secret: self.account.secret.clone(),
        }
    }

    /// CLI 的 --area 優先，否則使用配置中的預設值
    pub fn resolve_area(&self, area_override: Option<&str>) -> Option<String> {
        area_override
            .or(self.account.area_uuid.as_deref())
            .map(str::trim)
            .filter(|area| !area.is_empty() && !area.starts_with("${"))
            .map(str::to_string)
    }

    pub fn base_url(&self) -> Result<Url> {
        parse_url("api.base_url", &self.api.base_url)
    }

    pub fn token_url(&self) -> Result<Url> {
        parse_url("api.token_url", &self.api.token_url)
    }

    pub fn page_size(&self) -> usize {
        self.api.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| DescriberError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
