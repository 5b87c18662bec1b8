use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// 有 ID 的 catalog 資源；分頁時用來辨識重複的頁面
pub trait Resource {
    fn id(&self) -> &str;
}

impl Resource for Package {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Plan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Service {
    fn id(&self) -> &str {
        &self.id
    }
}

/// PUT 時只送出 description，其餘欄位由 API 保留
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionUpdate {
    pub description: String,
}

impl DescriptionUpdate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Password grant 所需的帳號資料
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub client_key: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("client_key", &self.client_key)
            .field("client_secret", &"***")
            .finish()
    }
}

/// 單次執行取得一次的 bearer token，不做 refresh
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
