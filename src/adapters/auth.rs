use crate::domain::model::{AuthToken, Credentials};
use crate::utils::error::{DescriberError, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
    error_description: Option<String>,
}

/// OAuth2 password grant，換取整個執行期間使用的 bearer token
pub struct Authenticator {
    client: Client,
    token_url: Url,
}

impl Authenticator {
    pub fn new(token_url: Url) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, token_url })
    }

    pub async fn authenticate(&self, credentials: &Credentials, scope: &str) -> Result<AuthToken> {
        tracing::debug!(
            "🔑 Requesting token for {} (scope {}) from {}",
            credentials.username,
            scope,
            self.token_url
        );

        let form = [
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", scope),
        ];
        let response = self
            .client
            .post(self.token_url.clone())
            .basic_auth(&credentials.client_key, Some(&credentials.client_secret))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // 錯誤回應也可能帶 error 欄位，先嘗試解析 body 再看 status
        let body: TokenResponse = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(DescriberError::HttpStatus {
                    operation: "token".to_string(),
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = body.error {
            let message = match body.error_description {
                Some(description) => format!("{}: {}", error, description),
                None => error,
            };
            return Err(DescriberError::AuthenticationError { message });
        }

        match body.access_token {
            Some(token) if !token.is_empty() => {
                tracing::debug!(
                    "🔑 Token issued (type {}, expires in {}s)",
                    body.token_type.as_deref().unwrap_or("bearer"),
                    body.expires_in.unwrap_or_default()
                );
                Ok(AuthToken::new(token))
            }
            _ => Err(DescriberError::AuthenticationError {
                message: format!("token response did not include an access_token ({})", status),
            }),
        }
    }
}
