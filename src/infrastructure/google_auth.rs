// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::settings::DriveSettings;
use crate::domain::repositories::storage_repository::ConfigurationError;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// OAuth2 访问令牌
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// 距离过期不足 5 分钟即视为过期
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at - Duration::minutes(5)
    }
}

/// 服务账号凭据
#[derive(Debug, Clone)]
pub struct ServiceAccountCredentials {
    client_email: String,
    private_key: String,
    token_uri: String,
    scope: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

impl ServiceAccountCredentials {
    /// 从 Drive 配置读取凭据
    ///
    /// 私钥中的字面量 `\n` 会被还原为换行
    pub fn from_settings(settings: &DriveSettings) -> Result<Self, ConfigurationError> {
        let client_email = non_empty(settings.client_email.as_deref())
            .ok_or(ConfigurationError::Missing("drive.client_email"))?;
        let private_key = non_empty(settings.private_key.as_deref())
            .ok_or(ConfigurationError::Missing("drive.private_key"))?;

        Ok(Self {
            client_email: client_email.to_string(),
            private_key: normalize_private_key(private_key),
            token_uri: settings.token_uri.clone(),
            scope: settings.scope.clone(),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// 生成 RS256 签名的 JWT 断言
    pub fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, ConfigurationError> {
        let iat = now.timestamp();
        let claims = Claims {
            iss: &self.client_email,
            scope: &self.scope,
            aud: &self.token_uri,
            exp: iat + ASSERTION_LIFETIME_SECS,
            iat,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| ConfigurationError::InvalidPrivateKey(e.to_string()))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| ConfigurationError::InvalidPrivateKey(e.to_string()))
    }

    /// 用 JWT 断言换取访问令牌
    pub async fn fetch_access_token(
        &self,
        http: &reqwest::Client,
    ) -> Result<AccessToken, ConfigurationError> {
        let assertion = self.signed_assertion(Utc::now())?;
        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let response = http
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ConfigurationError::Authentication(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("token endpoint returned {}", status.as_u16()),
            };
            return Err(ConfigurationError::Authentication(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConfigurationError::Authentication(e.to_string()))?;

        Ok(AccessToken {
            token: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 将环境变量中的字面量 `\n` 还原为换行
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
