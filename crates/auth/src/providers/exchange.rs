//! Authorization-code exchangers.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use signin_core::auth::{email_to_name, AuthError, CodeExchanger, Identity, ProviderKind, Result};
use signin_core::serde::{deserialize_optional_string, deserialize_string_or_number};
use tracing::{debug, warn};
use url::Url;

/// Stand-in exchange used when no backend is configured.
///
/// Waits a fixed delay, then yields a placeholder identity. Its output does
/// not depend on the code beyond rejecting an empty one.
#[derive(Debug, Clone)]
pub struct DemoExchanger {
    delay: Duration,
}

impl DemoExchanger {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The identity every successful demo exchange produces.
    pub fn placeholder_identity() -> Identity {
        Identity {
            id: "demo_github_user".to_string(),
            name: "Demo GitHub User".to_string(),
            email: Some("demo@github.example".to_string()),
            picture_url: Some("https://github.com/identicons/demo.png".to_string()),
            provider: ProviderKind::GitHub,
        }
    }
}

#[async_trait]
impl CodeExchanger for DemoExchanger {
    async fn exchange(&self, code: &str, _state: &str) -> Result<Identity> {
        tokio::time::sleep(self.delay).await;

        if code.is_empty() {
            return Err(AuthError::ExchangeFailed(
                "authorization code is empty".to_string(),
            ));
        }

        warn!("Using demo code exchange; configure OAUTH_EXCHANGE_URL for a real backend");
        Ok(Self::placeholder_identity())
    }
}

/// Identity as returned by the exchange backend.
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    #[serde(deserialize_with = "deserialize_string_or_number")]
    id: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    login: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    email: Option<String>,
    #[serde(
        default,
        alias = "avatar_url",
        deserialize_with = "deserialize_optional_string"
    )]
    picture: Option<String>,
}

impl ExchangeResponse {
    fn into_identity(self) -> Identity {
        let name = self
            .name
            .or(self.login)
            .or_else(|| self.email.as_deref().map(email_to_name))
            .unwrap_or_else(|| self.id.clone());

        Identity {
            id: self.id,
            name,
            email: self.email,
            picture_url: self.picture,
            provider: ProviderKind::GitHub,
        }
    }
}

/// Exchanges codes through a backend that holds the client secret.
///
/// Sends `{"code", "state"}` as JSON and expects the user profile back.
#[derive(Debug, Clone)]
pub struct BackendExchanger {
    client: reqwest::Client,
    url: Url,
}

impl BackendExchanger {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl CodeExchanger for BackendExchanger {
    async fn exchange(&self, code: &str, state: &str) -> Result<Identity> {
        debug!(url = %self.url, "Exchanging authorization code");

        let response = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({
                "code": code,
                "state": state,
            }))
            .send()
            .await
            .map_err(|e| AuthError::ExchangeFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AuthError::ExchangeFailed(format!(
                "backend responded with status {status}"
            )));
        }

        let profile: ExchangeResponse = response
            .json()
            .await
            .map_err(|e| AuthError::ExchangeFailed(format!("invalid response body: {e}")))?;

        if profile.id.is_empty() {
            return Err(AuthError::ExchangeFailed(
                "response is missing the user id".to_string(),
            ));
        }

        Ok(profile.into_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_demo_exchange_waits_then_returns_placeholder() {
        let exchanger = DemoExchanger::new(Duration::from_millis(1_000));
        let started = tokio::time::Instant::now();

        let identity = exchanger.exchange("abc", "S1").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1_000));
        assert_eq!(identity, DemoExchanger::placeholder_identity());
        assert_eq!(identity.provider, ProviderKind::GitHub);
    }

    #[tokio::test]
    async fn test_demo_exchange_ignores_code_contents() {
        let exchanger = DemoExchanger::new(Duration::ZERO);
        let a = exchanger.exchange("abc", "S1").await.unwrap();
        let b = exchanger.exchange("xyz", "S2").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_demo_exchange_rejects_empty_code() {
        let exchanger = DemoExchanger::new(Duration::ZERO);
        assert!(matches!(
            exchanger.exchange("", "S1").await,
            Err(AuthError::ExchangeFailed(_))
        ));
    }

    #[test]
    fn test_response_with_numeric_id_and_login() {
        let response: ExchangeResponse = serde_json::from_str(
            r#"{"id": 583231, "login": "octocat", "avatar_url": "https://avatars.example/u/1"}"#,
        )
        .unwrap();
        let identity = response.into_identity();

        assert_eq!(identity.id, "583231");
        assert_eq!(identity.name, "octocat");
        assert_eq!(identity.email, None);
        assert_eq!(
            identity.picture_url.as_deref(),
            Some("https://avatars.example/u/1")
        );
    }

    #[test]
    fn test_response_name_falls_back_to_email() {
        let response: ExchangeResponse =
            serde_json::from_str(r#"{"id": "7", "name": "", "email": "mona@x.com"}"#).unwrap();
        assert_eq!(response.into_identity().name, "mona");
    }

    #[tokio::test]
    async fn test_backend_unreachable_is_exchange_failure() {
        // Port 9 (discard) is not listening in test environments
        let exchanger = BackendExchanger::new(Url::parse("http://127.0.0.1:9/exchange").unwrap());
        assert!(matches!(
            exchanger.exchange("abc", "S1").await,
            Err(AuthError::ExchangeFailed(_))
        ));
    }
}
