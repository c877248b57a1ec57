//! Mock IdP server for development and testing.
//!
//! This server simulates GitHub's authorization endpoint and a code-exchange
//! backend, allowing the full authorization-code flow to run locally.

use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::templates;

#[derive(Deserialize)]
struct AuthorizeQuery {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    scope: String,
    state: String,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct ConsentForm {
    decision: String,
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    state: String,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct ExchangeRequest {
    code: String,
}

/// Profile embedded in a mock authorization code and returned on exchange.
#[derive(Debug, Serialize, Deserialize)]
struct MockProfile {
    id: String,
    login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    picture: String,
}

/// Mock IdP server that simulates the authorization-code endpoints.
pub struct MockIdpServer {
    port: u16,
}

impl MockIdpServer {
    /// Create a new Mock IdP server.
    ///
    /// # Arguments
    /// * `port` - The port to listen on (typically 3001)
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Run the Mock IdP server.
    ///
    /// This starts an HTTP server that handles:
    /// - `GET /login/oauth/authorize` - Consent page
    /// - `POST /authorize/submit` - Consent form submission
    /// - `POST /exchange` - Code exchange returning the user profile
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        tracing::info!("Mock IdP server listening on http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router()).await
    }
}

/// Routes of the Mock IdP.
pub fn router() -> Router {
    Router::new()
        .route("/login/oauth/authorize", get(authorize))
        .route("/authorize/submit", post(authorize_submit))
        .route("/exchange", post(exchange))
}

async fn authorize(Query(params): Query<AuthorizeQuery>) -> Html<String> {
    Html(templates::authorize_page(
        &params.client_id,
        &params.scope,
        &params.state,
        &params.redirect_uri,
    ))
}

async fn authorize_submit(Form(form): Form<ConsentForm>) -> Response {
    let separator = if form.redirect_uri.contains('?') { '&' } else { '?' };
    let encoded_state = urlencoding::encode(&form.state);

    let login = form.login.filter(|l| !l.trim().is_empty());
    let login = match (form.decision.as_str(), login) {
        ("approve", Some(login)) => login,
        _ => {
            let callback_url = format!(
                "{}{}error=access_denied&error_description={}&state={}",
                form.redirect_uri,
                separator,
                urlencoding::encode("The user has denied your application access."),
                encoded_state,
            );
            return Redirect::to(&callback_url).into_response();
        }
    };

    // Generate a mock authorization code that encodes the user info
    let profile = MockProfile {
        id: format!("mock-github-{login}"),
        picture: format!("https://github.com/identicons/{login}.png"),
        name: form.name.filter(|n| !n.trim().is_empty()),
        email: form.email.filter(|e| !e.trim().is_empty()),
        login,
    };
    let mock_code = match serde_json::to_vec(&profile) {
        Ok(json) => URL_SAFE_NO_PAD.encode(json),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    let callback_url = format!(
        "{}{}code={}&state={}",
        form.redirect_uri,
        separator,
        urlencoding::encode(&mock_code),
        encoded_state,
    );
    Redirect::to(&callback_url).into_response()
}

async fn exchange(Json(request): Json<ExchangeRequest>) -> Response {
    let profile = URL_SAFE_NO_PAD
        .decode(&request.code)
        .map_err(|e| e.to_string())
        .and_then(|bytes| {
            serde_json::from_slice::<MockProfile>(&bytes).map_err(|e| e.to_string())
        });

    match profile {
        Ok(profile) => Json(profile).into_response(),
        Err(e) => {
            tracing::warn!("Rejected mock code exchange: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "bad_verification_code" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use signin_core::auth::{AuthError, CodeExchanger, ProviderKind};
    use tower::ServiceExt;
    use url::Url;

    use crate::providers::BackendExchanger;

    fn consent(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/authorize/submit")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn location(response: &Response) -> Url {
        let location = response.headers()["location"].to_str().unwrap();
        Url::parse(location).unwrap()
    }

    fn param(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[tokio::test]
    async fn test_authorize_page() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/login/oauth/authorize?client_id=gh&scope=read%3Auser&state=S1&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();

        assert!(html.contains("Mock GitHub Authorization"));
        assert!(html.contains(r#"name="state" value="S1""#));
        assert!(html.contains("read:user"));
    }

    #[tokio::test]
    async fn test_approve_redirects_with_code_and_state() {
        let response = router()
            .oneshot(consent(
                "decision=approve&login=octocat&name=&email=&state=S1&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2F",
            ))
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        let url = location(&response);
        assert_eq!(url.path(), "/");
        assert_eq!(param(&url, "state").as_deref(), Some("S1"));
        assert!(param(&url, "code").is_some());
        assert_eq!(param(&url, "error"), None);
    }

    #[tokio::test]
    async fn test_deny_redirects_with_error() {
        let response = router()
            .oneshot(consent(
                "decision=deny&state=S1&redirect_uri=http%3A%2F%2Flocalhost%3A3000%2F",
            ))
            .await
            .unwrap();

        let url = location(&response);
        assert_eq!(param(&url, "error").as_deref(), Some("access_denied"));
        assert_eq!(param(&url, "code"), None);
    }

    #[tokio::test]
    async fn test_exchange_rejects_unknown_code() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/exchange")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"code":"%%%","state":"S1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_backend_exchanger_against_mock_idp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router()).await });

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let response = client
            .post(base.join("authorize/submit").unwrap())
            .form(&[
                ("decision", "approve"),
                ("login", "octocat"),
                ("name", "The Octocat"),
                ("email", ""),
                ("state", "S1"),
                ("redirect_uri", "http://localhost:3000/"),
            ])
            .send()
            .await
            .unwrap();
        let callback = Url::parse(response.headers()["location"].to_str().unwrap()).unwrap();
        let code = param(&callback, "code").unwrap();

        let exchanger = Arc::new(BackendExchanger::new(base.join("exchange").unwrap()));
        let identity = exchanger.exchange(&code, "S1").await.unwrap();

        assert_eq!(identity.id, "mock-github-octocat");
        assert_eq!(identity.name, "The Octocat");
        assert_eq!(identity.email, None);
        assert_eq!(identity.provider, ProviderKind::GitHub);

        assert!(matches!(
            exchanger.exchange("bogus", "S1").await,
            Err(AuthError::ExchangeFailed(_))
        ));
    }
}
