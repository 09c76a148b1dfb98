//! Client for the external staff authentication service.
//!
//! `POST <base>/login` with `{ "username", "password" }`. A 2xx reply carries
//! `staffID`, `username` and `role`; anything else may carry an `error`
//! string to show the user.

mod error;

use std::time::Duration;

use anyhow::{Context, Result};
pub use error::{AuthError, CredentialField, LOGIN_FAILED_FALLBACK, UNREACHABLE_MESSAGE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::session::{Session, StaffId};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "staffID")]
    staff_id: StaffId,
    username: String,
    role: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Issues login requests to the authentication service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    login_url: String,
}

impl AuthClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid auth base_url '{base_url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Invalid auth base_url '{base_url}': expected http or https");
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            login_url: format!("{}/login", base_url.trim_end_matches('/')),
        })
    }

    /// Creates a client from the `[auth]` config section.
    ///
    /// # Errors
    /// See [`AuthClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.auth.base_url, config.request_timeout())
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Authenticates a staff member.
    ///
    /// The returned session is built from the service's reply, not from the
    /// submitted username. Roles outside the known set are accepted; the
    /// dashboard renders them with its unrecognized-role panel.
    ///
    /// # Errors
    /// - [`AuthError::MissingField`] if either field is empty (nothing is sent).
    /// - [`AuthError::Rejected`] if the service answers with a non-success status.
    /// - [`AuthError::Unreachable`] if the request fails or the reply is unusable.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.is_empty() {
            return Err(AuthError::MissingField(CredentialField::Username));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField(CredentialField::Password));
        }

        tracing::info!(username, url = %self.login_url, "login attempt");

        let response = self
            .http
            .post(&self.login_url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(username, "login request failed: {err}");
                AuthError::unreachable(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reply: ErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            tracing::warn!(username, %status, "login rejected");
            return Err(AuthError::rejected(reply.error));
        }

        let reply: LoginResponse = response.json().await.map_err(|err| {
            tracing::warn!(username, "unreadable login response: {err}");
            AuthError::unreachable(err)
        })?;

        let session = Session::authenticated(Some(reply.staff_id), reply.username, reply.role);
        let Some(identity) = session.identity() else {
            tracing::warn!(username, "login response is missing username or role");
            return Err(AuthError::unreachable(
                "login response is missing username or role",
            ));
        };

        if !identity.role.is_recognized() {
            tracing::warn!(role = %identity.role, "login returned an unrecognized role");
        }
        tracing::info!(username = %identity.username, role = %identity.role, "login succeeded");

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::Role;

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    async fn client_for(server: &MockServer) -> AuthClient {
        AuthClient::new(&format!("{}/api", server.uri()), None).unwrap()
    }

    #[test]
    fn login_url_joins_base() {
        let client = AuthClient::new("http://127.0.0.1:5000/api/", None).unwrap();
        assert_eq!(client.login_url(), "http://127.0.0.1:5000/api/login");
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(AuthClient::new("not a url", None).is_err());
        assert!(AuthClient::new("ftp://pms.local/api", None).is_err());
    }

    #[tokio::test]
    async fn missing_fields_send_nothing() {
        let client = AuthClient::new("http://127.0.0.1:9/api", None).unwrap();

        let err = client.login("", "secret").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::MissingField(CredentialField::Username)
        ));

        let err = client.login("manager", "").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::MissingField(CredentialField::Password)
        ));
    }

    #[tokio::test]
    async fn successful_login_builds_session_from_reply() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "username": "Manager ", "password": "securepwd123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful!",
                "staffID": 7,
                "username": "manager",
                "role": "Manager",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = client_for(&server)
            .await
            .login("Manager ", "securepwd123")
            .await
            .unwrap();

        assert_eq!(
            session,
            Session::authenticated(Some(StaffId::Number(7)), "manager", Role::Manager)
        );
    }

    #[tokio::test]
    async fn non_integer_staff_id_is_kept_verbatim() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "staffID": 7.0,
                "username": "manager",
                "role": "Manager",
            })))
            .mount(&server)
            .await;

        let session = client_for(&server)
            .await
            .login("manager", "securepwd123")
            .await
            .unwrap();

        let identity = session.identity().unwrap();
        assert_eq!(identity.staff_id, Some(StaffId::Other(json!(7.0))));
        assert_eq!(identity.role, Role::Manager);
    }

    #[tokio::test]
    async fn unknown_role_is_accepted() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "staffID": 11,
                "username": "greeter",
                "role": "Concierge",
            })))
            .mount(&server)
            .await;

        let session = client_for(&server)
            .await
            .login("greeter", "pw")
            .await
            .unwrap();
        assert_eq!(
            session.role(),
            Some(&Role::Unrecognized("Concierge".into()))
        );
    }

    #[tokio::test]
    async fn rejection_surfaces_service_message() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .login("manager", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(&err, AuthError::Rejected(msg) if msg == "Invalid credentials"));
    }

    #[tokio::test]
    async fn rejection_without_error_field_uses_fallback() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .login("manager", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FAILED_FALLBACK);
    }

    #[tokio::test]
    async fn malformed_success_reply_is_unreachable() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "staffID": 7,
                "username": "",
                "role": "Manager",
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .login("manager", "pw")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unreachable(_)));
    }

    #[tokio::test]
    async fn closed_port_is_unreachable() {
        let port = {
            let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
                eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
                return;
            };
            listener.local_addr().unwrap().port()
        };
        let client = AuthClient::new(&format!("http://127.0.0.1:{port}/api"), None).unwrap();

        let err = client.login("manager", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Unreachable(_)));
        assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    }

    #[tokio::test]
    async fn slow_service_times_out_as_unreachable() {
        if !can_bind_localhost() {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(5))
                    .set_body_json(json!({ "staffID": 1, "username": "a", "role": "Admin" })),
            )
            .mount(&server)
            .await;

        let client = AuthClient::new(
            &format!("{}/api", server.uri()),
            Some(Duration::from_millis(200)),
        )
        .unwrap();
        let err = client.login("a", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Unreachable(_)));
    }
}
