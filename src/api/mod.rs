use crate::error::{ApiError, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

/// Backend address used when no `--base-url` override is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// A user record as owned by the backend.
///
/// `id` and `created_at` are server-assigned; only `name` and `email` are
/// editable from this client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The client-editable fields, sent as the body of create/update requests.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

/// Blocking client for the four user endpoints.
///
/// Calls run to completion on the caller's thread; there are no retries,
/// no cancellation, and no timeouts beyond the transport defaults. Every
/// failure is classified into an [`ApiError`] kind.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    port: u16,
}

impl ApiClient {
    /// Build a client for the given base URL (e.g. `http://localhost:8080/api`).
    ///
    /// The URL is validated and trailing slashes are trimmed; the port is
    /// remembered for unreachable-backend error messages.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(ApiError::InvalidUrl(
                    "URL must start with http:// or https://".into(),
                ));
            }
        }
        let port = parsed.port_or_known_default().unwrap_or(80);

        let http = Client::builder()
            .user_agent(concat!("usrapi-manager/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            port,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `/users`: the full record list, in server order.
    pub fn list_users(&self) -> Result<Vec<UserRecord>> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, "fetching users");
        let response = self.http.get(&url).send().map_err(|e| self.classify(e))?;
        let users: Vec<UserRecord> = parse(response)?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    /// POST `/users`: create a record, returning the server's version of it.
    pub fn create_user(&self, draft: &UserDraft) -> Result<UserRecord> {
        let url = format!("{}/users", self.base_url);
        debug!(url = %url, name = %draft.name, "creating user");
        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .map_err(|e| self.classify(e))?;
        parse(response)
    }

    /// PUT `/users/{id}`: replace the editable fields of an existing record.
    pub fn update_user(&self, id: u64, draft: &UserDraft) -> Result<UserRecord> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "updating user");
        let response = self
            .http
            .put(&url)
            .json(draft)
            .send()
            .map_err(|e| self.classify(e))?;
        parse(response)
    }

    /// DELETE `/users/{id}`: remove a record. The response body is ignored.
    pub fn delete_user(&self, id: u64) -> Result<()> {
        let url = format!("{}/users/{}", self.base_url, id);
        debug!(url = %url, "deleting user");
        let response = self
            .http
            .delete(&url)
            .send()
            .map_err(|e| self.classify(e))?;
        check(response)?;
        Ok(())
    }

    /// Sort a transport failure into the closed error taxonomy.
    fn classify(&self, err: reqwest::Error) -> ApiError {
        if connection_refused(&err) {
            ApiError::ConnectionRefused { port: self.port }
        } else if err.is_connect() || err.is_timeout() {
            ApiError::Network(err)
        } else {
            ApiError::Request(err)
        }
    }
}

/// Reject non-success statuses, capturing the body for the error banner.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        warn!(status = status.as_u16(), body = %body, "server returned error");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    check(response)?.json().map_err(ApiError::Request)
}

/// Walk the source chain looking for ECONNREFUSED.
fn connection_refused(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        source = inner.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(ApiClient::new("http://localhost:8080/api").is_ok());
        assert!(ApiClient::new("https://example.com/api").is_ok());

        assert!(matches!(
            ApiClient::new(""),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("not-a-url"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn url_normalization_trims_trailing_slashes() {
        let client = ApiClient::new("http://localhost:8080/api///").expect("valid url");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn port_defaults_follow_the_scheme() {
        let client = ApiClient::new("http://example.com/api").expect("valid url");
        assert_eq!(client.port, 80);
        let client = ApiClient::new("https://example.com/api").expect("valid url");
        assert_eq!(client.port, 443);
        let client = ApiClient::new("http://localhost:8080/api").expect("valid url");
        assert_eq!(client.port, 8080);
    }

    #[test]
    fn user_record_deserializes_from_backend_json() {
        let user: UserRecord = serde_json::from_str(
            r#"{"id":3,"name":"Ada","email":"ada@example.com","created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .expect("valid record");
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn user_draft_serializes_name_and_email_only() {
        let draft = UserDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let value = serde_json::to_value(&draft).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"name": "Ada", "email": "ada@example.com"})
        );
    }
}
