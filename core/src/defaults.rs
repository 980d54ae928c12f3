//! Default values for a freshly mounted form.
//!
//! # Design
//! `DefaultsClient` follows the host-does-IO split: `build_fetch_defaults`
//! produces the GET request for one user record and `parse_fetch_defaults`
//! extracts its `email`. The host runs the round-trip, then hands the outcome
//! to `DefaultValues::resolve`. A failed fetch never blocks the form: the
//! static defaults are kept and the failure is exposed as a banner message.

use chrono::{Local, NaiveDate};

use crate::config::FormConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transcode::DATE_FORMAT;
use crate::types::RemoteDefaults;

/// Stateless client for the default-values provider.
#[derive(Debug, Clone)]
pub struct DefaultsClient {
    base_url: String,
}

impl DefaultsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(&config.defaults_base_url)
    }

    pub fn build_fetch_defaults(&self, user_id: u32) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users/{user_id}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn parse_fetch_defaults(&self, response: HttpResponse) -> Result<RemoteDefaults, ApiError> {
        check_status(&response, 200)?;
        let body: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        let email = body
            .get("email")
            .and_then(serde_json::Value::as_str)
            .ok_or(ApiError::MissingEmail)?;
        Ok(RemoteDefaults { email: email.to_string() })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Raw initial text for every field, plus the fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValues {
    pub username: String,
    pub email: String,
    pub channel: String,
    pub twitter: String,
    pub facebook: String,
    pub phone_numbers: [String; 2],
    pub ph_numbers: Vec<String>,
    pub age: String,
    pub dob: String,
    /// Set when the remote fetch failed; shown without blocking the form.
    pub fetch_error: Option<String>,
}

impl DefaultValues {
    /// Static defaults, dated today.
    pub fn fallback() -> Self {
        Self::fallback_on(Local::now().date_naive())
    }

    pub fn fallback_on(today: NaiveDate) -> Self {
        Self {
            username: "Batman".to_string(),
            email: String::new(),
            channel: String::new(),
            twitter: String::new(),
            facebook: String::new(),
            phone_numbers: [String::new(), String::new()],
            ph_numbers: vec![String::new()],
            age: "0".to_string(),
            dob: today.format(DATE_FORMAT).to_string(),
            fetch_error: None,
        }
    }

    /// Merge the fetch outcome into the static defaults.
    pub fn resolve(fetched: Result<RemoteDefaults, ApiError>) -> Self {
        Self::fallback().merge(fetched)
    }

    pub fn merge(mut self, fetched: Result<RemoteDefaults, ApiError>) -> Self {
        match fetched {
            Ok(remote) => self.email = remote.email,
            Err(err) => {
                tracing::warn!(error = %err, "default values fetch failed, using static defaults");
                self.fetch_error = Some(format!("Could not load default values: {err}"));
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DefaultsClient {
        DefaultsClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_fetch_defaults_produces_correct_request() {
        let req = client().build_fetch_defaults(1);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users/1");
        assert_eq!(req.headers, vec![("accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = DefaultsClient::new("http://localhost:3000/").build_fetch_defaults(7);
        assert_eq!(req.path, "http://localhost:3000/users/7");
    }

    #[test]
    fn client_uses_configured_base_url() {
        let req = DefaultsClient::from_config(&FormConfig::default()).build_fetch_defaults(1);
        assert_eq!(req.path, "https://jsonplaceholder.typicode.com/users/1");
    }

    #[test]
    fn parse_extracts_only_email() {
        let body = r#"{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz","phone":"1-770"}"#;
        let defaults = client().parse_fetch_defaults(response(200, body)).unwrap();
        assert_eq!(defaults.email, "Sincere@april.biz");
    }

    #[test]
    fn parse_not_found() {
        let err = client().parse_fetch_defaults(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_wrong_status() {
        let err = client().parse_fetch_defaults(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_fetch_defaults(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_missing_or_non_string_email() {
        let err = client().parse_fetch_defaults(response(200, r#"{"id":1}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MissingEmail));
        let err = client().parse_fetch_defaults(response(200, r#"{"email":42}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MissingEmail));
    }

    #[test]
    fn fallback_matches_static_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let defaults = DefaultValues::fallback_on(today);
        assert_eq!(defaults.username, "Batman");
        assert_eq!(defaults.email, "");
        assert_eq!(defaults.ph_numbers, vec![String::new()]);
        assert_eq!(defaults.age, "0");
        assert_eq!(defaults.dob, "2024-03-09");
        assert!(defaults.fetch_error.is_none());
    }

    #[test]
    fn merge_success_sets_email() {
        let defaults = DefaultValues::fallback().merge(Ok(RemoteDefaults {
            email: "Sincere@april.biz".to_string(),
        }));
        assert_eq!(defaults.email, "Sincere@april.biz");
        assert!(defaults.fetch_error.is_none());
    }

    #[test]
    fn merge_failure_keeps_fallback_and_sets_banner() {
        let defaults = DefaultValues::resolve(Err(ApiError::NotFound));
        assert_eq!(defaults.email, "");
        assert_eq!(defaults.username, "Batman");
        assert_eq!(
            defaults.fetch_error.as_deref(),
            Some("Could not load default values: resource not found")
        );
    }
}
