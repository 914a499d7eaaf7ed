//! Async client for the remote astronomy data provider
//!
//! One GET per invocation: `{base}/astronomy.json?key=..&q=..&dt=..`,
//! answered with a JSON payload carrying the current moon phase label and
//! illumination. Non-success statuses are classified into distinct
//! [`FetchError`] variants so the caller can show a specific message before
//! falling back to the local calculation.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;

use crate::core::error::{FetchError, MoonError, Result};
use crate::core::types::{MoonPhase, SubPhase};

/// Phase report extracted from a provider response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemotePhase {
    pub phase: MoonPhase,
    pub sub_phase: SubPhase,
    /// Illuminated fraction in percent, as reported by the provider.
    pub illumination: f64,
}

/// Anything that can answer "what is the moon phase at this location today".
///
/// The orchestrator is generic over this seam so tests can inject canned
/// successes and every classified failure without a network.
pub trait PhaseSource: Send + Sync {
    fn fetch_phase(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> impl Future<Output = std::result::Result<RemotePhase, FetchError>> + Send;
}

/// HTTP client for the astronomy provider
pub struct AstronomyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AstronomyClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Create a client from environment variables
    ///
    /// Required: LUNARIA_API_KEY
    /// Optional: LUNARIA_API_URL (defaults to the weatherapi endpoint)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("LUNARIA_API_KEY")
            .map_err(|_| MoonError::MissingCredential("LUNARIA_API_KEY not set".into()))?;
        let base_url = std::env::var("LUNARIA_API_URL")
            .unwrap_or_else(|_| "https://api.weatherapi.com/v1".into());

        Ok(Self::new(api_key, base_url))
    }
}

impl PhaseSource for AstronomyClient {
    async fn fetch_phase(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> std::result::Result<RemotePhase, FetchError> {
        let url = format!("{}/astronomy.json", self.base_url);
        let dt = date.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("dt", dt.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let payload: AstronomyResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

        parse_payload(payload)
    }
}

/// Map a non-success HTTP status onto the failure taxonomy.
///
/// The provider uses 401 for a rejected credential, 403 for a disabled key
/// or exhausted quota, and 400 for an unparseable location/date.
pub fn classify_status(status: StatusCode) -> FetchError {
    match status.as_u16() {
        401 => FetchError::AuthRejected,
        403 | 429 => FetchError::QuotaExceeded,
        400 => FetchError::BadRequest,
        code => FetchError::HttpOther(code),
    }
}

/// Validate and convert a decoded payload into a [`RemotePhase`].
///
/// The phase label must belong to the known eight-value vocabulary before
/// anything is rendered from it.
fn parse_payload(payload: AstronomyResponse) -> std::result::Result<RemotePhase, FetchError> {
    let astro = payload.astronomy.astro;

    let sub_phase = SubPhase::from_label(&astro.moon_phase)
        .map_err(|_| FetchError::UnknownPhase(astro.moon_phase.clone()))?;

    let illumination = astro.moon_illumination.as_percent().ok_or_else(|| {
        FetchError::MalformedResponse("moon_illumination is not numeric".into())
    })?;

    Ok(RemotePhase {
        phase: sub_phase.bucket(),
        sub_phase,
        illumination,
    })
}

// Provider wire format: { "astronomy": { "astro": { ... } } }

#[derive(Deserialize)]
struct AstronomyResponse {
    astronomy: AstronomyBlock,
}

#[derive(Deserialize)]
struct AstronomyBlock {
    astro: AstroBlock,
}

#[derive(Deserialize)]
struct AstroBlock {
    moon_phase: String,
    moon_illumination: IlluminationValue,
}

/// The provider emits `moon_illumination` as either a bare number or a
/// quoted numeric string depending on API version.
#[derive(Deserialize)]
#[serde(untagged)]
enum IlluminationValue {
    Number(f64),
    Text(String),
}

impl IlluminationValue {
    fn as_percent(&self) -> Option<f64> {
        match self {
            IlluminationValue::Number(value) => Some(*value),
            IlluminationValue::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AstronomyClient::new("test-key".into(), "https://api.example.com".into());
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, "https://api.example.com");
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = AstronomyClient::from_env();
        // Should fail if LUNARIA_API_KEY is not set
        if std::env::var("LUNARIA_API_KEY").is_err() {
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            FetchError::AuthRejected
        );
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN),
            FetchError::QuotaExceeded
        );
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            FetchError::QuotaExceeded
        );
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            FetchError::BadRequest
        );
        assert_eq!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            FetchError::HttpOther(500)
        );
    }

    #[test]
    fn test_payload_with_string_illumination() {
        let payload: AstronomyResponse = serde_json::from_str(
            r#"{"astronomy":{"astro":{"moon_phase":"Waxing Gibbous","moon_illumination":"78"}}}"#,
        )
        .unwrap();
        let remote = parse_payload(payload).unwrap();
        assert_eq!(remote.phase, MoonPhase::WaxingMoon);
        assert_eq!(remote.sub_phase, SubPhase::WaxingGibbous);
        assert!((remote.illumination - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_payload_with_numeric_illumination() {
        let payload: AstronomyResponse = serde_json::from_str(
            r#"{"astronomy":{"astro":{"moon_phase":"Full Moon","moon_illumination":100}}}"#,
        )
        .unwrap();
        let remote = parse_payload(payload).unwrap();
        assert_eq!(remote.phase, MoonPhase::FullMoon);
    }

    #[test]
    fn test_unknown_phase_label_rejected() {
        let payload: AstronomyResponse = serde_json::from_str(
            r#"{"astronomy":{"astro":{"moon_phase":"Blood Moon","moon_illumination":"50"}}}"#,
        )
        .unwrap();
        let err = parse_payload(payload).unwrap_err();
        assert!(matches!(err, FetchError::UnknownPhase(label) if label == "Blood Moon"));
    }

    #[test]
    fn test_non_numeric_illumination_rejected() {
        let payload: AstronomyResponse = serde_json::from_str(
            r#"{"astronomy":{"astro":{"moon_phase":"Full Moon","moon_illumination":"bright"}}}"#,
        )
        .unwrap();
        let err = parse_payload(payload).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }
}
