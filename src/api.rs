//! Client for the remote prediction and authentication service
//!
//! The service speaks JSON over HTTP. Every call is a single blocking
//! attempt with a timeout. Retrying or falling back is left to the caller.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::demo::{ComponentReadings, Confidence};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const PREDICT_BEHAVIOR_PATH: &str = "/predict_trip_behavior";
pub const PREDICT_MAINTENANCE_PATH: &str = "/predict_maintenance_status";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to reach prediction service at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} failed with status {status}: {message}")]
    Status {
        path: &'static str,
        status: u16,
        message: String,
    },

    #[error("failed to parse response from {path}")]
    Decode {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }

    /// Message suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error payload returned by the service: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(rename = "vehicleNumber")]
    pub vehicle_number: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    #[serde(rename = "vehicleNumber", alias = "vehicle_number", default)]
    pub vehicle_number: Option<String>,
}

/// Response from `/login` and `/register`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Trip summary sent to `/predict_trip_behavior`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripFeatures {
    pub harsh_brake_count: u32,
    pub harsh_accel_count: u32,
    pub sharp_turn_count: u32,
    pub overspeeding_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPrediction {
    pub confidence: f64,
    #[serde(default)]
    pub predicted_behavior_label: Option<String>,
    #[serde(default)]
    pub predicted_behavior_code: Option<u8>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub vehicle_no: Option<String>,
}

impl BehaviorPrediction {
    pub fn confidence(&self) -> Confidence {
        Confidence::from_reported(self.confidence)
    }

    pub fn is_risky(&self) -> Option<bool> {
        self.predicted_behavior_code.map(|code| code == 1)
    }
}

/// Odometer-based maintenance inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceHistory {
    pub mileage: u32,
    /// Odometer reading at the last service.
    pub last_service: u32,
    pub engine_hours: u32,
}

/// Body for `/predict_maintenance_status`. The service accepts either shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MaintenanceRequest {
    Components(ComponentReadings),
    ServiceHistory(ServiceHistory),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePrediction {
    #[serde(default)]
    pub battery: Option<String>,
    #[serde(default)]
    pub brakes: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub overall_health: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub vehicle_no: Option<String>,
}

impl MaintenancePrediction {
    /// Confidence to key the maintenance profile on. Prefers an explicit
    /// confidence and falls back to the overall health percentage.
    pub fn confidence(&self) -> Option<Confidence> {
        self.confidence
            .map(Confidence::from_reported)
            .or_else(|| self.overall_health.map(Confidence::from_percent))
    }
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl PredictionClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Url::parse(api_url).map_err(|source| ApiError::InvalidUrl {
            url: api_url.to_string(),
            source,
        })?;

        let base_url = api_url.trim_end_matches('/').to_string();
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vahan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn login(&self, request: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post(LOGIN_PATH, request)
    }

    pub fn register(&self, request: &RegisterRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.post(REGISTER_PATH, request)
    }

    pub fn predict_trip_behavior(
        &self,
        features: &TripFeatures,
    ) -> Result<BehaviorPrediction, ApiError> {
        self.post(PREDICT_BEHAVIOR_PATH, features)
    }

    pub fn predict_maintenance_status(
        &self,
        request: &MaintenanceRequest,
    ) -> Result<MaintenancePrediction, ApiError> {
        self.post(PREDICT_MAINTENANCE_PATH, request)
    }

    fn post<B, T>(&self, path: &'static str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, authenticated = self.token.is_some(), "POST");

        let mut request = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        let text = response.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .ok()
                .filter(|m| !m.is_empty())
                .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            tracing::debug!(%url, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Decode { path, source })
    }
}
