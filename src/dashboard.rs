//! Dashboard actions: behavior analysis and maintenance checks
//!
//! Each action either asks the prediction service or generates demo data.
//! Failures never escape: a failed live call produces a fallback report
//! tagged [`DataSource::Fallback`] so the caller can flag it.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::api::{
    ApiError, BehaviorPrediction, MaintenancePrediction, MaintenanceRequest, PredictionClient, TripFeatures,
};
use crate::demo::{
    classify, synthesize, Clock, Confidence, DemoProfile, DemoSelector, TimelineSample,
    FALLBACK_BEHAVIOR_CONFIDENCE, FALLBACK_MAINTENANCE_CONFIDENCE,
};
use crate::session::Session;

/// Where the numbers in a report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
    Fallback { reason: String },
}

impl DataSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Fallback { .. })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => f.write_str("live prediction"),
            DataSource::Demo => f.write_str("demo data"),
            DataSource::Fallback { reason } => write!(f, "fallback demo data ({})", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DashboardMode {
    /// No stored session
    Guest,
    /// Logged in with the built-in demo account
    Demo,
    /// Logged in against the prediction service
    Authenticated,
}

impl DashboardMode {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            None => DashboardMode::Guest,
            Some(s) if s.demo => DashboardMode::Demo,
            Some(_) => DashboardMode::Authenticated,
        }
    }

    pub fn is_live(self) -> bool {
        self == DashboardMode::Authenticated
    }
}

impl fmt::Display for DashboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardMode::Guest => f.write_str("guest"),
            DashboardMode::Demo => f.write_str("demo"),
            DashboardMode::Authenticated => f.write_str("authenticated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorReport {
    pub source: DataSource,
    pub profile: DemoProfile,
    pub timeline: Vec<TimelineSample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<BehaviorPrediction>,
}

impl BehaviorReport {
    fn new(source: DataSource, confidence: Confidence, prediction: Option<BehaviorPrediction>) -> Self {
        Self {
            source,
            profile: classify(confidence),
            timeline: synthesize(confidence),
            prediction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceReport {
    pub source: DataSource,
    pub profile: DemoProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<MaintenancePrediction>,
}

impl MaintenanceReport {
    /// Component assessments, preferring the service's wording.
    pub fn components(&self) -> [(&'static str, &str); 3] {
        let m = &self.profile.maintenance;
        let live = self.live.as_ref();
        [
            ("Battery", live.and_then(|l| l.battery.as_deref()).unwrap_or(m.battery.as_str())),
            ("Brakes", live.and_then(|l| l.brakes.as_deref()).unwrap_or(m.brakes.as_str())),
            ("Engine", live.and_then(|l| l.engine.as_deref()).unwrap_or(m.engine.as_str())),
        ]
    }

    /// Overall health percentage, preferring the service's value.
    pub fn overall_health(&self) -> u8 {
        self.live
            .as_ref()
            .and_then(|l| l.overall_health)
            .map(|h| Confidence::from_percent(h).percent())
            .unwrap_or(self.profile.maintenance.overall_health)
    }
}

/// How a dashboard obtains its numbers.
enum Backend {
    Offline,
    Live(PredictionClient),
    /// The session expects live data but no client could be built.
    Unavailable(String),
}

pub struct Dashboard<C> {
    backend: Backend,
    selector: DemoSelector<C>,
    latency: Duration,
}

/// Fallback label for a failed live call.
fn fallback_reason(err: &ApiError) -> String {
    if err.is_unauthorized() {
        format!("session rejected, run 'vahan login' again ({})", err)
    } else {
        err.to_string()
    }
}

impl<C: Clock> Dashboard<C> {
    fn with_backend(backend: Backend, clock: C, latency: Duration) -> Self {
        Self {
            backend,
            selector: DemoSelector::new(clock),
            latency,
        }
    }

    /// Dashboard that only ever shows demo data.
    pub fn offline(clock: C, latency: Duration) -> Self {
        Self::with_backend(Backend::Offline, clock, latency)
    }

    /// Dashboard that queries the prediction service.
    pub fn connected(client: PredictionClient, clock: C, latency: Duration) -> Self {
        Self::with_backend(Backend::Live(client), clock, latency)
    }

    /// Build the dashboard matching a stored session. Only authenticated
    /// sessions build a client, carrying their bearer token. A client that
    /// cannot be built turns every action into a fallback report.
    pub fn for_session(
        session: Option<&Session>,
        api_url: &str,
        timeout: Duration,
        clock: C,
        latency: Duration,
    ) -> Self {
        let backend = match (DashboardMode::for_session(session), session) {
            (DashboardMode::Authenticated, Some(s)) => match PredictionClient::new(api_url, timeout) {
                Ok(client) => Backend::Live(client.with_token(s.token.clone())),
                Err(err) => {
                    tracing::warn!(error = %err, "prediction client unavailable, using fallback");
                    Backend::Unavailable(fallback_reason(&err))
                }
            },
            _ => Backend::Offline,
        };
        Self::with_backend(backend, clock, latency)
    }

    pub fn analyze_behavior(&self, features: &TripFeatures) -> BehaviorReport {
        let fallback = Confidence::from(FALLBACK_BEHAVIOR_CONFIDENCE);
        let client = match &self.backend {
            Backend::Live(client) => client,
            Backend::Offline => {
                let confidence = self.demo_confidence();
                tracing::info!(%confidence, "behavior analysis using demo data");
                return BehaviorReport::new(DataSource::Demo, confidence, None);
            }
            Backend::Unavailable(reason) => {
                let source = DataSource::Fallback {
                    reason: reason.clone(),
                };
                return BehaviorReport::new(source, fallback, None);
            }
        };

        match client.predict_trip_behavior(features) {
            Ok(prediction) => {
                let confidence = prediction.confidence();
                tracing::info!(
                    %confidence,
                    label = prediction.predicted_behavior_label.as_deref().unwrap_or("-"),
                    "behavior prediction received"
                );
                BehaviorReport::new(DataSource::Live, confidence, Some(prediction))
            }
            Err(err) => {
                tracing::warn!(error = %err, "behavior prediction failed, using fallback");
                let source = DataSource::Fallback {
                    reason: fallback_reason(&err),
                };
                BehaviorReport::new(source, fallback, None)
            }
        }
    }

    pub fn check_maintenance(&self, request: &MaintenanceRequest) -> MaintenanceReport {
        let fallback = Confidence::from(FALLBACK_MAINTENANCE_CONFIDENCE);
        let client = match &self.backend {
            Backend::Live(client) => client,
            Backend::Offline => {
                let confidence = self.demo_confidence();
                tracing::info!(%confidence, "maintenance check using demo data");
                return MaintenanceReport {
                    source: DataSource::Demo,
                    profile: classify(confidence),
                    live: None,
                };
            }
            Backend::Unavailable(reason) => {
                return MaintenanceReport {
                    source: DataSource::Fallback {
                        reason: reason.clone(),
                    },
                    profile: classify(fallback),
                    live: None,
                };
            }
        };

        match client.predict_maintenance_status(request) {
            Ok(prediction) => {
                let (source, confidence) = match prediction.confidence() {
                    Some(confidence) => (DataSource::Live, confidence),
                    None => {
                        tracing::warn!("maintenance response carried no health value");
                        let source = DataSource::Fallback {
                            reason: "response carried no health value".to_string(),
                        };
                        (source, fallback)
                    }
                };
                tracing::info!(%confidence, "maintenance prediction received");
                MaintenanceReport {
                    source,
                    profile: classify(confidence),
                    live: Some(prediction),
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "maintenance prediction failed, using fallback");
                MaintenanceReport {
                    source: DataSource::Fallback {
                        reason: fallback_reason(&err),
                    },
                    profile: classify(fallback),
                    live: None,
                }
            }
        }
    }

    /// Pick the current demo value after the simulated latency.
    fn demo_confidence(&self) -> Confidence {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.selector.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{Bucket, DriverType, FixedClock, DEMO_WINDOW_MS};

    fn unreachable_client() -> PredictionClient {
        PredictionClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap()
    }

    #[test]
    fn test_mode_for_session() {
        assert_eq!(DashboardMode::for_session(None), DashboardMode::Guest);
        assert_eq!(
            DashboardMode::for_session(Some(&Session::demo())),
            DashboardMode::Demo
        );
        assert_eq!(
            DashboardMode::for_session(Some(&Session::new("tok", None))),
            DashboardMode::Authenticated
        );
    }

    #[test]
    fn test_offline_behavior_uses_demo_rotation() {
        // Third window of the rotation holds 92.
        let dashboard = Dashboard::offline(FixedClock(2 * DEMO_WINDOW_MS), Duration::ZERO);
        let report = dashboard.analyze_behavior(&TripFeatures::default());

        assert_eq!(report.source, DataSource::Demo);
        assert_eq!(report.profile.confidence.percent(), 92);
        assert_eq!(report.profile.bucket, Bucket::Excellent);
        assert_eq!(report.timeline.len(), 6);
        assert_eq!(report.timeline[5].confidence, 0.92);
        assert!(report.prediction.is_none());
    }

    #[test]
    fn test_demo_session_stays_offline() {
        let dashboard = Dashboard::for_session(
            Some(&Session::demo()),
            "http://127.0.0.1:9",
            Duration::from_millis(200),
            FixedClock(0),
            Duration::ZERO,
        );

        let report = dashboard.check_maintenance(&MaintenanceRequest::Components(Default::default()));
        assert_eq!(report.source, DataSource::Demo);
        assert_eq!(report.profile.confidence.percent(), 87);
    }

    #[test]
    fn test_invalid_url_ignored_without_live_session() {
        for session in [None, Some(Session::demo())] {
            let dashboard = Dashboard::for_session(
                session.as_ref(),
                "not a url",
                Duration::from_secs(1),
                FixedClock(DEMO_WINDOW_MS),
                Duration::ZERO,
            );
            let report = dashboard.analyze_behavior(&TripFeatures::default());
            assert_eq!(report.source, DataSource::Demo);
            assert_eq!(report.profile.confidence.percent(), 73);
        }
    }

    #[test]
    fn test_invalid_url_with_live_session_falls_back() {
        let session = Session::new("tok", None);
        let dashboard = Dashboard::for_session(
            Some(&session),
            "::bad",
            Duration::from_secs(1),
            FixedClock(0),
            Duration::ZERO,
        );

        let behavior = dashboard.analyze_behavior(&TripFeatures::default());
        match &behavior.source {
            DataSource::Fallback { reason } => assert!(reason.contains("invalid API URL"), "{}", reason),
            other => panic!("expected fallback, got {:?}", other),
        }
        assert_eq!(behavior.profile.confidence.percent(), 75);

        let maintenance =
            dashboard.check_maintenance(&MaintenanceRequest::Components(Default::default()));
        assert!(maintenance.source.is_fallback());
        assert_eq!(maintenance.profile.confidence.percent(), 80);
    }

    #[test]
    fn test_rejected_token_reason_suggests_login() {
        let err = ApiError::Status {
            path: crate::api::PREDICT_BEHAVIOR_PATH,
            status: 401,
            message: "Invalid or missing token".to_string(),
        };
        let reason = fallback_reason(&err);
        assert!(reason.contains("vahan login"));
        assert!(reason.contains("401"));
    }

    #[test]
    fn test_backend_failure_falls_back_for_behavior() {
        let dashboard = Dashboard::connected(unreachable_client(), FixedClock(0), Duration::ZERO);
        let report = dashboard.analyze_behavior(&TripFeatures::default());

        assert!(report.source.is_fallback());
        assert_eq!(report.profile.confidence.percent(), 75);
        assert_eq!(report.profile.behavior.driver_type, DriverType::Safe);
        assert_eq!(report.profile.behavior.safety_rating, "B+");
        assert!(!report.timeline.is_empty());
    }

    #[test]
    fn test_backend_failure_falls_back_for_maintenance() {
        let dashboard = Dashboard::connected(unreachable_client(), FixedClock(0), Duration::ZERO);
        let report = dashboard.check_maintenance(&MaintenanceRequest::Components(Default::default()));

        assert!(report.source.is_fallback());
        assert_eq!(report.profile.confidence.percent(), 80);
        assert_eq!(report.overall_health(), 80);
        assert_eq!(report.components()[0].1, "Battery Good (12.4V)");
    }

    #[test]
    fn test_live_components_take_precedence() {
        let report = MaintenanceReport {
            source: DataSource::Live,
            profile: classify(Confidence::from(65)),
            live: Some(MaintenancePrediction {
                battery: Some("Battery Low (11.8V)".to_string()),
                brakes: None,
                engine: None,
                overall_health: Some(85.0),
                confidence: None,
                user: None,
                vehicle_no: None,
            }),
        };

        let components = report.components();
        assert_eq!(components[0].1, "Battery Low (11.8V)");
        assert_eq!(components[1].1, "Brakes Good (4mm)");
        assert_eq!(report.overall_health(), 85);
    }

    #[test]
    fn test_data_source_serializes_with_kind() {
        let value = serde_json::to_value(DataSource::Fallback {
            reason: "timeout".to_string(),
        })
        .unwrap();
        assert_eq!(value["kind"], "fallback");
        assert_eq!(value["reason"], "timeout");
    }
}
