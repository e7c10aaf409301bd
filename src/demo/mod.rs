//! Locally generated demo data
//!
//! Used in guest mode, for demo sessions, and as the fallback when the
//! prediction service cannot be reached.

pub mod profile;
pub mod selector;
pub mod timeline;

pub use profile::{
    classify, BehaviorProfile, Bucket, ComponentReadings, Confidence, DemoProfile, DriverType,
    DrivingEvents, HealthBreakdown, MaintenanceProfile, MaintenanceStatus,
};
pub use selector::{
    Clock, DemoSelector, FixedClock, SystemClock, DEMO_CONFIDENCES, DEMO_WINDOW_MS,
    FALLBACK_BEHAVIOR_CONFIDENCE, FALLBACK_MAINTENANCE_CONFIDENCE,
};
pub use timeline::{synthesize, TimelineSample, TIMELINE_LABELS};
