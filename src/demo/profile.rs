//! Confidence-keyed driver and vehicle profiles
//!
//! Every attribute here is derived from a single [`Confidence`], so the
//! behavior and maintenance halves of a [`DemoProfile`] always land in the
//! same [`Bucket`].

use std::fmt;

use serde::Serialize;

/// Integer confidence percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    /// Round to the nearest percent and clamp into `0..=100`. NaN maps to 0.
    pub fn from_percent(value: f64) -> Self {
        if value.is_nan() {
            return Confidence(0);
        }
        Confidence(value.round().clamp(0.0, 100.0) as u8)
    }

    /// Build from a `0.0..=1.0` model probability.
    pub fn from_ratio(value: f64) -> Self {
        Self::from_percent(value * 100.0)
    }

    /// Accept a confidence as reported by the prediction service, which may
    /// use either scale. Values up to 1.0 are ratios.
    pub fn from_reported(value: f64) -> Self {
        if value <= 1.0 {
            Self::from_ratio(value)
        } else {
            Self::from_percent(value)
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl From<u8> for Confidence {
    fn from(value: u8) -> Self {
        Confidence(value.min(100))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Severity bucket, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bucket {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Bucket {
    pub fn of(confidence: Confidence) -> Self {
        match confidence.percent() {
            85.. => Bucket::Excellent,
            70..=84 => Bucket::Good,
            50..=69 => Bucket::Fair,
            _ => Bucket::Poor,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::Excellent => "Excellent",
            Bucket::Good => "Good",
            Bucket::Fair => "Fair",
            Bucket::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DriverType {
    Safe,
    Aggressive,
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverType::Safe => f.write_str("Safe"),
            DriverType::Aggressive => f.write_str("Aggressive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaintenanceStatus {
    Excellent,
    Good,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    Critical,
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaintenanceStatus::Excellent => "Excellent",
            MaintenanceStatus::Good => "Good",
            MaintenanceStatus::NeedsAttention => "Needs Attention",
            MaintenanceStatus::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// Tally of risky driving events over a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrivingEvents {
    pub harsh_brakes: u32,
    pub harsh_accels: u32,
    pub sharp_turns: u32,
    pub speed_violations: u32,
}

/// Representative sensor readings behind the component assessments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentReadings {
    pub battery_voltage: f64,
    pub brake_pad_thickness: f64,
    pub engine_temp: f64,
}

impl ComponentReadings {
    pub fn battery_assessment(&self) -> String {
        let state = if self.battery_voltage < 12.0 { "Low" } else { "Good" };
        format!("Battery {} ({}V)", state, self.battery_voltage)
    }

    pub fn brake_assessment(&self) -> String {
        let state = if self.brake_pad_thickness < 3.0 {
            "Service Soon"
        } else {
            "Good"
        };
        format!("Brakes {} ({}mm)", state, self.brake_pad_thickness)
    }

    pub fn engine_assessment(&self) -> String {
        let state = if self.engine_temp > 100.0 {
            "High Temp"
        } else {
            "Normal"
        };
        format!("Engine {} ({}°C)", state, self.engine_temp)
    }
}

impl Default for ComponentReadings {
    fn default() -> Self {
        Self {
            battery_voltage: 12.5,
            brake_pad_thickness: 5.0,
            engine_temp: 90.0,
        }
    }
}

/// Percentage distribution used for the health pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthBreakdown {
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
    pub poor: u8,
}

impl HealthBreakdown {
    pub fn total(&self) -> u32 {
        u32::from(self.excellent) + u32::from(self.good) + u32::from(self.fair) + u32::from(self.poor)
    }

    /// Slices in chart order, paired with their labels.
    pub fn slices(&self) -> [(&'static str, u8); 4] {
        [
            ("Excellent", self.excellent),
            ("Good", self.good),
            ("Fair", self.fair),
            ("Poor", self.poor),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehaviorProfile {
    pub driver_type: DriverType,
    pub confidence: Confidence,
    pub risk_score: u8,
    pub safety_rating: &'static str,
    pub category: &'static str,
    pub events: DrivingEvents,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceProfile {
    pub status: MaintenanceStatus,
    pub overall_health: u8,
    pub battery: String,
    pub brakes: String,
    pub engine: String,
    pub readings: ComponentReadings,
    pub health_breakdown: HealthBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoProfile {
    pub confidence: Confidence,
    pub bucket: Bucket,
    pub behavior: BehaviorProfile,
    pub maintenance: MaintenanceProfile,
}

/// Fixed per-bucket attributes.
struct BucketTraits {
    driver_type: DriverType,
    safety_rating: &'static str,
    category: &'static str,
    status: MaintenanceStatus,
    events: DrivingEvents,
    readings: ComponentReadings,
    breakdown: HealthBreakdown,
}

const fn events(harsh_brakes: u32, harsh_accels: u32, sharp_turns: u32, speed_violations: u32) -> DrivingEvents {
    DrivingEvents {
        harsh_brakes,
        harsh_accels,
        sharp_turns,
        speed_violations,
    }
}

const fn readings(battery_voltage: f64, brake_pad_thickness: f64, engine_temp: f64) -> ComponentReadings {
    ComponentReadings {
        battery_voltage,
        brake_pad_thickness,
        engine_temp,
    }
}

const fn breakdown(excellent: u8, good: u8, fair: u8, poor: u8) -> HealthBreakdown {
    HealthBreakdown {
        excellent,
        good,
        fair,
        poor,
    }
}

fn traits(bucket: Bucket) -> BucketTraits {
    match bucket {
        Bucket::Excellent => BucketTraits {
            driver_type: DriverType::Safe,
            safety_rating: "A+",
            category: "Excellent Driver",
            status: MaintenanceStatus::Excellent,
            events: events(1, 0, 1, 0),
            readings: readings(12.7, 8.0, 88.0),
            breakdown: breakdown(70, 20, 8, 2),
        },
        Bucket::Good => BucketTraits {
            driver_type: DriverType::Safe,
            safety_rating: "B+",
            category: "Good Driver",
            status: MaintenanceStatus::Good,
            events: events(3, 2, 4, 1),
            readings: readings(12.4, 6.0, 92.0),
            breakdown: breakdown(35, 45, 15, 5),
        },
        Bucket::Fair => BucketTraits {
            driver_type: DriverType::Aggressive,
            safety_rating: "C",
            category: "Risky Driver",
            status: MaintenanceStatus::NeedsAttention,
            events: events(7, 5, 8, 3),
            readings: readings(11.9, 4.0, 98.0),
            breakdown: breakdown(10, 25, 45, 20),
        },
        Bucket::Poor => BucketTraits {
            driver_type: DriverType::Aggressive,
            safety_rating: "D",
            category: "Dangerous Driver",
            status: MaintenanceStatus::Critical,
            events: events(12, 9, 14, 6),
            readings: readings(11.4, 2.0, 108.0),
            breakdown: breakdown(5, 10, 25, 60),
        },
    }
}

/// Overall health and risk score for a confidence, offset within its bucket.
fn health_and_risk(bucket: Bucket, c: u8) -> (u8, u8) {
    match bucket {
        Bucket::Excellent => (90 + (c - 85) / 2, 20u8.saturating_sub((c - 85) / 2).max(5)),
        Bucket::Good => (75 + (c - 70) / 2, 25 + (85 - c) / 2),
        Bucket::Fair => (55 + (c - 50) / 2, 50 + (70 - c) / 2),
        Bucket::Poor => (35 + c / 2, 75 + (50 - c) / 2),
    }
}

/// Derive the full behavior and maintenance bundle for a confidence.
pub fn classify(confidence: Confidence) -> DemoProfile {
    let bucket = Bucket::of(confidence);
    let traits = traits(bucket);
    let (overall_health, risk_score) = health_and_risk(bucket, confidence.percent());

    let behavior = BehaviorProfile {
        driver_type: traits.driver_type,
        confidence,
        risk_score,
        safety_rating: traits.safety_rating,
        category: traits.category,
        events: traits.events,
    };

    let maintenance = MaintenanceProfile {
        status: traits.status,
        overall_health,
        battery: traits.readings.battery_assessment(),
        brakes: traits.readings.brake_assessment(),
        engine: traits.readings.engine_assessment(),
        readings: traits.readings,
        health_breakdown: traits.breakdown,
    };

    DemoProfile {
        confidence,
        bucket,
        behavior,
        maintenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_confidences() -> impl Iterator<Item = Confidence> {
        (0..=100u8).map(Confidence::from)
    }

    #[test]
    fn test_excellent_range_is_safe_and_excellent() {
        for c in 85..=100u8 {
            let profile = classify(Confidence::from(c));
            assert_eq!(profile.behavior.driver_type, DriverType::Safe, "c={}", c);
            assert_eq!(profile.maintenance.status, MaintenanceStatus::Excellent, "c={}", c);
        }
    }

    #[test]
    fn test_poor_range_is_aggressive_and_critical() {
        for c in 0..50u8 {
            let profile = classify(Confidence::from(c));
            assert_eq!(profile.behavior.driver_type, DriverType::Aggressive, "c={}", c);
            assert_eq!(profile.maintenance.status, MaintenanceStatus::Critical, "c={}", c);
        }
    }

    #[test]
    fn test_behavior_and_maintenance_share_bucket() {
        for confidence in all_confidences() {
            let profile = classify(confidence);
            let expected_status = match profile.bucket {
                Bucket::Excellent => MaintenanceStatus::Excellent,
                Bucket::Good => MaintenanceStatus::Good,
                Bucket::Fair => MaintenanceStatus::NeedsAttention,
                Bucket::Poor => MaintenanceStatus::Critical,
            };
            assert_eq!(profile.maintenance.status, expected_status);
        }
    }

    #[test]
    fn test_health_breakdown_sums_to_100() {
        for confidence in all_confidences() {
            assert_eq!(classify(confidence).maintenance.health_breakdown.total(), 100);
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Bucket::of(Confidence::from(85)), Bucket::Excellent);
        assert_eq!(Bucket::of(Confidence::from(84)), Bucket::Good);
        assert_eq!(Bucket::of(Confidence::from(70)), Bucket::Good);
        assert_eq!(Bucket::of(Confidence::from(69)), Bucket::Fair);
        assert_eq!(Bucket::of(Confidence::from(50)), Bucket::Fair);
        assert_eq!(Bucket::of(Confidence::from(49)), Bucket::Poor);
        assert_eq!(Bucket::of(Confidence::from(0)), Bucket::Poor);
    }

    #[test]
    fn test_confidence_92_is_excellent() {
        let profile = classify(Confidence::from(92));
        assert_eq!(profile.bucket, Bucket::Excellent);
        assert_eq!(profile.maintenance.overall_health, 93);
        assert_eq!(profile.behavior.risk_score, 17);
        assert_eq!(profile.behavior.safety_rating, "A+");
        assert_eq!(profile.behavior.category, "Excellent Driver");
    }

    #[test]
    fn test_confidence_45_is_poor() {
        let profile = classify(Confidence::from(45));
        assert_eq!(profile.bucket, Bucket::Poor);
        assert_eq!(profile.maintenance.overall_health, 57);
        assert_eq!(profile.behavior.risk_score, 77);
        assert_eq!(profile.behavior.safety_rating, "D");
    }

    #[test]
    fn test_good_and_fair_formulas() {
        let good = classify(Confidence::from(73));
        assert_eq!(good.maintenance.overall_health, 76);
        assert_eq!(good.behavior.risk_score, 31);
        assert_eq!(good.behavior.safety_rating, "B+");

        let fair = classify(Confidence::from(55));
        assert_eq!(fair.maintenance.overall_health, 57);
        assert_eq!(fair.behavior.risk_score, 57);
        assert_eq!(fair.maintenance.status.to_string(), "Needs Attention");
    }

    #[test]
    fn test_classify_is_pure() {
        for confidence in all_confidences() {
            assert_eq!(classify(confidence), classify(confidence));
        }
    }

    #[test]
    fn test_events_worsen_with_severity() {
        let totals: Vec<u32> = [100u8, 75, 60, 10]
            .iter()
            .map(|c| {
                let e = classify(Confidence::from(*c)).behavior.events;
                e.harsh_brakes + e.harsh_accels + e.sharp_turns + e.speed_violations
            })
            .collect();
        assert!(totals.windows(2).all(|w| w[0] < w[1]), "{:?}", totals);
    }

    #[test]
    fn test_component_assessments_embed_readings() {
        let excellent = classify(Confidence::from(90)).maintenance;
        assert_eq!(excellent.battery, "Battery Good (12.7V)");
        assert_eq!(excellent.brakes, "Brakes Good (8mm)");
        assert_eq!(excellent.engine, "Engine Normal (88°C)");

        let critical = classify(Confidence::from(20)).maintenance;
        assert_eq!(critical.battery, "Battery Low (11.4V)");
        assert_eq!(critical.brakes, "Brakes Service Soon (2mm)");
        assert_eq!(critical.engine, "Engine High Temp (108°C)");
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(Confidence::from_percent(140.0).percent(), 100);
        assert_eq!(Confidence::from_percent(-12.0).percent(), 0);
        assert_eq!(Confidence::from_percent(f64::NAN).percent(), 0);
        assert_eq!(Confidence::from(250).percent(), 100);

        let top = classify(Confidence::from_percent(140.0));
        assert_eq!(top.maintenance.overall_health, 97);
        assert_eq!(top.behavior.risk_score, 13);
    }

    #[test]
    fn test_reported_confidence_scales() {
        assert_eq!(Confidence::from_reported(0.874).percent(), 87);
        assert_eq!(Confidence::from_reported(87.0).percent(), 87);
        assert_eq!(Confidence::from_reported(1.0).percent(), 100);
        assert_eq!(Confidence::from_ratio(0.455).percent(), 46);
    }
}
