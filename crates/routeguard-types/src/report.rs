use crate::constants::{COORDINATE_SCALE, MAX_ABS_COORDINATE};
use crate::error::{RouteGuardError, RouteGuardResult};
use crate::field::FieldElement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Incident category. The ordinal is the wire encoding on the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Accident,
    RoadClosure,
    Protest,
    PoliceActivity,
    Hazard,
    TrafficJam,
}

impl EventType {
    /// Ordinal to variant table, index `i` holds the variant encoded as `i`.
    pub const ALL: [EventType; 6] = [
        EventType::Accident,
        EventType::RoadClosure,
        EventType::Protest,
        EventType::PoliceActivity,
        EventType::Hazard,
        EventType::TrafficJam,
    ];

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            EventType::Accident => 0,
            EventType::RoadClosure => 1,
            EventType::Protest => 2,
            EventType::PoliceActivity => 3,
            EventType::Hazard => 4,
            EventType::TrafficJam => 5,
        }
    }

    /// Variant name as declared in the contract enum.
    pub fn name(&self) -> &'static str {
        match self {
            EventType::Accident => "Accident",
            EventType::RoadClosure => "RoadClosure",
            EventType::Protest => "Protest",
            EventType::PoliceActivity => "PoliceActivity",
            EventType::Hazard => "Hazard",
            EventType::TrafficJam => "TrafficJam",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Accident => "Accident",
            EventType::RoadClosure => "Road Closure",
            EventType::Protest => "Protest",
            EventType::PoliceActivity => "Police Activity",
            EventType::Hazard => "Hazard",
            EventType::TrafficJam => "Traffic Jam",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Active,
    Confirmed,
    Expired,
    Slashed,
}

impl ReportStatus {
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        match ordinal {
            0 => Some(ReportStatus::Active),
            1 => Some(ReportStatus::Confirmed),
            2 => Some(ReportStatus::Expired),
            3 => Some(ReportStatus::Slashed),
            _ => None,
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn is_claimable(&self) -> bool {
        matches!(self, ReportStatus::Confirmed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Active => write!(f, "Active"),
            ReportStatus::Confirmed => write!(f, "Confirmed"),
            ReportStatus::Expired => write!(f, "Expired"),
            ReportStatus::Slashed => write!(f, "Slashed"),
        }
    }
}

/// Converts a decimal degree to the ledger's fixed-point representation.
///
/// Rounds half away from zero (`f64::round`), so `-0.000000025` becomes `-3`.
pub fn scale_coordinate(degrees: f64) -> RouteGuardResult<i64> {
    if !degrees.is_finite() {
        return Err(RouteGuardError::Validation(
            "coordinate must be a finite number".into(),
        ));
    }
    if degrees.abs() > MAX_ABS_COORDINATE {
        return Err(RouteGuardError::Validation(format!(
            "coordinate {} out of representable range",
            degrees
        )));
    }
    Ok((degrees * COORDINATE_SCALE).round() as i64)
}

pub fn unscale_coordinate(scaled: i64) -> f64 {
    scaled as f64 / COORDINATE_SCALE
}

/// A report as stored on the ledger. Read-only from the relayer's side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub report_id: u64,
    pub commitment: FieldElement,
    pub latitude: i64,
    pub longitude: i64,
    pub event_type: EventType,
    pub status: ReportStatus,
    pub submitted_at: u64,
    pub confirmations: u32,
    pub regards: u128,
}

impl ReportRecord {
    pub fn latitude_degrees(&self) -> f64 {
        unscale_coordinate(self.latitude)
    }

    pub fn longitude_degrees(&self) -> f64 {
        unscale_coordinate(self.longitude)
    }

    pub fn submitted_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        let secs = i64::try_from(self.submitted_at).ok()?;
        chrono::DateTime::from_timestamp(secs, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_table() {
        for (i, variant) in EventType::ALL.iter().enumerate() {
            assert_eq!(variant.ordinal() as usize, i);
            assert_eq!(EventType::from_ordinal(i as i64), Some(*variant));
        }
        assert_eq!(EventType::from_ordinal(-1), None);
        assert_eq!(EventType::from_ordinal(6), None);
        assert_eq!(EventType::PoliceActivity.name(), "PoliceActivity");
        assert_eq!(EventType::TrafficJam.label(), "Traffic Jam");
    }

    #[test]
    fn test_report_status() {
        assert_eq!(ReportStatus::from_ordinal(1), Some(ReportStatus::Confirmed));
        assert_eq!(ReportStatus::from_ordinal(4), None);
        assert!(ReportStatus::Confirmed.is_claimable());
        assert!(!ReportStatus::Slashed.is_claimable());
        assert_eq!(ReportStatus::Expired.ordinal(), 2);
    }

    #[test]
    fn test_scale_coordinate() {
        assert_eq!(scale_coordinate(19.4326).unwrap(), 1_943_260_000);
        assert_eq!(scale_coordinate(-99.1332).unwrap(), -9_913_320_000);
        assert_eq!(scale_coordinate(0.0).unwrap(), 0);
        assert_eq!(scale_coordinate(0.000000025).unwrap(), 3);
        assert_eq!(scale_coordinate(-0.000000025).unwrap(), -3);
    }

    #[test]
    fn test_scale_coordinate_rejects_non_finite() {
        assert!(scale_coordinate(f64::NAN).is_err());
        assert!(scale_coordinate(f64::INFINITY).is_err());
        assert!(scale_coordinate(1.0e12).is_err());
    }

    #[test]
    fn test_unscale() {
        let lat = unscale_coordinate(1_943_260_000);
        assert!((lat - 19.4326).abs() < 1e-9);
    }

    #[test]
    fn test_report_timestamp() {
        let record = ReportRecord {
            report_id: 1,
            commitment: FieldElement::from(7u64),
            latitude: 1_943_260_000,
            longitude: -9_913_320_000,
            event_type: EventType::Hazard,
            status: ReportStatus::Active,
            submitted_at: 1_700_000_000,
            confirmations: 0,
            regards: 0,
        };
        let ts = record.submitted_at_utc().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert!((record.longitude_degrees() + 99.1332).abs() < 1e-9);
    }
}
