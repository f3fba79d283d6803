use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum absolute difference, in km, between an activity distance and a
/// race distance for the activity to count toward that distance.
pub const DISTANCE_TOLERANCE_KM: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const METERS_PER_KM: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

const RUN_BUCKETS: [Decimal; 4] = [
    Decimal::from_parts(5, 0, 0, false, 0),
    Decimal::from_parts(10, 0, 0, false, 0),
    Decimal::from_parts(211, 0, 0, false, 1),
    Decimal::from_parts(422, 0, 0, false, 1),
];

const BIKE_BUCKETS: [Decimal; 4] = [
    Decimal::from_parts(10, 0, 0, false, 0),
    Decimal::from_parts(20, 0, 0, false, 0),
    Decimal::from_parts(50, 0, 0, false, 0),
    Decimal::from_parts(100, 0, 0, false, 0),
];

const SWIM_BUCKETS: [Decimal; 5] = [
    Decimal::from_parts(1, 0, 0, false, 1),
    Decimal::from_parts(2, 0, 0, false, 1),
    Decimal::from_parts(4, 0, 0, false, 1),
    Decimal::from_parts(8, 0, 0, false, 1),
    Decimal::from_parts(1, 0, 0, false, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Run,
    Bike,
    Swim,
}

impl Sport {
    pub const ALL: [Sport; 3] = [Sport::Run, Sport::Bike, Sport::Swim];

    /// Column value used in `sport_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Bike => "bike",
            Self::Swim => "swim",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "run" => Some(Self::Run),
            "bike" => Some(Self::Bike),
            "swim" => Some(Self::Swim),
            _ => None,
        }
    }

    /// Standard race distances in km, shortest first
    pub fn distance_buckets(&self) -> &'static [Decimal] {
        match self {
            Self::Run => &RUN_BUCKETS,
            Self::Bike => &BIKE_BUCKETS,
            Self::Swim => &SWIM_BUCKETS,
        }
    }

    /// Swim distances are logged in meters, everything else in km. Used for
    /// session totals only; bucket matching takes the logged value as-is.
    pub fn distance_in_km(&self, distance: Decimal) -> Decimal {
        match self {
            Self::Swim => distance / METERS_PER_KM,
            Self::Run | Self::Bike => distance,
        }
    }

    /// Compares the logged distance with the race distance directly, for
    /// every sport. A swim logged as 105 (meters) therefore never lands in
    /// the 0.1 bucket while one logged as 0.105 does.
    pub fn matches_bucket(&self, distance: Decimal, bucket: Decimal) -> bool {
        (distance - bucket).abs() < DISTANCE_TOLERANCE_KM
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_bucket_constants() {
        assert_eq!(
            Sport::Run.distance_buckets(),
            &[dec("5"), dec("10"), dec("21.1"), dec("42.2")]
        );
        assert_eq!(
            Sport::Bike.distance_buckets(),
            &[dec("10"), dec("20"), dec("50"), dec("100")]
        );
        assert_eq!(
            Sport::Swim.distance_buckets(),
            &[dec("0.1"), dec("0.2"), dec("0.4"), dec("0.8"), dec("1")]
        );
        assert_eq!(DISTANCE_TOLERANCE_KM, dec("0.01"));
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(Sport::from_name("Run"), Some(Sport::Run));
        assert_eq!(Sport::from_name(" BIKE "), Some(Sport::Bike));
        assert_eq!(Sport::from_name("swim"), Some(Sport::Swim));
        assert_eq!(Sport::from_name("rowing"), None);
    }

    #[test]
    fn test_run_tolerance() {
        assert!(Sport::Run.matches_bucket(dec("5.005"), dec("5")));
        assert!(Sport::Run.matches_bucket(dec("4.995"), dec("5")));
        assert!(!Sport::Run.matches_bucket(dec("5.015"), dec("5")));
        assert!(!Sport::Run.matches_bucket(dec("5.01"), dec("5")));
    }

    #[test]
    fn test_swim_bucket_matches_raw_distance() {
        assert!(Sport::Swim.matches_bucket(dec("0.105"), dec("0.1")));
        assert!(!Sport::Swim.matches_bucket(dec("0.115"), dec("0.1")));
        assert!(Sport::Swim.matches_bucket(dec("1"), dec("1")));
        assert!(!Sport::Swim.matches_bucket(dec("105"), dec("0.1")));
    }

    #[test]
    fn test_swim_meters_convert_for_totals() {
        assert_eq!(Sport::Swim.distance_in_km(dec("400")), dec("0.4"));
        assert_eq!(Sport::Run.distance_in_km(dec("10.5")), dec("10.5"));
    }

    #[test]
    fn test_display_matches_column_value() {
        for sport in Sport::ALL {
            assert_eq!(sport.to_string(), sport.as_str());
            assert_eq!(Sport::from_name(sport.as_str()), Some(sport));
        }
    }
}
