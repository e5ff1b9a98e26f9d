//! Straight-line travel estimates between gazetteer entries.
//!
//! This is a placeholder for a real routing engine: the distance is the
//! great-circle distance, the duration assumes a constant average speed and
//! the steps are a fixed template that ignores the road network.

use haversine::{Units, distance};
use serde::{Deserialize, Serialize};

use super::Gazetteer;
use crate::VoiceGuideError;
use crate::models::GazetteerEntry;

/// Assumed average speed in Dubai traffic
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 35.0;

/// Mock route between two gazetteer entries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectionsEstimate {
    pub origin: GazetteerEntry,
    pub destination: GazetteerEntry,
    pub distance_text: String,
    pub duration_text: String,
    pub steps: Vec<String>,
}

/// Great-circle distance in kilometres
#[must_use]
pub fn distance_km(origin: &GazetteerEntry, destination: &GazetteerEntry) -> f64 {
    distance(
        origin.coordinates.into(),
        destination.coordinates.into(),
        Units::Kilometers,
    )
}

/// Whole minutes needed at `speed_kmh`, truncated
#[must_use]
pub fn travel_minutes(distance_km: f64, speed_kmh: f64) -> u64 {
    (distance_km / speed_kmh * 60.0) as u64
}

/// Estimate a trip between two known entries
#[must_use]
pub fn estimate(
    origin: &GazetteerEntry,
    destination: &GazetteerEntry,
    speed_kmh: f64,
) -> DirectionsEstimate {
    let km = distance_km(origin, destination);
    let minutes = travel_minutes(km, speed_kmh);

    DirectionsEstimate {
        origin: origin.clone(),
        destination: destination.clone(),
        distance_text: format!("{km:.1} km"),
        duration_text: format!("{minutes} mins"),
        steps: vec![
            format!("Start from {}", origin.name),
            "Head to the main road".to_string(),
            format!("Continue towards {}", destination.name),
            format!("Arrive at {}", destination.name),
        ],
    }
}

/// Look both ids up and estimate the trip; unknown ids are `NotFound`
pub fn between(
    gazetteer: &Gazetteer,
    origin_id: &str,
    destination_id: &str,
    speed_kmh: f64,
) -> crate::Result<DirectionsEstimate> {
    let lookup = |id: &str| {
        gazetteer
            .get(id)
            .ok_or_else(|| VoiceGuideError::not_found(format!("Location not found: {id}")))
    };

    let origin = lookup(origin_id)?;
    let destination = lookup(destination_id)?;
    Ok(estimate(origin, destination, speed_kmh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_burj_khalifa_to_dubai_mall() {
        let gazetteer = Gazetteer::dubai();
        let directions = between(
            &gazetteer,
            "burj-khalifa",
            "dubai-mall",
            DEFAULT_AVERAGE_SPEED_KMH,
        )
        .unwrap();

        let km = distance_km(&directions.origin, &directions.destination);
        assert!(km > 0.4 && km < 1.0, "unexpected distance {km}");
        assert_eq!(directions.distance_text, "0.5 km");
        assert_eq!(directions.duration_text, "0 mins");
        assert_eq!(
            directions.steps,
            vec![
                "Start from Burj Khalifa",
                "Head to the main road",
                "Continue towards The Dubai Mall",
                "Arrive at The Dubai Mall"
            ]
        );
    }

    #[test]
    fn test_longer_trip() {
        let gazetteer = Gazetteer::dubai();
        let directions = between(
            &gazetteer,
            "palm-jumeirah",
            "dubai-mall",
            DEFAULT_AVERAGE_SPEED_KMH,
        )
        .unwrap();

        let km = distance_km(&directions.origin, &directions.destination);
        assert!(km > 15.0 && km < 20.0, "unexpected distance {km}");
        assert_eq!(
            directions.duration_text,
            format!("{} mins", travel_minutes(km, DEFAULT_AVERAGE_SPEED_KMH))
        );
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.58, 0)]
    #[case(0.59, 1)]
    #[case(35.0, 60)]
    #[case(17.49, 29)]
    fn test_minutes_are_truncated(#[case] km: f64, #[case] expected: u64) {
        assert_eq!(travel_minutes(km, DEFAULT_AVERAGE_SPEED_KMH), expected);
    }

    #[test]
    fn test_same_entry_is_zero() {
        let gazetteer = Gazetteer::dubai();
        let directions = between(
            &gazetteer,
            "dubai-frame",
            "dubai-frame",
            DEFAULT_AVERAGE_SPEED_KMH,
        )
        .unwrap();
        assert_eq!(directions.distance_text, "0.0 km");
        assert_eq!(directions.duration_text, "0 mins");
    }

    #[rstest]
    #[case("atlantis", "dubai-mall")]
    #[case("burj-khalifa", "atlantis")]
    fn test_unknown_endpoint_is_not_found(#[case] origin: &str, #[case] destination: &str) {
        let gazetteer = Gazetteer::dubai();
        let result = between(&gazetteer, origin, destination, DEFAULT_AVERAGE_SPEED_KMH);
        assert!(matches!(result, Err(VoiceGuideError::NotFound { .. })));
    }
}
