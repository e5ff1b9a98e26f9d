//! Place questions against the Dubai gazetteer
//!
//! Resolution goes through the completion service, the answer is framed for
//! the map widget and optionally carries a straight-line directions estimate.

use std::sync::Arc;
use tracing::{info, instrument};

pub mod directions;
pub mod gazetteer;
pub mod resolver;

pub use directions::DirectionsEstimate;
pub use gazetteer::Gazetteer;
pub use resolver::{GazetteerResolver, ResolvedQuery, RouteRequest};

use crate::completion::CompletionService;
use crate::config::{LocationsConfig, MapConfig};
use crate::models::{LocationQuery, LocationQueryResponse};

/// Answers location queries
pub struct LocationService {
    gazetteer: Arc<Gazetteer>,
    resolver: GazetteerResolver,
    map: MapConfig,
    average_speed_kmh: f64,
}

impl LocationService {
    pub fn new(
        completion: Arc<dyn CompletionService>,
        gazetteer: Arc<Gazetteer>,
        settings: &LocationsConfig,
        map: MapConfig,
    ) -> Self {
        Self {
            resolver: GazetteerResolver::new(completion, gazetteer.clone()),
            gazetteer,
            map,
            average_speed_kmh: settings.average_speed_kmh,
        }
    }

    /// Resolve a place question and frame the result for the map
    #[instrument(skip(self, query))]
    pub async fn query(&self, query: &LocationQuery) -> crate::Result<LocationQueryResponse> {
        query.validate()?;

        let resolved = self.resolver.resolve(&query.query).await;
        let response = self.build_response(resolved)?;

        info!(
            "Location query answered with {} location(s), directions: {}",
            response.locations.len(),
            response.directions.is_some()
        );
        Ok(response)
    }

    /// Turn a validated resolution into the response payload.
    ///
    /// A route built outside the resolver may still name unknown endpoints;
    /// those surface as `NotFound`.
    pub fn build_response(&self, resolved: ResolvedQuery) -> crate::Result<LocationQueryResponse> {
        // Gazetteer order, independent of how the model listed the ids
        let locations = self
            .gazetteer
            .entries()
            .filter(|entry| resolved.matching_ids.contains(&entry.id))
            .cloned()
            .collect();

        let mut map_center = self.map.default_center;
        let mut zoom_level = self.map.default_zoom;

        if let Some(primary) = resolved
            .primary_id
            .as_deref()
            .and_then(|id| self.gazetteer.get(id))
        {
            map_center = primary.coordinates;
            zoom_level = self.map.primary_zoom;
        }

        let directions = match &resolved.route {
            Some(route) => {
                zoom_level = self.map.directions_zoom;
                Some(directions::between(
                    &self.gazetteer,
                    &route.origin_id,
                    &route.destination_id,
                    self.average_speed_kmh,
                )?)
            }
            None => None,
        };

        Ok(LocationQueryResponse {
            locations,
            primary_location: resolved.primary_id,
            directions,
            map_center,
            zoom_level,
        })
    }
}
