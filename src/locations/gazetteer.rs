//! Fixed reference list of Dubai points of interest

use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::VoiceGuideError;
use crate::models::{Coordinates, GazetteerEntry};

/// Immutable, id-indexed collection of gazetteer entries.
///
/// Built once at startup and shared read-only between request handlers.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    index: HashMap<String, usize>,
}

impl Gazetteer {
    /// Build a gazetteer; ids must be unique and the list non-empty
    pub fn new(entries: Vec<GazetteerEntry>) -> crate::Result<Self> {
        if entries.is_empty() {
            return Err(VoiceGuideError::config("Gazetteer must contain at least one entry"));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            entry.coordinates.validate().map_err(|e| {
                VoiceGuideError::config(format!("Gazetteer entry '{}': {e}", entry.id))
            })?;
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(VoiceGuideError::config(format!(
                    "Duplicate gazetteer id '{}'",
                    entry.id
                )));
            }
        }

        Ok(Self { entries, index })
    }

    /// Load entries from a JSON array file
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<GazetteerEntry> = serde_json::from_str(&content).map_err(|e| {
            VoiceGuideError::config(format!(
                "Invalid gazetteer file {}: {e}",
                path.display()
            ))
        })?;
        info!("Loaded {} gazetteer entries from {}", entries.len(), path.display());
        Self::new(entries)
    }

    /// The built-in Dubai landmarks
    #[must_use]
    pub fn dubai() -> Self {
        let entries = DUBAI_LANDMARKS
            .iter()
            .map(|landmark| GazetteerEntry {
                id: landmark.id.to_string(),
                name: landmark.name.to_string(),
                category: landmark.category.to_string(),
                coordinates: Coordinates::new(landmark.lat, landmark.lng),
                description: landmark.description.to_string(),
                image_url: landmark.image_url.map(str::to_string),
            })
            .collect::<Vec<_>>();

        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.id.clone(), position))
            .collect();

        Self { entries, index }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GazetteerEntry> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The most prominent landmark, used when resolution fails
    #[must_use]
    pub fn default_entry(&self) -> &GazetteerEntry {
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &GazetteerEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Self::dubai()
    }
}

struct Landmark {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    lat: f64,
    lng: f64,
    description: &'static str,
    image_url: Option<&'static str>,
}

const DUBAI_LANDMARKS: &[Landmark] = &[
    Landmark {
        id: "burj-khalifa",
        name: "Burj Khalifa",
        category: "attraction",
        lat: 25.197197,
        lng: 55.274376,
        description: "The world's tallest building, standing at 828 meters with 163 floors. Features observation decks, restaurants, and offices.",
        image_url: Some("https://images.unsplash.com/photo-1582672060674-bc2bd808a8ce"),
    },
    Landmark {
        id: "dubai-mall",
        name: "The Dubai Mall",
        category: "shopping",
        lat: 25.198765,
        lng: 55.279533,
        description: "One of the world's largest shopping malls with over 1,200 stores, an aquarium, ice rink, and cinema.",
        image_url: Some("https://images.unsplash.com/photo-1582672060674-bc2bd808a8ce"),
    },
    Landmark {
        id: "palm-jumeirah",
        name: "Palm Jumeirah",
        category: "attraction",
        lat: 25.119721,
        lng: 55.138782,
        description: "Artificial archipelago in the shape of a palm tree, home to luxury hotels, apartments, and beaches.",
        image_url: Some("https://images.unsplash.com/photo-1620158232350-613006b21253"),
    },
    Landmark {
        id: "dubai-marina",
        name: "Dubai Marina",
        category: "attraction",
        lat: 25.076090,
        lng: 55.133300,
        description: "An artificial canal city with a 7 km promenade, luxury residences, yachts, and dining options.",
        image_url: Some("https://images.unsplash.com/photo-1512453979798-5ea266f8880c"),
    },
    Landmark {
        id: "dubai-frame",
        name: "Dubai Frame",
        category: "attraction",
        lat: 25.234700,
        lng: 55.300333,
        description: "A 150-meter-tall architectural landmark offering panoramic views of old and new Dubai.",
        image_url: None,
    },
    Landmark {
        id: "al-fahidi",
        name: "Al Fahidi Historical District",
        category: "historical",
        lat: 25.263681,
        lng: 55.296453,
        description: "A historic district showcasing the traditional Arabian lifestyle with wind-tower architecture, museums, and art galleries.",
        image_url: Some("https://images.unsplash.com/photo-1548111396-c3d47c36a76c"),
    },
    Landmark {
        id: "jbr-beach",
        name: "JBR Beach",
        category: "beach",
        lat: 25.082690,
        lng: 55.134724,
        description: "A popular beachfront with shops, restaurants, and entertainment along The Walk at JBR.",
        image_url: Some("https://images.unsplash.com/photo-1551918120-9739cb430c6d"),
    },
    Landmark {
        id: "dubai-museum",
        name: "Dubai Museum",
        category: "historical",
        lat: 25.263272,
        lng: 55.297556,
        description: "Located in the Al Fahidi Fort, it's the main museum in Dubai displaying the city's history and cultural heritage.",
        image_url: None,
    },
    Landmark {
        id: "miracle-garden",
        name: "Dubai Miracle Garden",
        category: "attraction",
        lat: 25.060996,
        lng: 55.246525,
        description: "The world's largest natural flower garden featuring over 50 million flowers in stunning designs and arrangements.",
        image_url: Some("https://images.unsplash.com/photo-1586769412527-ab755ae0c889"),
    },
    Landmark {
        id: "mall-of-emirates",
        name: "Mall of the Emirates",
        category: "shopping",
        lat: 25.117970,
        lng: 55.200651,
        description: "A large shopping mall featuring the famous indoor ski resort Ski Dubai, along with hundreds of stores and restaurants.",
        image_url: Some("https://images.unsplash.com/photo-1554919700-28f461160500"),
    },
];
