use crate::astro_math::Degrees;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/* Config */
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogSettings,
    pub autocomplete: AutocompleteSettings,
    pub observation_location: ObservingLocation,
    pub persistence: PersistenceSettings,
}

/* Catalog Server */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Prefix of the `search_objects` and `cameras` endpoints
    pub base_url: String,
    pub timeout_millis: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_millis: 5000,
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis as u64)
    }
}

/* Autocomplete */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct AutocompleteSettings {
    pub debounce_millis: u64,
    pub min_query_length: usize,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            debounce_millis: 300,
            min_query_length: 3,
        }
    }
}

impl AutocompleteSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_millis)
    }
}

/* Location */
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservingLocation {
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub elevation: f64,
    /// When false the location is withheld from the form
    pub shared: bool,
}

impl Default for ObservingLocation {
    fn default() -> Self {
        Self {
            latitude: 51.47,
            longitude: 0.0,
            elevation: 15.0,
            shared: true,
        }
    }
}

/* Persistence */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceSettings {
    pub state_path: PathBuf,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("form_state.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_shared_by_default() {
        let location: ObservingLocation =
            serde_json::from_str(r#"{"latitude": 40.4, "longitude": -3.7, "elevation": 650.0}"#)
                .unwrap();
        assert!(location.shared);
        assert_eq!(location.elevation, 650.);
    }
}
