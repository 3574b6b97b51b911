use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::catalog::{CameraRecord, Catalog, ObjectSuggestion};
use crate::form::{FieldId, FormState};
use crate::persistence::{FormStore, StoredForm};
use crate::util::*;

/// A form that passes validation
pub(crate) fn valid_form() -> FormState {
    FormState::from([
        (FieldId::ObjectName, "M31 (Andromeda Galaxy)"),
        (FieldId::ObjectId, "M31"),
        (FieldId::Latitude, "40.416775"),
        (FieldId::Longitude, "-3.703790"),
        (FieldId::Altitude, "650"),
        (FieldId::SensorWidthMm, "23.5"),
        (FieldId::SensorHeightMm, "15.6"),
        (FieldId::NumberOfPixelsInWidth, "6000"),
        (FieldId::NumberOfPixelsInHeight, "4000"),
        (FieldId::FocalLength, "200"),
        (FieldId::Aperture, "2.8"),
        (FieldId::ShootInterval, "2"),
        (FieldId::CameraPosition, "0"),
        (FieldId::ObservationDate, "2024-10-01"),
        (FieldId::MinDegrees, "20"),
        (FieldId::CsrfToken, "abc"),
    ])
}

/// Form store that never touches the disk
#[derive(Default)]
pub(crate) struct MemoryStore(Mutex<Option<StoredForm>>);

impl FormStore for MemoryStore {
    fn load(&self) -> PlannerResult<Option<StoredForm>> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn save(&self, data: &StoredForm) -> PlannerResult<()> {
        *self.0.lock().unwrap() = Some(data.clone());
        Ok(())
    }
}

/// In-process catalog. The query "broken" fails like an unreachable server.
pub(crate) struct FakeCatalog {
    objects: Vec<ObjectSuggestion>,
    cameras: Vec<CameraRecord>,
    delays: HashMap<String, Duration>,
    queries: Mutex<Vec<String>>,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        let object = |id: &str, common: &str| ObjectSuggestion {
            id: id.to_string(),
            name: format!("{} ({})", id, common),
        };
        let camera = |brand: &str, model: &str, w: f64, h: f64, px_w: u32, px_h: u32| CameraRecord {
            value: model.to_string(),
            text: format!("<strong>{}</strong> ({})", model, brand),
            brand: Some(brand.to_string()),
            model: Some(model.to_string()),
            sensor_width_mm: Some(w),
            sensor_height_mm: Some(h),
            number_of_pixels_in_width: Some(px_w),
            number_of_pixels_in_height: Some(px_h),
            ..Default::default()
        };

        Self {
            objects: vec![
                object("M31", "Andromeda Galaxy"),
                object("M33", "Triangulum Galaxy"),
                object("M42", "Orion Nebula"),
                object("NGC7000", "North America Nebula"),
            ],
            cameras: vec![
                camera("Canon", "EOS 2000D", 22.3, 14.9, 6000, 4000),
                camera("Nikon", "D850", 35.9, 23.9, 8256, 5504),
            ],
            delays: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl FakeCatalog {
    /// Answers to `query` take `delay`
    pub(crate) fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    /// Every query that reached the catalog, in order
    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    async fn receive(&self, query: &str) -> PlannerResult<String> {
        self.queries.lock().unwrap().push(query.to_string());
        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if query == "broken" {
            return Err(PlannerError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(query.to_lowercase())
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search_objects(&self, query: &str) -> PlannerResult<Vec<ObjectSuggestion>> {
        let query = self.receive(query).await?;
        Ok(self
            .objects
            .iter()
            .filter(|o| o.id.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn cameras(&self, query: &str) -> PlannerResult<Vec<CameraRecord>> {
        let query = self.receive(query).await?;
        Ok(self
            .cameras
            .iter()
            .filter(|c| c.text.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }
}
