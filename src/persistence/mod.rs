//! Form state kept between sessions.
//!
//! The whole form is stored as one JSON object of field name to text. Empty fields and the CSRF
//! token are never stored.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::form::{FieldId, FormFields, DEFAULT_APERTURE, DEFAULT_CAMERA_POSITION};
use crate::util::*;

pub type StoredForm = BTreeMap<String, String>;

pub trait FormStore {
    /// `None` if nothing was stored yet
    fn load(&self) -> PlannerResult<Option<StoredForm>>;
    fn save(&self, data: &StoredForm) -> PlannerResult<()>;
}

/// Keeps the blob in a file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FormStore for JsonFileStore {
    fn load(&self) -> PlannerResult<Option<StoredForm>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, data: &StoredForm) -> PlannerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(data)?)?;
        Ok(())
    }
}

/// Stores every non-empty field except the CSRF token
pub fn save_form<F: FormFields + ?Sized>(store: &dyn FormStore, form: &F) -> PlannerResult<()> {
    let data: StoredForm = FieldId::ALL
        .iter()
        .filter(|id| **id != FieldId::CsrfToken)
        .filter_map(|id| {
            form.field(*id)
                .filter(|v| !v.is_empty())
                .map(|v| (id.name().to_string(), v.to_string()))
        })
        .collect();

    debug!("Saving {} form fields", data.len());
    store.save(&data)
}

/// Writes the stored fields back into the form.
///
/// Unknown field names are skipped. Aperture and camera position fall back to their defaults
/// when they were not stored. Returns false, leaving the form untouched, if nothing was stored.
pub fn restore_form<F: FormFields + ?Sized>(
    store: &dyn FormStore,
    form: &mut F,
) -> PlannerResult<bool> {
    let data = match store.load()? {
        Some(data) => data,
        None => {
            debug!("No saved form state");
            return Ok(false);
        }
    };

    for (name, value) in &data {
        match name.parse::<FieldId>() {
            Ok(FieldId::CsrfToken) => {}
            Ok(id) => form.set_field(id, value.clone()),
            Err(e) => warn!("{}, ignoring it", e),
        }
    }

    let aperture = data
        .get(FieldId::Aperture.name())
        .map_or(DEFAULT_APERTURE, String::as_str);
    form.set_field(FieldId::Aperture, aperture.to_string());

    let camera_position = data
        .get(FieldId::CameraPosition.name())
        .map_or(DEFAULT_CAMERA_POSITION, String::as_str);
    form.set_field(FieldId::CameraPosition, camera_position.to_string());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::test_util::{valid_form, MemoryStore};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("astro_shot_planner_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_save_skips_empty_and_csrf() {
        let store = MemoryStore::default();
        let mut form = valid_form();
        form.set_field(FieldId::Altitude, "".to_string());
        save_form(&store, &form).unwrap();

        let data = store.load().unwrap().unwrap();
        assert_eq!(data.get("object_id").map(String::as_str), Some("M31"));
        assert!(!data.contains_key("csrf_token"));
        assert!(!data.contains_key("altitude"));
        assert_eq!(data.len(), 14);
    }

    #[test]
    fn test_restore() {
        let store = MemoryStore::default();
        save_form(&store, &valid_form()).unwrap();

        let mut form = FormState::from([(FieldId::CsrfToken, "fresh")]);
        assert!(restore_form(&store, &mut form).unwrap());
        assert_eq!(form.text(FieldId::ObjectName), "M31 (Andromeda Galaxy)");
        assert_eq!(form.text(FieldId::Aperture), "2.8");
        assert_eq!(form.text(FieldId::CsrfToken), "fresh");
    }

    #[test]
    fn test_restore_defaults_and_unknown_fields() {
        let store = MemoryStore::default();
        let mut data = StoredForm::new();
        data.insert("latitude".to_string(), "12.500000".to_string());
        data.insert("telescope".to_string(), "Dobson".to_string());
        data.insert("csrf_token".to_string(), "stale".to_string());
        store.save(&data).unwrap();

        let mut form = FormState::new();
        assert!(restore_form(&store, &mut form).unwrap());
        assert_eq!(form.text(FieldId::Latitude), "12.500000");
        assert_eq!(form.text(FieldId::Aperture), "1");
        assert_eq!(form.text(FieldId::CameraPosition), "0");
        assert!(form.is_empty(FieldId::CsrfToken));
    }

    #[test]
    fn test_restore_without_saved_state() {
        let mut form = FormState::from([(FieldId::Latitude, "1")]);
        assert!(!restore_form(&MemoryStore::default(), &mut form).unwrap());
        assert_eq!(form, FormState::from([(FieldId::Latitude, "1")]));
    }

    #[test]
    fn test_json_file_store() {
        let path = temp_path("nested/form_state.json");
        let store = JsonFileStore::new(&path);
        assert!(store.load().unwrap().is_none());

        save_form(&store, &valid_form()).unwrap();
        let mut form = FormState::new();
        assert!(restore_form(&store, &mut form).unwrap());
        assert_eq!(form.text(FieldId::ObservationDate), "2024-10-01");

        fs::write(&path, "not json").unwrap();
        assert!(matches!(store.load(), Err(PlannerError::Json(_))));

        fs::remove_dir_all(path.parent().unwrap().parent().unwrap()).unwrap();
    }
}
