mod astro_math;
mod catalog;
pub mod config;
mod form;
mod persistence;
mod planning;
mod util;

#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;
#[cfg(test)]
mod test_util;

use eyre::{eyre, WrapErr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use astro_math::{decimal_to_dms, dms_to_decimal};
use catalog::{Autocompleter, CameraModels, Catalog, HttpCatalog, ObjectNames, SuggestionSource};
use config::Config;
use form::*;
use persistence::{restore_form, save_form, JsonFileStore};
use planning::{plan_observation, TargetObject};
use util::*;

const USAGE: &str = "\
Usage: astro_shot_planner [--config PATH] <command>

Commands:
  to-dms <decimal>
  to-decimal <degrees> <minutes> <seconds> [--longitude]
  show
  set <field> <value>
  locate
  search <query> [--pick N]
  cameras <query> [--pick N]
  plan --target <target.json>";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = pico_args::Arguments::from_env();
    let config_path: PathBuf = args
        .opt_value_from_str("--config")?
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config: Config = confy::load_path(&config_path)
        .wrap_err_with(|| format!("Couldn't parse configuration {}", config_path.display()))?;
    debug!("Loaded configuration from {}", config_path.display());

    let command = match args.subcommand()? {
        Some(command) => command,
        None => {
            println!("{}", USAGE);
            return Ok(());
        }
    };

    match command.as_str() {
        "to-dms" => {
            let decimal: f64 = args.free_from_str()?;
            let dms = decimal_to_dms(decimal);
            println!(
                "{}° {}' {}\"",
                dms.degrees_text(),
                dms.minutes_text(),
                dms.seconds_text()
            );
        }
        "to-decimal" => {
            let axis = if args.contains("--longitude") {
                CoordinateAxis::Longitude
            } else {
                CoordinateAxis::Latitude
            };
            let degrees: f64 = args.free_from_str()?;
            let minutes: f64 = args.free_from_str()?;
            let seconds: f64 = args.free_from_str()?;
            println!("{:.6}", dms_to_decimal(degrees, minutes, seconds, axis));
        }
        "show" => {
            let form = load_form(&config)?;
            show(&form);
        }
        "set" => {
            let field: FieldId = args.free_from_str()?;
            let value: String = args.free_from_str()?;
            let mut form = load_form(&config)?;
            form.set_field(field, value);
            if on_field_input(&mut form, field) {
                println!(
                    "latitude {}, longitude {}",
                    form.text(FieldId::Latitude),
                    form.text(FieldId::Longitude)
                );
            }
            store_form(&config, &form)?;
        }
        "locate" => {
            let mut form = load_form(&config)?;
            let geolocator = ConfiguredLocation(Some(config.observation_location));
            on_geolocation_result(&mut form, geolocator.current_position());
            store_form(&config, &form)?;
            show(&form);
        }
        "search" | "cameras" => {
            let pick: Option<usize> = args.opt_value_from_str("--pick")?;
            let query: String = args.free_from_str()?;
            let catalog: Arc<dyn Catalog> = Arc::new(HttpCatalog::new(&config.catalog)?);

            if command == "search" {
                let objects = suggest(ObjectNames(catalog), &config, &query).await;
                for (i, object) in objects.iter().enumerate() {
                    println!("{:>3}. {} [{}]", i + 1, object.name, object.id);
                }
                if let Some(object) = picked(&objects, pick)? {
                    let mut form = load_form(&config)?;
                    apply_object_suggestion(&mut form, object);
                    store_form(&config, &form)?;
                }
            } else {
                let cameras = suggest(CameraModels(catalog), &config, &query).await;
                for (i, camera) in cameras.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, camera.value);
                }
                if let Some(camera) = picked(&cameras, pick)? {
                    let mut form = load_form(&config)?;
                    apply_camera(&mut form, camera);
                    store_form(&config, &form)?;
                }
            }
        }
        "plan" => {
            let target_path: PathBuf = args.value_from_str("--target")?;
            let target: TargetObject = serde_json::from_str(
                &std::fs::read_to_string(&target_path)
                    .wrap_err_with(|| format!("Couldn't read {}", target_path.display()))?,
            )?;
            let form = ObservationForm::from_fields(&load_form(&config)?)?;
            println!("{}", plan_observation(&form, &target)?);
        }
        other => return Err(eyre!("Unknown command \"{}\"\n\n{}", other, USAGE)),
    }

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(eyre!("Unexpected arguments {:?}", rest));
    }
    Ok(())
}

fn load_form(config: &Config) -> PlannerResult<FormState> {
    let store = JsonFileStore::new(&config.persistence.state_path);
    let mut form = FormState::new();
    if !restore_form(&store, &mut form)? {
        apply_selection_defaults(&mut form);
    }
    Ok(form)
}

fn store_form(config: &Config, form: &FormState) -> PlannerResult<()> {
    save_form(&JsonFileStore::new(&config.persistence.state_path), form)
}

fn show(form: &FormState) {
    let apertures = aperture_options();
    let camera_positions = camera_position_options();
    for id in FieldId::ALL {
        if id == FieldId::CsrfToken {
            continue;
        }
        let text = form.text(id);
        let label = match id {
            FieldId::Aperture => option_label(&apertures, text),
            FieldId::CameraPosition => option_label(&camera_positions, text),
            _ => text,
        };
        println!("{:<28} {}", id.name(), label);
    }
}

/// The select label for `value`, or the value itself when it is not one of the options
fn option_label<'a>(options: &'a [(String, String)], value: &'a str) -> &'a str {
    options
        .iter()
        .find(|(v, _)| v == value)
        .map_or(value, |(_, label)| label.as_str())
}

/// One autocomplete round for `query`
async fn suggest<S: SuggestionSource>(
    source: S,
    config: &Config,
    query: &str,
) -> Vec<S::Item> {
    let autocompleter = Autocompleter::new(source, config.autocomplete);
    let suggestions = autocompleter.subscribe();
    if let Some(handle) = autocompleter.input(query) {
        if let Err(e) = handle.await {
            debug!("Suggestion task ended early: {}", e);
        }
    }
    let list = suggestions.borrow().clone();
    list
}

/// The 1-based `pick` from `items`
fn picked<T>(items: &[T], pick: Option<usize>) -> eyre::Result<Option<&T>> {
    match pick {
        None => Ok(None),
        Some(n) => n
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .map(Some)
            .ok_or_else(|| eyre!("No suggestion number {}", n)),
    }
}
