// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The persisted document format.
//!
//! Top-level keys are `meta`, `settings`, `prestart`, `slots` and `locaties`. Import is tolerant:
//! unknown keys are ignored, `null` or missing sections come back as `None` (see
//! [`PartialDocument`]), `null` fields read like missing ones, and malformed slot/location
//! entries are skipped with a warning. Only a non-object document or a section of the wrong
//! shape fails the import.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{
    Characters, Choice, Explanation, Location, LocationId, MapsLink, MeetingPoint, Meta,
    PartialDocument, Prestart, RouteDocument, Settings, Slot, SlotId,
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("section `{section}` has the wrong shape: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
struct DocumentJson {
    meta: MetaJson,
    settings: SettingsJson,
    prestart: PrestartJson,
    slots: Vec<SlotJson>,
    locaties: Vec<LocationJson>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MetaJson {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    subtitle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    characters: Option<CharactersJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CharactersJson {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    source: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visibility_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    multi_location_slot_mode: Option<String>,
    #[serde(default)]
    show_optional_slots: Option<bool>,
    #[serde(default)]
    list_show_future_slots: Option<bool>,
    #[serde(default)]
    map_show_future_locations: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrestartJson {
    #[serde(default, deserialize_with = "null_as_default")]
    use_location_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    meeting_point: MeetingPointJson,
    #[serde(default, deserialize_with = "null_as_default")]
    message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    maps: MapsJson,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MeetingPointJson {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    label: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MapsJson {
    #[serde(default, deserialize_with = "null_as_default")]
    label: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotJson {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unlock_after_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    complete_mode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationJson {
    id: String,
    #[serde(default)]
    slot: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    naam: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    radius: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    route_hint: String,
    #[serde(default, deserialize_with = "null_as_default")]
    uitleg: ExplanationJson,
    #[serde(default, deserialize_with = "null_as_default")]
    vragen: Vec<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExplanationJson {
    #[serde(default, deserialize_with = "null_as_default")]
    kort: String,
    #[serde(default, deserialize_with = "null_as_default")]
    uitgebreid: String,
}

/// Parses document text. Sections that are missing stay `None`.
pub fn document_from_json(text: &str) -> Result<PartialDocument, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    document_from_value(value)
}

/// Reads an already parsed document value.
pub fn document_from_value(value: Value) -> Result<PartialDocument, ImportError> {
    let Value::Object(mut object) = value else {
        return Err(ImportError::NotAnObject);
    };

    let meta = section::<MetaJson>(&mut object, "meta")?.map(meta_from_json);
    let settings = section::<SettingsJson>(&mut object, "settings")?.map(settings_from_json);
    let prestart = section::<PrestartJson>(&mut object, "prestart")?.map(prestart_from_json);
    let slots = section::<Vec<Value>>(&mut object, "slots")?
        .map(|entries| entries_from_json(entries, "slots", slot_from_json));
    let locations = section::<Vec<Value>>(&mut object, "locaties")?
        .map(|entries| entries_from_json(entries, "locaties", location_from_json));

    Ok(PartialDocument {
        meta,
        settings,
        prestart,
        slots,
        locations,
    })
}

/// Pretty-printed export. Empty optional slot fields and absent or disabled
/// characters are left out; `prestart.maps` is always written.
pub fn document_to_json(doc: &RouteDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&document_json(doc))
}

pub fn document_to_value(doc: &RouteDocument) -> Result<Value, serde_json::Error> {
    serde_json::to_value(document_json(doc))
}

fn section<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Option<T>, ImportError> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| ImportError::InvalidSection {
                section: key,
                source,
            }),
    }
}

fn entries_from_json<T, J>(
    entries: Vec<Value>,
    section: &'static str,
    convert: impl Fn(J) -> Option<T>,
) -> Vec<T>
where
    J: DeserializeOwned,
{
    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let has_id = entry
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !entry.is_object() || !has_id {
            tracing::warn!(section, index, "skipped entry without an id");
            continue;
        }
        match serde_json::from_value::<J>(entry) {
            Ok(json) => out.extend(convert(json)),
            Err(err) => tracing::warn!(section, index, error = %err, "skipped malformed entry"),
        }
    }
    out
}

/// `null` reads as the field's default, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn strings_from_json(values: Vec<Value>, field: &'static str) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(text) => Some(text),
            other => {
                tracing::warn!(field, value = %other, "skipped non-string entry");
                None
            }
        })
        .collect()
}

/// An empty mode string means "unset", like a missing key.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn meta_from_json(json: MetaJson) -> Meta {
    Meta {
        title: json.title,
        subtitle: json.subtitle,
        version: json.version,
        characters: json.characters.map(|characters| Characters {
            enabled: characters.enabled.unwrap_or(true),
            source: characters.source,
        }),
    }
}

fn settings_from_json(json: SettingsJson) -> Settings {
    let defaults = Settings::default();
    Settings {
        visibility_mode: non_empty(json.visibility_mode.as_deref()).map(Choice::parse),
        multi_location_slot_mode: non_empty(json.multi_location_slot_mode.as_deref())
            .map(Choice::parse),
        show_optional_slots: json
            .show_optional_slots
            .unwrap_or(defaults.show_optional_slots),
        list_show_future_slots: json
            .list_show_future_slots
            .unwrap_or(defaults.list_show_future_slots),
        map_show_future_locations: json
            .map_show_future_locations
            .unwrap_or(defaults.map_show_future_locations),
    }
}

fn prestart_from_json(json: PrestartJson) -> Prestart {
    Prestart {
        use_location_id: LocationId::optional(&json.use_location_id),
        meeting_point: MeetingPoint {
            lat: json.meeting_point.lat,
            lng: json.meeting_point.lng,
            label: json.meeting_point.label,
        },
        message: json.message,
        maps: MapsLink {
            label: json.maps.label,
        },
        images: strings_from_json(json.images, "prestart.images"),
    }
}

fn slot_from_json(json: SlotJson) -> Option<Slot> {
    let slot_id = SlotId::optional(&json.id)?;
    let mut slot = Slot::new(slot_id, json.label, json.required);
    slot.unlock_after = json.unlock_after_slot.as_deref().and_then(SlotId::optional);
    slot.complete_mode = non_empty(json.complete_mode.as_deref()).map(Choice::parse);
    Some(slot)
}

fn location_from_json(json: LocationJson) -> Option<Location> {
    let location_id = LocationId::optional(&json.id)?;
    let slot_id = json.slot.as_deref().and_then(SlotId::optional);
    let mut location = Location::new(location_id, slot_id, json.naam);
    location.lat = json.lat;
    location.lng = json.lng;
    location.radius = json.radius;
    location.images = strings_from_json(json.images, "locaties.images");
    location.route_hint = json.route_hint;
    location.explanation = Explanation {
        short: json.uitleg.kort,
        long: json.uitleg.uitgebreid,
    };
    location.questions = strings_from_json(json.vragen, "locaties.vragen");
    Some(location)
}

fn document_json(doc: &RouteDocument) -> DocumentJson {
    DocumentJson {
        meta: meta_json(&doc.meta),
        settings: settings_json(&doc.settings),
        prestart: prestart_json(&doc.prestart),
        slots: doc.slots.iter().map(slot_json).collect(),
        locaties: doc.locations.iter().map(location_json).collect(),
    }
}

fn meta_json(meta: &Meta) -> MetaJson {
    MetaJson {
        title: meta.title.clone(),
        subtitle: meta.subtitle.clone(),
        version: meta.version.clone(),
        characters: meta
            .characters
            .as_ref()
            .filter(|characters| characters.enabled)
            .map(|characters| CharactersJson {
                enabled: Some(true),
                source: characters.source.clone(),
            }),
    }
}

fn settings_json(settings: &Settings) -> SettingsJson {
    SettingsJson {
        visibility_mode: settings
            .visibility_mode
            .as_ref()
            .map(|mode| mode.as_str().to_owned()),
        multi_location_slot_mode: settings
            .multi_location_slot_mode
            .as_ref()
            .map(|mode| mode.as_str().to_owned()),
        show_optional_slots: Some(settings.show_optional_slots),
        list_show_future_slots: Some(settings.list_show_future_slots),
        map_show_future_locations: Some(settings.map_show_future_locations),
    }
}

fn prestart_json(prestart: &Prestart) -> PrestartJson {
    PrestartJson {
        use_location_id: prestart
            .use_location_id
            .as_ref()
            .map(|id| id.as_str().to_owned())
            .unwrap_or_default(),
        meeting_point: MeetingPointJson {
            lat: prestart.meeting_point.lat,
            lng: prestart.meeting_point.lng,
            label: prestart.meeting_point.label.clone(),
        },
        message: prestart.message.clone(),
        maps: MapsJson {
            label: prestart.maps.label.clone(),
        },
        images: prestart.images.iter().cloned().map(Value::String).collect(),
    }
}

fn slot_json(slot: &Slot) -> SlotJson {
    SlotJson {
        id: slot.id.as_str().to_owned(),
        label: slot.label.clone(),
        required: slot.required,
        unlock_after_slot: slot.unlock_after.as_ref().map(|id| id.as_str().to_owned()),
        complete_mode: slot
            .complete_mode
            .as_ref()
            .map(|mode| mode.as_str().to_owned()),
    }
}

fn location_json(location: &Location) -> LocationJson {
    LocationJson {
        id: location.id.as_str().to_owned(),
        slot: Some(
            location
                .slot
                .as_ref()
                .map(|id| id.as_str().to_owned())
                .unwrap_or_default(),
        ),
        naam: location.name.clone(),
        lat: location.lat,
        lng: location.lng,
        radius: location.radius,
        images: location.images.iter().cloned().map(Value::String).collect(),
        route_hint: location.route_hint.clone(),
        uitleg: ExplanationJson {
            kort: location.explanation.short.clone(),
            uitgebreid: location.explanation.long.clone(),
        },
        vragen: location.questions.iter().cloned().map(Value::String).collect(),
    }
}
