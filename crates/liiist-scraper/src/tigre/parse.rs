//! Decoding and filtering of the Oasi Tigre store-locator response.

use liiist_core::ShopRecord;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ScraperError;

/// City code that qualifies a drive-through store.
const PICKUP_CITY_CODE: &str = "RM";

/// One element of the locator response array.
#[derive(Debug, Clone, Deserialize)]
pub struct LocatorEntry {
    pub store: LocatorStore,
}

/// Store payload as returned by the locator.
///
/// The service is loose with types: flags and coordinates arrive as strings
/// on most stores, so those fields stay as raw JSON until they are coerced.
#[derive(Debug, Clone, Deserialize)]
pub struct LocatorStore {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub click_collect: Value,
    #[serde(default)]
    pub click_drive: Value,
    #[serde(default)]
    pub lat: Value,
    #[serde(default)]
    pub lon: Value,
    #[serde(default)]
    pub hours: Value,
}

/// Whether a store offers pickup for our purposes.
///
/// Evaluated as `click_collect || (click_drive && address contains "RM")`:
/// any click-and-collect store qualifies, drive-through stores only in the
/// Rome area.
#[must_use]
pub fn is_pickup_shop(click_collect: bool, click_drive: bool, address: &str) -> bool {
    click_collect || (click_drive && address.contains(PICKUP_CITY_CODE))
}

/// Coerce a coordinate that may arrive as a JSON number or a numeric string.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] for anything else, including
/// blank strings, `null`, and non-finite spellings such as `"NaN"` or `"inf"`.
pub fn parse_coordinate(field: &str, value: &Value) -> Result<f64, ScraperError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).ok_or_else(|| ScraperError::InvalidNumber {
        field: field.to_owned(),
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

/// Keep the pickup stores and normalise them into shop records.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidNumber`] if a selected store carries a
/// non-numeric latitude or longitude. Stores that are filtered out are never
/// coerced.
pub fn select_pickup_shops(entries: &[LocatorEntry]) -> Result<Vec<ShopRecord>, ScraperError> {
    let mut shops = Vec::new();
    for LocatorEntry { store } in entries {
        let selected = is_pickup_shop(
            flag(&store.click_collect),
            flag(&store.click_drive),
            &store.address,
        );
        if !selected {
            continue;
        }

        shops.push(ShopRecord {
            name: store.name.clone(),
            street: store.address.clone(),
            lat: Some(parse_coordinate("lat", &store.lat)?),
            long: Some(parse_coordinate("lon", &store.lon)?),
            city: store.city.clone(),
            zip_code: None,
            working_hours: stringify_hours(&store.hours),
            picks_up_in_shop: true,
        });
    }
    Ok(shops)
}

/// Flags are `"true"`/`"false"` strings on the wire; a real boolean is
/// accepted too.
fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

fn stringify_hours(hours: &Value) -> String {
    match hours {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(value: Value) -> LocatorEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn predicate_keeps_drive_through_only_in_rome() {
        assert!(is_pickup_shop(false, true, "Via Roma 12, 00100 Roma RM"));
        assert!(!is_pickup_shop(false, true, "Via Milano 3"));
        assert!(is_pickup_shop(true, false, "Via Milano 3"));
        assert!(!is_pickup_shop(false, false, "Via Tuscolana RM"));
    }

    #[test]
    fn coordinate_accepts_numeric_strings_and_numbers() {
        assert!((parse_coordinate("lat", &json!("41.9")).unwrap() - 41.9).abs() < f64::EPSILON);
        assert!((parse_coordinate("lat", &json!(" 12.5 ")).unwrap() - 12.5).abs() < f64::EPSILON);
        assert!((parse_coordinate("lon", &json!(13.54)).unwrap() - 13.54).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinate_rejects_non_numeric_values() {
        let err = parse_coordinate("lat", &json!("n/a")).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidNumber { ref field, ref value } if field == "lat" && value == "n/a"),
            "got: {err:?}"
        );
        assert!(parse_coordinate("lon", &json!("")).is_err());
        assert!(parse_coordinate("lon", &Value::Null).is_err());
    }

    #[test]
    fn coordinate_rejects_non_finite_strings() {
        for raw in ["NaN", "inf", "-infinity", " +Infinity "] {
            let err = parse_coordinate("lat", &json!(raw)).unwrap_err();
            assert!(
                matches!(err, ScraperError::InvalidNumber { ref value, .. } if value == raw),
                "{raw:?} got: {err:?}"
            );
        }
    }

    #[test]
    fn selects_and_normalises_pickup_stores() {
        let entries = vec![
            entry(json!({"store": {
                "name": "Oasi Tigre Tuscolana",
                "address": "Via Tuscolana 100, Roma RM",
                "city": "Roma",
                "click_collect": "false",
                "click_drive": "true",
                "lat": "41.87",
                "lon": "12.53",
                "hours": "Lun-Dom 8:00-21:00"
            }})),
            entry(json!({"store": {
                "name": "Oasi Tigre Pescara",
                "address": "Viale Marconi 5, Pescara PE",
                "city": "Pescara",
                "click_collect": "false",
                "click_drive": "true",
                "lat": "not checked",
                "lon": "not checked"
            }})),
            entry(json!({"store": {
                "name": "Tigre Amico Teramo",
                "address": "Via Milano 3, Teramo TE",
                "city": "Teramo",
                "click_collect": true,
                "click_drive": "false",
                "lat": 42.66,
                "lon": 13.70,
                "hours": {"lun": "8-20"}
            }})),
        ];

        let shops = select_pickup_shops(&entries).unwrap();
        assert_eq!(shops.len(), 2);

        assert_eq!(shops[0].name, "Oasi Tigre Tuscolana");
        assert_eq!(shops[0].street, "Via Tuscolana 100, Roma RM");
        assert_eq!(shops[0].lat, Some(41.87));
        assert_eq!(shops[0].long, Some(12.53));
        assert_eq!(shops[0].city.as_deref(), Some("Roma"));
        assert_eq!(shops[0].working_hours, "Lun-Dom 8:00-21:00");
        assert!(shops[0].zip_code.is_none());
        assert!(shops[0].picks_up_in_shop);

        assert_eq!(shops[1].name, "Tigre Amico Teramo");
        assert_eq!(shops[1].working_hours, r#"{"lun":"8-20"}"#);
    }

    #[test]
    fn bad_coordinate_on_selected_store_fails_the_batch() {
        let entries = vec![entry(json!({"store": {
            "name": "Oasi Tigre Prati",
            "address": "Via Cola di Rienzo 1, Roma RM",
            "click_collect": "true",
            "lat": "41,90",
            "lon": "12.46"
        }}))];
        let err = select_pickup_shops(&entries).unwrap_err();
        assert!(matches!(err, ScraperError::InvalidNumber { .. }), "got: {err:?}");
    }

    #[test]
    fn missing_flags_mean_not_selected() {
        let entries = vec![entry(json!({"store": {
            "name": "x",
            "address": "Via Appia RM",
            "lat": "1",
            "lon": "2"
        }}))];
        assert!(select_pickup_shops(&entries).unwrap().is_empty());
    }
}
