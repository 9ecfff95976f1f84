//! Turn the model's raw reply into an [`AnalysisResult`].
//!
//! Shaping never fails. Unparseable replies become a description-only
//! result, and within a parsed object every field is read on its own so a
//! bad `departure_info` does not cost us the crowd estimate.

use cd_core::{AnalysisResult, FlightInfo};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub mod extract;

pub use extract::extract_first_object;

const DEPARTURE_TYPES: &[&str] = &["flight", "train", "bus", "subway", "ferry", "none"];

const IDENTIFIER_KEYS: &[&str] = &["flight_number", "flight", "train_number", "route_number"];
const GATE_KEYS: &[&str] = &["gate", "platform"];
const TIME_KEYS: &[&str] = &["departure_time", "time"];
const STATUS_KEYS: &[&str] = &["status"];
const DESTINATION_KEYS: &[&str] = &["destination"];
const DESCRIPTION_KEYS: &[&str] = &["general_description", "description", "scene_description", "rationale"];

pub fn shape(raw: &str) -> AnalysisResult {
    let fields = match extract_first_object(raw) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Falling back to raw model text: {}", e);
            return AnalysisResult::description_only(raw.trim());
        }
    };

    let screen_detected = bool_field(&fields, "screen_detected");
    let departures = if screen_detected == Some(false) {
        Vec::new()
    } else {
        read_departures(&fields)
    };

    let people_count = count_field(&fields, "people_count");
    let result = AnalysisResult {
        crowd_level: crowd_level(&fields, people_count),
        flight_info: departures.first().cloned(),
        general_description: string_field(&fields, DESCRIPTION_KEYS)
            .unwrap_or_else(|| raw.trim().to_string()),
        people_count,
        crowd_score: number_field(&fields, "crowd_score").map(|s| s.round().clamp(1.0, 10.0) as u8),
        confidence: number_field(&fields, "confidence").map(|c| c.clamp(0.0, 100.0)),
        departure_type: departure_type(&fields, screen_detected),
        departures,
    };
    debug!(
        "Shaped reply: crowd_level={:?} flight_info={}",
        result.crowd_level,
        result.flight_info.is_some()
    );
    result
}

fn crowd_level(fields: &Map<String, Value>, people_count: Option<u64>) -> Option<String> {
    if let Some(level) = string_field(fields, &["crowd_level"]) {
        return Some(level);
    }
    match (string_field(fields, &["crowd_label"]), people_count) {
        (Some(label), Some(count)) => Some(format!("{} (~{} people)", label, count)),
        (Some(label), None) => Some(label),
        (None, Some(count)) => Some(format!("~{} people", count)),
        (None, None) => None,
    }
}

fn departure_type(fields: &Map<String, Value>, screen_detected: Option<bool>) -> Option<String> {
    match fields.get("departure_type").and_then(Value::as_str) {
        Some(kind) => {
            let kind = kind.trim().to_ascii_lowercase();
            if DEPARTURE_TYPES.contains(&kind.as_str()) {
                Some(kind)
            } else {
                Some("none".to_string())
            }
        }
        None if screen_detected == Some(true) => None,
        None => Some("none".to_string()),
    }
}

fn read_departures(fields: &Map<String, Value>) -> Vec<FlightInfo> {
    let mut entries: Vec<&Map<String, Value>> = Vec::new();
    if let Some(Value::Array(rows)) = fields.get("departure_info") {
        entries.extend(rows.iter().filter_map(Value::as_object));
    }
    if let Some(Value::Object(single)) = fields.get("flight_info") {
        entries.push(single);
    }

    entries
        .into_iter()
        .map(|entry| FlightInfo {
            flight: string_field(entry, IDENTIFIER_KEYS),
            gate: string_field(entry, GATE_KEYS),
            time: string_field(entry, TIME_KEYS),
            status: string_field(entry, STATUS_KEYS),
            destination: string_field(entry, DESTINATION_KEYS),
        })
        .filter(|info| !info.is_empty())
        .collect()
}

/// First non-empty value among `keys`, rendering numbers as text.
fn string_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match fields.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|n| n.is_finite())
}

fn count_field(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    number_field(fields, key)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u64)
}

fn bool_field(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERMINAL_REPLY: &str = r#"```json
{
  "people_count": 35,
  "crowd_score": 8,
  "crowd_label": "High",
  "confidence": 72.5,
  "rationale": "Dense queue in front of the board.",
  "screen_detected": true,
  "departure_type": "flight",
  "departure_info": [
    {"flight_number": "EK 701", "destination": "Dubai", "departure_time": "09:45", "status": "Boarding", "gate": "A12"},
    {"flight_number": "LH 401", "departure_time": "10:10", "status": "On Time"}
  ],
  "general_description": "A busy departure hall with travellers queueing below a departure board."
}
```"#;

    #[test]
    fn test_structured_reply() {
        let result = shape(TERMINAL_REPLY);
        let crowd = result.crowd_level.as_deref().unwrap();
        assert!(crowd.contains("35"));
        assert!(crowd.contains("High"));

        let flight = result.flight_info.as_ref().unwrap();
        assert_eq!(flight.flight.as_deref(), Some("EK 701"));
        assert_eq!(flight.gate.as_deref(), Some("A12"));
        assert_eq!(flight.time.as_deref(), Some("09:45"));
        assert_eq!(flight.status.as_deref(), Some("Boarding"));
        assert_eq!(flight.destination.as_deref(), Some("Dubai"));

        assert_eq!(result.departures.len(), 2);
        assert_eq!(result.people_count, Some(35));
        assert_eq!(result.crowd_score, Some(8));
        assert_eq!(result.confidence, Some(72.5));
        assert_eq!(result.departure_type.as_deref(), Some("flight"));
        assert!(result.general_description.starts_with("A busy departure hall"));
    }

    #[test]
    fn test_prose_reply_falls_back() {
        let prose = "  A quiet corridor with a cleaner and two passengers.  ";
        let result = shape(prose);
        assert_eq!(result.crowd_level, None);
        assert_eq!(result.flight_info, None);
        assert_eq!(result.general_description, prose.trim());
        assert!(result.departures.is_empty());
        assert_eq!(result.departure_type, None);
    }

    #[test]
    fn test_malformed_departures_keep_crowd_fields() {
        let reply = r#"{"crowd_label": "Medium", "people_count": "12", "departure_info": "unreadable", "rationale": "Moderate foot traffic."}"#;
        let result = shape(reply);
        assert_eq!(result.crowd_level.as_deref(), Some("Medium (~12 people)"));
        assert_eq!(result.flight_info, None);
        assert_eq!(result.general_description, "Moderate foot traffic.");
        assert_eq!(result.departure_type.as_deref(), Some("none"));
    }

    #[test]
    fn test_screen_not_detected_drops_rows() {
        let reply = r#"{"screen_detected": false, "departure_info": [{"flight_number": "XX 1"}], "people_count": 0}"#;
        let result = shape(reply);
        assert_eq!(result.flight_info, None);
        assert!(result.departures.is_empty());
        assert_eq!(result.crowd_level.as_deref(), Some("~0 people"));
    }

    #[test]
    fn test_numeric_and_alternate_keys() {
        let reply = r#"{"departure_info": [{}, {"train_number": 4521, "platform": 7, "time": "18:02"}], "departure_type": "Train"}"#;
        let result = shape(reply);
        let info = result.flight_info.unwrap();
        assert_eq!(info.flight.as_deref(), Some("4521"));
        assert_eq!(info.gate.as_deref(), Some("7"));
        assert_eq!(info.time.as_deref(), Some("18:02"));
        assert_eq!(info.status, None);
        assert_eq!(result.departure_type.as_deref(), Some("train"));
        assert_eq!(result.departures.len(), 1);
    }

    #[test]
    fn test_scores_are_clamped() {
        let reply = r#"{"crowd_score": 14, "confidence": 180, "departure_type": "rocket"}"#;
        let result = shape(reply);
        assert_eq!(result.crowd_score, Some(10));
        assert_eq!(result.confidence, Some(100.0));
        assert_eq!(result.departure_type.as_deref(), Some("none"));
    }

    #[test]
    fn test_explicit_crowd_level_and_flight_info_object() {
        let reply = r#"{"crowd_level": "about 40, crowded", "flight_info": {"flight": "BA 117", "gate": "C4"}}"#;
        let result = shape(reply);
        assert_eq!(result.crowd_level.as_deref(), Some("about 40, crowded"));
        let info = result.flight_info.unwrap();
        assert_eq!(info.flight.as_deref(), Some("BA 117"));
        assert_eq!(info.gate.as_deref(), Some("C4"));
        // no description key: the raw reply is kept
        assert_eq!(result.general_description, reply);
    }
}
