use serde::{Deserialize, Serialize};

/// True when `mime_type` names an `image/*` type, ignoring case and padding.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// One uploaded image, alive for the duration of a single analysis.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl AnalysisRequest {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fields read off a departure board. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl FlightInfo {
    /// True when none of the display fields were read.
    pub fn is_empty(&self) -> bool {
        self.flight.is_none() && self.gate.is_none() && self.time.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_level: Option<String>,
    /// Serialized as `null` when no display was detected.
    #[serde(default)]
    pub flight_info: Option<FlightInfo>,
    pub general_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departures: Vec<FlightInfo>,
}

impl AnalysisResult {
    /// Result carrying only a free-text description.
    pub fn description_only(text: impl Into<String>) -> Self {
        Self {
            general_description: text.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_image_mime_detection() {
        assert!(AnalysisRequest::new(vec![1], "image/jpeg").is_image());
        assert!(AnalysisRequest::new(vec![1], "IMAGE/PNG").is_image());
        assert!(!AnalysisRequest::new(vec![1], "text/plain").is_image());
        assert!(!AnalysisRequest::new(vec![1], "application/octet-stream").is_image());
        assert!(!AnalysisRequest::new(vec![1], "").is_image());
        assert!(is_image_mime(" image/tiff "));
        assert!(!is_image_mime("imagery/png"));
    }

    #[test]
    fn test_description_only_serializes_null_flight_info() {
        let result = AnalysisResult::description_only("An empty hall.");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({ "flightInfo": null, "generalDescription": "An empty hall." })
        );
    }

    #[test]
    fn test_full_result_uses_camel_case() {
        let result = AnalysisResult {
            crowd_level: Some("High (~35 people)".to_string()),
            flight_info: Some(FlightInfo {
                flight: Some("EK 701".to_string()),
                gate: Some("A12".to_string()),
                ..Default::default()
            }),
            general_description: "Busy terminal".to_string(),
            people_count: Some(35),
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["crowdLevel"], "High (~35 people)");
        assert_eq!(value["flightInfo"]["flight"], "EK 701");
        assert_eq!(value["flightInfo"]["gate"], "A12");
        assert!(value["flightInfo"].get("time").is_none());
        assert_eq!(value["peopleCount"], 35);
        assert!(value.get("departures").is_none());
    }
}
