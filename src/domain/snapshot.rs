// Telemetry snapshot - one parsed webhook payload, timestamped at receipt
use crate::domain::poll_error::PollError;
use crate::domain::telemetry_domain::TelemetryDomain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub domain: TelemetryDomain,
    pub captured_at: DateTime<Utc>,
    fields: BTreeMap<String, FieldValue>,
}

impl TelemetrySnapshot {
    pub fn new(
        domain: TelemetryDomain,
        captured_at: DateTime<Utc>,
        fields: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            domain,
            captured_at,
            fields,
        }
    }

    /// Validate a webhook payload for `domain` and flatten the reading into a snapshot.
    ///
    /// `captured_at` is the local receipt time; timestamps inside the payload are kept
    /// as plain fields and never used for ordering.
    pub fn from_payload(
        domain: TelemetryDomain,
        payload: &Value,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, PollError> {
        let reading = select_reading(domain, payload)?;
        let mut fields = flatten(reading);

        match domain {
            TelemetryDomain::Gateway => {
                require_numbers(&fields, &["g_uptime_sec", "g_cpu_freq", "g_ram_used"])?
            }
            TelemetryDomain::Transceiver => {
                require_numbers(&fields, &["cpu_freq", "ram_used", "uptime_sec"])?
            }
            TelemetryDomain::Gps => {
                for axis in ["latitude", "longitude"] {
                    let coordinate = coerce_coordinate(&fields, axis)?;
                    fields.insert(axis.to_string(), FieldValue::Number(coordinate));
                }
            }
            TelemetryDomain::Sensors => {}
        }

        Ok(Self::new(domain, captured_at, fields))
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }

    pub fn time_ms(&self) -> i64 {
        self.captured_at.timestamp_millis()
    }
}

fn select_reading(domain: TelemetryDomain, payload: &Value) -> Result<&Map<String, Value>, PollError> {
    match domain {
        TelemetryDomain::Gateway => nested_object(payload, "gateway"),
        TelemetryDomain::Transceiver => nested_object(payload, "system"),
        TelemetryDomain::Gps => payload
            .as_object()
            .ok_or_else(|| PollError::invalid("<root>", "expected a JSON object")),
        // Sensors may answer with the whole reading log; the newest entry is last.
        TelemetryDomain::Sensors => match payload {
            Value::Array(readings) => readings
                .last()
                .ok_or(PollError::EmptyPayload)?
                .as_object()
                .ok_or_else(|| PollError::invalid("<reading>", "expected a JSON object")),
            Value::Object(reading) => Ok(reading),
            _ => Err(PollError::invalid("<root>", "expected an object or an array")),
        },
    }
}

fn nested_object<'a>(payload: &'a Value, key: &str) -> Result<&'a Map<String, Value>, PollError> {
    match payload.get(key) {
        Some(Value::Object(inner)) => Ok(inner),
        Some(_) => Err(PollError::invalid(key, "expected a JSON object")),
        None => Err(PollError::MissingField(key.to_string())),
    }
}

fn flatten(reading: &Map<String, Value>) -> BTreeMap<String, FieldValue> {
    reading
        .iter()
        .filter_map(|(name, value)| {
            let field = match value {
                Value::Number(n) => FieldValue::Number(n.as_f64()?),
                Value::String(s) => FieldValue::Text(s.clone()),
                _ => return None,
            };
            Some((name.clone(), field))
        })
        .collect()
}

fn require_numbers(fields: &BTreeMap<String, FieldValue>, names: &[&str]) -> Result<(), PollError> {
    for name in names {
        match fields.get(*name) {
            Some(FieldValue::Number(n)) if n.is_finite() => {}
            Some(_) => return Err(PollError::invalid(name, "expected a number")),
            None => return Err(PollError::MissingField(name.to_string())),
        }
    }
    Ok(())
}

fn coerce_coordinate(fields: &BTreeMap<String, FieldValue>, axis: &str) -> Result<f64, PollError> {
    let value = match fields.get(axis) {
        Some(FieldValue::Number(n)) => *n,
        Some(FieldValue::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| PollError::invalid(axis, format!("`{}` is not a coordinate", s)))?,
        None => return Err(PollError::MissingField(axis.to_string())),
    };

    if !value.is_finite() {
        return Err(PollError::invalid(axis, "coordinate is not finite"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn receipt_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_gateway_payload_is_flattened() {
        let payload = json!({
            "gateway": {
                "g_uptime_sec": 3661,
                "g_cpu_freq": 240,
                "g_ram_used": 150000,
                "firmware": "1.2.0",
                "nested": { "ignored": true }
            }
        });

        let snapshot =
            TelemetrySnapshot::from_payload(TelemetryDomain::Gateway, &payload, receipt_time())
                .unwrap();

        assert_eq!(snapshot.number("g_cpu_freq"), Some(240.0));
        assert_eq!(snapshot.text("firmware"), Some("1.2.0"));
        assert!(!snapshot.fields().contains_key("nested"));
        assert_eq!(snapshot.captured_at, receipt_time());
    }

    #[test]
    fn test_gateway_missing_field_is_rejected() {
        let payload = json!({ "gateway": { "g_uptime_sec": 10, "g_cpu_freq": 240 } });
        let err = TelemetrySnapshot::from_payload(TelemetryDomain::Gateway, &payload, receipt_time())
            .unwrap_err();
        assert_eq!(err, PollError::MissingField("g_ram_used".to_string()));

        let err = TelemetrySnapshot::from_payload(TelemetryDomain::Gateway, &json!({}), receipt_time())
            .unwrap_err();
        assert_eq!(err, PollError::MissingField("gateway".to_string()));
    }

    #[test]
    fn test_transceiver_rejects_textual_metrics() {
        let payload = json!({ "system": { "cpu_freq": "fast", "ram_used": 1, "uptime_sec": 1 } });
        let err =
            TelemetrySnapshot::from_payload(TelemetryDomain::Transceiver, &payload, receipt_time())
                .unwrap_err();
        assert!(matches!(err, PollError::InvalidField { ref field, .. } if field == "cpu_freq"));
    }

    #[test]
    fn test_gps_accepts_numeric_strings() {
        let payload = json!({ "latitude": "-8.178842", "longitude": 113.72617 });
        let snapshot =
            TelemetrySnapshot::from_payload(TelemetryDomain::Gps, &payload, receipt_time()).unwrap();
        assert_eq!(snapshot.number("latitude"), Some(-8.178842));
        assert_eq!(snapshot.number("longitude"), Some(113.72617));
    }

    #[test]
    fn test_gps_rejects_garbage_coordinates() {
        let payload = json!({ "latitude": "north", "longitude": 113.7 });
        assert!(TelemetrySnapshot::from_payload(TelemetryDomain::Gps, &payload, receipt_time()).is_err());

        let payload = json!({ "latitude": -8.1 });
        let err = TelemetrySnapshot::from_payload(TelemetryDomain::Gps, &payload, receipt_time())
            .unwrap_err();
        assert_eq!(err, PollError::MissingField("longitude".to_string()));
    }

    #[test]
    fn test_sensors_take_latest_reading_from_array() {
        let payload = json!([
            { "temp": 25.0, "hum": 60.0 },
            { "temp": 27.5, "hum": 58.0, "rtc_time": "08:30:00" }
        ]);
        let snapshot =
            TelemetrySnapshot::from_payload(TelemetryDomain::Sensors, &payload, receipt_time())
                .unwrap();
        assert_eq!(snapshot.number("temp"), Some(27.5));
        assert_eq!(snapshot.text("rtc_time"), Some("08:30:00"));
    }

    #[test]
    fn test_sensors_single_object_and_empty_array() {
        let snapshot = TelemetrySnapshot::from_payload(
            TelemetryDomain::Sensors,
            &json!({ "lux": 640.2 }),
            receipt_time(),
        )
        .unwrap();
        assert_eq!(snapshot.number("lux"), Some(640.2));

        let err = TelemetrySnapshot::from_payload(TelemetryDomain::Sensors, &json!([]), receipt_time())
            .unwrap_err();
        assert_eq!(err, PollError::EmptyPayload);
    }
}
