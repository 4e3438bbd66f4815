use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed reference point shown on the map (the drone launch site).
pub const BASE_LOCATION: LatLng = LatLng {
    latitude: -6.57,
    longitude: 106.691,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLng {
            latitude,
            longitude,
        }
    }
}

/// One detected-location entry.
///
/// Records carry no identifier; their position in the collection is the
/// address used throughout the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "jumlah_orang")]
    pub person_count: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "timestamp", with = "extended_date")]
    pub detected_at: DateTime<Utc>,
}

impl Record {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Envelope returned by the data endpoint. Only `data` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope {
    #[serde(default)]
    pub status: String,
    pub data: Vec<Record>,
    #[serde(default)]
    pub count: usize,
}

impl DataEnvelope {
    pub fn success(data: Vec<Record>) -> Self {
        let count = data.len();
        DataEnvelope {
            status: "success".to_string(),
            data,
            count,
        }
    }
}

/// Timestamps travel as `{"$date": "<rfc3339>"}`, the extended-JSON shape the
/// upstream detector store emits.
mod extended_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Wrapped {
        #[serde(rename = "$date")]
        date: DateTime<Utc>,
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        Wrapped { date: *date }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        Wrapped::deserialize(deserializer).map(|w| w.date)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// The five records served by the mock endpoint.
    pub fn records() -> Vec<Record> {
        let at = |y, mo, d, h, mi, s| Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
        vec![
            Record { person_count: 4, latitude: -6.317862, longitude: 106.918167, detected_at: at(2025, 4, 8, 8, 54, 38) },
            Record { person_count: 3, latitude: -6.574369, longitude: 106.688881, detected_at: at(2025, 5, 1, 6, 46, 8) },
            Record { person_count: 3, latitude: -6.574385, longitude: 106.758805, detected_at: at(2025, 5, 1, 6, 47, 58) },
            Record { person_count: 3, latitude: -6.574389, longitude: 106.698805, detected_at: at(2025, 5, 5, 8, 45, 0) },
            Record { person_count: 5, latitude: -6.574391, longitude: 106.708807, detected_at: at(2025, 5, 5, 8, 45, 35) },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_wire_shape() {
        let json = r#"{"jumlah_orang":4,"latitude":-6.317862,"longitude":106.918167,"timestamp":{"$date":"2025-04-08T08:54:38.190Z"}}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.person_count, 4);
        assert!((record.latitude + 6.317862).abs() < 1e-9);
        assert_eq!(record.detected_at.to_rfc3339(), "2025-04-08T08:54:38.190+00:00");
    }

    #[test]
    fn test_record_serializes_extended_date() {
        let record = fixtures::records().remove(0);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["jumlah_orang"], 4);
        assert!(value["timestamp"]["$date"].as_str().unwrap().starts_with("2025-04-08T08:54:38"));
        assert!(value.get("person_count").is_none());
    }

    #[test]
    fn test_envelope_counts_records() {
        let envelope = DataEnvelope::success(fixtures::records());
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.count, 5);
    }

    #[test]
    fn test_envelope_rejects_negative_person_count() {
        let json = r#"{"status":"success","count":1,"data":[{"jumlah_orang":-1,"latitude":0.0,"longitude":0.0,"timestamp":{"$date":"2025-05-05T08:45:00Z"}}]}"#;
        assert!(serde_json::from_str::<DataEnvelope>(json).is_err());
    }

    #[test]
    fn test_envelope_status_and_count_are_optional() {
        let envelope: DataEnvelope = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(envelope.data.is_empty());
        assert_eq!(envelope.status, "");
        assert_eq!(envelope.count, 0);
    }
}
