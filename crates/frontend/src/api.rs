use dronewatch_shared::error::DataFetchError;
use dronewatch_shared::models::{DataEnvelope, Record};

const DATA_PATH: &str = "/api/data";

fn api_url() -> String {
    // Served from the same origin as the page.
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    format!("{}{}", origin, DATA_PATH)
}

/// Parse the data endpoint body. `status` and `count` are informational;
/// `data` is the authoritative collection.
pub fn decode_envelope(body: &str) -> Result<Vec<Record>, DataFetchError> {
    serde_json::from_str::<DataEnvelope>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| DataFetchError::Decode(e.to_string()))
}

/// Fetch the record collection once.
pub async fn fetch_records() -> Result<Vec<Record>, DataFetchError> {
    let resp = reqwest::Client::new()
        .get(api_url())
        .send()
        .await
        .map_err(|e| DataFetchError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(DataFetchError::Status(status.as_u16()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| DataFetchError::Network(e.to_string()))?;
    decode_envelope(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_envelope_returns_data_in_order() {
        let json = r#"{"status":"success","count":2,"data":[
            {"jumlah_orang":4,"latitude":-6.317862,"longitude":106.918167,"timestamp":{"$date":"2025-04-08T08:54:38.190Z"}},
            {"jumlah_orang":3,"latitude":-6.574369,"longitude":106.688881,"timestamp":{"$date":"2025-05-01T06:46:08.277Z"}}
        ]}"#;
        let records = decode_envelope(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].person_count, 4);
        assert_eq!(records[1].person_count, 3);
    }

    #[test]
    fn test_decode_envelope_ignores_count_mismatch() {
        let json = r#"{"status":"success","count":9,"data":[]}"#;
        assert!(decode_envelope(json).unwrap().is_empty());
    }

    #[test]
    fn test_decode_envelope_with_data_only() {
        let json = r#"{"data":[
            {"jumlah_orang":2,"latitude":-6.560187,"longitude":106.733001,"timestamp":{"$date":"2025-05-05T08:45:35.000Z"}}
        ]}"#;
        let records = decode_envelope(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].person_count, 2);
        assert!(decode_envelope(r#"{"status":"success","data":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_envelope_without_data_is_decode_error() {
        let err = decode_envelope(r#"{"status":"error","message":"db down"}"#).unwrap_err();
        assert!(matches!(err, DataFetchError::Decode(_)));
    }

    #[test]
    fn test_decode_bundled_fixture_envelope() {
        let records: Vec<Record> =
            serde_json::from_str(include_str!("../../../assets/records.json")).unwrap();
        let body = serde_json::to_string(&DataEnvelope::success(records)).unwrap();
        assert_eq!(decode_envelope(&body).unwrap().len(), 5);
    }
}
