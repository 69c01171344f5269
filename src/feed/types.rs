use serde::Deserialize;

use crate::error::AppError;

/// Deserialize a JSON number or a numeric string to f64.
pub fn string_or_number_to_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    match v {
        serde_json::Value::String(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("invalid number")),
        _ => Err(serde::de::Error::custom("invalid numeric value")),
    }
}

/// One OHLCV row from the market-data endpoint. Extra upstream fields
/// (openTime, high, low, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub symbol: String,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub open: f64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub close: f64,
    #[serde(deserialize_with = "string_or_number_to_f64")]
    pub volume: f64,
}

/// Shape of a successfully parsed response body.
#[derive(Debug, Clone)]
pub enum Payload {
    Records(Vec<RawRecord>),
    /// A JSON array with no elements.
    Empty,
    /// Valid JSON that is not an array.
    Invalid,
}

/// Classifies a response body. Malformed JSON, or an array containing a
/// record that cannot be decoded, is a parse error; a non-array or empty
/// array is reported through [`Payload`] instead.
pub fn decode_payload(body: &str) -> Result<Payload, AppError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value {
        serde_json::Value::Array(items) if items.is_empty() => Ok(Payload::Empty),
        serde_json::Value::Array(items) => {
            let records = items
                .into_iter()
                .map(serde_json::from_value::<RawRecord>)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Payload::Records(records))
        }
        _ => Ok(Payload::Invalid),
    }
}
