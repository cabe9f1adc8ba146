// Wire types for the CCP JSON endpoint
//
// Every call is a POST of `{ "action": ..., "param": {...} }` and every
// answer is wrapped in the `ResponseEnvelope`. The endpoint is sloppy about
// number encoding (most integers arrive as strings), so numeric fields go
// through `flexible_int`.

use serde::{Deserialize, Deserializer, Serialize};

// ── Request / response envelope ──────────────────────────────────────

/// Outgoing request body.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, P: Serialize> {
    pub action: &'a str,
    pub param: P,
}

/// Standard CCP response envelope.
///
/// ```json
/// { "status": "success", "statuscode": 2000, "longmessage": "...", "responsedata": {...} }
/// ```
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub status: String,
    #[serde(default)]
    pub statuscode: i64,
    #[serde(default)]
    pub shortmessage: Option<String>,
    #[serde(default)]
    pub longmessage: Option<String>,
    /// Either an object or an empty string, depending on the action.
    #[serde(default)]
    pub responsedata: serde_json::Value,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Best available human-readable message.
    pub fn message(&self) -> String {
        self.longmessage
            .clone()
            .or_else(|| self.shortmessage.clone())
            .unwrap_or_else(|| format!("status '{}'", self.status))
    }
}

/// `responsedata` of a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub apisessionid: String,
}

// ── DNS zone ─────────────────────────────────────────────────────────

/// Zone metadata as returned by `infoDnsZone` / `updateDnsZone`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsZoneData {
    pub name: String,
    #[serde(deserialize_with = "flexible_int")]
    pub ttl: u64,
    #[serde(default, deserialize_with = "flexible_opt_int")]
    pub serial: Option<u64>,
    #[serde(deserialize_with = "flexible_int")]
    pub refresh: u64,
    #[serde(deserialize_with = "flexible_int")]
    pub retry: u64,
    #[serde(deserialize_with = "flexible_int")]
    pub expire: u64,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub dnssecstatus: bool,
}

/// Zone metadata submitted to `updateDnsZone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsZoneUpdate {
    pub name: String,
    pub ttl: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub dnssecstatus: bool,
}

// ── DNS records ──────────────────────────────────────────────────────

/// `responsedata` of `infoDnsRecords`.
#[derive(Debug, Deserialize)]
pub struct DnsRecordSetData {
    #[serde(default)]
    pub dnsrecords: Vec<DnsRecordData>,
}

/// One record as returned by `infoDnsRecords`.
#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecordData {
    #[serde(deserialize_with = "flexible_string")]
    pub id: String,
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, deserialize_with = "flexible_opt_int")]
    pub priority: Option<u64>,
    pub destination: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub deleterecord: bool,
    #[serde(default)]
    pub state: Option<String>,
}

/// One record submitted to `updateDnsRecords`.
///
/// `id` is `None` for records that do not exist remotely yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecordUpdate {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub record_type: String,
    pub hostname: String,
    pub destination: String,
    pub deleterecord: bool,
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

/// The `dnsrecordset` parameter of `updateDnsRecords`.
#[derive(Debug, Serialize)]
pub struct DnsRecordSetUpdate<'a> {
    pub dnsrecords: &'a [DnsRecordUpdate],
}

// ── Lenient number decoding ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Str(String),
}

fn parse_int<E: serde::de::Error>(raw: IntOrString) -> Result<u64, E> {
    match raw {
        IntOrString::Int(v) => Ok(v),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("expected integer, got {s:?}"))),
    }
}

fn flexible_int<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    parse_int(IntOrString::deserialize(de)?)
}

fn flexible_opt_int<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    match Option::<IntOrString>::deserialize(de)? {
        None => Ok(None),
        Some(IntOrString::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(raw) => parse_int(raw).map(Some),
    }
}

fn flexible_string<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match IntOrString::deserialize(de)? {
        IntOrString::Int(v) => v.to_string(),
        IntOrString::Str(s) => s,
    })
}

fn flexible_bool<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match BoolOrString::deserialize(de)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            _ => Err(serde::de::Error::custom(format!("expected boolean, got {s:?}"))),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zone_data_accepts_string_numbers() {
        let zone: DnsZoneData = serde_json::from_value(json!({
            "name": "example.com",
            "ttl": "86400",
            "serial": "2024010101",
            "refresh": 28800,
            "retry": "7200",
            "expire": "1209600",
            "dnssecstatus": false
        }))
        .unwrap();
        assert_eq!(zone.ttl, 86400);
        assert_eq!(zone.serial, Some(2_024_010_101));
        assert_eq!(zone.refresh, 28800);
        assert!(!zone.dnssecstatus);
    }

    #[test]
    fn record_data_accepts_numeric_id_and_empty_priority() {
        let record: DnsRecordData = serde_json::from_value(json!({
            "id": 4711,
            "hostname": "www",
            "type": "A",
            "priority": "",
            "destination": "192.0.2.1",
            "deleterecord": false,
            "state": "yes"
        }))
        .unwrap();
        assert_eq!(record.id, "4711");
        assert_eq!(record.priority, None);
        assert_eq!(record.record_type, "A");
    }

    #[test]
    fn record_update_omits_absent_priority() {
        let update = DnsRecordUpdate {
            id: None,
            record_type: "A".into(),
            hostname: "www".into(),
            destination: "192.0.2.1".into(),
            deleterecord: false,
            state: None,
            priority: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("priority").is_none());
        assert_eq!(value["id"], serde_json::Value::Null);
        assert_eq!(value["type"], "A");
    }

    #[test]
    fn bad_integer_string_is_rejected() {
        let result: Result<DnsZoneData, _> = serde_json::from_value(json!({
            "name": "example.com",
            "ttl": "soon",
            "refresh": 1,
            "retry": 1,
            "expire": 1
        }));
        assert!(result.is_err());
    }
}
