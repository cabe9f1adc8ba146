// ── Wire-to-model conversions ──
//
// Bridges `dnssync_api` payloads and the core model. Inbound data goes
// through the same validation as parsed layout text; a remote record the
// model cannot represent fails the whole zone instead of being dropped.

use dnssync_api::models::{DnsRecordData, DnsRecordUpdate, DnsZoneData, DnsZoneUpdate};

use crate::error::CoreError;
use crate::model::{Record, RecordType, Zone, ZoneSettings};
use crate::reconcile::ZoneDelta;

// ── Inbound ─────────────────────────────────────────────────────────

/// Build a `Zone` from `infoDnsZone` + `infoDnsRecords` results.
///
/// Records the provider has already marked for deletion are skipped. The
/// provider reports a placeholder priority on every record; it is kept for
/// MX only (missing means 0).
pub fn zone_from_remote(data: &DnsZoneData, records: &[DnsRecordData]) -> Result<Zone, CoreError> {
    let domain = data.name.as_str();
    let settings = ZoneSettings {
        ttl: positive(domain, "ttl", data.ttl)?,
        refresh: positive(domain, "refresh", data.refresh)?,
        retry: positive(domain, "retry", data.retry)?,
        expire: positive(domain, "expire", data.expire)?,
        dnssec: data.dnssecstatus,
    };

    let mut zone = Zone::new(domain, settings);
    zone.serial = data.serial;
    zone.entries = records
        .iter()
        .filter(|r| !r.deleterecord)
        .map(|r| record_from_remote(domain, r))
        .collect::<Result<_, _>>()?;
    Ok(zone)
}

fn positive(domain: &str, field: &str, value: u64) -> Result<u32, CoreError> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| CoreError::Conversion {
            domain: domain.to_owned(),
            message: format!("zone {field} {value} is not a positive 32-bit integer"),
        })
}

fn record_from_remote(domain: &str, data: &DnsRecordData) -> Result<Record, CoreError> {
    let conversion = |message: String| CoreError::Conversion {
        domain: domain.to_owned(),
        message: format!("record {} ({}): {message}", data.id, data.hostname),
    };

    let record_type = RecordType::parse(&data.record_type).map_err(|e| conversion(e.to_string()))?;
    let priority = if record_type == RecordType::Mx {
        let raw = data.priority.unwrap_or(0);
        Some(u16::try_from(raw).map_err(|_| conversion(format!("priority {raw} out of range")))?)
    } else {
        None
    };

    Record::new(record_type, &data.hostname, &data.destination, priority)
        .map(|r| r.with_id(data.id.as_str()))
        .map_err(|e| conversion(e.to_string()))
}

// ── Outbound ────────────────────────────────────────────────────────

/// Wire form of `record`, flagged for deletion when `delete` is set.
///
/// Deleting needs the provider id; a record without one yields `None`.
pub fn record_to_update(record: &Record, delete: bool) -> Option<DnsRecordUpdate> {
    let id = record.id().map(|id| id.as_str().to_owned());
    if delete && id.is_none() {
        return None;
    }
    Some(DnsRecordUpdate {
        id,
        record_type: record.record_type().to_string(),
        hostname: record.hostname().to_owned(),
        destination: record.destination().to_owned(),
        deleterecord: delete,
        state: None,
        priority: record.priority(),
    })
}

pub fn settings_to_update(domain: &str, settings: &ZoneSettings) -> DnsZoneUpdate {
    DnsZoneUpdate {
        name: domain.to_owned(),
        ttl: settings.ttl,
        refresh: settings.refresh,
        retry: settings.retry,
        expire: settings.expire,
        dnssecstatus: settings.dnssec,
    }
}

/// The single `updateDnsRecords` batch for `delta`: deletions first, then additions.
pub fn record_batch(delta: &ZoneDelta) -> Vec<DnsRecordUpdate> {
    delta
        .removed
        .iter()
        .filter_map(|r| record_to_update(r, true))
        .chain(delta.added.iter().filter_map(|r| record_to_update(r, false)))
        .collect()
}
