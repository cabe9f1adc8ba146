// DNS zone and record actions
//
// `infoDnsZone` / `updateDnsZone` handle zone metadata, `infoDnsRecords` /
// `updateDnsRecords` the record set. Record updates are batched: one call
// carries all deletions and additions for a domain.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::NetcupClient;
use crate::error::Error;
use crate::models::{
    DnsRecordData, DnsRecordSetData, DnsRecordSetUpdate, DnsRecordUpdate, DnsZoneData,
    DnsZoneUpdate,
};

fn domain_param(domain: &str) -> Map<String, Value> {
    let mut param = Map::new();
    param.insert("domainname".into(), Value::String(domain.to_owned()));
    param
}

impl NetcupClient {
    /// Fetch zone metadata.
    ///
    /// `infoDnsZone` with `{"domainname": "..."}`
    pub async fn info_dns_zone(&self, domain: &str) -> Result<DnsZoneData, Error> {
        debug!(domain, "fetching DNS zone");
        self.session_action("infoDnsZone", domain_param(domain)).await
    }

    /// Fetch all records of a zone.
    ///
    /// `infoDnsRecords` with `{"domainname": "..."}`
    pub async fn info_dns_records(&self, domain: &str) -> Result<Vec<DnsRecordData>, Error> {
        debug!(domain, "fetching DNS records");
        let data: DnsRecordSetData = self
            .session_action("infoDnsRecords", domain_param(domain))
            .await?;
        Ok(data.dnsrecords)
    }

    /// Replace zone metadata, returning the zone as stored remotely.
    ///
    /// `updateDnsZone` with `{"domainname": "...", "dnszone": {...}}`
    pub async fn update_dns_zone(
        &self,
        domain: &str,
        zone: &DnsZoneUpdate,
    ) -> Result<DnsZoneData, Error> {
        debug!(domain, ttl = zone.ttl, "updating DNS zone");
        let mut param = domain_param(domain);
        param.insert("dnszone".into(), json!(zone));
        self.session_action("updateDnsZone", param).await
    }

    /// Submit one batch of record deletions and additions.
    ///
    /// `updateDnsRecords` with `{"domainname": "...", "dnsrecordset": {"dnsrecords": [...]}}`
    pub async fn update_dns_records(
        &self,
        domain: &str,
        records: &[DnsRecordUpdate],
    ) -> Result<Vec<DnsRecordData>, Error> {
        debug!(domain, count = records.len(), "updating DNS records");
        let mut param = domain_param(domain);
        param.insert(
            "dnsrecordset".into(),
            json!(DnsRecordSetUpdate {
                dnsrecords: records
            }),
        );
        let data: DnsRecordSetData = self.session_action("updateDnsRecords", param).await?;
        Ok(data.dnsrecords)
    }
}
