// ── Sync orchestration ──
//
// Glue between the pure core and the provider API: fetch remote zones into
// the model, reconcile them against a desired layout, and write the delta
// back. Batch pushes report one outcome per domain; a failing domain never
// stops the rest.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use dnssync_api::NetcupClient;

use crate::config::SyncConfig;
use crate::convert::{record_batch, settings_to_update, zone_from_remote};
use crate::error::CoreError;
use crate::model::{Layout, Zone};
use crate::reconcile::{ZoneDelta, reconcile};

/// Provider status code for a domain the account does not manage.
const DOMAIN_NOT_FOUND: i64 = 5029;

fn for_domain(domain: &str, err: dnssync_api::Error) -> CoreError {
    match CoreError::from(err) {
        CoreError::Api {
            code: Some(DOMAIN_NOT_FOUND),
            ..
        } => CoreError::DomainNotFound {
            domain: domain.to_owned(),
        },
        other => other,
    }
}

/// Result of pushing one domain.
#[derive(Debug)]
pub struct DomainOutcome {
    pub domain: String,
    pub result: Result<ZoneDelta, CoreError>,
}

/// Session-scoped handle on the provider API. Cheap to clone.
#[derive(Clone)]
pub struct Syncer {
    inner: Arc<NetcupClient>,
}

impl Syncer {
    /// Build a client for `config`. Does not log in.
    pub fn new(config: &SyncConfig) -> Result<Self, CoreError> {
        let client = NetcupClient::new(
            config.endpoint.clone(),
            config.credentials.clone(),
            &config.transport(),
        )?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: NetcupClient) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    // ── Session lifecycle ────────────────────────────────────────

    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner.login().await?;
        info!(endpoint = %self.inner.endpoint(), "session opened");
        Ok(())
    }

    /// End the session. Failures are logged, never returned.
    pub async fn disconnect(&self) {
        if let Err(e) = self.inner.logout().await {
            warn!(error = %e, "logout failed");
        }
    }

    /// One-shot: log in, run `f`, log out.
    ///
    /// Logout runs whether or not `f` succeeded.
    pub async fn oneshot<F, Fut, T>(config: &SyncConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Syncer) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let syncer = Syncer::new(config)?;
        syncer.connect().await?;
        let result = f(syncer.clone()).await;
        syncer.disconnect().await;
        result
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Current remote state of one domain, record ids included.
    pub async fn fetch_zone(&self, domain: &str) -> Result<Zone, CoreError> {
        let data = self
            .inner
            .info_dns_zone(domain)
            .await
            .map_err(|e| for_domain(domain, e))?;
        let records = self
            .inner
            .info_dns_records(domain)
            .await
            .map_err(|e| for_domain(domain, e))?;
        debug!(domain, records = records.len(), "fetched zone");
        zone_from_remote(&data, &records)
    }

    /// Current remote state of several domains, in the order given.
    pub async fn fetch_layout<S: AsRef<str>>(&self, domains: &[S]) -> Result<Layout, CoreError> {
        let mut layout = Layout::new();
        for domain in domains {
            layout.insert(self.fetch_zone(domain.as_ref()).await?);
        }
        Ok(layout)
    }

    // ── Writes ───────────────────────────────────────────────────

    /// Reconcile one desired zone against the remote state.
    ///
    /// With `commit` unset this is a dry run: the delta is computed and
    /// returned but nothing is written.
    pub async fn push_zone(&self, desired: &Zone, commit: bool) -> Result<ZoneDelta, CoreError> {
        let current = self.fetch_zone(&desired.domain).await?;
        let delta = reconcile(&current, desired);
        debug!(
            domain = %delta.domain,
            settings_changed = delta.settings.is_some(),
            removed = delta.removed.len(),
            added = delta.added.len(),
            "computed delta"
        );
        if commit {
            self.apply_delta(&delta).await?;
        }
        Ok(delta)
    }

    /// Write `delta`: one zone update if settings changed, then one record
    /// batch with deletions ahead of additions. A no-op writes nothing.
    pub async fn apply_delta(&self, delta: &ZoneDelta) -> Result<(), CoreError> {
        if let Some(change) = &delta.settings {
            let update = settings_to_update(&delta.domain, &change.new);
            self.inner.update_dns_zone(&delta.domain, &update).await?;
        }
        let batch = record_batch(delta);
        if !batch.is_empty() {
            self.inner.update_dns_records(&delta.domain, &batch).await?;
        }
        Ok(())
    }

    /// Push every zone of `desired`, in layout order.
    pub async fn push_layout(&self, desired: &Layout, commit: bool) -> Vec<DomainOutcome> {
        let mut outcomes = Vec::with_capacity(desired.len());
        for zone in desired.zones() {
            let result = self.push_zone(zone, commit).await;
            match &result {
                Ok(delta) if delta.is_noop() => info!(domain = %zone.domain, "up to date"),
                Ok(delta) => info!(
                    domain = %zone.domain,
                    removed = delta.removed.len(),
                    added = delta.added.len(),
                    committed = commit,
                    "zone reconciled"
                ),
                Err(e) => warn!(domain = %zone.domain, error = %e, "zone push failed"),
            }
            outcomes.push(DomainOutcome {
                domain: zone.domain.clone(),
                result,
            });
        }
        outcomes
    }
}
