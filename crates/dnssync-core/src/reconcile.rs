// ── Reconciliation ──
//
// Pure diff between the zone the provider currently holds and the zone the
// layout declares. Record identity is content only, so ids on the current
// side never cause churn.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Record, Zone, ZoneSettings};

/// Old and new zone settings, present only when they differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsChange {
    pub old: ZoneSettings,
    pub new: ZoneSettings,
}

/// Everything that has to change to turn the current zone into the desired one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneDelta {
    pub domain: String,
    pub settings: Option<SettingsChange>,
    /// Current records with no desired counterpart, in record order.
    /// They keep the ids they were fetched with.
    pub removed: Vec<Record>,
    /// Desired records with no current counterpart, in declaration order.
    pub added: Vec<Record>,
}

impl ZoneDelta {
    /// Nothing to write for this domain.
    pub fn is_noop(&self) -> bool {
        self.settings.is_none() && self.removed.is_empty() && self.added.is_empty()
    }
}

/// Compute the delta from `current` to `desired`.
///
/// A current record matched by a desired one is consumed once; repeated
/// desired records are neither re-matched nor added twice.
pub fn reconcile(current: &Zone, desired: &Zone) -> ZoneDelta {
    let settings = (current.settings != desired.settings).then_some(SettingsChange {
        old: current.settings,
        new: desired.settings,
    });

    // Duplicates collapse onto their first occurrence and its id.
    let mut remaining: HashSet<&Record> = current.entries.iter().collect();

    let mut seen: HashSet<&Record> = HashSet::new();
    let mut added = Vec::new();
    for record in &desired.entries {
        if !seen.insert(record) {
            continue;
        }
        if !remaining.remove(record) {
            added.push(record.clone());
        }
    }

    let mut removed: Vec<Record> = remaining.into_iter().cloned().collect();
    removed.sort();

    ZoneDelta {
        domain: desired.domain.clone(),
        settings,
        removed,
        added,
    }
}
