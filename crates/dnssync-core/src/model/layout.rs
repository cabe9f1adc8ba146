// ── Layout ──
//
// Ordered domain → zone map. Declaration order drives every rendering, so
// the backing store is an `IndexMap` and nothing here ever reorders it.

use indexmap::IndexMap;
use serde::Serialize;

use super::Zone;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    zones: IndexMap<String, Zone>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a zone. A replaced zone keeps its original position.
    pub fn insert(&mut self, zone: Zone) {
        self.zones.insert(zone.domain.clone(), zone);
    }

    pub fn get(&self, domain: &str) -> Option<&Zone> {
        self.zones.get(domain)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Keep only the listed domains, in their existing relative order.
    ///
    /// An empty filter keeps everything. Names that are not in the layout
    /// are ignored.
    #[must_use]
    pub fn filter_domains<S: AsRef<str>>(mut self, keep: &[S]) -> Self {
        if !keep.is_empty() {
            self.zones
                .retain(|domain, _| keep.iter().any(|k| k.as_ref() == domain));
        }
        self
    }

    /// Merge `other` into `self`; zones already present are replaced in place.
    pub fn extend(&mut self, other: Layout) {
        for zone in other.zones.into_values() {
            self.insert(zone);
        }
    }
}

impl FromIterator<Zone> for Layout {
    fn from_iter<I: IntoIterator<Item = Zone>>(iter: I) -> Self {
        let mut layout = Self::new();
        for zone in iter {
            layout.insert(zone);
        }
        layout
    }
}
