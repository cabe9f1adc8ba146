//! Zone model, layout DSL and reconciliation engine for `dnssync`.
//!
//! This crate owns the domain logic of the workspace:
//!
//! - **Domain model** ([`model`]) - [`Record`] (content equality that ignores
//!   the provider-assigned [`RecordId`]), [`Zone`] with its [`ZoneSettings`],
//!   and the declaration-ordered [`Layout`].
//!
//! - **[`parser`]** - turns rendered layout text into a [`Layout`], tracking
//!   defaults, per-zone overrides and meta directives line by line.
//!
//! - **[`meta`]** - applies meta directives (e.g. `remove-record`) to the
//!   records declared before them.
//!
//! - **[`reconcile`]** - computes the [`ZoneDelta`] (settings change, removed
//!   and added records) that turns a current zone into a desired one.
//!
//! - **[`printer`]** - renders a [`Layout`] back into canonical layout text.
//!
//! - **[`Syncer`]** - async facade over `dnssync-api` that fetches remote
//!   zones and pushes deltas, one domain at a time.
//!
//! Everything except [`Syncer`] is pure and synchronous.

pub mod config;
pub mod convert;
pub mod error;
pub mod meta;
pub mod model;
pub mod parser;
pub mod printer;
pub mod reconcile;
pub mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SyncConfig, TlsVerification};
pub use error::{CoreError, DirectiveError, LayoutError, RecordError, SettingError};
pub use meta::{Directive, DirectiveAction, Entry, RecordPattern};
pub use model::{Layout, Record, RecordId, RecordType, Zone, ZoneSetting, ZoneSettings};
pub use parser::parse_layout;
pub use printer::{PrintOptions, render_layout};
pub use reconcile::{SettingsChange, ZoneDelta, reconcile};
pub use sync::{DomainOutcome, Syncer};

pub use dnssync_api::Credentials;
