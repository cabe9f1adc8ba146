// ── Domain model ──
//
// Records, zones and the ordered layout that the parser produces, the
// reconciler compares, and the printer renders.

pub mod layout;
pub mod record;
pub mod zone;

pub use layout::Layout;
pub use record::{Record, RecordId, RecordType};
pub use zone::{Zone, ZoneSetting, ZoneSettings};
