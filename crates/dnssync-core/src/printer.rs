// ── Canonical layout text ──

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::model::{Layout, Record, Zone};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Emit records in record order instead of declaration order.
    pub sort_records: bool,
}

/// Render `layout` as DSL text that parses back to the same layout.
///
/// Settings equal to the provider default are omitted and repeated records
/// are printed once.
pub fn render_layout(layout: &Layout, options: PrintOptions) -> String {
    let mut out = String::new();
    for (index, zone) in layout.zones().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_zone(&mut out, zone, options);
    }
    out
}

fn render_zone(out: &mut String, zone: &Zone, options: PrintOptions) {
    let _ = writeln!(out, "{}", zone.domain);
    for setting in zone.settings.non_default() {
        let _ = writeln!(out, "\t.{setting}\t{}", zone.settings.value(setting));
    }

    let mut records: Vec<&Record> = zone.entries.iter().collect();
    if options.sort_records {
        records.sort();
    }
    let mut printed = HashSet::new();
    for record in records {
        if !printed.insert(record) {
            continue;
        }
        let _ = write!(
            out,
            "\t{}\t{}\t{}",
            record.record_type(),
            record.hostname(),
            record.destination()
        );
        if let Some(priority) = record.priority() {
            let _ = write!(out, "\t{priority}");
        }
        out.push('\n');
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::parse_layout;

    const SOURCE: &str = "\
# main zones
.ttl\t3600
example.com
\t.dnssec\ton
\tmx\t@\tmx2.example.com\t20
\tA\twww\t192.0.2.1
\tTXT\t@\tv=spf1 mx -all
\tA\twww\t192.0.2.1
\tAAAA\twww\t2001:db8::1

example.org
\t.ttl\t86400
\tCNAME\twww\texample.com.
";

    #[test]
    fn canonical_rendering() {
        let layout = parse_layout(SOURCE).unwrap();
        assert_eq!(
            render_layout(&layout, PrintOptions::default()),
            "\
example.com
\t.ttl\t3600
\t.dnssec\tyes
\tMX\t@\tmx2.example.com\t20
\tA\twww\t192.0.2.1
\tTXT\t@\tv=spf1 mx -all
\tAAAA\twww\t2001:db8::1

example.org
\tCNAME\twww\texample.com.
"
        );
    }

    #[test]
    fn sorted_rendering() {
        let layout = parse_layout(SOURCE).unwrap().filter_domains(&["example.com"]);
        let text = render_layout(&layout, PrintOptions { sort_records: true });
        let records: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(
            records,
            [
                "\tA\twww\t192.0.2.1",
                "\tAAAA\twww\t2001:db8::1",
                "\tMX\t@\tmx2.example.com\t20",
                "\tTXT\t@\tv=spf1 mx -all",
            ]
        );
    }

    #[test]
    fn print_parse_round_trip() {
        let first = parse_layout(SOURCE).unwrap();
        for sort_records in [false, true] {
            let text = render_layout(&first, PrintOptions { sort_records });
            let second = parse_layout(&text).unwrap();
            assert_eq!(
                first.domains().collect::<Vec<_>>(),
                second.domains().collect::<Vec<_>>()
            );
            for (a, b) in first.zones().zip(second.zones()) {
                assert_eq!(a.settings, b.settings);
                let mut left: Vec<_> = a.entries.clone();
                let mut right: Vec<_> = b.entries.clone();
                left.sort();
                left.dedup();
                right.sort();
                assert_eq!(left, right);
            }
            assert_eq!(render_layout(&second, PrintOptions { sort_records }), text);
        }
    }

    #[test]
    fn empty_layout_renders_nothing() {
        assert_eq!(render_layout(&Layout::new(), PrintOptions::default()), "");
    }
}
