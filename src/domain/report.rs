//! Per-extrinsic report rendering
//!
//! Pure string production; the TUI decides how paragraphs are laid
//! out on screen.

use crate::domain::correlate::CorrelationRecord;

/// Shown in place of the event list for extrinsics with no matches
const NO_EVENTS: &str = "no events";

/// Render one correlation record as a paragraph:
/// event summary line, call signature line, then documentation lines.
pub fn render_record(record: &CorrelationRecord) -> String {
    let extrinsic = record.extrinsic;
    let events = if record.matched_event_names.is_empty() {
        NO_EVENTS.to_string()
    } else {
        record.matched_event_names.join(", ")
    };

    let mut out = format!(
        "{section}.{method}:: {events}\n{section}.{method}({args})",
        section = extrinsic.section,
        method = extrinsic.method,
        args = extrinsic.args.join(", "),
    );
    for line in &extrinsic.docs {
        out.push('\n');
        out.push_str(line);
    }
    out
}

/// Render a whole block's records, one paragraph per extrinsic,
/// in extrinsic order.
pub fn render(records: &[CorrelationRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::block::Extrinsic;

    fn transfer() -> Extrinsic {
        Extrinsic {
            signed: true,
            section: "balances".to_string(),
            method: "transfer".to_string(),
            args: vec!["5GrwvaEF...".to_string(), "1000".to_string()],
            docs: vec![
                "Transfer some liquid free balance to another account.".to_string(),
                "The dispatch origin for this call must be Signed.".to_string(),
            ],
        }
    }

    #[test]
    fn renders_events_signature_and_docs() {
        let extrinsic = transfer();
        let record = CorrelationRecord {
            extrinsic: &extrinsic,
            matched_event_names: vec![
                "balances.Transfer".to_string(),
                "system.ExtrinsicSuccess".to_string(),
            ],
        };

        let text = render_record(&record);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("balances.transfer:: balances.Transfer, system.ExtrinsicSuccess")
        );
        assert_eq!(
            lines.next(),
            Some("balances.transfer(5GrwvaEF..., 1000)")
        );
        assert_eq!(
            lines.next(),
            Some("Transfer some liquid free balance to another account.")
        );
    }

    #[test]
    fn zero_matches_render_the_no_events_marker() {
        let extrinsic = Extrinsic {
            signed: false,
            section: "timestamp".to_string(),
            method: "set".to_string(),
            args: vec!["1600000000".to_string()],
            docs: Vec::new(),
        };
        let record = CorrelationRecord {
            extrinsic: &extrinsic,
            matched_event_names: Vec::new(),
        };

        let text = render_record(&record);
        assert!(text.starts_with("timestamp.set:: no events"));
        assert!(text.contains("timestamp.set(1600000000)"));
    }

    #[test]
    fn paragraphs_follow_extrinsic_order() {
        let first = Extrinsic {
            signed: false,
            section: "timestamp".to_string(),
            method: "set".to_string(),
            args: Vec::new(),
            docs: Vec::new(),
        };
        let second = transfer();
        let records = vec![
            CorrelationRecord {
                extrinsic: &first,
                matched_event_names: Vec::new(),
            },
            CorrelationRecord {
                extrinsic: &second,
                matched_event_names: vec!["balances.Transfer".to_string()],
            },
        ];

        let text = render(&records);
        let first_at = text.find("timestamp.set").unwrap();
        let second_at = text.find("balances.transfer").unwrap();
        assert!(first_at < second_at);
    }
}
