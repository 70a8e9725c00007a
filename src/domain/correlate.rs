//! Extrinsic/event correlation
//!
//! Pure and deterministic: no I/O, rebuilt from scratch on every
//! search. Event-log order is preserved within each record.

use std::collections::BTreeMap;

use crate::domain::block::Extrinsic;
use crate::domain::event::{EventRecord, Phase};

/// One extrinsic joined with the names of the events it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationRecord<'a> {
    pub extrinsic: &'a Extrinsic,
    pub matched_event_names: Vec<String>,
}

/// Attribute each event to the extrinsic its phase points at.
///
/// Events are bucketed once, so the cost is linear in extrinsics plus
/// events. Phases referencing an index outside the extrinsic list are
/// silently unmatched; non-apply phases are never attributed.
pub fn correlate<'a>(
    extrinsics: &'a [Extrinsic],
    event_log: &[EventRecord],
) -> Vec<CorrelationRecord<'a>> {
    let mut by_index: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for record in event_log {
        if let Phase::ApplyExtrinsic(index) = record.phase {
            by_index.entry(index).or_default().push(record.name());
        }
    }

    extrinsics
        .iter()
        .enumerate()
        .map(|(index, extrinsic)| CorrelationRecord {
            extrinsic,
            matched_event_names: by_index.remove(&(index as u32)).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extrinsic(section: &str, method: &str) -> Extrinsic {
        Extrinsic {
            signed: true,
            section: section.to_string(),
            method: method.to_string(),
            args: Vec::new(),
            docs: Vec::new(),
        }
    }

    fn event(phase: Phase, section: &str, method: &str) -> EventRecord {
        EventRecord {
            phase,
            section: section.to_string(),
            method: method.to_string(),
        }
    }

    #[test]
    fn attributes_events_by_phase_index() {
        let extrinsics = vec![
            extrinsic("timestamp", "set"),
            extrinsic("balances", "transfer"),
        ];
        let log = vec![
            event(Phase::ApplyExtrinsic(1), "balances", "Transfer"),
            event(Phase::ApplyExtrinsic(1), "system", "ExtrinsicSuccess"),
        ];

        let records = correlate(&extrinsics, &log);
        assert_eq!(records.len(), 2);
        assert!(records[0].matched_event_names.is_empty());
        assert_eq!(
            records[1].matched_event_names,
            vec!["balances.Transfer", "system.ExtrinsicSuccess"]
        );
    }

    #[test]
    fn preserves_event_log_order_not_alphabetical() {
        let extrinsics = vec![extrinsic("a", "a"), extrinsic("b", "b"), extrinsic("c", "c")];
        let log = vec![
            event(Phase::ApplyExtrinsic(2), "zeta", "Last"),
            event(Phase::ApplyExtrinsic(2), "alpha", "First"),
        ];

        let records = correlate(&extrinsics, &log);
        assert_eq!(
            records[2].matched_event_names,
            vec!["zeta.Last", "alpha.First"]
        );
    }

    #[test]
    fn ignores_non_apply_phases() {
        let extrinsics = vec![extrinsic("system", "remark")];
        let log = vec![
            event(Phase::Other, "session", "NewSession"),
            event(Phase::ApplyExtrinsic(0), "system", "ExtrinsicSuccess"),
            event(Phase::Other, "grandpa", "NewAuthorities"),
        ];

        let records = correlate(&extrinsics, &log);
        assert_eq!(records[0].matched_event_names, vec!["system.ExtrinsicSuccess"]);
    }

    #[test]
    fn out_of_range_phase_index_is_silently_unmatched() {
        let extrinsics = vec![extrinsic("system", "remark")];
        let log = vec![event(Phase::ApplyExtrinsic(7), "system", "ExtrinsicSuccess")];

        let records = correlate(&extrinsics, &log);
        assert_eq!(records.len(), 1);
        assert!(records[0].matched_event_names.is_empty());
    }

    #[test]
    fn idempotent_for_identical_inputs() {
        let extrinsics = vec![extrinsic("balances", "transfer")];
        let log = vec![
            event(Phase::ApplyExtrinsic(0), "balances", "Transfer"),
            event(Phase::ApplyExtrinsic(0), "system", "ExtrinsicSuccess"),
        ];

        assert_eq!(correlate(&extrinsics, &log), correlate(&extrinsics, &log));
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        assert!(correlate(&[], &[]).is_empty());
    }
}
