//! Event-side data model
//!
//! The chain tags every event with a phase instead of a direct
//! reference to the extrinsic that produced it; correlation happens
//! by index in `correlate`.

/// Which execution phase emitted an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Emitted while applying the extrinsic at this index in the block
    ApplyExtrinsic(u32),
    /// Initialization/finalization events, never attributed to an extrinsic
    Other,
}

/// One entry of the chain's event log for a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub phase: Phase,
    pub section: String,
    pub method: String,
}

impl EventRecord {
    pub fn name(&self) -> String {
        format!("{}.{}", self.section, self.method)
    }
}
