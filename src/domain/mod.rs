pub mod block;
pub mod correlate;
pub mod event;
pub mod report;

pub use block::{Block, BlockId, Extrinsic, Header, SearchMode};
pub use correlate::{correlate, CorrelationRecord};
pub use event::{EventRecord, Phase};
