//! Relocate Module - Segment Compaction
//!
//! Compaction slides the survivors of a collected small-object segment
//! toward offset 0, keeping their relative order. Object identities never
//! change, so no forwarding is needed: only the `offset` field of each
//! record is rewritten.
//!
//! The large-object space is never compacted.

pub mod compaction;

pub use compaction::{Compactor, SegmentCompaction};
