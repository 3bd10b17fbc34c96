//! Compaction - Sliding Segment Compaction
//!
//! ```text
//! before:  │ A │░░░░│ B │░░│ C │      (░ = reclaimed)
//! after:   │ A │ B │ C │
//! ```
//!
//! Survivors are visited in ascending offset order and each is assigned the
//! next free offset. Because every new offset is at most the old one, the
//! slide never overtakes a survivor.

use crate::object::{Generation, ObjectId, ObjectTable};
use serde::Serialize;

/// Result of compacting one segment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentCompaction {
    /// Survivors in the segment
    pub live_objects: usize,
    /// Survivors whose offset changed
    pub moved_objects: usize,
    /// Bytes of the survivors that moved
    pub bytes_moved: usize,
    /// New end of the segment
    pub extent: usize,
}

/// Compactor - packs collected segments
#[derive(Debug, Default)]
pub struct Compactor {
    /// Segments compacted over the collector's lifetime
    segments_compacted: u64,
    /// Bytes moved over the collector's lifetime
    total_bytes_moved: u64,
}

impl Compactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack the small objects of `generation` contiguously from offset 0
    pub fn compact_segment(
        &mut self,
        objects: &mut ObjectTable,
        generation: Generation,
    ) -> SegmentCompaction {
        let mut layout: Vec<(usize, ObjectId)> = objects
            .iter()
            .filter(|r| r.generation() == generation && !r.is_large())
            .map(|r| (r.offset, r.id()))
            .collect();
        layout.sort_unstable();

        let mut result = SegmentCompaction {
            live_objects: layout.len(),
            ..Default::default()
        };

        for (old_offset, id) in layout {
            let Some(record) = objects.get_mut(id) else {
                continue;
            };
            let new_offset = result.extent;
            debug_assert!(new_offset <= old_offset, "compaction slid {} forward", id);
            if new_offset != old_offset {
                log::trace!("compact {} {}: {} -> {}", generation, id, old_offset, new_offset);
                record.offset = new_offset;
                result.moved_objects += 1;
                result.bytes_moved += record.size;
            }
            result.extent += record.size;
        }

        self.segments_compacted += 1;
        self.total_bytes_moved += result.bytes_moved as u64;
        result
    }

    pub fn segments_compacted(&self) -> u64 {
        self.segments_compacted
    }

    pub fn total_bytes_moved(&self) -> u64 {
        self.total_bytes_moved
    }
}
