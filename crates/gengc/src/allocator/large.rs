//! Large Object Space
//!
//! Objects at or above the large-object threshold live here, outside the
//! compactable generation segments.
//!
//! Characteristics of large objects:
//! - Born in Gen2, never promoted
//! - Never moved: the offset handed out at allocation is kept until the
//!   object is reclaimed
//! - Freed ranges are reused first-fit (lowest offset that is big enough)
//!
//! ```text
//! offset 0                                                    extent
//! ├──────────┬──────────────┬─────────────┬──────────────────┤
//! │ object#4 │   free 90KB  │  object#11  │     free 200KB   │
//! └──────────┴──────────────┴─────────────┴──────────────────┘
//! ```

use std::collections::BTreeMap;

/// LargeObjectSpace - position-stable placement for large objects
#[derive(Debug, Default, Clone)]
pub struct LargeObjectSpace {
    /// Free ranges: offset -> length, address ordered and coalesced
    free_ranges: BTreeMap<usize, usize>,
    /// End of the highest range ever handed out
    extent: usize,
    /// Bytes currently occupied
    occupied: usize,
    /// Objects currently placed
    object_count: usize,
}

impl LargeObjectSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an object of `size` bytes, returning its offset
    pub fn place(&mut self, size: usize) -> usize {
        let offset = match self.find_free_range(size) {
            Some(offset) => offset,
            None => {
                let offset = self.extent;
                self.extent += size;
                offset
            }
        };
        self.occupied += size;
        self.object_count += 1;
        offset
    }

    /// First free range that can hold `size`; any remainder stays free
    fn find_free_range(&mut self, size: usize) -> Option<usize> {
        let (&offset, &len) = self.free_ranges.iter().find(|(_, &len)| len >= size)?;
        self.free_ranges.remove(&offset);
        if len > size {
            self.free_ranges.insert(offset + size, len - size);
        }
        Some(offset)
    }

    /// Return `[offset, offset + size)` to the free list
    pub fn release(&mut self, offset: usize, size: usize) {
        debug_assert!(offset + size <= self.extent, "release past extent");
        self.occupied = self.occupied.saturating_sub(size);
        self.object_count = self.object_count.saturating_sub(1);

        let mut start = offset;
        let mut len = size;

        // Coalesce with the preceding range
        if let Some((&prev, &prev_len)) = self.free_ranges.range(..offset).next_back() {
            if prev + prev_len == offset {
                self.free_ranges.remove(&prev);
                start = prev;
                len += prev_len;
            }
        }
        // Coalesce with the following range
        if let Some(next_len) = self.free_ranges.remove(&(offset + size)) {
            len += next_len;
        }

        if start + len == self.extent {
            self.extent = start;
        } else {
            self.free_ranges.insert(start, len);
        }
    }

    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Free range statistics: (total free bytes below extent, range count)
    pub fn free_range_stats(&self) -> (usize, usize) {
        (self.free_ranges.values().sum(), self.free_ranges.len())
    }
}
