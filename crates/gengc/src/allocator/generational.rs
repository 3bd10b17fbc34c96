//! Generational Store - Per-Generation Accounting
//!
//! Based on the observation that:
//! - Most objects die young
//! - Objects that survive tend to live long
//!
//! Each generation owns a compactable segment (a logical bump region whose
//! end is `extent`) plus the counters that drive implicit collections. Gen2
//! additionally owns the large-object space.
//!
//! ## Budgets
//!
//! Every generation counts the bytes that entered it since it was last
//! collected: fresh allocations for Gen0 and large objects, promoted bytes
//! for Gen1 and Gen2. When an allocation would push its target generation
//! past budget, the highest over-budget generation the latency mode permits
//! is collected.

use super::large::LargeObjectSpace;
use crate::object::{Generation, MAX_GENERATION};
use serde::Serialize;

/// Counters for one generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSpace {
    /// End of the compactable segment
    pub extent: usize,
    /// Objects allocated directly into this generation
    pub allocated_objects: u64,
    /// Bytes allocated directly into this generation
    pub allocated_bytes: u64,
    /// Objects promoted into this generation
    pub promoted_objects: u64,
    /// Bytes promoted into this generation
    pub promoted_bytes: u64,
    /// Bytes that entered since this generation was last collected
    pub since_collection: usize,
    /// Byte budget for `since_collection`
    pub budget: usize,
}

/// Budget check outcome for a pending allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetTrigger {
    /// Level of the collection to run; `None` when the latency mode permits
    /// no collection that covers an over-budget generation
    pub level: Option<u8>,
    /// Bytes counted against the target generation, allocation included
    pub allocated: usize,
    /// Budget of the target generation
    pub budget: usize,
}

/// GenerationStore - segments, counters and budgets for Gen0..Gen2
#[derive(Debug, Clone)]
pub struct GenerationStore {
    spaces: [GenerationSpace; 3],
    large: LargeObjectSpace,
}

impl GenerationStore {
    /// Create a store with per-generation byte budgets
    pub fn new(budgets: [usize; 3]) -> Self {
        let spaces = budgets.map(|budget| GenerationSpace {
            budget,
            ..Default::default()
        });
        Self {
            spaces,
            large: LargeObjectSpace::new(),
        }
    }

    pub fn space(&self, generation: Generation) -> &GenerationSpace {
        &self.spaces[generation.index()]
    }

    pub fn large_space(&self) -> &LargeObjectSpace {
        &self.large
    }

    /// Place a small object at the end of the Gen0 segment
    pub fn place_small(&mut self, size: usize) -> usize {
        let space = &mut self.spaces[Generation::Gen0.index()];
        let offset = space.extent;
        space.extent += size;
        space.allocated_objects += 1;
        space.allocated_bytes += size as u64;
        space.since_collection = space.since_collection.saturating_add(size);
        offset
    }

    /// Place a large object in the large-object space (Gen2)
    pub fn place_large(&mut self, size: usize) -> usize {
        let offset = self.large.place(size);
        let space = &mut self.spaces[Generation::Gen2.index()];
        space.allocated_objects += 1;
        space.allocated_bytes += size as u64;
        space.since_collection = space.since_collection.saturating_add(size);
        offset
    }

    /// Account for a promotion into `to`, returning the new segment offset
    pub fn promote(&mut self, size: usize, to: Generation) -> usize {
        let space = &mut self.spaces[to.index()];
        let offset = space.extent;
        space.extent += size;
        space.promoted_objects += 1;
        space.promoted_bytes += size as u64;
        space.since_collection = space.since_collection.saturating_add(size);
        offset
    }

    /// Release a reclaimed large object's range
    pub fn release_large(&mut self, offset: usize, size: usize) {
        self.large.release(offset, size);
    }

    /// Segment end after compaction
    pub fn set_extent(&mut self, generation: Generation, extent: usize) {
        self.spaces[generation.index()].extent = extent;
    }

    /// Check the budget of `target` for an allocation of `size` bytes
    ///
    /// Returns `None` while the target stays within budget. Otherwise the
    /// trigger names the highest over-budget generation at or below
    /// `max_level`.
    pub fn budget_trigger(
        &self,
        target: Generation,
        size: usize,
        max_level: Option<u8>,
    ) -> Option<BudgetTrigger> {
        let pending = |generation: Generation| {
            let space = &self.spaces[generation.index()];
            let extra = if generation == target { size } else { 0 };
            space.since_collection.saturating_add(extra)
        };
        let exceeded =
            |generation: Generation| pending(generation) > self.spaces[generation.index()].budget;

        if !exceeded(target) {
            return None;
        }

        let level = max_level.and_then(|cap| {
            Generation::ALL
                .iter()
                .rev()
                .copied()
                .filter(|g| g.level() <= cap.min(MAX_GENERATION))
                .find(|&g| exceeded(g))
                .map(Generation::level)
        });

        Some(BudgetTrigger {
            level,
            allocated: pending(target),
            budget: self.spaces[target.index()].budget,
        })
    }

    /// Reset budget counters of every generation a collection at `level`
    /// covered
    pub fn reset_budgets(&mut self, level: u8) {
        for generation in Generation::ALL.iter().filter(|g| g.is_collected_at(level)) {
            self.spaces[generation.index()].since_collection = 0;
        }
    }

    /// Objects placed directly into `generation`
    pub fn allocation_count(&self, generation: Generation) -> u64 {
        self.spaces[generation.index()].allocated_objects
    }
}
