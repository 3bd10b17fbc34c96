//! GC Cycle Statistics - Per-Collection Report
//!
//! One `CollectionReport` is produced by every completed collection and is
//! returned from `Collector::collect`, kept as `last_collection()` and
//! appended to the stats history.

use crate::gc::GcReason;
use crate::latency::LatencyMode;
use serde::Serialize;

/// Counters for one collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionReport {
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// Highest generation collected
    pub level: u8,
    /// What started the collection
    pub reason: GcReason,
    /// Latency mode at the time of the collection
    pub latency_mode: LatencyMode,

    /// Objects strongly marked (roots, remembered sources and their closure)
    pub objects_marked: usize,
    /// Edges inspected while marking
    pub edges_scanned: usize,
    /// Objects kept alive only through finalization candidates
    pub objects_f_reachable: usize,

    /// Objects reclaimed
    pub objects_reclaimed: usize,
    /// Bytes reclaimed
    pub bytes_reclaimed: usize,
    /// Large objects reclaimed (subset of `objects_reclaimed`)
    pub large_objects_reclaimed: usize,

    /// Objects promoted to an older generation
    pub objects_promoted: usize,
    /// Bytes promoted to an older generation
    pub bytes_promoted: usize,

    /// Objects moved to the finalization queue
    pub finalizers_enqueued: usize,
    /// Finalizers run in the drain step
    pub finalizers_run: usize,
    /// Finalized objects found reachable again and re-armed
    pub objects_resurrected: usize,

    /// Short weak handles invalidated after marking
    pub short_weak_cleared: usize,
    /// Long weak handles invalidated by reclamation
    pub long_weak_cleared: usize,

    /// Objects moved by compaction
    pub objects_compacted: usize,
    /// Bytes moved by compaction
    pub bytes_compacted: usize,

    /// Stale remembered-set entries dropped
    pub remembered_pruned: usize,

    /// Live bytes (zombies excluded) before and after the collection
    pub live_bytes_before: usize,
    pub live_bytes_after: usize,

    /// Wall-clock duration
    pub duration_ns: u64,
}

impl CollectionReport {
    pub fn new(cycle: u64, level: u8, reason: GcReason, latency_mode: LatencyMode) -> Self {
        Self {
            cycle,
            level,
            reason,
            latency_mode,
            ..Default::default()
        }
    }

    /// Total weak handles invalidated by this collection
    pub fn weak_handles_cleared(&self) -> usize {
        self.short_weak_cleared + self.long_weak_cleared
    }

    /// Whether an allocation budget started this collection
    pub fn was_implicit(&self) -> bool {
        matches!(self.reason, GcReason::AllocationBudget { .. })
    }
}
