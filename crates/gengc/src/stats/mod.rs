//! Stats Module - Collector Statistics
//!
//! Statistics gathered for:
//! - Tests asserting on collector behavior
//! - Tuning budgets and thresholds
//! - Debugging & profiling
//!
//! Metrics:
//! - Collection counts per generation and for the large-object space
//! - Allocation and promotion volume per generation
//! - Reclamation, finalization and weak-handle totals
//! - Pause time (min, max, mean)

pub mod gc_cycle;
pub mod timer;

pub use gc_cycle::CollectionReport;
pub use timer::GcTimer;

use crate::allocator::GenerationStore;
use crate::latency::LatencyMode;
use crate::object::{Generation, ObjectTable};
use serde::Serialize;
use std::collections::VecDeque;

/// GcStats - running totals across collections
#[derive(Debug, Clone)]
pub struct GcStats {
    collections: [u64; 3],
    large_object_collections: u64,
    objects_reclaimed: u64,
    bytes_reclaimed: u64,
    objects_promoted: u64,
    bytes_promoted: u64,
    finalizers_run: u64,
    weak_handles_cleared: u64,
    objects_resurrected: u64,
    bytes_compacted: u64,
    pause: PauseSummary,
    history: VecDeque<CollectionReport>,
    max_history: usize,
}

impl GcStats {
    /// Create new stats keeping at most `max_history` reports
    pub fn new(max_history: usize) -> Self {
        Self {
            collections: [0; 3],
            large_object_collections: 0,
            objects_reclaimed: 0,
            bytes_reclaimed: 0,
            objects_promoted: 0,
            bytes_promoted: 0,
            finalizers_run: 0,
            weak_handles_cleared: 0,
            objects_resurrected: 0,
            bytes_compacted: 0,
            pause: PauseSummary::default(),
            history: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Fold a finished collection into the totals
    ///
    /// A collection at `level` counts once for every generation it covers;
    /// a level-2 collection also counts as a large-object collection.
    pub fn record_collection(&mut self, report: &CollectionReport) {
        for generation in Generation::ALL.iter().filter(|g| g.is_collected_at(report.level)) {
            self.collections[generation.index()] += 1;
        }
        if report.level == crate::object::MAX_GENERATION {
            self.large_object_collections += 1;
        }

        self.objects_reclaimed += report.objects_reclaimed as u64;
        self.bytes_reclaimed += report.bytes_reclaimed as u64;
        self.objects_promoted += report.objects_promoted as u64;
        self.bytes_promoted += report.bytes_promoted as u64;
        self.finalizers_run += report.finalizers_run as u64;
        self.weak_handles_cleared += report.weak_handles_cleared() as u64;
        self.objects_resurrected += report.objects_resurrected as u64;
        self.bytes_compacted += report.bytes_compacted as u64;
        self.pause.record(report.duration_ns);

        if self.max_history > 0 {
            if self.history.len() == self.max_history {
                self.history.pop_front();
            }
            self.history.push_back(report.clone());
        }
    }

    /// Collections that covered `generation`
    pub fn collection_count(&self, generation: Generation) -> u64 {
        self.collections[generation.index()]
    }

    pub fn large_object_collection_count(&self) -> u64 {
        self.large_object_collections
    }

    /// Total collections of any level
    pub fn total_collections(&self) -> u64 {
        // Every collection covers Gen0
        self.collections[0]
    }

    pub fn last_collection(&self) -> Option<&CollectionReport> {
        self.history.back()
    }

    /// Retained reports, oldest first
    pub fn history(&self) -> impl Iterator<Item = &CollectionReport> {
        self.history.iter()
    }

    pub fn pause(&self) -> PauseSummary {
        self.pause
    }

    /// Build a serializable snapshot of the collector
    pub fn snapshot(
        &self,
        objects: &ObjectTable,
        store: &GenerationStore,
        latency_mode: LatencyMode,
    ) -> GcStatsSnapshot {
        let mut generations: Vec<GenerationSnapshot> = Generation::ALL
            .iter()
            .map(|&generation| {
                let space = store.space(generation);
                GenerationSnapshot {
                    generation,
                    collections: self.collection_count(generation),
                    allocated_objects: space.allocated_objects,
                    allocated_bytes: space.allocated_bytes,
                    promoted_objects: space.promoted_objects,
                    promoted_bytes: space.promoted_bytes,
                    live_objects: 0,
                    live_bytes: 0,
                    segment_extent: space.extent,
                    budget: space.budget,
                    budget_used: space.since_collection,
                }
            })
            .collect();

        let mut zombie_objects = 0;
        for record in objects.iter() {
            if record.is_zombie() {
                zombie_objects += 1;
                continue;
            }
            let snapshot = &mut generations[record.generation().index()];
            snapshot.live_objects += 1;
            snapshot.live_bytes += record.size();
        }

        let large = store.large_space();
        GcStatsSnapshot {
            live_objects: generations.iter().map(|g| g.live_objects).sum(),
            live_bytes: generations.iter().map(|g| g.live_bytes).sum(),
            zombie_objects,
            generations,
            large_object_collections: self.large_object_collections,
            large_object_count: large.object_count(),
            large_object_bytes: large.occupied(),
            total_collections: self.total_collections(),
            objects_reclaimed: self.objects_reclaimed,
            bytes_reclaimed: self.bytes_reclaimed,
            objects_promoted: self.objects_promoted,
            bytes_promoted: self.bytes_promoted,
            finalizers_run: self.finalizers_run,
            weak_handles_cleared: self.weak_handles_cleared,
            objects_resurrected: self.objects_resurrected,
            bytes_compacted: self.bytes_compacted,
            pause: self.pause,
            latency_mode,
            last_collection: self.last_collection().cloned(),
        }
    }
}

/// Pause time summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PauseSummary {
    pub count: u64,
    pub total_ns: u64,
    pub min_ns: u64,
    pub max_ns: u64,
}

impl PauseSummary {
    fn record(&mut self, duration_ns: u64) {
        self.min_ns = if self.count == 0 {
            duration_ns
        } else {
            self.min_ns.min(duration_ns)
        };
        self.max_ns = self.max_ns.max(duration_ns);
        self.total_ns = self.total_ns.saturating_add(duration_ns);
        self.count += 1;
    }

    /// Get mean
    pub fn mean_ns(&self) -> u64 {
        if self.count == 0 {
            0
        } else {
            self.total_ns / self.count
        }
    }
}

/// Per-generation part of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSnapshot {
    pub generation: Generation,
    pub collections: u64,
    pub allocated_objects: u64,
    pub allocated_bytes: u64,
    pub promoted_objects: u64,
    pub promoted_bytes: u64,
    pub live_objects: usize,
    pub live_bytes: usize,
    pub segment_extent: usize,
    pub budget: usize,
    pub budget_used: usize,
}

/// Point-in-time view of the collector, returned by `Collector::stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GcStatsSnapshot {
    pub generations: Vec<GenerationSnapshot>,
    pub live_objects: usize,
    pub live_bytes: usize,
    /// Finalized objects awaiting reclamation or resurrection
    pub zombie_objects: usize,
    pub large_object_collections: u64,
    pub large_object_count: usize,
    pub large_object_bytes: usize,
    pub total_collections: u64,
    pub objects_reclaimed: u64,
    pub bytes_reclaimed: u64,
    pub objects_promoted: u64,
    pub bytes_promoted: u64,
    pub finalizers_run: u64,
    pub weak_handles_cleared: u64,
    pub objects_resurrected: u64,
    pub bytes_compacted: u64,
    pub pause: PauseSummary,
    pub latency_mode: LatencyMode,
    pub last_collection: Option<CollectionReport>,
}

impl GcStatsSnapshot {
    pub fn generation(&self, generation: Generation) -> &GenerationSnapshot {
        &self.generations[generation.index()]
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
