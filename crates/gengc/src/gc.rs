//! GC Core Module - Collector and Collection Cycle
//!
//! Implements the generational mark-and-compact algorithm.
//!
//! A collection at level `L` covers every generation `<= L` and runs these
//! phases in order:
//!
//! 1. **Mark** from roots and from remembered sources in older generations
//! 2. **Reconcile weak handles**: short handles to unmarked objects die
//! 3. **Sweep**: unmarked finalizable objects are queued and kept alive
//!    together with everything they reach; other unmarked objects are
//!    reclaimed
//! 4. **Promote** survivors that reached their promotion threshold
//! 5. **Compact** every collected small-object segment
//! 6. **Finalize**: run queued finalizers, then re-arm every finalized
//!    object that is reachable from the roots again (resurrection)
//!
//! The resurrection check traces the whole heap from the roots, whatever
//! the level, so a finalized object in an uncollected generation is re-armed
//! as soon as anything makes it reachable. It only runs while finalized
//! objects exist.
//!
//! Counters, budgets and the remembered set are updated at the end of the
//! cycle. Everything runs synchronously on the calling thread.

use crate::allocator::GenerationStore;
use crate::config::{GcConfig, LARGE_OBJECT_THRESHOLD};
use crate::error::{GcError, Result};
use crate::finalizer::{FinalizationQueue, Finalizer, FinalizerContext};
use crate::heap::Heap;
use crate::latency::{LatencyMode, LatencyPolicy};
use crate::logging::{GcEvent, GcEventLog};
use crate::marker::{MarkSet, Marker};
use crate::object::{
    FinalizationState, Generation, ObjectId, ObjectInfo, ObjectRecord, WeakHandle,
    WeakHandleTable, MAX_GENERATION,
};
use crate::relocate::Compactor;
use crate::stats::{CollectionReport, GcStats, GcStatsSnapshot, GcTimer};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Collection phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GcPhase {
    Mark,
    ReconcileWeak,
    Sweep,
    Promote,
    Compact,
    Finalize,
}

impl fmt::Display for GcPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GcPhase::Mark => "mark",
            GcPhase::ReconcileWeak => "reconcile-weak",
            GcPhase::Sweep => "sweep",
            GcPhase::Promote => "promote",
            GcPhase::Compact => "compact",
            GcPhase::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Reason for GC trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GcReason {
    /// Explicit `collect` (or `total_memory(true)`) call
    #[default]
    Explicit,
    /// An allocation pushed a generation past its byte budget
    AllocationBudget {
        generation: Generation,
        allocated: usize,
        budget: usize,
    },
}

impl fmt::Display for GcReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcReason::Explicit => f.write_str("explicit"),
            GcReason::AllocationBudget {
                generation,
                allocated,
                budget,
            } => write!(f, "{} allocation budget ({}/{} bytes)", generation, allocated, budget),
        }
    }
}

/// Collector - the generational garbage collector
///
/// Owns the heap and every structure derived from it:
/// - Heap (object table, roots, remembered set)
/// - Weak handle table
/// - Finalization queue
/// - Generation store (segments, counters, budgets, large-object space)
/// - Latency policy
/// - Statistics and event history
///
/// # Examples
///
/// ```rust
/// use gengc::{Collector, Generation};
///
/// let mut gc = Collector::with_defaults();
/// let a = gc.allocate(1_000, false).unwrap();
/// gc.add_root(a).unwrap();
///
/// gc.collect(0).unwrap();
/// assert_eq!(gc.generation_of(a), Some(Generation::Gen1));
/// gc.collect(1).unwrap();
/// assert_eq!(gc.generation_of(a), Some(Generation::Gen2));
/// ```
pub struct Collector {
    config: GcConfig,
    heap: Heap,
    weak: WeakHandleTable,
    finalization: FinalizationQueue,
    store: GenerationStore,
    latency: LatencyPolicy,
    compactor: Compactor,
    stats: GcStats,
    events: GcEventLog,
    /// Cycles started so far
    cycle: u64,
}

impl Collector {
    /// Create a new Collector with specified configuration
    ///
    /// # Returns
    /// Result with collector instance or error if the configuration is
    /// invalid
    pub fn new(config: GcConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Collector with the default configuration
    pub fn with_defaults() -> Self {
        Self::build(GcConfig::default())
    }

    fn build(config: GcConfig) -> Self {
        log::debug!(
            "gengc: collector created (large threshold {} bytes, budgets {:?}, mode {})",
            LARGE_OBJECT_THRESHOLD,
            config.generation_budgets,
            config.latency_mode
        );
        Self {
            heap: Heap::new(),
            weak: WeakHandleTable::new(),
            finalization: FinalizationQueue::new(),
            store: GenerationStore::new(config.generation_budgets),
            latency: LatencyPolicy::new(config.latency_mode),
            compactor: Compactor::new(),
            stats: GcStats::new(config.event_history),
            events: GcEventLog::new(config.event_history),
            cycle: 0,
            config,
        }
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Allocate an object of `size` bytes
    ///
    /// Objects at or above the large-object threshold go to Gen2's
    /// large-object space; everything else is born in Gen0. With
    /// `has_finalizer` the object is finalized through the default hook
    /// (see `set_default_finalizer`) before it is reclaimed.
    ///
    /// May run an implicit collection first if the allocation would push
    /// its generation over budget and the latency mode permits it.
    pub fn allocate(&mut self, size: usize, has_finalizer: bool) -> Result<ObjectId> {
        self.allocate_object(size, has_finalizer, None)
    }

    /// Allocate an object with its own finalizer callback
    pub fn allocate_with_finalizer<F>(&mut self, size: usize, finalizer: F) -> Result<ObjectId>
    where
        F: FnMut(&mut FinalizerContext<'_>) + 'static,
    {
        self.allocate_object(size, true, Some(Box::new(finalizer)))
    }

    fn allocate_object(
        &mut self,
        size: usize,
        has_finalizer: bool,
        finalizer: Option<Finalizer>,
    ) -> Result<ObjectId> {
        if size == 0 {
            return Err(self.reject(size, GcError::InvalidSize { size }));
        }
        if let Err(err) = self.latency.check_allocation(size) {
            return Err(self.reject(size, err));
        }

        let large = size >= LARGE_OBJECT_THRESHOLD;
        let target = if large { Generation::Gen2 } else { Generation::Gen0 };

        if let Some(trigger) =
            self.store
                .budget_trigger(target, size, self.latency.max_implicit_level())
        {
            self.events.record(GcEvent::BudgetExceeded {
                generation: target,
                allocated: trigger.allocated,
                budget: trigger.budget,
                level: trigger.level,
            });
            if let Some(level) = trigger.level {
                self.run_collection(
                    level,
                    GcReason::AllocationBudget {
                        generation: target,
                        allocated: trigger.allocated,
                        budget: trigger.budget,
                    },
                );
            }
        }

        let offset = if large {
            self.store.place_large(size)
        } else {
            self.store.place_small(size)
        };
        let id = self.heap.objects.next_id();
        self.heap
            .objects
            .insert(ObjectRecord::new(id, size, large, has_finalizer, offset));
        if has_finalizer {
            self.finalization.register(id, finalizer);
        }
        self.latency.record_allocation(size);

        log::trace!("gengc: allocated {} ({} bytes, {})", id, size, target);
        Ok(id)
    }

    fn reject(&mut self, size: usize, err: GcError) -> GcError {
        self.events.record(GcEvent::AllocationRejected {
            size,
            reason: err.to_string(),
        });
        err
    }

    /// Install the finalizer used by objects allocated with
    /// `allocate(size, true)`
    ///
    /// Returns true if a previous hook was replaced.
    pub fn set_default_finalizer<F>(&mut self, hook: F) -> bool
    where
        F: FnMut(&mut FinalizerContext<'_>) + 'static,
    {
        self.finalization.set_default_hook(Some(Box::new(hook)))
    }

    /// Remove the default finalizer hook
    pub fn clear_default_finalizer(&mut self) -> bool {
        self.finalization.set_default_hook(None)
    }

    // ========================================================================
    // Object graph
    // ========================================================================

    /// Record a reference `from -> to`; adding an existing edge is a no-op
    pub fn add_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<()> {
        self.heap.add_reference(from, to)
    }

    /// Remove a reference, returning whether it existed
    pub fn remove_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<bool> {
        self.heap.remove_reference(from, to)
    }

    /// Root an object; rooting twice is a no-op
    pub fn add_root(&mut self, id: ObjectId) -> Result<()> {
        self.heap.add_root(id)
    }

    /// Unroot an object, returning whether it was rooted
    pub fn remove_root(&mut self, id: ObjectId) -> Result<bool> {
        self.heap.remove_root(id)
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.heap.is_root(id)
    }

    /// Whether `id` still has a record (zombies included)
    pub fn contains(&self, id: ObjectId) -> bool {
        self.heap.contains(id)
    }

    pub fn references(&self, id: ObjectId) -> Result<Vec<ObjectId>> {
        self.heap.references(id)
    }

    pub fn object_info(&self, id: ObjectId) -> Result<ObjectInfo> {
        Ok(self.heap.objects.try_get(id)?.info())
    }

    // ========================================================================
    // Weak handles
    // ========================================================================

    /// Short weak handle: dies as soon as a collection finds the target
    /// unreachable
    pub fn create_weak(&mut self, target: ObjectId) -> Result<WeakHandle> {
        self.heap.objects.try_get(target)?;
        Ok(self.weak.create(target, false))
    }

    /// Long weak handle: survives finalization and dies only when the
    /// target is reclaimed
    pub fn create_weak_tracking_resurrection(&mut self, target: ObjectId) -> Result<WeakHandle> {
        self.heap.objects.try_get(target)?;
        Ok(self.weak.create(target, true))
    }

    /// Target of a weak handle, `None` once it is dead
    pub fn resolve(&self, handle: WeakHandle) -> Result<Option<ObjectId>> {
        self.weak.resolve(handle)
    }

    // ========================================================================
    // Finalization control
    // ========================================================================

    /// Stop the finalizer of `id` from running (dispose pattern)
    ///
    /// No-op for objects without an armed or pending finalizer.
    pub fn suppress_finalize(&mut self, id: ObjectId) -> Result<()> {
        let record = self.heap.objects.try_get_mut(id)?;
        match record.finalization {
            FinalizationState::Armed => record.finalization = FinalizationState::None,
            FinalizationState::Pending => {
                record.finalization = FinalizationState::None;
                self.finalization.cancel(id);
            },
            FinalizationState::None | FinalizationState::Finalized => {},
        }
        Ok(())
    }

    /// Arm the finalizer of `id` again
    ///
    /// Fails with `NoFinalizer` if the object was not allocated as
    /// finalizable. No-op if the finalizer is already armed or pending.
    pub fn reregister_for_finalize(&mut self, id: ObjectId) -> Result<()> {
        self.heap.objects.try_get(id)?;
        if !self.finalization.is_registered(id) {
            return Err(GcError::NoFinalizer { id });
        }
        let record = self.heap.objects.try_get_mut(id)?;
        if matches!(
            record.finalization,
            FinalizationState::None | FinalizationState::Finalized
        ) {
            record.finalization = FinalizationState::Armed;
        }
        Ok(())
    }

    // ========================================================================
    // Collection
    // ========================================================================

    /// Collect generations `0..=level`
    ///
    /// Always runs, whatever the latency mode.
    pub fn collect(&mut self, level: u8) -> Result<CollectionReport> {
        if level > MAX_GENERATION {
            return Err(GcError::InvalidCollectionLevel {
                level,
                max: MAX_GENERATION,
            });
        }
        Ok(self.run_collection(level, GcReason::Explicit))
    }

    /// Live bytes, optionally after a full collection
    pub fn total_memory(&mut self, force_full_collection: bool) -> usize {
        if force_full_collection {
            self.run_collection(MAX_GENERATION, GcReason::Explicit);
        }
        self.total_live_bytes()
    }

    fn run_collection(&mut self, level: u8, reason: GcReason) -> CollectionReport {
        self.cycle += 1;
        let cycle = self.cycle;
        let mut timer = GcTimer::new();
        let mut report = CollectionReport::new(cycle, level, reason, self.latency.mode());
        report.live_bytes_before = self.total_live_bytes();

        self.events.record(GcEvent::CycleStart {
            cycle,
            level,
            reason,
        });

        // Phase 1: Mark
        let mut marks = MarkSet::new();
        let mark_stats = Marker::new(&self.heap.objects, level).mark_from_roots(
            &self.heap.roots,
            &self.heap.remembered,
            &mut marks,
        );
        report.objects_marked = marks.count_marked();
        report.edges_scanned = mark_stats.edges_scanned;
        self.end_phase(cycle, GcPhase::Mark, &mut timer);

        // Phase 2: Reconcile short weak handles
        let objects = &self.heap.objects;
        report.short_weak_cleared = self.weak.clear_short(|target| match objects.get(target) {
            Some(record) if record.generation().is_collected_at(level) => marks.is_marked(target),
            Some(_) => true,
            None => false,
        });
        self.end_phase(cycle, GcPhase::ReconcileWeak, &mut timer);

        // Phase 3: Sweep
        let candidates = self.heap.objects.ids_collected_at(level);
        self.sweep(cycle, &candidates, &marks, &mut report);
        self.end_phase(cycle, GcPhase::Sweep, &mut timer);

        // Phase 4: Promote
        self.store.reset_budgets(level);
        self.promote(cycle, &candidates, &marks, &mut report);
        self.end_phase(cycle, GcPhase::Promote, &mut timer);

        // Phase 5: Compact
        for generation in Generation::ALL.iter().filter(|g| g.is_collected_at(level)) {
            let result = self
                .compactor
                .compact_segment(&mut self.heap.objects, *generation);
            self.store.set_extent(*generation, result.extent);
            report.objects_compacted += result.moved_objects;
            report.bytes_compacted += result.bytes_moved;
        }
        self.end_phase(cycle, GcPhase::Compact, &mut timer);

        // Phase 6: Finalize
        for object in self.finalization.drain(&mut self.heap) {
            report.finalizers_run += 1;
            self.events.record(GcEvent::FinalizerRun { cycle, object });
        }
        self.rearm_resurrected(cycle, &mut report);
        self.end_phase(cycle, GcPhase::Finalize, &mut timer);

        // Counters
        report.remembered_pruned = self.heap.remembered.prune(&self.heap.objects);
        report.live_bytes_after = self.total_live_bytes();
        report.duration_ns = timer.elapsed_ns();
        self.stats.record_collection(&report);

        if report.weak_handles_cleared() > 0 {
            self.events.record(GcEvent::WeakHandlesCleared {
                cycle,
                short: report.short_weak_cleared,
                long: report.long_weak_cleared,
            });
        }
        self.events.record(GcEvent::CycleEnd {
            cycle,
            level,
            duration_ns: report.duration_ns,
            objects_reclaimed: report.objects_reclaimed,
            bytes_reclaimed: report.bytes_reclaimed,
        });

        report
    }

    fn end_phase(&mut self, cycle: u64, phase: GcPhase, timer: &mut GcTimer) {
        self.events.record(GcEvent::PhaseEnd {
            cycle,
            phase,
            duration_ns: timer.lap_ns(),
        });
    }

    /// Queue unmarked finalizable objects, keep what they reach and reclaim
    /// the rest
    fn sweep(
        &mut self,
        cycle: u64,
        candidates: &[ObjectId],
        marks: &MarkSet,
        report: &mut CollectionReport,
    ) {
        let mut queued = Vec::new();
        for &id in candidates {
            let Some(record) = self.heap.objects.get_mut(id) else {
                continue;
            };
            if !marks.is_marked(id) && record.finalization == FinalizationState::Armed {
                record.finalization = FinalizationState::Pending;
                self.finalization.enqueue(id);
                queued.push(id);
                self.events.record(GcEvent::FinalizerQueued { cycle, object: id });
            }
        }
        report.finalizers_enqueued = queued.len();

        // Everything reachable from a queued object survives this cycle
        let level = report.level;
        let mut f_reachable = MarkSet::new();
        Marker::new(&self.heap.objects, level).mark_from(
            queued.iter().copied(),
            &mut f_reachable,
            marks,
        );
        report.objects_f_reachable = f_reachable.count_marked().saturating_sub(queued.len());

        for &id in candidates {
            if marks.is_marked(id) || f_reachable.is_marked(id) {
                continue;
            }
            let Some(record) = self.heap.reclaim(id) else {
                continue;
            };
            self.finalization.forget(id);
            if record.is_large() {
                self.store.release_large(record.offset, record.size());
                report.large_objects_reclaimed += 1;
            }
            report.objects_reclaimed += 1;
            report.bytes_reclaimed += record.size();
        }

        let objects = &self.heap.objects;
        report.long_weak_cleared = self.weak.clear_reclaimed(|target| !objects.contains(target));
    }

    /// Re-arm finalized objects reachable from the roots
    fn rearm_resurrected(&mut self, cycle: u64, report: &mut CollectionReport) {
        let zombies = self.heap.objects.zombie_ids();
        if zombies.is_empty() {
            return;
        }

        let mut reachable = MarkSet::new();
        Marker::new(&self.heap.objects, MAX_GENERATION).mark_from_roots(
            &self.heap.roots,
            &self.heap.remembered,
            &mut reachable,
        );

        for id in zombies {
            if !reachable.is_marked(id) {
                continue;
            }
            if let Some(record) = self.heap.objects.get_mut(id) {
                record.finalization = FinalizationState::Armed;
                report.objects_resurrected += 1;
                self.events.record(GcEvent::Resurrection { cycle, object: id });
            }
        }
    }

    /// Age strongly marked survivors and promote those at their threshold
    fn promote(
        &mut self,
        cycle: u64,
        candidates: &[ObjectId],
        marks: &MarkSet,
        report: &mut CollectionReport,
    ) {
        let mut promoted = Vec::new();
        for &id in candidates {
            if !marks.is_marked(id) {
                continue;
            }
            let Some(record) = self.heap.objects.get_mut(id) else {
                continue;
            };
            record.survival_count += 1;
            if record.large {
                continue;
            }
            let from = record.generation;
            let (Some(to), Some(threshold)) = (from.next(), self.config.promotion_threshold(from))
            else {
                continue;
            };
            if record.survival_count < threshold {
                continue;
            }

            record.generation = to;
            record.survival_count = 0;
            record.offset = self.store.promote(record.size, to);
            report.objects_promoted += 1;
            report.bytes_promoted += record.size;
            promoted.push(id);
            self.events.record(GcEvent::Promotion {
                cycle,
                object: id,
                from,
                to,
            });
        }

        for id in promoted {
            if let Some(record) = self.heap.objects.get(id) {
                self.heap.remembered.record_promotion(record, &self.heap.objects);
            }
        }
    }

    // ========================================================================
    // Latency
    // ========================================================================

    /// Switch latency mode, returning the previous mode
    ///
    /// Switching to `NoCollectionRegion` enters a region without a byte
    /// budget.
    pub fn set_latency_mode(&mut self, mode: LatencyMode) -> LatencyMode {
        let previous = self.latency.set_mode(mode);
        if previous != mode {
            self.events.record(GcEvent::LatencyModeChanged { from: previous, to: mode });
        }
        previous
    }

    pub fn latency_mode(&self) -> LatencyMode {
        self.latency.mode()
    }

    /// Suppress implicit collections until `total_bytes` have been allocated
    /// or the region is ended
    pub fn start_no_collection_region(&mut self, total_bytes: usize) -> Result<()> {
        let previous = self.latency.mode();
        self.latency.start_region(total_bytes)?;
        self.events.record(GcEvent::LatencyModeChanged {
            from: previous,
            to: LatencyMode::NoCollectionRegion,
        });
        Ok(())
    }

    /// Leave the active no-collection region, returning the restored mode
    pub fn end_no_collection_region(&mut self) -> Result<LatencyMode> {
        let restored = self.latency.end_region()?;
        self.events.record(GcEvent::LatencyModeChanged {
            from: LatencyMode::NoCollectionRegion,
            to: restored,
        });
        Ok(restored)
    }

    /// Bytes left in a budgeted no-collection region
    pub fn no_collection_region_remaining(&self) -> Option<usize> {
        self.latency.region_remaining()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn generation_of(&self, id: ObjectId) -> Option<Generation> {
        self.heap.generation_of(id)
    }

    /// Collections that covered `generation`
    pub fn collection_count(&self, generation: Generation) -> u64 {
        self.stats.collection_count(generation)
    }

    /// Collections that covered the large-object space (level 2)
    pub fn large_object_collection_count(&self) -> u64 {
        self.stats.large_object_collection_count()
    }

    /// Objects allocated directly into `generation`
    pub fn allocation_count(&self, generation: Generation) -> u64 {
        self.store.allocation_count(generation)
    }

    /// Bytes held by live objects; finalized objects awaiting reclamation
    /// are not counted
    pub fn total_live_bytes(&self) -> usize {
        self.heap
            .objects
            .iter()
            .filter(|record| !record.is_zombie())
            .map(ObjectRecord::size)
            .sum()
    }

    /// Live objects, finalized objects awaiting reclamation excluded
    pub fn live_object_count(&self) -> usize {
        self.heap
            .objects
            .iter()
            .filter(|record| !record.is_zombie())
            .count()
    }

    pub fn last_collection(&self) -> Option<&CollectionReport> {
        self.stats.last_collection()
    }

    pub fn stats(&self) -> GcStatsSnapshot {
        self.stats
            .snapshot(&self.heap.objects, &self.store, self.latency.mode())
    }

    /// Recent events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &GcEvent> {
        self.events.iter()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Get detailed diagnostic information
    pub fn diagnostics(&self) -> IndexMap<String, String> {
        let mut diagnostics = IndexMap::new();

        diagnostics.insert("cycle_count".to_string(), self.cycle.to_string());
        diagnostics.insert("latency_mode".to_string(), self.latency.mode().to_string());
        diagnostics.insert("objects".to_string(), self.heap.objects.len().to_string());
        diagnostics.insert("live_objects".to_string(), self.live_object_count().to_string());
        diagnostics.insert("live_bytes".to_string(), self.total_live_bytes().to_string());
        diagnostics.insert("roots".to_string(), self.heap.roots.len().to_string());
        diagnostics.insert(
            "remembered_sources".to_string(),
            self.heap.remembered.len().to_string(),
        );
        diagnostics.insert("weak_handles".to_string(), self.weak.len().to_string());
        diagnostics.insert(
            "weak_handles_alive".to_string(),
            self.weak.alive_count().to_string(),
        );
        diagnostics.insert(
            "finalizers_run".to_string(),
            self.finalization.total_run().to_string(),
        );

        for generation in Generation::ALL {
            let space = self.store.space(generation);
            diagnostics.insert(
                format!("{}_budget", generation.to_string().to_lowercase()),
                format!("{}/{}", space.since_collection, space.budget),
            );
        }

        let (free_bytes, free_ranges) = self.store.large_space().free_range_stats();
        diagnostics.insert(
            "large_object_space".to_string(),
            format!(
                "{} bytes in {} objects, {} free bytes in {} ranges",
                self.store.large_space().occupied(),
                self.store.large_space().object_count(),
                free_bytes,
                free_ranges
            ),
        );
        diagnostics.insert(
            "bytes_compacted_total".to_string(),
            self.compactor.total_bytes_moved().to_string(),
        );

        diagnostics
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Collector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collector")
            .field("cycle", &self.cycle)
            .field("objects", &self.heap.objects.len())
            .field("latency_mode", &self.latency.mode())
            .field("finalization", &self.finalization)
            .finish()
    }
}
