//! Test Utilities for the gengc Test Suite
//!
//! Fixtures build collectors with known budgets and helpers keep the
//! scenario tests short. Assertions here are strict: a helper that panics
//! names the operation and the object involved.

#![allow(dead_code)]

use gengc::{
    Collector, FinalizerContext, GcConfig, GcEvent, Generation, LatencyMode, ObjectId,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Small-object size used by most scenarios
pub const SMALL: usize = 1_000;

/// Size just above the large-object threshold
pub const LARGE: usize = 90_000;

/// ============================================================================
/// GC FIXTURE
/// ============================================================================

/// Test fixture owning a collector
pub struct GcFixture {
    pub gc: Collector,
}

impl GcFixture {
    /// Fixture with the default configuration
    ///
    /// **Bug this finds:** default budgets triggering collections the
    /// scenario did not ask for
    pub fn with_defaults() -> Self {
        Self {
            gc: Collector::with_defaults(),
        }
    }

    /// Fixture with tiny budgets so a handful of allocations trigger
    /// implicit collections
    ///
    /// **Bug this finds:** budget accounting and implicit-collection bugs
    pub fn with_budgets(budgets: [usize; 3]) -> Self {
        Self::with_config(GcConfig {
            generation_budgets: budgets,
            ..Default::default()
        })
    }

    /// Fixture with a starting latency mode
    pub fn with_mode(mode: LatencyMode) -> Self {
        Self::with_config(GcConfig {
            latency_mode: mode,
            ..Default::default()
        })
    }

    pub fn with_config(config: GcConfig) -> Self {
        let gc = Collector::new(config).expect("fixture configuration should be valid");
        Self { gc }
    }

    /// Allocate an object without a finalizer
    ///
    /// **Bug this finds:** allocation failures on valid sizes
    pub fn allocate(&mut self, size: usize) -> ObjectId {
        self.gc
            .allocate(size, false)
            .unwrap_or_else(|e| panic!("allocation of {} bytes failed: {}", size, e))
    }

    /// Allocate and root an object
    pub fn allocate_rooted(&mut self, size: usize) -> ObjectId {
        let id = self.allocate(size);
        self.gc
            .add_root(id)
            .unwrap_or_else(|e| panic!("rooting {} failed: {}", id, e));
        id
    }

    /// Allocate a finalizable object whose finalizer appends its id to the
    /// returned log
    pub fn allocate_logged(&mut self, size: usize, log: &FinalizerLog) -> ObjectId {
        let log = Rc::clone(log);
        self.gc
            .allocate_with_finalizer(size, move |ctx: &mut FinalizerContext<'_>| {
                log.borrow_mut().push(ctx.object())
            })
            .unwrap_or_else(|e| panic!("finalizable allocation of {} bytes failed: {}", size, e))
    }

    /// Allocate a chain `head -> ... -> tail` of `len` objects
    pub fn allocate_chain(&mut self, len: usize, size: usize) -> Vec<ObjectId> {
        let chain: Vec<ObjectId> = (0..len).map(|_| self.allocate(size)).collect();
        for pair in chain.windows(2) {
            self.link(pair[0], pair[1]);
        }
        chain
    }

    /// Add `from -> to`
    pub fn link(&mut self, from: ObjectId, to: ObjectId) {
        self.gc
            .add_reference(from, to)
            .unwrap_or_else(|e| panic!("linking {} -> {} failed: {}", from, to, e));
    }

    /// Explicit collection at `level`
    pub fn collect(&mut self, level: u8) {
        self.gc
            .collect(level)
            .unwrap_or_else(|e| panic!("collect({}) failed: {}", level, e));
    }

    pub fn generation(&self, id: ObjectId) -> Generation {
        self.gc
            .generation_of(id)
            .unwrap_or_else(|| panic!("{} was reclaimed", id))
    }

    /// Collection counters for Gen0, Gen1, Gen2
    pub fn counters(&self) -> [u64; 3] {
        Generation::ALL.map(|g| self.gc.collection_count(g))
    }

    /// Events of one kind, in order
    pub fn events_matching<F>(&self, mut pred: F) -> Vec<GcEvent>
    where
        F: FnMut(&GcEvent) -> bool,
    {
        self.gc.events().filter(|e| pred(e)).cloned().collect()
    }
}

/// Shared log of finalized objects
pub type FinalizerLog = Rc<RefCell<Vec<ObjectId>>>;

pub fn finalizer_log() -> FinalizerLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// ============================================================================
/// ASSERTIONS
/// ============================================================================

/// Assert `id` is still held by the collector
///
/// **Bug this finds:** live objects reclaimed
pub fn assert_alive(gc: &Collector, id: ObjectId, context: &str) {
    assert!(gc.contains(id), "{}: {} was reclaimed", context, id);
}

/// Assert `id` was reclaimed
///
/// **Bug this finds:** garbage retained
pub fn assert_reclaimed(gc: &Collector, id: ObjectId, context: &str) {
    assert!(!gc.contains(id), "{}: {} was not reclaimed", context, id);
    assert_eq!(gc.generation_of(id), None, "{}: reclaimed {} has a generation", context, id);
}
