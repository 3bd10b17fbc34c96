//! # gengc - Deterministic Generational Garbage Collector
//!
//! gengc is an in-process model of a generational mark-and-compact garbage
//! collector. Objects are identified by stable ids, references are explicit
//! edges, and every collection runs synchronously on the calling thread, so
//! the same sequence of calls always produces the same heap.
//!
//! ## Overview
//!
//! - **Generations**: objects are born in Gen0 and promoted to Gen1 and Gen2
//!   after surviving collections
//! - **Large-object space**: allocations of 85,000 bytes or more go straight
//!   to Gen2 and are never moved
//! - **Compaction**: collected segments are packed after every collection
//! - **Weak handles**: short handles die when their target is found
//!   unreachable; long handles survive finalization
//! - **Finalization**: objects with finalizers get one callback before they
//!   are reclaimed, and may be resurrected by it
//! - **Latency modes**: cap or suppress the collections allocations trigger
//!
//! ## Quick Start
//!
//! ```rust
//! use gengc::{Collector, Generation};
//!
//! fn main() -> Result<(), gengc::GcError> {
//!     let mut gc = Collector::with_defaults();
//!
//!     // Small objects start in Gen0, large ones in Gen2
//!     let small = gc.allocate(1_000, false)?;
//!     let large = gc.allocate(90_000, false)?;
//!     assert_eq!(gc.generation_of(small), Some(Generation::Gen0));
//!     assert_eq!(gc.generation_of(large), Some(Generation::Gen2));
//!
//!     // Roots keep objects alive
//!     gc.add_root(small)?;
//!     gc.collect(2)?;
//!     assert!(gc.contains(small));
//!     assert!(!gc.contains(large));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        Collector                          │
//! │                                                           │
//! │  allocate ──► LatencyPolicy ──► GenerationStore (budgets) │
//! │                                        │                  │
//! │                                 implicit collect          │
//! │                                        ▼                  │
//! │  ┌─────────┐ ┌────────┐ ┌───────┐ ┌─────────┐ ┌────────┐  │
//! │  │  Mark   │►│  Weak  │►│ Sweep │►│ Promote │►│Compact │  │
//! │  └─────────┘ └────────┘ └───────┘ └─────────┘ └────────┘  │
//! │                                                   │       │
//! │                                    FinalizationQueue drain│
//! │                                                           │
//! │  Heap: ObjectTable + RootSet + RememberedSet              │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Collection Levels
//!
//! | Level | Generations collected | Counters incremented |
//! |-------|-----------------------|----------------------|
//! | 0     | Gen0                  | Gen0                 |
//! | 1     | Gen0, Gen1            | Gen0, Gen1           |
//! | 2     | all, large objects    | all + large objects  |
//!
//! ## Example: Finalization and Resurrection
//!
//! ```rust
//! use gengc::{Collector, FinalizerContext};
//!
//! let mut gc = Collector::with_defaults();
//! let phoenix = gc
//!     .allocate_with_finalizer(64, |ctx: &mut FinalizerContext<'_>| {
//!         let me = ctx.object();
//!         ctx.add_root(me).unwrap();
//!     })
//!     .unwrap();
//!
//! gc.collect(2).unwrap();
//! // Finalized, then rooted again by its own finalizer
//! assert!(gc.contains(phoenix));
//! assert!(gc.is_root(phoenix));
//! ```
//!
//! ## Example: Latency Modes
//!
//! ```rust
//! use gengc::{Collector, GcError, LatencyMode};
//!
//! let mut gc = Collector::with_defaults();
//! gc.start_no_collection_region(4_096).unwrap();
//! gc.allocate(4_000, false).unwrap();
//! assert!(matches!(gc.allocate(200, false), Err(GcError::BudgetExceeded { .. })));
//! assert_eq!(gc.end_no_collection_region().unwrap(), LatencyMode::Interactive);
//! ```
//!
//! ## Logging
//!
//! gengc logs through the `log` facade under the `gengc` target. Install any
//! logger (for example `env_logger`) to see collection cycles at `info` and
//! per-object decisions at `trace`.

// Core GC modules
pub mod config;
pub mod error;
pub mod gc;

// Object model and memory accounting
pub mod allocator;
pub mod heap;
pub mod object;

// GC algorithm components
pub mod finalizer;
pub mod latency;
pub mod marker;
pub mod relocate;

// Monitoring
pub mod logging;
pub mod stats;

// Re-export main types for convenience
pub use config::{ConfigError, GcConfig, LARGE_OBJECT_THRESHOLD};
pub use error::{GcError, Result};
pub use finalizer::{Finalizer, FinalizerContext};
pub use gc::{Collector, GcPhase, GcReason};
pub use latency::LatencyMode;
pub use logging::GcEvent;
pub use object::{FinalizationState, Generation, ObjectId, ObjectInfo, WeakHandle, MAX_GENERATION};
pub use stats::{CollectionReport, GcStatsSnapshot};

/// gengc version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a collector from `GENGC_*` environment variables
///
/// # Examples
///
/// ```rust
/// let gc = gengc::from_env()?;
/// assert_eq!(gc.collection_count(gengc::Generation::Gen0), 0);
/// # Ok::<(), gengc::GcError>(())
/// ```
pub fn from_env() -> Result<Collector> {
    Collector::new(GcConfig::from_env())
}
