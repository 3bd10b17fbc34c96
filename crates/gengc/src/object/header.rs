//! Object Header - Per-Object Metadata
//!
//! Every allocation is described by an `ObjectRecord`: identity, size,
//! generation tag, large-object flag, outgoing edges, finalization state,
//! survival count and its logical position inside its segment.
//!
//! ```text
//! ObjectRecord
//! ┌──────────┬──────┬────────────┬───────┬──────────────┬──────────┬────────┐
//! │ ObjectId │ size │ generation │ large │ finalization │ survived │ offset │
//! └──────────┴──────┴────────────┴───────┴──────────────┴──────────┴────────┘
//!      │
//!      └── edges: IndexSet<ObjectId> (insertion ordered, deterministic)
//! ```
//!
//! Only the collector writes `generation`, `survival_count`, `offset` and
//! `finalization`. Callers change `edges` through the heap primitives.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a managed object
///
/// Identities are handed out from a monotonically increasing counter and are
/// never reused, so a stale `ObjectId` can never alias a newer object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    #[inline]
    pub(crate) fn from_usize(idx: usize) -> Self {
        assert!(idx <= u32::MAX as usize, "object identity space exhausted");
        ObjectId(idx as u32)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Highest generation number
pub const MAX_GENERATION: u8 = 2;

/// Age-based partition of the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    /// Youngest generation, where small objects are born
    Gen0,
    /// Objects that survived a Gen0 collection
    Gen1,
    /// Long-lived objects and the large-object space
    Gen2,
}

impl Generation {
    /// All generations, youngest first
    pub const ALL: [Generation; 3] = [Generation::Gen0, Generation::Gen1, Generation::Gen2];

    /// Numeric level (0, 1, 2)
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            Generation::Gen0 => 0,
            Generation::Gen1 => 1,
            Generation::Gen2 => 2,
        }
    }

    /// Index into per-generation arrays
    #[inline]
    pub fn index(self) -> usize {
        self.level() as usize
    }

    /// Generation for a numeric level, if the level exists
    pub fn from_level(level: u8) -> Option<Generation> {
        match level {
            0 => Some(Generation::Gen0),
            1 => Some(Generation::Gen1),
            2 => Some(Generation::Gen2),
            _ => None,
        }
    }

    /// Generation an object is promoted into; Gen2 is terminal
    pub fn next(self) -> Option<Generation> {
        match self {
            Generation::Gen0 => Some(Generation::Gen1),
            Generation::Gen1 => Some(Generation::Gen2),
            Generation::Gen2 => None,
        }
    }

    /// Whether a collection at `level` covers this generation
    #[inline]
    pub fn is_collected_at(self, level: u8) -> bool {
        self.level() <= level
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gen{}", self.level())
    }
}

/// Finalization lifecycle of a single object
///
/// | state       | has finalizer | finalized |
/// |-------------|---------------|-----------|
/// | `None`      | no            | no        |
/// | `Armed`     | yes           | no        |
/// | `Pending`   | yes           | pending   |
/// | `Finalized` | yes           | yes       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinalizationState {
    /// No finalizer registered, or finalization suppressed
    None,
    /// Finalizer runs the first time the object is found unreachable
    Armed,
    /// Queued for the drain step of the current collection
    Pending,
    /// Finalizer has run; reclaimed on the next covering collection unless
    /// the object was resurrected
    Finalized,
}

impl FinalizationState {
    pub fn has_finalizer(self) -> bool {
        !matches!(self, FinalizationState::None)
    }

    pub fn is_finalized(self) -> bool {
        matches!(self, FinalizationState::Finalized)
    }
}

/// Metadata and edges of one managed object
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    pub(crate) id: ObjectId,
    pub(crate) size: usize,
    pub(crate) generation: Generation,
    pub(crate) large: bool,
    pub(crate) edges: IndexSet<ObjectId>,
    pub(crate) finalization: FinalizationState,
    pub(crate) survival_count: u32,
    pub(crate) offset: usize,
}

impl ObjectRecord {
    /// Create a fresh record; large objects are born in Gen2
    pub(crate) fn new(id: ObjectId, size: usize, large: bool, finalizable: bool, offset: usize) -> Self {
        Self {
            id,
            size,
            generation: if large { Generation::Gen2 } else { Generation::Gen0 },
            large,
            edges: IndexSet::new(),
            finalization: if finalizable {
                FinalizationState::Armed
            } else {
                FinalizationState::None
            },
            survival_count: 0,
            offset,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_large(&self) -> bool {
        self.large
    }

    pub fn edges(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.edges.iter().copied()
    }

    pub fn finalization(&self) -> FinalizationState {
        self.finalization
    }

    pub fn survival_count(&self) -> u32 {
        self.survival_count
    }

    /// Logically dead: finalizer ran and nothing made it reachable again
    pub fn is_zombie(&self) -> bool {
        self.finalization.is_finalized()
    }

    /// Snapshot for callers
    pub fn info(&self) -> ObjectInfo {
        ObjectInfo {
            id: self.id,
            size: self.size,
            generation: self.generation,
            large: self.large,
            has_finalizer: self.finalization.has_finalizer(),
            finalization: self.finalization,
            survival_count: self.survival_count,
            offset: self.offset,
            reference_count: self.edges.len(),
        }
    }
}

/// Read-only view of an object, returned by `Collector::object_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub size: usize,
    pub generation: Generation,
    pub large: bool,
    pub has_finalizer: bool,
    pub finalization: FinalizationState,
    pub survival_count: u32,
    /// Position inside the generation segment (or large-object space)
    pub offset: usize,
    /// Number of outgoing edges
    pub reference_count: usize,
}
