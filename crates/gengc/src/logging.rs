//! GC Logging and Tracing
//!
//! Every collector decision worth explaining is described by a `GcEvent`.
//! Events are forwarded to the `log` facade (the embedding application picks
//! the logger) and kept in a bounded in-memory history that tests and tools
//! can inspect through `Collector::events`.
//!
//! Log Levels:
//! - WARN: Rejected allocations
//! - INFO: Collection cycles
//! - DEBUG: Phases, budget triggers, latency changes, weak-handle clearing
//! - TRACE: Per-object operations (promotion, finalizer runs, resurrection)

use crate::gc::{GcPhase, GcReason};
use crate::latency::LatencyMode;
use crate::object::{Generation, ObjectId};
use log::Level;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// GC event types
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GcEvent {
    /// Collection started
    CycleStart { cycle: u64, level: u8, reason: GcReason },

    /// Collection phase completed
    PhaseEnd {
        cycle: u64,
        phase: GcPhase,
        duration_ns: u64,
    },

    /// Collection completed
    CycleEnd {
        cycle: u64,
        level: u8,
        duration_ns: u64,
        objects_reclaimed: usize,
        bytes_reclaimed: usize,
    },

    /// Allocation pushed a generation past its budget
    BudgetExceeded {
        generation: Generation,
        allocated: usize,
        budget: usize,
        /// Level chosen for the implicit collection, if the latency mode
        /// permits one
        level: Option<u8>,
    },

    /// Object moved to an older generation
    Promotion {
        cycle: u64,
        object: ObjectId,
        from: Generation,
        to: Generation,
    },

    /// Unreachable object queued for finalization
    FinalizerQueued { cycle: u64, object: ObjectId },

    /// Finalizer ran
    FinalizerRun { cycle: u64, object: ObjectId },

    /// Finalized object found reachable again
    Resurrection { cycle: u64, object: ObjectId },

    /// Weak handles invalidated by a collection
    WeakHandlesCleared { cycle: u64, short: usize, long: usize },

    /// Latency mode switched
    LatencyModeChanged { from: LatencyMode, to: LatencyMode },

    /// Allocation refused before any state changed
    AllocationRejected { size: usize, reason: String },
}

impl GcEvent {
    /// Log level for event
    pub fn level(&self) -> Level {
        match self {
            GcEvent::AllocationRejected { .. } => Level::Warn,
            GcEvent::CycleStart { .. } | GcEvent::CycleEnd { .. } => Level::Info,
            GcEvent::PhaseEnd { .. }
            | GcEvent::BudgetExceeded { .. }
            | GcEvent::WeakHandlesCleared { .. }
            | GcEvent::LatencyModeChanged { .. } => Level::Debug,
            GcEvent::Promotion { .. }
            | GcEvent::FinalizerQueued { .. }
            | GcEvent::FinalizerRun { .. }
            | GcEvent::Resurrection { .. } => Level::Trace,
        }
    }

    /// Event as a JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for GcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcEvent::CycleStart { cycle, level, reason } => {
                write!(f, "[GC] Cycle {} started (level {}, reason: {})", cycle, level, reason)
            },
            GcEvent::PhaseEnd {
                cycle,
                phase,
                duration_ns,
            } => write!(f, "[GC] Cycle {}: {} phase completed ({} ns)", cycle, phase, duration_ns),
            GcEvent::CycleEnd {
                cycle,
                level,
                duration_ns,
                objects_reclaimed,
                bytes_reclaimed,
            } => write!(
                f,
                "[GC] Cycle {} completed (level {}, {} ns, reclaimed {} objects / {} bytes)",
                cycle, level, duration_ns, objects_reclaimed, bytes_reclaimed
            ),
            GcEvent::BudgetExceeded {
                generation,
                allocated,
                budget,
                level,
            } => match level {
                Some(level) => write!(
                    f,
                    "[GC] {} budget exceeded ({}/{} bytes), collecting level {}",
                    generation, allocated, budget, level
                ),
                None => write!(
                    f,
                    "[GC] {} budget exceeded ({}/{} bytes), collection deferred by latency mode",
                    generation, allocated, budget
                ),
            },
            GcEvent::Promotion {
                cycle,
                object,
                from,
                to,
            } => write!(f, "[GC] Cycle {}: promoted {} {} -> {}", cycle, object, from, to),
            GcEvent::FinalizerQueued { cycle, object } => {
                write!(f, "[GC] Cycle {}: queued {} for finalization", cycle, object)
            },
            GcEvent::FinalizerRun { cycle, object } => {
                write!(f, "[GC] Cycle {}: finalized {}", cycle, object)
            },
            GcEvent::Resurrection { cycle, object } => {
                write!(f, "[GC] Cycle {}: resurrected {}", cycle, object)
            },
            GcEvent::WeakHandlesCleared { cycle, short, long } => write!(
                f,
                "[GC] Cycle {}: cleared {} short and {} long weak handles",
                cycle, short, long
            ),
            GcEvent::LatencyModeChanged { from, to } => {
                write!(f, "[GC] Latency mode {} -> {}", from, to)
            },
            GcEvent::AllocationRejected { size, reason } => {
                write!(f, "[GC] Allocation of {} bytes rejected: {}", size, reason)
            },
        }
    }
}

/// GcEventLog - bounded history of recent events
#[derive(Debug, Clone)]
pub struct GcEventLog {
    events: VecDeque<GcEvent>,
    capacity: usize,
    total: u64,
    enabled: bool,
}

impl GcEventLog {
    /// Create a log keeping the last `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            total: 0,
            enabled: true,
        }
    }

    /// Enable the in-memory history
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable the in-memory history; events still reach the `log` facade
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log a GC event
    pub fn record(&mut self, event: GcEvent) {
        log::log!(target: "gengc", event.level(), "{}", event);
        self.total += 1;

        if !self.enabled || self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Retained events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GcEvent> {
        self.events.iter()
    }

    /// Get event count
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded over the log's lifetime, including evicted ones
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for GcEventLog {
    fn default() -> Self {
        Self::new(64)
    }
}
