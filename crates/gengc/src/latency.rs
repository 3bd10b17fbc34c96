//! Latency Module - Implicit Collection Policy
//!
//! The latency mode caps the level of collections an allocation may trigger.
//! Explicit `collect` calls are never gated.
//!
//! | Mode                  | Highest implicit level |
//! |-----------------------|------------------------|
//! | `Batch`               | 2                      |
//! | `Interactive`         | 2                      |
//! | `SustainedLowLatency` | 1                      |
//! | `LowLatency`          | 0                      |
//! | `NoCollectionRegion`  | none                   |
//!
//! `NoCollectionRegion` suppresses every implicit collection, Gen0 included,
//! not only those of level 1 and above as `LowLatency` does. A region is a
//! promise that nothing collects until it ends: an allocation that goes over
//! a generation budget inside a region records a deferred `BudgetExceeded`
//! event (no level) and proceeds without collecting.
//!
//! A no-collection region may carry a byte budget. Allocations that would
//! push the bytes allocated inside the region past that budget are rejected
//! rather than collected for.

use crate::error::{GcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collector latency mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LatencyMode {
    /// Throughput first; all implicit collections allowed
    Batch,
    /// Default mode; all implicit collections allowed
    #[default]
    Interactive,
    /// Only Gen0 collections may be triggered implicitly
    LowLatency,
    /// Blocking Gen2 collections are deferred
    SustainedLowLatency,
    /// No implicit collections at all
    NoCollectionRegion,
}

impl LatencyMode {
    /// Highest level an allocation may trigger in this mode
    pub fn max_implicit_level(self) -> Option<u8> {
        match self {
            LatencyMode::Batch | LatencyMode::Interactive => Some(2),
            LatencyMode::SustainedLowLatency => Some(1),
            LatencyMode::LowLatency => Some(0),
            LatencyMode::NoCollectionRegion => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LatencyMode::Batch => "batch",
            LatencyMode::Interactive => "interactive",
            LatencyMode::LowLatency => "low-latency",
            LatencyMode::SustainedLowLatency => "sustained-low-latency",
            LatencyMode::NoCollectionRegion => "no-collection-region",
        }
    }
}

impl fmt::Display for LatencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatencyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "batch" => Ok(LatencyMode::Batch),
            "interactive" => Ok(LatencyMode::Interactive),
            "low-latency" | "lowlatency" => Ok(LatencyMode::LowLatency),
            "sustained-low-latency" | "sustainedlowlatency" => {
                Ok(LatencyMode::SustainedLowLatency)
            }
            "no-collection-region" | "nocollectionregion" => Ok(LatencyMode::NoCollectionRegion),
            _ => Err(format!("unknown latency mode '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    budget: Option<usize>,
    allocated: usize,
    previous: LatencyMode,
}

/// LatencyPolicy - current mode plus the active no-collection region
#[derive(Debug, Clone)]
pub struct LatencyPolicy {
    mode: LatencyMode,
    region: Option<Region>,
}

impl LatencyPolicy {
    /// Policy starting in `mode`
    ///
    /// Starting in `NoCollectionRegion` opens an unbudgeted region that
    /// `end_region` returns to `Interactive`.
    pub fn new(mode: LatencyMode) -> Self {
        let region = (mode == LatencyMode::NoCollectionRegion).then_some(Region {
            budget: None,
            allocated: 0,
            previous: LatencyMode::Interactive,
        });
        Self { mode, region }
    }

    pub fn mode(&self) -> LatencyMode {
        self.mode
    }

    pub fn in_region(&self) -> bool {
        self.region.is_some()
    }

    /// Switch modes, returning the previous one
    ///
    /// Entering `NoCollectionRegion` this way opens a region without a byte
    /// budget. Leaving it for another mode closes the active region.
    pub fn set_mode(&mut self, mode: LatencyMode) -> LatencyMode {
        let previous = self.mode;
        if mode == LatencyMode::NoCollectionRegion {
            if self.region.is_none() {
                self.region = Some(Region {
                    budget: None,
                    allocated: 0,
                    previous,
                });
            }
        } else {
            self.region = None;
        }
        self.mode = mode;
        previous
    }

    /// Enter a no-collection region with a byte budget
    pub fn start_region(&mut self, total_bytes: usize) -> Result<()> {
        if total_bytes == 0 {
            return Err(GcError::InvalidSize { size: total_bytes });
        }
        if self.region.is_some() {
            return Err(GcError::InvalidState {
                expected: "no active no-collection region".to_string(),
                actual: "no-collection region already active".to_string(),
            });
        }
        self.region = Some(Region {
            budget: Some(total_bytes),
            allocated: 0,
            previous: self.mode,
        });
        self.mode = LatencyMode::NoCollectionRegion;
        Ok(())
    }

    /// Leave the active region, returning the restored mode
    pub fn end_region(&mut self) -> Result<LatencyMode> {
        let region = self.region.take().ok_or_else(|| GcError::InvalidState {
            expected: "active no-collection region".to_string(),
            actual: format!("latency mode {}", self.mode),
        })?;
        self.mode = region.previous;
        Ok(self.mode)
    }

    /// Highest level an allocation may trigger right now
    pub fn max_implicit_level(&self) -> Option<u8> {
        self.mode.max_implicit_level()
    }

    /// Reject `size` if it would overrun the region budget
    pub fn check_allocation(&self, size: usize) -> Result<()> {
        if let Some(Region {
            budget: Some(budget),
            allocated,
            ..
        }) = self.region
        {
            let remaining = budget.saturating_sub(allocated);
            if size > remaining {
                return Err(GcError::BudgetExceeded {
                    requested: size,
                    remaining,
                });
            }
        }
        Ok(())
    }

    pub fn record_allocation(&mut self, size: usize) {
        if let Some(region) = self.region.as_mut() {
            region.allocated = region.allocated.saturating_add(size);
        }
    }

    /// Bytes still available in a budgeted region
    pub fn region_remaining(&self) -> Option<usize> {
        self.region
            .and_then(|r| r.budget.map(|budget| budget.saturating_sub(r.allocated)))
    }
}

impl Default for LatencyPolicy {
    fn default() -> Self {
        Self::new(LatencyMode::default())
    }
}
