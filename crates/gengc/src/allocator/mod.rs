//! Allocator Module - Placement and Generation Accounting
//!
//! ## Size Classes
//!
//! - Small: below `LARGE_OBJECT_THRESHOLD` (bump placement at the end of
//!   the Gen0 segment)
//! - Large: at or above the threshold (first-fit placement in the
//!   large-object space, Gen2)

pub mod generational;
pub mod large;

pub use generational::{BudgetTrigger, GenerationSpace, GenerationStore};
pub use large::LargeObjectSpace;
