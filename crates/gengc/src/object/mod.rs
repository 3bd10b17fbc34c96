//! Object Module - Object model
//!
//! Object records, the identity-stable object table, and weak handles.

pub mod header;
pub mod table;
pub mod weak;

pub use header::{
    FinalizationState, Generation, ObjectId, ObjectInfo, ObjectRecord, MAX_GENERATION,
};
pub use table::ObjectTable;
pub use weak::{WeakHandle, WeakHandleTable};
