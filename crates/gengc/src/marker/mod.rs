//! Marker Module - Reachability Analysis
//!
//! The mark phase of a collection at `level`:
//!
//! 1. Push every root.
//! 2. For level < 2, push the younger referents of every remembered source
//!    living in an uncollected generation. Those sources are live by
//!    definition (their generation is not being collected).
//! 3. Drain the mark stack. An object outside the collected range is marked
//!    but not traced: anything younger it points at was already pushed in
//!    step 2.
//!
//! The same tracer is reused for the f-reachable pass, which keeps objects
//! referenced from finalization candidates alive for one more cycle.
//!
//! Cycles need no special treatment: a marked object is never pushed twice.

pub mod mark_set;
pub mod remembered;
pub mod roots;

pub use mark_set::MarkSet;
pub use remembered::RememberedSet;
pub use roots::RootSet;

use crate::object::{ObjectId, ObjectTable};

/// Counters produced by one mark pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkStats {
    /// Objects newly marked by this pass
    pub marked: usize,
    /// Edges inspected
    pub edges_scanned: usize,
}

/// Marker - depth-first tracer over the object table
pub struct Marker<'a> {
    objects: &'a ObjectTable,
    level: u8,
    stack: Vec<ObjectId>,
    stats: MarkStats,
}

impl<'a> Marker<'a> {
    pub fn new(objects: &'a ObjectTable, level: u8) -> Self {
        Self {
            objects,
            level,
            stack: Vec::new(),
            stats: MarkStats::default(),
        }
    }

    /// Strong marking from roots and remembered sources
    pub fn mark_from_roots(
        mut self,
        roots: &RootSet,
        remembered: &RememberedSet,
        marks: &mut MarkSet,
    ) -> MarkStats {
        self.stack.extend(roots.iter());

        if self.level < crate::object::MAX_GENERATION {
            for source in remembered.sources_above(self.level, self.objects) {
                marks.mark(source);
                if let Some(record) = self.objects.get(source) {
                    for target in record.edges() {
                        self.stats.edges_scanned += 1;
                        self.stack.push(target);
                    }
                }
            }
        }

        self.drain(marks, None);
        self.stats
    }

    /// Trace from `seeds` into `marks`, skipping objects already set in `skip`
    pub fn mark_from<I>(mut self, seeds: I, marks: &mut MarkSet, skip: &MarkSet) -> MarkStats
    where
        I: IntoIterator<Item = ObjectId>,
    {
        self.stack.extend(seeds);
        self.drain(marks, Some(skip));
        self.stats
    }

    fn drain(&mut self, marks: &mut MarkSet, skip: Option<&MarkSet>) {
        while let Some(id) = self.stack.pop() {
            if skip.map_or(false, |skip| skip.is_marked(id)) {
                continue;
            }
            let Some(record) = self.objects.get(id) else {
                debug_assert!(false, "mark reached missing {}", id);
                continue;
            };
            if !marks.mark(id) {
                continue;
            }
            self.stats.marked += 1;

            if !record.generation().is_collected_at(self.level) {
                continue;
            }
            for target in record.edges() {
                self.stats.edges_scanned += 1;
                self.stack.push(target);
            }
        }
    }
}
