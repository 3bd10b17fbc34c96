//! Generation Tests - Placement, Promotion, Counters and Compaction
//!
//! These tests verify that:
//! - Small objects are born in Gen0 and large objects in Gen2
//! - Survivors move up exactly one generation per covering collection
//! - Collection counters follow the levels that were collected
//! - Segments are compacted and the large-object space reuses freed ranges
//!
//! ============================================================================
//! EACH TEST FINDS SPECIFIC GENERATIONAL BUGS - DO NOT WEAKEN ASSERTIONS
//! ============================================================================

mod common;

use common::{assert_alive, assert_reclaimed, GcFixture, LARGE, SMALL};
use gengc::{GcConfig, GcEvent, Generation};

/// ============================================================================
/// PLACEMENT TESTS
/// ============================================================================

/// Test that the large-object threshold is inclusive
///
/// **Bug this finds:** off-by-one at the large-object boundary
#[test]
fn test_large_object_threshold_boundary() {
    let mut fixture = GcFixture::with_defaults();
    assert_eq!(gengc::LARGE_OBJECT_THRESHOLD, 85_000);

    let below = fixture.allocate(84_999);
    let at = fixture.allocate(85_000);

    assert_eq!(fixture.generation(below), Generation::Gen0);
    assert_eq!(fixture.generation(at), Generation::Gen2);
    assert!(fixture.gc.object_info(at).unwrap().large);
    assert!(!fixture.gc.object_info(below).unwrap().large);
}

/// Test that allocation counters follow placement
///
/// **Bug this finds:** large objects counted as Gen0 allocations
#[test]
fn test_allocation_counts_by_generation() {
    let mut fixture = GcFixture::with_defaults();
    fixture.allocate(SMALL);
    fixture.allocate(SMALL);
    fixture.allocate(LARGE);

    assert_eq!(fixture.gc.allocation_count(Generation::Gen0), 2);
    assert_eq!(fixture.gc.allocation_count(Generation::Gen1), 0);
    assert_eq!(fixture.gc.allocation_count(Generation::Gen2), 1);
    assert_eq!(fixture.gc.total_live_bytes(), 2 * SMALL + LARGE);
    assert_eq!(fixture.gc.live_object_count(), 3);
}

/// ============================================================================
/// PROMOTION TESTS
/// ============================================================================

/// Test the promotion path of a rooted small object
///
/// **Bug this finds:** skipped generations, promotion out of Gen2
#[test]
fn test_small_object_promotion_path() {
    let mut fixture = GcFixture::with_defaults();
    let a = fixture.allocate_rooted(SMALL);
    assert_eq!(fixture.generation(a), Generation::Gen0);

    fixture.collect(0);
    assert_eq!(fixture.generation(a), Generation::Gen1);

    fixture.collect(1);
    assert_eq!(fixture.generation(a), Generation::Gen2);

    fixture.collect(2);
    assert_eq!(fixture.generation(a), Generation::Gen2);
    assert_eq!(fixture.counters(), [3, 2, 1]);
}

/// Test that a large object starts and stays in Gen2 without moving
///
/// **Bug this finds:** large objects compacted or promoted
#[test]
fn test_large_object_stays_in_gen2() {
    let mut fixture = GcFixture::with_defaults();
    let big = fixture.allocate_rooted(LARGE);
    let offset = fixture.gc.object_info(big).unwrap().offset;

    fixture.collect(2);
    fixture.collect(2);

    assert_eq!(fixture.generation(big), Generation::Gen2);
    assert_eq!(fixture.gc.object_info(big).unwrap().offset, offset);
}

/// Test that a partial collection leaves older generations untouched
///
/// **Bug this finds:** Gen1 objects promoted by a Gen0 collection
#[test]
fn test_partial_collection_does_not_age_older_objects() {
    let mut fixture = GcFixture::with_defaults();
    let a = fixture.allocate_rooted(SMALL);
    fixture.collect(0);
    assert_eq!(fixture.generation(a), Generation::Gen1);

    fixture.collect(0);
    fixture.collect(0);
    assert_eq!(fixture.generation(a), Generation::Gen1);
    assert_eq!(fixture.gc.object_info(a).unwrap().survival_count, 0);
}

/// Test a promotion threshold above one
///
/// **Bug this finds:** survival count ignored or not reset on promotion
#[test]
fn test_promotion_threshold_requires_repeated_survival() {
    let mut fixture = GcFixture::with_config(GcConfig {
        promotion_thresholds: [2, 1],
        ..Default::default()
    });
    let a = fixture.allocate_rooted(SMALL);

    fixture.collect(0);
    assert_eq!(fixture.generation(a), Generation::Gen0);
    assert_eq!(fixture.gc.object_info(a).unwrap().survival_count, 1);

    fixture.collect(0);
    assert_eq!(fixture.generation(a), Generation::Gen1);
    assert_eq!(fixture.gc.object_info(a).unwrap().survival_count, 0);
}

/// Test that promotions are reported and logged
///
/// **Bug this finds:** promotion counters out of sync with the heap
#[test]
fn test_promotion_report_and_events() {
    let mut fixture = GcFixture::with_defaults();
    let a = fixture.allocate_rooted(SMALL);
    let b = fixture.allocate(2 * SMALL);
    fixture.link(a, b);
    let garbage = fixture.allocate(SMALL);

    let report = fixture.gc.collect(0).unwrap();
    assert_eq!(report.objects_promoted, 2);
    assert_eq!(report.bytes_promoted, 3 * SMALL);
    assert_eq!(report.objects_reclaimed, 1);
    assert_reclaimed(&fixture.gc, garbage, "unreachable Gen0 object");

    let promoted = fixture.events_matching(|e| matches!(e, GcEvent::Promotion { .. }));
    assert_eq!(
        promoted,
        vec![
            GcEvent::Promotion {
                cycle: 1,
                object: a,
                from: Generation::Gen0,
                to: Generation::Gen1,
            },
            GcEvent::Promotion {
                cycle: 1,
                object: b,
                from: Generation::Gen0,
                to: Generation::Gen1,
            },
        ]
    );
}

/// ============================================================================
/// COUNTER TESTS
/// ============================================================================

/// Test that counters are incremented for every covered generation
///
/// **Bug this finds:** a level-L collection counted only once
#[test]
fn test_collection_counter_scope() {
    let mut fixture = GcFixture::with_defaults();
    assert_eq!(fixture.counters(), [0, 0, 0]);

    fixture.collect(0);
    assert_eq!(fixture.counters(), [1, 0, 0]);

    fixture.collect(1);
    assert_eq!(fixture.counters(), [2, 1, 0]);
    assert_eq!(fixture.gc.large_object_collection_count(), 0);

    fixture.collect(2);
    assert_eq!(fixture.counters(), [3, 2, 1]);
    assert_eq!(fixture.gc.large_object_collection_count(), 1);
}

/// Test that a forced `total_memory` runs a full collection
///
/// **Bug this finds:** total_memory(true) skipping the collection
#[test]
fn test_total_memory_forced_collection() {
    let mut fixture = GcFixture::with_defaults();
    fixture.allocate_rooted(SMALL);
    fixture.allocate(SMALL);

    assert_eq!(fixture.gc.total_memory(false), 2 * SMALL);
    assert_eq!(fixture.counters(), [0, 0, 0]);

    assert_eq!(fixture.gc.total_memory(true), SMALL);
    assert_eq!(fixture.counters(), [1, 1, 1]);
    assert_eq!(fixture.gc.large_object_collection_count(), 1);
}

/// ============================================================================
/// COMPACTION TESTS
/// ============================================================================

/// Test that survivors slide down over reclaimed space
///
/// **Bug this finds:** holes left in a collected segment
#[test]
fn test_gen0_compaction_closes_holes() {
    let mut fixture = GcFixture::with_config(GcConfig {
        promotion_thresholds: [3, 3],
        ..Default::default()
    });
    let a = fixture.allocate_rooted(100);
    let _hole = fixture.allocate(200);
    let c = fixture.allocate_rooted(300);
    assert_eq!(fixture.gc.object_info(c).unwrap().offset, 300);

    let report = fixture.gc.collect(0).unwrap();

    assert_eq!(report.objects_compacted, 1);
    assert_eq!(report.bytes_compacted, 300);
    assert_eq!(fixture.gc.object_info(a).unwrap().offset, 0);
    assert_eq!(fixture.gc.object_info(c).unwrap().offset, 100);
    assert_eq!(fixture.gc.stats().generation(Generation::Gen0).segment_extent, 400);
}

/// Test that promoted objects are packed into the next segment
///
/// **Bug this finds:** promotion placing objects at overlapping offsets
#[test]
fn test_promoted_objects_are_contiguous() {
    let mut fixture = GcFixture::with_defaults();
    let a = fixture.allocate_rooted(100);
    fixture.allocate(200);
    let c = fixture.allocate_rooted(300);

    fixture.collect(0);

    assert_eq!(fixture.gc.object_info(a).unwrap().offset, 0);
    assert_eq!(fixture.gc.object_info(c).unwrap().offset, 100);
    let stats = fixture.gc.stats();
    assert_eq!(stats.generation(Generation::Gen1).segment_extent, 400);
    assert_eq!(stats.generation(Generation::Gen0).segment_extent, 0);
}

/// Test that the large-object space reuses a freed range first-fit
///
/// **Bug this finds:** freed large ranges leaked
#[test]
fn test_large_object_space_reuses_freed_range() {
    let mut fixture = GcFixture::with_defaults();
    let first = fixture.allocate(LARGE);
    let second = fixture.allocate_rooted(LARGE);
    assert_eq!(fixture.gc.object_info(first).unwrap().offset, 0);
    assert_eq!(fixture.gc.object_info(second).unwrap().offset, LARGE);

    let report = fixture.gc.collect(2).unwrap();
    assert_eq!(report.large_objects_reclaimed, 1);
    assert_reclaimed(&fixture.gc, first, "unrooted large object");
    assert_alive(&fixture.gc, second, "rooted large object");

    let third = fixture.allocate(LARGE);
    assert_eq!(fixture.gc.object_info(third).unwrap().offset, 0);
}

/// Test that only a level-2 collection reclaims large objects
///
/// **Bug this finds:** Gen2 objects swept by a partial collection
#[test]
fn test_large_objects_survive_partial_collections() {
    let mut fixture = GcFixture::with_defaults();
    let big = fixture.allocate(LARGE);

    fixture.collect(0);
    fixture.collect(1);
    assert_alive(&fixture.gc, big, "large object after partial collections");

    fixture.collect(2);
    assert_reclaimed(&fixture.gc, big, "large object after full collection");
}
