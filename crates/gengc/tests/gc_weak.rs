//! Weak Handle Tests
//!
//! These tests verify that:
//! - Weak handles never keep their target alive
//! - Short handles die when the target is found unreachable
//! - Long handles survive finalization and die on reclamation
//! - Dead handles stay dead and handles are never reused
//!
//! ============================================================================
//! EACH TEST FINDS SPECIFIC WEAK HANDLE BUGS - DO NOT WEAKEN ASSERTIONS
//! ============================================================================

mod common;

use common::{assert_reclaimed, finalizer_log, GcFixture, SMALL};
use gengc::{FinalizerContext, GcError, GcEvent, Generation, WeakHandle};

/// Test that a weak handle dies with its unreachable target
///
/// **Bug this finds:** weak handles treated as roots
#[test]
fn test_weak_handle_does_not_keep_target_alive() {
    let mut fixture = GcFixture::with_defaults();
    let x = fixture.allocate(SMALL);
    let w = fixture.gc.create_weak(x).unwrap();
    assert_eq!(fixture.gc.resolve(w), Ok(Some(x)));

    let report = fixture.gc.collect(0).unwrap();

    assert_reclaimed(&fixture.gc, x, "weakly referenced object");
    assert_eq!(fixture.gc.resolve(w), Ok(None));
    assert_eq!(report.short_weak_cleared, 1);
    assert_eq!(
        fixture.events_matching(|e| matches!(e, GcEvent::WeakHandlesCleared { .. })),
        vec![GcEvent::WeakHandlesCleared {
            cycle: 1,
            short: 1,
            long: 0
        }]
    );
}

/// Test that handles to live objects keep resolving across promotion
///
/// **Bug this finds:** handles tied to location instead of identity
#[test]
fn test_weak_handle_follows_live_object() {
    let mut fixture = GcFixture::with_defaults();
    let x = fixture.allocate_rooted(SMALL);
    let w = fixture.gc.create_weak(x).unwrap();

    fixture.collect(0);
    fixture.collect(1);

    assert_eq!(fixture.generation(x), Generation::Gen2);
    assert_eq!(fixture.gc.resolve(w), Ok(Some(x)));
}

/// Test that partial collections leave handles to older objects alone
///
/// **Bug this finds:** handles cleared for objects the collection never examined
#[test]
fn test_weak_handle_outside_collected_range() {
    let mut fixture = GcFixture::with_defaults();
    let x = fixture.allocate_rooted(SMALL);
    fixture.collect(0);
    fixture.gc.remove_root(x).unwrap();
    let w = fixture.gc.create_weak(x).unwrap();

    fixture.collect(0);
    assert_eq!(fixture.gc.resolve(w), Ok(Some(x)));

    fixture.collect(1);
    assert_eq!(fixture.gc.resolve(w), Ok(None));
}

/// Test short and long handles on a finalizable target
///
/// **Bug this finds:** long handles cleared before reclamation, short handles
/// surviving into finalization
#[test]
fn test_short_and_long_handles_with_finalization() {
    let mut fixture = GcFixture::with_defaults();
    let log = finalizer_log();
    let d = fixture.allocate_logged(SMALL, &log);
    let short = fixture.gc.create_weak(d).unwrap();
    let long = fixture.gc.create_weak_tracking_resurrection(d).unwrap();

    let report = fixture.gc.collect(0).unwrap();
    assert_eq!(*log.borrow(), vec![d]);
    assert_eq!(fixture.gc.resolve(short), Ok(None));
    assert_eq!(fixture.gc.resolve(long), Ok(Some(d)));
    assert_eq!(report.short_weak_cleared, 1);
    assert_eq!(report.long_weak_cleared, 0);

    let report = fixture.gc.collect(0).unwrap();
    assert_eq!(fixture.gc.resolve(long), Ok(None));
    assert_eq!(report.long_weak_cleared, 1);
}

/// Test that a dead short handle stays dead when its target is resurrected
///
/// **Bug this finds:** handles revived by resurrection
#[test]
fn test_dead_handle_stays_dead_after_resurrection() {
    let mut fixture = GcFixture::with_defaults();
    let phoenix = fixture
        .gc
        .allocate_with_finalizer(SMALL, |ctx: &mut FinalizerContext<'_>| {
            let me = ctx.object();
            ctx.add_root(me).unwrap();
        })
        .unwrap();
    let short = fixture.gc.create_weak(phoenix).unwrap();
    let long = fixture.gc.create_weak_tracking_resurrection(phoenix).unwrap();

    fixture.collect(0);
    fixture.collect(0);

    assert!(fixture.gc.contains(phoenix));
    assert_eq!(fixture.gc.resolve(short), Ok(None));
    assert_eq!(fixture.gc.resolve(long), Ok(Some(phoenix)));

    let fresh = fixture.gc.create_weak(phoenix).unwrap();
    assert_ne!(fresh, short);
    assert_eq!(fixture.gc.resolve(fresh), Ok(Some(phoenix)));
}

/// Test that unknown handles are rejected
///
/// **Bug this finds:** out-of-range handles resolving to arbitrary objects
#[test]
fn test_unknown_weak_handle() {
    let mut fixture = GcFixture::with_defaults();
    let x = fixture.allocate(SMALL);
    let w = fixture.gc.create_weak(x).unwrap();
    let unknown = WeakHandle(w.0 + 100);

    assert_eq!(
        fixture.gc.resolve(unknown),
        Err(GcError::UnknownWeakHandle { handle: unknown })
    );
}

/// Test that handles are issued fresh every time
///
/// **Bug this finds:** handle slots recycled after their target died
#[test]
fn test_handles_never_reused() {
    let mut fixture = GcFixture::with_defaults();
    let x = fixture.allocate(SMALL);
    let first = fixture.gc.create_weak(x).unwrap();
    fixture.collect(0);

    let y = fixture.allocate(SMALL);
    let second = fixture.gc.create_weak(y).unwrap();

    assert_ne!(first, second);
    assert_eq!(fixture.gc.resolve(first), Ok(None));
    assert_eq!(fixture.gc.resolve(second), Ok(Some(y)));
    assert_eq!(fixture.gc.diagnostics().get("weak_handles").map(String::as_str), Some("2"));
    assert_eq!(
        fixture.gc.diagnostics().get("weak_handles_alive").map(String::as_str),
        Some("1")
    );
}
