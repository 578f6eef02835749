use super::*;

#[test]
fn test_enter_leave_tracks_depth() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeRelation);
    assert!(guard.enter(1u32).is_entered());
    assert!(guard.enter(2u32).is_entered());
    assert_eq!(guard.depth(), 2);
    guard.leave(2);
    guard.leave(1);
    assert_eq!(guard.depth(), 0);
    assert_eq!(guard.iterations(), 2);
}

#[test]
fn test_reentering_key_is_cycle() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeRelation);
    assert!(guard.enter(7u32).is_entered());
    assert_eq!(guard.enter(7u32), RecursionResult::Cycle);
    assert!(!guard.is_exceeded());
    guard.leave(7);
}

#[test]
fn test_depth_limit_is_sticky() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::Custom {
        max_depth: 2,
        max_iterations: 100,
    });
    assert!(guard.enter(1u32).is_entered());
    assert!(guard.enter(2u32).is_entered());
    let denied = guard.enter(3u32);
    assert_eq!(denied, RecursionResult::DepthExceeded);
    assert!(denied.is_exceeded());
    guard.leave(2);
    guard.leave(1);
    assert!(guard.is_exceeded());
}

#[test]
fn test_iteration_limit() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::Custom {
        max_depth: 10,
        max_iterations: 2,
    });
    assert_eq!(guard.scope(1u32, |_| 1), Ok(1));
    assert_eq!(guard.scope(2u32, |_| 2), Ok(2));
    assert_eq!(guard.scope(3u32, |_| 3), Err(RecursionResult::IterationExceeded));
}

#[test]
fn test_scope_nests() {
    let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeRelation);
    let inner = guard.scope(1u32, |g| g.scope(1u32, |_| ()).unwrap_err());
    assert_eq!(inner, Ok(RecursionResult::Cycle));
    assert_eq!(guard.depth(), 0);
}
