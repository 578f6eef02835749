//! Queries from many threads must agree with the same queries run on one.

mod support;

use rayon::prelude::*;
use std::sync::{Arc, Barrier};
use support::world;
use symgraph::{
    AccessArena, AnalysisSession, CompatChecker, EngineOptions, MemberKind, MemberResolver,
    PathWalker, TypeId, walk_path,
};

#[test]
fn test_concurrent_is_matches_sequential() {
    let w = world();
    let checker = CompatChecker::new(&w.table);
    let types = [
        w.object, w.int32, w.int64, w.double, w.string, w.ienumerable, w.list_int32,
        w.nullable_int32, w.animal, w.dog, w.puppy, w.kennel,
    ];
    let pairs: Vec<(TypeId, TypeId)> = types
        .iter()
        .flat_map(|&a| types.iter().map(move |&b| (a, b)))
        .collect();

    let sequential: Vec<bool> = pairs
        .iter()
        .map(|&(a, b)| checker.is(a, b).unwrap())
        .collect();
    let parallel: Vec<bool> = pairs
        .par_iter()
        .map(|&(a, b)| checker.is(a, b).unwrap())
        .collect();
    assert_eq!(parallel, sequential);

    let session = AnalysisSession::open(&w.table, &EngineOptions::default()).unwrap();
    let memoized: Vec<bool> = (0..pairs.len() * 4)
        .into_par_iter()
        .map(|i| {
            let (a, b) = pairs[i % pairs.len()];
            session.is(a, b).unwrap()
        })
        .collect();
    for (i, answer) in memoized.iter().enumerate() {
        assert_eq!(*answer, sequential[i % sequential.len()]);
    }
}

#[test]
fn test_concurrent_member_lookups() {
    let w = world();
    let resolver = MemberResolver::new(&w.table);
    let queries = [
        (w.puppy, MemberKind::Method, "Speak"),
        (w.puppy, MemberKind::Property, "Name"),
        (w.dog, MemberKind::Field, "owner"),
        (w.list_int32, MemberKind::Property, "Count"),
        (w.kennel, MemberKind::Method, "Missing"),
    ];
    let expected: Vec<_> = queries
        .iter()
        .map(|&(ty, kind, name)| resolver.find_single_memoized(ty, kind, name).unwrap())
        .collect();

    let session = AnalysisSession::open(&w.table, &EngineOptions::default()).unwrap();
    let answers: Vec<_> = (0..200usize)
        .into_par_iter()
        .map(|i| {
            let (ty, kind, name) = queries[i % queries.len()];
            session.find_single_member(ty, kind, name).unwrap()
        })
        .collect();
    for (i, answer) in answers.iter().enumerate() {
        assert_eq!(*answer, expected[i % expected.len()]);
    }
}

#[test]
fn test_sessions_on_many_threads() {
    let w = Arc::new(world());
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let w = Arc::clone(&w);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                let session = AnalysisSession::open(&w.table, &EngineOptions::default()).unwrap();
                barrier.wait();
                let answer = session.is(w.puppy, w.animal).unwrap();
                barrier.wait();
                drop(session);
                answer
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_walker_pools_are_per_thread() {
    let mut arena = AccessArena::new();
    let this = arena.add_self_reference();
    let foo = arena.add_conditional_access(this, "foo");
    let inner = arena.add_member_access(foo, "Inner");
    let get = arena.add_invocation(Some(inner), "Get", &["int"], &[]);
    let arena = Arc::new(arena);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let arena = Arc::clone(&arena);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let walker = PathWalker::borrow(arena.as_ref(), get).unwrap();
                    assert_eq!(walker.to_path().to_string(), "foo.Inner");
                }
                PathWalker::pooled()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    assert_eq!(walk_path(arena.as_ref(), inner).unwrap().to_string(), "foo.Inner");
}
