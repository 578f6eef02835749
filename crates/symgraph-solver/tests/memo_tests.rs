use super::*;
use crate::fixtures::CoreLib;

#[test]
fn test_is_memoized_agrees_with_is() {
    let core = CoreLib::new();
    let checker = CompatChecker::new(&core.table);
    let _scopes = open_scopes();

    for (source, target) in [
        (core.int32, core.object),
        (core.object, core.int32),
        (core.int32, core.nullable_int32),
        (core.ienumerable_int32, core.ienumerable),
    ] {
        let expected = checker.is(source, target);
        assert_eq!(checker.is_memoized(source, target), expected);
        assert_eq!(checker.is_memoized(source, target), expected);
    }
}

#[test]
fn test_is_memoized_answers_from_cache() {
    let core = CoreLib::new();
    let checker = CompatChecker::new(&core.table);
    let _scopes = open_scopes();

    let key = CompatKey {
        graph: core.table.graph_id(),
        options: checker.fingerprint(),
        source: core.int32,
        target: core.object,
    };
    CompatCache::shared().get_or_add(key, |_| Ok(false));

    assert_eq!(checker.is(core.int32, core.object), Ok(true));
    assert_eq!(checker.is_memoized(core.int32, core.object), Ok(false));
}

#[test]
fn test_checker_options_key_separately() {
    let core = CoreLib::new();
    let plain = CompatChecker::new(&core.table);
    let options = symgraph_common::EngineOptions {
        nullable_wrapper: None,
        ..Default::default()
    };
    let no_lift = CompatChecker::with_options(&core.table, &options).unwrap();
    let _scopes = open_scopes();

    assert_eq!(plain.is_memoized(core.int32, core.nullable_int32), Ok(true));
    assert_eq!(no_lift.is_memoized(core.int32, core.nullable_int32), Ok(false));
}

#[test]
fn test_graphs_do_not_share_answers() {
    let first = CoreLib::new();
    let mut second = CoreLib::new();
    // `a` only exists in the second graph.
    let a = second.class("N.A", None);
    let _scopes = open_scopes();

    let checker = CompatChecker::new(&first.table);
    assert!(checker.is_memoized(first.int32, first.object).unwrap());
    let other = CompatChecker::new(&second.table);
    assert!(other.is_memoized(a, second.object).unwrap());
    assert!(matches!(
        checker.is_memoized(a, first.object),
        Err(crate::error::ResolveError::UnknownType(_))
    ));
}

#[test]
fn test_member_lookups_memoized() {
    let mut core = CoreLib::new();
    let base = core.class("N.Base", None);
    let derived = core.class("N.Derived", Some(base));
    core.member(base, MemberKind::Method, "Run");
    let nearest = core.member(derived, MemberKind::Method, "Run");
    let resolver = MemberResolver::new(&core.table);
    let _scopes = open_scopes();

    for _ in 0..2 {
        assert_eq!(
            resolver.find_single_memoized(derived, MemberKind::Method, "Run"),
            Ok(MemberLookup::Ambiguous)
        );
        assert_eq!(
            resolver.find_first_memoized(derived, MemberKind::Method, "Run"),
            Ok(MemberLookup::Found(nearest))
        );
    }

    let key = MemberKey {
        graph: core.table.graph_id(),
        ty: derived,
        kind: MemberKind::Method,
        name: Arc::from("Run"),
        mode: LookupMode::First,
    };
    assert_eq!(
        MemberCache::shared().get(&key),
        Some(Ok(MemberLookup::Found(nearest)))
    );
}

#[test]
fn test_memoized_errors_match_plain_errors() {
    let mut core = CoreLib::new();
    let foo = core.class("N.Foo", None);
    let resolver = MemberResolver::new(&core.table);
    let _scopes = open_scopes();

    assert_eq!(
        resolver.find_single_memoized(foo, MemberKind::Field, ""),
        Err(crate::error::ResolveError::EmptyMemberName)
    );
}
