use modorder::ResolveError;

#[test]
fn test_cycle_error_display() {
    let err = ResolveError::CycleDetected {
        module: "a".to_string(),
        path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "dependency cycle detected at module 'a': a -> b -> a"
    );
    assert_eq!(err.module(), "a");
}

#[test]
fn test_unknown_requested_display() {
    let err = ResolveError::UnknownModule {
        name: "ghost".to_string(),
        referrer: None,
    };
    assert_eq!(err.to_string(), "unknown module 'ghost' requested");
}

#[test]
fn test_unknown_dependency_display() {
    let err = ResolveError::UnknownModule {
        name: "ghost".to_string(),
        referrer: Some("app".to_string()),
    };
    assert_eq!(err.to_string(), "unknown module 'ghost' referenced by 'app'");
    assert_eq!(err.module(), "ghost");
}
