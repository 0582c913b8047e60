use playlistify::process::Process;

type TestProcess = Process<String, String>;

#[test]
fn test_default_is_unresolved() {
    let state = TestProcess::default();
    assert!(state.is_unresolved());
    assert!(!state.is_pending());
    assert!(!state.is_terminal());
    assert_eq!(state.progress(), 0.0);
    assert_eq!(state.status(), None);
}

#[test]
fn test_pending_clamps_progress() {
    assert_eq!(TestProcess::pending("a", -5.0).progress(), 0.0);
    assert_eq!(TestProcess::pending("a", 250.0).progress(), 100.0);
    assert_eq!(TestProcess::pending("a", 42.5).progress(), 42.5);
}

#[test]
fn test_advance_keeps_unspecified_fields() {
    let state = TestProcess::pending("Fetching", 10.0);

    let next = state.advance(None, Some(20.0));
    assert_eq!(next, TestProcess::pending("Fetching", 20.0));

    let next = next.advance(Some("Adding"), None);
    assert_eq!(next, TestProcess::pending("Adding", 20.0));
}

#[test]
fn test_advance_never_moves_backwards() {
    let state = TestProcess::pending("Adding", 60.0);

    let next = state.advance(None, Some(40.0));
    assert_eq!(next.progress(), 60.0);

    let next = next.advance(None, Some(120.0));
    assert_eq!(next.progress(), 100.0);
}

#[test]
fn test_advance_from_terminal_starts_pending() {
    let ready = TestProcess::Ready {
        value: "done".to_string(),
    };
    let next = ready.advance(Some("Creating playlist"), None);
    assert_eq!(next, TestProcess::pending("Creating playlist", 0.0));

    let unresolved = TestProcess::Unresolved;
    assert_eq!(
        unresolved.advance(None, Some(5.0)),
        TestProcess::pending("", 5.0)
    );
}

#[test]
fn test_terminal_accessors() {
    let ready = TestProcess::Ready {
        value: "playlist".to_string(),
    };
    assert!(ready.is_terminal());
    assert_eq!(ready.progress(), 100.0);
    assert_eq!(ready.as_ready(), Some(&"playlist".to_string()));
    assert_eq!(ready.as_errored(), None);

    let errored = TestProcess::Errored {
        error: "boom".to_string(),
    };
    assert!(errored.is_terminal());
    assert_eq!(errored.progress(), 0.0);
    assert_eq!(errored.as_errored(), Some(&"boom".to_string()));
    assert_eq!(errored.as_ready(), None);
}
