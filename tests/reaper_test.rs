mod helpers;

use chrono::{Duration, Utc};
use helpers::{test_service, thought};

#[test]
fn idle_sessions_are_flagged_and_reactivated_by_writes() {
    let svc = test_service(10);
    svc.submit_thought(thought("s1", 1, 3)).unwrap();

    let later = Utc::now() + Duration::hours(1);
    let flagged = svc
        .state()
        .registry()
        .mark_idle(Duration::minutes(30), later)
        .unwrap();
    assert_eq!(flagged, 1);
    assert!(!svc.session_stats("s1").unwrap().is_active);

    // records survive; the session is only flagged
    assert_eq!(svc.export_session("s1").unwrap().data.thoughts.len(), 1);

    svc.submit_thought(thought("s1", 2, 3)).unwrap();
    assert!(svc.session("s1").unwrap().is_active);
}

#[test]
fn recent_sessions_stay_active() {
    let svc = test_service(10);
    svc.submit_thought(thought("s1", 1, 1)).unwrap();
    let flagged = svc
        .state()
        .registry()
        .mark_idle(Duration::minutes(30), Utc::now())
        .unwrap();
    assert_eq!(flagged, 0);
    assert!(svc.session("s1").unwrap().is_active);
}
