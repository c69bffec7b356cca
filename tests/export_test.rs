mod helpers;

use helpers::{model, test_service, thought};
use thinkwell::session::service::{DebuggingRequest, MentalModelRequest};

#[test]
fn export_round_trips_submitted_records() {
    let svc = test_service(10);

    let mut requests = Vec::new();
    for n in 1..=3 {
        let mut req = thought("s1", n, 3);
        if n == 3 {
            req.is_revision = true;
            req.revises_thought = Some(1);
        }
        requests.push(req.clone());
        svc.submit_thought(req).unwrap();
    }
    svc.apply_mental_model(MentalModelRequest {
        reasoning: Some("costs dominate".into()),
        conclusion: Some("buy".into()),
        confidence: Some(0.8),
        ..model("s1", "opportunity_cost", "build or buy")
    })
    .unwrap();
    svc.apply_debugging_approach(DebuggingRequest {
        session_id: "s1".into(),
        approach_name: "binary_search".into(),
        issue: "regression in parser".into(),
        steps: Some(vec!["bisect".into()]),
        findings: Some("commit 42".into()),
        resolution: Some("reverted".into()),
    })
    .unwrap();
    // noise in another session
    svc.submit_thought(thought("other", 1, 1)).unwrap();

    let export = svc.export_session("s1").unwrap();
    assert_eq!(export.version, "1.0.0");
    assert_eq!(export.session_id, "s1");
    assert_eq!(export.session_type, "hybrid");
    assert_eq!(export.data.thoughts.len(), 3);
    assert_eq!(export.data.mental_models.len(), 2);
    assert_eq!(export.metadata.thought_count, 3);
    assert_eq!(export.metadata.mental_model_count, 2);

    for (stored, req) in export.data.thoughts.iter().zip(&requests) {
        assert_eq!(stored.session_id, "s1");
        assert_eq!(stored.thought, req.thought);
        assert_eq!(stored.thought_number, req.thought_number);
        assert_eq!(stored.total_thoughts, req.total_thoughts);
        assert_eq!(stored.next_thought_needed, req.next_thought_needed);
        assert_eq!(stored.is_revision, req.is_revision);
        assert_eq!(stored.revises_thought, req.revises_thought);
        assert!(!stored.id.is_empty());
    }

    let applied = &export.data.mental_models[0];
    assert_eq!(applied.model_name, "opportunity_cost");
    assert_eq!(applied.problem, "build or buy");
    assert_eq!(applied.steps.len(), 4);
    assert_eq!(applied.reasoning, "costs dominate");
    assert_eq!(applied.conclusion, "buy");
    assert_eq!(applied.confidence, Some(0.8));

    let debugging = &export.data.mental_models[1];
    assert_eq!(debugging.model_name, "debugging_binary_search");
    assert_eq!(debugging.problem, "regression in parser");
    assert_eq!(debugging.steps, vec!["bisect"]);
    assert_eq!(debugging.reasoning, "commit 42");
    assert_eq!(debugging.conclusion, "reverted");
}

#[test]
fn repeated_export_differs_only_in_timestamps() {
    let svc = test_service(10);
    svc.submit_thought(thought("s1", 1, 1)).unwrap();
    svc.apply_mental_model(model("s1", "first_principles", "X")).unwrap();

    let first = svc.export_session("s1").unwrap();
    let second = svc.export_session("s1").unwrap();
    assert_eq!(first.data, second.data);
    assert_eq!(first.session_id, second.session_id);
    assert!(second.timestamp >= first.timestamp);
}

#[test]
fn export_of_unseen_session_is_empty_and_creates_it() {
    let svc = test_service(10);
    let export = svc.export_session("ghost").unwrap();
    assert!(export.data.thoughts.is_empty());
    assert!(export.data.mental_models.is_empty());
    assert!(svc.session("ghost").is_ok());
}

#[test]
fn export_serializes_to_versioned_envelope() {
    let svc = test_service(10);
    svc.submit_thought(thought("s1", 1, 1)).unwrap();

    let json = serde_json::to_value(svc.export_session("s1").unwrap()).unwrap();
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["session_type"], "hybrid");
    assert!(json["timestamp"].is_string());
    assert_eq!(json["data"]["thoughts"][0]["thought_number"], 1);
    assert!(json["data"]["mental_models"].as_array().unwrap().is_empty());
}
