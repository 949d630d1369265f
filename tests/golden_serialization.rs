use std::sync::Arc;

use faq_core::knowledge::CategoryId;
use faq_core::observe::NoopObserver;
use faq_core::types::{CacheTier, Outcome, Resolution, ScoreDetails};
use faq_core::FaqEngine;
use serde_json::json;

#[test]
fn golden_matched_resolution() {
    let resolution = Resolution {
        query: "How do I appeal my grade?".to_string(),
        normalized: "how do i appeal my grade".to_string(),
        response: "Examinations Office".to_string(),
        outcome: Outcome::Matched {
            category: CategoryId::new("examinations"),
            details: ScoreDetails {
                score: 1.0,
                best_keyword: Some("appeal grade".to_string()),
                similarity: Some(0.5),
                keywords_gated_in: 1,
            },
        },
    };

    let value = serde_json::to_value(&resolution).unwrap();
    assert_eq!(
        value,
        json!({
            "query": "How do I appeal my grade?",
            "normalized": "how do i appeal my grade",
            "response": "Examinations Office",
            "outcome": {
                "kind": "matched",
                "category": "examinations",
                "details": {
                    "score": 1.0,
                    "best_keyword": "appeal grade",
                    "similarity": 0.5,
                    "keywords_gated_in": 1
                }
            }
        })
    );

    let back: Resolution = serde_json::from_value(value).unwrap();
    assert_eq!(back, resolution);
}

#[test]
fn golden_cached_and_default_outcomes() {
    assert_eq!(
        serde_json::to_value(Outcome::Cached { tier: CacheTier::Warm }).unwrap(),
        json!({ "kind": "cached", "tier": "warm" })
    );
    assert_eq!(
        serde_json::to_value(Outcome::Default).unwrap(),
        json!({ "kind": "default" })
    );
}

#[test]
fn resolution_field_order_is_stable() {
    let engine = FaqEngine::builtin()
        .unwrap()
        .with_observer(Arc::new(NoopObserver));
    let resolution = engine.resolve_detailed("asdkjhasdkjh");

    let json_str = serde_json::to_string_pretty(&resolution).unwrap();
    let query_pos = json_str.find("\"query\":").unwrap();
    let normalized_pos = json_str.find("\"normalized\":").unwrap();
    let response_pos = json_str.find("\"response\":").unwrap();
    let outcome_pos = json_str.find("\"outcome\":").unwrap();

    assert!(query_pos < normalized_pos);
    assert!(normalized_pos < response_pos);
    assert!(response_pos < outcome_pos);
}
