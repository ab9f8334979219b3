use std::sync::Arc;

use call_qc_core::{CallTranscript, Criterion, Probability, Segment};
use call_qc_scoring::{create_policy, DerivedPolicy, Independent, RuleScorer, ScenarioFlags};

fn seg(speaker: &str, text: &str, start: f64, end: f64) -> Segment {
    Segment::new(speaker, text, start, end)
}

fn good_call() -> CallTranscript {
    CallTranscript::new(
        "GOOD",
        vec![
            seg("Operator", "Salam, Kontakt Home. Narahatçılığınızı başa düşürəm.", 0.0, 4.0),
            seg("Customer", "İnternet işləmir.", 4.0, 6.0),
            seg("Operator", "Texnik üçün ticket açdım, 24 saat ərzində gələcək.", 6.0, 10.0),
        ],
    )
}

#[test]
fn test_clean_call_scores_three_with_high_confidence() {
    let results = RuleScorer::default().score(&good_call());

    assert_eq!(results.len(), 5);
    for (criterion, result) in &results {
        assert_eq!(result.score, 3, "{criterion}");
        assert_eq!(result.probability, Probability::High, "{criterion}");
        assert!(result.has_evidence(), "{criterion}");
    }

    let ownership = &results[&Criterion::Ownership];
    assert_eq!(
        ownership.evidence.as_deref(),
        Some("[6.0-10.0] Operator: Texnik üçün ticket açdım, 24 saat ərzində gələcək.")
    );
    assert_eq!(results[&Criterion::Understanding].evidence, ownership.evidence);
}

#[test]
fn test_positive_default_without_markers_is_low() {
    let call = CallTranscript::new(
        "PLAIN",
        vec![
            seg("Operator", "Bəli.", 0.0, 1.0),
            seg("Customer", "Yaxşı.", 1.0, 2.0),
        ],
    );
    let results = RuleScorer::default().score(&call);
    let ownership = &results[&Criterion::Ownership];
    assert_eq!((ownership.score, ownership.probability), (3, Probability::Low));
    assert!(ownership.evidence.is_none());

    // derived criteria inherit the ownership tier
    let understanding = &results[&Criterion::Understanding];
    assert_eq!((understanding.score, understanding.probability), (3, Probability::Low));
}

#[test]
fn test_callback_refusal_in_russian_after_long_silence() {
    let call = CallTranscript::new(
        "RU1",
        vec![
            seg("Operator", "Salam, Kontakt Home.", 0.0, 2.0),
            seg("Customer", "[140 saniyə süküt]", 2.0, 142.0),
            seg("Operator", "Мы не перезваниваем, завтра снова позвоните.", 142.0, 146.0),
        ],
    );
    let flags = ScenarioFlags::detect(&call);
    assert!(flags.callback_failure.triggered);

    let results = RuleScorer::default().score_with_flags(&call, &flags);
    let refusal = "[142.0-146.0] Operator: Мы не перезваниваем, завтра снова позвоните.";

    assert_eq!(results[&Criterion::Ownership].score, 1);
    assert_eq!(results[&Criterion::Ownership].evidence.as_deref(), Some(refusal));
    assert_eq!(results[&Criterion::Resolution].score, 1);
    assert_eq!(results[&Criterion::ProcessNextSteps].score, 1);
    assert_eq!(results[&Criterion::ProcessNextSteps].evidence.as_deref(), Some(refusal));
    assert_eq!(results[&Criterion::Professionalism].score, 1);
    assert_eq!(
        results[&Criterion::Professionalism].evidence.as_deref(),
        Some("[0.0-2.0] Operator: Salam, Kontakt Home.")
    );
}

#[test]
fn test_cvv_request_masks_card_in_evidence() {
    let call = CallTranscript::new(
        "PII",
        vec![
            seg("Customer", "Kart nömrəm 4111 1111 1111 1111", 0.0, 2.0),
            seg("Operator", "4111 1111 1111 1111, CVV kodunu da deyin", 2.0, 4.0),
        ],
    );
    let flags = ScenarioFlags::detect(&call);
    assert!(flags.pii_mishandled.triggered);

    let results = RuleScorer::default().score_with_flags(&call, &flags);
    let professionalism = &results[&Criterion::Professionalism];
    assert_eq!(professionalism.score, 0);

    let evidence = professionalism.evidence.as_deref().unwrap_or_default();
    assert!(!evidence.contains("4111 1111 1111 1111"));
    assert!(evidence.contains("**** **** **** 1111"));

    for result in results.values() {
        if let Some(ev) = &result.evidence {
            assert!(!ev.contains("4111 1111"), "{ev}");
        }
    }

    let resolution = &results[&Criterion::Resolution];
    assert_eq!((resolution.score, resolution.probability), (2, Probability::Medium));
}

#[test]
fn test_internal_leak_scores() {
    let call = CallTranscript::new(
        "LEAK",
        vec![
            seg("Operator", "Salam, buyurun.", 0.0, 2.0),
            seg("Operator", "Rəhbərlik heç nə etmir, serverlər köhnədir.", 2.0, 5.0),
            seg("Operator", "Ticket açaram, amma nəticə olmayacaq.", 5.0, 8.0),
        ],
    );
    let results = RuleScorer::new(Arc::new(Independent)).score(&call);

    assert_eq!(results[&Criterion::Ownership].score, 1);
    assert_eq!(results[&Criterion::Understanding].score, 1);
    assert_eq!(results[&Criterion::Resolution].score, 1);
    assert_eq!(results[&Criterion::Professionalism].score, 0);

    let process = &results[&Criterion::ProcessNextSteps];
    assert_eq!(process.score, 2);
    assert_eq!(
        process.evidence.as_deref(),
        Some("[5.0-8.0] Operator: Ticket açaram, amma nəticə olmayacaq.")
    );
}

#[test]
fn test_derived_policy_partial_registration() {
    let call = CallTranscript::new(
        "LEAK2",
        vec![
            seg("Operator", "Rəhbərlik heç nə etmir.", 0.0, 2.0),
            seg("Operator", "Amma qeyd edərəm.", 2.0, 4.0),
        ],
    );
    let correlated = RuleScorer::new(create_policy(DerivedPolicy::OwnershipCorrelation));
    let results = correlated.score(&call);

    assert_eq!(correlated.policy_name(), "ownership_correlation");
    assert_eq!(results[&Criterion::Ownership].score, 1);
    assert_eq!(results[&Criterion::ProcessNextSteps].score, 2);
    assert_eq!(
        results[&Criterion::ProcessNextSteps].evidence.as_deref(),
        Some("[2.0-4.0] Operator: Amma qeyd edərəm.")
    );
    assert_eq!(results[&Criterion::Understanding].score, 1);
    assert_eq!(
        results[&Criterion::Understanding].evidence,
        results[&Criterion::Ownership].evidence
    );
}

#[test]
fn test_scores_stay_in_range() {
    let calls = [
        good_call(),
        CallTranscript::new("E", vec![]),
        CallTranscript::new("C", vec![seg("Customer", "FIN 5ZK8P2M", 0.0, 1.0)]),
    ];
    for call in &calls {
        for policy in [DerivedPolicy::OwnershipCorrelation, DerivedPolicy::Independent] {
            let results = RuleScorer::new(create_policy(policy)).score(call);
            assert_eq!(results.len(), 5);
            assert!(results.values().all(|r| r.score <= 3));
        }
    }
}
