//! End-to-end scenarios through the public facade: score a purchase, advise on it,
//! persist it to a data directory and reopen the directory as a fresh store.

use purchase_advisor::workflows::purchase::{
    advise, recommendation, score, CalculationId, CalculationStore, FileMedium, KeyValueMedium,
    PurchaseMetrics, RecommendationTier, ScoringEngine, ScoringProfile, Severity,
};

fn road_bike() -> PurchaseMetrics {
    PurchaseMetrics {
        product_name: "Road bike".to_string(),
        price: 180.0,
        monthly_income: 1200.0,
        discount_percentage: 20.0,
        utility_score: 9,
        necessity_score: 7,
        long_term_value: 9,
        use_frequency: 8,
        waiting_days: 21,
        research_depth: 9,
        impulse_resistance: 8,
        instant_happiness_score: 7,
        has_unused_similar: false,
        is_replacement: true,
        upgrade_justification: 8,
    }
}

#[test]
fn deliberate_purchase_is_recommended_and_praised() {
    let metrics = road_bike();

    let value = score(&metrics);
    let verdict = recommendation(value);
    let advice = advise(&metrics, value);

    assert!(value >= 80, "expected a go score, got {value}");
    assert_eq!(verdict.tier, RecommendationTier::Go);
    assert!(advice.iter().all(|item| item.severity == Severity::Success));
    assert_eq!(advice.len(), 3);
}

#[test]
fn impulse_buy_is_discouraged() {
    let metrics = PurchaseMetrics {
        product_name: "Flash-sale smartwatch".to_string(),
        price: 600.0,
        monthly_income: 1000.0,
        discount_percentage: 45.0,
        utility_score: 4,
        necessity_score: 2,
        long_term_value: 3,
        use_frequency: 3,
        waiting_days: 0,
        research_depth: 1,
        impulse_resistance: 2,
        has_unused_similar: true,
        ..PurchaseMetrics::default()
    };

    let value = score(&metrics);
    let advice = advise(&metrics, value);

    assert_eq!(recommendation(value).tier, RecommendationTier::Skip);
    assert_eq!(
        advice
            .iter()
            .filter(|item| item.severity == Severity::Danger)
            .count(),
        5
    );
}

#[test]
fn profiles_score_the_same_purchase_differently() {
    let mut metrics = road_bike();
    metrics.waiting_days = 0;
    metrics.research_depth = 0;

    let deliberate = ScoringEngine::for_profile(ScoringProfile::Deliberate).score(&metrics);
    let classic = ScoringEngine::for_profile(ScoringProfile::Classic).score(&metrics);

    assert!(classic > deliberate);
}

#[test]
fn file_store_survives_reopening() {
    let dir = tempfile::tempdir().expect("temp dir");
    let metrics = road_bike();
    let value = score(&metrics);

    let saved = {
        let store = CalculationStore::new(FileMedium::new(dir.path().join("data")));
        store
            .remember_monthly_income(metrics.monthly_income)
            .expect("income remembered");
        store.save(metrics.clone(), value, None).expect("saved")
    };

    let reopened = CalculationStore::new(FileMedium::new(dir.path().join("data")));
    let fetched = reopened.get_by_id(&saved.id).expect("record persisted");
    assert_eq!(fetched.metrics, metrics);
    assert_eq!(fetched.score, value);
    assert_eq!(reopened.new_metrics().monthly_income, 1200.0);

    reopened.delete_by_id(&saved.id).expect("deleted");
    assert!(reopened.list().is_empty());
    reopened
        .delete_by_id(&CalculationId::from("gone"))
        .expect("no-op delete");
}

#[test]
fn file_store_tolerates_missing_and_corrupt_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let medium = FileMedium::new(dir.path());

    assert_eq!(medium.read("should-i-buy-it-calculations").expect("read"), None);

    std::fs::write(
        medium.slot_path("should-i-buy-it-calculations"),
        "\u{0}\u{1}garbage",
    )
    .expect("write corrupt file");
    let store = CalculationStore::new(medium);
    assert!(store.list().is_empty());

    store.save(road_bike(), 90, None).expect("save replaces corrupt data");
    assert_eq!(store.list().len(), 1);
    assert!(!dir.path().join("should-i-buy-it-calculations.json.tmp").exists());
}
