use super::common::*;
use crate::workflows::purchase::advice::{advise, cooling_off, pluralize_days};
use crate::workflows::purchase::domain::PurchaseMetrics;
use crate::workflows::purchase::evaluation::Severity;

#[test]
fn fresh_urge_with_no_research_gets_two_warnings() {
    let advice = advise(&PurchaseMetrics::default(), 30);

    let severities: Vec<Severity> = advice.iter().map(|item| item.severity).collect();
    assert_eq!(severities, vec![Severity::Danger, Severity::Warning]);
    assert!(advice[0].message.contains("24 hours"));
    assert!(advice[1].message.to_lowercase().contains("research"));
}

#[test]
fn short_wait_pluralizes_day_count() {
    let one = PurchaseMetrics {
        waiting_days: 1,
        ..PurchaseMetrics::default()
    };
    let two = PurchaseMetrics {
        waiting_days: 2,
        ..PurchaseMetrics::default()
    };

    let first = &advise(&one, 50)[0];
    assert_eq!(first.severity, Severity::Warning);
    assert!(first.message.contains("1 day."));
    assert!(!first.message.contains("1 days"));

    let first = &advise(&two, 50)[0];
    assert!(first.message.contains("2 days"));
}

#[test]
fn patient_well_researched_purchase_gets_praise() {
    let advice = advise(&headphones(), 70);

    assert!(advice.iter().take(3).all(|item| item.severity == Severity::Success));
    assert!(advice[0].message.contains("10 days"));
    // 25% of income still trips the affordability rule.
    assert!(advice
        .iter()
        .any(|item| item.severity == Severity::Danger && item.message.contains("25%")));
}

#[test]
fn middle_waits_produce_no_waiting_advice() {
    let metrics = PurchaseMetrics {
        waiting_days: 4,
        research_depth: 5,
        ..PurchaseMetrics::default()
    };

    assert!(advise(&metrics, 50).is_empty());
}

#[test]
fn want_versus_need_depends_on_score() {
    let metrics = PurchaseMetrics {
        waiting_days: 4,
        research_depth: 5,
        necessity_score: 3,
        ..PurchaseMetrics::default()
    };

    assert_eq!(advise(&metrics, 59).len(), 1);
    assert!(advise(&metrics, 60).is_empty());
}

#[test]
fn income_rule_is_skipped_without_income() {
    let metrics = PurchaseMetrics {
        price: 1_000_000.0,
        monthly_income: 0.0,
        waiting_days: 4,
        research_depth: 5,
        ..PurchaseMetrics::default()
    };

    assert!(advise(&metrics, 10).is_empty());
}

#[test]
fn discount_trap_needs_big_discount_and_short_wait() {
    let trap = PurchaseMetrics {
        discount_percentage: 40.0,
        waiting_days: 1,
        ..PurchaseMetrics::default()
    };
    assert!(advise(&trap, 50)
        .iter()
        .any(|item| item.message.starts_with("Discount trap")));

    let waited = PurchaseMetrics {
        waiting_days: 2,
        ..trap.clone()
    };
    assert!(!advise(&waited, 50)
        .iter()
        .any(|item| item.message.starts_with("Discount trap")));
}

#[test]
fn rules_fire_in_evaluation_order() {
    let metrics = PurchaseMetrics {
        price: 500.0,
        monthly_income: 1000.0,
        discount_percentage: 60.0,
        necessity_score: 2,
        use_frequency: 1,
        impulse_resistance: 1,
        has_unused_similar: true,
        ..PurchaseMetrics::default()
    };

    let advice = advise(&metrics, 5);
    let severities: Vec<Severity> = advice.iter().map(|item| item.severity).collect();

    assert_eq!(
        severities,
        vec![
            Severity::Danger,  // no wait
            Severity::Warning, // research
            Severity::Danger,  // impulsive
            Severity::Warning, // want vs need
            Severity::Danger,  // income share
            Severity::Danger,  // discount trap
            Severity::Warning, // collecting dust
            Severity::Danger,  // unused similar
        ]
    );
    assert!(advice[7].message.contains("unused similar"));
}

#[test]
fn cooling_off_counts_down_to_a_week() {
    let at = |waiting_days| PurchaseMetrics {
        waiting_days,
        ..PurchaseMetrics::default()
    };

    assert_eq!(cooling_off(&at(0)), Some(7));
    assert_eq!(cooling_off(&at(5)), Some(2));
    assert_eq!(cooling_off(&at(7)), None);
    assert_eq!(cooling_off(&at(30)), None);
}

#[test]
fn pluralize_handles_zero() {
    assert_eq!(pluralize_days(0), "0 days");
    assert_eq!(pluralize_days(1), "1 day");
}
