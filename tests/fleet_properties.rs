//! Property tests over arbitrary update and drift sequences.

use proptest::prelude::*;

use transformer_diagnostics::{
    diagnostics::classify_status,
    domain::{NotificationKind, TransformerStatus},
    fleet::{sample_fleet, FleetStore},
    notifications::NotificationFeed,
    simulation::{StatusSimulator, StatusSimulatorConfig},
};

fn status_strategy() -> impl Strategy<Value = TransformerStatus> {
    prop_oneof![
        Just(TransformerStatus::Healthy),
        Just(TransformerStatus::Warning),
        Just(TransformerStatus::Fault),
    ]
}

fn assert_in_range(fleet: &FleetStore) {
    for record in fleet.list_all() {
        let t = record.temperature.as_celsius();
        let l = record.load.as_percent();
        assert!((50.0..=100.0).contains(&t), "{} temperature {}", record.id, t);
        assert!((0.0..=100.0).contains(&l), "{} load {}", record.id, l);
    }
}

proptest! {
    #[test]
    fn prop_updates_keep_readings_in_range(
        updates in prop::collection::vec(
            (0usize..5, status_strategy(), -1.0e4f64..1.0e4, -1.0e4f64..1.0e4),
            1..64,
        )
    ) {
        let mut fleet = FleetStore::with_seed(sample_fleet()).unwrap();
        let ids = fleet.ids();

        for (index, status, temperature, load) in updates {
            let record = fleet.update_status(&ids[index], status, temperature, load).unwrap();
            prop_assert_eq!(record.status, status);
        }

        assert_in_range(&fleet);
        let stats = fleet.compute_stats();
        prop_assert_eq!(stats.total, fleet.len());
        prop_assert_eq!(stats.healthy + stats.warning + stats.fault, stats.total);
    }

    #[test]
    fn prop_drift_preserves_fleet(seed in any::<u64>(), ticks in 1usize..200) {
        let mut fleet = FleetStore::with_seed(sample_fleet()).unwrap();
        let ids_before = fleet.ids();
        let mut sim = StatusSimulator::new(&StatusSimulatorConfig::seeded(seed)).unwrap();

        for _ in 0..ticks {
            let report = sim.tick(&mut fleet).unwrap();
            prop_assert!(report.changed.len() <= fleet.len());
        }

        assert_in_range(&fleet);
        prop_assert_eq!(fleet.ids(), ids_before);
        prop_assert_eq!(fleet.compute_stats().total, 5);
    }

    #[test]
    fn prop_classifier_is_total(status in status_strategy()) {
        let diagnosis = classify_status(status);
        prop_assert!(!diagnosis.fault_type.is_empty());
        prop_assert!(!diagnosis.recommendation.is_empty());
        prop_assert_eq!(diagnosis.requires_attention(), status == TransformerStatus::Fault);
    }

    #[test]
    fn prop_feed_never_exceeds_capacity(capacity in 0usize..16, appends in 0usize..64) {
        let mut feed = NotificationFeed::with_capacity(capacity);
        for i in 0..appends {
            feed.append(NotificationKind::Info, format!("event {i}"), "tick");
        }
        prop_assert!(feed.count() <= capacity.max(1));
        prop_assert_eq!(feed.count(), appends.min(capacity.max(1)));
        if appends > 0 {
            let expected = format!("event {}", appends - 1);
            prop_assert_eq!(feed.latest().map(|e| e.title.as_str()), Some(expected.as_str()));
        }
    }
}
