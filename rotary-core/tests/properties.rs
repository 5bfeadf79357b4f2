use proptest::prelude::*;

use rotary_core::{
    config::DEBOUNCE_THRESHOLD,
    debounce::Debouncer,
    signal::{HIGH, LOW},
    EncoderConfig, EncoderState, Sample, Snapshot,
};

const K: usize = DEBOUNCE_THRESHOLD as usize;

/// One physical transition: chatter of sub-threshold runs, then a settle
fn transition() -> impl Strategy<Value = (Vec<usize>, usize)> {
    (
        prop::collection::vec(1..K, 0..8),
        K..K + 12,
    )
}

proptest! {
    #[test]
    fn one_edge_per_physical_transition(transitions in prop::collection::vec(transition(), 1..12)) {
        let mut debouncer = Debouncer::new(HIGH, DEBOUNCE_THRESHOLD);
        let mut level = HIGH;
        let mut edges = 0_usize;

        for (chatter, settle) in &transitions {
            let target = !level;
            // Chatter alternates starting on the new level
            for (i, run) in chatter.iter().enumerate() {
                let raw = if i % 2 == 0 { target } else { level };
                for _ in 0..*run {
                    edges += debouncer.sample(raw).is_some() as usize;
                }
            }
            for _ in 0..*settle {
                edges += debouncer.sample(target).is_some() as usize;
            }
            level = target;
            prop_assert_eq!(debouncer.stable_level(), level);
        }

        prop_assert_eq!(edges, transitions.len());
    }

    #[test]
    fn position_moves_by_one_or_not_at_all(
        raw in prop::collection::vec((any::<bool>(), any::<bool>()), 0..400)
    ) {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        let edges = EncoderConfig::DEFAULT.edges_per_revolution();

        for (a, b) in raw {
            let before = state.snapshot();
            let decoded = state.tick(Sample::new(a, b, HIGH));
            let after = state.snapshot();

            prop_assert!(after.position < edges);
            let moved = (after.position + edges - before.position) % edges;
            let counted = (after.increments - before.increments) + (after.decrements - before.decrements);
            match decoded {
                Some(_) => {
                    prop_assert!(moved == 1 || moved == edges - 1);
                    prop_assert_eq!(counted, 1);
                }
                None => {
                    prop_assert_eq!(moved, 0);
                    prop_assert_eq!(counted, 0);
                }
            }
        }
    }

    #[test]
    fn reset_is_idempotent(
        raw in prop::collection::vec((any::<bool>(), any::<bool>()), 0..200),
        presses in 1_usize..5
    ) {
        let mut state = EncoderState::new(EncoderConfig::DEFAULT);
        for (a, b) in raw {
            state.tick(Sample::new(a, b, HIGH));
        }
        for _ in 0..presses {
            state.tick(Sample::new(HIGH, HIGH, LOW));
            prop_assert_eq!(state.snapshot(), Snapshot::default());
        }
    }
}
