//! Property tests for recommendation ranking.

use advisor_common::{sort_recommendations, Priority, Recommendation, RecommendationMetadata};
use proptest::prelude::*;

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
        Just(Priority::Urgent),
    ]
}

fn rec(index: usize, priority: Priority, confidence: f64) -> Recommendation {
    Recommendation {
        id: format!("r{}", index),
        title: format!("rec {}", index),
        description: String::new(),
        confidence,
        reasoning: Vec::new(),
        actionable: true,
        priority,
        metadata: RecommendationMetadata::Strategy {
            company_size: None,
            focus_areas: Vec::new(),
        },
    }
}

proptest! {
    #[test]
    fn sorted_by_priority_then_confidence(
        pairs in prop::collection::vec((priority_strategy(), 0.0f64..=1.0), 0..40)
    ) {
        let mut recs: Vec<Recommendation> = pairs
            .iter()
            .enumerate()
            .map(|(i, (p, c))| rec(i, *p, *c))
            .collect();
        sort_recommendations(&mut recs);

        prop_assert_eq!(recs.len(), pairs.len());
        for w in recs.windows(2) {
            prop_assert!(w[0].priority.rank() >= w[1].priority.rank());
            if w[0].priority == w[1].priority {
                prop_assert!(w[0].confidence >= w[1].confidence);
            }
        }
    }

    #[test]
    fn sorting_is_idempotent(
        pairs in prop::collection::vec((priority_strategy(), 0.0f64..=1.0), 0..20)
    ) {
        let mut once: Vec<Recommendation> = pairs
            .iter()
            .enumerate()
            .map(|(i, (p, c))| rec(i, *p, *c))
            .collect();
        sort_recommendations(&mut once);
        let mut twice = once.clone();
        sort_recommendations(&mut twice);
        prop_assert_eq!(once, twice);
    }
}
