use carpet_core::directives::CounterKind;
use carpet_core::reconciler::{
    gem_decoration_count, gem_decorations, thread_decoration_count, thread_decorations,
};
use carpet_core::{
    AdvanceOutcome, AdvanceRejection, CarpetEngine, CarpetSession, DecorRng, Dimension, Directive,
    EmbeddedCatalog, EventLog, FeatureCategory, GateDecision, JourneyNode, OptionCatalog,
    SelectionOutcome, SelectionState, TransientKind, decide,
};

fn journey() -> Vec<JourneyNode> {
    vec![
        JourneyNode::free(1),
        JourneyNode::free(2),
        JourneyNode::free(3),
        JourneyNode::free(4),
        JourneyNode::premium(5),
    ]
}

fn session(seed: u64) -> CarpetSession {
    CarpetEngine::new(EmbeddedCatalog)
        .create_session(journey(), Some(seed))
        .unwrap()
}

#[test]
fn gate_matches_premium_flags_for_every_option() {
    let catalog = OptionCatalog::default_catalog();
    for dimension in Dimension::ALL {
        for key in catalog.keys(dimension) {
            assert_eq!(
                decide(catalog, dimension, key, true).unwrap(),
                GateDecision::Allow,
                "{dimension} {key}"
            );
            let expected = if catalog.is_premium(dimension, key).unwrap() {
                GateDecision::DenyWithPrompt(FeatureCategory::from(dimension))
            } else {
                GateDecision::Allow
            };
            assert_eq!(decide(catalog, dimension, key, false).unwrap(), expected);
        }
    }
}

#[test]
fn free_user_is_prompted_for_royal() {
    let mut session = session(1);
    let outcome = session.select(Dimension::Pattern, "royal").unwrap();
    let SelectionOutcome::Upsell(prompt) = outcome else {
        panic!("royal should be gated");
    };
    assert_eq!(prompt.category, FeatureCategory::Pattern);
    assert!(prompt.description.is_some());
    assert_eq!(session.state().pattern, "geometric");
    assert_eq!(session.upsell_open(), Some(FeatureCategory::Pattern));

    let events = session.drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, "premium_pattern_click");
}

#[test]
fn premium_user_applies_royal() {
    let mut session = CarpetEngine::new(EmbeddedCatalog)
        .create_session_from(SelectionState::default().with_premium(true), journey(), Some(2))
        .unwrap();
    let SelectionOutcome::Applied(directives) =
        session.select(Dimension::Pattern, "royal").unwrap()
    else {
        panic!("premium users are never gated");
    };
    assert_eq!(session.state().pattern, "royal");
    assert!(directives.iter().any(|directive| matches!(
        directive,
        Directive::PatternLayer { image_ref, .. } if image_ref == "images/patterns/royal.svg"
    )));
    assert!(directives.contains(&Directive::transient(TransientKind::MagicalTransition)));

    let actions: Vec<String> = session
        .drain_events()
        .into_iter()
        .map(|event| event.action)
        .collect();
    assert_eq!(actions, ["update_visual", "premium_pattern_click"]);
}

#[test]
fn advancing_to_node_three_pays_out_gems() {
    let mut session = session(3);
    let before = session.state().clone();
    let AdvanceOutcome::Advanced(directives) = session.advance_node(3) else {
        panic!("node 3 follows node 2");
    };
    assert_eq!(session.state().current_journey_node, 3);
    assert_eq!(session.state().gems, 170);
    assert_eq!(session.state().streak, before.streak);
    assert!(directives.contains(&Directive::Counter {
        counter: CounterKind::Gems,
        value: 170,
    }));
}

#[test]
fn rejected_advances_leave_state_alone() {
    let mut session = session(4);
    let before = session.state().clone();
    for node in [1, 2, 4, 9] {
        assert!(
            matches!(session.advance_node(node), AdvanceOutcome::Ignored(_)),
            "node {node}"
        );
        assert_eq!(session.state(), &before);
    }
    assert_eq!(
        session.advance_node(4),
        AdvanceOutcome::Ignored(AdvanceRejection::OutOfOrder {
            requested: 4,
            expected: 3,
        })
    );
}

#[test]
fn premium_node_prompts_journey_upsell() {
    let mut session = session(5);
    assert!(matches!(session.advance_node(3), AdvanceOutcome::Advanced(_)));
    assert!(matches!(session.advance_node(4), AdvanceOutcome::Advanced(_)));
    let AdvanceOutcome::Upsell(prompt) = session.advance_node(5) else {
        panic!("node 5 is premium");
    };
    assert_eq!(prompt.category, FeatureCategory::Journey);
    assert_eq!(session.state().current_journey_node, 4);
}

#[test]
fn decoration_counts_follow_caps() {
    let mut rng = DecorRng::from_user_seed(0x00C0_FFEE);
    for streak in [0, 1, 7, 29, 30, 31, 365] {
        let threads = thread_decorations(streak, None, rng.threads());
        assert_eq!(threads.len() as u32, streak.min(30));
        assert_eq!(thread_decoration_count(streak), streak.min(30));
    }
    for gems in [0, 9, 10, 145, 199, 200, 1_000] {
        let placed = gem_decorations(gems, rng.gems());
        assert_eq!(placed.len() as u32, (gems / 10).min(20));
        assert_eq!(gem_decoration_count(gems), (gems / 10).min(20));
        for gem in placed {
            assert!((10.0..=90.0).contains(&gem.left_pct));
            assert!((10.0..=90.0).contains(&gem.top_pct));
        }
    }
}

#[test]
fn seeded_sessions_paint_identically() {
    let mut first = session(0xDEC0);
    let mut second = session(0xDEC0);
    assert_eq!(first.initialize().unwrap(), second.initialize().unwrap());
    assert_eq!(
        first.increment_streak().unwrap(),
        second.increment_streak().unwrap()
    );
    assert_eq!(first.increment_gems(), second.increment_gems());
    assert_eq!(first.decor_draws(), second.decor_draws());

    let mut other = session(0xDEC1);
    assert_ne!(
        first.increment_streak().unwrap(),
        other.increment_streak().unwrap()
    );
}

#[test]
fn retriggered_transition_reverts_once() {
    let mut session = session(6);
    session.tick(0);
    session.select(Dimension::Pattern, "classic").unwrap();
    session.tick(600);
    session.select(Dimension::Pattern, "floral").unwrap();
    assert!(!session.tick(1_000).contains(&TransientKind::MagicalTransition));
    assert_eq!(session.tick(1_600), [TransientKind::MagicalTransition]);
    assert!(session.tick(5_000).is_empty());
}

#[test]
fn session_events_flush_to_sink() {
    let mut session = session(7);
    session.increment_streak().unwrap();
    session.increment_gems();
    session.upsell_cta_clicked();
    let mut sink = EventLog::new();
    session.flush_events(&mut sink);
    let labels: Vec<&str> = sink.events().iter().map(|event| event.label.as_str()).collect();
    assert_eq!(labels, ["Streak 8", "Gems 155", "Unlock Premium"]);
    assert!(session.drain_events().is_empty());
}
