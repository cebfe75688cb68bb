use anyhow::{Context, Result, bail, ensure};

use carpet_core::reconciler::{
    gem_decoration_count, gem_decorations, thread_decoration_count, thread_decorations,
};
use carpet_core::resolver::{Matcher, match_rule, normalize_key, rules};
use carpet_core::{
    AdvanceOutcome, CarpetEngine, CarpetSession, ConsentGatedSink, ConsentPreferences, DecorRng,
    Dimension, EmbeddedCatalog, EventLog, FeatureCategory, JourneyNode, SelectionOutcome,
    SelectionState, TransientKind, resolve,
};

pub type ScenarioFn = fn(u64) -> Result<()>;

/// A named check run once per seed and iteration.
#[derive(Debug, Clone, Copy)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub run: ScenarioFn,
}

pub const SCENARIOS: &[TestScenario] = &[
    TestScenario {
        name: "smoke",
        description: "Initialize a session and apply a free pattern",
        run: smoke,
    },
    TestScenario {
        name: "premium-gate",
        description: "Every catalog option against free and premium users",
        run: premium_gate,
    },
    TestScenario {
        name: "journey-walk",
        description: "Advance node by node until the premium node prompts",
        run: journey_walk,
    },
    TestScenario {
        name: "decoration-caps",
        description: "Thread and gem decoration counts, ranges, and reproducibility",
        run: decoration_caps,
    },
    TestScenario {
        name: "transient-timers",
        description: "Re-triggered transition reverts once at the later deadline",
        run: transient_timers,
    },
    TestScenario {
        name: "consent-gate",
        description: "Analytics events reach the sink only with consent",
        run: consent_gate,
    },
    TestScenario {
        name: "resolver-sweep",
        description: "Every placeholder rule resolves deterministically",
        run: resolver_sweep,
    },
];

#[must_use]
pub fn find_scenario(name: &str) -> Option<&'static TestScenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
}

fn journey() -> Vec<JourneyNode> {
    vec![
        JourneyNode::free(1),
        JourneyNode::free(2),
        JourneyNode::free(3),
        JourneyNode::free(4),
        JourneyNode::premium(5),
    ]
}

fn session_from(state: SelectionState, seed: u64) -> Result<CarpetSession> {
    CarpetEngine::new(EmbeddedCatalog)
        .create_session_from(state, journey(), Some(seed))
        .context("creating session")
}

fn smoke(seed: u64) -> Result<()> {
    let mut session = session_from(SelectionState::default(), seed)?;
    let directives = session.initialize()?;
    ensure!(!directives.is_empty(), "initialize produced no directives");

    match session.select(Dimension::Pattern, "floral")? {
        SelectionOutcome::Applied(directives) => {
            ensure!(!directives.is_empty(), "floral produced no directives");
        }
        SelectionOutcome::Upsell(prompt) => {
            bail!("free pattern prompted {:?} upsell", prompt.category)
        }
    }
    ensure!(
        session.state().pattern == "floral",
        "pattern is '{}' after selecting floral",
        session.state().pattern
    );
    Ok(())
}

fn premium_gate(seed: u64) -> Result<()> {
    let mut free = session_from(SelectionState::default(), seed)?;
    let mut premium = session_from(SelectionState::default().with_premium(true), seed)?;
    let catalog = free.catalog().clone();

    for dimension in Dimension::ALL {
        for key in catalog.keys(dimension) {
            let gated = catalog.is_premium(dimension, key)?;
            let before = free.state().selection(dimension).to_string();
            match free.select(dimension, key)? {
                SelectionOutcome::Upsell(prompt) => {
                    ensure!(gated, "free {dimension} '{key}' was gated");
                    ensure!(
                        prompt.category == FeatureCategory::from(dimension),
                        "{dimension} '{key}' prompted {:?}",
                        prompt.category
                    );
                    ensure!(
                        free.state().selection(dimension) == before,
                        "denied {dimension} '{key}' still changed the selection"
                    );
                    free.close_upsell();
                }
                SelectionOutcome::Applied(_) => {
                    ensure!(!gated, "premium {dimension} '{key}' applied for a free user");
                    ensure!(free.state().selection(dimension) == key);
                }
            }

            let SelectionOutcome::Applied(_) = premium.select(dimension, key)? else {
                bail!("premium user was prompted for {dimension} '{key}'");
            };
            ensure!(premium.state().selection(dimension) == key);
        }
    }
    Ok(())
}

fn journey_walk(seed: u64) -> Result<()> {
    let mut session = session_from(SelectionState::default(), seed)?;
    let nodes = session.nodes().to_vec();

    let skip = session.state().current_journey_node + 2;
    ensure!(
        matches!(session.advance_node(skip), AdvanceOutcome::Ignored(_)),
        "skipping to node {skip} was accepted"
    );

    loop {
        let current = session.state().current_journey_node;
        let Some(next) = nodes.iter().find(|node| node.id == current + 1) else {
            break;
        };
        let gems = session.state().gems;
        match session.advance_node(next.id) {
            AdvanceOutcome::Advanced(_) => {
                ensure!(!next.premium, "premium node {} advanced", next.id);
                ensure!(session.state().current_journey_node == next.id);
                ensure!(
                    session.state().gems == gems + 25,
                    "node {} paid {} gems",
                    next.id,
                    session.state().gems - gems
                );
            }
            AdvanceOutcome::Upsell(prompt) => {
                ensure!(next.premium, "free node {} prompted", next.id);
                ensure!(prompt.category == FeatureCategory::Journey);
                ensure!(session.state().current_journey_node == current);
                return Ok(());
            }
            AdvanceOutcome::Ignored(reason) => bail!("node {} ignored: {reason}", next.id),
        }
    }
    bail!("walked past every node without reaching a premium node")
}

fn decoration_caps(seed: u64) -> Result<()> {
    let mut rng = DecorRng::from_user_seed(seed);
    for streak in [0, 1, 7, 30, 31, 365] {
        let placed = thread_decorations(streak, None, rng.threads());
        ensure!(
            placed.len() == thread_decoration_count(streak) as usize,
            "streak {streak} placed {} threads",
            placed.len()
        );
    }
    for gems in [0, 9, 145, 200, 1_000] {
        let placed = gem_decorations(gems, rng.gems());
        ensure!(placed.len() == gem_decoration_count(gems) as usize);
        for gem in &placed {
            ensure!(
                (10.0..=90.0).contains(&gem.left_pct) && (10.0..=90.0).contains(&gem.top_pct),
                "gem placed off carpet at ({}, {})",
                gem.left_pct,
                gem.top_pct
            );
        }
    }

    let mut first = DecorRng::from_user_seed(seed);
    let mut second = DecorRng::from_user_seed(seed);
    let layout = thread_decorations(30, None, first.threads());
    ensure!(
        layout == thread_decorations(30, None, second.threads()),
        "seed {seed} produced different thread layouts"
    );
    ensure!(first.draws() == second.draws());
    Ok(())
}

fn transient_timers(seed: u64) -> Result<()> {
    let mut session = session_from(SelectionState::default(), seed)?;
    session.tick(0);
    session.select(Dimension::Pattern, "classic")?;
    session.tick(600);
    session.select(Dimension::Pattern, "floral")?;
    ensure!(
        !session.tick(1_000).contains(&TransientKind::MagicalTransition),
        "transition reverted at the first deadline"
    );
    let reverted = session.tick(1_600);
    ensure!(
        reverted == [TransientKind::MagicalTransition],
        "expected one reversion at 1600ms, got {reverted:?}"
    );
    Ok(())
}

fn consent_gate(seed: u64) -> Result<()> {
    let mut session = session_from(SelectionState::default(), seed)?;
    let mut sink = ConsentGatedSink::new(EventLog::new(), ConsentPreferences::reject_all());

    session.increment_streak()?;
    session.increment_gems();
    session.flush_events(&mut sink);
    ensure!(sink.inner().is_empty(), "events leaked without consent");
    ensure!(sink.dropped() == 2, "dropped {} events", sink.dropped());

    sink.set_consent(ConsentPreferences::accept_all());
    session.upsell_cta_clicked();
    session.flush_events(&mut sink);
    ensure!(sink.inner().len() == 1, "forwarded {} events", sink.inner().len());
    Ok(())
}

fn resolver_sweep(_seed: u64) -> Result<()> {
    for (index, rule) in rules().iter().enumerate() {
        let Some(sample) = rule.path.first().map(|matcher| sample_path(*matcher)) else {
            continue;
        };
        let Some(winner) = match_rule(normalize_key(&sample), None) else {
            bail!("sample '{sample}' for {} matched nothing", rule.name);
        };
        let position = rules()
            .iter()
            .position(|candidate| candidate.name == winner.name)
            .unwrap_or(usize::MAX);
        ensure!(
            position <= index,
            "sample '{sample}' skipped earlier rule for {}",
            winner.name
        );

        let first = resolve(&sample);
        let second = resolve(&sample);
        ensure!(!first.is_default(), "sample '{sample}' fell back to default");
        ensure!(first.fingerprint() == second.fingerprint());
    }

    let fallback = resolve("images/hero/banner.jpg");
    ensure!(fallback.is_default(), "banner matched {}", fallback.rule);
    Ok(())
}

fn sample_path(matcher: Matcher) -> String {
    match matcher {
        Matcher::Contains(fragment) | Matcher::Equals(fragment) => fragment.to_string(),
        Matcher::ContainsAll(fragments) => fragments.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes_for_sample_seeds() {
        for scenario in SCENARIOS {
            for seed in [1, 1337, u64::MAX] {
                (scenario.run)(seed)
                    .unwrap_or_else(|err| panic!("{} seed {seed}: {err:#}", scenario.name));
            }
        }
    }

    #[test]
    fn finds_scenarios_by_name() {
        assert!(find_scenario("journey-walk").is_some());
        assert!(find_scenario("flying-rug").is_none());
    }

    #[test]
    fn scenario_names_are_unique() {
        let mut names: Vec<&str> = SCENARIOS.iter().map(|scenario| scenario.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SCENARIOS.len());
    }
}
