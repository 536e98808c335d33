//! Planner benchmarks
//!
//! Measures a full turn plan on a busy mid-game board, and a replay of the
//! bundled sample log through the whole tracker.
//!
//! Run with `--no-default-features` to leave the verbose planner tracing out.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deck_advisor::{
    config::AdvisorConfig,
    core::{CardCategory, CardDefinition},
    game::{AdvisorLogger, VerbosityLevel, ZoneSnapshot, ZoneTracker},
    loader::{DeckList, DeckLoader, JsonCatalog},
    strategy::{archetype::ids, CardRankings, PlanView, Planner, StrategyEngine, BEAST_HUNTER},
    Result,
};
use std::path::PathBuf;

fn beast(id: &str, name: &str, cost: u8, attack: u8, health: u8) -> CardDefinition {
    CardDefinition::new(id, name, CardCategory::Minion, cost)
        .with_stats(attack, health)
        .with_race("Beast")
}

fn enemy(id: &str, name: &str, cost: u8, attack: u8, health: u8) -> CardDefinition {
    CardDefinition::new(id, name, CardCategory::Minion, cost).with_stats(attack, health)
}

/// Two taunts, a value target and a full hand with every kind of damage source
fn busy_board() -> ZoneSnapshot {
    ZoneSnapshot::new()
        .with_hand([
            CardDefinition::new(ids::KILL_COMMAND, "Kill Command", CardCategory::Spell, 3),
            CardDefinition::new(ids::QUICK_SHOT, "Quick Shot", CardCategory::Spell, 2),
            CardDefinition::new(ids::EAGLEHORN_BOW, "Eaglehorn Bow", CardCategory::Weapon, 3).with_stats(3, 2),
            beast(ids::TUNDRA_RHINO, "Tundra Rhino", 5, 2, 5),
            beast(ids::STARVING_BUZZARD, "Starving Buzzard", 2, 2, 1),
            beast(ids::HECKLEFANG_HYENA, "Hecklefang Hyena", 2, 2, 4),
            beast(ids::ALLEYCAT, "Alleycat", 1, 1, 1),
        ])
        .with_board([
            beast(ids::SCAVENGING_HYENA, "Scavenging Hyena", 2, 2, 2),
            beast(ids::SUNSCALE_RAPTOR, "Sunscale Raptor", 1, 1, 3),
            beast(ids::BAD_LUCK_ALBATROSS, "Bad Luck Albatross", 3, 4, 3),
        ])
        .with_opponent_board([
            enemy("CS2_179", "Sen'jin Shieldmasta", 4, 3, 5).with_mechanic("Taunt"),
            enemy("CS2_121", "Frostwolf Grunt", 2, 2, 2).with_mechanic("Taunt"),
            enemy("CS2_182", "Chillwind Yeti", 4, 4, 5),
        ])
}

struct ReplaySetup {
    catalog: JsonCatalog,
    deck: DeckList,
    lines: Vec<String>,
}

impl ReplaySetup {
    fn load() -> Result<Self> {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let catalog = JsonCatalog::load_file(&root.join("cards/beast_hunter.json"))?;
        let deck = DeckLoader::load_from_file(&root.join("test_decks/beast_hunter.dck"))?;
        let lines = std::fs::read_to_string(root.join("test_logs/sample_game.log"))?
            .lines()
            .map(str::to_string)
            .collect();
        Ok(ReplaySetup { catalog, deck, lines })
    }

    /// Replay every line; returns the number of messages produced
    fn replay(&self) -> Result<usize> {
        let engine = StrategyEngine::for_deck(&BEAST_HUNTER, &self.deck)?;
        let mut tracker = ZoneTracker::new(&self.catalog, engine, AdvisorConfig::default())
            .with_logger(AdvisorLogger::with_verbosity(VerbosityLevel::Silent));
        let mut produced = 0;
        for line in &self.lines {
            tracker.apply_line(line)?;
            produced += tracker.drain_messages().len();
        }
        Ok(produced)
    }
}

fn bench_plan_turn(c: &mut Criterion) {
    let engine = StrategyEngine::new(&BEAST_HUNTER, CardRankings::from_archetype(&BEAST_HUNTER));
    let snapshot = busy_board();
    let logger = AdvisorLogger::with_verbosity(VerbosityLevel::Silent);

    let mut group = c.benchmark_group("plan_turn");
    for mana in [3u8, 6, 10] {
        group.bench_with_input(BenchmarkId::new("busy_board", mana), &mana, |b, &mana| {
            b.iter(|| {
                let view = PlanView::new(&snapshot, &logger);
                engine
                    .plan_turn(&view, black_box(mana), false)
                    .expect("plan should succeed")
            });
        });
    }
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let setup = match ReplaySetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load resources: {}", e);
            return;
        }
    };
    c.bench_function("replay_sample_game", |b| {
        b.iter(|| setup.replay().expect("replay should succeed"));
    });
}

criterion_group!(benches, bench_plan_turn, bench_replay);
criterion_main!(benches);
