//! Blade Arena headless entry point
//!
//! Runs one seeded battle between the four archetypes and logs the result.
//! Usage: `blade-arena [seed]` (set `RUST_LOG=debug` to see every hit)

use glam::Vec2;

use blade_arena::runner::{prepare_battle, run_fixed_interval};
use blade_arena::sim::{Arena, BattleEngine, BattleOutcome, Blade, Category, EventLog};
use blade_arena::Tuning;

/// Frame interval for the headless driver (~60 Hz)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Safety cap on simulated ticks
const MAX_TICKS: u64 = 100_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    log::info!("Blade Arena (headless) starting with seed {}", seed);

    let arena = Arena::new(Vec2::new(300.0, 300.0), 300.0)?;
    let mut blades = vec![
        Blade::with_category_stats(1, "Dragoon", Category::Attack, 1200.0, 150.0),
        Blade::with_category_stats(2, "Dranzer", Category::Stamina, 1200.0, 150.0),
        Blade::with_category_stats(3, "Draciel", Category::Defense, 1200.0, 150.0),
        Blade::with_category_stats(4, "Byakko", Category::Balance, 1200.0, 150.0),
    ];
    prepare_battle(&mut blades, &arena, seed);

    let mut engine =
        BattleEngine::with_observer(arena, blades, Tuning::instant(), EventLog::new())?;
    let summary = run_fixed_interval(&mut engine, 0.0, FRAME_MS, MAX_TICKS)?;

    let hits = engine.observer().hit_count();
    match summary.outcome {
        Some(BattleOutcome::Winner(id)) => {
            let name = engine
                .blade(id)
                .map(|b| b.display_name())
                .unwrap_or_else(|| format!("Blade #{}", id));
            println!("{} wins after {} ticks ({} hits)", name, summary.ticks, hits);
        }
        Some(BattleOutcome::Draw) => {
            println!("Draw after {} ticks ({} hits)", summary.ticks, hits);
        }
        None => {
            println!("No result after {} ticks", summary.ticks);
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
