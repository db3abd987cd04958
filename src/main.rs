//! Crafting Engine - headless craft runner
//!
//! Loads a workshop data file, builds one crafting session from the command
//! line, resolves it and prints the outcome.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crafting_engine::core::config::CraftingConfig;
use crafting_engine::core::error::{CraftError, Result};
use crafting_engine::core::types::{ActorId, BlueprintId};
use crafting_engine::crafting::{
    ComponentItem, ComponentLibrary, ComponentTier, CraftOutcome, CraftingSession, EquipmentBonuses, LevelGapXp,
    RankOffset, Workshop, WorkshopData,
};

/// Headless craft runner - resolves one crafting attempt
#[derive(Parser, Debug)]
#[command(name = "crafting-engine")]
#[command(about = "Resolve a crafting attempt and print the outcome")]
struct Args {
    /// Workshop data file (blueprints, templates, components)
    #[arg(long, default_value = "data/workshop.toml")]
    data: PathBuf,

    /// Optional crafting config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Blueprint id to craft
    #[arg(long)]
    blueprint: u32,

    /// Crafter skill rank in the blueprint's discipline
    #[arg(long, default_value_t = 1)]
    rank: u32,

    /// Offset applied to rank to get the effective level
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    level_offset: i32,

    /// Item level of the output (defaults to the blueprint level)
    #[arg(long, allow_hyphen_values = true)]
    item_level: Option<i32>,

    /// Equipment bonus points for the blueprint's discipline
    #[arg(long, default_value_t = 0)]
    equipment: i32,

    /// Main tier component resrefs
    #[arg(long = "main")]
    main_components: Vec<String>,

    /// Secondary tier component resrefs
    #[arg(long = "secondary")]
    secondary_components: Vec<String>,

    /// Tertiary tier component resrefs
    #[arg(long = "tertiary")]
    tertiary_components: Vec<String>,

    /// Enhancement tier component resrefs
    #[arg(long = "enhancement")]
    enhancement_components: Vec<String>,

    /// Reduce XP for items below the crafter's rank
    #[arg(long)]
    level_gap_xp: bool,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every property roll
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    seed: u64,
    outcome: CraftOutcome,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "crafting_engine=debug"
        } else {
            "crafting_engine=info"
        })
        .with_writer(std::io::stderr)
        .init();

    let data = WorkshopData::load(&args.data)?;
    let config = match &args.config {
        Some(path) => CraftingConfig::load(path)?,
        None => CraftingConfig::default(),
    };

    let blueprint_id = BlueprintId(args.blueprint);
    let catalog = data.catalog();
    let blueprint = catalog
        .get(blueprint_id)
        .ok_or(CraftError::BlueprintNotFound(blueprint_id))?
        .clone();

    let mut workshop = Workshop::new(catalog, data.registry())
        .with_config(config)
        .with_effective_level(RankOffset(args.level_offset));
    if args.level_gap_xp {
        workshop = workshop.with_xp_adjustment(LevelGapXp::default());
    }

    let actor = ActorId::new();
    workshop.skills.set_rank(actor, blueprint.discipline, args.rank);
    workshop.set_equipment(
        actor,
        EquipmentBonuses::new().with(blueprint.discipline, args.equipment),
    );

    let library = data.component_library();
    let mut session = CraftingSession::new(blueprint_id, args.item_level.unwrap_or(blueprint.level));
    let tiers = [
        (ComponentTier::Main, &args.main_components),
        (ComponentTier::Secondary, &args.secondary_components),
        (ComponentTier::Tertiary, &args.tertiary_components),
        (ComponentTier::Enhancement, &args.enhancement_components),
    ];
    for (tier, resrefs) in tiers {
        for resref in resrefs {
            let component = take_component(&library, resref)?;
            session.add_component(tier, component);
        }
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!(
        "Crafting {} (rank {}, item level {}, seed {})",
        blueprint.name,
        args.rank,
        session.adjusted_level,
        seed
    );

    workshop.begin_crafting(actor, session)?;
    let outcome = workshop.complete_crafting(actor, &mut rng)?;

    match args.format.as_str() {
        "text" => print_text(&outcome),
        _ => {
            let result = RunResult { seed, outcome };
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CraftError::Parse(e.to_string()))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn take_component(library: &ComponentLibrary, resref: &str) -> Result<ComponentItem> {
    library
        .take(resref)
        .ok_or_else(|| CraftError::UnknownTemplate(resref.to_string()))
}

fn print_text(outcome: &CraftOutcome) {
    match outcome {
        CraftOutcome::CriticalFailure { components_lost, .. } => {
            println!(
                "Critical failure! Not enough skill to create that item. {} components were lost.",
                components_lost
            );
        }
        CraftOutcome::Success(report) => {
            for roll in &report.rolls {
                let verdict = if roll.success { "applied" } else { "failed" };
                println!(
                    "  {} {} from {} (roll {:.1} vs {:.1})",
                    verdict,
                    roll.property_name(),
                    roll.component,
                    roll.roll,
                    roll.chance
                );
            }
            let quantity: u32 = report.items.iter().map(|i| i.quantity).sum();
            if let Some(first) = report.items.first() {
                println!("Created {}x {}", quantity, first.name);
                for property in &first.properties {
                    println!("  {}", property.display_name());
                }
            }
            println!(
                "{} properties transferred, {} xp awarded",
                report.success_count, report.xp_awarded
            );
        }
    }
}
