use clap::Parser;
use forest_fire_core::{
    FireAutomaton, FireConfig, FireResult, FireStatistics, StepResult, DEFAULT_EMBER_STAGES,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Forest fire percolation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Runs a forest fire from the left edge until it burns out", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Probability that a cell starts as a tree (0-1)
    #[arg(short, long, default_value_t = 0.6)]
    density: f64,

    /// Wrap the left and right edges
    #[arg(long)]
    wrap_horizontal: bool,

    /// Wrap the top and bottom edges
    #[arg(long)]
    wrap_vertical: bool,

    /// Cooling stages between burning and burned
    #[arg(short, long, default_value_t = DEFAULT_EMBER_STAGES)]
    ember_stages: u8,

    /// Forest generator seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many ticks even if the fire is still going
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 10)]
    report_interval: u64,
}

fn main() -> FireResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("=== Forest Fire Demo ===\n");

    let config = FireConfig::new(args.width, args.height, args.density)
        .with_wrap(args.wrap_horizontal, args.wrap_vertical)
        .with_ember_stages(args.ember_stages)
        .with_seed(args.seed);
    let mut automaton = FireAutomaton::from_config(config)?;

    let initial = FireStatistics::par_from_cells(automaton.grid().cells());
    println!(
        "Grid {}x{}: {} trees, {} empty, {} burning",
        args.width,
        args.height,
        initial.tree,
        initial.empty,
        initial.burning
    );

    let report_interval = args.report_interval.max(1);
    loop {
        match automaton.step() {
            StepResult::Running => {
                let tick = automaton.tick();
                if tick.is_multiple_of(report_interval) {
                    info!(
                        tick,
                        burning = automaton.burning_count(),
                        embers = automaton.ember_count(),
                        burned_fraction = automaton.burned_fraction(),
                        "fire progress"
                    );
                }
                if tick >= args.max_ticks {
                    warn!(tick, "stopping at max ticks before the fire burned out");
                    break;
                }
            }
            StepResult::JustCompleted | StepResult::AlreadyComplete => break,
        }
    }

    let stats = automaton.statistics();
    println!("\n=== Final Statistics ===");
    match automaton.completion_tick() {
        Some(tick) => println!("Completed at tick:  {}", tick),
        None => println!("Stopped at tick:    {}", automaton.tick()),
    }
    println!("Trees left:         {}", stats.tree);
    println!("Burned:             {}", stats.burned);
    println!("Still active:       {}", stats.burning + stats.ember);
    println!("Empty:              {}", stats.empty);
    println!("Burned fraction:    {:.4}", stats.burned_fraction());

    Ok(())
}
