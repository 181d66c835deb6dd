use clap::Parser;
use statewalk::{
    error::Result,
    examples::pegs::PegsPuzzle,
    solver::{bfs::BfsSolver, engine::PuzzleSolver, stats::render_stats_table},
};

/// Solve a cross-shaped peg solitaire board down to a single peg.
///
/// The full English board (`--size 7 --arm-size 3`) has a state space in
/// the hundreds of millions; sizing the Bloom filter generously keeps the
/// search inside a fixed memory budget at the cost of (rarely) pruning a
/// viable branch.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 7)]
    size: usize,

    #[arg(long, default_value_t = 3)]
    arm_size: usize,

    #[arg(long, default_value_t = 100_000_000)]
    expected_insertions: u64,

    #[arg(long, default_value_t = 0.0001)]
    fpp: f64,

    /// Filter successors of each state concurrently.
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let puzzle = PegsPuzzle::cross(args.size, args.arm_size)?;
    println!(
        "Solving a {size} x {size} cross with {pegs} pegs",
        size = args.size,
        pegs = puzzle.pegs().len()
    );

    let solver = BfsSolver::sized(args.expected_insertions, args.fpp).parallel(args.parallel);
    match puzzle.solve(&solver)? {
        Some(path) => {
            for state in &path {
                println!("{state}");
            }
            println!("solved in {} jumps", path.len() - 1);
        }
        None => println!("no solution found"),
    }
    println!("{}", render_stats_table(&solver.last_stats()));

    Ok(())
}
