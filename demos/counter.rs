use clap::Parser;
use statewalk::{
    error::Result,
    examples::counter::CounterState,
    solver::{
        bfs::BfsSolver,
        dfs::DfsSolver,
        engine::PuzzleSolver,
        stats::{render_stats_table, FilterStats},
    },
};

/// Search the counter puzzle: from `start`, each move is `3n - 1` or
/// `n / 2`, and the goal is to reach `target` exactly.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 1)]
    start: i64,

    #[arg(long, default_value_t = 1_000)]
    target: i64,

    /// Use depth-first search instead of breadth-first.
    #[arg(long)]
    dfs: bool,

    /// Maximum depth for depth-first search.
    #[arg(long, default_value_t = 20)]
    max_depth: usize,

    /// Filter successors of each state concurrently.
    #[arg(long)]
    parallel: bool,

    /// Expected distinct states, for Bloom filter sizing. Zero keeps the
    /// exact filter.
    #[arg(long, default_value_t = 0)]
    expected_insertions: u64,

    /// Target false positive probability for the Bloom filter.
    #[arg(long, default_value_t = 0.0001)]
    fpp: f64,

    /// Print the filter statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let initial = CounterState::new(args.start, args.target);
    let (solution, stats): (Option<Vec<CounterState>>, FilterStats) = if args.dfs {
        let solver = if args.expected_insertions > 0 {
            DfsSolver::sized(args.expected_insertions, args.fpp)
        } else {
            DfsSolver::new()
        }
        .with_max_depth(args.max_depth)
        .parallel(args.parallel);
        (solver.solution(initial)?, solver.last_stats())
    } else {
        let solver = if args.expected_insertions > 0 {
            BfsSolver::sized(args.expected_insertions, args.fpp)
        } else {
            BfsSolver::new()
        }
        .parallel(args.parallel);
        (solver.solution(initial)?, solver.last_stats())
    };

    match solution {
        Some(path) => {
            let moves: Vec<String> = path.iter().map(|s| s.to_string()).collect();
            println!("solved in {} moves: [{}]", path.len() - 1, moves.join(", "));
        }
        None => println!("no solution found"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats).expect("stats serialize"));
    } else {
        println!("{}", render_stats_table(&stats));
    }

    Ok(())
}
