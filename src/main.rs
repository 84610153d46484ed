mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use common::{
    Board, MoveTable,
    coord::{Position, Triangle},
    search::{SearchLimits, SolveResult, Strategy},
};

#[derive(Parser, Debug)]
#[command(about = "Solve triangular peg solitaire down to a single peg")]
struct Args {
    /// Number of rows of the triangle
    #[arg(long, default_value_t = 5)]
    rows: usize,

    /// Hole that starts empty, numbered row by row from the top starting at 1
    #[arg(long, default_value_t = 5)]
    hole: usize,

    /// Starting board drawn with `#` for pegs and `.` for holes, whitespace
    /// is ignored. Replaces --rows and --hole
    #[arg(long, conflicts_with_all = ["rows", "hole"])]
    board: Option<String>,

    /// Which searches to run
    #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
    strategy: StrategyArg,

    /// Give up after expanding this many boards
    #[arg(long)]
    max_expansions: Option<u64>,

    /// Print the boards without highlighting
    #[arg(long)]
    no_color: bool,

    /// More logging, repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyArg {
    Bfs,
    Dfs,
    /// BFS first, then DFS
    Both,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Bfs => vec![Strategy::Bfs],
            StrategyArg::Dfs => vec![Strategy::Dfs],
            StrategyArg::Both => vec![Strategy::Bfs, Strategy::Dfs],
        }
    }
}

fn start_board(args: &Args) -> Result<Board> {
    if let Some(text) = &args.board {
        return Board::from_ascii(text).context("could not parse --board");
    }

    let shape = Triangle::new(args.rows).context("invalid --rows")?;
    Board::with_hole(shape, Position(args.hole)).context("invalid --hole")
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);
    if args.no_color {
        colored::control::set_override(false);
    }

    let start = start_board(&args)?;
    let table = MoveTable::new(start.shape());
    let limits = SearchLimits {
        max_expansions: args.max_expansions,
    };
    log::info!(
        "{} rows, {} pegs, {} candidate jumps",
        start.shape().side(),
        start.peg_count(),
        table.len()
    );

    for strategy in args.strategy.strategies() {
        let name = strategy.name();
        println!("{name} finder:");

        let report = strategy
            .solve(&start, &table, limits)
            .with_context(|| format!("{name} search failed"))?;
        log::debug!("{name} stats: {:?}", report.stats);

        match report.result {
            SolveResult::Solved(path) => {
                print!("{}", render::draw_path(&path));
                println!("{name} solution found in {} jumps:", path.len() - 1);
                if let Some(last) = path.last() {
                    print!("{last}");
                }
            }
            SolveResult::Unsolvable => println!("No solution!"),
            SolveResult::TimedOut => println!(
                "Search budget exhausted after {} expansions",
                report.stats.expanded
            ),
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("triangle-solitaire").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_default_board() {
        let args = parse(&[]);
        assert_eq!(args.strategy, StrategyArg::Both);
        assert_eq!(start_board(&args).unwrap(), Board::default_start());
    }

    #[test]
    fn test_rows_and_hole() {
        let board = start_board(&parse(&["--rows", "6", "--hole", "1"])).unwrap();
        assert_eq!(board.shape().side(), 6);
        assert_eq!(board.peg_count(), 20);
        assert_eq!(board.is_occupied(Position(1)), Ok(false));

        assert!(start_board(&parse(&["--hole", "16"])).is_err());
        assert!(start_board(&parse(&["--rows", "0"])).is_err());
        let huge = usize::MAX.to_string();
        assert!(start_board(&parse(&["--rows", huge.as_str()])).is_err());
    }

    #[test]
    fn test_ascii_board() {
        let board = start_board(&parse(&["--board", "# ## #.# #### #####"])).unwrap();
        assert_eq!(board, Board::default_start());

        assert!(start_board(&parse(&["--board", "# #"])).is_err());
        assert!(
            Args::try_parse_from(["triangle-solitaire", "--board", "#", "--hole", "1"]).is_err()
        );
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            parse(&["--strategy", "both"]).strategy.strategies(),
            vec![Strategy::Bfs, Strategy::Dfs]
        );
        assert_eq!(
            parse(&["--strategy", "dfs"]).strategy.strategies(),
            vec![Strategy::Dfs]
        );
    }
}
