use std::collections::{VecDeque, hash_map::Entry};

use rustc_hash::FxHashMap;

use crate::{Board, MoveTable, SolitaireError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Every board from the start to a single remaining peg, both included.
    Solved(Vec<Board>),
    Unsolvable,
    TimedOut,
}

/// Upper bounds for a single search run. The default is unbounded.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SearchLimits {
    pub max_expansions: Option<u64>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SearchStats {
    /// Boards taken off the frontier and checked for jumps
    pub expanded: u64,
    /// Distinct boards seen, the start included
    pub discovered: u64,
    /// Successors dropped because they were seen before
    pub duplicates_skipped: u64,
    pub max_frontier: usize,
}

#[derive(Debug)]
pub struct SearchReport {
    pub result: SolveResult,
    pub stats: SearchStats,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    Bfs,
    Dfs,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
        }
    }

    pub fn solve(
        self,
        start: &Board,
        table: &MoveTable,
        limits: SearchLimits,
    ) -> Result<SearchReport, SolitaireError> {
        match self {
            Strategy::Bfs => bfs(start, table, limits),
            Strategy::Dfs => dfs(start, table, limits),
        }
    }
}

/// Boards waiting to be expanded. The pop order decides the traversal.
pub trait Frontier: Default {
    fn push(&mut self, board: Board);
    fn pop(&mut self) -> Option<Board>;
    fn len(&self) -> usize;
}

impl Frontier for VecDeque<Board> {
    fn push(&mut self, board: Board) {
        self.push_back(board);
    }
    fn pop(&mut self) -> Option<Board> {
        self.pop_front()
    }
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl Frontier for Vec<Board> {
    fn push(&mut self, board: Board) {
        Vec::push(self, board);
    }
    fn pop(&mut self) -> Option<Board> {
        Vec::pop(self)
    }
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

/// Breadth first search. Every jump removes one peg, so all solutions from a
/// board have the same length, and the one found here is as short as any.
pub fn bfs(
    start: &Board,
    table: &MoveTable,
    limits: SearchLimits,
) -> Result<SearchReport, SolitaireError> {
    search::<VecDeque<Board>>(start, table, limits)
}

/// Depth first search. The jump listed last in the table is tried first.
pub fn dfs(
    start: &Board,
    table: &MoveTable,
    limits: SearchLimits,
) -> Result<SearchReport, SolitaireError> {
    search::<Vec<Board>>(start, table, limits)
}

/// Explore the boards reachable from `start` until one with a single peg is
/// taken off the frontier.
///
/// Each board is put on the frontier at most once: `predecessors` records
/// every board when it is first discovered together with the board it was
/// reached from, and the solution path is read back from it.
pub fn search<F: Frontier>(
    start: &Board,
    table: &MoveTable,
    limits: SearchLimits,
) -> Result<SearchReport, SolitaireError> {
    if start.shape() != table.shape() {
        return Err(SolitaireError::InvalidShape {
            message: format!(
                "board has {} rows but the jump table was built for {}",
                start.shape().side(),
                table.shape().side()
            ),
        });
    }

    let mut predecessors: FxHashMap<Board, Option<Board>> = FxHashMap::default();
    predecessors.insert(start.clone(), None);

    let mut frontier = F::default();
    frontier.push(start.clone());

    let mut stats = SearchStats {
        discovered: 1,
        max_frontier: 1,
        ..SearchStats::default()
    };

    while let Some(board) = frontier.pop() {
        if board.is_goal() {
            let path = reconstruct_path(&predecessors, board);
            log::info!(
                "solved in {} jumps. expanded {} boards, skipped {}",
                path.len() - 1,
                stats.expanded,
                stats.duplicates_skipped
            );
            return Ok(SearchReport {
                result: SolveResult::Solved(path),
                stats,
            });
        }

        if limits.max_expansions.is_some_and(|max| stats.expanded >= max) {
            log::warn!(
                "giving up after {} expansions with {} boards still queued",
                stats.expanded,
                frontier.len() + 1
            );
            return Ok(SearchReport {
                result: SolveResult::TimedOut,
                stats,
            });
        }

        stats.expanded += 1;
        for jump in table.legal_jumps(&board) {
            match predecessors.entry(board.apply_jump_unchecked(jump)) {
                Entry::Occupied(_) => stats.duplicates_skipped += 1,
                Entry::Vacant(entry) => {
                    frontier.push(entry.key().clone());
                    entry.insert(Some(board.clone()));
                    stats.discovered += 1;
                }
            }
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }

    log::info!(
        "no solution. expanded {} boards, skipped {}",
        stats.expanded,
        stats.duplicates_skipped
    );
    Ok(SearchReport {
        result: SolveResult::Unsolvable,
        stats,
    })
}

fn reconstruct_path(predecessors: &FxHashMap<Board, Option<Board>>, goal: Board) -> Vec<Board> {
    let mut path = vec![goal];
    while let Some(Some(prev)) = path.last().and_then(|board| predecessors.get(board)) {
        path.push(prev.clone());
    }
    path.reverse();
    path
}
