use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::ControlFlow;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::{Board, Move};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// A board reached during the search, with the chain of moves leading to it.
#[derive(Debug)]
pub struct Node {
    board: Board,
    depth: u32,
    parent: Option<Rc<Node>>,
    action: Option<Move>,
    priority: u32,
}

impl Node {
    pub fn root(board: Board) -> Self {
        Self::new(board, 0, None, None)
    }

    fn new(board: Board, depth: u32, parent: Option<Rc<Node>>, action: Option<Move>) -> Self {
        let priority = depth + board.heuristic();
        Self {
            board,
            depth,
            parent,
            action,
            priority,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of moves from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn parent(&self) -> Option<&Node> {
        self.parent.as_deref()
    }

    /// The move that produced this node. `None` for the root.
    pub fn action(&self) -> Option<&Move> {
        self.action.as_ref()
    }

    /// `depth + heuristic`, computed once on construction.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn generate_successor(self: &Rc<Self>) -> Vec<Node> {
        self.board
            .successors()
            .map(|(mv, board)| {
                Node::new(board, self.depth + 1, Some(Rc::clone(self)), Some(mv))
            })
            .collect()
    }

    pub fn reconstruct_path(&self) -> Solution {
        let mut boards = Vec::new();
        let mut moves = Vec::new();
        for node in std::iter::successors(Some(self), |node| node.parent()) {
            boards.push(node.board.clone());
            moves.push(node.action);
        }
        boards.reverse();
        moves.reverse();
        Solution { boards, moves }
    }
}

/// Boards from the initial one to the goal, paired with the move that produced each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    boards: Vec<Board>,
    moves: Vec<Option<Move>>,
}

impl Solution {
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// One entry per board. The first is always `None`.
    pub fn moves(&self) -> &[Option<Move>] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.iter().flatten().count()
    }

    pub fn steps(&self) -> impl Iterator<Item = (&Board, Option<&Move>)> + '_ {
        self.boards.iter().zip(self.moves.iter().map(Option::as_ref))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(Solution),
    /// Every reachable board was explored without meeting the goal.
    Exhausted,
    /// The monitor stopped the search.
    Aborted,
}

impl Outcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Solved(solution) => Some(solution),
            Outcome::Exhausted | Outcome::Aborted => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Nodes whose successors were generated.
    pub expanded: u64,
    pub generated: u64,
    /// Successors that made it into the open set.
    pub pushed: u64,
    /// Popped nodes dropped because their board was already settled at no greater depth.
    pub stale: u64,
}

/// External budget for a search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_expansions: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl Limits {
    const CLOCK_INTERVAL: u64 = 1024;

    pub fn unlimited() -> Self {
        Self::default()
    }

    /// A monitor for [`astar`] enforcing these limits. The clock is sampled every
    /// `CLOCK_INTERVAL` expansions, the first one included.
    pub fn monitor(&self) -> impl FnMut(&Node) -> ControlFlow<()> {
        let Limits {
            max_expansions,
            time_limit,
        } = *self;
        let start = Instant::now();
        let mut expanded = 0u64;
        move |_: &Node| {
            if max_expansions.map_or(false, |max| expanded >= max) {
                debug!("Expansion limit of {expanded} reached");
                return ControlFlow::Break(());
            }
            if let Some(limit) = time_limit {
                if expanded % Self::CLOCK_INTERVAL == 0 && start.elapsed() >= limit {
                    debug!("Time limit of {limit:?} reached after {expanded} expansions");
                    return ControlFlow::Break(());
                }
            }
            expanded += 1;
            ControlFlow::Continue(())
        }
    }
}

/// Open set entry: lowest priority first, then first pushed.
struct Entry {
    priority: u32,
    seq: u64,
    node: Rc<Node>,
}

impl Entry {
    fn new(node: Node, seq: u64) -> Self {
        Self {
            priority: node.priority,
            seq,
            node: Rc::new(node),
        }
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// A* from `initial` to the first goal board popped.
///
/// `monitor` sees every node right before it is expanded and may stop the search. Successors are
/// pushed whenever their board is unseen or was settled deeper; the visited map itself is only
/// updated when a node is popped, so one board may sit in the open set several times.
pub fn astar(
    initial: Board,
    mut monitor: impl FnMut(&Node) -> ControlFlow<()>,
) -> (Outcome, Stats) {
    let mut stats = Stats::default();
    let mut visited = IndexMap::<Board, u32>::default();
    let mut open = BinaryHeap::new();
    open.push(Entry::new(Node::root(initial), 0));
    let mut next_seq = 1;

    let outcome = loop {
        let Some(Entry { node, .. }) = open.pop() else {
            break Outcome::Exhausted;
        };

        if node.board.is_goal() {
            break Outcome::Solved(node.reconstruct_path());
        }

        if visited
            .get(&node.board)
            .map_or(false, |&depth| depth <= node.depth)
        {
            stats.stale += 1;
            continue;
        }

        if monitor(&node).is_break() {
            break Outcome::Aborted;
        }

        #[cfg(feature = "coz")]
        coz::progress!("Expand");

        trace!(
            "Expanding depth {} priority {}:\n{}",
            node.depth,
            node.priority,
            node.board,
        );
        visited.insert(node.board.clone(), node.depth);
        stats.expanded += 1;

        for child in node.generate_successor() {
            stats.generated += 1;
            if visited
                .get(&child.board)
                .map_or(true, |&depth| depth > child.depth)
            {
                open.push(Entry::new(child, next_seq));
                next_seq += 1;
                stats.pushed += 1;
            }
        }
    };

    debug!(
        "Search finished ({}): {} expanded, {} generated, {} pushed, {} stale, {} boards visited",
        match &outcome {
            Outcome::Solved(solution) => format!("{} moves", solution.move_count()),
            Outcome::Exhausted => "no solution".to_owned(),
            Outcome::Aborted => "aborted".to_owned(),
        },
        stats.expanded,
        stats.generated,
        stats.pushed,
        stats.stale,
        visited.len(),
    );
    (outcome, stats)
}
