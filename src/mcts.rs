//! UCT Monte Carlo tree search over perfect-information histories.
use crate::*;
use petgraph::Direction;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Search statistics of one history.
#[derive(Debug, Clone)]
struct Node<E> {
    history: History<E>,
    visits: u32,
    value: Payoff,
}

/// The line of play found by search.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan<E> {
    pub path: History<E>,
    pub payoff: Payoff,
}

impl<E> Plan<E>
where
    E: Edge,
{
    /// The last action `seat` takes along the plan.
    pub fn advice(&self, seat: Seat) -> Option<E> {
        self.path
            .moves()
            .iter()
            .rev()
            .find(|(s, _)| *s == seat)
            .map(|(_, e)| *e)
    }
}

/// Upper-confidence tree search.
///
/// Every iteration descends from the root, expanding the first untried
/// action it meets or following the child with the best UCT score, then
/// finishes the game with uniformly random moves and adds the payoff to
/// every node on the way back up.
pub struct Mcts<G>
where
    G: Game,
{
    game: G,
    exploration: f32,
    rng: SmallRng,
    tree: DiGraph<Node<G::E>, G::E>,
    root: NodeIndex,
}

impl<G> Mcts<G>
where
    G: Game,
{
    pub fn new(game: G, exploration: f32, seed: u64) -> Self {
        let mut tree = DiGraph::new();
        let root = tree.add_node(Node {
            history: History::default(),
            visits: 0,
            value: vec![0.; game.seats()],
        });
        Self {
            game,
            exploration,
            rng: SmallRng::seed_from_u64(seed),
            tree,
            root,
        }
    }
    pub fn game(&self) -> &G {
        &self.game
    }
    pub fn nodes(&self) -> usize {
        self.tree.node_count()
    }

    /// Runs up to `iterations` playouts and returns the most-visited line.
    pub fn solve(&mut self, iterations: usize) -> Plan<G::E> {
        let start = std::time::Instant::now();
        for i in 0..iterations {
            let leaf = self.select();
            let payoff = self.rollout(leaf);
            self.backpropagate(leaf, &payoff);
            if crate::interrupted() {
                log::warn!("search interrupted after {} playouts", i + 1);
                break;
            }
        }
        let plan = self.plan();
        log::info!(
            "searched {} nodes in {:.1?}, plan {} pays {:?}",
            self.nodes(),
            start.elapsed(),
            plan.path,
            plan.payoff
        );
        plan
    }

    /// Follows most-visited children from the root to a leaf.
    pub fn plan(&self) -> Plan<G::E> {
        let mut node = self.root;
        while let Some(child) = self
            .children(node)
            .into_iter()
            .max_by_key(|child| self.tree[*child].visits)
        {
            node = child;
        }
        let path = self.tree[node].history.clone();
        let payoff = self.game.payoff(&path);
        Plan { path, payoff }
    }

    fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .tree
            .neighbors_directed(node, Direction::Outgoing)
            .collect::<Vec<_>>();
        children.sort();
        children
    }

    fn select(&mut self) -> NodeIndex {
        let mut node = self.root;
        loop {
            let ref history = self.tree[node].history;
            let seat = match self.game.turn(history) {
                Turn::Terminal => return node,
                Turn::Seat(seat) => seat,
            };
            let tried = self
                .tree
                .edges_directed(node, Direction::Outgoing)
                .map(|edge| *edge.weight())
                .collect::<Vec<_>>();
            match self
                .game
                .choices(seat)
                .into_iter()
                .find(|e| !tried.contains(e))
            {
                Some(edge) => return self.expand(node, seat, edge),
                None => match self.best(node, seat) {
                    Some(child) => node = child,
                    None => return node,
                },
            }
        }
    }

    fn expand(&mut self, parent: NodeIndex, seat: Seat, edge: G::E) -> NodeIndex {
        let history = self.tree[parent].history.with(seat, edge);
        let child = self.tree.add_node(Node {
            history,
            visits: 0,
            value: vec![0.; self.game.seats()],
        });
        self.tree.add_edge(parent, child, edge);
        child
    }

    /// The child maximizing `Q + c * sqrt(2 ln N / n)` for the acting seat.
    fn best(&self, parent: NodeIndex, seat: Seat) -> Option<NodeIndex> {
        let n = self.tree[parent].visits.max(1) as f32;
        self.children(parent).into_iter().max_by(|a, b| {
            let a = self.score(*a, seat, n);
            let b = self.score(*b, seat, n);
            a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    fn score(&self, child: NodeIndex, seat: Seat, parent: f32) -> f32 {
        let ref node = self.tree[child];
        let visits = node.visits.max(1) as f32;
        let exploit = node.value[seat.index()] / visits;
        let explore = self.exploration * (2. * parent.ln() / visits).sqrt();
        exploit + explore
    }

    fn rollout(&mut self, leaf: NodeIndex) -> Payoff {
        let mut history = self.tree[leaf].history.clone();
        while let Turn::Seat(seat) = self.game.turn(&history) {
            match self.game.choices(seat).choose(&mut self.rng) {
                Some(edge) => history.push(seat, *edge),
                None => break,
            }
        }
        self.game.payoff(&history)
    }

    fn backpropagate(&mut self, leaf: NodeIndex, payoff: &Payoff) {
        let mut node = Some(leaf);
        while let Some(index) = node {
            let ref mut stats = self.tree[index];
            stats.visits += 1;
            for (v, p) in stats.value.iter_mut().zip(payoff.iter()) {
                *v += p;
            }
            node = self
                .tree
                .neighbors_directed(index, Direction::Incoming)
                .next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn classic_plan_meets_on_wednesday() {
        let game = Scenario::classic().build().unwrap();
        let mut mcts = Mcts::new(game, MCTS_EXPLORATION, 0);
        let plan = mcts.solve(2000);
        assert_eq!(mcts.game().consensus(&plan.path), Some(Slot::from(2)));
        assert_eq!(plan.payoff, vec![3., 2.]);
        assert_eq!(plan.advice(Seat::from(1)), Some(Slot::from(2)));
    }

    #[test]
    fn plan_collects_the_unanimous_bonus() {
        let attendee = |slots: &[usize], value: Utility| Attendee {
            name: String::from("x"),
            availability: slots.iter().copied().map(Slot::from).collect(),
            valuations: slots.iter().map(|s| (Slot::from(*s), value)).collect::<BTreeMap<_, _>>(),
        };
        let game = Meeting::new(
            Calendar::days(),
            vec![attendee(&[0, 1], 1.), attendee(&[1, 2], 2.), attendee(&[0, 1, 2], 3.)],
            2,
            UNANIMOUS_BONUS,
            Protocol::Public,
        )
        .unwrap();
        let mut mcts = Mcts::new(game, MCTS_EXPLORATION, 3);
        let plan = mcts.solve(MCTS_ITERATIONS);
        assert!(mcts.game().consensus(&plan.path).is_some());
        assert_eq!(plan.payoff, vec![101., 102., 103.]);
    }

    #[test]
    fn advice_is_the_last_own_move() {
        let plan = Plan {
            path: History::from(vec![
                (Seat::from(0), Slot::from(0)),
                (Seat::from(1), Slot::from(1)),
                (Seat::from(0), Slot::from(2)),
            ]),
            payoff: vec![0., 0.],
        };
        assert_eq!(plan.advice(Seat::from(0)), Some(Slot::from(2)));
        assert_eq!(plan.advice(Seat::from(2)), None);
    }
}
