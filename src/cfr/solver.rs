//! The generic training loop and its counterfactual walk.
use crate::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::marker::PhantomData;

/// Instantaneous regret and strategy contribution at one information set.
#[derive(Debug, Clone)]
pub struct Counterfactual<E> {
    pub info: Info<E>,
    pub regret: Vec<(E, Utility)>,
    pub policy: Vec<(E, Probability)>,
}

/// Full-width CFR updating every seat each epoch.
pub type VanillaCfr<G> = Cfr<G, VanillaSampling, SummedRegret, ConstantWeight>;
/// External-sampling Monte Carlo CFR with one traverser per epoch.
pub type ExternalCfr<G> = Cfr<G, ExternalSampling, SummedRegret, ConstantWeight>;
/// Monte Carlo CFR following one sampled line per epoch, for games too
/// large to expand every traverser action.
pub type RolloutCfr<G> = Cfr<G, RolloutSampling, SummedRegret, ConstantWeight>;

/// The training orchestrator.
///
/// # Type Parameters
///
/// - **`G: Game`**: the rules being solved
/// - **`S: SamplingScheme`**: which seats are expanded and updated
/// - **`R: RegretSchedule`**: how regrets accumulate (vanilla, CFR+)
/// - **`W: PolicySchedule`**: how strategy weights accumulate (constant, linear)
///
/// Each epoch walks the tree from the empty history, collects one
/// [`Counterfactual`] per visited information set of the updated seats,
/// then applies them to the [`Profile`].
pub struct Cfr<G, S, R, W>
where
    G: Game,
{
    game: G,
    seed: u64,
    profile: Profile<G::E>,
    schedule: PhantomData<(S, R, W)>,
}

impl<G, S, R, W> Cfr<G, S, R, W>
where
    G: Game,
    S: SamplingScheme,
    R: RegretSchedule,
    W: PolicySchedule,
{
    pub fn new(game: G, seed: u64) -> Self {
        Self::resume(game, seed, Profile::default())
    }
    /// Continues training from an existing profile.
    pub fn resume(game: G, seed: u64, profile: Profile<G::E>) -> Self {
        Self {
            game,
            seed,
            profile,
            schedule: PhantomData,
        }
    }
    pub fn game(&self) -> &G {
        &self.game
    }
    pub fn profile(&self) -> &Profile<G::E> {
        &self.profile
    }
    pub fn strategy(&self) -> Strategy<G::E> {
        self.profile.strategy()
    }

    /// Runs up to `iterations` epochs, stopping early on interrupt.
    pub fn train(&mut self, iterations: usize) {
        let start = std::time::Instant::now();
        let mut checkpoint = start;
        log::info!("training {} epochs on {} seats", iterations, self.game.seats());
        for _ in 0..iterations {
            self.step();
            if checkpoint.elapsed() >= TRAINING_LOG_INTERVAL {
                checkpoint = std::time::Instant::now();
                log::info!("{:<16}{:<16}", format!("epoch {}", self.profile.epochs()), format!("infos {}", self.profile.len()));
            }
            if crate::interrupted() {
                log::warn!("training interrupted at epoch {}", self.profile.epochs());
                break;
            }
        }
        log::info!(
            "trained {} epochs over {} information sets in {:.1?}",
            self.profile.epochs(),
            self.profile.len(),
            start.elapsed()
        );
    }

    /// One epoch: traverse, then update regrets and weights, then advance.
    pub fn step(&mut self) {
        let epoch = self.profile.epochs();
        let walker = S::walker(epoch, self.game.seats());
        let ref mut rng = SmallRng::seed_from_u64(self.seed.wrapping_add(epoch as u64));
        let ref mut updates = Vec::new();
        let ref reach = vec![1.; self.game.seats()];
        self.walk(&History::default(), reach, walker, rng, updates);
        for update in updates.iter() {
            self.update_regret(update, epoch);
            self.update_weight(update, epoch);
        }
        self.profile.advance();
    }

    fn update_regret(&mut self, cfr: &Counterfactual<G::E>, epoch: usize) {
        for (edge, delta) in cfr.regret.iter() {
            let memory = self.profile.entry(&cfr.info, edge);
            memory.regret = R::gain(memory.regret, *delta, epoch);
        }
    }

    fn update_weight(&mut self, cfr: &Counterfactual<G::E>, epoch: usize) {
        for (edge, delta) in cfr.policy.iter() {
            let memory = self.profile.entry(&cfr.info, edge);
            memory.weight = W::learn(memory.weight, *delta, epoch);
        }
    }

    /// Expected payoff of `history` for every seat under the current policy.
    ///
    /// `reach` holds each seat's own contribution to the probability of
    /// reaching `history`. Without a walker every seat is expanded and its
    /// regret is weighted by the other seats' reach. With a walker only its
    /// nodes are expanded, other seats are sampled, and regret is unweighted.
    /// Under rollouts the walker recurses into one sampled action and values
    /// the rest by [`Self::playout`].
    fn walk(
        &self,
        history: &History<G::E>,
        reach: &[Probability],
        walker: Option<Seat>,
        rng: &mut SmallRng,
        updates: &mut Vec<Counterfactual<G::E>>,
    ) -> Payoff {
        let seat = match self.game.turn(history) {
            Turn::Terminal => return self.game.payoff(history),
            Turn::Seat(seat) => seat,
        };
        let ref info = self.game.info(history);
        let ref choices = self.game.choices(seat);
        let policy = self.profile.policy(info, choices);
        if walker.is_some_and(|w| w != seat) {
            return match sample(&policy, rng) {
                Some(edge) => self.walk(&history.with(seat, edge), reach, walker, rng, updates),
                None => self.game.payoff(history),
            };
        }
        let chosen = match S::rollouts() {
            true => sample(&policy, rng),
            false => None,
        };
        let mut value = vec![0.; self.game.seats()];
        let mut children = Vec::with_capacity(policy.len());
        for (edge, probability) in policy.iter() {
            let mut next = reach.to_vec();
            next[seat.index()] *= probability;
            let ref child = history.with(seat, *edge);
            let child = match chosen {
                Some(ref c) if c != edge => self.playout(child, rng),
                _ => self.walk(child, &next, walker, rng, updates),
            };
            for (v, c) in value.iter_mut().zip(child.iter()) {
                *v += probability * c;
            }
            children.push((*edge, child[seat.index()]));
        }
        let others = match walker {
            Some(_) => 1.,
            None => reach
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != seat.index())
                .map(|(_, r)| r)
                .product::<Probability>(),
        };
        let own = reach[seat.index()];
        updates.push(Counterfactual {
            info: info.clone(),
            regret: children
                .iter()
                .map(|(edge, v)| (*edge, others * (v - value[seat.index()])))
                .collect(),
            policy: policy.iter().map(|(edge, p)| (*edge, own * p)).collect(),
        });
        value
    }

    /// Payoff of one line sampled from the current policy, without updates.
    fn playout(&self, history: &History<G::E>, rng: &mut SmallRng) -> Payoff {
        let mut history = history.clone();
        loop {
            let seat = match self.game.turn(&history) {
                Turn::Terminal => return self.game.payoff(&history),
                Turn::Seat(seat) => seat,
            };
            let ref info = self.game.info(&history);
            let policy = self.profile.policy(info, &self.game.choices(seat));
            match sample(&policy, rng) {
                Some(edge) => history = history.with(seat, edge),
                None => return self.game.payoff(&history),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn dilemma_learns_to_defect() {
        let mut cfr = VanillaCfr::new(Bimatrix::prisoners_dilemma(), 0);
        cfr.train(500);
        let strategy = cfr.strategy();
        for seat in Seat::all(2) {
            let info = Info::from((seat, History::default()));
            assert!(strategy.probability(&info, &[Move::C, Move::D], &Move::D) > 0.99);
        }
    }

    #[test]
    fn classic_meeting_accepts_wednesday_at_the_deadline() {
        let game = Scenario::classic().build().unwrap();
        let (bob, suzy) = (Seat::from(0), Seat::from(1));
        let (mon, tue, wed) = (Slot::from(0), Slot::from(1), Slot::from(2));
        let mut cfr = VanillaCfr::new(game, 0);
        cfr.train(CFR_ITERATIONS / 10);
        let history = History::from(vec![(bob, mon), (suzy, tue), (bob, mon), (suzy, tue), (bob, wed)]);
        let ref info = cfr.game().info(&history);
        let policy = cfr.profile().policy(info, &[tue, wed]);
        assert_eq!(greedy(&policy), Some(wed));
        assert_eq!(policy, vec![(tue, 0.), (wed, 1.)]);
    }

    #[test]
    fn external_sampling_finds_the_common_slot() {
        let calendar = Calendar::from(vec!["A", "B", "C"]);
        let valued = |slots: &[usize]| Attendee {
            name: String::from("x"),
            availability: slots.iter().copied().map(Slot::from).collect(),
            valuations: slots.iter().map(|s| (Slot::from(*s), 1.)).collect::<BTreeMap<_, _>>(),
        };
        let game = Meeting::new(
            calendar,
            vec![valued(&[0, 1]), valued(&[1, 2]), valued(&[0, 1, 2])],
            1,
            0.,
            Protocol::Private,
        )
        .unwrap();
        let (a, b, c) = (Slot::from(0), Slot::from(1), Slot::from(2));
        let mut cfr = ExternalCfr::new(game, 7);
        cfr.train(MCCFR_ITERATIONS);
        let last = History::from(vec![(Seat::from(0), b), (Seat::from(1), b)]);
        let ref info = cfr.game().info(&last);
        assert_eq!(greedy(&cfr.profile().policy(info, &[a, b, c])), Some(b));
        let root = Info::from((Seat::from(0), History::default()));
        assert!(cfr.strategy().probability(&root, &[a, b], &b) > 0.9);
    }

    #[test]
    fn rollouts_find_the_common_slot() {
        let calendar = Calendar::from(vec!["A", "B", "C"]);
        let valued = |slots: &[usize]| Attendee {
            name: String::from("x"),
            availability: slots.iter().copied().map(Slot::from).collect(),
            valuations: slots.iter().map(|s| (Slot::from(*s), 1.)).collect::<BTreeMap<_, _>>(),
        };
        let game = Meeting::new(
            calendar,
            vec![valued(&[0, 1]), valued(&[1, 2]), valued(&[0, 1, 2])],
            1,
            0.,
            Protocol::Private,
        )
        .unwrap();
        let (a, b, c) = (Slot::from(0), Slot::from(1), Slot::from(2));
        let mut cfr = RolloutCfr::new(game, 7);
        cfr.train(MCCFR_ITERATIONS);
        let last = History::from(vec![(Seat::from(0), b), (Seat::from(1), b)]);
        let ref info = cfr.game().info(&last);
        assert_eq!(greedy(&cfr.profile().policy(info, &[a, b, c])), Some(b));
    }

    #[test]
    fn rollouts_stay_bounded_on_large_meetings() {
        let game = Scenario::conference(chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
            .build()
            .unwrap();
        let rounds = game.rounds();
        assert_eq!(tree_size(&game, EXACT_TREE_LIMIT), None);
        let mut cfr = RolloutCfr::new(game, 0);
        let epochs = 20;
        cfr.train(epochs);
        assert_eq!(cfr.profile().epochs(), epochs);
        assert!(cfr.profile().len() <= epochs * rounds);
    }

    #[test]
    fn floored_regret_never_goes_negative() {
        let mut cfr = Cfr::<_, VanillaSampling, FlooredRegret, LinearWeight>::new(Bimatrix::prisoners_dilemma(), 0);
        cfr.train(50);
        let info = Info::from((Seat::from(0), History::default()));
        assert_eq!(cfr.profile().memory(&info, &Move::C).regret, 0.);
        assert!(cfr.profile().memory(&info, &Move::D).regret > 0.);
    }
}
