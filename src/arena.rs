//! Head-to-head comparison of player lineups over repeated negotiations.
use crate::*;

/// Builds a fresh set of agents, one per seat, for the game with the given index.
pub type Roster<G> = Box<dyn Fn(u64) -> anyhow::Result<Vec<Box<dyn Agent<G>>>>>;

/// Aggregate results of one lineup.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub name: String,
    pub games: usize,
    pub agreements: usize,
    pub failures: usize,
    pub returns: Vec<Utility>,
}

impl Tally {
    fn new(name: &str, seats: usize) -> Self {
        Self {
            name: name.to_string(),
            games: 0,
            agreements: 0,
            failures: 0,
            returns: vec![0.; seats],
        }
    }
    fn witness<E: Edge>(&mut self, outcome: &Outcome<E>) {
        self.games += 1;
        self.agreements += outcome.agreed() as usize;
        for (r, u) in self.returns.iter_mut().zip(outcome.payoff.iter()) {
            *r += u;
        }
    }
    fn fail(&mut self) {
        self.games += 1;
        self.failures += 1;
    }
    /// Folds another tally of the same lineup into this one.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.agreements += other.agreements;
        self.failures += other.failures;
        for (r, u) in self.returns.iter_mut().zip(other.returns.iter()) {
            *r += u;
        }
    }
    /// Mean payoff of one seat per game played.
    pub fn average(&self, seat: Seat) -> Utility {
        self.returns[seat.index()] / self.games.max(1) as Utility
    }
    pub fn agreement_rate(&self) -> f32 {
        self.agreements as f32 / self.games.max(1) as f32
    }
    /// Mean total utility across seats per game played.
    pub fn welfare(&self) -> Utility {
        self.returns.iter().sum::<Utility>() / self.games.max(1) as Utility
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let averages = (0..self.returns.len())
            .map(|i| format!("{:>8.2}", self.average(Seat::from(i))))
            .collect::<String>();
        write!(
            f,
            "{:<10}{:>8.0}%{:>8.2}{}{:>6} failed",
            self.name,
            100. * self.agreement_rate(),
            self.welfare(),
            averages,
            self.failures
        )
    }
}

/// Plays `games` negotiations per lineup.
pub struct Arena<'a, G>
where
    G: Game,
{
    game: &'a G,
    games: usize,
    lineups: Vec<(String, Roster<G>)>,
}

impl<'a, G> Arena<'a, G>
where
    G: Game,
{
    pub fn new(game: &'a G, games: usize) -> Self {
        Self {
            game,
            games,
            lineups: Vec::new(),
        }
    }
    pub fn lineup(mut self, name: &str, roster: Roster<G>) -> Self {
        self.lineups.push((name.to_string(), roster));
        self
    }

    /// Failed negotiations count as played games with no payoff.
    pub async fn run(&self) -> anyhow::Result<Vec<Tally>> {
        let mut tallies = Vec::with_capacity(self.lineups.len());
        for (name, roster) in self.lineups.iter() {
            let mut tally = Tally::new(name, self.game.seats());
            for i in 0..self.games {
                let agents = roster(i as u64)?;
                match Negotiation::new(self.game, agents)?.run().await {
                    Ok(ref outcome) => tally.witness(outcome),
                    Err(e) => {
                        log::warn!("{} game {} failed: {:#}", name, i + 1, e);
                        tally.fail();
                    }
                }
            }
            log::info!("{}", tally);
            tallies.push(tally);
        }
        Ok(tallies)
    }
}
