//! One negotiation: agents take turns until the game ends.
use crate::*;
use anyhow::Context;

/// How a negotiation ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<E> {
    pub history: History<E>,
    pub payoff: Payoff,
    pub consensus: Option<E>,
}

impl<E> Outcome<E>
where
    E: Edge,
{
    pub fn agreed(&self) -> bool {
        self.consensus.is_some()
    }
    /// One line per move, with the game's own action labels.
    pub fn transcript<G: Game<E = E>>(&self, game: &G) -> Vec<String> {
        self.history
            .moves()
            .iter()
            .map(|(seat, edge)| format!("{} -> {}", seat, game.label(edge)))
            .collect()
    }
    /// How play ended, worded for games with and without agreements.
    pub fn summary<G: Game<E = E>>(&self, game: &G) -> String {
        let moves = self.history.len();
        match self.consensus {
            Some(ref edge) => format!("agreement on {} after {} moves", game.label(edge), moves),
            None if game.negotiates() => format!("no agreement after {} moves", moves),
            None => format!("finished after {} moves with payoff {:?}", moves, self.payoff),
        }
    }
}

/// One agent per seat playing a single game.
pub struct Negotiation<'a, G>
where
    G: Game,
{
    game: &'a G,
    agents: Vec<Box<dyn Agent<G>>>,
}

impl<'a, G> Negotiation<'a, G>
where
    G: Game,
{
    pub fn new(game: &'a G, agents: Vec<Box<dyn Agent<G>>>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            agents.len() == game.seats(),
            "{} agents for {} seats",
            agents.len(),
            game.seats()
        );
        Ok(Self { game, agents })
    }

    /// Plays until the game is terminal. Any agent failure aborts the game.
    pub async fn run(&mut self) -> anyhow::Result<Outcome<G::E>> {
        let mut history = History::default();
        while let Turn::Seat(seat) = self.game.turn(&history) {
            let edge = self.agents[seat.index()]
                .act(self.game, seat, &history)
                .await
                .with_context(|| format!("turn {} of {}", history.len() + 1, seat))?;
            log::debug!("{} proposes {}", seat, self.game.label(&edge));
            history.push(seat, edge);
        }
        let outcome = Outcome {
            payoff: self.game.payoff(&history),
            consensus: self.game.consensus(&history),
            history,
        };
        log::info!("{}", outcome.summary(self.game));
        Ok(outcome)
    }
}
