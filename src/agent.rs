//! Players that choose one action per turn.
//!
//! - [`Chat`]: asks a language model, steered by an [`Advisor`]
//! - [`Follower`]: plays the advisor's first suggestion directly
//! - [`Uniform`]: plays a uniformly random legal action
use crate::*;
use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// A seat's decision maker for one negotiation.
#[async_trait::async_trait]
pub trait Agent<G>: Send
where
    G: Game,
{
    async fn act(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> anyhow::Result<G::E>;
}

#[async_trait::async_trait]
impl<G, A> Agent<G> for Box<A>
where
    G: Game,
    A: Agent<G> + ?Sized,
{
    async fn act(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> anyhow::Result<G::E> {
        self.as_mut().act(game, seat, history).await
    }
}

/// Uniformly random legal play.
pub struct Uniform {
    rng: SmallRng,
}

impl Uniform {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl<G> Agent<G> for Uniform
where
    G: Game,
{
    async fn act(&mut self, game: &G, seat: Seat, _: &History<G::E>) -> anyhow::Result<G::E> {
        game.choices(seat)
            .choose(&mut self.rng)
            .copied()
            .with_context(|| format!("{} has no legal action", seat))
    }
}

/// Plays the solver's first suggestion, or uniformly when it has none.
pub struct Follower<A> {
    advisor: A,
    fallback: Uniform,
}

impl<A> Follower<A> {
    pub fn new(advisor: A, seed: u64) -> Self {
        Self {
            advisor,
            fallback: Uniform::new(seed),
        }
    }
}

#[async_trait::async_trait]
impl<G, A> Agent<G> for Follower<A>
where
    G: Game,
    A: Advisor<G>,
{
    async fn act(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> anyhow::Result<G::E> {
        match self.advisor.advise(game, seat, history).first() {
            Some(edge) => Ok(*edge),
            None => self.fallback.act(game, seat, history).await,
        }
    }
}

/// Asks a language model, with the advisor's suggestions in the prompt.
pub struct Chat<O, A> {
    oracle: O,
    advisor: A,
}

impl<O, A> Chat<O, A> {
    pub fn new(oracle: O, advisor: A) -> Self {
        Self { oracle, advisor }
    }
}

#[async_trait::async_trait]
impl<G, O, A> Agent<G> for Chat<O, A>
where
    G: Dialogue,
    O: Oracle,
    A: Advisor<G>,
{
    async fn act(&mut self, game: &G, seat: Seat, history: &History<G::E>) -> anyhow::Result<G::E> {
        let advice = self.advisor.advise(game, seat, history);
        let ref prompt = game.prompt(seat, history, &advice);
        log::debug!("prompt for {}:\n{}", seat, prompt);
        let reply = self.oracle.ask(prompt).await?;
        log::info!("{} -> {}", seat, reply.lines().next().unwrap_or_default());
        game.parse(&reply)
            .with_context(|| format!("{} replied {:?}", seat, reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chat_parses_the_oracle_reply() {
        let ref game = Bimatrix::prisoners_dilemma();
        let mut agent = Chat::new(Canned::new(["Decision: D\nbecause"]), Dominance::solve(game));
        let edge = agent.act(game, Seat::from(0), &History::default()).await.unwrap();
        assert_eq!(edge, Move::D);
        let prompts = agent.oracle.prompts();
        assert!(prompts[0].user.starts_with("Player 1 available strategies: D\n"));
    }

    #[tokio::test]
    async fn chat_surfaces_unparseable_replies() {
        let ref game = Bimatrix::prisoners_dilemma();
        let mut agent = Chat::new(Canned::new(["I refuse"]), Silent);
        let error = agent.act(game, Seat::from(1), &History::default()).await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<ReplyError>(),
            Some(&ReplyError::MissingDecision(String::from("I refuse")))
        );
    }

    #[tokio::test]
    async fn follower_plays_the_plan() {
        let ref game = Scenario::classic().build().unwrap();
        let plan = Plan {
            path: History::from(vec![(Seat::from(0), Slot::from(2))]),
            payoff: vec![0., 0.],
        };
        let mut agent = Follower::new(plan, 0);
        assert_eq!(agent.act(game, Seat::from(0), &History::default()).await.unwrap(), Slot::from(2));
        let fallback = agent.act(game, Seat::from(1), &History::default()).await.unwrap();
        assert!(game.choices(Seat::from(1)).contains(&fallback));
    }
}
