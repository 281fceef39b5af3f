//! Command line interface of the `chatgame` binary.
use crate::*;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Eliminate dominated strategies, then let the model decide")]
    Dilemma {
        #[arg(long, value_enum, default_value_t = Matrix::Pd)]
        game: Matrix,
        #[arg(long)]
        offline: bool,
    },
    #[command(about = "Train a solver and run one guided negotiation")]
    Meeting {
        #[arg(long, default_value = "classic")]
        scenario: String,
        #[arg(long, value_enum)]
        solver: Option<Solver>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        offline: bool,
    },
    #[command(about = "Compare random, solver, model and guided lineups")]
    Compare {
        #[arg(long, default_value = "classic")]
        scenario: String,
        #[arg(long, default_value_t = ARENA_GAMES)]
        games: usize,
        #[arg(long, value_enum)]
        solver: Option<Solver>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        offline: bool,
        #[arg(long, help = "Pool results over this many seeded random meetings instead")]
        random: Option<usize>,
        #[arg(long, default_value_t = 3)]
        seats: usize,
    },
    #[command(about = "Train a regret-matching profile offline", alias = "train")]
    Solve {
        #[arg(long, default_value = "classic")]
        scenario: String,
        #[arg(long, value_enum)]
        solver: Option<Solver>,
        #[arg(long)]
        iterations: Option<usize>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        resume: Option<String>,
        #[arg(long)]
        save: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Matrix {
    Pd,
    Bos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Solver {
    Cfr,
    Mccfr,
    Mcts,
    #[value(name = "none")]
    Silent,
}

impl Solver {
    /// Vanilla CFR for letters, external sampling for private
    /// information, tree search for public information.
    fn default_for(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Letter => Self::Cfr,
            Protocol::Private => Self::Mccfr,
            Protocol::Public => Self::Mcts,
        }
    }
    /// Default budget. Meetings too large to enumerate get the cheaper
    /// rollout budget.
    fn iterations(&self, game: &Meeting) -> usize {
        match self {
            Self::Cfr => CFR_ITERATIONS,
            Self::Mccfr if exact(game) => MCCFR_ITERATIONS,
            Self::Mccfr => ROLLOUT_ITERATIONS,
            Self::Mcts => MCTS_ITERATIONS,
            Self::Silent => 0,
        }
    }
}

fn exact(game: &Meeting) -> bool {
    tree_size(game, EXACT_TREE_LIMIT).is_some()
}

fn train<S: SamplingScheme>(game: &Meeting, iterations: usize, seed: u64, profile: Profile<Slot>) -> Profile<Slot> {
    let mut cfr = Cfr::<_, S, SummedRegret, ConstantWeight>::resume(game.clone(), seed, profile);
    cfr.train(iterations);
    cfr.profile().clone()
}

/// Regret profile for a meeting. Full-width CFR needs an enumerable tree.
/// Sampled CFR expands every traverser action on small trees and follows
/// rollouts on large ones.
fn regrets(
    game: &Meeting,
    solver: Solver,
    iterations: usize,
    seed: u64,
    profile: Profile<Slot>,
) -> anyhow::Result<Profile<Slot>> {
    match solver {
        Solver::Cfr if exact(game) => Ok(train::<VanillaSampling>(game, iterations, seed, profile)),
        Solver::Cfr => anyhow::bail!("meeting exceeds {} nodes, train it with --solver mccfr", EXACT_TREE_LIMIT),
        Solver::Mccfr if exact(game) => Ok(train::<ExternalSampling>(game, iterations, seed, profile)),
        Solver::Mccfr => Ok(train::<RolloutSampling>(game, iterations, seed, profile)),
        other => anyhow::bail!("{:?} does not train a regret profile", other),
    }
}

/// Trained solver output, ready to hand out advisors.
#[derive(Debug, Clone)]
enum Guide {
    Strategy(Strategy<Slot>),
    Plan(Plan<Slot>),
    Silent,
}

impl Guide {
    fn train(game: &Meeting, solver: Solver, iterations: usize, seed: u64) -> anyhow::Result<Self> {
        log::info!("training {:?} for {} iterations over {} rounds", solver, iterations, game.rounds());
        match solver {
            Solver::Cfr | Solver::Mccfr => {
                let strategy = regrets(game, solver, iterations, seed, Profile::default())?.strategy();
                report(game, &strategy);
                Ok(Self::Strategy(strategy))
            }
            Solver::Mcts => {
                let mut mcts = Mcts::new(game.clone(), MCTS_EXPLORATION, seed);
                Ok(Self::Plan(mcts.solve(iterations)))
            }
            Solver::Silent => Ok(Self::Silent),
        }
    }
    fn advisor(&self, seed: u64) -> Box<dyn Advisor<Meeting>> {
        match self {
            Self::Strategy(strategy) => Box::new(Sampler::new(strategy.clone(), seed)),
            Self::Plan(plan) => Box::new(plan.clone()),
            Self::Silent => Box::new(Silent),
        }
    }
}

/// Exact value and exploitability, when the tree is small enough.
fn report(game: &Meeting, strategy: &Strategy<Slot>) {
    match tree_size(game, EXACT_TREE_LIMIT) {
        Some(nodes) => log::info!(
            "{} nodes, value {:?}, exploitability {:.4}",
            nodes,
            value(game, strategy),
            exploitability(game, strategy)
        ),
        None => log::info!("more than {} nodes, skipping exploitability", EXACT_TREE_LIMIT),
    }
}

/// One agent per seat, reseeded for every arena game.
fn roster<F>(seats: usize, seed: u64, agent: F) -> Roster<Meeting>
where
    F: Fn(u64) -> Box<dyn Agent<Meeting>> + 'static,
{
    let n = seats as u64;
    Box::new(move |game: u64| Ok((0..n).map(|s| agent(seed + game * n + s)).collect()))
}

/// Plays every lineup on one meeting.
async fn compare(
    game: &Meeting,
    games: usize,
    solver: Option<Solver>,
    iterations: Option<usize>,
    seed: u64,
    oracle: Arc<dyn Oracle>,
) -> anyhow::Result<Vec<Tally>> {
    let solver = solver.unwrap_or(Solver::default_for(game.protocol()));
    let iterations = iterations.unwrap_or(solver.iterations(game));
    let guide = Arc::new(Guide::train(game, solver, iterations, seed)?);
    let seats = game.seats();
    let (g1, g2) = (guide.clone(), guide.clone());
    let (o1, o2) = (oracle.clone(), oracle.clone());
    Arena::new(game, games)
        .lineup("random", roster(seats, seed, |s| Box::new(Uniform::new(s))))
        .lineup("solver", roster(seats, seed, move |s| Box::new(Follower::new(g1.advisor(s), s))))
        .lineup("llm", roster(seats, seed, move |_| Box::new(Chat::new(o1.clone(), Silent))))
        .lineup("guided", roster(seats, seed, move |s| Box::new(Chat::new(o2.clone(), g2.advisor(s)))))
        .run()
        .await
}

fn payoffs(game: &Meeting, outcome: &Outcome<Slot>) {
    match outcome.consensus {
        Some(ref slot) => println!("{} {}", "agreed on".green().bold(), game.label(slot)),
        None => println!("{}", "no agreement".red().bold()),
    }
    for seat in Seat::all(game.seats()) {
        println!("  {:<12}{:>8.1}", game.name(seat), outcome.payoff[seat.index()]);
    }
}

impl Cli {
    pub async fn run() -> anyhow::Result<()> {
        match Self::parse().command {
            Command::Dilemma { game, offline } => {
                let oracle = oracle(offline)?;
                match game {
                    Matrix::Pd => Self::dilemma(Bimatrix::prisoners_dilemma(), oracle).await,
                    Matrix::Bos => Self::dilemma(Bimatrix::battle_of_the_sexes(), oracle).await,
                }
            }
            Command::Meeting {
                scenario,
                solver,
                iterations,
                seed,
                offline,
            } => {
                let game = Scenario::named(&scenario)?.build()?;
                let solver = solver.unwrap_or(Solver::default_for(game.protocol()));
                let guide = Guide::train(&game, solver, iterations.unwrap_or(solver.iterations(&game)), seed)?;
                let oracle = oracle(offline)?;
                let agents = Seat::all(game.seats())
                    .map(|seat| seed + seat.index() as u64)
                    .map(|s| Box::new(Chat::new(oracle.clone(), guide.advisor(s))) as Box<dyn Agent<Meeting>>)
                    .collect();
                let outcome = Negotiation::new(&game, agents)?.run().await?;
                for line in outcome.transcript(&game) {
                    println!("{}", line);
                }
                payoffs(&game, &outcome);
                Ok(())
            }
            Command::Compare {
                scenario,
                games,
                solver,
                iterations,
                seed,
                offline,
                random,
                seats,
            } => {
                let oracle = oracle(offline)?;
                let (names, tallies) = match random {
                    None => {
                        let game = Scenario::named(&scenario)?.build()?;
                        let tallies = compare(&game, games, solver, iterations, seed, oracle).await?;
                        let names = Seat::all(game.seats()).map(|seat| game.name(seat).to_string()).collect::<Vec<_>>();
                        (names, tallies)
                    }
                    Some(n) => {
                        let today = chrono::Local::now().date_naive();
                        let ref mut rng = SmallRng::seed_from_u64(seed);
                        let mut pooled = Vec::<Tally>::new();
                        for i in 0..n {
                            let game = Scenario::random(today, seats, rng).build()?;
                            println!("{} {}/{}", "random meeting".cyan(), i + 1, n);
                            let tallies = compare(&game, games, solver, iterations, seed + i as u64, oracle.clone()).await?;
                            match pooled.is_empty() {
                                true => pooled = tallies,
                                false => pooled.iter_mut().zip(tallies.iter()).for_each(|(p, t)| p.merge(t)),
                            }
                        }
                        (Seat::all(seats).map(|seat| seat.to_string()).collect(), pooled)
                    }
                };
                let names = names.iter().map(|name| format!("{:>8}", name)).collect::<String>();
                println!("{}", format!("{:<10}{:>9}{:>8}{}", "lineup", "agreed", "welfare", names).bold());
                for tally in tallies {
                    println!("{}", tally);
                }
                Ok(())
            }
            Command::Solve {
                scenario,
                solver,
                iterations,
                seed,
                resume,
                save,
            } => {
                let game = Scenario::named(&scenario)?.build()?;
                let solver = solver.unwrap_or(Solver::default_for(game.protocol()));
                let iterations = iterations.unwrap_or(solver.iterations(&game));
                let profile = match resume {
                    Some(ref path) => Profile::load(path)?,
                    None => Profile::default(),
                };
                let profile = regrets(&game, solver, iterations, seed, profile)?;
                report(&game, &profile.strategy());
                if let Some(ref path) = save {
                    profile.save(path)?;
                }
                Ok(())
            }
        }
    }

    async fn dilemma<E>(game: Bimatrix<E>, oracle: Arc<dyn Oracle>) -> anyhow::Result<()>
    where
        E: Edge + 'static,
    {
        let dominance = Dominance::solve(&game);
        for (seat, edge) in dominance.eliminated() {
            println!("{} {} for {}", "eliminated".yellow(), edge, seat);
        }
        let agents = Seat::all(game.seats())
            .map(|_| Box::new(Chat::new(oracle.clone(), dominance.clone())) as Box<dyn Agent<Bimatrix<E>>>)
            .collect();
        let outcome = Negotiation::new(&game, agents)?.run().await?;
        for line in outcome.transcript(&game) {
            println!("{}", line);
        }
        let (first, second) = game.settle(&outcome.history)?;
        println!("{} ({}, {})", "payoff".green().bold(), first, second);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["chatgame", "meeting", "--offline"]).unwrap();
        match cli.command {
            Command::Meeting {
                scenario,
                solver,
                seed,
                offline,
                ..
            } => {
                assert_eq!(scenario, "classic");
                assert_eq!(solver, None);
                assert_eq!(seed, 0);
                assert!(offline);
            }
            _ => panic!("expected meeting"),
        }
    }

    #[test]
    fn solver_names() {
        let cli = Cli::try_parse_from(["chatgame", "compare", "--solver", "none", "--games", "3"]).unwrap();
        match cli.command {
            Command::Compare { solver, games, .. } => {
                assert_eq!(solver, Some(Solver::Silent));
                assert_eq!(games, 3);
            }
            _ => panic!("expected compare"),
        }
        assert!(Cli::try_parse_from(["chatgame", "solve", "--solver", "ppo"]).is_err());
    }

    #[test]
    fn solver_follows_protocol() {
        assert_eq!(Solver::default_for(Protocol::Letter), Solver::Cfr);
        assert_eq!(Solver::default_for(Protocol::Private), Solver::Mccfr);
        assert_eq!(Solver::default_for(Protocol::Public), Solver::Mcts);
        let ref game = Scenario::classic().build().unwrap();
        assert_eq!(Solver::Silent.iterations(game), 0);
    }

    #[test]
    fn large_meetings_get_the_rollout_budget() {
        let ref small = Scenario::classic().build().unwrap();
        let ref large = Scenario::named("conference").unwrap().build().unwrap();
        assert_eq!(Solver::Mccfr.iterations(small), MCCFR_ITERATIONS);
        assert_eq!(Solver::Mccfr.iterations(large), ROLLOUT_ITERATIONS);
        assert!(regrets(large, Solver::Cfr, 1, 0, Profile::default()).is_err());
        assert!(regrets(large, Solver::Mcts, 1, 0, Profile::default()).is_err());
    }

    #[test]
    fn builtin_scenarios_train_with_their_defaults() {
        for name in ["classic", "conference", "perfect"] {
            let ref game = Scenario::named(name).unwrap().build().unwrap();
            let solver = Solver::default_for(game.protocol());
            let start = std::time::Instant::now();
            let guide = Guide::train(game, solver, solver.iterations(game), 0).unwrap();
            assert!(start.elapsed() < std::time::Duration::from_secs(120), "{} trained too long", name);
            assert!(!guide.advisor(0).advise(game, Seat::from(0), &History::default()).is_empty());
        }
    }

    #[test]
    fn random_comparisons_parse() {
        let cli = Cli::try_parse_from(["chatgame", "compare", "--random", "4", "--seats", "2"]).unwrap();
        match cli.command {
            Command::Compare { random, seats, .. } => {
                assert_eq!(random, Some(4));
                assert_eq!(seats, 2);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn silent_guide_offers_nothing() {
        let ref game = Scenario::classic().build().unwrap();
        let guide = Guide::train(game, Solver::Silent, 0, 0).unwrap();
        assert!(guide.advisor(0).advise(game, Seat::from(0), &History::default()).is_empty());
    }
}
