//! Steering language-model negotiations with game-theoretic solvers.
//!
//! Games are solved offline (dominance, CFR, MCCFR, MCTS) and the solver's
//! suggestion is injected into each player's prompt during a live
//! negotiation with a chat-completion model.

pub mod advisor;
pub mod agent;
pub mod analysis;
pub mod arena;
pub mod bimatrix;
pub mod cfr;
pub mod dominance;
pub mod game;
pub mod llm;
pub mod mcts;
pub mod meeting;
pub mod dialogue;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;

pub use advisor::*;
pub use agent::*;
pub use analysis::*;
pub use arena::*;
pub use bimatrix::*;
pub use cfr::*;
pub use dominance::*;
pub use game::*;
pub use llm::*;
pub use mcts::*;
pub use meeting::*;
pub use dialogue::*;
pub use session::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Expected values, regrets, and payoffs.
pub type Utility = f32;
/// Strategy weights, sampling distributions, and reach probabilities.
pub type Probability = f32;

// ============================================================================
// LANGUAGE MODEL
// ============================================================================
/// Chat-completion model used when `CHATGAME_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
/// Chat-completion endpoint root used when `OPENAI_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Sampling temperature for every completion.
pub const LLM_TEMPERATURE: f32 = 0.7;
/// Completion length cap.
pub const LLM_MAX_TOKENS: u32 = 512;
/// Request timeout for a single completion.
pub const LLM_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// SOLVER CONFIGURATIONS
// ============================================================================
/// Vanilla CFR epochs for the two-seat meeting and the bimatrix games.
pub const CFR_ITERATIONS: usize = 5000;
/// External-sampling epochs for the many-seat meeting games.
pub const MCCFR_ITERATIONS: usize = 2000;
/// Sampled-rollout epochs for meetings too large to enumerate.
pub const ROLLOUT_ITERATIONS: usize = 200;
/// UCT playouts for the public-information meeting game.
pub const MCTS_ITERATIONS: usize = 5000;
/// UCT exploration constant.
pub const MCTS_EXPLORATION: f32 = 1.4;
/// Extra utility every seat receives on a unanimous agreement.
pub const UNANIMOUS_BONUS: Utility = 100.0;
/// Games with fewer nodes than this get exact exploitability reports.
pub const EXACT_TREE_LIMIT: usize = 1 << 16;

// ============================================================================
// NEGOTIATION
// ============================================================================
/// Slots listed per seat under "Public valuations".
pub const PUBLIC_VALUATIONS_SHOWN: usize = 3;
/// Negotiations per lineup in an arena comparison.
pub const ARENA_GAMES: usize = 10;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(10);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    use anyhow::Context;
    std::fs::create_dir_all("logs").context("create logs directory")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("time moves slow")?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).context("create log file")?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).context("initialize logger")
}

/// Global interrupt flag for graceful shutdown coordination.
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
/// Optional training deadline from TRAIN_DURATION env var.
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Check if graceful shutdown was requested (via stdin "Q") or deadline reached.
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
        || DEADLINE
            .get()
            .map_or(false, |d| std::time::Instant::now() >= *d)
}

/// Register graceful interrupt handler. Type "Q" + Enter to stop training early.
/// Optionally set TRAIN_DURATION env var (e.g., "2h", "30m") for timed runs.
pub fn brb() {
    if let Ok(duration) = std::env::var("TRAIN_DURATION") {
        if let Some(deadline) = parse_duration(&duration) {
            let _ = DEADLINE.set(std::time::Instant::now() + deadline);
            log::info!("training will stop after {}", duration);
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, finishing current epoch...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        "d" => Some(std::time::Duration::from_secs(value * 86400)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(parse_duration("30s"), Some(std::time::Duration::from_secs(30)));
        assert_eq!(parse_duration("2h"), Some(std::time::Duration::from_secs(7200)));
        assert_eq!(parse_duration(" 5m "), Some(std::time::Duration::from_secs(300)));
        assert_eq!(parse_duration("5w"), None);
        assert_eq!(parse_duration(""), None);
    }
}
