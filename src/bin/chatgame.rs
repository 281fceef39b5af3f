//! Chatgame Binary
//!
//! Subcommands: dilemma, meeting, compare, solve

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chatgame::log()?;
    chatgame::brb();
    chatgame::cli::Cli::run().await
}
