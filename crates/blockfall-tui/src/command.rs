use std::path::PathBuf;

use clap::Parser;

use crate::{app::App, best_score::BestScoreStore};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed for the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Hide the landing preview under the falling piece
    #[clap(long)]
    no_ghost: bool,
    /// File used to persist the best score across runs
    #[clap(long, default_value = "./data/best_score.json")]
    best_score_path: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let store = BestScoreStore::load(args.best_score_path)?;
    let mut app = App::new(args.seed, !args.no_ghost, store);

    ratatui::run(|terminal| app.run(terminal))
}
