mod app;
mod best_score;
mod command;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
