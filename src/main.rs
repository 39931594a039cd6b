use anyhow::Result;
use clap::Parser;
use term_snake::app::App;
use term_snake::logging;

/// Arrow keys or WASD to steer, Q or Esc to quit.
#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    logging::init(&logging::default_log_path())?;

    let mut app = App::new();
    let outcome = app.run().await?;

    println!("Final Score: {}", outcome.score);
    println!("Time: {}s", outcome.elapsed.as_secs());

    Ok(())
}
