//! Automatic Guessing
//!
//! Drives the workflow with a bisection player instead of a human. Every
//! answer still goes through the side-channel and a pause/resume cycle.
//!
//! Run with: RUST_LOG=humanloop=debug cargo run --example auto_guess

use humanloop::driver::{drive, Bisection};
use humanloop::effects::read_result;
use humanloop::{logging, MachineBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    println!("=== Automatic Guessing Example ===\n");

    for seed in [1, 2, 3] {
        let mut process = MachineBuilder::new().seed(seed).spawn()?;
        let state = drive(&mut process, &mut Bisection::default()).await?;

        let node = process.handle();
        let result = read_result(&node).ok_or("process produced no result")?;
        println!("seed {seed}: {:?} - {}", state, result.message);
        for attempt in &result.history {
            println!("    {:>3} {}", attempt.guess, attempt.feedback);
        }
        println!("    {} reports logged\n", node.reports().len());
    }

    println!("=== Example Complete ===");
    Ok(())
}
