//! Terminal Driver
//!
//! Plays the guessing workflow from the keyboard. The workflow pauses after
//! every question; this driver reads the question from the side-channel,
//! prompts for an answer, writes it back and resumes.
//!
//! Run with: cargo run --example terminal_driver [max_iters]

use humanloop::driver::drive;
use humanloop::effects::read_result;
use humanloop::{logging, MachineBuilder, WorkflowConfig};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let max_iters: u32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 10,
    };
    let config = WorkflowConfig::default().with_max_iters(max_iters);
    let mut process = MachineBuilder::new().config(config).spawn()?;
    println!("Started process {}", process.handle().id());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut prompt = |question: &str| {
        println!("--------------------------------------------------");
        println!("Question from workflow: '{question}'");
        print!("Your answer: ");
        io::stdout().flush().ok();
        lines.next().and_then(Result::ok)
    };

    drive(&mut process, &mut prompt).await?;

    let node = process.handle();
    println!("==================================================");
    if !node.is_finished() {
        println!("Input closed, workflow left paused.");
        return Ok(());
    }

    println!("Workflow finished!");
    match read_result(&node) {
        Some(result) => {
            println!("Output message: {}", result.message);
            println!("History of attempts:");
            for attempt in result.history {
                println!("  {} -> {}", attempt.guess, attempt.feedback);
            }
        }
        None => println!("No result output found."),
    }

    Ok(())
}
