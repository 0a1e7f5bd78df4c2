//! Checkpoint and Resume
//!
//! A paused workflow can outlive the run that started it. This example
//! checkpoints a paused process to disk, drops it, restores it from the file
//! and finishes the game.
//!
//! Key concepts:
//! - Checkpoints capture both the workflow and the process node
//! - Atomic writes prevent checkpoint corruption
//! - Answers written before the checkpoint are picked up after restore
//!
//! Run with: cargo run --example checkpoint_resume

use humanloop::checkpoint::Checkpoint;
use humanloop::driver::{drive, AnswerSource, Bisection};
use humanloop::effects::read_result;
use humanloop::{logging, GuessingMachine, MachineBuilder, Process};
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let dir = std::env::temp_dir().join("humanloop-checkpoints");
    fs::create_dir_all(&dir)?;
    let path = dir.join("guessing.json");

    println!("Run 1: start and answer once");
    println!("----------------------------------------");
    let mut process = MachineBuilder::new().seed(7).spawn()?;
    process.start().await?;
    let node = process.handle();
    println!("  Question: {}", node.question().unwrap_or_default());
    node.set_answer("50");
    process.play().await?;
    println!("  Question: {}", node.question().unwrap_or_default());

    process.checkpoint().save(&path)?;
    println!("  [Checkpoint] Saved to {}", path.display());
    drop(process);

    println!("\nRun 2: restore and finish");
    println!("----------------------------------------");
    let checkpoint = Checkpoint::<GuessingMachine>::load(&path)?;
    let mut restored = Process::from_checkpoint(checkpoint)?;
    println!(
        "  Restored with {} attempt(s) already made",
        restored.workflow().context().attempts()
    );

    // Replay the opening question so the player's last guess is the 50 from run 1.
    let mut player = Bisection::default();
    player.answer("Guess a number between 1 and 100.");
    drive(&mut restored, &mut player).await?;

    let node = restored.handle();
    if let Some(result) = read_result(&node) {
        println!("  {}", result.message);
    }

    fs::remove_dir_all(&dir).ok();
    println!("\n=== Example Complete ===");
    Ok(())
}
