//! End-to-end scenarios through the public API.

use humanloop::builder::MachineBuilder;
use humanloop::checkpoint::Checkpoint;
use humanloop::core::{Feedback, Phase};
use humanloop::effects::read_result;
use humanloop::process::{Process, ProcessError, ProcessState, ANSWER_KEY, NEEDS_INPUT_STATUS};
use humanloop::{GuessingMachine, WorkflowConfig};

async fn started(target: i64, max: u32) -> Process<GuessingMachine> {
    let mut process = MachineBuilder::new()
        .target(target)
        .max_iters(max)
        .spawn()
        .unwrap();
    assert_eq!(process.start().await.unwrap(), ProcessState::Paused);
    process
}

#[tokio::test]
async fn found_on_first_answer() {
    let mut process = started(50, 20).await;
    let node = process.handle();

    node.set_answer("50");
    process.play().await.unwrap();

    let result = read_result(&node).unwrap();
    assert_eq!(result.message, "Found 50 in 1 attempts");
    assert_eq!(result.history.len(), 1);
    assert_eq!(result.history[0].feedback, Feedback::Correct);
    assert!(node.is_finished());
}

#[tokio::test]
async fn failed_after_two_attempts() {
    let mut process = started(50, 2).await;
    let node = process.handle();

    for raw in ["10", "90"] {
        node.set_answer(raw);
        process.play().await.unwrap();
    }

    let result = read_result(&node).unwrap();
    assert_eq!(result.message, "Failed after 2 attempts");
    assert_eq!(result.history[0].guess, 10);
    assert_eq!(result.history[0].feedback, Feedback::Higher);
    assert_eq!(result.history[1].guess, 90);
    assert_eq!(result.history[1].feedback, Feedback::Lower);
    assert!(!process.workflow().context().is_finished());
}

#[tokio::test]
async fn malformed_answer_republishes_same_question() {
    let mut process = started(50, 20).await;
    let node = process.handle();
    let question = node.question();

    node.set_answer("abc");
    process.play().await.unwrap();

    assert_eq!(node.question(), question);
    assert_eq!(process.workflow().context().attempts(), 0);
    assert!(process.workflow().context().history().is_empty());
    assert!(node.extra(ANSWER_KEY).is_none());
    assert!(node.is_paused());
}

#[tokio::test]
async fn repeated_spurious_wakes_change_nothing() {
    let mut process = started(50, 3).await;
    let before = process.workflow().context().clone();

    for _ in 0..5 {
        assert_eq!(process.play().await.unwrap(), ProcessState::Paused);
    }

    assert_eq!(process.workflow().context(), &before);
    assert_eq!(process.handle().status().as_deref(), Some(NEEDS_INPUT_STATUS));
}

#[tokio::test]
async fn finished_process_cannot_resume() {
    let mut process = started(5, 20).await;
    process.handle().set_answer("5");
    process.play().await.unwrap();

    let err = process.play().await.unwrap_err();

    assert!(matches!(err, ProcessError::NotPaused { .. }));
    assert_eq!(process.workflow().phase(), Phase::Done);
}

#[tokio::test]
async fn manual_driver_loop() {
    let config = WorkflowConfig::from_toml_str("max_iters = 10").unwrap();
    let mut process = MachineBuilder::new()
        .config(config)
        .seed(1234)
        .spawn()
        .unwrap();
    let node = process.handle();
    let (mut low, mut high) = (1, 100);

    process.start().await.unwrap();
    while node.is_paused() {
        let question = node.question().unwrap();
        if question.starts_with("My number is higher") {
            low = process.workflow().context().last_guess().unwrap() + 1;
        } else if question.starts_with("My number is lower") {
            high = process.workflow().context().last_guess().unwrap() - 1;
        }
        node.set_answer(((low + high) / 2).to_string());
        process.play().await.unwrap();
    }

    assert_eq!(node.state(), ProcessState::Finished);
    assert!(read_result(&node).unwrap().is_success());
}

#[tokio::test]
async fn checkpoint_restores_mid_game() {
    let mut process = started(64, 20).await;
    process.handle().set_answer("32");
    process.play().await.unwrap();

    let json = process.checkpoint().to_json().unwrap();
    let checkpoint = Checkpoint::<GuessingMachine>::from_json(&json).unwrap();
    let mut restored = Process::from_checkpoint(checkpoint).unwrap();
    let node = restored.handle();

    assert_eq!(
        node.question().as_deref(),
        Some("My number is higher than 32. Try again.")
    );
    node.set_answer("64");
    restored.play().await.unwrap();

    assert_eq!(
        read_result(&node).unwrap().message,
        "Found 64 in 2 attempts"
    );
    assert_eq!(restored.workflow().transitions().len(), 2);
}
