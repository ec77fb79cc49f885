//! Operator read-eval loop.
//!
//! Free text is submitted to the engine; the reserved words `confirm`,
//! `cancel`, `log`, `example`, and `quit` drive the console itself.
//! Lifecycle entries stream in from the event bus as they happen.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use engine::{EngineHandle, Event, Submission, Topic};

pub async fn run(handle: EngineHandle) -> Result<()> {
    println!("AURA disaster-response console. Type a command, or 'quit' to exit.");
    println!("Reserved words: confirm, cancel, log, example, quit.");

    // Mirror lifecycle entries to the terminal as they happen.
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);
    let printer = tokio::spawn(async move {
        while let Ok(event) = lifecycle.recv().await {
            if let Event::Lifecycle(entry) = event {
                println!("  [{}] {}", entry.severity, entry.message);
            }
        }
    });

    if let Ok(Some(example)) = handle.fetch_example().await {
        println!("Try: \"{example}\"");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => {}
            "quit" | "exit" => break,
            "confirm" => match handle.confirm().await? {
                Some(intent) => println!("Confirmed: {intent}"),
                None => println!("Nothing awaiting confirmation."),
            },
            "cancel" => match handle.cancel().await? {
                Some(intent) => println!("Cancelled: {intent}"),
                None => println!("Nothing awaiting confirmation."),
            },
            "log" => {
                for entry in handle.command_log().await? {
                    println!(
                        "{} [{}] {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.severity,
                        entry.message
                    );
                }
            }
            "example" => match handle.fetch_example().await {
                Ok(Some(example)) => println!("Try: \"{example}\""),
                Ok(None) => println!("No example available."),
                Err(error) => println!("Example fetch failed: {error}"),
            },
            text => match handle.submit_command(text).await {
                Ok(submission) => {
                    print_submission(&submission);
                    // Offer a fresh example after every processed command.
                    if let Ok(Some(example)) = handle.fetch_example().await {
                        println!("Try: \"{example}\"");
                    }
                }
                Err(error) => println!("Command failed: {error}"),
            },
        }
    }

    printer.abort();
    Ok(())
}

/// Show the interpreter's reading of the command.
fn print_submission(submission: &Submission) {
    let parsed = submission.parsed();
    println!("  intent:          {}", parsed.intent);
    println!("  understood as:   {}", parsed.english_text);
    println!(
        "  safety-critical: {}",
        if parsed.safety_critical { "YES" } else { "no" }
    );
    println!("  parameters:      {}", parsed.parameters);

    if matches!(submission, Submission::AwaitingConfirmation(_)) {
        println!("  -> type 'confirm' to execute, 'cancel' to abort");
    }
}
