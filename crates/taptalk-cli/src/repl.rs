//! Interactive terminal loop for the phrase board.
//!
//! Commands mirror the tiles of the original board: `list` the phrases,
//! `add` a new one, `tap` one by number. Tap outcomes are printed; actual
//! audio playback of cached clips is the player's job, so the clip path
//! is shown instead.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use taptalk_app::PhraseBoard;
use taptalk_core::domain::Phrase;
use taptalk_core::playback::PlaybackOutcome;

const HELP: &str = "\
Commands:
  list            Show the board (* = high-quality clip ready, ~ = upgrading)
  add <text>      Add a phrase and start its upgrade
  tap <n>         Tap phrase n: speaks instantly or plays the cached clip
  help            Show this help
  quit            Exit";

/// Run the interactive loop until EOF or `quit`.
pub async fn run(board: PhraseBoard) -> Result<()> {
    println!("taptalk — tap a phrase to hear it");
    println!("{HELP}");
    print_board(&board.phrases().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("list" | "l", _) => print_board(&board.phrases().await),
            ("add" | "a", text) if !text.trim().is_empty() => {
                let phrase = board.add_phrase(text.trim()).await;
                println!("added \"{}\"", phrase.text);
            }
            ("add" | "a", _) => println!("usage: add <text>"),
            ("tap" | "t", index) => tap(&board, index).await,
            ("help" | "h" | "?", _) => println!("{HELP}"),
            ("quit" | "exit" | "q", _) => break,
            ("", _) => {}
            (other, _) => println!("unknown command: {other} (try `help`)"),
        }
    }

    board.shutdown().await;
    Ok(())
}

async fn tap(board: &PhraseBoard, index: &str) {
    let phrases = board.phrases().await;
    let Some(phrase) = index
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| phrases.get(n))
    else {
        println!("usage: tap <n> (1..={})", phrases.len());
        return;
    };

    match board.on_tap(&phrase.id).await {
        Some(PlaybackOutcome::Instant { text }) => println!("(instant voice) {text}"),
        Some(PlaybackOutcome::Cached { reference }) => {
            println!("(cached clip) {}", reference.path.display());
        }
        None => println!("phrase is gone"),
    }
}

fn print_board(phrases: &[Phrase]) {
    if phrases.is_empty() {
        println!("(board is empty — `add` a phrase)");
        return;
    }
    for (i, phrase) in phrases.iter().enumerate() {
        let marker = if phrase.upgrade_in_progress {
            '~'
        } else if phrase.is_upgraded() {
            '*'
        } else {
            ' '
        };
        println!("{:>3} {} {}", i + 1, marker, phrase.text);
    }
}
