use std::io::{self, BufRead, Write};

use anyhow::{Result, bail};
use clap::Parser;

use wordpace::session::{InputStatus, Session, SessionController, TimeLimit};
use wordpace::source::{Difficulty, TextSource};
use wordpace::store::PrefsStore;

#[derive(Parser)]
#[command(
    name = "wordpace",
    version,
    about = "Timed typing practice with word-level accuracy tracking"
)]
struct Cli {
    #[arg(short, long, help = "Text difficulty (easy, medium, hard)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Time limit in minutes (0, 0.5, 1, 2, 3, 4, 5)")]
    limit: Option<f64>,

    #[arg(short, long, help = "Practice this text instead of a built-in passage")]
    text: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let prefs = PrefsStore::new().ok();

    let difficulty = match cli.difficulty.as_deref() {
        Some(key) => match Difficulty::from_key(key) {
            Some(difficulty) => {
                if let Some(prefs) = &prefs {
                    let _ = prefs.set_difficulty(difficulty);
                }
                difficulty
            }
            None => bail!("unknown difficulty {key:?}, expected one of: easy, medium, hard"),
        },
        None => prefs
            .as_ref()
            .and_then(PrefsStore::difficulty)
            .unwrap_or_default(),
    };

    let session = match cli.text {
        Some(text) => Session::new(text),
        None => TextSource::new().pick(difficulty),
    };

    let controller = SessionController::new(session, prefs);
    if let Some(minutes) = cli.limit {
        match TimeLimit::from_minutes(minutes) {
            Some(limit) => controller.set_time_limit(limit),
            None => bail!("time limit must be one of 0, 0.5, 1, 2, 3, 4, 5 minutes"),
        }
    }

    run_session(&controller)?;
    print_results(&controller);
    Ok(())
}

fn run_session(controller: &SessionController) -> Result<()> {
    println!(
        "Type the text below, pressing enter after each line ({}).",
        controller.time_limit().label()
    );
    println!();
    println!("  {}", controller.session().text);
    println!();
    print!("> ");
    io::stdout().flush()?;

    controller.set_input_status(InputStatus::Started);

    let total = controller.expected_word_count();
    let stdin = io::stdin();
    'session: for line in stdin.lock().lines() {
        let line = line?;
        // Words typed after the limit fired do not count.
        if controller.input_status() == InputStatus::Ended {
            break;
        }
        for word in line.split_whitespace() {
            let index = controller.expected_word_index();
            controller.add_received_word(index, word);
            controller.set_expected_index(index as isize + 1);
            if controller.expected_word_index() >= total {
                break 'session;
            }
        }
        if controller.input_status() == InputStatus::Ended {
            break;
        }
        print!("> ");
        io::stdout().flush()?;
    }

    controller.set_input_status(InputStatus::Ended);
    Ok(())
}

fn print_results(controller: &SessionController) {
    let Some(results) = controller.results() else {
        return;
    };
    println!();
    println!(
        "Time: {} ({})",
        pretty_seconds(results.time_played_secs),
        results.time_limit.label()
    );
    println!(
        "Words: {} correct, {} incorrect, {} remaining (of {})",
        results.words.correct,
        results.words.incorrect,
        results.words.remaining,
        results.total_words()
    );
    println!(
        "Speed: {} wpm, {} effective wpm",
        results.wpm_text(),
        results.effective_wpm_text()
    );
}

fn pretty_seconds(secs: u64) -> String {
    format!("{}:{:02}", (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_seconds() {
        assert_eq!(pretty_seconds(0), "0:00");
        assert_eq!(pretty_seconds(5), "0:05");
        assert_eq!(pretty_seconds(65), "1:05");
        assert_eq!(pretty_seconds(600), "10:00");
    }

    #[test]
    fn test_pretty_seconds_wraps_at_an_hour() {
        assert_eq!(pretty_seconds(3600), "0:00");
        assert_eq!(pretty_seconds(3725), "2:05");
    }
}
