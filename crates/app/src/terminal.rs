use std::io::{self, BufRead, Write};

use baseline_core::model::{AnswerToken, BaselineStatus, GameMode, QuestionKind, Side};
use services::{
    Citation, FeedbackView, QuestionBody, QuestionView, QuizError, QuizGame, ResultsView,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// What the player typed at the answer prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Answer(AnswerToken),
    FinishEarly,
}

/// Parse one line of input for a question of `kind`.
///
/// Returns `None` for anything that is not a valid choice for that kind.
#[must_use]
pub fn parse_input(line: &str, kind: QuestionKind) -> Option<Input> {
    let line = line.trim().to_ascii_lowercase();
    if matches!(line.as_str(), "q" | "quit") {
        return Some(Input::FinishEarly);
    }

    let token: AnswerToken = match (kind, line.as_str()) {
        (QuestionKind::Baseline, "h" | "high" | "1") => BaselineStatus::High.into(),
        (QuestionKind::Baseline, "l" | "low" | "2") => BaselineStatus::Low.into(),
        (QuestionKind::Baseline, "u" | "unknown" | "3") => BaselineStatus::Unknown.into(),
        (QuestionKind::Comparison, "a") => Side::A.into(),
        (QuestionKind::Comparison, "b") => Side::B.into(),
        _ => return None,
    };
    Some(Input::Answer(token))
}

fn status_key(status: BaselineStatus) -> char {
    match status {
        BaselineStatus::High => 'h',
        BaselineStatus::Low => 'l',
        BaselineStatus::Unknown => 'u',
    }
}

/// Run sessions in `mode` until the player declines to play again.
///
/// End of input finishes the running session early and stops.
///
/// # Errors
///
/// Returns `TerminalError::Io` on read/write failures and `TerminalError::Quiz`
/// if the game rejects an action.
pub fn play<R: BufRead, W: Write>(
    game: &mut QuizGame,
    mode: GameMode,
    input: &mut R,
    out: &mut W,
) -> Result<(), TerminalError> {
    loop {
        game.start(mode)?;

        let mut exhausted = false;
        while let Some(view) = game.current_view() {
            render_question(&view, out)?;
            let kind = match view.body {
                QuestionBody::Baseline { .. } => QuestionKind::Baseline,
                QuestionBody::Comparison { .. } => QuestionKind::Comparison,
            };

            match read_choice(input, out, kind)? {
                Some(Input::Answer(token)) => {
                    let feedback = game.submit_answer(token)?;
                    render_feedback(&feedback, out)?;
                    game.advance()?;
                }
                Some(Input::FinishEarly) => {
                    game.finish_early()?;
                }
                None => {
                    game.finish_early()?;
                    exhausted = true;
                }
            }
        }

        if let Some(results) = game.results() {
            render_results(&results, out)?;
        }
        if exhausted || !ask_play_again(input, out)? {
            game.reset();
            return Ok(());
        }
        game.reset();
    }
}

/// Prompt until a valid choice or end of input (`None`).
fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    kind: QuestionKind,
) -> io::Result<Option<Input>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }
        if let Some(choice) = parse_input(&line, kind) {
            return Ok(Some(choice));
        }

        let hint = match kind {
            QuestionKind::Baseline => "h, l or u",
            QuestionKind::Comparison => "a or b",
        };
        writeln!(out, "Please answer {hint} (q to finish).")?;
    }
}

fn ask_play_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "Play again? [y/N] ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn render_question<W: Write>(view: &QuestionView, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Question {}/{}  (score {})",
        view.number, view.total, view.score
    )?;
    writeln!(out, "{}", view.title)?;
    writeln!(out)?;

    match &view.body {
        QuestionBody::Baseline {
            name,
            description,
            options,
        } => {
            writeln!(out, "  {name}")?;
            writeln!(out, "  {description}")?;
            writeln!(out)?;
            for option in options {
                if let AnswerToken::Status(status) = option.token {
                    writeln!(out, "  [{}] {}", status_key(status), option.label)?;
                }
            }
        }
        QuestionBody::Comparison { cards } => {
            for card in cards {
                writeln!(out, "  [{}] {}", card.side.as_str(), card.name)?;
                writeln!(out, "      {}", card.description)?;
            }
        }
    }
    Ok(())
}

fn render_feedback<W: Write>(feedback: &FeedbackView, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", feedback.headline)?;
    writeln!(out, "{}", feedback.message)?;
    match &feedback.citation {
        Some(Citation::SupportInfo(info)) => writeln!(out, "Browser support: {info}")?,
        Some(Citation::Documentation(url)) => writeln!(out, "Learn more: {url}")?,
        None => {}
    }
    Ok(())
}

fn render_results<W: Write>(results: &ResultsView, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    if results.finished_early {
        writeln!(out, "Quiz finished early.")?;
    } else {
        writeln!(out, "Quiz complete!")?;
    }
    writeln!(out, "Score: {}", results.score_line())?;
    writeln!(out, "Accuracy: {}%", results.accuracy)?;
    for category in &results.categories {
        writeln!(
            out,
            "  {}: {}/{}",
            category.label, category.correct, category.total
        )?;
    }
    Ok(())
}
