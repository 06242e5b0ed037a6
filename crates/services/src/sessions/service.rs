use rand::Rng;
use serde::Serialize;
use std::fmt;

use baseline_core::model::{
    AnswerRecord, AnswerToken, Catalog, CatalogError, CategoryStats, GameMode, Question, SessionId,
};

use super::pool::PoolBuilder;
use super::progress::SessionProgress;
use crate::error::QuizError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the session is within the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// The current question is on screen and awaits an answer.
    Shown,
    /// The current question has been answered; waiting to advance.
    Answered,
    /// No further transitions are accepted.
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::Shown => "shown",
            SessionPhase::Answered => "answered",
            SessionPhase::Finished => "finished",
        })
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of up to ten questions.
///
/// Every transition either applies completely or returns an error and leaves
/// the session untouched.
#[derive(Clone)]
pub struct QuizSession {
    id: SessionId,
    mode: GameMode,
    questions: Vec<Question>,
    current: usize,
    phase: SessionPhase,
    score: u32,
    stats: CategoryStats,
    answers: Vec<AnswerRecord>,
    finished_early: bool,
}

impl QuizSession {
    /// Build a question pool from `catalog` and show the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CatalogUnavailable` if the catalog is empty.
    pub fn start<R: Rng + ?Sized>(
        catalog: &Catalog,
        mode: GameMode,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        if catalog.is_empty() {
            return Err(CatalogError::Empty.into());
        }

        let pool = PoolBuilder::new(catalog).with_mode(mode).build(rng);
        if pool.shortfall() > 0 {
            tracing::info!(
                mode = %mode,
                questions = pool.total(),
                shortfall = pool.shortfall(),
                "question pool exhausted before target length"
            );
        }
        Self::from_questions(mode, pool.questions)
    }

    /// Start a session over a fixed question sequence.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` if `questions` is empty.
    pub fn from_questions(mode: GameMode, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let mut session = Self {
            id: SessionId::random(),
            mode,
            questions,
            current: 0,
            phase: SessionPhase::Shown,
            score: 0,
            stats: CategoryStats::new(),
            answers: Vec::new(),
            finished_early: false,
        };
        session.load_current();

        tracing::info!(
            session = %session.id,
            mode = %mode,
            questions = session.questions.len(),
            "session started"
        );
        Ok(session)
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Planned number of questions; the accuracy denominator.
    #[must_use]
    pub fn planned_len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn stats(&self) -> &CategoryStats {
        &self.stats
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    #[must_use]
    pub fn finished_early(&self) -> bool {
        self.finished_early
    }

    /// The question on screen, or `None` once the session is finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Answer recorded for the current question, if it has been answered.
    #[must_use]
    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.answers.last()
    }

    /// Fraction of the session passed, `current_index / planned_len`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        self.current as f64 / self.questions.len() as f64
    }

    /// Percentage of the planned questions answered correctly, rounded half up.
    ///
    /// Questions skipped by an early finish still count in the denominator.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        let planned = self.questions.len() as u64;
        let score = u64::from(self.score);
        u32::try_from((200 * score + planned) / (2 * planned)).unwrap_or(100)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.is_finished(),
        }
    }

    /// Per-status stats rebuilt from the questions shown and the answers recorded.
    ///
    /// Always equal to [`QuizSession::stats`].
    #[must_use]
    pub fn recomputed_stats(&self) -> CategoryStats {
        let shown = (self.current + 1).min(self.questions.len());
        CategoryStats::recompute(&self.questions[..shown], &self.answers)
    }

    /// Grade `token` against the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless the current question is shown and unanswered.
    /// Returns `QuizError::MismatchedAnswer` if `token` is the wrong kind for the question.
    pub fn submit_answer(&mut self, token: AnswerToken) -> Result<AnswerRecord, QuizError> {
        self.require_phase(SessionPhase::Shown, "submit an answer")?;
        let question = self
            .questions
            .get(self.current)
            .ok_or(QuizError::InvalidPhase {
                operation: "submit an answer",
                phase: self.phase,
            })?;
        if !question.accepts(token) {
            return Err(QuizError::MismatchedAnswer {
                token,
                kind: question.kind(),
            });
        }

        let record = AnswerRecord::grade(question.clone(), token);
        if record.is_correct {
            self.score += 1;
            if let Some(status) = record.question.baseline_status() {
                self.stats.record_correct(status);
            }
        }

        tracing::debug!(
            session = %self.id,
            index = self.current,
            selected = %record.selected,
            correct = %record.correct,
            "answer recorded"
        );

        self.answers.push(record.clone());
        self.phase = SessionPhase::Answered;
        Ok(record)
    }

    /// Move past an answered question, finishing after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` unless the current question has been answered.
    pub fn advance(&mut self) -> Result<SessionPhase, QuizError> {
        self.require_phase(SessionPhase::Answered, "advance")?;

        self.current += 1;
        if self.current < self.questions.len() {
            self.load_current();
        } else {
            self.phase = SessionPhase::Finished;
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.questions.len(),
                "session finished"
            );
        }
        Ok(self.phase)
    }

    /// End the session now, keeping whatever has been scored so far.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidPhase` if the session is already finished.
    pub fn finish_early(&mut self) -> Result<(), QuizError> {
        if self.is_finished() {
            return Err(QuizError::InvalidPhase {
                operation: "finish early",
                phase: self.phase,
            });
        }

        self.phase = SessionPhase::Finished;
        self.finished_early = true;
        tracing::info!(
            session = %self.id,
            score = self.score,
            answered = self.answers.len(),
            total = self.questions.len(),
            "session finished early"
        );
        Ok(())
    }

    fn load_current(&mut self) {
        if let Some(status) = self
            .questions
            .get(self.current)
            .and_then(Question::baseline_status)
        {
            self.stats.record_shown(status);
        }
        self.phase = SessionPhase::Shown;
    }

    fn require_phase(&self, expected: SessionPhase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("answers_len", &self.answers.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
