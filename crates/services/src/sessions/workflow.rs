use rand::rngs::StdRng;

use baseline_core::model::{AnswerToken, Catalog, GameMode};
use storage::repository::CatalogSource;

use super::service::{QuizSession, SessionPhase};
use super::view::{FeedbackView, QuestionView, ResultsView};
use crate::Randomness;
use crate::error::QuizError;

/// Lifecycle of the catalog behind the game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Pending,
    Ready(Catalog),
    Unavailable(String),
}

/// Single front-end context: the catalog, one generator, and at most one session.
///
/// Starting a new session replaces the previous one.
pub struct QuizGame {
    catalog: CatalogState,
    rng: StdRng,
    session: Option<QuizSession>,
}

impl QuizGame {
    #[must_use]
    pub fn new(randomness: Randomness) -> Self {
        Self {
            catalog: CatalogState::Pending,
            rng: randomness.rng(),
            session: None,
        }
    }

    /// Game over an already-loaded catalog.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, randomness: Randomness) -> Self {
        Self {
            catalog: CatalogState::Ready(catalog),
            ..Self::new(randomness)
        }
    }

    /// Load the catalog from `source`; returns the number of features.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CatalogUnavailable` if the source fails or yields no features.
    /// The catalog is marked unavailable in that case.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> Result<usize, QuizError> {
        let loaded = match source.load().await {
            Ok(features) => Catalog::new(features).map_err(QuizError::from),
            Err(err) => Err(QuizError::from(err)),
        };

        match loaded {
            Ok(catalog) => {
                let count = catalog.len();
                tracing::info!(source = %source.describe(), features = count, "catalog loaded");
                self.catalog = CatalogState::Ready(catalog);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(source = %source.describe(), error = %err, "catalog load failed");
                let reason = match &err {
                    QuizError::CatalogUnavailable { reason } => reason.clone(),
                    other => other.to_string(),
                };
                self.catalog = CatalogState::Unavailable(reason);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Start a new session in `mode`, discarding any session in progress.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::CatalogPending` before the catalog has loaded and
    /// `QuizError::CatalogUnavailable` if it failed to load.
    pub fn start(&mut self, mode: GameMode) -> Result<&QuizSession, QuizError> {
        let catalog = match &self.catalog {
            CatalogState::Pending => return Err(QuizError::CatalogPending),
            CatalogState::Unavailable(reason) => {
                return Err(QuizError::CatalogUnavailable {
                    reason: reason.clone(),
                });
            }
            CatalogState::Ready(catalog) => catalog,
        };

        let session = QuizSession::start(catalog, mode, &mut self.rng)?;
        Ok(&*self.session.insert(session))
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session, otherwise
    /// whatever [`QuizSession::submit_answer`] returns.
    pub fn submit_answer(&mut self, token: AnswerToken) -> Result<FeedbackView, QuizError> {
        let record = self.active_mut()?.submit_answer(token)?;
        Ok(FeedbackView::from_record(&record))
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session, otherwise
    /// whatever [`QuizSession::advance`] returns.
    pub fn advance(&mut self) -> Result<SessionPhase, QuizError> {
        self.active_mut()?.advance()
    }

    /// End the active session and return its results.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoActiveSession` without a session, otherwise
    /// whatever [`QuizSession::finish_early`] returns.
    pub fn finish_early(&mut self) -> Result<ResultsView, QuizError> {
        let session = self.active_mut()?;
        session.finish_early()?;
        Ok(ResultsView::from_session(session))
    }

    /// Question on screen, if a session is running.
    #[must_use]
    pub fn current_view(&self) -> Option<QuestionView> {
        self.session.as_ref().and_then(QuestionView::from_session)
    }

    /// Results of the active session once it has finished.
    #[must_use]
    pub fn results(&self) -> Option<ResultsView> {
        self.session
            .as_ref()
            .filter(|s| s.is_finished())
            .map(ResultsView::from_session)
    }

    /// Back to the start screen.
    pub fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(session = %session.id(), "session discarded");
        }
    }

    fn active_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        self.session.as_mut().ok_or(QuizError::NoActiveSession)
    }
}
