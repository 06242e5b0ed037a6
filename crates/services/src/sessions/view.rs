use serde::Serialize;

use baseline_core::model::{
    AnswerRecord, AnswerToken, BaselineStatus, FeatureItem, Question, QuestionKind, Side, Url,
};

use super::service::QuizSession;

pub const BASELINE_TITLE: &str = "What is the baseline support status for this feature?";
pub const COMPARISON_TITLE: &str = "Which web feature was released more recently?";

const CORRECT_HEADLINE: &str = "✅ Correct!";
const INCORRECT_HEADLINE: &str = "❌ Incorrect";

/// Presentation-agnostic view of the question on screen.
///
/// Front ends render this; they never reach into the session directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// 1-based.
    pub number: usize,
    pub total: usize,
    pub score: u32,
    pub progress: f64,
    pub title: &'static str,
    pub body: QuestionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum QuestionBody {
    Baseline {
        name: String,
        description: String,
        options: Vec<AnswerOption>,
    },
    Comparison {
        cards: [FeatureCard; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub token: AnswerToken,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureCard {
    pub side: Side,
    pub name: String,
    pub description: String,
}

impl FeatureCard {
    fn new(side: Side, feature: &FeatureItem) -> Self {
        Self {
            side,
            name: feature.name().to_string(),
            description: feature.description().to_string(),
        }
    }
}

impl QuestionView {
    /// View of the current question, or `None` once the session is finished.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Option<Self> {
        let question = session.current_question()?;
        let body = match question {
            Question::Baseline(q) => QuestionBody::Baseline {
                name: q.feature().name().to_string(),
                description: q.feature().description().to_string(),
                options: BaselineStatus::ALL
                    .into_iter()
                    .map(|status| AnswerOption {
                        token: status.into(),
                        label: status.label(),
                    })
                    .collect(),
            },
            Question::Comparison(q) => QuestionBody::Comparison {
                cards: [
                    FeatureCard::new(Side::A, q.feature(Side::A)),
                    FeatureCard::new(Side::B, q.feature(Side::B)),
                ],
            },
        };

        Some(Self {
            number: session.current_index() + 1,
            total: session.planned_len(),
            score: session.score(),
            progress: session.progress_fraction(),
            title: title_for(question.kind()),
            body,
        })
    }
}

#[must_use]
pub fn title_for(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Baseline => BASELINE_TITLE,
        QuestionKind::Comparison => COMPARISON_TITLE,
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Extra reading attached to feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Citation {
    /// Browser support summary for the feature.
    SupportInfo(String),
    Documentation(Url),
}

/// Shown after an answer is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub is_correct: bool,
    pub selected: AnswerToken,
    pub correct: AnswerToken,
    pub headline: &'static str,
    pub message: String,
    pub citation: Option<Citation>,
}

impl FeedbackView {
    #[must_use]
    pub fn from_record(record: &AnswerRecord) -> Self {
        let headline = if record.is_correct {
            CORRECT_HEADLINE
        } else {
            INCORRECT_HEADLINE
        };

        let (message, citation) = match &record.question {
            Question::Baseline(q) => {
                let feature = q.feature();
                let correct = q.correct_answer().label();
                if record.is_correct {
                    (
                        format!(
                            "You correctly identified that {} has {correct} status.",
                            feature.name()
                        ),
                        Some(Citation::Documentation(feature.documentation_url())),
                    )
                } else {
                    let selected = match record.selected {
                        AnswerToken::Status(status) => status.label(),
                        AnswerToken::Side(side) => side.as_str(),
                    };
                    let citation = match feature.support_info() {
                        Some(info) => Citation::SupportInfo(info.to_string()),
                        None => Citation::Documentation(feature.documentation_url()),
                    };
                    (
                        format!(
                            "{} actually has {correct} status, not {selected}.",
                            feature.name()
                        ),
                        Some(citation),
                    )
                }
            }
            Question::Comparison(q) => {
                let newer = q.correct_answer();
                let older = newer.other();
                let verdict = if record.is_correct { "indeed" } else { "actually" };
                (
                    format!(
                        "{} is {verdict} newer! It was supported from Chrome {}, while {} was supported from Chrome {}.",
                        q.feature(newer).name(),
                        q.version(newer),
                        q.feature(older).name(),
                        q.version(older),
                    ),
                    Some(Citation::Documentation(q.feature(newer).documentation_url())),
                )
            }
        };

        Self {
            is_correct: record.is_correct,
            selected: record.selected,
            correct: record.correct,
            headline,
            message,
            citation,
        }
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub status: BaselineStatus,
    pub label: &'static str,
    pub correct: u32,
    pub total: u32,
}

/// Final screen of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub score: u32,
    pub total: usize,
    pub accuracy: u32,
    pub answered: usize,
    pub finished_early: bool,
    pub categories: Vec<CategoryResult>,
}

impl ResultsView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            score: session.score(),
            total: session.planned_len(),
            accuracy: session.accuracy(),
            answered: session.answers().len(),
            finished_early: session.finished_early(),
            categories: session
                .stats()
                .iter()
                .map(|(status, tally)| CategoryResult {
                    status,
                    label: status.label(),
                    correct: tally.correct,
                    total: tally.total,
                })
                .collect(),
        }
    }

    /// `score/total`, as shown on the results screen.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseline_core::model::{BaselineQuestion, ComparisonQuestion, FeatureId, GameMode};
    use serde_json::json;

    fn feature(id: &str, name: &str, status: BaselineStatus, support: Option<&str>) -> FeatureItem {
        let item =
            FeatureItem::new(FeatureId::new(id), name, "A web platform feature.", status).unwrap();
        match support {
            Some(info) => item.with_support_info(info),
            None => item,
        }
    }

    fn comparison() -> Question {
        ComparisonQuestion::pair(
            feature("a", "Old thing", BaselineStatus::High, Some("chrome: 50")),
            feature("b", "New thing", BaselineStatus::Low, Some("chrome: 120")),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn question_view_lists_three_status_options() {
        let question =
            BaselineQuestion::new(feature("grid", "Grid", BaselineStatus::High, None)).into();
        let session = QuizSession::from_questions(GameMode::Baseline, vec![question]).unwrap();

        let view = QuestionView::from_session(&session).unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 1);
        assert_eq!(view.title, BASELINE_TITLE);
        let QuestionBody::Baseline { name, options, .. } = &view.body else {
            panic!("expected a baseline body");
        };
        assert_eq!(name, "Grid");
        let labels: Vec<_> = options.iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                "Baseline 2024+ (High)",
                "Baseline 2024 (Low)",
                "Unknown/Limited Support"
            ]
        );
    }

    #[test]
    fn comparison_view_serializes_cards() {
        let session = QuizSession::from_questions(GameMode::Mixed, vec![comparison()]).unwrap();
        let view = QuestionView::from_session(&session).unwrap();
        assert_eq!(view.title, COMPARISON_TITLE);

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["body"]["kind"], json!("comparison"));
        assert_eq!(value["body"]["cards"][1]["side"], json!("b"));
        assert_eq!(value["body"]["cards"][1]["name"], json!("New thing"));
    }

    #[test]
    fn finished_session_has_no_question_view() {
        let question =
            BaselineQuestion::new(feature("grid", "Grid", BaselineStatus::High, None)).into();
        let mut session = QuizSession::from_questions(GameMode::Baseline, vec![question]).unwrap();
        session.finish_early().unwrap();
        assert!(QuestionView::from_session(&session).is_none());
    }

    #[test]
    fn incorrect_baseline_feedback_cites_support_info() {
        let question = Question::from(BaselineQuestion::new(feature(
            "has",
            ":has()",
            BaselineStatus::Low,
            Some("chrome: 105, firefox: 121"),
        )));
        let record = AnswerRecord::grade(question, BaselineStatus::High.into());

        let view = FeedbackView::from_record(&record);
        assert_eq!(view.headline, "❌ Incorrect");
        assert_eq!(
            view.message,
            ":has() actually has Baseline 2024 (Low) status, not Baseline 2024+ (High)."
        );
        assert_eq!(
            view.citation,
            Some(Citation::SupportInfo("chrome: 105, firefox: 121".into()))
        );
    }

    #[test]
    fn correct_baseline_feedback_links_documentation() {
        let question =
            Question::from(BaselineQuestion::new(feature("grid", "Grid", BaselineStatus::High, None)));
        let record = AnswerRecord::grade(question, BaselineStatus::High.into());

        let view = FeedbackView::from_record(&record);
        assert_eq!(view.headline, "✅ Correct!");
        assert_eq!(
            view.message,
            "You correctly identified that Grid has Baseline 2024+ (High) status."
        );
        let Some(Citation::Documentation(url)) = view.citation else {
            panic!("expected a documentation link");
        };
        assert_eq!(
            url.as_str(),
            "https://developer.mozilla.org/en-US/search?q=Grid"
        );
    }

    #[test]
    fn comparison_feedback_names_both_versions() {
        let right = FeedbackView::from_record(&AnswerRecord::grade(comparison(), Side::B.into()));
        assert!(right.is_correct);
        assert_eq!(
            right.message,
            "New thing is indeed newer! It was supported from Chrome 120, while Old thing was supported from Chrome 50."
        );

        let wrong = FeedbackView::from_record(&AnswerRecord::grade(comparison(), Side::A.into()));
        assert!(!wrong.is_correct);
        assert!(wrong.message.starts_with("New thing is actually newer!"));
        assert_eq!(wrong.correct, AnswerToken::Side(Side::B));
    }

    #[test]
    fn results_view_reports_categories_in_display_order() {
        let questions = vec![
            BaselineQuestion::new(feature("a", "A", BaselineStatus::Unknown, None)).into(),
            BaselineQuestion::new(feature("b", "B", BaselineStatus::High, None)).into(),
        ];
        let mut session = QuizSession::from_questions(GameMode::Baseline, questions).unwrap();
        session.submit_answer(BaselineStatus::Unknown.into()).unwrap();
        session.finish_early().unwrap();

        let results = ResultsView::from_session(&session);
        assert_eq!(results.score_line(), "1/2");
        assert_eq!(results.accuracy, 50);
        assert!(results.finished_early);
        let rows: Vec<_> = results
            .categories
            .iter()
            .map(|c| (c.status, c.correct, c.total))
            .collect();
        assert_eq!(
            rows,
            vec![
                (BaselineStatus::High, 0, 0),
                (BaselineStatus::Low, 0, 0),
                (BaselineStatus::Unknown, 1, 1)
            ]
        );
    }
}
