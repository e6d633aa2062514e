//! RiskLens Interview
//!
//! Guided intake that turns a free-text concern into a draft register record.
//!
//! # Overview
//!
//! 1. [`select_flow`] routes the opening statement to one of five scripted
//!    flows by keyword, in Thai or English
//! 2. The [`Interview`] hands out questions in order; each [`RawAnswer`] is
//!    checked against its [`Question`] and stored as a typed [`Answer`]
//! 3. [`Interview::statement`] folds the answers into a [`RiskStatement`]
//!    with a derived severity, which [`RiskStatement::into_risk`] turns into
//!    a [`risklens_domain::Risk`]
//!
//! # Severity rules
//!
//! Likelihood and impact start at 3 and are clamped to 1-5 at the end.
//!
//! | Answer | Effect |
//! |--------|--------|
//! | No mitigation | likelihood +1 |
//! | Mitigation under way | likelihood −1 |
//! | Revenue or production affected | impact +1 each |
//! | More than two areas affected | impact +1 |
//! | High impact or contract band | impact = 5 |
//! | Low impact or contract band | impact = 2 |
//! | Explicit likelihood or severity | replaces the derived value |
//!
//! # Usage
//!
//! ```
//! use risklens_interview::{Interview, QuestionId, RawAnswer};
//!
//! # fn main() -> Result<(), risklens_interview::InterviewError> {
//! let mut interview = Interview::start("Our packaging supplier is two weeks late");
//! while let Some(question) = interview.next_question() {
//!     let raw = match question.id {
//!         QuestionId::VendorName => RawAnswer::Text("Thai Pack Co".into()),
//!         QuestionId::AffectedAreas => RawAnswer::Choices(vec!["delivery".into()]),
//!         _ => RawAnswer::Choice(question.options[0].value.into()),
//!     };
//!     interview.answer(question.id, raw)?;
//! }
//!
//! let statement = interview.statement();
//! assert_eq!(statement.title, "Thai Pack Co delivery delay risk");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod answer;
mod error;
mod flow;
mod interview;
mod question;

pub use answer::{
    AffectedArea, Answer, DelayDuration, ImpactBand, MitigationStatus, RawAnswer,
    RelationshipStatus, ReplacementPlan, ScalingPlan, ServerType, UsageBand,
};
pub use error::InterviewError;
pub use flow::{select_flow, Flow, FlowSelection};
pub use interview::{Interview, RiskStatement};
pub use question::{ChoiceOption, Question, QuestionId, QuestionKind};
