//! Turn evaluator
//!
//! Pure folds of a journalist turn into the running interview state, plus
//! the talking-cue timing derived from reply length.

use std::time::Duration;

use super::state::{InterviewState, Sender, Sentiment, Turn};

/// Fixed audience reaction step per turn. Deliberately independent of the
/// turn's stock delta magnitude.
pub const SENTIMENT_STEP: i32 = 10;

const SENTIMENT_FLOOR: i32 = 0;
const SENTIMENT_CEIL: i32 = 100;

/// Milliseconds of talking cue per character of reply text.
const TALKING_MILLIS_PER_CHAR: u64 = 50;

/// Upper bound on the talking cue.
const TALKING_CAP: Duration = Duration::from_millis(3_000);

/// Fold one turn into the running state.
///
/// Only journalist-authored turns move the simulation: the stock delta is
/// applied with a floor at zero, audience sentiment steps by the fixed
/// amount clamped to [0, 100], and the question count increments. User
/// messages leave the state untouched.
pub fn fold_turn(prior: &InterviewState, turn: &Turn, sender: Sender) -> InterviewState {
    match sender {
        Sender::User => prior.clone(),
        Sender::Journalist => {
            let adjustment = match turn.sentiment {
                Sentiment::Positive => SENTIMENT_STEP,
                Sentiment::Negative => -SENTIMENT_STEP,
                Sentiment::Neutral => 0,
            };
            InterviewState {
                stock_price: (prior.stock_price + turn.stock_change).max(0.0),
                audience_sentiment: (prior.audience_sentiment + adjustment)
                    .clamp(SENTIMENT_FLOOR, SENTIMENT_CEIL),
                question_count: prior.question_count + 1,
                max_questions: prior.max_questions,
            }
        }
    }
}

/// How long the journalist appears to talk for a reply: proportional to
/// its length, capped so a monologue cannot freeze the studio.
pub fn talking_duration(text: &str) -> Duration {
    let millis = (text.chars().count() as u64).saturating_mul(TALKING_MILLIS_PER_CHAR);
    Duration::from_millis(millis).min(TALKING_CAP)
}
