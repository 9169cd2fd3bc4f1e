//! Property-based tests for the state machine
//!
//! These tests verify the key invariants hold across all possible inputs.

use std::time::Duration;

use proptest::prelude::*;

use super::evaluator::{fold_turn, talking_duration};
use super::state::*;
use super::transition::{transition, TransitionError};
use super::*;
use crate::config::GameConfig;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_config() -> GameConfig {
    GameConfig::immediate()
}

/// Coarse ordering of broadcast phases within one segment.
fn phase_ordinal(phase: &GamePhase) -> u8 {
    match phase {
        GamePhase::Setup => 0,
        GamePhase::Intro => 1,
        GamePhase::Interview { .. } => 2,
        GamePhase::Summary => 3,
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_sentiment() -> impl Strategy<Value = Sentiment> {
    prop_oneof![
        Just(Sentiment::Positive),
        Just(Sentiment::Negative),
        Just(Sentiment::Neutral),
    ]
}

/// Turns with deltas well outside the documented [-5, +5] band: the
/// invariants must hold regardless of magnitude.
fn arb_turn() -> impl Strategy<Value = Turn> {
    (
        "[a-zA-Z ,.!?]{0,120}",
        arb_sentiment(),
        -100.0f64..100.0,
        any::<bool>(),
    )
        .prop_map(|(text, sentiment, stock_change, interview_over)| Turn {
            text,
            sentiment,
            stock_change,
            interview_over,
        })
}

fn arb_profile() -> impl Strategy<Value = CompanyProfile> {
    ("[a-zA-Z]{1,12}", "[a-zA-Z]{1,12}", "[a-zA-Z ]{0,40}").prop_map(
        |(name, industry, mission)| CompanyProfile {
            name,
            industry,
            mission,
        },
    )
}

fn arb_exchange() -> impl Strategy<Value = ExchangePhase> {
    prop_oneof![
        Just(ExchangePhase::AwaitingOpening),
        Just(ExchangePhase::AwaitingAnswer),
        Just(ExchangePhase::AwaitingReply),
        Just(ExchangePhase::WrappingUp),
    ]
}

fn arb_phase() -> impl Strategy<Value = GamePhase> {
    prop_oneof![
        Just(GamePhase::Setup),
        Just(GamePhase::Intro),
        arb_exchange().prop_map(|exchange| GamePhase::Interview { exchange }),
        Just(GamePhase::Summary),
    ]
}

fn arb_interview_state() -> impl Strategy<Value = InterviewState> {
    (0.0f64..500.0, 0i32..=100, 0u32..20).prop_map(|(stock, sentiment, count)| InterviewState {
        stock_price: stock,
        audience_sentiment: sentiment,
        question_count: count,
        max_questions: 10,
    })
}

fn arb_game_state() -> impl Strategy<Value = GameState> {
    (
        arb_phase(),
        proptest::option::of(arb_profile()),
        arb_interview_state(),
        0u64..3,
    )
        .prop_map(|(phase, profile, interview, generation)| GameState {
            phase,
            profile,
            interview,
            generation,
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_profile().prop_map(|profile| Event::ProfileSubmitted { profile }),
        (0u64..3).prop_map(|generation| Event::IntroElapsed { generation }),
        (arb_turn(), 0u64..3).prop_map(|(turn, generation)| Event::OpeningReady {
            turn,
            generation
        }),
        "[a-zA-Z ]{0,60}".prop_map(|text| Event::AnswerSubmitted { text }),
        (arb_turn(), 0u64..3).prop_map(|(turn, generation)| Event::ReplyReady {
            turn,
            generation
        }),
        (0u64..3).prop_map(|generation| Event::SummaryDue { generation }),
        (0u64..3).prop_map(|generation| Event::TalkingElapsed { generation }),
        Just(Event::RestartRequested),
    ]
}

// ============================================================================
// Evaluator Invariants
// ============================================================================

proptest! {
    /// Sentiment stays in [0, 100] and the stock price never goes
    /// negative, for any sequence of journalist turns.
    #[test]
    fn interview_state_invariants_hold(
        turns in proptest::collection::vec(arb_turn(), 0..50)
    ) {
        let config = GameConfig::default();
        let mut state = InterviewState::new(&config);
        for turn in &turns {
            state = fold_turn(&state, turn, Sender::Journalist);
            prop_assert!(state.stock_price >= 0.0);
            prop_assert!((0..=100).contains(&state.audience_sentiment));
        }
    }

    /// N journalist turns and M user messages interleaved in any order
    /// leave the question count at exactly N.
    #[test]
    fn question_count_tracks_journalist_turns_only(
        entries in proptest::collection::vec((any::<bool>(), arb_turn()), 0..40)
    ) {
        let config = GameConfig::default();
        let mut state = InterviewState::new(&config);
        let mut journalist_turns = 0u32;
        for (from_journalist, turn) in &entries {
            let sender = if *from_journalist {
                journalist_turns += 1;
                Sender::Journalist
            } else {
                Sender::User
            };
            state = fold_turn(&state, turn, sender);
        }
        prop_assert_eq!(state.question_count, journalist_turns);
    }

    /// User-authored messages never move the simulation.
    #[test]
    fn user_messages_leave_state_untouched(
        turn in arb_turn(),
        prior in arb_interview_state()
    ) {
        let after = fold_turn(&prior, &turn, Sender::User);
        prop_assert_eq!(prior, after);
    }

    /// The talking cue never exceeds its cap.
    #[test]
    fn talking_cue_is_capped(text in "[a-zA-Z ,.!?]{0,500}") {
        prop_assert!(talking_duration(&text) <= Duration::from_millis(3_000));
    }
}

// ============================================================================
// Transition Invariants
// ============================================================================

proptest! {
    /// The transition function is total: any state/event pair either
    /// transitions or rejects, it never panics.
    #[test]
    fn transition_is_total(state in arb_game_state(), event in arb_event()) {
        let _ = transition(&state, &test_config(), event);
    }

    /// Accepted transitions keep the interview invariants intact.
    #[test]
    fn accepted_transitions_preserve_invariants(
        state in arb_game_state(),
        event in arb_event()
    ) {
        if let Ok(result) = transition(&state, &test_config(), event) {
            let interview = &result.new_state.interview;
            prop_assert!(interview.stock_price >= 0.0);
            prop_assert!((0..=100).contains(&interview.audience_sentiment));
        }
    }

    /// Phases only move forward within a generation; only a restart goes
    /// back, and it bumps the generation.
    #[test]
    fn phase_never_regresses_within_a_generation(
        state in arb_game_state(),
        event in arb_event()
    ) {
        let is_restart = matches!(event, Event::RestartRequested);
        if let Ok(result) = transition(&state, &test_config(), event) {
            if is_restart {
                prop_assert_eq!(result.new_state.phase, GamePhase::Setup);
                prop_assert_eq!(result.new_state.generation, state.generation + 1);
            } else {
                prop_assert!(
                    phase_ordinal(&result.new_state.phase) >= phase_ordinal(&state.phase)
                );
                prop_assert_eq!(result.new_state.generation, state.generation);
            }
        }
    }

    /// Once the summary is on screen, nothing short of a restart changes
    /// the state or issues another round trip.
    #[test]
    fn summary_is_inert(state in arb_game_state(), event in arb_event()) {
        if !matches!(event, Event::RestartRequested) {
            let mut state = state;
            state.phase = GamePhase::Summary;
            if let Ok(result) = transition(&state, &test_config(), event) {
                prop_assert_eq!(result.new_state, state);
                prop_assert!(result.effects.is_empty());
            }
        }
    }

    /// A generation stamp that no longer matches is always a silent
    /// no-op, whatever the phase.
    #[test]
    fn stale_generations_are_noops(
        state in arb_game_state(),
        turn in arb_turn(),
        bump in 1u64..4
    ) {
        let stale = state.generation + bump;
        let events = [
            Event::IntroElapsed { generation: stale },
            Event::OpeningReady { turn: turn.clone(), generation: stale },
            Event::ReplyReady { turn, generation: stale },
            Event::SummaryDue { generation: stale },
        ];
        for event in events {
            let result = transition(&state, &test_config(), event).unwrap();
            prop_assert_eq!(&result.new_state, &state);
            prop_assert!(result.effects.is_empty());
        }
    }

    /// The loading guard tracks the machine's own notion of an
    /// outstanding round trip.
    #[test]
    fn answers_rejected_while_round_trip_outstanding(state in arb_game_state()) {
        if state.phase.round_trip_outstanding() {
            let result = transition(
                &state,
                &test_config(),
                Event::AnswerSubmitted { text: "anything".to_string() },
            );
            prop_assert_eq!(result.unwrap_err(), TransitionError::ReplyPending);
        }
    }

    /// At most one collaborator round trip is requested per transition.
    #[test]
    fn at_most_one_round_trip_per_transition(
        state in arb_game_state(),
        event in arb_event()
    ) {
        if let Ok(result) = transition(&state, &test_config(), event) {
            let round_trips = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::BeginSession { .. } | Effect::RequestReply { .. }))
                .count();
            prop_assert!(round_trips <= 1);
        }
    }
}
