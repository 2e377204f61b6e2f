//! Integration tests for the stairword-core public API.
//!
//! These tests play a whole puzzle through the crate root re-exports:
//! schedule → session → validation → scoring → layout.

use std::sync::Arc;

use stairword_core::{
    chain_score, layout_chain, normalize_chain, overlap_count, render_text, ChainError,
    ChainRules, DailySchedule, OfflineDictionary, PuzzleSession, ScoringPolicy, TrustedWordList,
    WordValidator,
};

const EXAMPLE_CHAIN: [&str; 5] = ["zinger", "gerbil", "billy", "lysine", "nestle"];

fn schedule() -> DailySchedule {
    DailySchedule::new(
        stairword_core::domain::puzzle::default_epoch(),
        vec![("zinger".to_string(), "nestle".to_string())],
    )
    .expect("schedule with one pair must be valid")
}

#[test]
fn test_overlap_count_matches_suffix_prefix_property() {
    for pair in EXAMPLE_CHAIN.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let k = overlap_count(a, b);
        assert!(k > 0, "{a} -> {b} must overlap");
        assert_eq!(&a[a.len() - k..], &b[..k]);
        // No longer suffix of `a` (short of the whole word) is a prefix of `b`.
        for longer in k + 1..a.len() {
            assert!(!b.starts_with(&a[a.len() - longer..]));
        }
    }
}

#[test]
fn test_played_session_matches_direct_score_and_layout() {
    // Arrange
    let puzzle = schedule().puzzle_at(stairword_core::domain::puzzle::default_epoch());
    let mut session = PuzzleSession::new(puzzle.clone(), ChainRules::default());

    // Act
    for word in ["Gerbil", "BILLY", "lysine"] {
        session.place(word).expect("example words must be accepted");
    }

    // Assert
    assert!(session.is_complete());
    assert_eq!(session.words(), EXAMPLE_CHAIN);
    assert_eq!(session.score(), chain_score(&EXAMPLE_CHAIN, ScoringPolicy::DoubleEnded));
    assert_eq!(session.score(), 15);
    assert_eq!(session.layout(), layout_chain(&EXAMPLE_CHAIN));
    assert_eq!(
        ChainRules::default().validate_shape(session.words(), &puzzle),
        Ok(())
    );
}

#[test]
fn test_submitted_chain_is_normalised_before_validation() {
    let puzzle = schedule().puzzle_at(stairword_core::domain::puzzle::default_epoch());
    let words = normalize_chain(&["ZINGER", "Gerbil", "billy", "LySiNe", "nestle"]);
    assert_eq!(ChainRules::default().validate_shape(&words, &puzzle), Ok(()));
}

#[test]
fn test_wrong_end_word_is_rejected_regardless_of_overlaps() {
    let puzzle = schedule().puzzle_at(stairword_core::domain::puzzle::default_epoch());
    let words = ["zinger", "gerbil", "billy", "lysine", "nested"];
    assert_eq!(
        ChainRules::default().validate_shape(&words, &puzzle),
        Err(ChainError::NotTodaysWords)
    );
}

#[test]
fn test_render_text_of_example_chain() {
    let text = render_text(&layout_chain(&EXAMPLE_CHAIN));
    assert_eq!(text.lines().count(), 5);
    assert_eq!(text.lines().last(), Some("             nestle"));
}

#[tokio::test]
async fn test_offline_validator_accepts_chain_built_from_trusted_words() {
    let trusted = Arc::new(TrustedWordList::new(EXAMPLE_CHAIN));
    let validator = WordValidator::new(trusted, Arc::new(OfflineDictionary));

    assert_eq!(validator.validate_all(&EXAMPLE_CHAIN).await, Ok(()));
    assert_eq!(
        validator.validate_all(&["zinger", "gerbilx"]).await,
        Err(ChainError::NotAWord("gerbilx".to_string()))
    );
}
