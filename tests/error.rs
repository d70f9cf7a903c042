use std::io;

use pacman_rounds::error::{GameError, GameResult, StoreError};
use speculoos::prelude::*;

#[test]
fn test_store_error_from_io_error() {
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem");
    let store_error: StoreError = io_error.into();

    assert!(matches!(store_error, StoreError::Io(_)));
    assert_that(&store_error.to_string()).is_equal_to("IO error: read-only filesystem".to_string());
}

#[test]
fn test_corrupt_record_display() {
    let error = StoreError::Corrupt("abc".to_string());
    assert_that(&error.to_string()).is_equal_to("Corrupt high score record: \"abc\"".to_string());
}

#[test]
fn test_game_error_from_store_error() {
    let game_error: GameError = StoreError::Corrupt("-1".to_string()).into();

    assert!(matches!(game_error, GameError::Store(StoreError::Corrupt(_))));
    assert_that(&game_error.to_string()).starts_with("High score store error:");
}

#[test]
fn test_question_mark_lifts_store_errors() {
    fn load() -> GameResult<u32> {
        Err(StoreError::Io(io::Error::other("disk gone")))?
    }

    assert!(matches!(load(), Err(GameError::Store(StoreError::Io(_)))));
}
