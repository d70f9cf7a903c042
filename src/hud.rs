//! The presentation collaborator: score, lives and game-over text.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::constants::scoring::SCORE_TEXT_WIDTH;

/// Text surfaces the round controller updates.
pub trait Presentation: Send + Sync {
    fn set_score_text(&mut self, text: &str);
    fn set_high_score_text(&mut self, text: &str);
    fn set_lives_text(&mut self, text: &str);
    fn set_game_over_visible(&mut self, visible: bool);
}

impl<T: Presentation + ?Sized> Presentation for Arc<Mutex<T>> {
    fn set_score_text(&mut self, text: &str) {
        self.lock().set_score_text(text);
    }

    fn set_high_score_text(&mut self, text: &str) {
        self.lock().set_high_score_text(text);
    }

    fn set_lives_text(&mut self, text: &str) {
        self.lock().set_lives_text(text);
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        self.lock().set_game_over_visible(visible);
    }
}

/// Formats a score, zero-padded to at least two digits.
pub fn format_score(score: u32) -> String {
    format!("{score:0width$}", width = SCORE_TEXT_WIDTH)
}

pub fn format_lives(lives: u8) -> String {
    format!("x{lives}")
}

/// Headless HUD that keeps the latest text around for inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextHud {
    pub score: String,
    pub high_score: String,
    pub lives: String,
    pub game_over_visible: bool,
}

impl Presentation for TextHud {
    fn set_score_text(&mut self, text: &str) {
        self.score.clear();
        self.score.push_str(text);
    }

    fn set_high_score_text(&mut self, text: &str) {
        self.high_score.clear();
        self.high_score.push_str(text);
    }

    fn set_lives_text(&mut self, text: &str) {
        self.lives.clear();
        self.lives.push_str(text);
    }

    fn set_game_over_visible(&mut self, visible: bool) {
        if visible != self.game_over_visible {
            debug!(visible, "Game over text toggled");
        }
        self.game_over_visible = visible;
    }
}
