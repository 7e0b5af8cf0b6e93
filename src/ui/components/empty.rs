//! Empty state component renderer.
//!
//! Renders the centered message displayed when the visible list has no cards:
//! "No item Found" for the results list, "Add Books to Favorite" for an empty
//! shelf.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the empty state message inside the card area.
///
/// Displays a centered two-line message starting a few rows below the given
/// row. Returns the next available row position.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let message_row = row + 3;

    let message_len = empty.message.chars().count();
    let message_padding = (cols.saturating_sub(message_len)) / 2;

    position_cursor(message_row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(message_padding));
    print!("{}", empty.message);
    print!("{}", Theme::reset());

    let subtitle_len = empty.subtitle.chars().count();
    let subtitle_padding = (cols.saturating_sub(subtitle_len)) / 2;

    position_cursor(message_row + 2, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(subtitle_padding));
    print!("{}", empty.subtitle);
    print!("{}", Theme::reset());

    message_row + 3
}
