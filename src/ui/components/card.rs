//! Book card component renderer.
//!
//! Renders one card per book: an expansion arrow, an optional thumbnail
//! marker, a shelf marker for favorited books, and the title. An expanded
//! card additionally shows the Description, Publication Date, and Publisher
//! detail rows — each is rendered whenever the card is open, empty values
//! included. The selected card shows a hint row for whichever favorites
//! action it offers.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CardView;

/// Renders all visible cards starting at the specified row.
///
/// Returns the next available row position.
pub fn render_cards(row: usize, cards: &[CardView], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for card in cards {
        current_row = render_card(current_row, card, theme, cols);
    }
    current_row
}

/// Renders a single card and returns the next available row position.
fn render_card(row: usize, card: &CardView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_title_row(row, card, theme, cols);

    if let Some(detail) = &card.detail {
        current_row = render_detail_row(current_row, "Description", &detail.description, theme);
        current_row =
            render_detail_row(current_row, "Publication Date", &detail.published_date, theme);
        current_row = render_detail_row(current_row, "Publisher", &detail.publisher, theme);
    }

    if card.is_selected {
        current_row = render_action_row(current_row, card, theme);
    }

    current_row
}

/// Renders the always-visible title row.
///
/// Layout: expansion arrow, thumbnail marker (when the book has a thumbnail
/// URI), shelf marker (when the book is favorited), title with optional
/// fuzzy-match highlighting, padding to fill the selection background.
fn render_title_row(row: usize, card: &CardView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if card.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let arrow = if card.expanded { "▾ " } else { "▸ " };
    print!("{arrow}");

    let mut prefix_len = 2;

    if card.has_thumbnail {
        print!("⊡ ");
        prefix_len += 2;
    }

    if card.is_favorited {
        if !card.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!("★ ");
        if !card.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        prefix_len += 2;
    }

    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, card.is_selected);

    let line_len = prefix_len + card.title.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}

/// Renders one labelled detail row.
fn render_detail_row(row: usize, label: &str, value: &str, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("    {}", Theme::fg(&theme.colors.text_dim));
    print!("{label}: ");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{value}");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the action hint row for the selected card.
///
/// Each capability supplied to the card gets its own hint; in practice the
/// two are mutually exclusive (results cards add, favorites cards remove).
fn render_action_row(row: usize, card: &CardView, theme: &Theme) -> usize {
    if !card.can_add && !card.can_remove {
        return row;
    }

    position_cursor(row, 1);
    print!("    {}", Theme::fg(&theme.colors.text_dim));
    if card.can_add {
        print!("[a] Add to Favorites  ");
    }
    if card.can_remove {
        print!("[x] Remove from Favorites");
    }
    print!("{}", Theme::reset());
    row + 1
}
