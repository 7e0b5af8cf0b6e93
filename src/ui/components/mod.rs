//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for different UI
//! elements. Each component renders a specific part of the interface.
//!
//! # Components
//!
//! - [`header`]: Title bar with view name, counts, and searching indicator
//! - [`footer`]: Keybinding hints
//! - [`search`]: Query input box (border, query text, cursor)
//! - [`card`]: Book card list (title rows, detail panels, action hints)
//! - [`empty`]: Empty state message
//! - [`notice`]: Modal notice overlay
//!
//! # Layout Modes
//!
//! Two high-level layout functions compose the components:
//!
//! - [`render_normal_mode`]: Header + Cards + Footer
//! - [`render_search_mode`]: Header + Search bar + Cards + Footer
//!
//! Both fill the card area with either the visible cards (plus a trailing
//! loading indicator during pagination) or the empty state, and paint the
//! notice overlay last.

mod card;
mod empty;
mod footer;
mod header;
mod notice;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SearchBarInfo, UiViewModel};

use card::render_cards;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use notice::render_notice;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
///
/// Used to separate UI sections (header/list, list/footer). Returns the next
/// available row position.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the trailing loading indicator shown during a pagination fetch.
fn render_loading_more(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("    {}", Theme::fg(&theme.colors.loading_fg));
    print!("loading more...");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the card area: visible cards or the empty state, plus the
/// load-more indicator.
fn render_list_area(row: usize, vm: &UiViewModel, theme: &Theme, cols: usize) -> usize {
    let mut current_row = if let Some(empty) = &vm.empty_state {
        render_empty_state(row, empty, theme, cols)
    } else {
        render_cards(row, &vm.cards, theme, cols)
    };

    if vm.loading_more {
        current_row = render_loading_more(current_row, theme);
    }

    current_row
}

/// Renders the normal mode layout (no search bar).
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Cards / Empty state]
/// [Loading-more indicator, when paginating]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// [Notice overlay, when live]
/// ```
pub fn render_normal_mode(vm: &UiViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    let _current_row = render_list_area(current_row, vm, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(notice) = &vm.notice {
        render_notice(notice, theme, rows, cols);
    }
}

/// Renders the search mode layout (with search bar).
///
/// Same as [`render_normal_mode`] with the 3-line search box between the
/// header border and the card area.
pub fn render_search_mode(
    vm: &UiViewModel,
    search_bar: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, search_bar, theme, cols);
    let _current_row = render_list_area(current_row, vm, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(notice) = &vm.notice {
        render_notice(notice, theme, rows, cols);
    }
}
