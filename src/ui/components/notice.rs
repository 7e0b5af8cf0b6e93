//! Modal notice overlay renderer.
//!
//! Renders the "Added to Favorites" / "Already in Favorites" / "Removed from
//! Favorites" notices as a centered bordered box drawn over the list. The
//! overlay is painted last so it covers whatever is underneath; any key
//! dismisses it.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NoticeView;

/// Hint line shown at the bottom of every notice.
const DISMISS_HINT: &str = "press any key";

/// Renders the notice overlay centered in the terminal.
pub fn render_notice(notice: &NoticeView, theme: &Theme, rows: usize, cols: usize) {
    let inner_width = notice
        .title
        .chars()
        .count()
        .max(notice.body.chars().count())
        .max(DISMISS_HINT.len())
        + 4;
    let box_width = inner_width + 2;

    let left = cols.saturating_sub(box_width) / 2 + 1;
    let top = rows.saturating_sub(6) / 2 + 1;

    position_cursor(top, left);
    print!("{}", Theme::fg(&theme.colors.notice_border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    render_box_line(top + 1, left, inner_width, theme, &title_style, &notice.title);

    let body_style = Theme::fg(&theme.colors.text_normal);
    render_box_line(top + 2, left, inner_width, theme, &body_style, "");
    render_box_line(top + 3, left, inner_width, theme, &body_style, &notice.body);

    let hint_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    render_box_line(top + 4, left, inner_width, theme, &hint_style, DISMISS_HINT);

    position_cursor(top + 5, left);
    print!("{}", Theme::fg(&theme.colors.notice_border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

/// Renders one centered content line inside the notice box.
fn render_box_line(
    row: usize,
    left: usize,
    inner_width: usize,
    theme: &Theme,
    style: &str,
    text: &str,
) {
    let text_len = text.chars().count();
    let pad_left = inner_width.saturating_sub(text_len) / 2;
    let pad_right = inner_width.saturating_sub(text_len + pad_left);

    position_cursor(row, left);
    print!("{}", Theme::fg(&theme.colors.notice_border));
    print!("│");
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(pad_left));
    print!("{style}{text}{}", Theme::reset());
    print!("{}", " ".repeat(pad_right));
    print!("{}", Theme::fg(&theme.colors.notice_border));
    print!("│");
    print!("{}", Theme::reset());
}
