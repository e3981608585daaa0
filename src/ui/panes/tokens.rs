//! Token stream pane rendering
//!
//! Shows the lexer output in report form, one token per row, with the token
//! the parser had just matched highlighted.

use crate::parser::lexer::{Token, TokenKind};
use crate::report::token_entry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::utils::{inner_height, pane_block, ScrollState};

fn token_style(token: &Token) -> Style {
    match token.kind {
        TokenKind::Keyword(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Number(_) => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Punct(_) => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::Ident(_) => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::Eof => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Render the token pane. `cursor` is the index of the last matched token.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: Option<usize>,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let title = format!(" Tokens ({}) ", tokens.len());
    let block = pane_block(&title, is_focused);

    let visible_height = inner_height(area);
    scroll.follow(cursor, visible_height);
    scroll.clamp(tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(scroll.offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let location = Span::styled(
                format!("{:>4}:{:<3} ", token.location.line, token.location.column),
                Style::default().fg(DEFAULT_THEME.comment),
            );
            let mut entry = Span::styled(token_entry(token), token_style(token));
            if cursor == Some(idx) {
                entry.style = entry.style.bg(DEFAULT_THEME.current_line_bg);
            }
            ListItem::new(Line::from(vec![location, entry]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
