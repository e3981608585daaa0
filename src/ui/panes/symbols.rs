//! Symbol table pane rendering

use crate::ir::{SymbolTable, SymbolValue};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

use super::utils::{inner_height, pane_block, ScrollState};

fn kind_label(value: SymbolValue) -> &'static str {
    match value {
        SymbolValue::Const(_) => "const",
        SymbolValue::Var(_) => "var",
        SymbolValue::Temp => "temp",
    }
}

/// Render the symbol table pane. `touched` is the symbol declared or
/// allocated by the current event.
pub fn render_symbols_pane(
    frame: &mut Frame,
    area: Rect,
    symbols: &SymbolTable,
    touched: Option<&str>,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let title = format!(" Symbols ({}) ", symbols.len());
    let block = pane_block(&title, is_focused);

    if symbols.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = inner_height(area);
    let touched_index = touched.and_then(|name| symbols.iter().position(|s| s.name == name));
    scroll.follow(touched_index, visible_height);
    scroll.clamp(symbols.len(), visible_height);

    let name_width = symbols.iter().map(|s| s.name.len()).max().unwrap_or(0);

    let items: Vec<ListItem> = symbols
        .iter()
        .enumerate()
        .skip(scroll.offset)
        .take(visible_height)
        .map(|(idx, symbol)| {
            let is_touched = touched_index == Some(idx);
            let name_style = match symbol.value {
                SymbolValue::Temp => Style::default().fg(DEFAULT_THEME.temporary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            let mut spans = vec![
                Span::styled(format!("{:<width$}", symbol.name, width = name_width), name_style),
                Span::styled(" : ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    symbol.value.to_string(),
                    Style::default().fg(DEFAULT_THEME.number),
                ),
                Span::styled(
                    format!("  {}", kind_label(symbol.value)),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            if is_touched {
                let highlight = Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
                for span in &mut spans {
                    span.style = span.style.patch(highlight);
                }
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
