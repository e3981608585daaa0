//! Quadruple pane rendering
//!
//! Lists the quadruples emitted so far. The line touched by the current
//! event is highlighted; jump targets are colored by state: still the
//! placeholder, backpatched, or fixed at emission.

use crate::compiler::constants::PLACEHOLDER_TARGET;
use crate::ir::{Operand, Quadruple};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use rustc_hash::FxHashSet;

use super::utils::{inner_height, operand_style, pane_block, ScrollState};

pub struct QuadRenderData<'a> {
    pub quads: &'a [Quadruple],
    /// Line emitted or patched by the current event
    pub touched_line: Option<usize>,
    /// Lines whose target has been backpatched so far
    pub patched_lines: &'a FxHashSet<usize>,
}

fn result_style(quad: &Quadruple, is_patched: bool) -> Style {
    match quad.result {
        Operand::Line(PLACEHOLDER_TARGET) if quad.op.is_jump() => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::ITALIC),
        Operand::Line(_) if is_patched => Style::default()
            .fg(DEFAULT_THEME.patched)
            .add_modifier(Modifier::BOLD),
        _ => operand_style(&quad.result),
    }
}

fn quad_line(quad: &Quadruple, is_touched: bool, is_patched: bool) -> Line<'static> {
    let sep = Style::default().fg(DEFAULT_THEME.comment);
    let line_style = if is_touched {
        Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let mut spans = vec![
        Span::styled(format!("{:4}: ", quad.line), line_style),
        Span::styled("(", sep),
        Span::styled(quad.op.to_string(), Style::default().fg(DEFAULT_THEME.operator)),
        Span::styled(", ", sep),
        Span::styled(quad.arg1.to_string(), operand_style(&quad.arg1)),
        Span::styled(", ", sep),
        Span::styled(quad.arg2.to_string(), operand_style(&quad.arg2)),
        Span::styled(", ", sep),
        Span::styled(quad.result.to_string(), result_style(quad, is_patched)),
        Span::styled(")", sep),
    ];

    if is_touched {
        let background = Style::default().bg(DEFAULT_THEME.current_line_bg);
        for span in &mut spans {
            span.style = span.style.patch(background);
        }
    }
    Line::from(spans)
}

/// Render the quadruple pane
pub fn render_quads_pane(
    frame: &mut Frame,
    area: Rect,
    data: &QuadRenderData,
    is_focused: bool,
    scroll: &mut ScrollState,
) {
    let title = format!(" Quadruples ({}) ", data.quads.len());
    let block = pane_block(&title, is_focused);

    if data.quads.is_empty() {
        let paragraph = Paragraph::new("(nothing emitted yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = inner_height(area);
    scroll.follow(data.touched_line.map(|line| line - 1), visible_height);
    scroll.clamp(data.quads.len(), visible_height);

    let lines: Vec<Line> = data
        .quads
        .iter()
        .skip(scroll.offset)
        .take(visible_height)
        .map(|quad| {
            quad_line(
                quad,
                data.touched_line == Some(quad.line),
                data.patched_lines.contains(&quad.line),
            )
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Operator;

    #[test]
    fn test_quad_line_text_matches_report() {
        let quad = Quadruple {
            line: 5,
            op: Operator::Je,
            arg1: Operand::name("#TEMP1"),
            arg2: Operand::Empty,
            result: Operand::Line(9),
        };
        let line = quad_line(&quad, false, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text.trim_start(), quad.to_string());
        assert_eq!(line.spans[8].style.fg, Some(DEFAULT_THEME.patched));
    }

    #[test]
    fn test_placeholder_target_flagged() {
        let quad = Quadruple {
            line: 1,
            op: Operator::Je,
            arg1: Operand::Empty,
            arg2: Operand::Empty,
            result: Operand::Line(PLACEHOLDER_TARGET),
        };
        assert_eq!(result_style(&quad, false).fg, Some(DEFAULT_THEME.error));
    }
}
