//! Shared pane helpers: borders, scrolling and operand styling

use crate::compiler::constants::TEMP_PREFIX;
use crate::ir::Operand;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
}

/// Rows available inside a bordered pane, min 1
pub(crate) fn inner_height(area: ratatui::layout::Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

pub(crate) fn is_temporary(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX)
}

pub(crate) fn operand_style(operand: &Operand) -> Style {
    match operand {
        Operand::Empty => Style::default().fg(DEFAULT_THEME.comment),
        Operand::Int(_) | Operand::Line(_) => Style::default().fg(DEFAULT_THEME.number),
        Operand::Name(name) if is_temporary(name) => Style::default().fg(DEFAULT_THEME.temporary),
        Operand::Name(_) => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll offset of a list pane.
///
/// The pane follows the item touched by the current snapshot, but only when
/// that item changes, so manual scrolling sticks until the next step.
#[derive(Debug, Default)]
pub struct ScrollState {
    pub offset: usize,
    followed: Option<usize>,
}

impl ScrollState {
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.offset = self.offset.saturating_add(1);
    }

    /// Bring `index` (0-based) into view if it is newly touched.
    pub(crate) fn follow(&mut self, index: Option<usize>, visible_height: usize) {
        if index == self.followed {
            return;
        }
        self.followed = index;

        if let Some(index) = index {
            if index < self.offset {
                self.offset = index;
            } else if index >= self.offset + visible_height {
                self.offset = index + 1 - visible_height;
            }
        }
    }

    /// Keep the offset within the list.
    pub(crate) fn clamp(&mut self, total: usize, visible_height: usize) {
        if total > visible_height {
            self.offset = self.offset.min(total - visible_height);
        } else {
            self.offset = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_only_on_change() {
        let mut scroll = ScrollState::default();
        scroll.follow(Some(12), 5);
        assert_eq!(scroll.offset, 8);

        // manual scroll survives a redraw of the same item
        scroll.scroll_up();
        scroll.follow(Some(12), 5);
        assert_eq!(scroll.offset, 7);

        scroll.follow(Some(2), 5);
        assert_eq!(scroll.offset, 2);
    }

    #[test]
    fn test_clamp() {
        let mut scroll = ScrollState { offset: 50, followed: None };
        scroll.clamp(10, 4);
        assert_eq!(scroll.offset, 6);
        scroll.clamp(3, 4);
        assert_eq!(scroll.offset, 0);
    }

    #[test]
    fn test_operand_styles() {
        assert_eq!(
            operand_style(&Operand::name("#TEMP3")).fg,
            Some(DEFAULT_THEME.temporary)
        );
        assert_eq!(operand_style(&Operand::name("x")).fg, Some(DEFAULT_THEME.fg));
    }
}
