//! One-line keybinding summary docked at the bottom of the screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

const HELP_TEXT: &str = " h/j/k/l move  n new  e edit  f flip  d delete  1-9 prio  o order  m move  c/s/p relate  t focus  a settings  q quit";

pub struct HelpBar;

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}
