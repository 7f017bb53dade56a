//! # Dashboard Component
//!
//! Three stacked sparklines showing per-day activity: items created,
//! items completed, and focus minutes. Purely presentational — the series
//! are props computed by the core refresh.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Sparkline};

use crate::core::state::Dashboard;
use crate::tui::component::Component;

pub struct DashboardPanel<'a> {
    data: &'a Dashboard,
}

impl<'a> DashboardPanel<'a> {
    pub fn new(data: &'a Dashboard) -> Self {
        Self { data }
    }

    fn sparkline(series: &'a [u64], legend: &'static str) -> Sparkline<'a> {
        Sparkline::default()
            .block(Block::new().title(legend))
            .data(series)
            .style(Style::default().fg(Color::Gray))
    }
}

impl Component for DashboardPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .areas::<3>(area);

        frame.render_widget(
            Self::sparkline(&self.data.created, "Created per day"),
            rows[0],
        );
        frame.render_widget(
            Self::sparkline(&self.data.completed, "Completed per day"),
            rows[1],
        );
        frame.render_widget(
            Self::sparkline(&self.data.focus_minutes, "Focus minutes per day"),
            rows[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_all_three_legends() {
        let data = Dashboard {
            created: vec![0, 1, 2, 3],
            completed: vec![1, 0, 0, 2],
            focus_minutes: vec![0, 25, 0, 50],
        };
        let backend = TestBackend::new(60, 9);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DashboardPanel::new(&data).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Created per day"));
        assert!(text.contains("Completed per day"));
        assert!(text.contains("Focus minutes per day"));
    }
}
