use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the character selector column
pub const CHARACTER_PANE_WIDTH: u16 = 26;

/// Search box on top, character selector beside the results, status bar at the bottom
pub struct AppLayout {
    pub search_area: Rect,
    pub characters_area: Rect,
    pub results_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box with border
                Constraint::Min(3),
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CHARACTER_PANE_WIDTH), Constraint::Min(10)])
            .split(vertical_chunks[1]);

        Self {
            search_area: vertical_chunks[0],
            characters_area: horizontal_chunks[0],
            results_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
