use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub accounts: Rect,
    pub blocks: Rect,
    pub report: Rect,
    pub search: Rect,
    pub status_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(26),
            Constraint::Percentage(38),
            Constraint::Percentage(36),
        ])
        .split(vertical[1]);

    UiAreas {
        size,
        header: vertical[0],
        accounts: main_chunks[0],
        blocks: main_chunks[1],
        report: main_chunks[2],
        search: vertical[2],
        status_line: vertical[3],
    }
}
