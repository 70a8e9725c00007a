use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;

use crate::app::{App, Focus, InputMode, SearchPhase, StatusLevel};
use crate::domain::block::SearchMode;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();
    let areas = layout::areas(size);

    draw_header(f, areas.header, app);
    draw_accounts(f, areas.accounts, app);
    draw_blocks(f, areas.blocks, app);
    draw_report(f, areas.report, app);
    draw_search(f, areas.search, app);
    draw_status_line(f, areas.status_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn panel_border(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let title = Line::from(vec![
        Span::styled(
            "Scry",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("RPC", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.endpoint)),
        Span::styled("Chain", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.chain)),
        Span::styled("Focus", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.focus.title())),
    ]);

    let left = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(left, chunks[0]);

    let connection = if app.connected {
        Span::styled("connected", Style::default().fg(Color::Green))
    } else {
        Span::styled("connecting…", Style::default().fg(Color::Yellow))
    };
    let right = Paragraph::new(Line::from(vec![
        connection,
        Span::raw("  "),
        Span::styled("? help  q quit", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn draw_accounts(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .accounts
        .iter()
        .map(|account| ListItem::new(short_hash(account, 24)))
        .collect();

    let mut state = ListState::default();
    if !app.accounts.is_empty() {
        state.select(Some(app.selected_account.min(app.accounts.len() - 1)));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(app, Focus::Accounts))
                .title("Accounts"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_blocks(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .blocks
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", row.seen_at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("#{:<10}", row.number),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(short_hash(&row.hash, 22), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if !app.blocks.is_empty() {
        state.select(Some(app.selected_block.min(app.blocks.len() - 1)));
    }

    let title = if app.chain.is_empty() {
        "Latest Blocks".to_string()
    } else {
        format!("Latest Blocks [{}]", app.chain)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(app, Focus::Blocks))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_report(f: &mut Frame, area: Rect, app: &App) {
    let body = app
        .search
        .report
        .as_deref()
        .unwrap_or("No block searched yet.\n\nPick a mode (m), type an identifier (/), press Enter.");

    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(app, Focus::Search))
                .title("Block Information"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let mode_style = |mode: SearchMode| {
        if app.search.mode == mode {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let param = if app.search.param_text.is_empty() && app.input_mode != InputMode::Editing {
        Span::styled(
            app.search.mode.placeholder(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let cursor = if app.input_mode == InputMode::Editing {
            "▏"
        } else {
            ""
        };
        Span::raw(format!("{}{}", app.search.param_text, cursor))
    };

    let phase = match app.search.phase {
        SearchPhase::Resolving => " resolving…",
        SearchPhase::Correlating => " correlating…",
        _ => "",
    };

    let line = Line::from(vec![
        Span::styled("Search ", Style::default().fg(Color::DarkGray)),
        Span::styled(SearchMode::BlockNumber.title(), mode_style(SearchMode::BlockNumber)),
        Span::raw(" | "),
        Span::styled(SearchMode::BlockHash.title(), mode_style(SearchMode::BlockHash)),
        Span::raw("  "),
        param,
        Span::styled(phase, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(app, Focus::Search))
            .title("Search Blocks by number (height) or hash"),
    );
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    // The session status (found line or error) wins over transient
    // app messages; both fall back to a key hint.
    let line = if let Some(status) = app.search.status.as_deref() {
        let style = if status.starts_with("ERROR:") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        Line::from(Span::styled(status.to_string(), style))
    } else if let Some((text, level)) = app.status_text() {
        let style = match level {
            StatusLevel::Info => Style::default().fg(Color::Gray),
            StatusLevel::Warn => Style::default().fg(Color::Yellow),
            StatusLevel::Error => Style::default().fg(Color::Red),
        };
        Line::from(Span::styled(text.to_string(), style))
    } else {
        Line::from(Span::styled(
            "m mode  / edit  Enter search  Tab focus  [ ] endpoint  y copy",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help_popup(f: &mut Frame, size: Rect) {
    let area = centered_rect(60, 60, size);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  m        toggle search mode (number / hash)"),
        Line::from("  /  i     edit the search parameter"),
        Line::from("  Enter    run the search"),
        Line::from("  Tab      cycle panel focus"),
        Line::from("  j / k    move selection in the focused panel"),
        Line::from("  [ / ]    cycle RPC endpoint"),
        Line::from("  y        copy account / block hash / report"),
        Line::from("  ?        toggle this help"),
        Line::from("  q        quit"),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(Style::default().fg(Color::LightCyan)),
    );
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, size: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn short_hash(value: &str, keep: usize) -> String {
    if value.len() <= keep {
        return value.to_string();
    }
    let head: String = value.chars().take(keep.saturating_sub(6)).collect();
    let tail: String = {
        let chars: Vec<char> = value.chars().collect();
        chars[chars.len() - 4..].iter().collect()
    };
    format!("{head}..{tail}")
}
