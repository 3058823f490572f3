use std::collections::BTreeSet;

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::timestamps::format_age;
use crate::indexer::{LoadedInventory, NoInventory};
use crate::models::{ALL_SCOPE, RowKind, SearchResults};
use crate::utils::sanitize_label;

const COUNT_COLUMN_WIDTH: u16 = 10;
const INDENT: &str = "  ";

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const STATUS_BG: Color = Color::Rgb(24, 24, 27);
const ITEM_FG: Color = Color::Rgb(255, 175, 255);
const HOLDER_FG: Color = Color::Rgb(100, 200, 255);
const LOCATION_BG_ODD: Color = Color::Rgb(50, 50, 50);
const LOCATION_BG_EVEN: Color = Color::Rgb(70, 70, 70);
const MATCHED_FG: Color = Color::Rgb(120, 240, 120);
const UNMATCHED_FG: Color = Color::Rgb(240, 120, 120);
const SELECTED_BG: Color = Color::Rgb(16, 185, 129);
const ERROR_FG: Color = Color::Rgb(239, 68, 68);

/// Everything the UI needs for one frame
pub struct RenderState<'a> {
    pub search_query: &'a str,
    pub characters: &'a [String],
    pub selected_character: usize,
    pub results: &'a SearchResults,
    pub scroll: usize,
    pub inventory: Option<&'a LoadedInventory>,
    pub no_inventory: Option<NoInventory>,
    pub status_message: Option<&'a StatusMessage>,
}

pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state.search_query);
    render_characters(
        frame,
        layout.characters_area,
        state.characters,
        state.selected_character,
        (!state.search_query.is_empty()).then_some(&state.results.matched_labels),
    );
    match state.no_inventory {
        Some(reason) => render_no_inventory(frame, layout.results_area, reason),
        None => render_results(frame, layout.results_area, state.results, state.scroll),
    }
    render_status_bar(frame, layout.status_area, state);
}

fn bordered(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

fn render_search_box(frame: &mut Frame, area: Rect, query: &str) {
    let text = format!("{}_", sanitize_label(query));
    let paragraph =
        Paragraph::new(text).style(Style::default().fg(BRIGHT)).block(bordered(" Search "));
    frame.render_widget(paragraph, area);
}

/// Character selector; `matched` is `None` when no search is active
fn render_characters(
    frame: &mut Frame,
    area: Rect,
    characters: &[String],
    selected: usize,
    matched: Option<&BTreeSet<String>>,
) {
    let items: Vec<ListItem> = characters
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let fg = match matched {
                None => BRIGHT,
                Some(_) if label == ALL_SCOPE => MATCHED_FG,
                Some(matched) if matched.contains(label) => MATCHED_FG,
                Some(_) => UNMATCHED_FG,
            };
            let mut style = Style::default().fg(fg);
            if idx == selected {
                style = style.bg(SELECTED_BG).add_modifier(Modifier::BOLD);
            }
            ListItem::new(sanitize_label(label).into_owned()).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(bordered(" Characters ")), area);
}

fn render_results(frame: &mut Frame, area: Rect, results: &SearchResults, scroll: usize) {
    let mut odd_location = true;
    let rows: Vec<Row> = results
        .flatten()
        .into_iter()
        .skip(scroll)
        .map(|row| {
            let style = match row.kind {
                RowKind::Item => {
                    odd_location = true;
                    Style::default().fg(ITEM_FG).add_modifier(Modifier::BOLD)
                }
                RowKind::Holder => {
                    odd_location = true;
                    Style::default().fg(HOLDER_FG)
                }
                RowKind::Location => {
                    let bg = if odd_location { LOCATION_BG_ODD } else { LOCATION_BG_EVEN };
                    odd_location = !odd_location;
                    Style::default().fg(BRIGHT).bg(bg)
                }
                RowKind::NoResults => Style::default().fg(MUTED),
            };

            let label = format!("{}{}", INDENT.repeat(row.depth), sanitize_label(row.label));
            let count = row.count.map(|c| c.to_string()).unwrap_or_default();
            Row::new(vec![
                Cell::from(label),
                Cell::from(Line::from(count).alignment(Alignment::Right)),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Item"),
        Cell::from(Line::from("Count").alignment(Alignment::Right)),
    ])
    .style(Style::default().fg(MUTED).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, [Constraint::Fill(1), Constraint::Length(COUNT_COLUMN_WIDTH)])
        .header(header)
        .block(bordered(" Results "));

    frame.render_widget(table, area);
}

fn render_no_inventory(frame: &mut Frame, area: Rect, reason: NoInventory) {
    let text = vec![
        Line::from(format!("{}.", reason.message())),
        Line::from(""),
        Line::from("Add a directory with: eq-inventory-search config add-dir <PATH>"),
        Line::from("New inventory files are picked up automatically."),
    ];
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(BRIGHT))
        .block(bordered(" Results "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let style = Style::default().fg(BRIGHT).bg(STATUS_BG);

    if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => MATCHED_FG,
            MessageType::Error => ERROR_FG,
        };
        let paragraph = Paragraph::new(format!(" {} ", message.text)).style(style.fg(fg));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut parts = vec![];

    let scope = state.characters.get(state.selected_character).map_or(ALL_SCOPE, String::as_str);
    parts.push(format!("[{}]", sanitize_label(scope)));

    if !state.search_query.is_empty() {
        parts.push(format!("{} items", state.results.item_count()));
    }

    if let Some(inventory) = state.inventory {
        parts.push(format!("loaded {}", format_age(&inventory.loaded_at, &Utc::now())));
        if !inventory.warnings.is_empty() {
            parts.push(format!("{} warnings", inventory.warnings.len()));
        }
    }

    parts.push("Esc: clear".to_string());
    parts.push("F2: all".to_string());
    parts.push("F3: ids".to_string());
    parts.push("Ctrl+R: reload".to_string());
    parts.push("Ctrl+C: quit".to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | "))).style(style);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::models::{InventoryIndex, ItemEntry, Scope};
    use crate::search::search;

    fn sample_index() -> InventoryIndex {
        let mut cap = ItemEntry::new("1001", "Cloth Cap");
        cap.add("Alice", "General1", 2);
        cap.add("Bob", "Bank3-Slot2", 5);
        InventoryIndex { items: vec![cap] }
    }

    fn characters() -> Vec<String> {
        vec!["All".into(), "Alice".into(), "Bob".into(), "Zed".into()]
    }

    fn buffer_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn draw(state: &RenderState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render_ui(f, state)).unwrap();
        terminal
    }

    #[test]
    fn test_render_results_tree() {
        let results = search("cap", &sample_index(), &Scope::All, false);
        let characters = characters();
        let state = RenderState {
            search_query: "cap",
            characters: &characters,
            selected_character: 0,
            results: &results,
            scroll: 0,
            inventory: None,
            no_inventory: None,
            status_message: None,
        };

        let lines = buffer_lines(&draw(&state));
        let screen = lines.join("\n");

        assert!(screen.contains("cap_"));
        assert!(screen.contains("Cloth Cap"));
        assert!(screen.contains("  Alice"));
        assert!(screen.contains("    General     1"));
        assert!(lines.iter().any(|l| l.contains("Cloth Cap") && l.trim_end().ends_with("7│")));
        assert!(screen.contains("[All]"));
        assert!(screen.contains("1 items"));
    }

    #[test]
    fn test_matched_characters_are_colored() {
        let results = search("cap", &sample_index(), &Scope::All, false);
        let characters = characters();
        let state = RenderState {
            search_query: "cap",
            characters: &characters,
            selected_character: 1,
            results: &results,
            scroll: 0,
            inventory: None,
            no_inventory: None,
            status_message: None,
        };

        let terminal = draw(&state);
        let buffer = terminal.backend().buffer();
        // Character pane starts below the search box, inside the border
        let bob = &buffer[(1, 6)];
        let zed = &buffer[(1, 7)];
        assert_eq!(bob.symbol(), "B");
        assert_eq!(bob.fg, MATCHED_FG);
        assert_eq!(zed.symbol(), "Z");
        assert_eq!(zed.fg, UNMATCHED_FG);
        assert_eq!(buffer[(1, 5)].bg, SELECTED_BG);
        assert_ne!(buffer[(1, 4)].bg, SELECTED_BG);
    }

    #[test]
    fn test_no_inventory_message() {
        let results = SearchResults::default();
        let characters = vec!["All".to_string()];
        let state = RenderState {
            search_query: "",
            characters: &characters,
            selected_character: 0,
            results: &results,
            scroll: 0,
            inventory: None,
            no_inventory: Some(NoInventory::NoDirectories),
            status_message: None,
        };

        let screen = buffer_lines(&draw(&state)).join("\n");
        assert!(screen.contains("No inventory directories are configured"));
        assert!(screen.contains("config add-dir"));
    }

    #[test]
    fn test_scroll_skips_rows() {
        let results = search("cap", &sample_index(), &Scope::All, false);
        let characters = characters();
        let state = RenderState {
            search_query: "cap",
            characters: &characters,
            selected_character: 0,
            results: &results,
            scroll: 3,
            inventory: None,
            no_inventory: None,
            status_message: None,
        };

        let screen = buffer_lines(&draw(&state)).join("\n");
        assert!(!screen.contains("Cloth Cap"));
        assert!(screen.contains("  Bob"));
    }

    #[test]
    fn test_status_message_replaces_hints() {
        let results = SearchResults::default();
        let characters = characters();
        let message = StatusMessage {
            text: "Reloaded inventory".to_string(),
            message_type: MessageType::Success,
            expires_at: Instant::now() + Duration::from_secs(3),
        };
        let state = RenderState {
            search_query: "",
            characters: &characters,
            selected_character: 0,
            results: &results,
            scroll: 0,
            inventory: None,
            no_inventory: None,
            status_message: Some(&message),
        };

        let lines = buffer_lines(&draw(&state));
        assert!(lines[19].contains("Reloaded inventory"));
        assert!(!lines[19].contains("Ctrl+C"));
    }

    #[test]
    fn test_render_small_terminal() {
        let results = search("cap", &sample_index(), &Scope::All, true);
        let characters = characters();
        let state = RenderState {
            search_query: "cap",
            characters: &characters,
            selected_character: 0,
            results: &results,
            scroll: 0,
            inventory: None,
            no_inventory: None,
            status_message: None,
        };

        let mut terminal = Terminal::new(TestBackend::new(30, 7)).unwrap();
        terminal.draw(|f| render_ui(f, &state)).unwrap();
    }
}
