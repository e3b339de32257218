use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use treescope_core::parsers::TraceFile;
use treescope_core::presenters::ViewerPresenter;
use treescope_core::source::TraceSource;
use treescope_protocol::{DiffType, HierarchyNode, PropertyNode, ViewerData};

fn diff_color(diff: DiffType) -> Color {
    match diff {
        DiffType::None => Color::White,
        DiffType::Modified => Color::Yellow,
        DiffType::Added => Color::Green,
        DiffType::Deleted => Color::Red,
        DiffType::AddedMove => Color::Cyan,
        DiffType::DeletedMove => Color::Magenta,
    }
}

/// One visible row of the tree pane.
struct TreeRow {
    id: String,
    line: Vec<Span<'static>>,
}

fn tree_rows(data: &ViewerData) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    if let Some(tree) = &data.hierarchy_tree {
        collect_rows(tree, 0, data, &mut rows);
    }
    rows
}

fn collect_rows(node: &HierarchyNode, depth: usize, data: &ViewerData, out: &mut Vec<TreeRow>) {
    let mut spans = vec![Span::raw("  ".repeat(depth))];
    let pinned = data.pinned_items.iter().any(|p| p.id == node.id);
    if pinned {
        spans.push(Span::styled("📌", Style::default()));
    }
    let mut name_style = Style::default().fg(diff_color(node.diff));
    if data.highlighted_id.as_deref() == Some(&node.id) {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }
    spans.push(Span::styled(node.shown_name().to_string(), name_style));
    for chip in &node.chips {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", chip.short),
            Style::default().fg(Color::DarkGray),
        ));
    }
    out.push(TreeRow {
        id: node.id.clone(),
        line: spans,
    });
    for child in &node.children {
        collect_rows(child, depth + 1, data, out);
    }
}

fn property_lines(node: &PropertyNode, depth: usize, out: &mut Vec<Line<'static>>) {
    for child in &node.children {
        let mut spans = vec![Span::raw("  ".repeat(depth))];
        spans.push(Span::styled(
            child.name.clone(),
            Style::default().fg(diff_color(child.diff)),
        ));
        let value = child.formatted_value();
        if !value.is_empty() {
            spans.push(Span::raw(": "));
            spans.push(Span::styled(value, Style::default().fg(Color::Gray)));
        }
        if let Some(old) = &child.old_value {
            spans.push(Span::styled(
                format!("  (was {old})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        out.push(Line::from(spans));
        property_lines(child, depth + 1, out);
    }
}

pub fn run(trace: &TraceFile, mut viewer: ViewerPresenter) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut entry_index = 0usize;
    let mut cursor = 0usize;
    let mut data = viewer.on_position_update(&trace.source, entry_index)?;

    loop {
        let rows = tree_rows(&data);
        if cursor >= rows.len() {
            cursor = rows.len().saturating_sub(1);
        }

        terminal.draw(|frame| {
            let area = frame.area();
            let header_area = Rect::new(0, 0, area.width, 1);
            let body_area = Rect::new(0, 1, area.width, area.height.saturating_sub(1));

            let timestamp = trace
                .source
                .entry(entry_index)
                .map(|s| s.timestamp)
                .unwrap_or_default();
            let header = Paragraph::new(format!(
                " treescope — {} | entry {}/{} @ {}ns | ←→ entry | ↑↓ select | d diff f flat s simplify v visible p pin | q quit ",
                trace.name,
                entry_index + 1,
                trace.source.len(),
                timestamp,
            ))
            .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(body_area);

            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let mut line = Line::from(row.line.clone());
                    if i == cursor {
                        line = line.style(Style::default().bg(Color::Rgb(40, 40, 40)));
                    }
                    ListItem::new(line)
                })
                .collect();
            let tree_pane = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" hierarchy "));
            frame.render_widget(tree_pane, panes[0]);

            let mut lines = Vec::new();
            if let Some(properties) = &data.properties_tree {
                property_lines(properties, 0, &mut lines);
            }
            let title = data
                .highlighted_id
                .clone()
                .map(|id| format!(" properties — {id} "))
                .unwrap_or_else(|| " properties ".to_string());
            let props_pane = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(props_pane, panes[1]);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => {
                        if entry_index > 0 {
                            entry_index -= 1;
                            data = viewer.on_position_update(&trace.source, entry_index)?;
                        }
                    }
                    KeyCode::Right => {
                        if entry_index + 1 < trace.source.len() {
                            entry_index += 1;
                            data = viewer.on_position_update(&trace.source, entry_index)?;
                        }
                    }
                    KeyCode::Up => {
                        cursor = cursor.saturating_sub(1);
                        data = viewer
                            .on_highlighted_id_change(rows.get(cursor).map(|r| r.id.clone()));
                    }
                    KeyCode::Down => {
                        if cursor + 1 < rows.len() {
                            cursor += 1;
                        }
                        data = viewer
                            .on_highlighted_id_change(rows.get(cursor).map(|r| r.id.clone()));
                    }
                    KeyCode::Char('d') => {
                        let mut options = data.hierarchy_options;
                        options.show_diff.enabled = !options.show_diff.enabled;
                        data = viewer.on_hierarchy_options_change(options);
                    }
                    KeyCode::Char('f') => {
                        let mut options = data.hierarchy_options;
                        options.flat.enabled = !options.flat.enabled;
                        data = viewer.on_hierarchy_options_change(options);
                    }
                    KeyCode::Char('s') => {
                        let mut options = data.hierarchy_options;
                        options.simplify_names.enabled = !options.simplify_names.enabled;
                        data = viewer.on_hierarchy_options_change(options);
                    }
                    KeyCode::Char('v') => {
                        let mut options = data.hierarchy_options;
                        options.show_only_visible.enabled = !options.show_only_visible.enabled;
                        data = viewer.on_hierarchy_options_change(options);
                    }
                    KeyCode::Char('p') => {
                        if let Some(row) = rows.get(cursor) {
                            let id = row.id.clone();
                            data = viewer.on_pinned_item_toggle(&id);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
