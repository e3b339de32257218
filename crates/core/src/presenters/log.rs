use std::cmp::Ordering;

use treescope_protocol::{LogEntry, LogFilter, LogHeader, LogViewData};

use crate::filter::CompiledFilter;

/// Owns the unfiltered entry list of a log-style trace, the per-column
/// filters, the derived filtered list, and the three index cursors.
///
/// `current` follows the externally supplied trace position, `selected`
/// follows explicit user picks, and `scroll_target` tells the view where to
/// scroll on this update only.
pub struct LogPresenter {
    entries: Vec<LogEntry>,
    headers: Vec<LogHeader>,
    /// Whether entries are ordered by time, enabling the binary-search
    /// current-index rule.
    time_ordered: bool,
    filtered: Vec<LogEntry>,
    current: Option<usize>,
    selected: Option<usize>,
    scroll_target: Option<usize>,
    /// Original index last supplied by trace-position navigation.
    last_position: Option<usize>,
}

impl LogPresenter {
    pub fn new(time_ordered: bool) -> Self {
        Self {
            entries: Vec::new(),
            headers: Vec::new(),
            time_ordered,
            filtered: Vec::new(),
            current: None,
            selected: None,
            scroll_target: None,
            last_position: None,
        }
    }

    /// Replaces the entry list and headers wholesale. `selected` is not
    /// preserved across this reset; `current` is re-derived from the last
    /// supplied trace position.
    pub fn set_entries(&mut self, entries: Vec<LogEntry>, headers: Vec<LogHeader>) {
        self.entries = entries;
        self.headers = headers;
        self.refilter();
        self.selected = None;
        self.current = self.resolve_current();
        self.scroll_target = self.current;
    }

    /// Trace-position navigation: re-derives `current`, drops the selection,
    /// and scrolls to the current entry.
    pub fn on_position_update(&mut self, original_index: usize) {
        self.last_position = Some(original_index);
        self.current = self.resolve_current();
        self.selected = None;
        self.scroll_target = self.current;
    }

    /// Changes one column's filter value and reconciles the cursors.
    pub fn on_filter_change(&mut self, column_key: &str, filter: Option<LogFilter>) {
        let Some(header) = self.headers.iter_mut().find(|h| h.spec.key == column_key) else {
            log::warn!("filter change for unknown column {column_key:?}");
            return;
        };
        header.filter = filter;
        self.refilter();
        self.current = self.resolve_current();
        if self.filtered.is_empty() {
            self.selected = None;
            self.scroll_target = None;
            return;
        }
        if let Some(selected) = self.selected
            && selected >= self.filtered.len()
        {
            self.selected = self.current;
        }
        self.scroll_target = self.selected.or(self.current);
    }

    /// A click on a filtered-list row. Clicking the already-selected row
    /// only suppresses scrolling; it does not deselect.
    pub fn on_entry_click(&mut self, index: usize) {
        if index >= self.filtered.len() {
            return;
        }
        if self.selected != Some(index) {
            self.selected = Some(index);
        }
        self.scroll_target = None;
    }

    pub fn on_arrow_up(&mut self) {
        self.move_selection(-1);
    }

    pub fn on_arrow_down(&mut self) {
        self.move_selection(1);
    }

    pub fn filtered_entries(&self) -> &[LogEntry] {
        &self.filtered
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_target(&self) -> Option<usize> {
        self.scroll_target
    }

    /// The entry the detail pane should show: the selection when there is
    /// one, the current entry otherwise.
    pub fn focused_entry(&self) -> Option<&LogEntry> {
        self.selected
            .or(self.current)
            .and_then(|i| self.filtered.get(i))
    }

    /// Snapshot for the rendering layer; a fresh value per update.
    pub fn view_data(&self) -> LogViewData {
        LogViewData {
            entries: self.filtered.clone(),
            headers: self.headers.clone(),
            current_index: self.current,
            selected_index: self.selected,
            scroll_to_index: self.scroll_target,
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            return;
        }
        let seed = self.selected.or(self.current).unwrap_or(0);
        let last = self.filtered.len() - 1;
        let next = seed.saturating_add_signed(delta).min(last);
        self.selected = Some(next);
        self.scroll_target = self.selected;
    }

    fn refilter(&mut self) {
        self.filtered = self
            .entries
            .iter()
            .filter(|entry| self.headers.iter().all(|h| header_accepts(h, entry)))
            .cloned()
            .collect();
        if self.filtered.is_empty() {
            self.current = None;
            self.selected = None;
            self.scroll_target = None;
        }
    }

    /// Locates the externally supplied original index within the filtered
    /// list. Time-ordered sources take the first entry at or after the
    /// target; both modes fall back to the last filtered entry when nothing
    /// qualifies.
    fn resolve_current(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            return None;
        }
        let target = self.last_position?;
        let last = self.filtered.len() - 1;
        if self.time_ordered {
            let position = self
                .filtered
                .partition_point(|entry| entry.original_index < target);
            Some(position.min(last))
        } else {
            Some(
                self.filtered
                    .iter()
                    .position(|entry| entry.original_index == target)
                    .unwrap_or(last),
            )
        }
    }
}

fn header_accepts(header: &LogHeader, entry: &LogEntry) -> bool {
    let Some(filter) = &header.filter else {
        return true;
    };
    let text = entry.field_text(&header.spec.key);
    match filter {
        LogFilter::Select { selected, .. } => {
            selected.is_empty() || selected.iter().any(|s| s == &text)
        }
        LogFilter::Text(text_filter) => CompiledFilter::new(text_filter).matches(&text),
    }
}

/// Builds a select-style header from the distinct values a column takes
/// across the entries. Values that all parse as numbers sort numerically,
/// otherwise lexicographically.
pub fn select_header(key: &str, label: &str, entries: &[LogEntry]) -> LogHeader {
    let mut options: Vec<String> = Vec::new();
    for entry in entries {
        let text = entry.field_text(key);
        if !text.is_empty() && !options.contains(&text) {
            options.push(text);
        }
    }
    options.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    });
    LogHeader::new(treescope_protocol::ColumnSpec::new(key, label)).with_filter(LogFilter::Select {
        options,
        selected: Vec::new(),
    })
}
