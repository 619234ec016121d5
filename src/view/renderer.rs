use crate::controller::Mode;
use crate::model::Pool;
use super::ViewModel;
use crossterm::{
    cursor, execute,
    style::{Attribute, SetAttribute},
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};
use unicode_width::UnicodeWidthChar;

/// Rows above the pool lists: header, selection line, one per field, blank
const FORM_TOP: usize = 2;
const POOLS_TOP: usize = FORM_TOP + crate::model::Field::ALL.len() + 1;

#[derive(Clone)]
pub struct RenderParams<'a> {
    pub mode: &'a Mode,
    pub command_buffer: &'a str,
    pub status_message: &'a str,
    pub output_path: &'a str,
    pub focused_field: Option<usize>,
    pub field_input: &'a str,
    pub help: Option<&'a [String]>,
}

/// A composed screen: every row as it will be printed, plus where the
/// terminal cursor should sit
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub cursor: (usize, usize),
}

pub struct View {
    last_lines: Vec<String>,
    last_terminal_size: (u16, u16),
    last_mode: Mode,
    pool_scroll: [usize; 2],
    needs_full_redraw: bool,
    render_count: usize,
    show_preview: bool,
}

impl View {
    pub fn new() -> Self {
        Self {
            last_lines: Vec::new(),
            last_terminal_size: (0, 0),
            last_mode: Mode::Browse,
            pool_scroll: [0, 0],
            needs_full_redraw: true,
            render_count: 0,
            show_preview: true,
        }
    }

    fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    fn move_cursor(&self, line: usize, column: usize) -> io::Result<()> {
        execute!(stdout(), cursor::MoveTo(column as u16, line as u16))
    }

    pub fn render<'a>(&mut self, view_model: &dyn ViewModel, params: &RenderParams<'a>) -> io::Result<()> {
        let (width, height) = size()?;

        self.render_count += 1;

        // Force full redraw every 50 renders to prevent state drift
        if self.render_count % 50 == 0 {
            self.needs_full_redraw = true;
        }

        let current_size = (width, height);
        if self.last_terminal_size != current_size {
            self.needs_full_redraw = true;
            self.last_terminal_size = current_size;
        }

        if self.last_mode != *params.mode {
            self.needs_full_redraw = true;
            self.last_mode = *params.mode;
        }

        if self.needs_full_redraw {
            self.clear_screen()?;
            self.needs_full_redraw = false;
            self.last_lines.clear();
        }

        let frame = self.compose(view_model, params, width as usize, height as usize);

        // Only redraw changed lines
        for (i, line) in frame.lines.iter().enumerate() {
            if i >= self.last_lines.len() || self.last_lines[i] != *line {
                self.move_cursor(i, 0)?;
                execute!(stdout(), Clear(ClearType::CurrentLine))?;
                print!("{line}");
            }
        }
        self.last_lines = frame.lines;

        // Printing moves the terminal cursor, so always put it back
        self.move_cursor(frame.cursor.0, frame.cursor.1)?;

        stdout().flush()?;
        Ok(())
    }

    /// Lay out the whole screen without touching the terminal
    pub fn compose(
        &mut self,
        view_model: &dyn ViewModel,
        params: &RenderParams<'_>,
        width: usize,
        height: usize,
    ) -> Frame {
        let mut lines = vec![String::new(); height];
        if height == 0 || width == 0 {
            return Frame { lines, cursor: (0, 0) };
        }
        let status_row = height - 1;

        if let Some(help) = params.help {
            for (row, text) in help.iter().take(status_row).enumerate() {
                lines[row] = fit(text, width);
            }
            lines[status_row] = fit("-- HELP --", width);
            return Frame { lines, cursor: (status_row, 0) };
        }

        let mut cursor_pos = (status_row, 0);

        // Header
        let mut header = format!("combo_fx.toml Generator | output: {}", params.output_path);
        if let Some(pattern) = view_model.filter_pattern() {
            header.push_str(&format!(" | filter: /{pattern}"));
        }
        lines[0] = fit(&header, width);

        // Form
        let selected = view_model.selected();
        let selection_line = match &selected {
            Some(name) => format!("Editing: {name}"),
            None => "No entry selected (edits apply to Set for All)".to_string(),
        };
        set_line(&mut lines, 1, fit(&selection_line, width));

        let in_form = *params.mode == Mode::Form;
        for (i, row) in view_model.form_rows().iter().enumerate() {
            let focused = in_form && params.focused_field == Some(i);
            let marker = if focused { '>' } else { ' ' };
            let value = if focused { params.field_input } else { row.value.as_str() };
            let prefix = format!("{marker} {:<16} ", row.label);
            let text = format!("{prefix}{value}");
            if focused {
                cursor_pos = (FORM_TOP + i, (display_width(&text)).min(width.saturating_sub(1)));
            }
            set_line(&mut lines, FORM_TOP + i, fit(&text, width));
        }

        // Pools and preview
        let columns = self.column_widths(width);
        let list_rows = status_row.saturating_sub(POOLS_TOP + 1);
        let (focus, cursor_index) = view_model.cursor();
        let mut cells: Vec<Vec<String>> = Vec::new();

        for (col, pool) in [Pool::Enabled, Pool::Disabled].into_iter().enumerate() {
            let entries = view_model.pool_entries(pool);
            let col_width = columns[col];
            let is_focus = focus == pool && *params.mode == Mode::Browse;
            if focus == pool {
                self.adjust_scroll(col, cursor_index, list_rows);
            }
            let scroll = self.pool_scroll[col].min(entries.len().saturating_sub(1));

            let mut column = vec![fit(&format!("{} ({})", pool.title(), entries.len()), col_width)];
            for (row, name) in entries.iter().enumerate().skip(scroll).take(list_rows) {
                let at_cursor = focus == pool && row == cursor_index;
                let cursor_mark = if at_cursor { '>' } else { ' ' };
                let selected_mark = if selected.as_deref() == Some(name.as_str()) { '*' } else { ' ' };
                let cell = fit(&format!("{cursor_mark}{selected_mark}{name}"), col_width);
                if at_cursor && is_focus {
                    let column_start: usize = columns[..col].iter().sum();
                    cursor_pos = (POOLS_TOP + 1 + row - scroll, column_start);
                    column.push(format!(
                        "{}{}{}",
                        SetAttribute(Attribute::Reverse),
                        cell,
                        SetAttribute(Attribute::Reset)
                    ));
                } else {
                    column.push(cell);
                }
            }
            cells.push(column);
        }

        if columns.len() > 2 {
            let mut preview = vec![fit("Preview", columns[2])];
            preview.extend(
                view_model
                    .preview_lines()
                    .iter()
                    .take(list_rows)
                    .map(|l| fit(l, columns[2])),
            );
            cells.push(preview);
        }

        for row in 0..=list_rows {
            let line: String = cells
                .iter()
                .zip(columns.iter())
                .map(|(column, w)| column.get(row).cloned().unwrap_or_else(|| " ".repeat(*w)))
                .collect();
            set_line(&mut lines, POOLS_TOP + row, line);
        }

        // Status line
        let status = match params.mode {
            Mode::Browse | Mode::Form if !params.status_message.is_empty() => {
                params.status_message.to_string()
            }
            Mode::Browse => "-- POOLS --".to_string(),
            Mode::Form => "-- FORM --".to_string(),
            Mode::Command => format!(":{}", params.command_buffer),
            Mode::Filter => format!("/{}", params.command_buffer),
        };
        lines[status_row] = fit(&status, width);
        if matches!(params.mode, Mode::Command | Mode::Filter) {
            cursor_pos = (status_row, (params.command_buffer.len() + 1).min(width.saturating_sub(1)));
        }

        Frame { lines, cursor: cursor_pos }
    }

    /// Enabled, Disabled and (when it fits) a wider preview column
    fn column_widths(&self, width: usize) -> Vec<usize> {
        if self.show_preview && width >= 60 {
            let pool = width / 4;
            vec![pool, pool, width - 2 * pool]
        } else {
            let half = width / 2;
            vec![half, width - half]
        }
    }

    fn adjust_scroll(&mut self, col: usize, cursor_index: usize, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        let scroll = &mut self.pool_scroll[col];
        if cursor_index < *scroll {
            *scroll = cursor_index;
        } else if cursor_index >= *scroll + visible_rows {
            *scroll = cursor_index + 1 - visible_rows;
        }
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    pub fn set_show_preview(&mut self, show: bool) {
        if self.show_preview != show {
            self.show_preview = show;
            self.needs_full_redraw = true;
        }
    }
}

fn set_line(lines: &mut [String], row: usize, text: String) {
    if let Some(line) = lines.get_mut(row) {
        *line = text;
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(1)).sum()
}

/// Clip or pad `text` to exactly `width` display columns.
/// Wide characters that would straddle the edge are replaced by padding.
pub fn fit(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if used + w > width {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push_str(&" ".repeat(width - used));
    result
}
