use crate::{
    form::{DigestForm, Field},
    panel::{PanelLine, ResultPanel},
    styles,
};
use anyhow::Result;
use ratatui::{
    Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

const LABEL_WIDTH: usize = 16;

pub struct ViewSnap<'a> {
    pub form: &'a DigestForm,
    pub panel: &'a ResultPanel,
    pub scroll: usize,
    pub busy: bool,
    pub spinner: &'static str,
}

/// Draw one frame and return the scroll offset actually used, clamped to the
/// wrapped result length.
pub fn draw<B: Backend>(term: &mut Terminal<B>, snap: &ViewSnap<'_>) -> Result<usize> {
    let mut shown_scroll = 0;
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(6),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![Span::styled(
            " Roundup: list digest ",
            styles::header(),
        )]))
        .wrap(Wrap { trim: true });
        frame.render_widget(header, layout[0]);

        // Form
        let form_lines: Vec<Line> = Field::ORDER
            .iter()
            .map(|field| form_line(snap.form, *field, snap.busy))
            .collect();
        let form =
            Paragraph::new(form_lines).block(Block::default().borders(Borders::ALL).title(" Inputs "));
        frame.render_widget(form, layout[1]);

        if let Some(input) = snap.form.input(snap.form.focus()) {
            let row = Field::ORDER
                .iter()
                .position(|f| *f == snap.form.focus())
                .unwrap_or(0) as u16;
            let caret_x = layout[1].x
                + 1
                + (LABEL_WIDTH as u16 + 2)
                + visual_caret_col(input.value(), input.cursor());
            frame.set_cursor_position(Position {
                x: caret_x,
                y: layout[1].y + 1 + row,
            });
        }

        // Result panel
        let visible_h = layout[2].height.saturating_sub(2) as usize;
        let content_width = layout[2].width.saturating_sub(2) as usize;
        let wrapped = wrap_panel(&snap.panel.lines(), content_width);
        let max_scroll = wrapped.len().saturating_sub(visible_h);
        let start = snap.scroll.min(max_scroll);
        shown_scroll = start;
        let end = (start + visible_h).min(wrapped.len());

        let items: Vec<ListItem> = wrapped[start..end]
            .iter()
            .map(|(text, style)| ListItem::new(Line::from(Span::styled(text.clone(), *style))))
            .collect();
        let body = List::new(items).block(Block::default().borders(Borders::ALL).title(" Result "));
        frame.render_widget(body, layout[2]);

        // Status bar
        let status_line = Line::from(vec![
            Span::raw(" "),
            Span::styled(snap.spinner, Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            if snap.busy {
                Span::styled("Generating…", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("Idle", Style::default().fg(Color::Green))
            },
            Span::styled(
                " • Tab next • Enter generate • ↑/↓ scroll • Ctrl-C quit",
                styles::dim(),
            ),
        ]);
        let status = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        frame.render_widget(status, layout[3]);
    })?;

    Ok(shown_scroll)
}

fn form_line(form: &DigestForm, field: Field, busy: bool) -> Line<'static> {
    let focused = form.focus() == field;
    match form.input(field) {
        Some(input) => {
            let label_style = if focused {
                styles::focused()
            } else {
                styles::label()
            };
            Line::from(vec![
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
                Span::raw(": "),
                Span::styled(input.value().to_string(), styles::value()),
            ])
        }
        None => {
            let style = match (busy, focused) {
                (true, _) => styles::dim(),
                (false, true) => styles::focused(),
                (false, false) => styles::label(),
            };
            Line::from(Span::styled(format!("[ {} ]", field.label()), style))
        }
    }
}

fn visual_caret_col(input: &str, cursor: usize) -> u16 {
    use unicode_width::UnicodeWidthStr;
    UnicodeWidthStr::width(&input[..cursor]) as u16
}

fn wrap_panel(lines: &[PanelLine], width: usize) -> Vec<(String, Style)> {
    let effective_width = width.max(1);
    let mut out = Vec::new();

    for entry in lines {
        let style = entry.style;
        if entry.text.is_empty() {
            out.push((String::new(), style));
            continue;
        }

        let segments = wrap(&entry.text, effective_width);
        if segments.is_empty() {
            out.push((String::new(), style));
        } else {
            out.extend(segments.into_iter().map(|seg| (seg.into_owned(), style)));
        }
    }

    out
}
