use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
    Frame,
};
use report_core::{AppViewModel, Notice, PagerView, StatusView};

use super::constants::*;
use crate::platform::controller::InputFocus;

/// Draws the whole screen for one view model.
pub fn draw(frame: &mut Frame, view: &AppViewModel, focus: InputFocus) {
    let colors = palette(view.theme);
    let base = Style::default().fg(colors.text).bg(colors.background);
    frame.render_widget(Block::default().style(base), frame.area());

    let [title_area, inputs_area, status_area, table_area, bottom_area, hints_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());
    let [search_area, url_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(inputs_area);
    let [pager_area, toggles_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(bottom_area);

    frame.render_widget(
        Paragraph::new(Line::from(view.title.as_str()).bold().fg(colors.accent)).centered(),
        title_area,
    );

    render_input(
        frame,
        search_area,
        SEARCH_LABEL,
        &view.search_text,
        focus == InputFocus::Search,
        colors,
    );
    render_input(
        frame,
        url_area,
        URL_LABEL,
        &view.url_input,
        focus == InputFocus::Url,
        colors,
    );

    frame.render_widget(Paragraph::new(status_line(view, colors)), status_area);
    render_table(frame, table_area, view, colors);
    frame.render_widget(pager(view.pager, colors), pager_area);
    frame.render_widget(column_toggles(view, colors), toggles_area);
    frame.render_widget(Paragraph::new(hints_line(focus, colors)), hints_area);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    text: &str,
    focused: bool,
    colors: Palette,
) {
    let border = if focused { colors.accent } else { colors.muted };
    let block = Block::bordered()
        .title(label)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused {
        let offset = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn status_line(view: &AppViewModel, colors: Palette) -> Line<'static> {
    if let Some(notice) = &view.notice {
        return match notice {
            Notice::ExportWritten(path) => {
                Line::from(format!("PDF сохранён: {path}")).fg(colors.success)
            }
            Notice::ExportFailed(reason) => {
                Line::from(format!("Не удалось сформировать PDF: {reason}")).fg(colors.error)
            }
        };
    }
    if view.exporting {
        return Line::from(EXPORTING_TEXT).fg(colors.muted);
    }
    match &view.status {
        StatusView::Loading => Line::from(LOADING_TEXT).fg(colors.muted),
        StatusView::Error(banner) => Line::from(vec![
            Span::styled(
                banner.message.clone(),
                Style::default().fg(colors.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", banner.detail), Style::default().fg(colors.error)),
        ]),
        StatusView::Ready => {
            Line::from(format!("Найдено записей: {}", view.total_count)).fg(colors.muted)
        }
    }
}

fn render_table(frame: &mut Frame, area: Rect, view: &AppViewModel, colors: Palette) {
    let block = Block::bordered().border_style(Style::default().fg(colors.muted));

    if !view.show_table {
        let text = match view.status {
            StatusView::Loading => LOADING_TEXT,
            _ => "",
        };
        frame.render_widget(
            Paragraph::new(text).centered().fg(colors.muted).block(block),
            area,
        );
        return;
    }
    if view.rows.is_empty() {
        frame.render_widget(
            Paragraph::new(EMPTY_TEXT).centered().fg(colors.muted).block(block),
            area,
        );
        return;
    }

    let header = Row::new(
        view.headers
            .iter()
            .map(|h| Cell::from(format!("{} {}", h.label, h.indicator()))),
    )
    .style(
        Style::default()
            .fg(colors.header_fg)
            .bg(colors.header_bg)
            .add_modifier(Modifier::BOLD),
    );

    let rows = view.rows.iter().enumerate().map(|(index, record)| {
        let row = Row::new(
            view.headers
                .iter()
                .map(|h| Cell::from(record.field(h.column).to_string())),
        );
        if index % 2 == 1 {
            row.style(Style::default().bg(colors.stripe_bg))
        } else {
            row
        }
    });

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(25),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn pager(pager: PagerView, colors: Palette) -> Paragraph<'static> {
    let arrow = |symbol: &'static str, enabled: bool| {
        if enabled {
            Span::styled(symbol, Style::default().fg(colors.accent).bold())
        } else {
            Span::styled(symbol, Style::default().fg(colors.muted).dim())
        }
    };
    let line = Line::from(vec![
        arrow("←", pager.can_prev),
        Span::raw(format!(" Страница {} из {} ", pager.current, pager.total)),
        arrow("→", pager.can_next),
    ]);
    Paragraph::new(line)
        .centered()
        .block(Block::bordered().border_style(Style::default().fg(colors.muted)))
}

fn column_toggles(view: &AppViewModel, colors: Palette) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (index, toggle) in view.column_toggles.iter().enumerate() {
        let mark = if toggle.selected { "[x]" } else { "[ ]" };
        let style = if toggle.selected {
            Style::default().fg(colors.text)
        } else {
            Style::default().fg(colors.muted)
        };
        spans.push(Span::styled(
            format!("F{} {} {}  ", index + 1, mark, toggle.label),
            style,
        ));
    }
    Paragraph::new(Line::from(spans)).block(
        Block::bordered()
            .title(EXPORT_LABEL)
            .border_style(Style::default().fg(colors.muted)),
    )
}

fn hints_line(focus: InputFocus, colors: Palette) -> Line<'static> {
    let hints = match focus {
        InputFocus::Table => TABLE_HINTS,
        InputFocus::Search => SEARCH_HINTS,
        InputFocus::Url => URL_HINTS,
    };
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(colors.accent).bold()));
        spans.push(Span::styled(format!(" {action}  "), Style::default().fg(colors.muted)));
    }
    Line::from(spans)
}
