use crate::format::{city_state, format_tax_id, operator_fields, or_placeholder};
use crate::tui::app::App;
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use unicode_width::UnicodeWidthStr;

/// Below this width the modality column shows short tags
const NARROW_WIDTH: u16 = 120;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Notice line
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_title(frame, app, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_notice(frame, app, chunks[2]);
    draw_table(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);
    draw_footer(frame, app, chunks[5]);

    if app.controller.state().detail_visible {
        draw_detail_dialog(frame, app, area);
    } else if app.search.focused {
        // Border, leading space, icon (2 cols) and its trailing space
        let cursor_x = chunks[1].x + 1 + 4 + app.search.cursor_column() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = Color::Rgb(40, 40, 50);
    let title = Span::styled(
        " ANS Operator Lookup ",
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(0, 95, 135))
            .add_modifier(Modifier::BOLD),
    );
    let url = Span::styled(
        format!(" {}", app.api_base_url),
        Style::default().fg(Color::Gray).bg(bg),
    );

    let used = title.width() + url.width();
    let filler = Span::styled(
        " ".repeat((area.width as usize).saturating_sub(used)),
        Style::default().bg(bg),
    );

    frame.render_widget(Paragraph::new(Line::from(vec![title, url, filler])), area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if state.loading {
        format!(" Search ({}) ", app.controller.messages().searching)
    } else {
        " Search ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let search_text = format!(" \u{1F50D} {}", app.search.query);
    let style = if state.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let paragraph = Paragraph::new(search_text).block(block).style(style);

    frame.render_widget(paragraph, area);
}

fn draw_notice(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let line = if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!(" \u{26A0} {}", error),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ))
    } else if state.search_performed && state.results.is_empty() && !state.loading {
        Line::from(Span::styled(
            format!(" {}", app.controller.messages().no_results),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::default()
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // Area height minus header row
    let table_inner_height = area.height.saturating_sub(1) as usize;
    app.table.visible_rows = table_inner_height;

    let narrow = area.width < NARROW_WIDTH;
    let messages = app.controller.messages();
    let state = app.controller.state();

    let header = Row::new(messages.columns.iter().map(|name| {
        Cell::from(*name).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 95, 135))
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let operators = &state.results.operators;
    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(operators.len());

    let rows: Vec<Row> = operators[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(visual_idx, operator)| {
            let logical_idx = start + visual_idx;
            let is_selected = app.table.selected == Some(logical_idx);

            // Alternating row background
            let bg = if is_selected {
                Color::Rgb(60, 60, 80)
            } else if visual_idx % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };

            let fg_modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let modality = or_placeholder(operator.modality.as_deref());
            let modality_text = if narrow {
                colors::modality_tag(operator.modality.as_deref().unwrap_or("")).to_string()
            } else {
                modality.to_string()
            };
            let marker = if is_selected { "\u{258C}" } else { " " };

            Row::new(vec![
                Cell::from(format!(
                    "{}{}",
                    marker,
                    or_placeholder(operator.registration.as_deref())
                ))
                .style(Style::default().fg(Color::Yellow).bg(bg).add_modifier(fg_modifier)),
                Cell::from(format_tax_id(operator.tax_id.as_deref()))
                    .style(Style::default().fg(Color::Gray).bg(bg)),
                Cell::from(or_placeholder(operator.corporate_name.as_deref()).to_string())
                    .style(Style::default().fg(Color::White).bg(bg).add_modifier(fg_modifier)),
                Cell::from(or_placeholder(operator.trade_name.as_deref()).to_string())
                    .style(Style::default().fg(Color::LightBlue).bg(bg)),
                Cell::from(modality_text).style(
                    Style::default()
                        .fg(colors::color_for_modality(modality))
                        .bg(bg),
                ),
                Cell::from(city_state(operator)).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .bg(bg)
                        .add_modifier(Modifier::ITALIC),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Length(19),
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(if narrow { 12 } else { 34 }),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let left_text = if state.loading {
        format!(" \u{23F3} {}", app.controller.messages().searching)
    } else {
        let timing = app
            .last_elapsed
            .map(|d| format!(" in {:.2}s", d.as_secs_f64()))
            .unwrap_or_default();
        format!(" {}{}", app.status_message, timing)
    };

    let hints = if state.detail_visible {
        "Esc close  c copy CNPJ "
    } else if app.search.focused {
        "Enter search  Tab results  Esc clear  Ctrl+C quit "
    } else {
        "Enter details  / search  Esc quit "
    };

    let left_width = left_text.width();
    let padding = (area.width as usize).saturating_sub(left_width + hints.width());
    let line = Line::from(vec![
        Span::styled(left_text, Style::default().fg(Color::White)),
        Span::raw(" ".repeat(padding)),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Rgb(40, 40, 50))),
        area,
    );
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "\u{00A9} {} anslookup \u{00B7} data: ANS open registry",
        app.controller.state().footer_year
    );
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn draw_detail_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let operator = match &app.controller.state().selected {
        Some(operator) => operator,
        None => return,
    };
    let messages = app.controller.messages();
    let fields = operator_fields(operator, &messages.labels);

    let label_width = fields.iter().map(|(l, _)| l.width()).max().unwrap_or(10);
    let max_line_len = fields
        .iter()
        .map(|(_, v)| label_width + 2 + v.width())
        .max()
        .unwrap_or(20);
    let width = ((max_line_len + 4) as u16)
        .max(40)
        .min(area.width.saturating_sub(4));
    let height = ((fields.len() + 4) as u16).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(width, height, area);

    frame.render_widget(Clear, popup_area);

    let title = format!(" {}: {} ", messages.details_title, operator.display_name());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}  ", label, width = label_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(value, Style::default().fg(Color::White)),
            ])
        })
        .chain(std::iter::once(Line::default()))
        .chain(std::iter::once(Line::from(Span::styled(
            "Esc close \u{00B7} c copy CNPJ",
            Style::default().fg(Color::DarkGray),
        ))))
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::Result;
    use crate::model::{Modality, OperatorSummary, SearchQuery, SearchResultSet, ServiceStatus};
    use crate::service::LookupService;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct OneOperator;

    impl LookupService for OneOperator {
        fn search(&self, _query: &SearchQuery) -> Result<SearchResultSet> {
            Ok(SearchResultSet {
                operators: vec![OperatorSummary {
                    registration: Some("335100".to_string()),
                    tax_id: Some("29309127000179".to_string()),
                    corporate_name: Some("AMIL ASSISTENCIA MEDICA".to_string()),
                    trade_name: Some("AMIL".to_string()),
                    postal_code: Some("04711904".to_string()),
                    ..Default::default()
                }],
                total: 1,
            })
        }

        fn status(&self) -> Result<ServiceStatus> {
            Ok(ServiceStatus {
                data_loaded: true,
                ..Default::default()
            })
        }

        fn details(&self, _registration: &str) -> Result<OperatorSummary> {
            Ok(OperatorSummary::default())
        }

        fn modalities(&self) -> Result<Vec<Modality>> {
            Ok(Vec::new())
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_results_and_detail() {
        let mut app = App::new(&AppConfig::default(), Arc::new(OneOperator), Some("amil".into()));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while app.controller.state().loading && std::time::Instant::now() < deadline {
            app.process_messages();
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("29.309.127/0001-79"));
        assert!(text.contains("AMIL ASSISTENCIA MEDICA"));

        app.open_selected();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("04711-904"));
        assert!(text.contains("Operator details"));
    }
}
