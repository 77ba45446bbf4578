pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use time_humanize::{Accuracy, HumanTime, Tense};

use kubik::format::{format_ms, format_stat};
use kubik::solve::Solve;
use kubik::stats::SolveStats;
use kubik::time_series;

use crate::{App, AppState, PendingAction};

/// How many of the newest solves the trend chart plots.
const TREND_WINDOW: usize = 100;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(30),
                Constraint::Length(self.config.right_panel_width),
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(1)])
            .split(columns[0]);

        render_timer(self, main[0], buf);
        render_trend(self, main[1], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(1)])
            .split(columns[1]);

        render_stats(self, right[0], buf);
        render_solves(self, right[1], buf);
    }
}

fn render_timer(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.generator.puzzle()));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let time_style = if app.session.is_running() {
        Style::default().patch(bold_style).fg(Color::Yellow)
    } else {
        bold_style
    };
    let readout = Paragraph::new(Span::styled(format_ms(app.session.display_ms()), time_style))
        .alignment(Alignment::Center);
    readout.render(chunks[1], buf);

    let scramble = Paragraph::new(Span::styled(app.scramble.clone(), dim_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    scramble.render(chunks[2], buf);

    let footer = match app.state {
        AppState::Confirm(PendingAction::DeleteSelected) => {
            let time = app
                .solves
                .get(app.selected)
                .map(|s: &Solve| format_ms(s.ms as f64))
                .unwrap_or_default();
            Span::styled(
                format!("delete solve {time}? (y/n)"),
                Style::default().patch(bold_style).fg(Color::Red),
            )
        }
        AppState::Confirm(PendingAction::ClearAll) => Span::styled(
            "delete all solves? this cannot be undone (y/n)",
            Style::default().patch(bold_style).fg(Color::Red),
        ),
        AppState::Timing => Span::styled(
            "(space) start/stop  (j/k) select  (d)elete  (c)lear  (n)ew scramble  ([/]) panel  (esc)ape",
            italic_style,
        ),
    };
    Paragraph::new(footer)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
}

fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    // Re-derived from the full sequence on every draw; nothing is cached.
    let stats = SolveStats::compute(&app.solves);
    let rows = [
        ("solves", stats.count.to_string()),
        ("best", format_stat(stats.best)),
        ("mean", format_stat(stats.mean)),
        ("ao5", format_stat(stats.ao5)),
        ("ao12", format_stat(stats.ao12)),
        ("wca5", format_stat(stats.wca5)),
        ("wca12", format_stat(stats.wca12)),
    ];

    let lines = rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!(" {label:<8}"), dim_style),
                Span::styled(value.clone(), bold_style),
            ])
        })
        .collect::<Vec<Line>>();

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" stats "));
    panel.render(area, buf);
}

fn render_solves(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(" solves ");
    let inner = block.inner(area);
    block.render(area, buf);

    let visible = inner.height as usize;
    if visible == 0 {
        return;
    }
    // Keep the selection in view.
    let first = app.selected.saturating_sub(visible.saturating_sub(1));

    let lines = app
        .solves
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(idx, solve)| {
            let age = (chrono::Local::now() - solve.at).to_std().unwrap_or_default();
            let age_text = HumanTime::from(age).to_text_en(Accuracy::Rough, Tense::Past);
            let row = format!(
                " {:>4}  {}  {}",
                idx + 1,
                format_ms(solve.ms as f64),
                age_text
            );
            if idx == app.selected {
                Line::from(Span::styled(
                    row,
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(Span::raw(row))
            }
        })
        .collect::<Vec<Line>>();

    Paragraph::new(lines).render(inner, buf);
}

fn render_trend(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let magenta_style = Style::default().fg(Color::Magenta);

    let block = Block::default().borders(Borders::ALL).title(" trend ");
    let points = time_series::trend(&app.solves, TREND_WINDOW);

    if points.len() < 2 {
        let inner = block.inner(area);
        block.render(area, buf);
        let hint = Paragraph::new(Span::styled(
            "record a few solves to see the trend",
            Style::default()
                .add_modifier(Modifier::DIM)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        hint.render(inner, buf);
        return;
    }

    let (overall_count, lowest_ms, highest_ms) = charting::compute_chart_params(&points);

    let tuples = points.iter().map(|&p| p.into()).collect::<Vec<(f64, f64)>>();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("solve")
                .bounds([1.0, overall_count])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_count), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("time")
                .bounds([lowest_ms, highest_ms])
                .labels(vec![
                    Span::styled(format_ms(lowest_ms), bold_style),
                    Span::styled(format_ms(highest_ms), bold_style),
                ]),
        );

    chart.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubik::config::Config;
    use kubik::store::MemorySolveStore;

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render_to_text(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_render_empty_app() {
        let app = App::new(Config::default(), Box::new(MemorySolveStore::new()));
        let text = render_to_text(&app, 100, 30);

        assert!(text.contains("00:00.00"));
        assert!(text.contains("stats"));
        assert!(text.contains("record a few solves to see the trend"));
        // Placeholder stats before any solve exists.
        assert!(text.contains("--:--.--"));
    }

    #[test]
    fn test_render_with_solves_shows_list_and_chart() {
        let store = MemorySolveStore::with_solves(vec![Solve::new(8120), Solve::new(9340)]);
        let app = App::new(Config::default(), Box::new(store));
        let text = render_to_text(&app, 100, 30);

        assert!(text.contains("00:08.12"));
        assert!(text.contains("00:09.34"));
        assert!(text.contains("trend"));
        assert!(!text.contains("record a few solves"));
    }

    #[test]
    fn test_render_confirm_clear_prompt() {
        let store = MemorySolveStore::with_solves(vec![Solve::new(1000)]);
        let mut app = App::new(Config::default(), Box::new(store));
        app.state = AppState::Confirm(PendingAction::ClearAll);
        let text = render_to_text(&app, 100, 30);

        assert!(text.contains("delete all solves?"));
    }

    #[test]
    fn test_render_survives_tiny_terminal() {
        let app = App::new(Config::default(), Box::new(MemorySolveStore::new()));
        let _ = render_to_text(&app, 10, 3);
    }
}
