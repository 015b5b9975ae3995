use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, Widget},
    Frame,
};

use crate::date::{format_date, CLOCK};
use crate::icon::Icon;
use crate::state::WidgetState;
use crate::view::{select_view, DataView, View, LOADING_TEXT, NO_DATA_TEXT};

const MISSING: &str = "--";

fn panel<'a>(title: &'a str) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded);
    if title.is_empty() {
        block
    } else {
        block
            .title(Span::styled(title, Style::default().fg(Color::Yellow)))
            .title_alignment(Alignment::Left)
    }
}

/// Forecast sub-view, driven only by the current icon and category.
pub struct ForecastPanel<'a> {
    pub icon: Icon,
    pub category: Option<&'a str>,
}

impl Widget for ForecastPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let category = self.category.unwrap_or(MISSING);
        Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.icon.glyph(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(self.icon.as_str(), Style::default().fg(Color::Blue)),
            ]),
            Line::from(vec![
                Span::raw(format!(" {:13}", "Outlook")),
                Span::styled(category, Style::default().fg(Color::Green)),
            ]),
        ])
        .block(panel(" Forecast "))
        .render(area, buf);
    }
}

fn display_message(message: &str) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(panel(""))
}

fn display_headline<'a>(data: &DataView<'a>) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                data.city,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(data.country.unwrap_or(MISSING), Style::default().fg(Color::Blue)),
        ]),
    ])
    .block(panel(""))
}

fn display_current_conditions<'a>(data: &DataView<'a>, now: DateTime<Local>) -> Table<'a> {
    let humid = data
        .humidity
        .map_or_else(|| MISSING.to_string(), |humid| format!("{humid:.0}%"));

    let rows = vec![
        Row::new(vec![Cell::from("")]),
        Row::new(vec![
            Cell::from(" Conditions"),
            Cell::from(format!(
                "{} {}",
                data.icon.glyph(),
                data.category.unwrap_or(MISSING)
            ))
            .style(Style::default().fg(Color::Green)),
        ]),
        Row::new(vec![
            Cell::from(" Temperature"),
            Cell::from(format!("{}°C", data.temperature_c))
                .style(Style::default().fg(Color::Green)),
        ]),
        Row::new(vec![
            Cell::from(" Humidity"),
            Cell::from(humid).style(Style::default().fg(Color::Green)),
        ]),
        Row::new(vec![
            Cell::from(" Time"),
            Cell::from(CLOCK.display(now)).style(Style::default().fg(Color::Green)),
        ]),
        Row::new(vec![
            Cell::from(" Date"),
            Cell::from(format_date(now.date_naive())).style(Style::default().fg(Color::Green)),
        ]),
    ];

    Table::new(rows, [Constraint::Length(13), Constraint::Min(20)])
        .block(panel(" Current Conditions "))
}

/// Draws whichever view the state selects.
pub fn draw(f: &mut Frame, state: &WidgetState, now: DateTime<Local>) {
    let area = f.area();
    let data = match select_view(state) {
        View::Loading => {
            f.render_widget(display_message(LOADING_TEXT), area);
            return;
        }
        View::Error(message) => {
            f.render_widget(display_message(message), area);
            return;
        }
        View::NoData => {
            f.render_widget(display_message(NO_DATA_TEXT), area);
            return;
        }
        View::Data(data) => data,
    };

    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    f.render_widget(display_headline(&data), vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert_layout[1]);

    f.render_widget(display_current_conditions(&data, now), chunks[0]);
    f.render_widget(
        ForecastPanel {
            icon: data.icon,
            category: data.category,
        },
        chunks[1],
    );
}
