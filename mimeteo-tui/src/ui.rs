use chrono::{Datelike, Local, NaiveDate, Weekday};
use mimeteo_core::{
    CURRENT_UNAVAILABLE, CurrentConditions, DAILY_UNAVAILABLE, HOURLY_UNAVAILABLE,
    current_conditions, daily_forecast, hourly_rows,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
};

use crate::app::{App, Forecast, Screen, Tab};

/// Rows shown in the hourly tab.
const HOURLY_ROWS: usize = 6;
/// Rows shown in the daily tab.
const DAILY_ROWS: usize = 6;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("mimeteo – previsão do tempo por município")
        .block(Block::default().borders(Borders::ALL).title("MiMeteo"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::RegionSelect => draw_region_select(frame, app, *content_area),
        Screen::MunicipalitySelect => draw_municipality_select(frame, app, *content_area),
        Screen::ForecastView => draw_forecast_view(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::RegionSelect => "↑/↓ mover · Enter selecionar estado · r recarregar · q sair",
        Screen::MunicipalitySelect => {
            "Digite para filtrar · ↑/↓ mover · Enter previsão · Esc voltar · Ctrl-C sair"
        }
        Screen::ForecastView => "Tab/←/→ abas · 1-3 aba · r atualizar · Esc/b voltar · q sair",
    };

    let status_text = if app.is_loading {
        format!("Carregando… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn draw_region_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .regions
        .iter()
        .enumerate()
        .map(|(idx, region)| {
            let prefix = if idx == app.region_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{region}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Selecione o estado (↑/↓, Enter)"),
        )
        .highlight_style(highlight_style());

    let mut state = ListState::default();
    if !app.regions.is_empty() {
        state.select(Some(app.region_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_municipality_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filter
            Constraint::Min(0),    // names
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [filter_area, list_area] = chunks else {
        return;
    };

    let region_label = app
        .selected_region
        .as_ref()
        .map_or_else(|| "<sem estado>".to_owned(), ToString::to_string);

    let filter = Paragraph::new(app.municipality_filter.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Municípios de {region_label} (filtro)")),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(filter, *filter_area);

    let names = app.filtered_municipalities();
    let items = if names.is_empty() {
        let hint = if app.municipalities.is_empty() {
            "Nenhum município carregado."
        } else {
            "Nenhum município corresponde ao filtro."
        };
        vec![ListItem::new(hint)]
    } else {
        names.iter().map(|name| ListItem::new(*name)).collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} municípios (↑/↓, Enter)", names.len())),
        )
        .highlight_style(highlight_style());

    let mut state = ListState::default();
    if !names.is_empty() {
        state.select(Some(app.municipality_list_index));
    }
    frame.render_stateful_widget(list, *list_area, &mut state);
}

fn draw_forecast_view(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(forecast) = app.forecast.as_ref() else {
        let message = if app.is_loading {
            "Carregando previsão…"
        } else {
            "Nenhuma previsão carregada."
        };
        let paragraph = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title("Previsão"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [tabs_area, body_area] = chunks else {
        return;
    };

    let tabs = Tabs::new(Tab::ALL.iter().map(|tab| tab.title()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(forecast_title(forecast)),
        )
        .select(app.tab.index())
        .highlight_style(highlight_style());
    frame.render_widget(tabs, *tabs_area);

    match app.tab {
        Tab::Current => draw_current(frame, forecast, *body_area),
        Tab::Hourly => draw_hourly(frame, forecast, *body_area),
        Tab::Daily => draw_daily(frame, forecast, *body_area),
    }
}

fn forecast_title(forecast: &Forecast) -> String {
    format!(
        "Previsão para {} - {} ({})",
        forecast.municipality, forecast.region.code, forecast.coordinate
    )
}

fn unavailable(frame: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(message.to_owned())
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn header_row(labels: Vec<&'static str>) -> Row<'static> {
    Row::new(labels).style(Style::default().add_modifier(Modifier::BOLD))
}

fn draw_current(frame: &mut Frame<'_>, forecast: &Forecast, area: Rect) {
    let title = Tab::Current.title();

    let CurrentConditions::Available {
        timestamp,
        temperature_label,
        wind_label,
    } = current_conditions(&forecast.bundle)
    else {
        unavailable(frame, area, title, CURRENT_UNAVAILABLE);
        return;
    };

    let style = Style::default().fg(temperature_color(
        forecast.bundle.current.as_ref().and_then(|current| current.temperature),
    ));

    let row = Row::new(vec![
        Cell::from(display_timestamp(&timestamp)),
        Cell::from(temperature_label),
        Cell::from(wind_label),
    ])
    .style(style);

    let table = Table::new(
        vec![row],
        [
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Min(10),
        ],
    )
    .header(header_row(vec!["Horário", "Temperatura", "Vento"]))
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_hourly(frame: &mut Frame<'_>, forecast: &Forecast, area: Rect) {
    let title = Tab::Hourly.title();

    let Some(rows) = hourly_rows(&forecast.bundle, HOURLY_ROWS) else {
        unavailable(frame, area, title, HOURLY_UNAVAILABLE);
        return;
    };

    let rows = rows.into_iter().map(|row| {
        Row::new(vec![
            Cell::from(display_timestamp(&row.time)),
            Cell::from(value_label(row.temperature, "°C")),
            Cell::from(value_label(row.precipitation, "mm")),
            Cell::from(value_label(row.snowfall, "cm")),
        ])
        .style(Style::default().fg(temperature_color(row.temperature)))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(8),
        ],
    )
    .header(header_row(vec!["Horário", "Temperatura", "Precipitação", "Neve"]))
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_daily(frame: &mut Frame<'_>, forecast: &Forecast, area: Rect) {
    let title = Tab::Daily.title();

    let daily = daily_forecast(&forecast.bundle, DAILY_ROWS);
    if let Some(notice) = daily.notice {
        unavailable(frame, area, title, notice);
        return;
    }
    if daily.rows.is_empty() {
        unavailable(frame, area, title, DAILY_UNAVAILABLE);
        return;
    }

    let today = Local::now().date_naive();

    let rows = daily.rows.into_iter().map(|row| {
        let parsed = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").ok();
        let (date, weekday, relative) = match parsed {
            Some(date) => (
                date.format("%d/%m/%Y").to_string(),
                weekday_label(date.weekday()).to_owned(),
                relative_day_label(date, today),
            ),
            None => (row.date.clone(), String::new(), String::new()),
        };

        let mut style = Style::default().fg(temperature_color(row.temperature_max));
        if parsed == Some(today) {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(date),
            Cell::from(weekday),
            Cell::from(relative),
            Cell::from(value_label(row.temperature_max, "°C")),
            Cell::from(value_label(row.temperature_min, "°C")),
            Cell::from(value_label(row.precipitation_sum, "mm")),
            Cell::from(value_label(row.snowfall_sum, "mm")),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Min(8),
        ],
    )
    .header(header_row(vec![
        "Data",
        "Dia",
        "Quando",
        "Máx",
        "Mín",
        "Precipitação",
        "Neve",
    ]))
    .block(Block::default().borders(Borders::ALL).title(title))
    .column_spacing(1);

    frame.render_widget(table, area);
}

/// `2026-01-01T14:00` becomes `2026-01-01 14:00`.
fn display_timestamp(raw: &str) -> String {
    raw.replacen('T', " ", 1)
}

fn value_label(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "--".to_owned(), |number| format!("{number:.1} {unit}"))
}

fn temperature_color(celsius: Option<f64>) -> Color {
    match celsius {
        None => Color::DarkGray,
        Some(value) if value < 10.0 => Color::Cyan,
        Some(value) if value < 20.0 => Color::Green,
        Some(value) if value < 28.0 => Color::Yellow,
        Some(_) => Color::Red,
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "seg",
        Weekday::Tue => "ter",
        Weekday::Wed => "qua",
        Weekday::Thu => "qui",
        Weekday::Fri => "sex",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "hoje".to_owned(),
        1 => "amanhã".to_owned(),
        days if days > 1 => format!("em {days} dias"),
        -1 => "ontem".to_owned(),
        days => format!("há {} dias", days.abs()),
    }
}
