//! Terminal UI for mimeteo that lets users pick a Brazilian municipality and view its forecast.

mod app;
mod input;
mod logging;
mod settings;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mimeteo_core::service::MimeteoService;
use mimeteo_provider_ibge as ibge;
use mimeteo_provider_open_meteo as open_meteo;
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;

use crate::app::{App, Forecast};
use crate::input::Action;
use crate::settings::Settings;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = logging::init(&Settings::app_dir()?)?;
    let settings = Settings::load_validated()?;
    tracing::info!(log = %log_path.display(), "mimeteo starting");

    // HTTP + service setup
    let client = Client::builder()
        .user_agent("mimeteo/0.1")
        .timeout(StdDuration::from_secs(settings.request_timeout_secs))
        .build()?;

    let service = Arc::new(MimeteoService::new(
        ibge::port(client.clone(), &settings.locality_base_url),
        open_meteo::port(client, &settings.weather_base_url),
    ));

    let app = App::new(service, settings);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("mimeteo exited with error: {err:#}");
    }
    res
}

async fn run(terminal: &mut Term, mut app: App) -> Result<()> {
    let mut pending = Some(Action::LoadRegions);

    loop {
        // Requests chain: a restored region loads its municipalities right away.
        while let Some(action) = pending.take() {
            pending = handle_action(terminal, &mut app, action).await?;
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                action => pending = Some(action),
            }
        }
    }

    Ok(())
}

/// Run one request, updating the app. Returns a follow-up action, if any.
async fn handle_action(
    terminal: &mut Term,
    app: &mut App,
    action: Action,
) -> Result<Option<Action>> {
    app.is_loading = true;
    app.error_message = None;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let follow_up = match action {
        Action::None | Action::Quit => None,
        Action::LoadRegions => load_regions(app).await,
        Action::LoadMunicipalities => load_municipalities(app).await,
        Action::LoadForecast => load_forecast(app).await,
    };

    app.is_loading = false;
    Ok(follow_up)
}

async fn load_regions(app: &mut App) -> Option<Action> {
    match app.service.regions().await {
        Ok(regions) => {
            tracing::info!(count = regions.len(), "loaded regions");
            app.set_regions(regions).then_some(Action::LoadMunicipalities)
        }
        Err(err) => {
            tracing::warn!("failed to load regions: {err}");
            app.error_message = Some(format!("Falha ao carregar estados: {err}"));
            None
        }
    }
}

async fn load_municipalities(app: &mut App) -> Option<Action> {
    let Some(region) = app.selected_region.clone() else {
        app.error_message = Some("Selecione um estado primeiro".into());
        return None;
    };
    save_settings(app);

    match app.service.municipality_names(&region.code).await {
        Ok(names) => {
            tracing::info!(region = %region.code, count = names.len(), "loaded municipalities");
            app.set_municipalities(names);
        }
        Err(err) => {
            tracing::warn!(region = %region.code, "failed to load municipalities: {err}");
            app.error_message = Some(format!("Falha ao carregar municípios: {err}"));
        }
    }
    None
}

async fn load_forecast(app: &mut App) -> Option<Action> {
    let Some(region) = app.selected_region.clone() else {
        app.error_message = Some("Selecione um estado primeiro".into());
        return None;
    };
    let Some(municipality) = app.selected_municipality.clone() else {
        app.error_message = Some("Selecione um município primeiro".into());
        return None;
    };
    save_settings(app);

    match app
        .service
        .forecast_for_municipality(&municipality, &region.code)
        .await
    {
        Ok((coordinate, bundle)) => {
            tracing::info!(%municipality, region = %region.code, %coordinate, "loaded forecast");
            app.show_forecast(Forecast {
                municipality,
                region,
                coordinate,
                bundle,
            });
        }
        Err(err) => {
            tracing::warn!(%municipality, region = %region.code, "failed to load forecast: {err}");
            app.error_message = Some(format!("Falha ao carregar previsão: {err}"));
        }
    }
    None
}

/// Persist the current selection; failures are logged, not fatal.
fn save_settings(app: &App) {
    if let Err(err) = app.settings.save() {
        tracing::warn!("failed to save settings: {err:#}");
    }
}
