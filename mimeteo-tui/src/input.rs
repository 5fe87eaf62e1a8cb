use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen, Tab as ForecastTab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.regions`()
    LoadRegions,
    /// Run `service.municipality_names`(...) for the selected region
    LoadMunicipalities,
    /// Run `service.forecast_for_municipality`(...) for the selected municipality
    LoadForecast,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut; plain `q` is handled per screen because the
    // municipality filter accepts text.
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::RegionSelect => match key.code {
            Char('q') => action = Action::Quit,
            Up | Char('k') => {
                app.region_list_index = app.region_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.region_list_index + 1 < app.regions.len() {
                    app.region_list_index += 1;
                }
            }
            Enter | Char(' ') | Right => {
                if app.select_current_region().is_some() {
                    action = Action::LoadMunicipalities;
                }
            }
            Char('r') => action = Action::LoadRegions,
            _ => {}
        },

        Screen::MunicipalitySelect => match key.code {
            Up => {
                app.municipality_list_index = app.municipality_list_index.saturating_sub(1);
            }
            Down => {
                if app.municipality_list_index + 1 < app.filtered_municipalities().len() {
                    app.municipality_list_index += 1;
                }
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.push_filter(character);
                }
            }
            Backspace => app.pop_filter(),
            Enter | Tab => {
                if app.select_current_municipality().is_some() {
                    action = Action::LoadForecast;
                } else {
                    app.error_message = Some("Nenhum município corresponde ao filtro".into());
                }
            }
            Left | Esc => {
                app.screen = Screen::RegionSelect;
            }
            _ => {}
        },

        Screen::ForecastView => match key.code {
            Char('q') => action = Action::Quit,
            Right | Tab => app.tab = app.tab.next(),
            Left | BackTab => app.tab = app.tab.previous(),
            Char('1') => app.tab = ForecastTab::Current,
            Char('2') => app.tab = ForecastTab::Hourly,
            Char('3') => app.tab = ForecastTab::Daily,
            Char('r') => action = Action::LoadForecast,
            Esc | Char('b') => {
                app.screen = Screen::MunicipalitySelect;
            }
            _ => {}
        },
    }
    action
}
