use std::sync::Arc;

use mimeteo_core::{
    model::{Coordinate, ForecastBundle, Region},
    service::MimeteoService,
};

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    RegionSelect,
    MunicipalitySelect,
    ForecastView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Current,
    Hourly,
    Daily,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Current, Tab::Hourly, Tab::Daily];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Current => "Temperatura Atual",
            Tab::Hourly => "Próximas Horas",
            Tab::Daily => "Temperatura (Próximos Dias)",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Current => 0,
            Tab::Hourly => 1,
            Tab::Daily => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Tab::Current => Tab::Hourly,
            Tab::Hourly => Tab::Daily,
            Tab::Daily => Tab::Current,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Tab::Current => Tab::Daily,
            Tab::Hourly => Tab::Current,
            Tab::Daily => Tab::Hourly,
        }
    }
}

/// Forecast fetched for the selected municipality.
pub(crate) struct Forecast {
    pub municipality: String,
    pub region: Region,
    pub coordinate: Coordinate,
    pub bundle: ForecastBundle,
}

pub(crate) struct App {
    pub service: Arc<MimeteoService>,
    pub settings: Settings,

    pub screen: Screen,
    pub regions: Vec<Region>,
    pub region_list_index: usize,
    pub selected_region: Option<Region>,

    pub municipalities: Vec<String>,
    pub municipality_filter: String,
    pub municipality_list_index: usize,
    pub selected_municipality: Option<String>,

    pub forecast: Option<Forecast>,
    pub tab: Tab,

    pub is_loading: bool,
    pub error_message: Option<String>,

    /// Set until the first region list arrives; only that load restores the saved selection.
    restore_pending: bool,
}

impl App {
    pub(crate) fn new(service: Arc<MimeteoService>, settings: Settings) -> Self {
        Self {
            service,
            settings,
            screen: Screen::RegionSelect,
            regions: Vec::new(),
            region_list_index: 0,
            selected_region: None,
            municipalities: Vec::new(),
            municipality_filter: String::new(),
            municipality_list_index: 0,
            selected_municipality: None,
            forecast: None,
            tab: Tab::Current,
            is_loading: false,
            error_message: None,
            restore_pending: true,
        }
    }

    /// Replace the region list. On the first load the remembered region is
    /// pre-selected; later reloads keep the region screen.
    ///
    /// Returns `true` when the remembered region was restored.
    pub(crate) fn set_regions(&mut self, regions: Vec<Region>) -> bool {
        self.regions = regions;
        self.region_list_index = 0;

        if !std::mem::take(&mut self.restore_pending) {
            return false;
        }

        let remembered = self.settings.last_region.as_deref().and_then(|code| {
            self.regions
                .iter()
                .position(|region| region.code.0.eq_ignore_ascii_case(code))
        });

        match remembered {
            Some(index) => {
                self.region_list_index = index;
                self.select_current_region().is_some()
            }
            None => false,
        }
    }

    pub(crate) fn select_current_region(&mut self) -> Option<Region> {
        let region = self.regions.get(self.region_list_index).cloned()?;
        if self.selected_region.as_ref() != Some(&region) {
            self.municipalities.clear();
            self.selected_municipality = None;
        }
        self.selected_region = Some(region.clone());
        self.settings.last_region = Some(region.code.0.clone());
        self.screen = Screen::MunicipalitySelect;
        Some(region)
    }

    /// Replace the municipality list, pre-selecting the remembered name.
    pub(crate) fn set_municipalities(&mut self, names: Vec<String>) {
        self.municipalities = names;
        self.municipality_filter.clear();
        self.municipality_list_index = self
            .settings
            .last_municipality
            .as_deref()
            .and_then(|remembered| {
                let remembered = remembered.to_lowercase();
                self.municipalities
                    .iter()
                    .position(|name| name.to_lowercase() == remembered)
            })
            .unwrap_or(0);
    }

    /// Municipalities whose name contains the filter, ignoring case.
    pub(crate) fn filtered_municipalities(&self) -> Vec<&str> {
        let needle = self.municipality_filter.trim().to_lowercase();
        self.municipalities
            .iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub(crate) fn push_filter(&mut self, character: char) {
        self.municipality_filter.push(character);
        self.municipality_list_index = 0;
    }

    pub(crate) fn pop_filter(&mut self) {
        self.municipality_filter.pop();
        self.municipality_list_index = 0;
    }

    pub(crate) fn select_current_municipality(&mut self) -> Option<String> {
        let name = self
            .filtered_municipalities()
            .get(self.municipality_list_index)
            .map(|name| (*name).to_owned())?;
        self.selected_municipality = Some(name.clone());
        self.settings.last_municipality = Some(name.clone());
        Some(name)
    }

    pub(crate) fn show_forecast(&mut self, forecast: Forecast) {
        self.forecast = Some(forecast);
        self.tab = Tab::Current;
        self.screen = Screen::ForecastView;
    }
}
