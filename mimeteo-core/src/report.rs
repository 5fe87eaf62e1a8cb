//! Formatting of forecast bundles into display rows and text blocks.
//!
//! Nothing here fails: a missing section yields an "unavailable" value that
//! the caller can show as-is.

use std::fmt;

use crate::model::ForecastBundle;

/// Shown when the current snapshot is missing.
pub const CURRENT_UNAVAILABLE: &str = "Indisponível";
/// Shown when the hourly section is missing.
pub const HOURLY_UNAVAILABLE: &str = "Previsão horária indisponível";
/// Shown when the daily section is missing.
pub const DAILY_UNAVAILABLE: &str = "Previsão diária indisponível";
/// First line of the hourly text block.
pub const HOURLY_HEADER: &str = "⏱ Previsão horária:";

/// Hours included by [`summarize`].
pub const SUMMARY_HOURS: usize = 6;
/// Days included by [`summarize`].
pub const SUMMARY_DAYS: usize = 5;

const MISSING_VALUE: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Current conditions ready for display.
pub enum CurrentConditions {
    /// All fields were reported.
    Available {
        /// Upstream timestamp, verbatim.
        timestamp: String,
        /// Temperature with two decimals and unit.
        temperature_label: String,
        /// Wind with two decimals and unit.
        wind_label: String,
    },
    /// The section or one of its fields was missing.
    Unavailable,
}

impl fmt::Display for CurrentConditions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available {
                timestamp,
                temperature_label,
                wind_label,
            } => write!(formatter, "{timestamp} | {temperature_label} | {wind_label}"),
            Self::Unavailable => formatter.write_str(CURRENT_UNAVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One hour of the hourly forecast.
pub struct HourlyRow {
    /// Upstream timestamp.
    pub time: String,
    /// Temperature, if reported for this hour.
    pub temperature: Option<f64>,
    /// Precipitation, if reported for this hour.
    pub precipitation: Option<f64>,
    /// Snowfall, if reported for this hour.
    pub snowfall: Option<f64>,
}

impl fmt::Display for HourlyRow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} | 🌡 {} °C | 🌧 {} mm",
            self.time,
            one_decimal(self.temperature),
            one_decimal(self.precipitation),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One day of the daily forecast.
pub struct DailyRow {
    /// Date as returned upstream (`YYYY-MM-DD`).
    pub date: String,
    /// Maximum temperature.
    pub temperature_max: Option<f64>,
    /// Minimum temperature.
    pub temperature_min: Option<f64>,
    /// Precipitation sum.
    pub precipitation_sum: Option<f64>,
    /// Snowfall sum.
    pub snowfall_sum: Option<f64>,
}

impl fmt::Display for DailyRow {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} | {} °C / {} °C | {} mm | {} mm",
            self.date,
            one_decimal(self.temperature_max),
            one_decimal(self.temperature_min),
            one_decimal(self.precipitation_sum),
            one_decimal(self.snowfall_sum),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Daily rows plus the notice shown when the section is missing.
pub struct DailyForecast {
    /// Rows in upstream order.
    pub rows: Vec<DailyRow>,
    /// Set to [`DAILY_UNAVAILABLE`] when the bundle had no daily section.
    pub notice: Option<&'static str>,
}

impl DailyForecast {
    /// Formatted line per row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(ToString::to_string).collect()
    }
}

/// Extract the current snapshot.
#[must_use]
pub fn current_conditions(bundle: &ForecastBundle) -> CurrentConditions {
    let Some(current) = bundle.current.as_ref() else {
        return CurrentConditions::Unavailable;
    };

    match (&current.time, current.temperature, current.windspeed) {
        (Some(time), Some(temperature), Some(wind)) => CurrentConditions::Available {
            timestamp: time.clone(),
            temperature_label: format!("{temperature:.2} °C"),
            wind_label: format!("{wind:.2} mm"),
        },
        _ => CurrentConditions::Unavailable,
    }
}

/// Up to `limit` hourly rows, or `None` when the section is missing.
#[must_use]
pub fn hourly_rows(bundle: &ForecastBundle, limit: usize) -> Option<Vec<HourlyRow>> {
    let hourly = bundle.hourly.as_ref()?;

    let rows = hourly
        .time
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, time)| HourlyRow {
            time: time.clone(),
            temperature: value_at(&hourly.temperature_2m, index),
            precipitation: value_at(&hourly.precipitation, index),
            snowfall: value_at(&hourly.snowfall, index),
        })
        .collect();

    Some(rows)
}

/// Hourly forecast as a text block: a header line followed by one line per
/// hour, at most `limit` of them.
#[must_use]
pub fn hourly_forecast(bundle: &ForecastBundle, limit: usize) -> String {
    let Some(rows) = hourly_rows(bundle, limit) else {
        return HOURLY_UNAVAILABLE.to_owned();
    };

    let body = rows
        .iter()
        .map(|row| format!("{row}\n"))
        .collect::<String>();

    format!("{HOURLY_HEADER}\n{body}")
}

/// Up to `limit` daily rows.
#[must_use]
pub fn daily_forecast(bundle: &ForecastBundle, limit: usize) -> DailyForecast {
    let Some(daily) = bundle.daily.as_ref() else {
        return DailyForecast {
            rows: Vec::new(),
            notice: Some(DAILY_UNAVAILABLE),
        };
    };

    let rows = daily
        .time
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, date)| DailyRow {
            date: date.clone(),
            temperature_max: value_at(&daily.temperature_2m_max, index),
            temperature_min: value_at(&daily.temperature_2m_min, index),
            precipitation_sum: value_at(&daily.precipitation_sum, index),
            snowfall_sum: value_at(&daily.snowfall_sum, index),
        })
        .collect();

    DailyForecast { rows, notice: None }
}

/// Current conditions, the next hours, and the next days in one block.
#[must_use]
pub fn summarize(bundle: &ForecastBundle) -> String {
    let current = current_conditions(bundle);
    let hourly = hourly_forecast(bundle, SUMMARY_HOURS);
    let daily = daily_forecast(bundle, SUMMARY_DAYS);

    let daily_block = match daily.notice {
        Some(notice) => notice.to_owned(),
        None => daily.lines().join("\n"),
    };

    format!("{current}\n\n{hourly}\n{daily_block}")
}

fn value_at(series: &[Option<f64>], index: usize) -> Option<f64> {
    series.get(index).copied().flatten()
}

fn one_decimal(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING_VALUE.to_owned(), |number| format!("{number:.1}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentSection, DailySection, HourlySection};

    fn daily_bundle() -> ForecastBundle {
        ForecastBundle {
            daily: Some(DailySection {
                time: vec!["2026-01-01".to_owned(), "2026-01-02".to_owned()],
                temperature_2m_max: vec![Some(30.0), Some(31.2)],
                temperature_2m_min: vec![Some(20.1), Some(19.8)],
                precipitation_sum: vec![Some(0.0), Some(5.5)],
                snowfall_sum: vec![Some(0.0), Some(0.0)],
            }),
            ..ForecastBundle::default()
        }
    }

    fn hourly_bundle(hours: usize) -> ForecastBundle {
        let time = (0..hours).map(|hour| format!("2026-01-01T{hour:02}:00")).collect();
        let temperature_2m = (0..hours).map(|_| Some(22.24)).collect();
        let precipitation = (0..hours).map(|_| Some(0.04)).collect();
        ForecastBundle {
            hourly: Some(HourlySection {
                time,
                temperature_2m,
                precipitation,
                snowfall: Vec::new(),
            }),
            ..ForecastBundle::default()
        }
    }

    #[test]
    fn daily_forecast_formats_each_day() {
        let daily = daily_forecast(&daily_bundle(), 2);
        assert!(daily.notice.is_none(), "daily section is present");
        assert_eq!(
            daily.lines(),
            vec![
                "2026-01-01 | 30.0 °C / 20.1 °C | 0.0 mm | 0.0 mm".to_owned(),
                "2026-01-02 | 31.2 °C / 19.8 °C | 5.5 mm | 0.0 mm".to_owned(),
            ]
        );
    }

    #[test]
    fn daily_forecast_respects_smaller_limit() {
        let daily = daily_forecast(&daily_bundle(), 1);
        assert_eq!(daily.rows.len(), 1);
    }

    #[test]
    fn daily_forecast_without_section_reports_notice() {
        let daily = daily_forecast(&ForecastBundle::default(), 5);
        assert!(daily.rows.is_empty(), "no rows without a daily section");
        assert_eq!(daily.notice, Some(DAILY_UNAVAILABLE));
    }

    #[test]
    fn daily_row_with_short_series_renders_placeholder() {
        let mut bundle = daily_bundle();
        if let Some(daily) = bundle.daily.as_mut() {
            daily.snowfall_sum.clear();
        }
        let lines = daily_forecast(&bundle, 2).lines();
        assert_eq!(lines.len(), 2, "missing series must not drop rows");
        assert!(
            lines.iter().all(|line| line.ends_with("| -- mm")),
            "snowfall should render as placeholder: {lines:?}"
        );
    }

    #[test]
    fn hourly_limit_larger_than_series_yields_series_length() {
        let bundle = hourly_bundle(3);
        let rows = hourly_rows(&bundle, 10).expect("hourly present");
        assert_eq!(rows.len(), 3);

        let text = hourly_forecast(&bundle, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first().copied(), Some(HOURLY_HEADER));
        assert_eq!(lines.len(), 4, "header plus one line per hour: {text}");
    }

    #[test]
    fn hourly_line_uses_one_decimal() {
        let text = hourly_forecast(&hourly_bundle(1), 6);
        assert!(
            text.contains("2026-01-01T00:00 | 🌡 22.2 °C | 🌧 0.0 mm"),
            "unexpected hourly text: {text}"
        );
    }

    #[test]
    fn hourly_without_section_returns_sentinel() {
        assert_eq!(
            hourly_forecast(&ForecastBundle::default(), 6),
            HOURLY_UNAVAILABLE
        );
        assert!(hourly_rows(&ForecastBundle::default(), 6).is_none(), "no rows");
    }

    #[test]
    fn current_conditions_formats_two_decimals() {
        let bundle = ForecastBundle {
            current: Some(CurrentSection {
                time: Some("2026-01-01T14:00".to_owned()),
                temperature: Some(27.4),
                windspeed: Some(11.0),
            }),
            ..ForecastBundle::default()
        };
        assert_eq!(
            current_conditions(&bundle),
            CurrentConditions::Available {
                timestamp: "2026-01-01T14:00".to_owned(),
                temperature_label: "27.40 °C".to_owned(),
                wind_label: "11.00 mm".to_owned(),
            }
        );
    }

    #[test]
    fn current_conditions_missing_section_is_unavailable() {
        let current = current_conditions(&ForecastBundle::default());
        assert_eq!(current, CurrentConditions::Unavailable);
        assert_eq!(current.to_string(), CURRENT_UNAVAILABLE);
    }

    #[test]
    fn current_conditions_missing_field_is_unavailable() {
        let bundle = ForecastBundle {
            current: Some(CurrentSection {
                time: Some("2026-01-01T14:00".to_owned()),
                temperature: None,
                windspeed: Some(3.0),
            }),
            ..ForecastBundle::default()
        };
        assert_eq!(current_conditions(&bundle), CurrentConditions::Unavailable);
    }

    #[test]
    fn summarize_composes_all_sections() {
        let mut bundle = daily_bundle();
        bundle.hourly = hourly_bundle(8).hourly;

        let summary = summarize(&bundle);
        assert!(summary.starts_with(CURRENT_UNAVAILABLE), "{summary}");
        assert!(summary.contains(HOURLY_HEADER), "{summary}");
        assert_eq!(
            summary.matches("🌡").count(),
            SUMMARY_HOURS,
            "summary is capped at six hours"
        );
        assert!(summary.ends_with("5.5 mm | 0.0 mm"), "{summary}");
    }

    #[test]
    fn summarize_reports_missing_daily() {
        let summary = summarize(&ForecastBundle::default());
        assert!(summary.contains(HOURLY_UNAVAILABLE), "{summary}");
        assert!(summary.ends_with(DAILY_UNAVAILABLE), "{summary}");
    }
}
