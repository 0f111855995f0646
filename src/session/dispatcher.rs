//! Action dispatcher
//!
//! Runs the side effects behind leaf prompt nodes. Returns `true` when the
//! session should end. Service failures are reported to the user here and
//! never reach the store.

use super::choose::{choose, Choice};
use super::SessionError;
use crate::console::{Console, Style};
use crate::prompt::{ActionId, Listing};
use crate::store::{Action, CityUpdate, DegreeUnit, Profile, Store, TransactionLogEntry};
use crate::weather::{
    selectable_locations, GeoLocation, GeocodingClient, WeatherClient, WeatherReport,
};
use chrono::{SecondsFormat, Utc};

/// Outcome of the city search-and-select flow
enum CitySearch {
    Picked(GeoLocation),
    /// Nothing to do; the user has already been told why
    Nothing,
    InputClosed,
}

/// Coordinates to look up, plus how to describe them
struct Place<'a> {
    name: &'a str,
    latitude: f64,
    longitude: f64,
    timezone: &'a str,
}

pub struct ActionDispatcher<W, G> {
    weather: W,
    geocoding: G,
}

impl<W, G> ActionDispatcher<W, G>
where
    W: WeatherClient,
    G: GeocodingClient,
{
    pub fn new(weather: W, geocoding: G) -> Self {
        Self { weather, geocoding }
    }

    /// `profile` is the active profile at the time of the call. Handlers that
    /// mutate the store read their confirmation back from the store.
    pub async fn dispatch<C>(
        &self,
        action: &ActionId,
        profile: &Profile,
        store: &mut Store,
        console: &mut C,
    ) -> Result<bool, SessionError>
    where
        C: Console + ?Sized,
    {
        tracing::debug!(action = action.name(), "Dispatching action");

        match action {
            ActionId::WeatherHome => {
                let home = Place {
                    name: &profile.city,
                    latitude: profile.latitude,
                    longitude: profile.longitude,
                    timezone: &profile.timezone,
                };
                self.report_weather(
                    &home,
                    profile.default_degree,
                    "Error getting weather data for your home location",
                    store,
                    console,
                )
                .await;
                Ok(false)
            }

            ActionId::WeatherOther => match self.search_city(console).await? {
                CitySearch::Picked(location) => {
                    let place = Place {
                        name: &location.name,
                        latitude: location.latitude,
                        longitude: location.longitude,
                        timezone: timezone_or(&location, profile),
                    };
                    self.report_weather(
                        &place,
                        profile.default_degree,
                        "Error getting weather data for the location",
                        store,
                        console,
                    )
                    .await;
                    Ok(false)
                }
                CitySearch::Nothing => Ok(false),
                CitySearch::InputClosed => Ok(true),
            },

            ActionId::SetCelsius => {
                set_degree_unit(DegreeUnit::Celsius, store, console);
                Ok(false)
            }

            ActionId::SetFahrenheit => {
                set_degree_unit(DegreeUnit::Fahrenheit, store, console);
                Ok(false)
            }

            ActionId::ChangeCity => match self.search_city(console).await? {
                CitySearch::Picked(location) => {
                    let timezone = timezone_or(&location, profile).to_string();
                    store.dispatch(Action::UpdateCity(CityUpdate {
                        city: location.name,
                        country: location.country,
                        latitude: location.latitude,
                        longitude: location.longitude,
                        timezone,
                    }));
                    // Confirm from the store, not from the local copy
                    if let Some(updated) = store.active_profile() {
                        console.emit(
                            Style::Info,
                            &format!(
                                "Home location set to: {}, {} ({})",
                                updated.city, updated.country, updated.timezone
                            ),
                        );
                    }
                    Ok(false)
                }
                CitySearch::Nothing => Ok(false),
                CitySearch::InputClosed => Ok(true),
            },

            ActionId::ViewLog => {
                show_log(store, console);
                Ok(false)
            }

            ActionId::Exit => Ok(true),

            ActionId::Inert(name) => {
                tracing::debug!(action = %name, "Ignoring inert action");
                Ok(false)
            }
        }
    }

    async fn report_weather<C>(
        &self,
        place: &Place<'_>,
        unit: DegreeUnit,
        failure_message: &str,
        store: &mut Store,
        console: &mut C,
    ) where
        C: Console + ?Sized,
    {
        let result = self
            .weather
            .fetch_current(place.latitude, place.longitude, place.timezone, unit)
            .await;

        match result {
            Ok(reading) => {
                let report = WeatherReport {
                    place: place.name.to_string(),
                    timezone: place.timezone.to_string(),
                    reading,
                };
                let summary = report.summary();
                store.dispatch(Action::AppendLogEntry(TransactionLogEntry {
                    timestamp: Utc::now(),
                    weather_summary: summary.clone(),
                }));
                console.emit(Style::Reading(report.severity()), &summary);
            }
            Err(e) => {
                tracing::warn!(
                    place = place.name,
                    kind = e.kind.as_str(),
                    error = %e,
                    "Weather lookup failed"
                );
                console.emit(Style::Error, failure_message);
            }
        }
    }

    async fn search_city<C>(&self, console: &mut C) -> Result<CitySearch, SessionError>
    where
        C: Console + ?Sized,
    {
        let Some(name) = console
            .ask_line("Please enter the name of the city: ")
            .await?
        else {
            return Ok(CitySearch::InputClosed);
        };
        let name = name.trim();

        let candidates = if name.is_empty() {
            Vec::new()
        } else {
            match self.geocoding.search(name).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(query = name, kind = e.kind.as_str(), error = %e, "City search failed");
                    console.emit(
                        Style::Error,
                        "Error searching for cities. Please try again.",
                    );
                    return Ok(CitySearch::Nothing);
                }
            }
        };

        let cities = selectable_locations(candidates);
        if cities.is_empty() {
            console.emit(
                Style::Error,
                "Could not find any matching cities. Please check the entered city name.",
            );
            return Ok(CitySearch::Nothing);
        }

        console.emit(Style::Data, &format!("Found {} cities.", cities.len()));
        let listing = Listing::from_labels(cities.iter().map(GeoLocation::display_label));
        let picked = match choose(console, &listing, "Enter your response: ").await? {
            Choice::Row(index) => cities
                .into_iter()
                .nth(index)
                .map_or(CitySearch::Nothing, CitySearch::Picked),
            Choice::Exit => CitySearch::Nothing,
            Choice::Closed => CitySearch::InputClosed,
        };
        Ok(picked)
    }
}

fn timezone_or<'a>(location: &'a GeoLocation, profile: &'a Profile) -> &'a str {
    if location.timezone.trim().is_empty() {
        &profile.timezone
    } else {
        &location.timezone
    }
}

fn set_degree_unit<C>(unit: DegreeUnit, store: &mut Store, console: &mut C)
where
    C: Console + ?Sized,
{
    store.dispatch(Action::SetDegreeUnit(unit));
    // Read back through the store so any normalization there is what we report
    if let Some(profile) = store.active_profile() {
        console.emit(
            Style::Info,
            &format!("Temperature Unit Set to: {}", profile.default_degree),
        );
    }
}

fn show_log<C>(store: &Store, console: &mut C)
where
    C: Console + ?Sized,
{
    let state = store.get_state();
    if state.transaction_log.is_empty() {
        console.emit(Style::Info, "No weather lookups recorded yet.");
        return;
    }
    let lines: Vec<String> = state
        .transaction_log
        .iter()
        .map(|entry| {
            format!(
                "{}: {}",
                entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                entry.weather_summary
            )
        })
        .collect();
    console.emit(Style::Data, &lines.join("\n"));
}
