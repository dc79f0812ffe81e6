//! Rule-based reply resolution for the chat widget
//!
//! A reply is produced by trying each intent in a fixed order and taking the
//! first one that answers:
//!
//! 1. weather lookups (`weather in London`)
//! 2. unit conversions (`5 km to mi`)
//! 3. arithmetic (`what is 12 + 7`)
//! 4. knowledge categories (greetings, about, time, jokes)
//! 5. a random fallback line
pub mod arithmetic;
pub mod convert;
pub mod knowledge;

use crate::config::BotConfig;
use crate::weather::{OpenWeatherClient, WeatherSource, format_report};
use knowledge::{FALLBACK, Reply};
use once_cell::sync::Lazy;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use regex::Regex;
use std::sync::{Arc, Mutex};

pub const WEATHER_NOT_FOUND: &str =
    "I couldn't find the weather for that location. Please check the city name and try again.";
pub const WEATHER_NEEDS_CITY: &str = "Please specify a city name. For example: 'weather in London' or 'how's the weather in Tokyo'";

#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Failed to format the current time: {0}")]
    Clock(#[from] time::error::Format),

    #[error("Reply randomness unavailable: {0}")]
    Rng(String),
}

pub type BotResult<T> = Result<T, BotError>;

static WEATHER_CITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:how'?s?\s+the\s+)?(?:weather|temperature|forecast)\s+in\s+(\w+)")
        .expect("weather city pattern is valid")
});

static WEATHER_KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)weather|temperature|forecast").expect("weather keyword pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
enum WeatherIntent {
    City(String),
    MissingCity,
}

fn weather_intent(input: &str) -> Option<WeatherIntent> {
    if let Some(city) = WEATHER_CITY_PATTERN
        .captures(input)
        .and_then(|captures| captures.get(1))
    {
        return Some(WeatherIntent::City(city.as_str().to_string()));
    }
    WEATHER_KEYWORD_PATTERN
        .is_match(input)
        .then_some(WeatherIntent::MissingCity)
}

/// Formats a number the way the chat prints it: integral values without a
/// fractional part, everything else as the shortest round-trip decimal.
/// Large values are written out in full, never in exponent form.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Maps free-text input to a reply. Cheap to clone; clones share the weather
/// client and the random source.
#[derive(Clone)]
pub struct Responder {
    weather: Arc<dyn WeatherSource>,
    rng: Arc<Mutex<StdRng>>,
}

impl Responder {
    pub fn new(weather: Arc<dyn WeatherSource>) -> Self {
        Self::with_rng(weather, StdRng::from_entropy())
    }

    /// Deterministic reply selection, for tests and reproducible sessions.
    pub fn seeded(weather: Arc<dyn WeatherSource>, seed: u64) -> Self {
        Self::with_rng(weather, StdRng::seed_from_u64(seed))
    }

    fn with_rng(weather: Arc<dyn WeatherSource>, rng: StdRng) -> Self {
        Self {
            weather,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        let client = OpenWeatherClient::new(
            config.weather_endpoint.clone(),
            config.weather_api_key.clone().unwrap_or_default(),
        );
        let weather: Arc<dyn WeatherSource> = Arc::new(client);
        match config.seed {
            Some(seed) => Self::seeded(weather, seed),
            None => Self::new(weather),
        }
    }

    pub async fn respond(&self, input: &str) -> BotResult<String> {
        match weather_intent(input) {
            Some(WeatherIntent::City(city)) => {
                tracing::debug!(%city, "weather intent");
                return Ok(self.weather_report(&city).await);
            }
            Some(WeatherIntent::MissingCity) => {
                tracing::debug!("weather intent without city");
                return Ok(WEATHER_NEEDS_CITY.to_string());
            }
            None => {}
        }

        if let Some(reply) = convert::convert_units(input) {
            tracing::debug!("unit conversion intent");
            return Ok(reply);
        }

        if let Some(reply) = arithmetic::answer(input) {
            tracing::debug!("arithmetic intent");
            return Ok(reply);
        }

        let lowercase = input.to_lowercase();
        if let Some(category) = knowledge::find_category(&lowercase) {
            tracing::debug!(category = category.name, "knowledge intent");
            return self.pick(category.replies)?.render();
        }

        tracing::debug!("no intent matched, using fallback");
        self.pick(FALLBACK)?.render()
    }

    async fn weather_report(&self, city: &str) -> String {
        let lookup = match self.weather.current(city).await {
            Ok(data) => format_report(&data),
            Err(err) => Err(err),
        };
        lookup.unwrap_or_else(|err| {
            tracing::warn!(%city, "weather lookup failed: {}", err);
            WEATHER_NOT_FOUND.to_string()
        })
    }

    fn pick(&self, replies: &'static [Reply]) -> BotResult<&'static Reply> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Rng(e.to_string()))?;
        replies
            .choose(&mut *rng)
            .ok_or_else(|| BotError::Rng("empty reply list".to_string()))
    }
}
