use async_trait::async_trait;
use serde::Deserialize;

pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected weather payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather payload has no conditions")]
    MissingCondition,
}

// OpenWeatherMap current-weather response (only the fields we render)
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WeatherData {
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: f64,
    pub feels_like: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Condition {
    pub description: String,
    pub main: String,
}

/// Anything that can answer "what is the weather in `city` right now".
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherData, WeatherError>;
}

/// Client for the OpenWeatherMap current-weather endpoint
pub struct OpenWeatherClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherData, WeatherError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { status, body });
        }

        Ok(serde_json::from_str::<WeatherData>(&body)?)
    }
}

/// Renders a successful lookup into the multi-line chat reply.
pub fn format_report(data: &WeatherData) -> Result<String, WeatherError> {
    let condition = data.weather.first().ok_or(WeatherError::MissingCondition)?;
    let temp = round_half_up(data.main.temp);
    let feels_like = round_half_up(data.main.feels_like);

    Ok(format!(
        "Current weather in {}:\n\
         🌡️ Temperature: {temp}°C (feels like {feels_like}°C)\n\
         💧 Humidity: {}%\n\
         🌥️ Conditions: {}",
        data.name,
        crate::bot::format_number(data.main.humidity),
        capitalize_first(&condition.description),
    ))
}

// Halves round towards positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    // f64::round sends negative halves away from zero
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
