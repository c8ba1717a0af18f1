//! Weather lookup against a wttr.in-style JSON endpoint.

use serde::Deserialize;
use std::time::Duration;

use crate::error::{LumenError, LumenResult};

/// Current conditions for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: String,
    pub feels_like_c: String,
    pub humidity: String,
    pub condition: String,
}

impl WeatherReport {
    /// City with its first letter upper-cased
    pub fn title(&self) -> String {
        let mut chars = self.city.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn description(&self) -> String {
        format!(
            "Temperature: {}°C | Feels like: {}°C | Humidity: {}%",
            self.temperature_c, self.feels_like_c, self.humidity
        )
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current_condition: Vec<CurrentCondition>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "FeelsLikeC")]
    feels_like_c: String,
    humidity: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<DescValue>,
}

#[derive(Debug, Deserialize)]
struct DescValue {
    value: String,
}

/// Match `<keyword> <city>` against the configured keywords (case-insensitive)
pub fn parse_query<'a>(query: &'a str, keywords: &[String]) -> Option<&'a str> {
    let (keyword, rest) = query.split_once(char::is_whitespace)?;
    let keyword = keyword.to_lowercase();
    if !keywords.iter().any(|k| k.to_lowercase() == keyword) {
        return None;
    }

    let city = rest.trim();
    if city.is_empty() {
        None
    } else {
        Some(city)
    }
}

/// HTTP client for weather lookups with a hard time budget
#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Look up the current weather; times out after the configured budget
    pub async fn lookup(&self, city: &str) -> LumenResult<WeatherReport> {
        match tokio::time::timeout(self.timeout, self.fetch(city)).await {
            Ok(result) => result,
            Err(_) => Err(LumenError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    async fn fetch(&self, city: &str) -> LumenResult<WeatherReport> {
        let url = format!("{}/{}?format=j1", self.base_url, urlencoding::encode(city));

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: WeatherResponse = response.json().await?;

        let current = body
            .current_condition
            .into_iter()
            .next()
            .ok_or_else(|| LumenError::Response("empty current_condition".to_string()))?;
        let condition = current
            .weather_desc
            .into_iter()
            .next()
            .map(|d| d.value)
            .ok_or_else(|| LumenError::Response("empty weatherDesc".to_string()))?;

        Ok(WeatherReport {
            city: city.to_string(),
            temperature_c: current.temp_c,
            feels_like_c: current.feels_like_c,
            humidity: current.humidity,
            condition,
        })
    }
}
