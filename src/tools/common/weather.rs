//! Current weather via Open-Meteo (no API key needed)

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::super::tool::{lenient, ParamSpec, ParamType, Tool};
use crate::http::HttpFetcher;

const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Human-readable description of a WMO weather code
pub fn weather_description(code: i64) -> String {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Icy fog",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Heavy drizzle",
        61 => "Light rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Light snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        80 => "Rain showers",
        81 => "Heavy showers",
        95 => "Thunderstorm",
        other => return format!("Weather code {}", other),
    };
    text.to_string()
}

#[derive(Debug, Deserialize)]
struct WeatherInput {
    #[serde(deserialize_with = "lenient::f64")]
    latitude: f64,
    #[serde(deserialize_with = "lenient::f64")]
    longitude: f64,
}

/// `get_weather(latitude, longitude)`: temperature, weather description, wind speed
pub struct WeatherTool {
    http: HttpFetcher,
    base_url: String,
}

impl WeatherTool {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the tool at a different Open-Meteo host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Current weather at coordinates via Open-Meteo (no API key needed)."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("latitude", ParamType::Number),
            ParamSpec::required("longitude", ParamType::Number),
        ]
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        let input: WeatherInput = serde_json::from_value(args.clone())
            .map_err(|e| anyhow::anyhow!("Invalid get_weather input: {}", e))?;

        let url = format!("{}/v1/forecast", self.base_url);
        let body = self
            .http
            .get_json(
                &url,
                &[
                    ("latitude", input.latitude.to_string()),
                    ("longitude", input.longitude.to_string()),
                    (
                        "current",
                        "temperature_2m,weather_code,wind_speed_10m".to_string(),
                    ),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let mut current = match body.get("current") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        let code = current
            .get("weather_code")
            .and_then(|c| c.as_i64().or_else(|| c.as_f64().map(|f| f as i64)))
            .unwrap_or(0);
        current.insert(
            "description".to_string(),
            Value::String(weather_description(code)),
        );

        Ok(Value::Object(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn forecast(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "latitude": q["latitude"].parse::<f64>().unwrap(),
            "current": {
                "time": "2026-10-17T10:00",
                "temperature_2m": 17.4,
                "weather_code": 3,
                "wind_speed_10m": 12.1
            }
        }))
    }

    #[test]
    fn test_weather_codes() {
        assert_eq!(weather_description(0), "Clear sky");
        assert_eq!(weather_description(95), "Thunderstorm");
        assert_eq!(weather_description(99), "Weather code 99");
    }

    #[tokio::test]
    async fn test_get_weather_adds_description() {
        let base = serve(Router::new().route("/v1/forecast", get(forecast))).await;
        let tool = WeatherTool::new(HttpFetcher::new().unwrap()).with_base_url(base);

        let out = tool
            .execute(&json!({"latitude": 37.7749, "longitude": -122.4194}))
            .await
            .unwrap();

        assert_eq!(out["temperature_2m"], 17.4);
        assert_eq!(out["wind_speed_10m"], 12.1);
        assert_eq!(out["description"], "Overcast");
    }

    #[tokio::test]
    async fn test_get_weather_rejects_missing_coordinates() {
        let tool = WeatherTool::new(HttpFetcher::new().unwrap()).with_base_url("http://unused");
        let err = tool.execute(&json!({"latitude": 1.0})).await.unwrap_err();
        assert!(err.to_string().contains("Invalid get_weather input"));
    }
}
