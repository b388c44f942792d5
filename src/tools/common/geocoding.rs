//! City name to coordinates via Open-Meteo geocoding

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::super::tool::{ParamSpec, ParamType, Tool};
use crate::http::HttpFetcher;

const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

#[derive(Debug, Deserialize)]
struct CityInput {
    city: String,
}

/// `city_to_coords(city)`: best match name, country, latitude, longitude
pub struct CityToCoordsTool {
    http: HttpFetcher,
    base_url: String,
}

impl CityToCoordsTool {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for CityToCoordsTool {
    fn name(&self) -> &str {
        "city_to_coords"
    }

    fn description(&self) -> &str {
        "Convert a city name to latitude/longitude using Open-Meteo geocoding API."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("city", ParamType::String)]
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        let input: CityInput = serde_json::from_value(args.clone())
            .map_err(|e| anyhow::anyhow!("Invalid city_to_coords input: {}", e))?;

        let url = format!("{}/v1/search", self.base_url);
        let body = self
            .http
            .get_json(
                &url,
                &[
                    ("name", input.city.clone()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let best = body
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first());

        let Some(loc) = best else {
            tracing::info!("No geocoding match for '{}'", input.city);
            return Ok(json!({
                "error": format!("City '{}' not found. Try a more specific name.", input.city)
            }));
        };

        Ok(json!({
            "city": loc.get("name"),
            "country": loc.get("country"),
            "latitude": loc.get("latitude"),
            "longitude": loc.get("longitude"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{extract::Query, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn search(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        if q.get("name").map(String::as_str) == Some("London") {
            Json(json!({
                "results": [{
                    "name": "London",
                    "country": "United Kingdom",
                    "latitude": 51.50853,
                    "longitude": -0.12574,
                    "population": 8961989
                }]
            }))
        } else {
            Json(json!({"generationtime_ms": 0.5}))
        }
    }

    async fn tool() -> CityToCoordsTool {
        let base = serve(Router::new().route("/v1/search", get(search))).await;
        CityToCoordsTool::new(HttpFetcher::new().unwrap()).with_base_url(base)
    }

    #[tokio::test]
    async fn test_city_found() {
        let out = tool().await.execute(&json!({"city": "London"})).await.unwrap();
        assert_eq!(
            out,
            json!({
                "city": "London",
                "country": "United Kingdom",
                "latitude": 51.50853,
                "longitude": -0.12574
            })
        );
    }

    #[tokio::test]
    async fn test_city_not_found_is_a_payload() {
        let out = tool()
            .await
            .execute(&json!({"city": "Atlantis"}))
            .await
            .unwrap();
        assert_eq!(
            out["error"],
            "City 'Atlantis' not found. Try a more specific name."
        );
    }
}
