//! Nutritionix API integration for food search and nutrient lookup.
//!
//! Two endpoints are used: instant search (name candidates for a query) and
//! natural-language nutrients (macro breakdown for "100g banana" style
//! descriptions). Zero search results is a normal outcome; zero nutrient
//! matches is a distinct, user-visible NotFound.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const NUTRITIONIX_API_BASE: &str = "https://trackapi.nutritionix.com/v2";
const REMOTE_USER_ID: &str = "0";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NutritionError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("Failed to fetch nutritional information: {0}")]
  Lookup(String),

  #[error("No nutritional information found for this food")]
  NotFound,

  #[error("Parse error: {0}")]
  Parse(String),
}

impl From<reqwest::Error> for NutritionError {
  fn from(e: reqwest::Error) -> Self {
    NutritionError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// API Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct InstantSearchResponse {
  #[serde(default)]
  common: Vec<CommonFood>,
}

#[derive(Debug, Deserialize)]
struct CommonFood {
  food_name: String,
  photo: Option<FoodPhoto>,
}

#[derive(Debug, Deserialize)]
struct FoodPhoto {
  thumb: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
  #[serde(default)]
  foods: Vec<NutrientFields>,
}

/// Raw nf_* fields as returned by the API (fractional grams/milligrams)
#[derive(Debug, Default, Deserialize)]
struct NutrientFields {
  #[serde(default)]
  nf_calories: Option<f64>,
  #[serde(default)]
  nf_protein: Option<f64>,
  #[serde(default)]
  nf_total_carbohydrate: Option<f64>,
  #[serde(default)]
  nf_total_fat: Option<f64>,
  #[serde(default)]
  nf_saturated_fat: Option<f64>,
  #[serde(default)]
  nf_cholesterol: Option<f64>,
  #[serde(default)]
  nf_sodium: Option<f64>,
  #[serde(default)]
  nf_dietary_fiber: Option<f64>,
  #[serde(default)]
  nf_sugars: Option<f64>,
}

/// A food-name candidate from instant search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCandidate {
  pub food_name: String,
  pub photo_thumb: Option<String>,
}

/// Nutrient breakdown for one lookup, rounded to whole units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientInfo {
  pub calories: i64,
  pub protein: i64,
  pub carbs: i64,
  pub fats: i64,
  pub saturated_fat: i64,
  pub cholesterol: i64, // mg
  pub sodium: i64,      // mg
  pub fiber: i64,
  pub sugars: i64,
}

impl From<NutrientFields> for NutrientInfo {
  fn from(f: NutrientFields) -> Self {
    let round = |v: Option<f64>| v.unwrap_or(0.0).round() as i64;
    Self {
      calories: round(f.nf_calories),
      protein: round(f.nf_protein),
      carbs: round(f.nf_total_carbohydrate),
      fats: round(f.nf_total_fat),
      saturated_fat: round(f.nf_saturated_fat),
      cholesterol: round(f.nf_cholesterol),
      sodium: round(f.nf_sodium),
      fiber: round(f.nf_dietary_fiber),
      sugars: round(f.nf_sugars),
    }
  }
}

/// Build the natural-language query for a quantity in grams,
/// e.g. `nutrient_query(100.0, "banana")` -> `"100g banana"`.
pub fn nutrient_query(quantity: f64, food: &str) -> String {
  if quantity.fract() == 0.0 {
    format!("{}g {}", quantity as i64, food)
  } else {
    format!("{}g {}", quantity, food)
  }
}

/// ---------------------------------------------------------------------------
/// Nutritionix Client
/// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct NutritionixClient {
  client: Client,
  app_id: String,
  api_key: String,
  base_url: String,
}

impl NutritionixClient {
  /// Create a client, loading credentials from the environment
  pub fn from_env() -> Result<Self, NutritionError> {
    let app_id = env::var("NUTRITIONIX_APP_ID")
      .map_err(|_| NutritionError::MissingConfig("NUTRITIONIX_APP_ID".into()))?;
    let api_key = env::var("NUTRITIONIX_API_KEY")
      .map_err(|_| NutritionError::MissingConfig("NUTRITIONIX_API_KEY".into()))?;

    Ok(Self::new(app_id, api_key))
  }

  pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      client: Client::new(),
      app_id: app_id.into(),
      api_key: api_key.into(),
      base_url: NUTRITIONIX_API_BASE.to_string(),
    }
  }

  /// Client pointed at an alternate base URL (used by tests)
  pub fn with_base_url(
    app_id: impl Into<String>,
    api_key: impl Into<String>,
    base_url: impl Into<String>,
  ) -> Self {
    Self {
      base_url: base_url.into(),
      ..Self::new(app_id, api_key)
    }
  }

  fn auth_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    request
      .header("x-app-id", &self.app_id)
      .header("x-app-key", &self.api_key)
      .header("x-remote-user-id", REMOTE_USER_ID)
  }

  /// Instant search: food-name candidates for a free-text query.
  /// Zero results is Ok(empty), not an error.
  pub async fn search(&self, query: &str) -> Result<Vec<FoodCandidate>, NutritionError> {
    let url = format!("{}/search/instant", self.base_url);
    let response = self
      .auth_headers(self.client.get(&url).query(&[("query", query)]))
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(NutritionError::Lookup(format!(
        "HTTP {}",
        response.status()
      )));
    }

    let body: InstantSearchResponse = response
      .json()
      .await
      .map_err(|e| NutritionError::Parse(e.to_string()))?;

    Ok(
      body
        .common
        .into_iter()
        .map(|item| FoodCandidate {
          food_name: item.food_name,
          photo_thumb: item.photo.and_then(|p| p.thumb),
        })
        .collect(),
    )
  }

  /// Natural-language nutrient lookup for a description like "100g banana".
  /// Errors with NotFound when the API matches no foods.
  pub async fn nutrients(&self, query: &str) -> Result<NutrientInfo, NutritionError> {
    let url = format!("{}/natural/nutrients", self.base_url);
    let response = self
      .auth_headers(self.client.post(&url))
      .json(&serde_json::json!({ "query": query }))
      .send()
      .await?;

    if !response.status().is_success() {
      return Err(NutritionError::Lookup(format!(
        "HTTP {}",
        response.status()
      )));
    }

    let body: NutrientsResponse = response
      .json()
      .await
      .map_err(|e| NutritionError::Parse(e.to_string()))?;

    let first = body.foods.into_iter().next().ok_or(NutritionError::NotFound)?;
    Ok(first.into())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn test_client(server: &mockito::ServerGuard) -> NutritionixClient {
    NutritionixClient::with_base_url("test-app", "test-key", server.url())
  }

  #[tokio::test]
  async fn test_search_parses_candidates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("GET", "/search/instant?query=banana")
      .match_header("x-app-id", "test-app")
      .match_header("x-app-key", "test-key")
      .with_status(200)
      .with_body(
        r#"{"common":[
          {"food_name":"banana","photo":{"thumb":"https://img.example/banana.jpg"}},
          {"food_name":"banana bread","photo":null}
        ]}"#,
      )
      .create_async()
      .await;

    let results = test_client(&server).search("banana").await.unwrap();
    mock.assert_async().await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].food_name, "banana");
    assert_eq!(
      results[0].photo_thumb.as_deref(),
      Some("https://img.example/banana.jpg")
    );
    assert!(results[1].photo_thumb.is_none());
  }

  #[tokio::test]
  async fn test_search_zero_results_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/search/instant?query=xyzzy")
      .with_status(200)
      .with_body(r#"{"common":[]}"#)
      .create_async()
      .await;

    let results = test_client(&server).search("xyzzy").await.unwrap();
    assert!(results.is_empty());
  }

  #[tokio::test]
  async fn test_search_non_success_status_is_lookup_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("GET", "/search/instant?query=banana")
      .with_status(401)
      .with_body(r#"{"message":"unauthorized"}"#)
      .create_async()
      .await;

    let err = test_client(&server).search("banana").await.unwrap_err();
    assert!(matches!(err, NutritionError::Lookup(_)));
  }

  #[tokio::test]
  async fn test_nutrients_rounds_api_values() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/natural/nutrients")
      .match_header("x-remote-user-id", "0")
      .with_status(200)
      .with_body(
        r#"{"foods":[{
          "nf_calories":104.9,"nf_protein":1.3,"nf_total_carbohydrate":26.95,
          "nf_total_fat":0.4,"nf_saturated_fat":0.1,"nf_cholesterol":0,
          "nf_sodium":1.2,"nf_dietary_fiber":3.1,"nf_sugars":14.4
        }]}"#,
      )
      .create_async()
      .await;

    let info = test_client(&server).nutrients("100g banana").await.unwrap();
    assert_eq!(info.calories, 105);
    assert_eq!(info.protein, 1);
    assert_eq!(info.carbs, 27);
    assert_eq!(info.fats, 0);
    assert_eq!(info.fiber, 3);
    assert_eq!(info.sugars, 14);
  }

  #[tokio::test]
  async fn test_nutrients_missing_fields_default_to_zero() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/natural/nutrients")
      .with_status(200)
      .with_body(r#"{"foods":[{"nf_calories":50}]}"#)
      .create_async()
      .await;

    let info = test_client(&server).nutrients("10g sugar").await.unwrap();
    assert_eq!(info.calories, 50);
    assert_eq!(info.protein, 0);
    assert_eq!(info.sodium, 0);
  }

  #[tokio::test]
  async fn test_nutrients_zero_foods_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/natural/nutrients")
      .with_status(200)
      .with_body(r#"{"foods":[]}"#)
      .create_async()
      .await;

    let err = test_client(&server).nutrients("100g unobtainium").await.unwrap_err();
    assert!(matches!(err, NutritionError::NotFound));
  }

  #[tokio::test]
  async fn test_nutrients_non_success_status_is_lookup_error() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/natural/nutrients")
      .with_status(500)
      .create_async()
      .await;

    let err = test_client(&server).nutrients("100g banana").await.unwrap_err();
    assert!(matches!(err, NutritionError::Lookup(_)));
  }

  #[test]
  fn test_nutrient_query_formats_grams() {
    assert_eq!(nutrient_query(100.0, "banana"), "100g banana");
    assert_eq!(nutrient_query(62.5, "oats"), "62.5g oats");
  }

  #[test]
  #[serial]
  fn test_from_env_requires_credentials() {
    temp_env::with_vars(
      [
        ("NUTRITIONIX_APP_ID", None::<&str>),
        ("NUTRITIONIX_API_KEY", None::<&str>),
      ],
      || {
        let err = NutritionixClient::from_env().unwrap_err();
        assert!(matches!(err, NutritionError::MissingConfig(_)));
      },
    );

    temp_env::with_vars(
      [
        ("NUTRITIONIX_APP_ID", Some("id")),
        ("NUTRITIONIX_API_KEY", Some("key")),
      ],
      || {
        assert!(NutritionixClient::from_env().is_ok());
      },
    );
  }
}
