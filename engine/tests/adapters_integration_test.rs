//! Integration tests for the provider adapters
//!
//! Each adapter talks to a wiremock server standing in for the real
//! service. Every failure mode must come back as `None`, never an error.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use sdk::{DataSource, LocationQuery};
use storymap_engine::adapters::{
    GroqAdapter, Message, OpenWeatherAdapter, RecommendationProvider, SearchDepth, SearchProvider,
    SearchRequest, SimilarKind, SimilarRequest, TasteDiveAdapter, TavilyAdapter, TextGenerator,
    WeatherProvider,
};
use storymap_engine::config::{
    RecommendationConfig, SearchConfig, TextGenerationConfig, WeatherConfig,
};
use storymap_engine::secrets::SecretString;

fn key() -> Option<SecretString> {
    Some(SecretString::new("test-key"))
}

fn tavily(server: &MockServer) -> TavilyAdapter {
    TavilyAdapter::new(
        SearchConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        key(),
    )
}

fn tastedive(server: &MockServer) -> TasteDiveAdapter {
    TasteDiveAdapter::new(
        RecommendationConfig {
            base_url: server.uri(),
            timeout_ms: 500,
            ..Default::default()
        },
        key(),
    )
}

fn openweather(server: &MockServer) -> OpenWeatherAdapter {
    OpenWeatherAdapter::new(
        WeatherConfig {
            base_url: server.uri(),
            timeout_ms: 500,
            ..Default::default()
        },
        key(),
    )
}

fn groq(server: &MockServer) -> GroqAdapter {
    GroqAdapter::new(
        TextGenerationConfig {
            base_url: server.uri(),
            timeout_ms: 500,
            ..Default::default()
        },
        key(),
    )
}

fn search_request() -> SearchRequest {
    SearchRequest::new("Hobart Australia history", Duration::from_millis(500))
}

fn music_request() -> SimilarRequest {
    SimilarRequest {
        query: "Hobart Australia music".to_string(),
        subject: "Hobart".to_string(),
        kind: SimilarKind::Music,
        limit: 8,
        info: true,
    }
}

#[tokio::test]
async fn test_search_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "api_key": "test-key",
            "search_depth": "advanced",
            "include_answer": true,
            "max_results": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Hobart is the capital of Tasmania.",
            "results": [
                { "title": "Hobart", "content": "Founded in 1804.", "url": "https://example.com/hobart" },
                { "title": "Salamanca" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = search_request()
        .depth(SearchDepth::Advanced)
        .max_results(5);
    let outcome = tavily(&server)
        .search(&request)
        .await
        .expect("search should succeed");

    assert_eq!(
        outcome.answer.as_deref(),
        Some("Hobart is the capital of Tasmania.")
    );
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].text(), Some("Founded in 1804."));
    assert_eq!(outcome.results[1].text(), None);
}

#[tokio::test]
async fn test_search_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(tavily(&server).search(&search_request()).await.is_none());
}

#[tokio::test]
async fn test_search_missing_results_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Something" })))
        .mount(&server)
        .await;

    assert!(tavily(&server).search(&search_request()).await.is_none());
}

#[tokio::test]
async fn test_search_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "",
            "results": []
        })))
        .mount(&server)
        .await;

    assert!(tavily(&server).search(&search_request()).await.is_none());
}

#[tokio::test]
async fn test_search_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [{ "content": "late" }] }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let request = SearchRequest::new("slow", Duration::from_millis(100));
    assert!(tavily(&server).search(&request).await.is_none());
}

#[tokio::test]
async fn test_search_without_credential_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let adapter = TavilyAdapter::new(
        SearchConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        None,
    );

    assert!(!adapter.is_configured());
    assert!(adapter.search(&search_request()).await.is_none());
}

#[tokio::test]
async fn test_recommendations_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/similar"))
        .and(query_param("q", "Hobart Australia music"))
        .and(query_param("type", "music"))
        .and(query_param("limit", "8"))
        .and(query_param("k", "test-key"))
        .and(query_param("info", "1"))
        .and(header("User-Agent", "StoryMap.ai/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Similar": {
                "Info": [],
                "Results": [
                    {
                        "Name": "The Paper Kites",
                        "Type": "music",
                        "wTeaser": "x".repeat(400),
                        "wUrl": "https://example.com/paper-kites"
                    },
                    { "Name": "Vance Joy" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let records = tastedive(&server)
        .similar(&music_request())
        .await
        .expect("lookup should succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "The Paper Kites");
    assert_eq!(records[0].category, "music");
    assert_eq!(records[0].description.chars().count(), 303);
    assert!(records[0].description.ends_with("..."));
    assert_eq!(records[0].url.as_deref(), Some("https://example.com/paper-kites"));
    assert_eq!(records[0].data_source, DataSource::live("TasteDive API"));

    assert_eq!(records[1].category, "Music");
    assert_eq!(records[1].description, "Musical artist recommended for Hobart");
    assert!(records[1].url.is_none());
}

#[tokio::test]
async fn test_recommendations_empty_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/similar"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Similar": { "Results": [] } })),
        )
        .mount(&server)
        .await;

    assert!(tastedive(&server).similar(&music_request()).await.is_none());
}

#[tokio::test]
async fn test_recommendations_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/similar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    assert!(tastedive(&server).similar(&music_request()).await.is_none());
}

#[tokio::test]
async fn test_recommendations_forbidden() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/similar"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    assert!(tastedive(&server).similar(&music_request()).await.is_none());
}

#[tokio::test]
async fn test_weather_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "-42.8821"))
        .and(query_param("lon", "147.3272"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": { "temp": 14.6, "humidity": 71 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "wind": { "speed": 6.2 }
        })))
        .mount(&server)
        .await;

    let query = LocationQuery::new("Hobart").with_coordinates(-42.8821, 147.3272);
    let weather = openweather(&server)
        .current(&query)
        .await
        .expect("weather should succeed");

    assert_eq!(weather.location, "Hobart");
    assert_eq!(weather.temperature, 15);
    assert_eq!(weather.description, "light rain");
    assert_eq!(weather.humidity, 71);
    assert_eq!(weather.wind_speed, 6.2);
    assert_eq!(weather.icon.as_deref(), Some("10d"));
    assert_eq!(weather.data_source, DataSource::live("OpenWeatherMap"));
}

#[tokio::test]
async fn test_weather_defaults_to_centroid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "-25.2744"))
        .and(query_param("lon", "133.7751"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": { "temp": 30.2, "humidity": 20 },
            "weather": [{ "description": "clear sky" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let weather = openweather(&server)
        .current(&LocationQuery::new("Outback"))
        .await
        .expect("weather should succeed");

    assert_eq!(weather.temperature, 30);
    assert_eq!(weather.wind_speed, 0.0);
}

#[tokio::test]
async fn test_weather_without_conditions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": { "temp": 14.6, "humidity": 71 },
            "weather": []
        })))
        .mount(&server)
        .await;

    assert!(openweather(&server)
        .current(&LocationQuery::new("Hobart"))
        .await
        .is_none());
}

#[tokio::test]
async fn test_weather_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    assert!(openweather(&server)
        .current(&LocationQuery::new("Hobart"))
        .await
        .is_none());
}

#[tokio::test]
async fn test_text_generation_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "max_tokens": 300,
            "messages": [
                { "role": "system", "content": "Be brief." },
                { "role": "user", "content": "Tell me about Hobart." }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  Hobart sits on the Derwent.  " } }]
        })))
        .mount(&server)
        .await;

    let messages = [
        Message::system("Be brief."),
        Message::user("Tell me about Hobart."),
    ];
    let content = groq(&server).complete(&messages).await;

    assert_eq!(content.as_deref(), Some("Hobart sits on the Derwent."));
}

#[tokio::test]
async fn test_text_generation_empty_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "   " } }]
        })))
        .mount(&server)
        .await;

    assert!(groq(&server)
        .complete(&[Message::user("Hello")])
        .await
        .is_none());
}

#[tokio::test]
async fn test_text_generation_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    assert!(groq(&server)
        .complete(&[Message::user("Hello")])
        .await
        .is_none());
}

#[tokio::test]
async fn test_text_generation_without_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    assert!(groq(&server)
        .complete(&[Message::user("Hello")])
        .await
        .is_none());
}
