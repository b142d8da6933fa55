//! HTTP API tests against a running server.

use std::io::Write;

use colorful_streets::config::{AppConfig, RuleConfig};
use colorful_streets::http::handlers::{Classification, Legend, StylesResponse, SystemStatus};
use colorful_streets::map::MapDocument;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_classify_endpoint() {
    let server = common::start_server(AppConfig::default()).await;
    let client = reqwest::Client::new();

    for (name, expected) in [
        ("Bautzner Straße", "#84a883"),
        ("Hauptstraße", "#84acd1"),
        ("Irgendweg", "#654d29"),
        ("Am Hang", "#999999"),
        ("", "#000000"),
    ] {
        let res = client
            .get(server.url("/api/classify"))
            .query(&[("name", name)])
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let body: Classification = res.json().await.unwrap();
        assert_eq!(body.name, name);
        assert_eq!(body.color.to_string(), expected, "wrong color for {name:?}");
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_classify_requires_name() {
    let server = common::start_server(AppConfig::default()).await;

    let res = reqwest::get(server.url("/api/classify")).await.unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "missing query parameter: name");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_layer_styles() {
    let server = common::start_server(AppConfig::default()).await;
    let client = reqwest::Client::new();

    // Background is layer 0, streets layer 1.
    let res = client
        .post(server.url("/api/layers/1/styles"))
        .json(&json!({ "names": ["Carolabrücke", "Rosengasse", "Wilsdruffer Tor"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: StylesResponse = res.json().await.unwrap();
    assert_eq!(body.styles.len(), 3);
    let bridge = body.styles["Carolabrücke"].unwrap();
    assert_eq!(bridge.color.to_string(), "#b55400");
    assert_eq!(bridge.width, 4.0);
    assert_eq!(body.styles["Rosengasse"].unwrap().color.to_string(), "#d0c000");
    assert_eq!(body.styles["Wilsdruffer Tor"].unwrap().color.to_string(), "#000000");

    // Raster and missing layers have no styles.
    for layer in [0, 9] {
        let res = client
            .post(server.url(&format!("/api/layers/{}/styles", layer)))
            .json(&json!({ "names": ["Irgendweg"] }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 404);
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_map_document_and_page() {
    let mut config = AppConfig::default();
    config.background.opacity = 0.5;
    let server = common::start_server(config).await;

    let doc: MapDocument = reqwest::get(server.url("/api/map")).await.unwrap().json().await.unwrap();
    assert_eq!(doc.target, "map");
    assert_eq!(doc.view.zoom, 12.0);
    assert_eq!(doc.layers.len(), 2);

    let res = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = res.text().await.unwrap();
    assert!(html.contains("ol.format.OSMXML"));
    assert!(html.contains(r#""opacity":0.5"#));
    assert!(html.contains("/data/Dresden-clipped-highways.osm"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_legend_and_status() {
    let server = common::start_server(AppConfig::default()).await;

    let legend: Legend = reqwest::get(server.url("/api/legend")).await.unwrap().json().await.unwrap();
    assert_eq!(legend.rules.len(), 16);
    assert_eq!(legend.rules[0].priority, 1);
    assert_eq!(legend.rules[0].pattern, "er? Straße$");
    assert_eq!(legend.rules[14].color.to_string(), "#555555");
    assert_eq!(legend.default_color.to_string(), "#000000");

    let status: SystemStatus = reqwest::get(server.url("/api/status")).await.unwrap().json().await.unwrap();
    assert_eq!(status.status, "operational");
    assert_eq!(status.rules, 16);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_data_file_served() {
    let mut file = tempfile::Builder::new().suffix(".osm").tempfile().unwrap();
    write!(file, r#"<?xml version="1.0"?><osm version="0.6"></osm>"#).unwrap();
    let file_name = file.path().file_name().unwrap().to_str().unwrap().to_string();

    let mut config = AppConfig::default();
    config.vectors.data_file = file.path().to_str().unwrap().to_string();
    let server = common::start_server(config).await;

    let res = reqwest::get(server.url(&format!("/data/{}", file_name))).await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.text().await.unwrap().contains("<osm version=\"0.6\">"));

    let res = reqwest::get(server.url("/data/other.osm")).await.unwrap();
    assert_eq!(res.status(), 404);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_header() {
    let server = common::start_server(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/status")).send().await.unwrap();
    let id = res.headers().get("x-request-id").expect("request id header");
    assert_eq!(id.to_str().unwrap().len(), 36);

    let res = client
        .get(server.url("/api/status"))
        .header("x-request-id", "from-upstream")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers().get("x-request-id").unwrap(), "from-upstream");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_reload_swaps_rules() {
    let server = common::start_server(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let color_of = |name: &'static str| {
        let client = client.clone();
        let url = server.url("/api/classify");
        async move {
            let res = client.get(url).query(&[("name", name)]).send().await.unwrap();
            res.json::<Classification>().await.unwrap().color.to_string()
        }
    };

    assert_eq!(color_of("Irgendweg").await, "#654d29");

    let mut config = AppConfig::default();
    config.classifier.rules = vec![RuleConfig {
        pattern: "weg$".into(),
        color: "#ff0000".into(),
    }];
    config.classifier.default_color = "#00ff00".into();
    server.config_updates.send(config).unwrap();

    assert!(
        common::eventually(|| {
            let color = color_of("Irgendweg");
            async move { color.await == "#ff0000" }
        })
        .await
    );
    assert_eq!(color_of("Hauptstraße").await, "#00ff00");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let server = common::start_server(AppConfig::default()).await;
    assert_eq!(reqwest::get(server.url("/api/status")).await.unwrap().status(), 200);

    server.shutdown.trigger();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
