//! End-to-end tests for `QueryEngine::resolve` against temporary directories
//! and mocked HTTP endpoints.

use std::fs;
use std::path::Path;

use lumen::{Config, QueryEngine, ResultKind, ResultPayload};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Source directories for one test
struct Fixture {
    apps: TempDir,
    browser: TempDir,
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            apps: tempfile::tempdir().unwrap(),
            browser: tempfile::tempdir().unwrap(),
            home: tempfile::tempdir().unwrap(),
        }
    }

    fn add_app(&self, file: &str, name: &str, comment: &str) {
        fs::write(
            self.apps.path().join(file),
            format!(
                "[Desktop Entry]\nType=Application\nName={}\nComment={}\nIcon=app\n",
                name, comment
            ),
        )
        .unwrap();
    }

    fn add_bookmarks(&self, entries: &[(&str, &str)]) {
        let children: Vec<_> = entries
            .iter()
            .map(|(name, url)| serde_json::json!({ "type": "url", "name": name, "url": url }))
            .collect();
        let doc = serde_json::json!({
            "roots": {
                "bookmark_bar": { "type": "folder", "name": "Bar", "children": children }
            }
        });
        fs::write(
            self.browser.path().join("Bookmarks"),
            serde_json::to_string(&doc).unwrap(),
        )
        .unwrap();
    }

    fn add_file(&self, name: &str) {
        let docs = self.home.path().join("Documents");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join(name), b"").unwrap();
    }

    /// Config pointing every source at the fixture and every endpoint at
    /// `base_url` (a mock server, or a closed port)
    fn config(&self, base_url: &str) -> Config {
        let mut config = Config::default();
        config.sources.app_dirs = Some(vec![path_string(self.apps.path())]);
        config.sources.bookmark_files =
            Some(vec![path_string(&self.browser.path().join("Bookmarks"))]);
        config.sources.file_dirs = Some(vec![
            path_string(&self.home.path().join("Desktop")),
            path_string(&self.home.path().join("Documents")),
        ]);
        config.sources.icon_dirs = Some(Vec::new());
        config.network.weather_url = base_url.to_string();
        config.network.exchange_rate_url = format!("{}/v6/latest/USD", base_url);
        config.network.weather_timeout_ms = 500;
        config
    }
}

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

const OFFLINE: &str = "http://127.0.0.1:9";

fn engine(config: Config) -> QueryEngine {
    QueryEngine::new(config).unwrap()
}

fn weather_body() -> serde_json::Value {
    serde_json::json!({
        "current_condition": [{
            "temp_C": "12",
            "FeelsLikeC": "10",
            "humidity": "80",
            "weatherDesc": [{ "value": "Partly cloudy" }]
        }]
    })
}

#[tokio::test]
async fn weather_hit_returns_single_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/budapest"))
        .and(query_param("format", "j1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body()))
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    let mut config = fixture.config(&server.uri());
    // An alias for the very same text is ignored on a weather hit
    config
        .aliases
        .insert("weather budapest".to_string(), vec!["echo".to_string()]);
    config.validate();

    let results = engine(config).resolve("weather budapest").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), ResultKind::Weather);
    assert_eq!(results[0].title, "Budapest");
    assert_eq!(
        results[0].description,
        "Temperature: 12°C | Feels like: 10°C | Humidity: 80%"
    );
    assert_eq!(
        results[0].payload,
        ResultPayload::Weather {
            temperature: "12°C".to_string(),
            feels_like: "10°C".to_string(),
            humidity: "80%".to_string(),
            condition: "Partly cloudy".to_string(),
        }
    );
}

#[tokio::test]
async fn weather_failure_falls_through_to_later_rules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    fixture.add_file("weather budapest.txt");
    let results = engine(fixture.config(&server.uri()))
        .resolve("weather budapest")
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), ResultKind::File);
}

#[tokio::test]
async fn weather_timeout_falls_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weather_body())
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    let mut config = fixture.config(&server.uri());
    config.network.weather_timeout_ms = 100;

    let results = engine(config).resolve("weather budapest").await;
    assert!(results.iter().all(|r| r.kind() != ResultKind::Weather));
}

#[tokio::test]
async fn results_never_exceed_max() {
    let fixture = Fixture::new();
    for i in 0..6 {
        fixture.add_app(&format!("notes{}.desktop", i), &format!("Notes {}", i), "");
        fixture.add_file(&format!("notes-{}.md", i));
    }

    for max in [1u32, 3, 8] {
        let mut config = fixture.config(OFFLINE);
        config.search.max_results = max;
        let results = engine(config).resolve("notes").await;
        assert!(results.len() <= max as usize, "max {}", max);
    }
}

#[tokio::test]
async fn fan_out_merges_in_priority_order_with_caps() {
    let fixture = Fixture::new();
    for i in 0..6 {
        fixture.add_app(&format!("notes{}.desktop", i), &format!("Notes {}", i), "");
        fixture.add_file(&format!("notes-{}.md", i));
    }
    fixture.add_bookmarks(&[
        ("Notes A", "https://a.example/notes"),
        ("Notes B", "https://b.example/notes"),
        ("Notes C", "https://c.example/notes"),
        ("Notes D", "https://d.example/notes"),
    ]);

    let mut config = fixture.config(OFFLINE);
    config.search.max_results = 20;
    let results = engine(config).resolve("notes").await;

    let kinds: Vec<_> = results.iter().map(|r| r.kind()).collect();
    let mut expected = vec![ResultKind::App; 5];
    expected.extend([ResultKind::Bookmark; 3]);
    expected.extend([ResultKind::File; 3]);
    assert_eq!(kinds, expected);

    // Source-internal order survives the merge
    assert_eq!(results[5].title, "Notes A");
    assert_eq!(results[8].title, "notes-0.md");
}

#[tokio::test]
async fn alias_is_case_insensitive_and_coexists_with_system_command() {
    let fixture = Fixture::new();
    let mut config = fixture.config(OFFLINE);
    config
        .aliases
        .insert("lock".to_string(), vec!["notify-send bye".to_string()]);
    config.validate();
    let engine = engine(config);

    let upper = engine.resolve("LOCK").await;
    let lower = engine.resolve("lock").await;

    assert_eq!(upper, lower);
    let kinds: Vec<_> = lower.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![ResultKind::Alias, ResultKind::SystemCommand]);
    assert_eq!(
        lower[1].payload,
        ResultPayload::SystemCommand {
            command_line: "xdg-screensaver lock".to_string()
        }
    );

    // Only the whole query matches an alias
    let partial = engine.resolve("lock now").await;
    assert!(partial.iter().all(|r| r.kind() != ResultKind::Alias));
}

#[tokio::test]
async fn shell_command_branch() {
    let fixture = Fixture::new();
    let engine = engine(fixture.config(OFFLINE));

    let results = engine.resolve(">echo hi").await;
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].payload,
        ResultPayload::Command {
            command_line: "echo hi".to_string()
        }
    );

    assert!(engine.resolve(">").await.is_empty());
}

#[tokio::test]
async fn calculator_branch() {
    let fixture = Fixture::new();
    let engine = engine(fixture.config(OFFLINE));

    let results = engine.resolve("2 + 2").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), ResultKind::Calculator);
    assert_eq!(results[0].value(), Some(4.0));
    assert_eq!(results[0].title, "= 4");

    assert!(engine.resolve("1/0").await.is_empty());
}

#[tokio::test]
async fn unit_and_temperature_conversion() {
    let fixture = Fixture::new();
    let engine = engine(fixture.config(OFFLINE));

    let results = engine.resolve("10 km to mi").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "10 km = 6.2137 mi");
    let miles = results[0].value().unwrap();
    assert!((miles - 6.2137).abs() < 1e-4);

    let results = engine.resolve("0 c to f").await;
    assert_eq!(results[0].value(), Some(32.0));
    assert_eq!(results[0].title, "0°C = 32.00°F");
}

#[tokio::test]
async fn currency_conversion_uses_cached_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": "success",
            "rates": { "USD": 1.0, "EUR": 0.9 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    let engine = engine(fixture.config(&server.uri()));

    for _ in 0..2 {
        let results = engine.resolve("10 USD to EUR").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "10 USD = 9 EUR");
        assert!((results[0].value().unwrap() - 9.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn currency_without_rates_falls_through_to_fan_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    fixture.add_file("10 usd to eur.txt");
    let results = engine(fixture.config(&server.uri()))
        .resolve("10 USD to EUR")
        .await;

    assert!(results.iter().all(|r| r.kind() != ResultKind::Calculator));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), ResultKind::File);
}

#[tokio::test]
async fn slow_rate_endpoint_does_not_stall_resolve() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "rates": { "USD": 1.0, "EUR": 0.9 } }))
                .set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let fixture = Fixture::new();
    fixture.add_file("10 usd to eur.txt");
    let mut config = fixture.config(&server.uri());
    config.network.rate_timeout_ms = 100;

    let started = std::time::Instant::now();
    let results = engine(config).resolve("10 USD to EUR").await;

    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), ResultKind::File);
}

#[tokio::test]
async fn clipboard_history_is_bounded_and_unique() {
    let fixture = Fixture::new();
    let mut config = fixture.config(OFFLINE);
    config.search.max_results = 20;
    let engine = engine(config);

    {
        let mut history = engine.clipboard().write().unwrap();
        for i in 0..25 {
            history.push(format!("entry {}", i));
        }
        // Duplicates are rejected wherever they sit in the history
        assert!(!history.push("entry 10"));
        assert!(!history.push("entry 24"));
    }

    let results = engine.resolve("clip").await;
    assert_eq!(results.len(), 20);
    assert_eq!(results[0].title, "entry 24");
    assert_eq!(results[19].title, "entry 5");

    let mut values: Vec<_> = results
        .iter()
        .map(|r| match &r.payload {
            ResultPayload::Clipboard { value } => value.clone(),
            other => panic!("unexpected payload {:?}", other),
        })
        .collect();
    values.sort();
    values.dedup();
    assert_eq!(values.len(), 20);
}

#[tokio::test]
async fn short_queries_skip_bookmarks_and_files() {
    let fixture = Fixture::new();
    fixture.add_bookmarks(&[("Go docs", "https://go.dev/doc")]);
    fixture.add_file("go.mod");
    fixture.add_file("gopher.png");

    let engine = engine(fixture.config(OFFLINE));

    let one = engine.resolve("g").await;
    assert!(one.is_empty());

    let two = engine.resolve("go").await;
    let kinds: Vec<_> = two.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![ResultKind::Bookmark]);

    let three = engine.resolve("gop").await;
    let kinds: Vec<_> = three.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![ResultKind::File]);
}

#[tokio::test]
async fn disabled_sources_contribute_nothing() {
    let fixture = Fixture::new();
    fixture.add_app("notes.desktop", "Notes", "Take notes");
    fixture.add_file("notes.md");

    let mut config = fixture.config(OFFLINE);
    config.search.enable_apps = false;
    let results = engine(config).resolve("notes").await;

    let kinds: Vec<_> = results.iter().map(|r| r.kind()).collect();
    assert_eq!(kinds, vec![ResultKind::File]);
}
