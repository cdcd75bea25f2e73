#![allow(dead_code)]

use std::time::Duration;

use url::Url;
use wikiextract::{config::Config, fetcher::WikiClient};
use wiremock::MockServer;

pub const API_PATH: &str = "/w/api.php";
pub const REST_PATH: &str = "/api/rest_v1";

pub const ROCKET_HTML: &str = include_str!("fixtures/rocket.html");

/// Configuration pointing every endpoint at `server`.
pub fn test_config(server: &MockServer) -> Config {
    Config::new(
        Url::parse(&format!("{}{}", server.uri(), API_PATH)).unwrap(),
        Url::parse(&format!("{}{}", server.uri(), REST_PATH)).unwrap(),
    )
    .with_user_agent("WikiExtractTests/0.1")
    .with_request_timeout(Duration::from_secs(2))
}

pub fn test_client() -> WikiClient {
    WikiClient::new("WikiExtractTests/0.1", Duration::from_secs(2)).unwrap()
}

/// An article URL served by `server` that still carries the Wikipedia
/// article-path marker, so the resolver accepts it.
pub fn article_url(server: &MockServer, title: &str) -> String {
    format!("{}/wikipedia.org/wiki/{}", server.uri(), title)
}

pub fn article_path(title: &str) -> String {
    format!("/wikipedia.org/wiki/{}", title)
}

pub fn intro_json(title: &str, extract: &str) -> serde_json::Value {
    serde_json::json!({
        "batchcomplete": "",
        "query": {
            "pages": {
                "25768": {
                    "pageid": 25768,
                    "ns": 0,
                    "title": title,
                    "extract": extract
                }
            }
        }
    })
}

pub fn sections_json(sections: &[(&str, &str)]) -> serde_json::Value {
    let sections: Vec<serde_json::Value> = sections
        .iter()
        .enumerate()
        .map(|(i, (index, line))| {
            serde_json::json!({
                "toclevel": 1,
                "level": "2",
                "line": line,
                "number": (i + 1).to_string(),
                "index": index,
            })
        })
        .collect();
    serde_json::json!({ "parse": { "title": "Rocket", "pageid": 25768, "sections": sections } })
}

pub fn section_text_json(html: &str) -> serde_json::Value {
    serde_json::json!({ "parse": { "title": "Rocket", "pageid": 25768, "text": { "*": html } } })
}
