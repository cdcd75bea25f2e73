mod helpers;

use wikiextract::{
    extractor::{ExtractError, ExtractionStrategy, SectionFetcher},
    resolver::resolve,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use helpers::{API_PATH, intro_json, section_text_json, sections_json, test_client, test_config};

fn fetcher(server: &MockServer) -> SectionFetcher {
    SectionFetcher::new(test_client(), test_config(server).api_url().clone())
}

async fn mount_sections(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "parse"))
        .and(query_param("prop", "sections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_intro(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "query"))
        .and(query_param("prop", "extracts"))
        .and(query_param("exintro", "1"))
        .and(query_param("explaintext", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_section(server: &MockServer, index: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "parse"))
        .and(query_param("section", index))
        .and(query_param("prop", "text"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_intro_only_article() {
    let mock_server = MockServer::start().await;
    let intro = "R".repeat(600);

    mount_sections(&mock_server, sections_json(&[])).await;
    mount_intro(&mock_server, intro_json("Rocket", &intro)).await;

    let page = resolve("https://en.wikipedia.org/wiki/Rocket").unwrap();
    let document = fetcher(&mock_server).extract(&page).await.unwrap();

    assert_eq!(document.as_str(), format!("# Rocket\n\n{}", intro));
}

#[tokio::test]
async fn test_sections_are_appended_in_order() {
    let mock_server = MockServer::start().await;

    mount_sections(
        &mock_server,
        sections_json(&[
            ("1", "History"),
            ("2", "References"),
            ("3", "Design"),
            ("T-1", "Transcluded"),
        ]),
    )
    .await;
    mount_intro(&mock_server, intro_json("Rocket", "A rocket is a vehicle.")).await;
    mount_section(
        &mock_server,
        "1",
        ResponseTemplate::new(200).set_body_json(section_text_json(
            r#"<div class="mw-parser-output"><h2>History<span class="mw-editsection">[<a>edit</a>]</span></h2><p>Chinese fire arrows.<sup>[1]</sup></p></div>"#,
        )),
    )
    .await;
    mount_section(
        &mock_server,
        "3",
        ResponseTemplate::new(200)
            .set_body_json(section_text_json("<p>Tube &amp; propellant.</p>")),
    )
    .await;

    let page = resolve("https://en.wikipedia.org/wiki/Rocket").unwrap();
    let document = fetcher(&mock_server).extract(&page).await.unwrap();

    assert_eq!(
        document.as_str(),
        "# Rocket\n\nA rocket is a vehicle.\n\n## History\n\nHistory Chinese fire arrows.\n\n## Design\n\nTube & propellant."
    );
}

#[tokio::test]
async fn test_failed_section_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_sections(&mock_server, sections_json(&[("1", "History"), ("2", "Design")])).await;
    mount_intro(&mock_server, intro_json("Rocket", "Lead text.")).await;
    mount_section(&mock_server, "1", ResponseTemplate::new(500)).await;
    mount_section(
        &mock_server,
        "2",
        ResponseTemplate::new(200).set_body_json(section_text_json("<p>Nozzles.</p>")),
    )
    .await;

    let page = resolve("https://en.wikipedia.org/wiki/Rocket").unwrap();
    let document = fetcher(&mock_server).extract(&page).await.unwrap();

    assert_eq!(
        document.as_str(),
        "# Rocket\n\nLead text.\n\n## Design\n\nNozzles."
    );
}

#[tokio::test]
async fn test_section_listing_failure_keeps_intro() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "sections"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;
    mount_intro(&mock_server, intro_json("Rocket", "Lead only.")).await;

    let page = resolve("https://en.wikipedia.org/wiki/Rocket").unwrap();
    let document = fetcher(&mock_server).extract(&page).await.unwrap();

    assert_eq!(document.as_str(), "# Rocket\n\nLead only.");
}

#[tokio::test]
async fn test_missing_page() {
    let mock_server = MockServer::start().await;

    mount_sections(
        &mock_server,
        serde_json::json!({
            "error": { "code": "missingtitle", "info": "The page you specified doesn't exist." }
        }),
    )
    .await;
    mount_intro(
        &mock_server,
        serde_json::json!({
            "batchcomplete": "",
            "query": { "pages": { "-1": { "ns": 0, "title": "Nonexistent Page XYZ", "missing": "" } } }
        }),
    )
    .await;

    let page = resolve("https://en.wikipedia.org/wiki/Nonexistent_Page_XYZ").unwrap();
    let result = fetcher(&mock_server).extract(&page).await;

    assert!(matches!(result, Err(ExtractError::PageNotFound(title)) if title == "Nonexistent_Page_XYZ"));
}

#[tokio::test]
async fn test_intro_transport_failure_fails_strategy() {
    let mock_server = MockServer::start().await;

    mount_sections(&mock_server, sections_json(&[])).await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("action", "query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let page = resolve("https://en.wikipedia.org/wiki/Rocket").unwrap();
    let result = fetcher(&mock_server).extract(&page).await;

    assert!(matches!(result, Err(ExtractError::Extraction(_))));
}

#[tokio::test]
async fn test_decoded_title_is_sent_once_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("titles", "Caf\u{e9} society"))
        .respond_with(ResponseTemplate::new(200).set_body_json(intro_json("Café society", "Lead.")))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_sections(&mock_server, sections_json(&[])).await;

    let page = resolve("https://en.wikipedia.org/wiki/Caf%C3%A9%20society").unwrap();
    let document = fetcher(&mock_server).extract(&page).await.unwrap();

    assert_eq!(document.as_str(), "# Café society\n\nLead.");
}
