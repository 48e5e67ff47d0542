//! End-to-end scrape against mocked store and LLM endpoints.

use ai_product_scraper::commands::ScrapeCommand;
use ai_product_scraper::config::{Config, OutputFormat};
use ai_product_scraper::ProductRecord;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content.to_string(), "refusal": null },
            "finish_reason": "stop"
        }]
    })
}

fn product_html(name: &str, price: &str, image: &str) -> String {
    format!(
        r#"<html><body><h1>{name}</h1><p>Precio: $ {price}</p><img src="{image}"></body></html>"#
    )
}

async fn mount_store(server: &MockServer) {
    let base = server.uri();
    let search = format!(
        r#"<html><body>
            <a href="{base}/category/celulares">Celulares</a>
            <a href="{base}/product/101/galaxy-a15/101">Galaxy A15</a>
            <a href="{base}/product/202/iphone-13/202">iPhone 13</a>
            <a href="{base}/product/303/redmi-13/303">Redmi 13</a>
        </body></html>"#
    );

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("Ntt", "celulares"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/product/101/galaxy-a15/101"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_html(
            "Galaxy A15",
            "649.900",
            "https://img.test/101.jpg",
        )))
        .mount(server)
        .await;

    // The second product page is down; the run continues without it
    Mock::given(method("GET"))
        .and(path("/product/202/iphone-13/202"))
        .respond_with(ResponseTemplate::new(503))
        .mount(server)
        .await;
}

async fn mount_llm(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4.1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!({ "pattern": r"/product/\d+/" }))),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": "gpt-4.1-mini" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
            "id": "101",
            "title": "Celular Galaxy A15",
            "price": 649900.0,
            "image_url": "https://img.test/101.jpg",
            "description": "Celular con cámara de 50 MP."
        }))))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_end_to_end_without_browser() {
    let server = MockServer::start().await;
    mount_store(&server).await;
    mount_llm(&server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("scrapping_producto.json");

    let config = Config {
        store_url: format!("{}/search", server.uri()),
        headless: false,
        max_products: 2,
        output: output.clone(),
        format: OutputFormat::Csv,
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: format!("{}/v1", server.uri()),
        ..Config::default()
    };

    let stdout = ScrapeCommand::new(config).execute("celulares").await.unwrap();
    assert!(stdout.starts_with("id,title,price,image_url,description"));
    assert!(stdout.contains("101,Celular Galaxy A15,649900"));

    let content = std::fs::read_to_string(&output).unwrap();
    let records: Vec<ProductRecord> = serde_json::from_str(&content).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "101");
    assert_eq!(records[0].price, 649900.0);
    assert!(content.contains("\"DESCRIPTION\": \"Celular con cámara de 50 MP.\""));
}

#[tokio::test]
async fn test_scrape_requires_api_key() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        headless: false,
        output: dir.path().join("out.json"),
        openai_api_key: None,
        ..Config::default()
    };

    let err = ScrapeCommand::new(config).execute("celulares").await.unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"));
    assert!(!dir.path().join("out.json").exists());
}
