//! Catalog clients used through the trait object the picker holds.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use picker_catalog::prelude::*;
use picker_catalog::parse_search_body;
use picker_core::prelude::*;

fn towel(id: u32) -> Product {
    Product::new(id.to_string(), format!("Towel {id}"))
        .with_variant(Variant::new("s", "Small", Money::new(1200, Currency::USD)))
}

#[tokio::test]
async fn in_memory_catalog_pages_through_dyn_client() {
    let client: Arc<dyn CatalogClient> = Arc::new(InMemoryCatalog::new((1..=12).map(towel).collect()));

    let first = client.search("", 1, 5).await.unwrap();
    let last = client.search("", 3, 5).await.unwrap();

    assert_eq!(first.items.len(), 5);
    assert_eq!(first.total_pages, Some(3));
    assert_eq!(last.items.len(), 2);
    assert_eq!(last.items[1].title, "Towel 12");
}

#[tokio::test]
async fn http_client_reports_transport_failure() {
    // Nothing listens on port 9 of localhost; the connection is refused.
    let config = CatalogConfig::new("http://127.0.0.1:9/search");
    let client = HttpCatalogClient::new(config).unwrap();

    let err = client.search("towel", 1, 10).await.unwrap_err();
    assert!(matches!(err, CatalogError::Request(_) | CatalogError::Timeout));
}

/// Serve `responses` canned bodies, one connection each, returning the request lines seen.
fn serve(responses: usize, body: &'static str) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/search", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut line = String::new();
            loop {
                line.clear();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            seen.push(request_line.trim_end().to_string());
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
        }
        seen
    });
    (endpoint, handle)
}

#[tokio::test]
async fn http_client_sends_encoded_query_and_parses_page() {
    let body = r#"{"products": [{"id": 3, "title": "Linen Towel", "variants": [{"id": 30, "title": "S", "price": "9.50"}]}], "totalPages": 4}"#;
    let (endpoint, server) = serve(2, body);
    let client = HttpCatalogClient::new(CatalogConfig::new(endpoint)).unwrap();

    let page = client.search("linen towel&co", 2, 5).await.unwrap();
    client.search("", 1, 5).await.unwrap();

    assert_eq!(page.total_pages, Some(4));
    assert_eq!(page.items[0].variants[0].price, Money::new(950, Currency::USD));

    let seen = server.join().unwrap();
    assert!(seen[0].starts_with("GET /search?search=linen"), "{}", seen[0]);
    assert_eq!(seen[0].matches(' ').count(), 2, "query must be percent-encoded: {}", seen[0]);
    assert!(seen[0].contains("%26co"), "{}", seen[0]);
    assert!(seen[0].contains("page=2&limit=5"), "{}", seen[0]);
    assert!(seen[1].contains("page=1&limit=5"), "{}", seen[1]);
}

#[test]
fn legacy_array_response_has_no_page_count() {
    let body = br#"[{"id": 1, "title": "Towel", "variants": [{"id": 9, "title": "S", "price": "5.00"}]}]"#;
    let page = parse_search_body(body, Currency::USD);
    assert_eq!(page.items[0].variants[0].price, Money::new(500, Currency::USD));
    assert_eq!(page.total_pages, None);
}
