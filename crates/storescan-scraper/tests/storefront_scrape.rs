//! Integration tests for `StorefrontClient` catalog collection and
//! `StoreScraper::run_all`.
//!
//! Uses `wiremock` to stand up a local storefront for each test so no real
//! network traffic is made. Paths without a mock answer 404, which is how a
//! missing page looks to the scraper.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storescan_core::{PageText, ScrapeReport};
use storescan_scraper::{
    ScrapeOptions, ScraperError, StoreScraper, StoreTarget, StorefrontClient,
};

fn test_client() -> StorefrontClient {
    StorefrontClient::new(5, "storescan-test/0.1").expect("failed to build test client")
}

fn test_options() -> ScrapeOptions {
    ScrapeOptions {
        request_timeout_secs: 5,
        user_agent: "storescan-test/0.1".to_owned(),
        max_catalog_pages: 10,
    }
}

fn target_for(server: &MockServer) -> StoreTarget {
    StoreTarget::parse(&server.uri()).expect("mock server URI is a valid store URL")
}

fn products_json(handles: &[&str]) -> serde_json::Value {
    let products: Vec<_> = handles
        .iter()
        .map(|handle| {
            json!({
                "id": 1,
                "title": format!("Product {handle}"),
                "handle": handle,
                "vendor": "Acme",
                "tags": ["new"],
                "variants": [{ "id": 11, "price": "25.00" }]
            })
        })
        .collect();
    json!({ "products": products })
}

async fn mount_catalog_page(server: &MockServer, page: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

async fn run(server: &MockServer) -> Result<ScrapeReport, ScraperError> {
    StoreScraper::new(target_for(server), &test_options())
        .expect("failed to build scraper")
        .run_all()
        .await
}

const HOMEPAGE: &str = r#"
<html>
  <head><title>Acme Outfitters</title></head>
  <body>
    <header><a href="/pages/contact">Contact</a></header>
    <main>
      <div class="product-card">
        <a class="product-card__link" href="/products/linen-shirt?variant=9">
          <h3 class="product-card__title">Linen Shirt</h3>
          <span class="price-item">Rs. 1,299.00</span>
        </a>
      </div>
      <a href="/products/wool-socks">Wool socks</a>
    </main>
    <footer>
      <p>Write to help@acme.example or call 987-654-3210</p>
      <a href="https://www.Instagram.com/acme">Instagram</a>
      <a href="/blogs/news">Journal</a>
    </footer>
  </body>
</html>"#;

// ---------------------------------------------------------------------------
// Test 1 – unreachable homepage aborts the scrape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_fails_without_secondary_fetches_when_homepage_is_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let result = run(&server).await;

    assert!(
        matches!(result, Err(ScraperError::HomepageUnavailable { .. })),
        "expected HomepageUnavailable, got: {result:?}"
    );
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "only the homepage may be requested");
}

// ---------------------------------------------------------------------------
// Test 2 – catalog stops at the first empty page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_catalog_stops_at_empty_page() {
    let server = MockServer::start().await;
    mount_catalog_page(&server, "1", products_json(&["tee", "cap"])).await;
    mount_catalog_page(&server, "2", json!({ "products": [] })).await;

    let products = test_client()
        .collect_catalog(&target_for(&server), 1000)
        .await;

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].handle(), Some("tee"));
    assert_eq!(products[1].first_price().as_deref(), Some("25.00"));
}

// ---------------------------------------------------------------------------
// Test 3 – a failing page keeps what was already collected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_catalog_keeps_earlier_pages_on_error() {
    let server = MockServer::start().await;
    mount_catalog_page(&server, "1", products_json(&["tee"])).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let products = test_client()
        .collect_catalog(&target_for(&server), 1000)
        .await;

    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn collect_catalog_stops_on_malformed_body() {
    let server = MockServer::start().await;
    mount_catalog_page(&server, "1", products_json(&["tee"])).await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let products = test_client()
        .collect_catalog(&target_for(&server), 1000)
        .await;

    assert_eq!(products.len(), 1);
}

// ---------------------------------------------------------------------------
// Test 4 – page cap bounds a store that never returns an empty page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_catalog_respects_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json(&["loop"])))
        .expect(3)
        .mount(&server)
        .await;

    let products = test_client()
        .collect_catalog(&target_for(&server), 3)
        .await;

    assert_eq!(products.len(), 3);
}

// ---------------------------------------------------------------------------
// Test 5 – full scrape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_collects_every_section() {
    let server = MockServer::start().await;
    mount_html(&server, "/", HOMEPAGE).await;
    mount_catalog_page(&server, "1", products_json(&["linen-shirt"])).await;
    mount_catalog_page(&server, "2", json!({ "products": [] })).await;
    mount_html(
        &server,
        "/pages/about-us",
        "<html><body><nav>Menu</nav>\n<h1>Our story</h1>\n<p>Made in Jaipur.</p></body></html>",
    )
    .await;
    mount_html(
        &server,
        "/policies/privacy-policy",
        "<html><body><p>We never sell your data.</p></body></html>",
    )
    .await;
    mount_html(
        &server,
        "/pages/faqs",
        "<html><body><h3>Do you ship abroad?</h3><p>Yes, worldwide.</p></body></html>",
    )
    .await;

    let report = run(&server).await.expect("scrape should succeed");

    assert_eq!(report.product_catalog.len(), 1);

    let handles: Vec<_> = report
        .hero_products
        .iter()
        .map(|p| p.handle.as_str())
        .collect();
    assert_eq!(handles, ["linen-shirt", "wool-socks"]);
    assert_eq!(report.hero_products[0].title, "Linen Shirt");
    assert_eq!(
        report.hero_products[0].price.as_deref(),
        Some("Rs. 1,299.00")
    );
    assert_eq!(report.hero_products[1].title, "Wool Socks");
    assert_eq!(report.hero_products[1].price, None);

    assert_eq!(
        report.social_media_links.get("instagram"),
        Some("https://www.instagram.com/acme")
    );
    assert_eq!(report.contact_info.emails, ["help@acme.example"]);
    assert_eq!(report.contact_info.phone_numbers, ["9876543210"]);
    assert_eq!(
        report.important_links.get("contact_us"),
        Some(format!("{}/pages/contact", server.uri()).as_str())
    );
    assert_eq!(
        report.important_links.get("blog"),
        Some(format!("{}/blogs/news", server.uri()).as_str())
    );

    assert_eq!(
        report.about_us_text,
        PageText::Found("Our story\nMade in Jaipur.".to_owned())
    );
    assert_eq!(
        report.privacy_policy,
        PageText::Found("We never sell your data.".to_owned())
    );
    assert_eq!(report.return_policy, PageText::NotFound);
    assert_eq!(report.refund_policy, PageText::NotFound);

    assert_eq!(report.faq_page.0.len(), 1);
    assert_eq!(report.faq_page.0[0].answer, "Yes, worldwide.");
}

// ---------------------------------------------------------------------------
// Test 6 – empty sections serialize to their status values
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_on_bare_homepage_serializes_status_values() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><p>Coming soon</p></body></html>").await;

    let report = run(&server).await.expect("scrape should succeed");
    let value = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(value["product_catalog"], json!([]));
    assert_eq!(
        value["social_media_links"],
        json!({ "status": "No social media links found." })
    );
    assert_eq!(
        value["important_links"],
        json!({ "status": "No important links found." })
    );
    assert_eq!(
        value["contact_info"],
        json!({ "emails": ["Not found."], "phone_numbers": ["Not found."] })
    );
    assert_eq!(value["about_us_text"], json!("Not found."));
    assert_eq!(
        value["faq_page"],
        json!([{ "question": "N/A", "answer": "No FAQs found or parsed." }])
    );
}

// ---------------------------------------------------------------------------
// Test 7 – text resolver skips a candidate that normalizes to nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_skips_empty_about_page_for_next_candidate() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><p>Shop</p></body></html>").await;
    mount_html(
        &server,
        "/pages/about",
        "<html><body><header>Acme</header><footer>Links</footer></body></html>",
    )
    .await;
    mount_html(
        &server,
        "/pages/about-us",
        "<html><body><p>Family run since 1998.</p></body></html>",
    )
    .await;

    let report = run(&server).await.expect("scrape should succeed");

    assert_eq!(
        report.about_us_text,
        PageText::Found("Family run since 1998.".to_owned())
    );
}

// ---------------------------------------------------------------------------
// Test 8 – FAQ paths are tried in order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_uses_first_faq_path_with_entries() {
    let server = MockServer::start().await;
    mount_html(&server, "/", "<html><body><p>Shop</p></body></html>").await;
    mount_html(
        &server,
        "/pages/faq",
        "<html><body><h2>FAQ</h2><p>Coming soon.</p></body></html>",
    )
    .await;
    mount_html(
        &server,
        "/pages/frequently-asked-questions",
        "<html><body><details><summary>Is shipping free?</summary><p>Over $50.</p></details></body></html>",
    )
    .await;

    let report = run(&server).await.expect("scrape should succeed");

    assert_eq!(report.faq_page.0.len(), 1);
    assert_eq!(report.faq_page.0[0].question, "Is shipping free?");
    assert_eq!(report.faq_page.0[0].answer, "Over $50.");
}

// ---------------------------------------------------------------------------
// Test 9 – an atypical product does not cost the rest of the catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_catalog_keeps_pages_after_an_atypical_product() {
    let server = MockServer::start().await;
    mount_catalog_page(
        &server,
        "1",
        json!({ "products": [
            { "title": "Tee", "handle": "tee", "variants": [{ "price": "19.00" }] },
            { "title": "Gift", "handle": "gift", "product_type": 3, "variants": null }
        ] }),
    )
    .await;
    mount_catalog_page(&server, "2", products_json(&["cap"])).await;
    mount_catalog_page(&server, "3", json!({ "products": [] })).await;

    let products = test_client()
        .collect_catalog(&target_for(&server), 1000)
        .await;

    let handles: Vec<_> = products.iter().filter_map(|p| p.handle()).collect();
    assert_eq!(handles, vec!["tee", "gift", "cap"]);
}

// ---------------------------------------------------------------------------
// Test 10 – script payloads are not read as contact details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_all_ignores_numbers_and_emails_inside_scripts() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><head>
            <script type="application/ld+json">{"email":"tracker@analytics.example"}</script>
          </head><body>
            <p>Welcome to our store!</p>
            <script>var meta = {"product":{"id":7412345678901,"variants":[{"id":42012345678901}]}};</script>
          </body></html>"#,
    )
    .await;

    let report = run(&server).await.expect("homepage is up");

    assert!(
        report.contact_info.is_empty(),
        "expected no contact info, got: {:?}",
        report.contact_info
    );
}
