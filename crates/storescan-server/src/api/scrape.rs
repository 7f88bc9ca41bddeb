//! Scrape handlers: the report as a JSON envelope or as a CSV download.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use storescan_core::{flatten_report, render_csv, ScrapeReport};
use storescan_scraper::{ScraperError, StoreScraper, StoreTarget, HOMEPAGE_UNAVAILABLE};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ScrapeRequest {
    pub url: String,
}

pub(super) async fn scrape_json(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScrapeReport>>, ApiError> {
    let request = parse_payload(&req_id.0, payload)?;
    let (_, report) = run_scrape(&state, &req_id.0, &request.url).await?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn scrape_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = parse_payload(&req_id.0, payload)?;
    let (target, report) = run_scrape(&state, &req_id.0, &request.url).await?;

    let rows = flatten_report(&report, target.as_str());
    if rows.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body = render_csv(&rows).map_err(|e| unexpected(&req_id.0, &e))?;
    let filename = csv_filename(&target);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response())
}

fn parse_payload(
    req_id: &str,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<ScrapeRequest, ApiError> {
    payload.map(|Json(request)| request).map_err(|rejection| {
        ApiError::new(
            req_id,
            "validation_error",
            format!("request body must be {{\"url\": \"<store url>\"}}: {rejection}"),
        )
    })
}

async fn run_scrape(
    state: &AppState,
    req_id: &str,
    raw_url: &str,
) -> Result<(StoreTarget, ScrapeReport), ApiError> {
    let target = StoreTarget::parse(raw_url)
        .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))?;
    tracing::info!(store = %target, request_id = req_id, "scrape requested");

    let scraper =
        StoreScraper::new(target.clone(), &state.options).map_err(|e| unexpected(req_id, &e))?;

    match scraper.run_all().await {
        Ok(report) => Ok((target, report)),
        Err(ScraperError::HomepageUnavailable { url, source }) => {
            tracing::warn!(url = %url, error = %source, "homepage unavailable");
            Err(ApiError::new(req_id, "bad_request", HOMEPAGE_UNAVAILABLE))
        }
        Err(e) => Err(unexpected(req_id, &e)),
    }
}

fn unexpected(req_id: &str, error: &dyn std::error::Error) -> ApiError {
    tracing::error!(error = %error, "scrape failed");
    ApiError::new(
        req_id,
        "internal_error",
        format!("An unexpected error occurred during scraping: {error}"),
    )
}

/// `shop.example.com` -> `shop_example_com_shopify_data.csv`
fn csv_filename(target: &StoreTarget) -> String {
    format!("{}_shopify_data.csv", target.host().replace('.', "_"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
        response::Response,
    };
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::tests::test_app;
    use super::*;

    const HOMEPAGE: &str = r#"<html><body>
        <a href="/products/canvas-tote"><span class="title">Canvas Tote</span></a>
        <a href="https://facebook.com/acme">Facebook</a>
        <p>Email care@acme.example</p>
        </body></html>"#;

    async fn storefront() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HOMEPAGE))
            .mount(&server)
            .await;
        server
    }

    async fn post_json(uri: &str, body: String, rate_limit: usize) -> Response {
        test_app(rate_limit)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .expect("request"),
            )
            .await
            .expect("response")
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[test]
    fn csv_filename_replaces_dots() {
        let target = StoreTarget::parse("https://memy.co.in").unwrap();
        assert_eq!(csv_filename(&target), "memy_co_in_shopify_data.csv");
    }

    #[tokio::test]
    async fn scrape_returns_report_envelope() {
        let server = storefront().await;
        let body = serde_json::json!({ "url": server.uri() }).to_string();

        let response = post_json("/scrape/", body, 0).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = &json["data"];
        assert_eq!(data["hero_products"][0]["handle"], "canvas-tote");
        assert_eq!(data["hero_products"][0]["price"], "N/A");
        assert_eq!(
            data["social_media_links"]["facebook"],
            "https://facebook.com/acme"
        );
        assert_eq!(data["contact_info"]["emails"][0], "care@acme.example");
        assert_eq!(data["refund_policy"], "Not found.");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn scrape_reports_unreachable_homepage_as_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let body = serde_json::json!({ "url": server.uri() }).to_string();

        let response = post_json("/scrape", body, 0).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "bad_request");
        assert_eq!(json["error"]["message"], HOMEPAGE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn scrape_rejects_invalid_url() {
        let body = serde_json::json!({ "url": "ftp://files.example.com" }).to_string();

        let response = post_json("/scrape/", body, 0).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn scrape_rejects_malformed_body() {
        let response = post_json("/scrape/", "{\"link\": 1}".to_owned(), 0).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn scrape_csv_returns_attachment() {
        let server = storefront().await;
        let body = serde_json::json!({ "url": server.uri() }).to_string();

        let response = post_json("/scrape-csv/", body, 0).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=127_0_0_1_shopify_data.csv"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let csv = String::from_utf8(bytes.to_vec()).expect("utf-8 body");
        assert!(csv.starts_with("Category,"), "unexpected header: {csv}");
        assert!(csv.contains("Social Media,"));
        assert!(csv.contains("https://facebook.com/acme"));
        assert!(csv.contains("care@acme.example"));
    }

    #[tokio::test]
    async fn scrape_routes_are_rate_limited() {
        let app = test_app(1);
        let request = || {
            Request::builder()
                .method(Method::POST)
                .uri("/scrape-csv/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request")
        };

        let first = app.clone().oneshot(request()).await.expect("response");
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        let second = app.oneshot(request()).await.expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let json = body_json(second).await;
        assert_eq!(json["error"]["code"], "rate_limited");
    }
}
