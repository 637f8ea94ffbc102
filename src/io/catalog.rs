// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template catalog client.
//!
//! The catalog is fetched in a single request; paging happens client-side
//! in [`crate::models::gallery::Gallery`].

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::template::Template;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Anything that can produce the list of available templates.
pub trait TemplateSource: Send + Sync {
    fn fetch_templates(&self) -> Result<Vec<Template>>;
}

/// Response envelope returned by the imgflip `get_memes` endpoint.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    success: bool,
    #[serde(default)]
    data: Option<CatalogData>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    memes: Vec<Template>,
}

/// Parse a catalog response body.
pub fn parse_catalog(body: &str) -> Result<Vec<Template>> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| Error::CatalogUnavailable(format!("malformed response: {}", e)))?;

    if !response.success {
        let reason = response
            .error_message
            .unwrap_or_else(|| "catalog reported failure".to_string());
        return Err(Error::CatalogUnavailable(reason));
    }

    response
        .data
        .map(|data| data.memes)
        .ok_or_else(|| Error::CatalogUnavailable("response has no data".to_string()))
}

/// Build the blocking HTTP client shared by catalog and image requests.
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::CatalogUnavailable(format!("failed to build HTTP client: {}", e)))
}

/// Catalog fetched over HTTP.
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl TemplateSource for HttpCatalog {
    fn fetch_templates(&self) -> Result<Vec<Template>> {
        log::info!("Fetching template catalog from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| Error::CatalogUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CatalogUnavailable(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .map_err(|e| Error::CatalogUnavailable(e.to_string()))?;
        let templates = parse_catalog(&body)?;

        log::info!("Catalog returned {} templates", templates.len());
        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;
    use tiny_http::{Header, Response, Server};

    const SAMPLE: &str = r#"{
        "success": true,
        "data": {
            "memes": [
                {"id": "181913649", "name": "Drake Hotline Bling", "url": "https://i.imgflip.com/30b1gx.jpg", "width": 1200, "height": 1200, "box_count": 2},
                {"id": "87743020", "name": "Two Buttons", "url": "https://i.imgflip.com/1g8my4.jpg", "width": 600, "height": 908, "box_count": 3}
            ]
        }
    }"#;

    static INIT: Once = Once::new();

    fn start_test_server() -> String {
        INIT.call_once(|| {
            std::thread::spawn(|| {
                let server = Server::http("127.0.0.1:18093").unwrap();
                for request in server.incoming_requests() {
                    let json = "Content-Type: application/json".parse::<Header>().unwrap();
                    let response = match request.url() {
                        "/get_memes" => Response::from_string(SAMPLE).with_header(json),
                        "/broken" => Response::from_string(r#"{"success": false, "error_message": "rate limited"}"#)
                            .with_header(json),
                        _ => Response::from_string("not found").with_status_code(404),
                    };
                    let _ = request.respond(response);
                }
            });
            std::thread::sleep(Duration::from_millis(100));
        });

        "http://127.0.0.1:18093".to_string()
    }

    #[test]
    fn test_parse_catalog_success() {
        let templates = parse_catalog(SAMPLE).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].id, "181913649");
        assert_eq!(templates[0].name, "Drake Hotline Bling");
        assert_eq!(templates[1].url, "https://i.imgflip.com/1g8my4.jpg");
    }

    #[test]
    fn test_parse_catalog_reported_failure() {
        let err = parse_catalog(r#"{"success": false, "error_message": "No memes today"}"#).unwrap_err();
        match err {
            Error::CatalogUnavailable(message) => assert_eq!(message, "No memes today"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_catalog_malformed() {
        assert!(matches!(parse_catalog("<html>"), Err(Error::CatalogUnavailable(_))));
        assert!(matches!(parse_catalog(r#"{"success": true}"#), Err(Error::CatalogUnavailable(_))));
    }

    #[test]
    fn test_http_catalog_fetches_templates() {
        let base = start_test_server();
        let client = build_client(&Config::default()).unwrap();

        let catalog = HttpCatalog::new(client.clone(), format!("{}/get_memes", base));
        let templates = catalog.fetch_templates().expect("fetch should succeed");
        assert_eq!(templates.len(), 2);

        let missing = HttpCatalog::new(client.clone(), format!("{}/nowhere", base));
        assert!(matches!(missing.fetch_templates(), Err(Error::CatalogUnavailable(_))));

        let broken = HttpCatalog::new(client, format!("{}/broken", base));
        match broken.fetch_templates() {
            Err(Error::CatalogUnavailable(message)) => assert_eq!(message, "rate limited"),
            other => panic!("unexpected result: {:?}", other.map(|t| t.len())),
        }
    }
}
