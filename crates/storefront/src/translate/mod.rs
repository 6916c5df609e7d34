//! Optional translation of product text for display.
//!
//! Translation is an external capability the storefront merely calls: a
//! LibreTranslate-style HTTP endpoint configured via `TRANSLATE_API_URL`.
//! When the endpoint is unconfigured, unreachable, or fails for a single
//! item, the original English text is used instead - translation failures
//! are never surfaced as page errors.

use std::sync::Arc;

use marigold_core::Product;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// A display language supported by the search bar.
///
/// `speech_tag` is the BCP-47 tag handed to the browser's speech
/// recognition; `translate_code` is the two-letter code sent to the
/// translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub name: &'static str,
    pub speech_tag: &'static str,
    pub translate_code: &'static str,
}

impl Language {
    /// Selector label: the name with its first letter capitalized.
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().collect::<String>() + chars.as_str()
        })
    }
}

/// The default language; products are served in English and selecting it
/// disables translation.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Languages offered by the voice and translation selectors.
pub const LANGUAGES: &[Language] = &[
    Language { name: "english", speech_tag: "en-US", translate_code: "en" },
    Language { name: "spanish", speech_tag: "es-ES", translate_code: "es" },
    Language { name: "dutch", speech_tag: "nl-NL", translate_code: "nl" },
    Language { name: "french", speech_tag: "fr-FR", translate_code: "fr" },
    Language { name: "german", speech_tag: "de-DE", translate_code: "de" },
    Language { name: "chinese", speech_tag: "zh-CN", translate_code: "zh" },
    Language { name: "japanese", speech_tag: "ja-JP", translate_code: "ja" },
    Language { name: "korean", speech_tag: "ko-KR", translate_code: "ko" },
    Language { name: "hindi", speech_tag: "hi-IN", translate_code: "hi" },
    Language { name: "italian", speech_tag: "it-IT", translate_code: "it" },
    Language { name: "arabic", speech_tag: "ar-SA", translate_code: "ar" },
];

/// Look up a language by its selector name.
#[must_use]
pub fn find_language(name: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.name == name)
}

/// Errors from the translation service.
///
/// These never propagate past [`TranslateClient::translate`]; they exist
/// for logging and for the inner request path.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation API returned {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for the external translation capability.
///
/// Cheaply cloneable. A client without an endpoint is a no-op that
/// returns its input unchanged.
#[derive(Clone)]
pub struct TranslateClient {
    inner: Arc<TranslateClientInner>,
}

struct TranslateClientInner {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl TranslateClient {
    /// Create a client. `base_url: None` disables translation entirely.
    #[must_use]
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            inner: Arc::new(TranslateClientInner {
                client: reqwest::Client::new(),
                endpoint: base_url.map(|base| format!("{}/translate", base.trim_end_matches('/'))),
            }),
        }
    }

    /// Whether a translation endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.endpoint.is_some()
    }

    /// Translate `text` from English to `target`.
    ///
    /// Falls back to the original text when translation is disabled, the
    /// target is English, or the request fails.
    pub async fn translate(&self, text: &str, target: &str) -> String {
        if target == "en" {
            return text.to_string();
        }
        let Some(endpoint) = self.inner.endpoint.as_deref() else {
            return text.to_string();
        };

        match self.request(endpoint, text, target).await {
            Ok(translated) if !translated.is_empty() => translated,
            Ok(_) => text.to_string(),
            Err(e) => {
                tracing::warn!(target, error = %e, "Translation failed, using original text");
                text.to_string()
            }
        }
    }

    async fn request(
        &self,
        endpoint: &str,
        text: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let response = self
            .inner
            .client
            .post(endpoint)
            .json(&TranslateRequest {
                q: text,
                source: "en",
                target,
                format: "text",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status));
        }

        let body: TranslateResponse = response.json().await?;
        Ok(body.translated_text)
    }
}

/// Translate the text fields of every product for display.
///
/// Products are translated concurrently with no upper bound and no
/// completion-ordering guarantee; the returned list keeps the input
/// order. A product whose task fails comes back untouched.
#[instrument(skip(client, products), fields(count = products.len(), target))]
pub async fn translate_products(
    client: &TranslateClient,
    products: Vec<Product>,
    target: &'static str,
) -> Vec<Product> {
    let mut handles = Vec::with_capacity(products.len());
    for product in &products {
        let client = client.clone();
        let product = product.clone();
        handles.push(tokio::spawn(async move {
            let (title, description, category) = tokio::join!(
                client.translate(&product.title, target),
                client.translate(&product.description, target),
                client.translate(&product.category, target),
            );
            Product {
                title,
                description,
                category,
                ..product
            }
        }));
    }

    let mut translated = Vec::with_capacity(products.len());
    for (handle, original) in handles.into_iter().zip(products) {
        translated.push(handle.await.unwrap_or(original));
    }
    translated
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use marigold_core::{CurrencyCode, Price, Product, ProductId};
    use rust_decimal::Decimal;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::new(Decimal::new(1000, 2), CurrencyCode::USD),
            description: format!("{title} description"),
            category: "clothing".to_string(),
            image: String::new(),
        }
    }

    /// Translation stub: uppercases its input, fails on texts containing
    /// "broken".
    async fn stub_translator() -> String {
        async fn translate(
            Json(body): Json<serde_json::Value>,
        ) -> Result<Json<serde_json::Value>, StatusCode> {
            let text = body["q"].as_str().unwrap_or_default();
            if text.contains("broken") {
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
            Ok(Json(
                serde_json::json!({ "translatedText": text.to_uppercase() }),
            ))
        }

        let app = Router::new().route("/translate", post(translate));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_language_table_covers_eleven_languages() {
        assert_eq!(LANGUAGES.len(), 11);
        let spanish = find_language("spanish").unwrap();
        assert_eq!(spanish.speech_tag, "es-ES");
        assert_eq!(spanish.translate_code, "es");
        assert!(find_language("klingon").is_none());
    }

    #[tokio::test]
    async fn test_disabled_client_passes_text_through() {
        let client = TranslateClient::new(None);
        assert!(!client.is_enabled());
        assert_eq!(client.translate("hello", "es").await, "hello");
    }

    #[tokio::test]
    async fn test_english_target_skips_the_endpoint() {
        // Endpoint is unreachable; an "en" target must not touch it
        let client = TranslateClient::new(Some("http://127.0.0.1:9".to_string()));
        assert_eq!(client.translate("hello", "en").await, "hello");
    }

    #[tokio::test]
    async fn test_translates_via_endpoint() {
        let base = stub_translator().await;
        let client = TranslateClient::new(Some(base));
        assert_eq!(client.translate("hello", "es").await, "HELLO");
    }

    #[tokio::test]
    async fn test_failed_item_keeps_original_while_others_translate() {
        let base = stub_translator().await;
        let client = TranslateClient::new(Some(base));

        let products = vec![product(1, "backpack"), product(2, "broken lamp")];
        let translated = translate_products(&client, products, "es").await;

        assert_eq!(translated[0].title, "BACKPACK");
        assert_eq!(translated[0].category, "CLOTHING");
        // The failing item falls back to its original text
        assert_eq!(translated[1].title, "broken lamp");
        assert_eq!(translated[1].description, "broken lamp description");
        // Fields that did not fail still translate
        assert_eq!(translated[1].category, "CLOTHING");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_falls_back_everywhere() {
        let client = TranslateClient::new(Some("http://127.0.0.1:9".to_string()));
        let products = vec![product(1, "backpack")];
        let translated = translate_products(&client, products.clone(), "es").await;
        assert_eq!(translated, products);
    }
}
