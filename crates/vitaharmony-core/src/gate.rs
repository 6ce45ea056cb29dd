//! Remote gate check.
//!
//! One GET at startup decides whether the app shows its native screens or
//! hands over to a web view. Every failure resolves to the native app; the
//! check never retries and is bounded by the configured timeout.

use reqwest::header::{ACCEPT_LANGUAGE, LOCATION, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use url::Url;

use crate::error::GateError;
use crate::storage::GateConfig;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayMode {
    /// Check still in flight.
    #[default]
    Pending,
    NativeApp,
    WebView {
        url: String,
        /// Response body for a 200, absent for redirects.
        body: Option<String>,
    },
}

impl DisplayMode {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, DisplayMode::Pending)
    }
}

/// The parts of a gate response that matter for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResponse {
    pub status: u16,
    /// URL the response came from.
    pub url: String,
    pub location: Option<String>,
    pub body: String,
}

/// Map a response to a display mode.
///
/// 200 with a body and any 3xx mean web view; everything else, including
/// a 200 with an empty body, means native app.
pub fn classify(response: GateResponse) -> DisplayMode {
    match response.status {
        200 if response.body.is_empty() => DisplayMode::NativeApp,
        200 => DisplayMode::WebView {
            url: response.url,
            body: Some(response.body),
        },
        300..=399 => DisplayMode::WebView {
            url: response.location.unwrap_or(response.url),
            body: None,
        },
        _ => DisplayMode::NativeApp,
    }
}

pub struct GateClient {
    client: Client,
    url: Url,
    user_agent: String,
    accept_language: String,
}

impl GateClient {
    pub fn new(url: &str, config: &GateConfig) -> Result<Self, GateError> {
        let url = Url::parse(url).map_err(|source| GateError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            url,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Perform the request and collect status, location and body.
    pub async fn fetch(&self) -> Result<GateResponse, GateError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        // Only a 200 body is ever used.
        let body = if status == StatusCode::OK {
            response.text().await?
        } else {
            String::new()
        };

        Ok(GateResponse {
            status: status.as_u16(),
            url,
            location,
            body,
        })
    }

    /// Fetch and classify; any failure means native app.
    pub async fn check(&self) -> DisplayMode {
        match self.fetch().await {
            Ok(response) => {
                tracing::debug!(status = response.status, body_len = response.body.len(), "gate responded");
                classify(response)
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "gate check failed, using native app");
                DisplayMode::NativeApp
            }
        }
    }
}

/// Resolve the display mode for a configuration. No URL means native app.
pub async fn resolve(config: &GateConfig) -> DisplayMode {
    let Some(url) = config.url.as_deref().filter(|u| !u.trim().is_empty()) else {
        tracing::debug!("no gate url configured");
        return DisplayMode::NativeApp;
    };
    let mode = match GateClient::new(url, config) {
        Ok(client) => client.check().await,
        Err(e) => {
            tracing::warn!(error = %e, "gate client unavailable, using native app");
            DisplayMode::NativeApp
        }
    };
    tracing::info!(?mode, "display mode resolved");
    mode
}

/// Run the gate check in the background. The receiver holds
/// [`DisplayMode::Pending`] until the check resolves.
pub fn spawn_gate_check(config: GateConfig) -> watch::Receiver<DisplayMode> {
    let (tx, rx) = watch::channel(DisplayMode::Pending);
    tokio::spawn(async move {
        let mode = resolve(&config).await;
        // Receiver may already be gone.
        let _ = tx.send(mode);
    });
    rx
}

/// Wait until the background check has resolved.
pub async fn wait_resolved(rx: &mut watch::Receiver<DisplayMode>) -> DisplayMode {
    match rx.wait_for(DisplayMode::is_resolved).await {
        Ok(mode) => mode.clone(),
        // Sender dropped without resolving.
        Err(_) => DisplayMode::NativeApp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> GateResponse {
        GateResponse {
            status,
            url: "https://gate.test/".into(),
            location: None,
            body: body.into(),
        }
    }

    #[test]
    fn ok_with_body_is_web_view() {
        assert_eq!(
            classify(response(200, "X")),
            DisplayMode::WebView {
                url: "https://gate.test/".into(),
                body: Some("X".into()),
            }
        );
    }

    #[test]
    fn ok_without_body_is_native() {
        assert_eq!(classify(response(200, "")), DisplayMode::NativeApp);
    }

    #[test]
    fn redirects_are_web_view_with_location() {
        let mut r = response(302, "");
        r.location = Some("https://web.test/app".into());
        assert_eq!(
            classify(r),
            DisplayMode::WebView {
                url: "https://web.test/app".into(),
                body: None,
            }
        );
        assert!(matches!(classify(response(301, "")), DisplayMode::WebView { .. }));
        assert!(matches!(classify(response(307, "")), DisplayMode::WebView { .. }));
    }

    #[test]
    fn other_statuses_are_native() {
        for status in [201, 204, 404, 500, 503] {
            assert_eq!(classify(response(status, "X")), DisplayMode::NativeApp, "{status}");
        }
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(matches!(
            GateClient::new("not a url", &GateConfig::default()),
            Err(GateError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn no_url_resolves_native() {
        let mut rx = spawn_gate_check(GateConfig::default());
        assert_eq!(wait_resolved(&mut rx).await, DisplayMode::NativeApp);
    }
}
