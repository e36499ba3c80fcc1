//! Thin client for the quit-plan REST backend. The engine never does I/O;
//! this is the caller side that feeds it.

use anyhow::{Context, Result, bail};
use quitplan_core::{DailyProgressEntry, QuitPlan};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::BackendSection;

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn from_config(cfg: &BackendSection) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = cfg.token.as_deref().filter(|t| !t.is_empty()) {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).context("invalid backend token")?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .default_headers(headers)
            .build()
            .context("build http client")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn plan_url(&self, user_id: i64) -> String {
        format!("{}/quit-plan/user/{user_id}", self.base_url)
    }

    pub fn progress_url(&self, plan_id: i64) -> String {
        format!("{}/quit-progress/plan/{plan_id}", self.base_url)
    }

    /// `GET /quit-plan/user/{id}`
    pub async fn fetch_plan(&self, user_id: i64) -> Result<QuitPlan> {
        self.get_json(&self.plan_url(user_id)).await
    }

    /// Daily entries recorded against a plan.
    pub async fn fetch_progress(&self, plan_id: i64) -> Result<Vec<DailyProgressEntry>> {
        self.get_json(&self.progress_url(plan_id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "backend request");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("backend error: {status} {txt}");
        }

        resp.json().await.with_context(|| format!("parse response from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_strip_trailing_slash() {
        let cfg = BackendSection {
            base_url: "https://api.example.com/v1/".to_string(),
            ..BackendSection::default()
        };
        let client = BackendClient::from_config(&cfg).unwrap();
        assert_eq!(client.plan_url(42), "https://api.example.com/v1/quit-plan/user/42");
        assert_eq!(client.progress_url(7), "https://api.example.com/v1/quit-progress/plan/7");
    }

    #[test]
    fn rejects_token_with_newline() {
        let cfg = BackendSection {
            token: Some("abc\ndef".to_string()),
            ..BackendSection::default()
        };
        assert!(BackendClient::from_config(&cfg).is_err());
    }
}
