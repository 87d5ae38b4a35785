//! HTTP client for the remote draft document store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use tracing::info;
use vakalath_core::{Draft, DraftId};

use crate::SyncError;
use crate::remote::{DraftSummary, RemoteDraftStore};

/// HTTP client for the `/api/users/{user}/drafts` endpoints.
///
/// `PATCH` on a draft URL merges the body into the stored record at the top
/// level and answers with the server's update time.
pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    updated_at: DateTime<Utc>,
}

impl HttpRemoteStore {
    /// Create a client for the given base URL, e.g. `http://localhost:4000`.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SyncError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SyncError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// `{base}/api/users/{user}/drafts[/{id}]`, each segment percent-encoded.
    fn endpoint(&self, user_id: &str, id: Option<DraftId>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "users", user_id, "drafts"]);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    fn drafts_url(&self, user_id: &str) -> Url {
        self.endpoint(user_id, None)
    }

    fn draft_url(&self, user_id: &str, id: DraftId) -> Url {
        self.endpoint(user_id, Some(id))
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SyncError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteDraftStore for HttpRemoteStore {
    async fn upsert_draft(&self, user_id: &str, draft: &Draft) -> Result<DateTime<Utc>, SyncError> {
        let url = self.draft_url(user_id, draft.id);
        info!(url = %url, "pushing draft");
        let resp = self.client.patch(url).json(draft).send().await?;
        let result: UpsertResponse = check(resp).await?.json().await?;
        info!(updated_at = %result.updated_at, "draft push complete");
        Ok(result.updated_at)
    }

    async fn fetch_draft(&self, user_id: &str, id: DraftId) -> Result<Option<Draft>, SyncError> {
        let url = self.draft_url(user_id, id);
        info!(url = %url, "fetching draft");
        let resp = self.client.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let draft: Draft = check(resp).await?.json().await?;
        Ok(Some(draft))
    }

    async fn list_drafts(&self, user_id: &str) -> Result<Vec<DraftSummary>, SyncError> {
        let url = self.drafts_url(user_id);
        info!(url = %url, "listing drafts");
        let resp = self.client.get(url).send().await?;
        let mut drafts: Vec<DraftSummary> = check(resp).await?.json().await?;
        drafts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        info!(count = drafts.len(), "listed drafts");
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_does_not_double_up() {
        let client = HttpRemoteStore::new("http://localhost:4000/").unwrap();
        assert_eq!(
            client.drafts_url("adv-7").as_str(),
            "http://localhost:4000/api/users/adv-7/drafts"
        );
    }

    #[test]
    fn draft_urls_are_user_scoped() {
        let client = HttpRemoteStore::new("http://localhost:4000").unwrap();
        let id = DraftId::new();
        assert_eq!(
            client.draft_url("adv-7", id).as_str(),
            format!("http://localhost:4000/api/users/adv-7/drafts/{id}")
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = HttpRemoteStore::new("https://example.org/vakalath/").unwrap();
        assert_eq!(
            client.drafts_url("u1").as_str(),
            "https://example.org/vakalath/api/users/u1/drafts"
        );
    }

    #[test]
    fn user_id_is_percent_encoded() {
        let client = HttpRemoteStore::new("http://localhost:4000").unwrap();
        assert_eq!(
            client.drafts_url("a/b?c#d").as_str(),
            "http://localhost:4000/api/users/a%2Fb%3Fc%23d/drafts"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpRemoteStore::new("not a url"),
            Err(SyncError::InvalidUrl(_))
        ));
        assert!(matches!(
            HttpRemoteStore::new("mailto:clerk@example.org"),
            Err(SyncError::InvalidUrl(_))
        ));
    }

    #[test]
    fn upsert_response_parses_server_time() {
        let json = r#"{"updatedAt": "2025-06-01T10:00:00Z"}"#;
        let parsed: UpsertResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.updated_at.to_rfc3339(), "2025-06-01T10:00:00+00:00");
    }

    #[test]
    fn summary_list_parses() {
        let id = DraftId::new();
        let json = format!(
            r#"[{{"id": "{id}", "title": "O.S. 12/2025", "currentStep": 3,
                 "updatedAt": "2025-06-01T10:00:00Z"}}]"#
        );
        let parsed: Vec<DraftSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].id, id);
        assert_eq!(parsed[0].current_step, 3);
    }
}
