//! Minimal wrapper around the X list timeline endpoint.
//!
//! Fetches a single page of the list's most recent posts (up to 100); the
//! endpoint does not accept a time range, so window filtering happens after
//! the fetch.
use crate::twitter::extract::tweet_to_post;
use crate::twitter::types::ListTweetsResponse;
use async_trait::async_trait;
use roundup_common::{Result, RoundupError};
use roundup_core::{PostRecord, PostSource, SourceFailure, TimeWindow};
use roundup_http::{Auth, HttpClient, RequestOpts};
use std::borrow::Cow;

pub const DEFAULT_API_BASE: &str = "https://api.x.com/2";
pub const DEFAULT_MAX_RESULTS: u32 = 100;

const TWEET_FIELDS: &str = "created_at,public_metrics";

#[derive(Clone)]
pub struct TwitterApi {
    http: HttpClient,
    bearer: String,
    max_results: u32,
}

impl TwitterApi {
    pub fn new(bearer_token: String) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE, bearer_token)
    }

    /// Point the client at another API root (proxies, tests).
    pub fn with_base_url(base_url: &str, bearer_token: String) -> Result<Self> {
        let http = HttpClient::new(base_url)
            .map_err(|e| RoundupError::Config(format!("twitter base url: {e}")))?;
        Ok(Self {
            http,
            bearer: bearer_token,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Page size, clamped to what the endpoint accepts.
    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n.clamp(1, 100);
        self
    }

    /// Fetch the most recent posts of `list_id`.
    pub async fn list_tweets(&self, list_id: &str) -> Result<ListTweetsResponse> {
        if list_id.is_empty() || !list_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RoundupError::Config(format!("invalid list id: {list_id:?}")));
        }

        let params: Vec<(&str, Cow<'_, str>)> = vec![
            ("max_results", self.max_results.to_string().into()),
            ("tweet.fields", TWEET_FIELDS.into()),
        ];

        let resp: ListTweetsResponse = self
            .http
            .get_json(
                &format!("lists/{list_id}/tweets"),
                RequestOpts {
                    auth: Some(Auth::Bearer(&self.bearer)),
                    query: Some(params),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| RoundupError::Provider(format!("X list timeline: {e}")))?;

        tracing::debug!(
            list_id,
            result_count = ?resp.meta.as_ref().and_then(|m| m.result_count),
            "twitter.list_tweets"
        );
        Ok(resp)
    }

    /// Fetch the list and convert every usable tweet into a [`PostRecord`].
    pub async fn list_posts(&self, list_id: &str) -> Result<Vec<PostRecord>> {
        let resp = self.list_tweets(list_id).await?;
        let tweets = resp.data.unwrap_or_default();
        let fetched = tweets.len();
        let posts: Vec<PostRecord> = tweets.iter().filter_map(tweet_to_post).collect();

        tracing::info!(list_id, fetched, usable = posts.len(), "twitter.list_posts");
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for TwitterApi {
    async fn fetch_posts(
        &self,
        list_id: &str,
        window: &TimeWindow,
    ) -> std::result::Result<Vec<PostRecord>, SourceFailure> {
        let posts = self.list_posts(list_id).await?;
        Ok(posts
            .into_iter()
            .filter(|post| window.contains(post.created_at()))
            .collect())
    }
}
