use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::synthetic::{Challenge, ChallengeStatus};
use crate::virtues::{CharacterMoment, UserGoals};

use super::types::{
    AssessmentRecord, AssessmentSubmit, ChallengeRecord, ChallengeStatusUpdate,
    DashboardStatsRecord, GoalRecord, GoalSubmit, MomentRecord, MomentSubmit, NewsArticle,
    TokenRecord, WeeklyReflectionRecord,
};
use super::{Assessment, DashboardStats, WeeklyReflection};

/// Client for the character development backend.
///
/// Calls are fire-and-await: a failed request surfaces an [`ApiError`] for
/// user-facing display, with no retry or background reconciliation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout_ms: u64,
}

impl ApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout_ms: config.timeout_ms,
        })
    }

    /// Use a previously obtained bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Whether the client currently holds a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in and keep the returned bearer token for subsequent calls.
    pub async fn login(&mut self, email: &str, password: &str) -> ApiResult<()> {
        let request = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .form(&[("username", email), ("password", password)]);

        let token: TokenRecord = self.execute("POST /auth/login", request).await?;
        self.token = Some(token.token);
        info!("Logged in");
        Ok(())
    }

    /// Fetch the dashboard payload: current scores plus trend history.
    pub async fn get_dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let record: DashboardStatsRecord = self.request(Method::GET, "/dashboard/stats").await?;
        Ok(record.into_stats())
    }

    /// Fetch the weekly reflection feed.
    pub async fn get_weekly_reflection(&self) -> ApiResult<WeeklyReflection> {
        let record: WeeklyReflectionRecord =
            self.request(Method::GET, "/reflection/weekly").await?;
        Ok(record.into_reflection())
    }

    /// Fetch the latest assessment.
    pub async fn get_assessment(&self) -> ApiResult<Assessment> {
        let record: AssessmentRecord = self.request(Method::GET, "/assessment").await?;
        Ok(record.into_assessment())
    }

    /// Submit questionnaire answers, returning the scored assessment.
    pub async fn submit_assessment(&self, submit: &AssessmentSubmit) -> ApiResult<Assessment> {
        let request = self
            .client
            .post(format!("{}/assessment", self.base_url))
            .json(submit);
        let record: AssessmentRecord = self.execute("POST /assessment", request).await?;
        Ok(record.into_assessment())
    }

    /// Fetch the user's goals.
    pub async fn get_goals(&self) -> ApiResult<UserGoals> {
        let record: GoalRecord = self.request(Method::GET, "/goals").await?;
        Ok(record.into_goals())
    }

    /// Save the user's goals, returning the stored record.
    pub async fn save_goals(&self, goals: &UserGoals) -> ApiResult<UserGoals> {
        let request = self
            .client
            .post(format!("{}/goals", self.base_url))
            .json(&GoalSubmit::from_goals(goals));
        let record: GoalRecord = self.execute("POST /goals", request).await?;
        Ok(record.into_goals())
    }

    /// Fetch logged character moments, oldest first.
    pub async fn get_moments(&self) -> ApiResult<Vec<CharacterMoment>> {
        let records: Vec<MomentRecord> = self.request(Method::GET, "/moments").await?;
        Ok(records.into_iter().map(MomentRecord::into_moment).collect())
    }

    /// Log a character moment, returning it with the server's feedback.
    pub async fn submit_moment(&self, content: &str, virtue_id: &str) -> ApiResult<CharacterMoment> {
        let request = self
            .client
            .post(format!("{}/moments", self.base_url))
            .json(&MomentSubmit {
                content: content.to_string(),
                virtue_id: virtue_id.to_string(),
            });
        let record: MomentRecord = self.execute("POST /moments", request).await?;
        Ok(record.into_moment())
    }

    /// Fetch this week's challenges.
    pub async fn get_challenges(&self) -> ApiResult<Vec<Challenge>> {
        let records: Vec<ChallengeRecord> = self.request(Method::GET, "/challenges").await?;
        Ok(records
            .into_iter()
            .map(ChallengeRecord::into_challenge)
            .collect())
    }

    /// Toggle a challenge's status, returning the updated record.
    pub async fn update_challenge_status(
        &self,
        challenge_id: &str,
        status: ChallengeStatus,
    ) -> ApiResult<Challenge> {
        let request = self
            .client
            .patch(format!("{}/challenges/{challenge_id}", self.base_url))
            .json(&ChallengeStatusUpdate { status });
        let record: ChallengeRecord = self.execute("PATCH /challenges", request).await?;
        Ok(record.into_challenge())
    }

    /// Search news articles matched to virtues.
    pub async fn search_news(&self, query: Option<&str>) -> ApiResult<Vec<NewsArticle>> {
        let mut request = self.client.get(format!("{}/news", self.base_url));
        if let Some(query) = query {
            request = request.query(&[("q", query)]);
        }
        self.execute("GET /news", request).await
    }

    /// Issue a bodyless request against a path under the base URL.
    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str) -> ApiResult<T> {
        let label = format!("{method} {path}");
        let request = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        self.execute(&label, request).await
    }

    /// Attach auth, send, and decode one request.
    async fn execute<T: DeserializeOwned>(
        &self,
        label: &str,
        mut request: RequestBuilder,
    ) -> ApiResult<T> {
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let start = Instant::now();
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_ms: self.timeout_ms,
                }
            } else {
                ApiError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                endpoint = label,
                status = status.as_u16(),
                latency_ms = start.elapsed().as_millis() as u64,
                "Backend call failed"
            );
            return Err(Self::error_for(status, response).await);
        }

        debug!(
            endpoint = label,
            latency_ms = start.elapsed().as_millis() as u64,
            "Backend call succeeded"
        );

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            message: format!("Failed to parse response: {e}"),
        })
    }

    /// Map an error response, preferring the backend's `detail` message.
    async fn error_for(status: StatusCode, response: Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or(body);

        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
