use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::LatencyConfig;
use crate::error::FetchError;
use crate::fixtures;
use crate::model::{Post, PostCategory, ProfilePatch, UserId, UserProfile};

/// Remote source of profile data.
///
/// Reads are idempotent. Updates are last-write-wins unless a backend says
/// otherwise. Implementations must tolerate concurrent calls.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, FetchError>;

    async fn fetch_posts(
        &self,
        user_id: &UserId,
        category: PostCategory,
    ) -> Result<Vec<Post>, FetchError>;

    async fn update_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> Result<UserProfile, FetchError>;
}

/// Fixture-backed service with artificial latency. Never fails, stores
/// nothing: every call starts from the same fixtures.
#[derive(Debug, Clone, Default)]
pub struct MockProfileService {
    latency: LatencyConfig,
}

impl MockProfileService {
    #[must_use]
    pub fn new(latency: LatencyConfig) -> Self {
        Self { latency }
    }

    #[must_use]
    pub fn instant() -> Self {
        Self::new(LatencyConfig::instant())
    }

    #[must_use]
    pub fn latency(&self) -> LatencyConfig {
        self.latency
    }

    async fn simulate(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ProfileService for MockProfileService {
    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, FetchError> {
        Self::simulate(self.latency.profile).await;
        debug!("serving fixture profile");
        Ok(fixtures::user_profile())
    }

    #[instrument(skip_all, fields(user_id = %user_id, category = %category))]
    async fn fetch_posts(
        &self,
        user_id: &UserId,
        category: PostCategory,
    ) -> Result<Vec<Post>, FetchError> {
        Self::simulate(self.latency.posts).await;
        let posts = fixtures::posts_for(category);
        debug!(count = posts.len(), "serving fixture posts");
        Ok(posts)
    }

    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn update_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> Result<UserProfile, FetchError> {
        Self::simulate(self.latency.update_profile).await;
        Ok(fixtures::user_profile().merged(patch))
    }
}
