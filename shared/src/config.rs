use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::model::{PostCategory, PostId, UserId};
use crate::{
    API_BASE_URL, API_TIMEOUT, POSTS_LATENCY, PROFILE_LATENCY, UPDATE_PROFILE_LATENCY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Put,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

/// REST shape of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    GetProfile { user_id: UserId },
    UpdateProfile { user_id: UserId },
    GetPosts { user_id: UserId, category: Option<PostCategory> },
    GetPost { post_id: PostId },
}

impl Route {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::UpdateProfile { .. } => Method::Put,
            Self::GetProfile { .. } | Self::GetPosts { .. } | Self::GetPost { .. } => Method::Get,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::GetProfile { user_id } | Self::UpdateProfile { user_id } => {
                format!("/users/{user_id}/profile")
            }
            Self::GetPosts { user_id, category } => match category {
                Some(category) => format!("/users/{user_id}/posts?type={category}"),
                None => format!("/users/{user_id}/posts"),
            },
            Self::GetPost { post_id } => format!("/posts/{post_id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.into(),
            timeout: API_TIMEOUT,
            headers: vec![("Content-Type".into(), "application/json".into())],
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Validation("timeout must be > 0".into()));
        }
        Ok(())
    }

    /// Absolute URL for a route. Route paths are rooted, so they replace any
    /// path on the base URL.
    pub fn url_for(&self, route: &Route) -> Result<Url, ConfigError> {
        let path = route.path();
        self.base()?
            .join(&path)
            .map_err(|e| ConfigError::InvalidRoute {
                path,
                reason: e.to_string(),
            })
    }

    fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|_| ConfigError::InvalidBaseUrl(self.base_url.clone()))
    }
}

/// Artificial delays of the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub profile: Duration,
    pub posts: Duration,
    pub update_profile: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            profile: PROFILE_LATENCY,
            posts: POSTS_LATENCY,
            update_profile: UPDATE_PROFILE_LATENCY,
        }
    }
}

impl LatencyConfig {
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            profile: Duration::ZERO,
            posts: Duration::ZERO,
            update_profile: Duration::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = API_TIMEOUT;
        for (name, value) in [
            ("profile", self.profile),
            ("posts", self.posts),
            ("update_profile", self.update_profile),
        ] {
            if value >= max {
                return Err(ConfigError::Validation(format!(
                    "{name} latency {}ms exceeds request timeout {}ms",
                    value.as_millis(),
                    max.as_millis()
                )));
            }
        }
        Ok(())
    }
}
