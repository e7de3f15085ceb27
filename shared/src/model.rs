use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FetchError;
use crate::fetch::{ClearPolicy, ResourceController};
use crate::refresh::RefreshCoordinator;
use crate::DEFAULT_USER_ID;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId);
typed_id!(PostId);
typed_id!(AssetId);

// --- Images ---

/// Either a remote location or a handle to an asset bundled with the shell.
/// The shell resolves each variant differently, so the core never converts
/// one into the other.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    Remote { uri: String },
    Local { asset: AssetId },
}

impl ImageSource {
    pub fn remote(uri: impl Into<String>) -> Self {
        Self::Remote { uri: uri.into() }
    }

    pub fn local(asset: impl Into<String>) -> Self {
        Self::Local {
            asset: AssetId::new(asset),
        }
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

// --- Profile ---

/// Follower counts are display strings ("12K"), not numbers.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileStats {
    pub posts: u32,
    pub followers: String,
    pub following: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub bio: String,
    pub website: String,
    pub profile_picture: ImageSource,
    pub cover_image: ImageSource,
    pub stats: ProfileStats,
}

impl UserProfile {
    /// Shallow merge: each field present in the patch replaces the whole
    /// field, `stats` included.
    #[must_use]
    pub fn merged(self, patch: ProfilePatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.unwrap_or(self.name),
            username: patch.username.unwrap_or(self.username),
            bio: patch.bio.unwrap_or(self.bio),
            website: patch.website.unwrap_or(self.website),
            profile_picture: patch.profile_picture.unwrap_or(self.profile_picture),
            cover_image: patch.cover_image.unwrap_or(self.cover_image),
            stats: patch.stats.unwrap_or(self.stats),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ProfileStats>,
}

impl ProfilePatch {
    #[must_use]
    pub fn bio(bio: impl Into<String>) -> Self {
        Self {
            bio: Some(bio.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// --- Posts ---

/// Category tag of a post. Values coming in from the outside never fail to
/// parse: anything unrecognized is treated as `Post`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PostCategory {
    #[default]
    Post,
    Clip,
    Tagged,
}

impl PostCategory {
    pub const ALL: [Self; 3] = [Self::Post, Self::Clip, Self::Tagged];

    #[must_use]
    pub fn from_query(value: &str) -> Self {
        match value {
            "post" => Self::Post,
            "clip" => Self::Clip,
            "tagged" => Self::Tagged,
            other => {
                tracing::debug!(category = other, "unrecognized post category, using post");
                Self::Post
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Clip => "clip",
            Self::Tagged => "tagged",
        }
    }
}

impl From<String> for PostCategory {
    fn from(value: String) -> Self {
        Self::from_query(&value)
    }
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub image: ImageSource,
    pub category: PostCategory,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTab {
    #[default]
    Posts,
    Clips,
    Tagged,
}

impl ProfileTab {
    #[must_use]
    pub const fn category(self) -> PostCategory {
        match self {
            Self::Posts => PostCategory::Post,
            Self::Clips => PostCategory::Clip,
            Self::Tagged => PostCategory::Tagged,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Posts => "Posts",
            Self::Clips => "Clips",
            Self::Tagged => "Tagged",
        }
    }
}

/// Key of the posts resource: a new value means a new fetch cycle.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PostsKey {
    pub user_id: UserId,
    pub category: PostCategory,
}

impl PostsKey {
    pub fn new(user_id: UserId, category: PostCategory) -> Self {
        Self { user_id, category }
    }
}

// --- App model ---

#[derive(Debug)]
pub struct Model {
    pub user_id: UserId,
    pub active_tab: ProfileTab,

    pub profile: ResourceController<UserId, UserProfile>,
    pub posts: ResourceController<PostsKey, Vec<Post>>,
    pub refresh: RefreshCoordinator,

    /// First failure reported by the most recent pull-to-refresh.
    pub last_refresh_error: Option<FetchError>,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            user_id: UserId::new(DEFAULT_USER_ID),
            active_tab: ProfileTab::Posts,
            profile: ResourceController::new(ClearPolicy::RetainData),
            posts: ResourceController::new(ClearPolicy::ClearData),
            refresh: RefreshCoordinator::default(),
            last_refresh_error: None,
        }
    }
}

impl Model {
    #[must_use]
    pub fn posts_key(&self) -> PostsKey {
        PostsKey::new(self.user_id.clone(), self.active_tab.category())
    }
}
