use serde::{Deserialize, Serialize};

use crate::fetch::FetchState;
use crate::model::{ImageSource, Post, PostId, ProfileTab, UserProfile};

/// Which presentation branch a resource should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewBranch {
    Skeleton,
    Error,
    Empty,
    Populated,
}

/// Picks a branch in fixed priority order. An error is only surfaced when
/// there is nothing else to show.
#[must_use]
pub const fn select_branch(loading: bool, has_error: bool, is_empty: bool) -> ViewBranch {
    if loading && is_empty {
        ViewBranch::Skeleton
    } else if has_error && is_empty {
        ViewBranch::Error
    } else if is_empty {
        ViewBranch::Empty
    } else {
        ViewBranch::Populated
    }
}

/// Whether fetched data counts as "nothing to show".
pub trait Contents {
    fn is_blank(&self) -> bool;
}

impl<T> Contents for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Contents for UserProfile {
    fn is_blank(&self) -> bool {
        false
    }
}

impl<T: Contents> FetchState<T> {
    #[must_use]
    pub fn branch(&self) -> ViewBranch {
        let is_empty = self.data.as_ref().map_or(true, Contents::is_blank);
        select_branch(self.loading, self.error.is_some(), is_empty)
    }
}

// --- View model ---

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostTile {
    pub id: PostId,
    pub image: ImageSource,
    pub is_clip: bool,
}

impl From<&Post> for PostTile {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            image: post.image.clone(),
            is_clip: post.category == crate::model::PostCategory::Clip,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostGridView {
    Skeleton {
        placeholders: usize,
    },
    Error {
        title: String,
        message: String,
        retry_event: String,
    },
    Empty {
        title: String,
        message: String,
    },
    Populated {
        tiles: Vec<PostTile>,
        is_loading: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScreenView {
    Skeleton,
    Error {
        title: String,
        message: String,
        retry_event: String,
    },
    Ready {
        profile: UserProfile,
        grid: PostGridView,
        /// A refetch or save is running behind the visible profile.
        is_updating: bool,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub screen: ScreenView,
    pub active_tab: ProfileTab,
    pub is_refreshing: bool,
    pub can_refresh: bool,
}
