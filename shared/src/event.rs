use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::fetch::CycleId;
use crate::model::{Post, ProfilePatch, ProfileTab, UserId, UserProfile};

// --- Event enum: large variants boxed ---

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub enum Event {
    #[default]
    Noop,

    // Screen lifecycle & user input
    ScreenOpened {
        user_id: Option<UserId>,
    },
    TabSelected {
        tab: ProfileTab,
    },
    RetryProfile,
    RetryPosts,
    RefreshPulled,
    ProfileEditSubmitted(Box<ProfilePatch>),

    // Capability responses
    ProfileLoaded {
        cycle: CycleId,
        result: Box<Result<UserProfile, FetchError>>,
    },
    ProfileSaved {
        cycle: CycleId,
        result: Box<Result<UserProfile, FetchError>>,
    },
    PostsLoaded {
        cycle: CycleId,
        result: Box<Result<Vec<Post>, FetchError>>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::ScreenOpened { .. } => "screen_opened",
            Self::TabSelected { .. } => "tab_selected",
            Self::RetryProfile => "retry_profile",
            Self::RetryPosts => "retry_posts",
            Self::RefreshPulled => "refresh_pulled",
            Self::ProfileEditSubmitted(_) => "profile_edit_submitted",
            Self::ProfileLoaded { .. } => "profile_loaded",
            Self::ProfileSaved { .. } => "profile_saved",
            Self::PostsLoaded { .. } => "posts_loaded",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::TabSelected { .. }
                | Self::RetryProfile
                | Self::RetryPosts
                | Self::RefreshPulled
                | Self::ProfileEditSubmitted(_)
        )
    }
}
