use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::config::Route;
use crate::error::FetchError;
use crate::model::{Post, PostCategory, ProfilePatch, UserId, UserProfile};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfileApiOperation {
    FetchProfile {
        user_id: UserId,
    },
    FetchPosts {
        user_id: UserId,
        category: PostCategory,
    },
    UpdateProfile {
        user_id: UserId,
        patch: ProfilePatch,
    },
}

impl ProfileApiOperation {
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Self::FetchProfile { user_id } => Route::GetProfile {
                user_id: user_id.clone(),
            },
            Self::FetchPosts { user_id, category } => Route::GetPosts {
                user_id: user_id.clone(),
                category: Some(*category),
            },
            Self::UpdateProfile { user_id, .. } => Route::UpdateProfile {
                user_id: user_id.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProfileApiOutput {
    Profile(UserProfile),
    Posts(Vec<Post>),
}

impl ProfileApiOutput {
    pub fn into_profile(self) -> Result<UserProfile, FetchError> {
        match self {
            Self::Profile(profile) => Ok(profile),
            Self::Posts(_) => Err(FetchError::unknown("expected a profile, got posts")),
        }
    }

    pub fn into_posts(self) -> Result<Vec<Post>, FetchError> {
        match self {
            Self::Posts(posts) => Ok(posts),
            Self::Profile(_) => Err(FetchError::unknown("expected posts, got a profile")),
        }
    }
}

pub type ProfileApiResult = Result<ProfileApiOutput, FetchError>;

impl Operation for ProfileApiOperation {
    type Output = ProfileApiResult;
}

pub struct ProfileApi<Ev> {
    context: CapabilityContext<ProfileApiOperation, Ev>,
}

impl<Ev> Clone for ProfileApi<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for ProfileApi<Ev> {
    type Operation = ProfileApiOperation;
    type MappedSelf<MappedEv> = ProfileApi<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        ProfileApi::new(self.context.map_event(f))
    }
}

impl<Ev> ProfileApi<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<ProfileApiOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn fetch_profile<F>(&self, user_id: UserId, callback: F)
    where
        F: FnOnce(Result<UserProfile, FetchError>) -> Ev + Send + 'static,
    {
        self.request(ProfileApiOperation::FetchProfile { user_id }, move |result| {
            callback(result.and_then(ProfileApiOutput::into_profile))
        });
    }

    pub fn fetch_posts<F>(&self, user_id: UserId, category: PostCategory, callback: F)
    where
        F: FnOnce(Result<Vec<Post>, FetchError>) -> Ev + Send + 'static,
    {
        self.request(
            ProfileApiOperation::FetchPosts { user_id, category },
            move |result| callback(result.and_then(ProfileApiOutput::into_posts)),
        );
    }

    pub fn update_profile<F>(&self, user_id: UserId, patch: ProfilePatch, callback: F)
    where
        F: FnOnce(Result<UserProfile, FetchError>) -> Ev + Send + 'static,
    {
        self.request(
            ProfileApiOperation::UpdateProfile { user_id, patch },
            move |result| callback(result.and_then(ProfileApiOutput::into_profile)),
        );
    }

    fn request<F>(&self, operation: ProfileApiOperation, callback: F)
    where
        F: FnOnce(ProfileApiResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}
