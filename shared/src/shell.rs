//! Host-side resolution of `ProfileApi` requests.
//!
//! A native shell, or a test, takes the operation out of an
//! `Effect::ProfileApi` request, runs it against a [`ProfileService`] and
//! resolves the request with the result.

use tracing::{instrument, warn};

use crate::capabilities::{ProfileApiOperation, ProfileApiOutput, ProfileApiResult};
use crate::service::ProfileService;

/// Runs one operation against `service`. Errors are passed through
/// unchanged so the core sees the service's own classification.
#[instrument(skip_all, fields(method = operation.route().method().as_str(), path = %operation.route().path()))]
pub async fn execute<S>(service: &S, operation: ProfileApiOperation) -> ProfileApiResult
where
    S: ProfileService + ?Sized,
{
    let result = match operation {
        ProfileApiOperation::FetchProfile { user_id } => service
            .fetch_profile(&user_id)
            .await
            .map(ProfileApiOutput::Profile),
        ProfileApiOperation::FetchPosts { user_id, category } => service
            .fetch_posts(&user_id, category)
            .await
            .map(ProfileApiOutput::Posts),
        ProfileApiOperation::UpdateProfile { user_id, patch } => service
            .update_profile(&user_id, patch)
            .await
            .map(ProfileApiOutput::Profile),
    };

    if let Err(e) = &result {
        warn!(error = %e, code = e.code(), "profile api request failed");
    }
    result
}
