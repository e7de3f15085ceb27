use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::error::FetchError;
use crate::event::Event;
use crate::fetch::{Completion, Cycle, CycleId};
use crate::model::{Model, Post, PostsKey, UserId, UserProfile};
use crate::refresh::{RefreshOutcome, RefreshStart, RefreshTicket, Resource};
use crate::view::{PostGridView, PostTile, ScreenView, ViewBranch, ViewModel};
use crate::SKELETON_TILE_COUNT;

/// The profile screen: one profile resource, one posts resource keyed by the
/// active tab, and pull-to-refresh over both.
#[derive(Default)]
pub struct App;

impl App {
    fn request_profile(caps: &Capabilities, cycle: Cycle<UserId>) {
        let id = cycle.id;
        caps.profile_api.fetch_profile(cycle.key, move |result| Event::ProfileLoaded {
            cycle: id,
            result: Box::new(result),
        });
    }

    fn request_posts(caps: &Capabilities, cycle: Cycle<PostsKey>) {
        let id = cycle.id;
        let PostsKey { user_id, category } = cycle.key;
        caps.profile_api
            .fetch_posts(user_id, category, move |result| Event::PostsLoaded {
                cycle: id,
                result: Box::new(result),
            });
    }

    fn apply_profile(model: &mut Model, cycle: CycleId, result: Result<UserProfile, FetchError>) {
        let failure = result.as_ref().err().cloned();
        // A superseded cycle still settles its ticket, but its failure was
        // never shown and does not fail the refresh.
        let failure = match model.profile.complete(cycle, result) {
            Completion::Applied => failure,
            Completion::Discarded => {
                debug!(%cycle, "profile response superseded");
                None
            }
        };
        Self::settle_refresh(model, RefreshTicket::new(Resource::Profile, cycle), failure.as_ref());
    }

    fn apply_posts(model: &mut Model, cycle: CycleId, result: Result<Vec<Post>, FetchError>) {
        let failure = result.as_ref().err().cloned();
        // A superseded cycle still settles its ticket, but its failure was
        // never shown and does not fail the refresh.
        let failure = match model.posts.complete(cycle, result) {
            Completion::Applied => failure,
            Completion::Discarded => {
                debug!(%cycle, "posts response superseded");
                None
            }
        };
        Self::settle_refresh(model, RefreshTicket::new(Resource::Posts, cycle), failure.as_ref());
    }

    fn settle_refresh(model: &mut Model, ticket: RefreshTicket, failure: Option<&FetchError>) {
        let outcome = failure.map_or(Ok(()), Err);
        if let Some(outcome) = model.refresh.settle(ticket, outcome) {
            Self::record_refresh(model, outcome);
        }
    }

    fn record_refresh(model: &mut Model, outcome: RefreshOutcome) {
        match outcome {
            Ok(()) => model.last_refresh_error = None,
            Err(e) => {
                warn!(error = %e, code = e.code(), "pull-to-refresh failed");
                model.last_refresh_error = Some(e);
            }
        }
    }

    fn build_grid(model: &Model) -> PostGridView {
        let state = model.posts.state();
        match state.branch() {
            ViewBranch::Skeleton => PostGridView::Skeleton {
                placeholders: SKELETON_TILE_COUNT,
            },
            ViewBranch::Error => PostGridView::Error {
                title: "Failed to load posts".into(),
                message: state.error.as_ref().map_or_else(
                    || "Unable to fetch posts. Please try again.".into(),
                    FetchError::user_facing_message,
                ),
                retry_event: Event::RetryPosts.name().into(),
            },
            ViewBranch::Empty => PostGridView::Empty {
                title: "No posts yet".into(),
                message: "Posts will appear here once they're published".into(),
            },
            ViewBranch::Populated => PostGridView::Populated {
                tiles: state.data.iter().flatten().map(PostTile::from).collect(),
                is_loading: state.loading,
            },
        }
    }

    fn build_screen(model: &Model) -> ScreenView {
        let state = model.profile.state();
        match state.branch() {
            ViewBranch::Skeleton => ScreenView::Skeleton,
            ViewBranch::Error => ScreenView::Error {
                title: "Failed to load profile".into(),
                message: state.error.as_ref().map_or_else(
                    || "Unable to fetch profile data. Please try again.".into(),
                    FetchError::user_facing_message,
                ),
                retry_event: Event::RetryProfile.name().into(),
            },
            ViewBranch::Empty => ScreenView::Error {
                title: "Profile not found".into(),
                message: "Unable to load profile data".into(),
                retry_event: Event::RetryProfile.name().into(),
            },
            ViewBranch::Populated => match &state.data {
                Some(profile) => ScreenView::Ready {
                    profile: profile.clone(),
                    grid: Self::build_grid(model),
                    is_updating: state.loading,
                },
                None => ScreenView::Skeleton,
            },
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if event.is_user_initiated() {
            debug!(event = event.name(), "user action");
        }

        match event {
            Event::Noop => {}

            Event::ScreenOpened { user_id } => {
                if let Some(user_id) = user_id {
                    model.user_id = user_id;
                }
                if let Some(cycle) = model.profile.start(model.user_id.clone()) {
                    Self::request_profile(caps, cycle);
                }
                if let Some(cycle) = model.posts.start(model.posts_key()) {
                    Self::request_posts(caps, cycle);
                }
                caps.render.render();
            }

            Event::TabSelected { tab } => {
                if tab == model.active_tab {
                    return;
                }
                model.active_tab = tab;
                if let Some(cycle) = model.posts.start(model.posts_key()) {
                    Self::request_posts(caps, cycle);
                }
                caps.render.render();
            }

            Event::RetryProfile => {
                if let Some(cycle) = model.profile.refetch() {
                    Self::request_profile(caps, cycle);
                    caps.render.render();
                }
            }

            Event::RetryPosts => {
                if let Some(cycle) = model.posts.refetch() {
                    Self::request_posts(caps, cycle);
                    caps.render.render();
                }
            }

            Event::RefreshPulled => {
                let start = model.refresh.run(|| {
                    let mut tickets = Vec::with_capacity(2);
                    if let Some(cycle) = model.profile.refetch() {
                        tickets.push(RefreshTicket::new(Resource::Profile, cycle.id));
                        Self::request_profile(caps, cycle);
                    }
                    if let Some(cycle) = model.posts.refetch() {
                        tickets.push(RefreshTicket::new(Resource::Posts, cycle.id));
                        Self::request_posts(caps, cycle);
                    }
                    tickets
                });

                match start {
                    RefreshStart::Started => {}
                    RefreshStart::AlreadyRefreshing => return,
                    RefreshStart::Settled(outcome) => Self::record_refresh(model, outcome),
                }
                caps.render.render();
            }

            Event::ProfileEditSubmitted(patch) => {
                if patch.is_empty() {
                    debug!("empty profile patch, nothing to save");
                    return;
                }
                // A save is a profile cycle too: it supersedes any read in flight.
                let Some(cycle) = model.profile.refetch() else {
                    warn!("profile edit before the screen was opened, ignoring");
                    return;
                };
                let id = cycle.id;
                info!(cycle = %id, "saving profile");
                caps.profile_api
                    .update_profile(cycle.key, *patch, move |result| Event::ProfileSaved {
                        cycle: id,
                        result: Box::new(result),
                    });
                caps.render.render();
            }

            Event::ProfileLoaded { cycle, result } | Event::ProfileSaved { cycle, result } => {
                Self::apply_profile(model, cycle, *result);
                caps.render.render();
            }

            Event::PostsLoaded { cycle, result } => {
                Self::apply_posts(model, cycle, *result);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let is_refreshing = model.refresh.is_refreshing();
        ViewModel {
            screen: Self::build_screen(model),
            active_tab: model.active_tab,
            is_refreshing,
            can_refresh: !is_refreshing,
        }
    }
}
