use async_trait::async_trait;
use crux_core::testing::AppTester;
use crux_core::Request;
use profile_core::capabilities::ProfileApiOperation;
use profile_core::fixtures;
use profile_core::shell;
use profile_core::{
    App, Effect, Event, FetchError, MockProfileService, Model, Post, PostCategory, PostGridView,
    ProfilePatch, ProfileService, ProfileTab, ScreenView, UserId, UserProfile,
};

type Tester = AppTester<App, Effect>;
type ApiRequest = Request<ProfileApiOperation>;

/// Service whose answers are fixed per resource.
struct Scripted {
    profile: Result<UserProfile, FetchError>,
    posts: Result<Vec<Post>, FetchError>,
}

impl Scripted {
    fn failing_posts() -> Self {
        Self {
            profile: Ok(fixtures::user_profile()),
            posts: Err(FetchError::network("timeout")),
        }
    }

    fn failing_profile() -> Self {
        Self {
            profile: Err(FetchError::network("offline")),
            posts: Ok(fixtures::posts()),
        }
    }

    fn no_posts() -> Self {
        Self {
            profile: Ok(fixtures::user_profile()),
            posts: Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl ProfileService for Scripted {
    async fn fetch_profile(&self, _: &UserId) -> Result<UserProfile, FetchError> {
        self.profile.clone()
    }

    async fn fetch_posts(&self, _: &UserId, _: PostCategory) -> Result<Vec<Post>, FetchError> {
        self.posts.clone()
    }

    async fn update_profile(
        &self,
        _: &UserId,
        patch: ProfilePatch,
    ) -> Result<UserProfile, FetchError> {
        self.profile.clone().map(|p| p.merged(patch))
    }
}

fn split(effects: Vec<Effect>) -> (bool, Vec<ApiRequest>) {
    let mut rendered = false;
    let mut requests = Vec::new();
    for effect in effects {
        match effect {
            Effect::Render(_) => rendered = true,
            Effect::ProfileApi(request) => requests.push(request),
        }
    }
    (rendered, requests)
}

fn send(app: &Tester, model: &mut Model, event: Event) -> Vec<ApiRequest> {
    split(app.update(event, model).effects).1
}

/// Runs one request against `service` and feeds the resulting events back
/// into the app.
async fn answer(
    app: &Tester,
    model: &mut Model,
    service: &dyn ProfileService,
    mut request: ApiRequest,
) -> Vec<ApiRequest> {
    let output = shell::execute(service, request.operation.clone()).await;
    let update = app.resolve(&mut request, output).expect("request resolves");

    let mut follow_up = Vec::new();
    for event in update.events {
        follow_up.extend(send(app, model, event));
    }
    follow_up
}

async fn answer_all(
    app: &Tester,
    model: &mut Model,
    service: &dyn ProfileService,
    mut requests: Vec<ApiRequest>,
) {
    while let Some(request) = requests.pop() {
        let more = answer(app, model, service, request).await;
        requests.extend(more);
    }
}

async fn opened(service: &dyn ProfileService) -> (Tester, Model) {
    let app = Tester::default();
    let mut model = Model::default();
    let requests = send(&app, &mut model, Event::ScreenOpened { user_id: None });
    answer_all(&app, &mut model, service, requests).await;
    (app, model)
}

fn tile_ids(app: &Tester, model: &Model) -> Vec<String> {
    match app.view(model).screen {
        ScreenView::Ready {
            grid: PostGridView::Populated { tiles, .. },
            ..
        } => tiles.into_iter().map(|t| t.id.to_string()).collect(),
        other => panic!("expected populated grid, got {other:?}"),
    }
}

#[tokio::test]
async fn test_screen_loads_profile_and_posts() {
    let app = Tester::default();
    let mut model = Model::default();

    let update = app.update(Event::ScreenOpened { user_id: None }, &mut model);
    let (rendered, requests) = split(update.effects);
    assert!(rendered);
    assert_eq!(requests.len(), 2);

    // Loading is visible before any response arrives.
    assert!(model.profile.state().loading);
    assert!(model.posts.state().loading);
    assert_eq!(app.view(&model).screen, ScreenView::Skeleton);

    answer_all(&app, &mut model, &MockProfileService::instant(), requests).await;

    let view = app.view(&model);
    let ScreenView::Ready {
        profile,
        grid,
        is_updating,
    } = view.screen
    else {
        panic!("expected ready screen");
    };
    assert_eq!(profile.stats.posts, 124);
    assert_eq!(profile.stats.followers, "12K");
    assert!(!is_updating);
    assert!(matches!(grid, PostGridView::Populated { ref tiles, is_loading: false } if tiles.len() == 8));
    assert_eq!(view.active_tab, ProfileTab::Posts);
    assert!(view.can_refresh);
}

#[tokio::test]
async fn test_reopening_same_user_does_not_refetch() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;
    let requests = send(&app, &mut model, Event::ScreenOpened { user_id: None });
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_opening_another_user_fetches_for_them() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;
    let requests = send(
        &app,
        &mut model,
        Event::ScreenOpened {
            user_id: Some(UserId::new("42")),
        },
    );
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| match &r.operation {
        ProfileApiOperation::FetchProfile { user_id }
        | ProfileApiOperation::FetchPosts { user_id, .. } => user_id.as_str() == "42",
        ProfileApiOperation::UpdateProfile { .. } => false,
    }));
}

#[tokio::test]
async fn test_switching_user_does_not_show_previous_profile() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;

    let requests = send(
        &app,
        &mut model,
        Event::ScreenOpened {
            user_id: Some(UserId::new("42")),
        },
    );
    assert_eq!(app.view(&model).screen, ScreenView::Skeleton);

    answer_all(&app, &mut model, &Scripted::failing_profile(), requests).await;
    match app.view(&model).screen {
        ScreenView::Error { title, .. } => assert_eq!(title, "Failed to load profile"),
        other => panic!("expected profile error for the new user, got {other:?}"),
    }
    assert_eq!(model.profile.state().data, None);
}

#[tokio::test]
async fn test_latest_tab_wins_when_older_response_arrives_last() {
    let service = MockProfileService::instant();
    let (app, mut model) = opened(&service).await;

    let mut clips = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Clips });
    let mut tagged = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Tagged });
    assert_eq!((clips.len(), tagged.len()), (1, 1));

    answer(&app, &mut model, &service, tagged.remove(0)).await;
    answer(&app, &mut model, &service, clips.remove(0)).await;

    assert_eq!(tile_ids(&app, &model), vec!["t1", "t2"]);
    assert!(!model.posts.state().loading);
}

#[tokio::test]
async fn test_latest_tab_wins_when_older_response_arrives_first() {
    let service = MockProfileService::instant();
    let (app, mut model) = opened(&service).await;

    let mut clips = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Clips });
    let mut tagged = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Tagged });

    answer(&app, &mut model, &service, clips.remove(0)).await;
    // The stale clips response must not end the tagged cycle.
    assert!(model.posts.state().loading);
    assert_eq!(app.view(&model).active_tab, ProfileTab::Tagged);

    answer(&app, &mut model, &service, tagged.remove(0)).await;
    assert_eq!(tile_ids(&app, &model), vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_switching_tab_clears_grid_to_skeleton() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;

    let requests = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Clips });
    assert_eq!(requests.len(), 1);

    let ScreenView::Ready { grid, .. } = app.view(&model).screen else {
        panic!("profile should stay visible");
    };
    assert_eq!(grid, PostGridView::Skeleton { placeholders: 6 });
}

#[tokio::test]
async fn test_reselecting_active_tab_is_ignored() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;
    let update = app.update(Event::TabSelected { tab: ProfileTab::Posts }, &mut model);
    assert!(update.effects.is_empty());
}

#[tokio::test]
async fn test_refresh_clears_flag_after_success() {
    let service = MockProfileService::instant();
    let (app, mut model) = opened(&service).await;

    let requests = send(&app, &mut model, Event::RefreshPulled);
    assert_eq!(requests.len(), 2);
    let view = app.view(&model);
    assert!(view.is_refreshing);
    assert!(!view.can_refresh);

    // Old data stays on screen during the refresh.
    assert!(matches!(view.screen, ScreenView::Ready { is_updating: true, .. }));

    // A second pull while the first is running launches nothing.
    let update = app.update(Event::RefreshPulled, &mut model);
    assert!(update.effects.is_empty());

    answer_all(&app, &mut model, &service, requests).await;
    let view = app.view(&model);
    assert!(!view.is_refreshing);
    assert!(view.can_refresh);
    assert_eq!(model.last_refresh_error, None);
}

#[tokio::test]
async fn test_refresh_clears_flag_after_failure() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;

    let requests = send(&app, &mut model, Event::RefreshPulled);
    answer_all(&app, &mut model, &Scripted::failing_posts(), requests).await;

    assert!(!app.view(&model).is_refreshing);
    assert_eq!(model.last_refresh_error, Some(FetchError::network("timeout")));

    // Next pull succeeds and forgets the old failure.
    let requests = send(&app, &mut model, Event::RefreshPulled);
    answer_all(&app, &mut model, &MockProfileService::instant(), requests).await;
    assert_eq!(model.last_refresh_error, None);
}

#[tokio::test]
async fn test_refresh_settles_when_a_cycle_is_superseded() {
    let service = MockProfileService::instant();
    let (app, mut model) = opened(&service).await;

    let refresh = send(&app, &mut model, Event::RefreshPulled);
    let tab = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Clips });

    answer_all(&app, &mut model, &service, refresh).await;
    assert!(!app.view(&model).is_refreshing);

    answer_all(&app, &mut model, &service, tab).await;
    assert_eq!(tile_ids(&app, &model), vec!["c1", "c2"]);
}

#[tokio::test]
async fn test_superseded_failure_does_not_fail_refresh() {
    let (app, mut model) = opened(&MockProfileService::instant()).await;

    let refresh = send(&app, &mut model, Event::RefreshPulled);
    let tab = send(&app, &mut model, Event::TabSelected { tab: ProfileTab::Clips });

    // The refresh's posts cycle fails, but the tab switch already replaced it.
    answer_all(&app, &mut model, &Scripted::failing_posts(), refresh).await;
    assert!(!app.view(&model).is_refreshing);
    assert_eq!(model.last_refresh_error, None);

    answer_all(&app, &mut model, &MockProfileService::instant(), tab).await;
    assert_eq!(tile_ids(&app, &model), vec!["c1", "c2"]);
}

#[test]
fn test_refresh_before_open_settles_immediately() {
    let app = Tester::default();
    let mut model = Model::default();

    let (rendered, requests) = split(app.update(Event::RefreshPulled, &mut model).effects);
    assert!(rendered);
    assert!(requests.is_empty());
    assert!(!model.refresh.is_refreshing());
}

#[tokio::test]
async fn test_posts_failure_leaves_profile_visible() {
    let (app, model) = opened(&Scripted::failing_posts()).await;

    let ScreenView::Ready { profile, grid, .. } = app.view(&model).screen else {
        panic!("profile should render despite posts failing");
    };
    assert_eq!(profile.username, "J_Joy");
    match grid {
        PostGridView::Error {
            title, retry_event, ..
        } => {
            assert_eq!(title, "Failed to load posts");
            assert_eq!(retry_event, Event::RetryPosts.name());
        }
        other => panic!("expected posts error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_profile_failure_shows_error_and_retry_recovers() {
    let (app, mut model) = opened(&Scripted::failing_profile()).await;

    match app.view(&model).screen {
        ScreenView::Error {
            title, retry_event, ..
        } => {
            assert_eq!(title, "Failed to load profile");
            assert_eq!(retry_event, "retry_profile");
        }
        other => panic!("expected profile error, got {other:?}"),
    }
    // Posts loaded fine underneath.
    assert_eq!(model.posts.state().data.as_ref().map(Vec::len), Some(8));

    let requests = send(&app, &mut model, Event::RetryProfile);
    assert_eq!(requests.len(), 1);
    answer_all(&app, &mut model, &MockProfileService::instant(), requests).await;
    assert!(matches!(app.view(&model).screen, ScreenView::Ready { .. }));
    assert_eq!(model.profile.state().error, None);
}

#[tokio::test]
async fn test_retry_posts_refetches_current_tab() {
    let (app, mut model) = opened(&Scripted::failing_posts()).await;
    let requests = send(&app, &mut model, Event::RetryPosts);
    assert_eq!(requests.len(), 1);
    assert!(matches!(
        requests[0].operation,
        ProfileApiOperation::FetchPosts {
            category: PostCategory::Post,
            ..
        }
    ));

    answer_all(&app, &mut model, &MockProfileService::instant(), requests).await;
    assert_eq!(tile_ids(&app, &model).len(), 8);
}

#[tokio::test]
async fn test_no_posts_shows_empty_grid() {
    let (app, model) = opened(&Scripted::no_posts()).await;
    let ScreenView::Ready { grid, .. } = app.view(&model).screen else {
        panic!("expected ready screen");
    };
    assert_eq!(
        grid,
        PostGridView::Empty {
            title: "No posts yet".into(),
            message: "Posts will appear here once they're published".into(),
        }
    );
}

#[tokio::test]
async fn test_profile_edit_applies_saved_profile() {
    let service = MockProfileService::instant();
    let (app, mut model) = opened(&service).await;

    let requests = send(
        &app,
        &mut model,
        Event::ProfileEditSubmitted(Box::new(ProfilePatch::bio("Shipping it"))),
    );
    assert_eq!(requests.len(), 1);
    assert!(matches!(
        requests[0].operation,
        ProfileApiOperation::UpdateProfile { .. }
    ));
    assert!(matches!(
        app.view(&model).screen,
        ScreenView::Ready { is_updating: true, .. }
    ));

    answer_all(&app, &mut model, &service, requests).await;
    let profile = model.profile.state().data.clone().expect("profile present");
    assert_eq!(profile.bio, "Shipping it");
    assert_eq!(profile.name, "Joy Alexander");
}

#[tokio::test]
async fn test_save_supersedes_pending_profile_read() {
    let service = MockProfileService::instant();
    let app = Tester::default();
    let mut model = Model::default();

    let opened = send(&app, &mut model, Event::ScreenOpened { user_id: None });
    let (reads, posts): (Vec<_>, Vec<_>) = opened
        .into_iter()
        .partition(|r| matches!(r.operation, ProfileApiOperation::FetchProfile { .. }));
    answer_all(&app, &mut model, &service, posts).await;

    let save = send(
        &app,
        &mut model,
        Event::ProfileEditSubmitted(Box::new(ProfilePatch::bio("Fresh"))),
    );
    answer_all(&app, &mut model, &service, save).await;
    answer_all(&app, &mut model, &service, reads).await;

    let profile = model.profile.state().data.clone().expect("profile present");
    assert_eq!(profile.bio, "Fresh");
}

#[test]
fn test_empty_edit_is_ignored() {
    let app = Tester::default();
    let mut model = Model::default();
    app.update(Event::ScreenOpened { user_id: None }, &mut model);

    let update = app.update(
        Event::ProfileEditSubmitted(Box::default()),
        &mut model,
    );
    assert!(update.effects.is_empty());
}
