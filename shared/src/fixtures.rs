//! Fixed data served by [`MockProfileService`](crate::service::MockProfileService).

use crate::model::{ImageSource, Post, PostCategory, PostId, ProfileStats, UserId, UserProfile};

pub const PROFILE_PICTURE_URL: &str =
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&h=400&fit=crop";
pub const BANNER_ASSET: &str = "images/banner.png";

#[must_use]
pub fn user_profile() -> UserProfile {
    UserProfile {
        id: UserId::new("1"),
        name: "Joy Alexander".into(),
        username: "J_Joy".into(),
        bio: "Better things are coming !!".into(),
        website: "https://yourdesignallypllike.framer...".into(),
        profile_picture: ImageSource::remote(PROFILE_PICTURE_URL),
        cover_image: ImageSource::local(BANNER_ASSET),
        stats: ProfileStats {
            posts: 124,
            followers: "12K".into(),
            following: "2K".into(),
        },
    }
}

fn preview(n: u8) -> ImageSource {
    ImageSource::local(format!("images/Post-Preview-{n}.png"))
}

fn post(id: &str, image: u8, category: PostCategory) -> Post {
    Post {
        id: PostId::new(id),
        image: preview(image),
        category,
    }
}

#[must_use]
pub fn posts() -> Vec<Post> {
    (1..=8)
        .map(|n| post(&n.to_string(), n, PostCategory::Post))
        .collect()
}

#[must_use]
pub fn clips() -> Vec<Post> {
    vec![
        post("c1", 1, PostCategory::Clip),
        post("c2", 2, PostCategory::Clip),
    ]
}

#[must_use]
pub fn tagged() -> Vec<Post> {
    vec![
        post("t1", 3, PostCategory::Tagged),
        post("t2", 4, PostCategory::Tagged),
    ]
}

#[must_use]
pub fn posts_for(category: PostCategory) -> Vec<Post> {
    match category {
        PostCategory::Post => posts(),
        PostCategory::Clip => clips(),
        PostCategory::Tagged => tagged(),
    }
}
