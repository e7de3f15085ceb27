// lib.rs - Profile screen core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod fetch;
pub mod fixtures;
pub mod model;
pub mod refresh;
pub mod service;
pub mod shell;
pub mod view;

use std::time::Duration;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{ConfigError, ErrorKind, FetchError};
pub use event::Event;
pub use model::{Model, Post, PostCategory, ProfilePatch, ProfileTab, UserId, UserProfile};
pub use service::{MockProfileService, ProfileService};
pub use view::{PostGridView, ScreenView, ViewModel};

pub const DEFAULT_USER_ID: &str = "1";
pub const API_BASE_URL: &str = "https://api.example.com";
pub const API_TIMEOUT: Duration = Duration::from_secs(10);
pub const PROFILE_LATENCY: Duration = Duration::from_millis(2000);
pub const POSTS_LATENCY: Duration = Duration::from_millis(1500);
pub const UPDATE_PROFILE_LATENCY: Duration = Duration::from_millis(500);
pub const SKELETON_TILE_COUNT: usize = 6;
