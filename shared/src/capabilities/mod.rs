//! Effects the core asks the shell to perform.
//!
//! Crux's built-in Render capability covers view updates; the profile
//! backend goes through the custom `ProfileApi` capability.

mod profile_api;

pub use self::profile_api::{
    ProfileApi, ProfileApiOperation, ProfileApiOutput, ProfileApiResult,
};
pub use crux_core::render::Render;

// The Effect derive refers to the app type by name.
use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub profile_api: ProfileApi<Event>,
}
