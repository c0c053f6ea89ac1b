pub mod animation;
pub mod community;
pub mod config;
pub mod error;
pub mod map;
pub mod models;
pub mod pages;
pub mod prefs;
pub mod seed;
pub mod shell;
pub mod upload;

pub use community::CommunityFeed;
pub use config::WellnestConfig;
pub use shell::{AppState, MountedPage, Page};
pub use upload::UploadFlow;
