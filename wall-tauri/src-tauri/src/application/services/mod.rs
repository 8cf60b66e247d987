pub mod profile_service;
pub mod wall_service;

pub use profile_service::{PROFILE_PHOTO_TOO_LARGE, ProfileService, ProfileSnapshot};
pub use wall_service::{
    LIVE_RETRY_INITIAL_DELAY, PHOTO_UPLOAD_FAILED, POST_UPLOAD_FAILED, ShareOutcome,
    WallService, WallSettings, WallSnapshot,
};
