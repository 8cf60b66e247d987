pub mod draft;
pub mod feed;
pub mod post;
pub mod profile;

pub use draft::{PostDraft, SelectedPhoto};
pub use feed::Feed;
pub use post::{NewPost, Post};
pub use profile::{ProfileCard, initials};
