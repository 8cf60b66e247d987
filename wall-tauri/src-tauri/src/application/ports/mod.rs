pub mod display_name;
pub mod live_feed;
pub mod notifier;
pub mod object_storage;
pub mod post_store;

pub use display_name::DisplayNameBinding;
pub use live_feed::{LiveFeed, LiveFeedSubscription};
pub use notifier::{AlertNotifier, FeedNotifier};
pub use object_storage::{ObjectStorage, UploadOptions, UploadedObject};
pub use post_store::PostStore;
