pub mod notifiers;

pub use notifiers::{IpcAlertNotifier, IpcFeedNotifier};
