pub mod photo;

pub use photo::{PhotoFile, PhotoPreview};
