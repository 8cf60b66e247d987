#![allow(unused_imports)]

pub mod constants;
pub mod entities;
pub mod value_objects;

pub use entities::{Feed, NewPost, Post, PostDraft, ProfileCard};
pub use value_objects::{PhotoFile, PhotoPreview};
