#![allow(unused_imports)]

pub mod profile_commands;
pub mod wall_commands;

pub use profile_commands::*;
pub use wall_commands::*;
