pub mod profile_handler;
pub mod wall_handler;

pub use profile_handler::ProfileHandler;
pub use wall_handler::WallHandler;
