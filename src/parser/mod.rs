pub mod cover;
pub mod digest;
pub mod lines;

pub use cover::parse_cover_data;
pub use digest::parse_digest;
