pub mod jobs;
pub mod stories;
pub mod videos;
