//! Pipeline orchestration.

pub mod video;

pub use video::process_videos;
