pub mod app;
pub mod concat;
pub mod extract;
pub mod ffmpeg;
pub mod pipeline;
pub mod subtitles;

pub use app::{SubclipApp, SubclipBuilder, SubclipConfig};
