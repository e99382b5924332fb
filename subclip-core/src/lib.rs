pub mod edl;
pub mod segment;
pub mod timecode;
pub mod timestamp;
pub mod timings;

pub use segment::{segment_file_name, Segment};
pub use timecode::{FrameRate, Timecode};
pub use timestamp::{TimeRange, Timestamp};
pub use timings::{parse_time_ranges, PlaceholderRule};
