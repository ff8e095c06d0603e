pub mod frame_query;
pub mod sky_position;

pub use frame_query::{FilterSelection, FrameQuery};
pub use sky_position::SkyPosition;
