pub mod duration;
pub mod json;
pub mod time;
