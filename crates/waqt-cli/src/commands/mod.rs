pub mod cache;
pub mod completions;
pub mod config;
pub mod location;
pub mod next;
pub mod refresh;
pub mod times;
