pub mod bounds;
pub mod filter;
pub mod hierarchy;
pub mod pipeline;
pub mod render;
pub mod types;
