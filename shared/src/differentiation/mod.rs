pub mod body;
pub mod differentiator;
pub mod world;
