pub mod body;
pub mod transform;
pub mod world;
