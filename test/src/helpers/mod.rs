
pub use session::{connect_client, new_server, ConnectedClient};
pub use snapshot_builder::{body_at, world_of};
