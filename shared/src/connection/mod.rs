pub mod snapshot_receiver;
pub mod snapshot_sender;
