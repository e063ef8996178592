pub mod serializer;
pub mod snapshot_serializers;
pub mod tickstamped;
