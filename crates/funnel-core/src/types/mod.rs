pub mod collections;
pub mod path;
pub mod record;
