pub mod map_store;

pub use map_store::{MapStore, Model};
