pub mod config;
pub mod error;
pub mod search;
pub mod server;
pub mod store;
pub mod types;

pub use error::{EcorouteError, Result};
pub use types::{RoadMap, Route, Segment};
