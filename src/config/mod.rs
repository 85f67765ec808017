pub mod manager;
pub mod search;
pub mod server;
pub mod traits;

pub use manager::{AppConfig, ConfigManager};
pub use search::{SearchConfig, SelectionMethod};
pub use server::ServerConfig;
pub use traits::ConfigSection;
