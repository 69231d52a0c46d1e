pub mod backends;
pub mod main;
pub mod system;
pub mod utils;

pub use backends::{CredentialsConfig, TranslationBackend, TranslationConfig, VisionConfig};
pub use main::Config;
pub use system::ServerConfig;
