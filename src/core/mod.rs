pub mod config;
pub mod models;

pub use config::RobotConfig;
pub use models::SendResult;
