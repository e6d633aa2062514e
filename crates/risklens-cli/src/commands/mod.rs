//! Command implementations.

pub mod alerts;
pub mod cascades;
pub mod classify;
pub mod config;
pub mod interview;
pub mod layout;
pub mod network;
pub mod sentiment;
pub mod similar;
pub mod summary;

pub use self::alerts::{execute_alerts, execute_escalate};
pub use self::cascades::execute_cascades;
pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::interview::execute_interview;
pub use self::layout::execute_layout;
pub use self::network::execute_network;
pub use self::sentiment::execute_sentiment;
pub use self::similar::execute_similar;
pub use self::summary::execute_summary;
