//! Concrete collaborators for the monitor: a Kubernetes API node readiness
//! provider and notification sinks for Telegram and the local log.

pub mod http_client;
pub mod kube;
pub mod log_sink;
pub mod telegram;

pub use http_client::HttpClientConfig;
pub use kube::KubeNodeProvider;
pub use log_sink::LogSink;
pub use telegram::TelegramSink;
