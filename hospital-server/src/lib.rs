pub mod api_error;
pub mod api_models;
pub mod apilog_middleware;
pub mod auth_controller;
pub mod auth_information;
pub mod auth_middleware;
pub mod common_utils;
pub mod constants;
pub mod medical_controller;

use common::database_provider::DbProvider;
use common::notification_sender::NotificationSender;
use common::server_config::AuthConfig;
use slog::Logger;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub log: Logger,
    pub db: Arc<dyn DbProvider>,
    pub notifier: Arc<dyn NotificationSender>,
    pub auth: AuthConfig,
}
