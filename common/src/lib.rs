pub mod auth_helper;
pub mod database_factory;
pub mod database_provider;
pub mod dbprovider_pg;
pub mod entities;
pub mod notification_sender;
pub mod roles;
pub mod server_config;
