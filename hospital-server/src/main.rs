use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use slog::{error, info, o, Drain, Logger};
use std::sync::Arc;

use common::database_factory;
use common::notification_sender::DbNotificationSender;
use common::server_config;
use hospital_server::api_error;
use hospital_server::apilog_middleware::ApiLoggerMiddleware;
use hospital_server::auth_middleware::AuthMiddleware;
use hospital_server::{auth_controller, medical_controller, AppState};

fn configure_log() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let console_drain = slog_term::FullFormat::new(decorator).build().fuse();

    // It is used for Synchronization
    let console_drain = slog_async::Async::new(console_drain).build().fuse();

    // Root logger
    Logger::root(console_drain, o!("v" => env!("CARGO_PKG_VERSION")))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let log = configure_log();

    let config = match server_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            error!(log, "Error loading config: {:?}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let Some(server_config) = config.server else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "server section missing in config",
        ));
    };
    let Some(db_config) = config.database else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "database section missing in config",
        ));
    };
    let Some(auth_config) = config.auth else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "auth section missing in config",
        ));
    };

    info!(
        log,
        "Starting the server at {}:{}", server_config.host, server_config.port
    );

    let db = match database_factory::create_db_instance(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!(log, "Failed to create database instance: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    let notifier = Arc::new(DbNotificationSender::new(db.clone()));
    let app_state = AppState {
        log: log.clone(),
        db,
        notifier,
        auth: auth_config.clone(),
    };
    let jwt_secret = auth_config.jwt_secret.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(ApiLoggerMiddleware {
                logger: app_state.log.clone(),
            })
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(api_error::json_error_handler))
            .service(auth_controller::register)
            .service(auth_controller::login)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware {
                        secret: jwt_secret.clone(),
                        log: app_state.log.clone(),
                    })
                    .service(auth_controller::get_profile)
                    .service(auth_controller::update_profile)
                    .service(medical_controller::upload_test_report)
                    .service(medical_controller::get_test_reports)
                    .service(medical_controller::record_vital_signs)
                    .service(medical_controller::get_vital_signs)
                    .service(medical_controller::add_medical_record),
            )
    })
    .bind((server_config.host, server_config.port))?
    .run()
    .await
}
