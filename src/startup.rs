use actix_files as fs;
use actix_web::dev::Server;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::configuration::Settings;
use crate::error::{AppError, ValidationError};
use crate::logger::LoggerMiddleware;
use crate::middleware::{FileServerHits, HitCounter, JwtMiddleware};
use crate::routes::{
    create_chirp, create_user, get_chirp, health_check, list_chirps, login, metrics, refresh,
    reset, revoke,
};
use crate::store::Store;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn Store>,
    settings: Settings,
    hits: Arc<FileServerHits>,
) -> Result<Server, std::io::Error> {
    let store_data: web::Data<dyn Store> = web::Data::from(store);
    let hits_data = web::Data::from(hits.clone());
    let jwt_config = settings.jwt.clone();
    let jwt_config_data = web::Data::new(settings.jwt);
    let app_config_data = web::Data::new(settings.application.clone());
    let static_dir = settings.application.static_dir;

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(store_data.clone())
            .app_data(hits_data.clone())
            .app_data(jwt_config_data.clone())
            .app_data(app_config_data.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                tracing::debug!(error = %err, "Rejected request body");
                AppError::Validation(ValidationError::InvalidFormat("request body".to_string()))
                    .into()
            }))

            .service(
                web::scope("/api")
                    .route("/healthz", web::get().to(health_check))
                    .route("/users", web::post().to(create_user))
                    .route("/login", web::post().to(login))
                    .route("/refresh", web::post().to(refresh))
                    .route("/revoke", web::post().to(revoke))
                    // Protected routes (require JWT authentication)
                    .service(
                        web::resource("/chirps")
                            .guard(guard::Post())
                            .wrap(JwtMiddleware::new(jwt_config.clone()))
                            .route(web::post().to(create_chirp)),
                    )
                    .route("/chirps", web::get().to(list_chirps))
                    .route("/chirps/{chirp_id}", web::get().to(get_chirp)),
            )
            .service(
                web::scope("/admin")
                    .route("/metrics", web::get().to(metrics))
                    .route("/reset", web::post().to(reset)),
            )

            // Static file serving, counted
            .service(
                web::scope("/app")
                    .wrap(HitCounter::new(hits.clone()))
                    .service(fs::Files::new("/", &static_dir).index_file("index.html")),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
