use std::io;

use actix_web::{App, HttpServer, middleware, web};
use artifact_catalog::db::{establish_connection_pool, run_migrations};
use artifact_catalog::models::config::ServerConfig;
use artifact_catalog::repository::DieselRepository;
use artifact_catalog::routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to open database {}: {e}", server_config.database_url);
        io::Error::other(e)
    })?;
    run_migrations(&pool).map_err(|e| {
        log::error!("Failed to run migrations: {e}");
        io::Error::other(e)
    })?;

    let repo = web::Data::new(DieselRepository::new(pool));
    let bind_address = server_config.bind_address();
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
