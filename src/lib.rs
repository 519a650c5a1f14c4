use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::{
    client_interventions, delete_client, list_clients, list_interventions, list_invoices,
    notify_completion,
};

pub mod db;
pub mod domain;
pub mod dto;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Timeout applied to outbound calendar notification calls.
pub const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // One Diesel pool per partition; invoices never share a connection with
    // the operational tables.
    let operational = establish_connection_pool(&server_config.operational_database_url)
        .map_err(|e| {
            std::io::Error::other(format!("Failed to open the operational partition: {e}"))
        })?;
    let billing = establish_connection_pool(&server_config.billing_database_url)
        .map_err(|e| std::io::Error::other(format!("Failed to open the billing partition: {e}")))?;

    let repo = DieselRepository::new(operational, billing);

    let http = reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to build the HTTP client: {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(list_clients)
                    .service(client_interventions)
                    .service(delete_client)
                    .service(list_interventions)
                    .service(list_invoices)
                    .service(notify_completion),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(http.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
