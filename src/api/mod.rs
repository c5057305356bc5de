//! HTTP/JSON surface over the account and ledger services.

pub mod accounts;
pub mod dto;
pub mod error;
pub mod expenses;
pub mod trace;

pub use error::{ApiError, ApiResult};
pub use trace::Trace;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;

use crate::application::Services;

/// Register every route plus the JSON body configuration.
///
/// `GET /gastos/agrupados/{id}` is registered before `GET /gastos/{id}`.
pub fn routes(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Malformed JSON body: {}", err)).into()
    });

    cfg.app_data(json)
        .service(accounts::register)
        .service(accounts::login)
        .service(expenses::add_expense)
        .service(expenses::category_totals)
        .service(expenses::list_expenses)
        .service(expenses::delete_expense);
}

/// Serve the API until the process is asked to stop, then close the store.
///
/// The store must already be initialised; `Services::init` is the readiness
/// barrier.
pub async fn serve(services: Services, host: &str, port: u16) -> Result<()> {
    let data = web::Data::new(services.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Trace)
            .configure(routes)
    })
    .bind((host, port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?;

    info!(host, port, "listening");
    let result = server.run().await.context("HTTP server failed");

    services.close().await;
    info!("server stopped");
    result
}
