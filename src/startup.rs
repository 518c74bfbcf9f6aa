use std::net::TcpListener;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::web::{self, Data};
use actix_web::{App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::mailchimp::{MailchimpClient, MAILCHIMP_TIMEOUT};
use crate::routes::{
    error_chain_fmt, health_check, openapi_document, subscribe, swagger_ui, ErrorResponse,
};

/// How long in-flight requests get to finish once a termination signal
/// arrives.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

pub fn run(
    listener: TcpListener,
    mailchimp_client: MailchimpClient,
) -> Result<Server, std::io::Error> {
    let mailchimp_client = Data::new(mailchimp_client);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response = HttpResponse::BadRequest().json(ErrorResponse {
                    message: err.to_string(),
                });
                actix_web::error::InternalError::from_response(err, response).into()
            }))
            .route("/health_check", web::get().to(health_check))
            .route("/subscribe", web::post().to(subscribe))
            .route("/swagger", web::get().to(swagger_ui))
            .route("/swagger/openapi.json", web::get().to(openapi_document))
            .route("/swagger/{tail:.*}", web::get().to(swagger_ui))
            .app_data(mailchimp_client.clone())
    })
    .listen(listener)?
    // The lifecycle in `run_until_stopped` owns signal handling.
    .disable_signals()
    .run();
    Ok(server)
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let mailchimp_client = MailchimpClient::new(
            configuration.mailchimp.api_url(),
            configuration.mailchimp.api_key.clone(),
            MAILCHIMP_TIMEOUT,
        );

        let listener = TcpListener::bind(&configuration.server.address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, mailchimp_client)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM, then stop accepting connections and wait
    /// up to [`SHUTDOWN_GRACE_PERIOD`] for in-flight requests. An in-flight
    /// Mailchimp call is not cancelled; it runs to completion or to its own
    /// timeout.
    pub async fn run_until_stopped(self) -> Result<(), ServerError> {
        let handle = self.server.handle();
        let mut server = tokio::spawn(self.server);

        tokio::select! {
            result = &mut server => {
                return Ok(result??);
            }
            _ = shutdown_signal() => {
                tracing::info!("termination signal received, shutting down");
            }
        }

        if tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, handle.stop(true))
            .await
            .is_err()
        {
            return Err(ServerError::ShutdownTimeout);
        }

        Ok(server.await??)
    }
}

async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }
}

#[derive(thiserror::Error)]
pub enum ServerError {
    #[error("server exited with an error")]
    Runtime(#[from] std::io::Error),
    #[error("server task failed")]
    Join(#[from] tokio::task::JoinError),
    #[error("graceful shutdown timed out")]
    ShutdownTimeout,
}

impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
