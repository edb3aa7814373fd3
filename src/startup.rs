//! src/startup.rs

use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::configuration::DatabaseSettings;
use crate::configuration::Settings;
use crate::error::StartupError;
use crate::error_handlers::error_handlers;
use crate::models;
use crate::routes;
use crate::security_headers::security_headers;
use crate::telemetry::banner;

/// Attaches routes (or any other service) to the app of every worker.
pub type Registration = fn(&mut web::ServiceConfig);

/// Everything a worker needs to serve requests, built once per process.
pub struct AppContext {
    pub settings: Settings,
    pub db_pool: PgPool,
    registrations: Vec<Registration>,
}

impl AppContext {
    pub fn new(settings: Settings, db_pool: PgPool) -> Self {
        Self {
            settings,
            db_pool,
            registrations: Vec::new(),
        }
    }

    pub fn register(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }
}

/// Runs the startup sequence: banner, database binding, registrations and
/// schema creation. Nothing after a failing step is executed.
pub async fn bootstrap(settings: Settings) -> Result<AppContext, StartupError> {
    for line in banner() {
        tracing::info!("{}", line);
    }

    let db_pool = get_connection_pool(&settings.database)?;
    let mut context = AppContext::new(settings, db_pool);
    register_services(&mut context);

    check_connection(&context.settings.database).await?;
    models::init_db(&context.db_pool).await?;

    tracing::info!("Service initialized!");
    Ok(context)
}

pub fn register_services(context: &mut AppContext) {
    context.register(routes::configure);
}

pub fn get_connection_pool(
    configuration: &DatabaseSettings,
) -> Result<PgPool, StartupError> {
    let options = configuration
        .connect_options()
        .map_err(StartupError::InvalidDatabaseUrl)?;
    Ok(PgPoolOptions::new()
        .acquire_timeout(configuration.acquire_timeout())
        .connect_lazy_with(options))
}

/// Opens and closes a single connection so that an unreachable database is
/// reported with its own error instead of a pool timeout.
#[tracing::instrument(name = "Checking the database connection", skip(configuration))]
pub async fn check_connection(
    configuration: &DatabaseSettings,
) -> Result<(), StartupError> {
    let options = configuration
        .connect_options()
        .map_err(StartupError::InvalidDatabaseUrl)?;
    let connection = tokio::time::timeout(
        configuration.acquire_timeout(),
        PgConnection::connect_with(&options),
    )
    .await
    .map_err(|_| {
        StartupError::DatabaseUnreachable(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "timed out while connecting to the database",
        )))
    })?
    .map_err(StartupError::DatabaseUnreachable)?;
    connection
        .close()
        .await
        .map_err(StartupError::DatabaseUnreachable)
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(context: AppContext) -> Result<Self, std::io::Error> {
        let address = format!(
            "{}:{}",
            context.settings.application.host, context.settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        tracing::info!("app started at: {}", listener.local_addr()?);
        let server = run(listener, context)?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    context: AppContext,
) -> Result<Server, std::io::Error> {
    let connection_pool = web::Data::new(context.db_pool);
    let registrations = context.registrations;
    let server = HttpServer::new(move || {
        let app = App::new()
            // Middlewares are added using the `wrap` method on `App`;
            // the last one wraps all the others
            .wrap(error_handlers())
            .wrap(security_headers())
            .wrap(TracingLogger::default())
            .app_data(connection_pool.clone());
        registrations
            .iter()
            .fold(app, |app, registration| app.configure(*registration))
    })
    .listen(listener)?
    .run();
    // No .await here
    Ok(server)
}
