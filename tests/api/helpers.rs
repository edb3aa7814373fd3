use account_service::configuration::{get_configuration, Settings};
use account_service::startup::{
    bootstrap, get_connection_pool, register_services, AppContext, Application,
};
use account_service::telemetry::{get_line_subscriber, get_subscriber, init_subscriber};
use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, Secret};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use uuid::Uuid;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the value of `TEST_LOG`
    // because the sink is part of the type returned by `get_subscriber`, therefore they are not the
    // same type.
    match std::env::var("TEST_LOG") {
        Ok(v) if v == "json" => init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout,
        )),
        Ok(_) => init_subscriber(get_line_subscriber(default_filter_level, std::io::stdout)),
        Err(_) => init_subscriber(get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink,
        )),
    };
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post(&self, path: &str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

fn test_configuration() -> Settings {
    Lazy::force(&TRACING);
    let mut c = get_configuration().expect("Failed to read configuration.");
    // Use random port
    c.application.port = 0;
    c
}

fn launch(context: AppContext) -> TestApp {
    let db_pool = context.db_pool.clone();
    let application = Application::build(context).expect("Failed to build application.");
    let port = application.port();
    // Launch the application as the background task
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_pool,
        api_client: reqwest::Client::new(),
    }
}

/// Serves the application without touching the database:
/// the pool is lazy and no route used by these tests needs it.
pub async fn spawn_app() -> TestApp {
    let configuration = test_configuration();
    let db_pool =
        get_connection_pool(&configuration.database).expect("Invalid database URL.");
    let mut context = AppContext::new(configuration, db_pool);
    register_services(&mut context);
    launch(context)
}

/// Configuration pointing at a freshly created, empty database.
pub async fn configuration_with_fresh_database() -> Settings {
    let mut configuration = test_configuration();
    configuration.database.url = create_database(configuration.database.url.expose_secret()).await;
    configuration
}

/// Runs the full startup sequence against a fresh, empty database.
pub async fn spawn_app_with_database() -> TestApp {
    let configuration = configuration_with_fresh_database().await;
    let context = bootstrap(configuration)
        .await
        .expect("Failed to bootstrap the application.");
    launch(context)
}

async fn create_database(base_url: &str) -> Secret<String> {
    let database_name = Uuid::new_v4().to_string();
    let mut connection = PgConnection::connect(base_url)
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, database_name).as_str())
        .await
        .expect("Failed to create database");

    let mut url = url::Url::parse(base_url).expect("Invalid database URL");
    url.set_path(&database_name);
    Secret::new(url.to_string())
}

/// In-memory sink for log records, shared between the subscriber and the test.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
