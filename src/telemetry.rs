//! src/telemetry.rs

use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

const BANNER_WIDTH: usize = 70;
const BANNER_FILL: char = '*';
const BANNER_TITLE: &str = "  A C C O U N T   S E R V I C E   R U N N I N G  ";

/// Compose multiple layers into a `tracing`'s subscriber.
///
/// `name` is the channel every record is emitted under. `RUST_LOG`, when
/// set, takes precedence over `env_filter`.
///
/// # Implementation Notes
///
/// We are using `impl Subscriber` as return type to avoid having to
/// spell out the actual type of the returned subscriber, which is
/// indeed quite complex.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // This "weird" syntax is a higher-ranked trait bound (HRTB)
    // It basically means that Sink implements the `MakeWriter`
    // trait for all choices of the lifetime parameter `'a`
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Plain-text alternative to [`get_subscriber`], easier to read in a terminal.
pub fn get_line_subscriber<Sink>(
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(sink))
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // Redirect all `log`'s events to our subscriber
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}

/// The three lines announcing the service in the log.
pub fn banner() -> [String; 3] {
    let rule: String = std::iter::repeat(BANNER_FILL).take(BANNER_WIDTH).collect();
    [rule.clone(), center(BANNER_TITLE, BANNER_WIDTH, BANNER_FILL), rule]
}

// Odd padding puts the extra fill character on the right, unless both the
// padding and the width are odd.
fn center(title: &str, width: usize, fill: char) -> String {
    let len = title.chars().count();
    if len >= width {
        return title.to_string();
    }
    let padding = width - len;
    let left = padding / 2 + (padding & width & 1);
    let right = padding - left;
    let mut line = String::with_capacity(width);
    line.extend(std::iter::repeat(fill).take(left));
    line.push_str(title);
    line.extend(std::iter::repeat(fill).take(right));
    line
}
