//! Backend entry-point: loads settings, wires the store and catalog, and
//! runs the REST server.

use std::env;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::server::{ServerConfig, Settings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(env::args_os())
        .map_err(|error| std::io::Error::other(error.to_string()))?;
    let config = ServerConfig::from_settings(&settings)
        .map_err(|error| std::io::Error::other(error.to_string()))?;

    info!(
        environment = settings.environment(),
        host = settings.host(),
        port = settings.port(),
        data_file = %settings.data_file().display(),
        "starting course registration backend"
    );

    let server = create_server(config)?;
    server.await
}
