//! Patient registry entry-point: loads settings, migrates the schema and
//! serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use patient_registry::domain::PatientService;
use patient_registry::domain::ports::PatientUseCases;
use patient_registry::inbound::http::health::HealthState;
use patient_registry::outbound::persistence::{
    DbPool, DieselPatientRepository, run_pending_migrations,
};
use patient_registry::settings::{Settings, load_dotenv};

use server::{ServerConfig, create_server, ctrl_c, drain_on};

const PROGRAM: &str = "patient-registry";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    if load_dotenv() {
        info!("database settings taken from .env");
    }
    let settings = Settings::load(PROGRAM)?;
    let codec = settings.server.date_codec()?;

    run_pending_migrations(settings.database.database_url()?).await?;
    let pool = DbPool::new(settings.database.pool_config()?).await?;
    info!(
        host = settings.database.host(),
        database = settings.database.name(),
        "database pool ready"
    );

    let repository = Arc::new(DieselPatientRepository::new(pool));
    let patients: Arc<dyn PatientUseCases> = Arc::new(PatientService::new(repository, codec));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.server.bind_addr(), patients),
    )?;
    actix_web::rt::spawn(drain_on(ctrl_c(), health_state, server.handle()));
    server.await?;
    Ok(())
}
