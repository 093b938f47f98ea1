//! Builders to construct a rotation service from configuration.

use crate::config::{RotationConfig, StoreBackendConfig};
use crate::core::error::RotationError;
use crate::core::store::ProgramStore;
use crate::service::RotationService;

/// Build a rotation service from configuration using the provided store
/// factory.
///
/// The factory maps the configured backend to a concrete store, which keeps
/// this crate free of database client choices. The service wires up with the
/// system clock and random UUID ids; swap those with
/// [`RotationService::with_clock`] and [`RotationService::with_ids`].
pub fn build_service<S, F>(
    cfg: &RotationConfig,
    mut store_factory: F,
) -> Result<RotationService<S>, RotationError>
where
    S: ProgramStore,
    F: FnMut(&StoreBackendConfig) -> Result<S, RotationError>,
{
    cfg.validate()
        .map_err(|e| RotationError::InvalidState(format!("config invalid: {e}")))?;

    let store = store_factory(&cfg.store)?;
    Ok(RotationService::new(store, cfg.rules.clone()))
}
