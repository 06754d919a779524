use crate::core::losses::model::ConductorLossModel;
use crate::engine::buffers::PointArena;
use crate::engine::error::EngineError;
use tracing::trace;

/// Recomputes every point's watt loss from its current temperature.
pub fn run(arena: &mut PointArena, models: &[ConductorLossModel]) -> Result<(), EngineError> {
    debug_assert_eq!(arena.cables.len(), models.len());
    for (slice, model) in arena.cables.iter().zip(models) {
        let range = slice.range.clone();
        model
            .update(&arena.temperatures[range.clone()], &mut arena.losses[range.clone()])
            .map_err(|source| EngineError::Loss {
                cable_id: slice.name.clone(),
                source,
            })?;
        trace!(
            cable = %slice.name,
            max_loss = arena.losses[range].iter().copied().fold(0.0, f64::max),
            "Updated watt losses."
        );
    }
    Ok(())
}
