use crate::core::thermal::kernel::image_kernel;
use crate::engine::buffers::PointArena;
use crate::engine::error::EngineError;

/// Fills `self_field` and `mutual_field` with `Σ (1/r+ − 1/r−) · L · P` over all sources.
///
/// A point never sees itself. Any other source closer than the kernel's singular radius is a
/// degenerate layout.
pub fn run(arena: &mut PointArena) -> Result<(), EngineError> {
    let PointArena {
        cables,
        positions,
        lengths,
        losses,
        self_field,
        mutual_field,
        ..
    } = arena;

    for (i, target_cable) in cables.iter().enumerate() {
        for p in target_cable.range.clone() {
            let target = &positions[p];
            let mut own = 0.0;
            let mut others = 0.0;

            for (j, source_cable) in cables.iter().enumerate() {
                for q in source_cable.range.clone() {
                    if p == q {
                        continue;
                    }
                    let kernel = image_kernel(target, &positions[q]).ok_or_else(|| {
                        EngineError::CoincidentSources {
                            cable_a: target_cable.name.clone(),
                            index_a: p - target_cable.range.start,
                            cable_b: source_cable.name.clone(),
                            index_b: q - source_cable.range.start,
                        }
                    })?;
                    let contribution = kernel * lengths[q] * losses[q];
                    if i == j {
                        own += contribution;
                    } else {
                        others += contribution;
                    }
                }
            }

            self_field[p] = own;
            mutual_field[p] = others;
        }
    }
    Ok(())
}
