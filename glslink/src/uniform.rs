//! Program-wide uniform and sampler reconciliation.
use crate::{context::Limits, error::LinkError, program::UniformList, rewrite::rewrite_texture_units};
use glslink_ir::{ParameterKind, ProgramBase};
use std::collections::HashMap;
use tracing::trace;

/// Appends the stage's used uniforms and samplers to the program-wide
/// list and re-indexes sampler references onto freshly allocated texture
/// image units.
///
/// `num_samplers` is the program-wide unit allocator, shared by all stages
/// of one link.
pub(crate) fn link_uniform_vars(
    uniforms: &mut UniformList,
    base: &mut ProgramBase,
    num_samplers: &mut u32,
    limits: &Limits,
) -> Result<(), LinkError> {
    let stage = base.stage;

    // Old sampler unit -> newly allocated unit. A TEX instruction whose
    // unit never appears here is left untouched.
    let mut sampler_map: HashMap<u32, u32> = HashMap::new();

    for i in 0..base.parameters.len() {
        let (name, kind, used, initialized, old_unit) = {
            let p = &base.parameters.as_slice()[i];
            (
                p.name.clone(),
                p.kind,
                p.used,
                p.initialized,
                p.values.first().copied().unwrap_or(0.0) as u32,
            )
        };
        if !used || !matches!(kind, ParameterKind::Uniform | ParameterKind::Sampler) {
            continue;
        }

        uniforms.append(&name, stage, i as u32, initialized);

        if kind == ParameterKind::Sampler {
            let new_unit = *num_samplers;
            if new_unit >= limits.max_texture_image_units {
                return Err(LinkError::TooManySamplers {
                    count: new_unit,
                    max: limits.max_texture_image_units,
                });
            }
            sampler_map.insert(old_unit, new_unit);
            if let Some(p) = base.parameters.get_mut(i) {
                if p.values.is_empty() {
                    p.values.push(new_unit as f32);
                } else {
                    p.values[0] = new_unit as f32;
                }
            }
            *num_samplers += 1;
        }
    }

    // Retarget TEX-class instructions onto the new units and rebuild the
    // per-stage sampler masks.
    base.samplers_used = 0;
    base.shadow_samplers = 0;
    let ProgramBase {
        instructions,
        sampler_targets,
        samplers_used,
        shadow_samplers,
        ..
    } = base;
    rewrite_texture_units(instructions, |tex| {
        if let Some(&new_unit) = sampler_map.get(&tex.unit) {
            trace!("remapped sampler unit {} -> {}", tex.unit, new_unit);
            tex.unit = new_unit;
            sampler_targets[new_unit as usize] = tex.target;
            *samplers_used |= 1 << new_unit;
            if tex.shadow {
                *shadow_samplers |= 1 << new_unit;
            }
        }
    });

    Ok(())
}
