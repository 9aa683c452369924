//! Generic vertex attribute resolution.
use crate::{context::Limits, error::LinkError, program::AttributeBinding};
use glslink_ir::{slots, ParameterList, RegisterFile, VertexProgram};
use smol_str::SmolStr;

/// Assigns a concrete slot to every generic attribute the vertex stage
/// reads and rewrites its input references accordingly.
///
/// User bindings win; everything else gets the lowest free slot starting
/// at 1. Slot 0 is reachable only through an explicit binding or the
/// legacy position alias. `resolved` receives the final name/slot pairs,
/// plus every built-in attribute the program reads (without a slot).
pub(crate) fn resolve_attributes(
    resolved: &mut ParameterList,
    bindings: &[AttributeBinding],
    orig: &VertexProgram,
    linked: &mut VertexProgram,
    limits: &Limits,
) -> Result<(), LinkError> {
    let max_attribs = limits.max_vertex_generic_attribs as usize;

    // Slots claimed up front by explicit user bindings.
    let mut used_attributes: u64 = 0;
    for b in bindings {
        if (b.slot as usize) < max_attribs {
            used_attributes |= 1 << b.slot;
        }
    }

    // Reading the legacy position claims generic slot 0: attribute 0
    // aliases the fixed-function vertex position.
    if orig.base.inputs_read & (1 << slots::VERT_ATTRIB_POS) != 0 {
        used_attributes |= 1;
    }

    let mut attrib_map: Vec<Option<u32>> = vec![None; max_attribs];
    let mut inputs_read: u64 = 0;

    for inst in linked.base.instructions.iter_mut() {
        for src in inst.srcs.iter_mut() {
            if src.file != RegisterFile::Input {
                continue;
            }
            inputs_read |= 1 << src.index;
            if src.index < slots::VERT_ATTRIB_GENERIC0 {
                continue;
            }
            let k = (src.index - slots::VERT_ATTRIB_GENERIC0) as usize;

            let slot = match attrib_map[k] {
                Some(slot) => slot,
                None => {
                    let decl = &orig.base.attributes.as_slice()[k];
                    let slot = match bindings.iter().find(|b| b.name == decl.name) {
                        Some(b) => b.slot,
                        None => {
                            let mut free = None;
                            for attr in 1..max_attribs as u32 {
                                if used_attributes & (1 << attr) == 0 {
                                    free = Some(attr);
                                    break;
                                }
                            }
                            let slot = free.ok_or(LinkError::TooManyAttributes)?;
                            used_attributes |= 1 << slot;
                            slot
                        }
                    };
                    attrib_map[k] = Some(slot);
                    resolved.add_attribute(
                        decl.name.clone(),
                        decl.size,
                        decl.data_type,
                        Some(slot),
                    );
                    slot
                }
            };

            src.index = slots::VERT_ATTRIB_GENERIC0 + slot;
        }
    }

    // Built-in attributes the program reads are queryable too; they carry
    // no generic slot.
    for i in slots::VERT_ATTRIB_POS..slots::VERT_ATTRIB_GENERIC0 {
        if inputs_read & (1 << i) != 0 {
            if let Some(name) = slots::vertex_input_name(i) {
                resolved.add_attribute(SmolStr::new(name), 4, slots::vertex_input_type(i), None);
            }
        }
    }

    Ok(())
}
