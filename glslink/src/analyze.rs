//! Post-link instruction analysis: register usage masks and counters.
use crate::context::Limits;
use glslink_ir::{slots, ProgramBase, RegisterFile, ShaderStage};

/// Bits `lo..=hi`, inclusive.
fn bit_range(lo: u32, hi: u32) -> u64 {
    debug_assert!(lo <= hi && hi < 64);
    let width = hi - lo + 1;
    if width >= 64 {
        !0
    } else {
        ((1u64 << width) - 1) << lo
    }
}

/// Recounts `num_temporaries`, assuming the compiler allocated temporaries
/// densely from zero.
pub(crate) fn count_temporaries(base: &mut ProgramBase) {
    let mut max_index: Option<u32> = None;
    for inst in &base.instructions {
        for src in &inst.srcs {
            if src.file == RegisterFile::Temporary {
                max_index = Some(max_index.map_or(src.index, |m| m.max(src.index)));
            }
        }
        if let Some(dst) = &inst.dst {
            if dst.file == RegisterFile::Temporary {
                max_index = Some(max_index.map_or(dst.index, |m| m.max(dst.index)));
            }
        }
    }
    base.num_temporaries = max_index.map_or(0, |m| m + 1);
}

/// Mask of input slots a reference may read.
///
/// A relative-addressed reference on a known array base covers the whole
/// addressable range; on any other index it degrades to the single-bit
/// mask, under-approximating the read set.
pub(crate) fn inputs_read_mask(
    stage: ShaderStage,
    index: u32,
    rel_addr: bool,
    limits: &Limits,
) -> u64 {
    if !rel_addr {
        return 1 << index;
    }
    match stage {
        ShaderStage::Vertex => match index {
            slots::VERT_ATTRIB_TEX0 => bit_range(slots::VERT_ATTRIB_TEX0, slots::VERT_ATTRIB_TEX7),
            slots::VERT_ATTRIB_GENERIC0 => !0u64 - ((1u64 << slots::VERT_ATTRIB_GENERIC0) - 1),
            _ => 1 << index,
        },
        ShaderStage::Fragment => match index {
            slots::FRAG_ATTRIB_TEX0 => bit_range(slots::FRAG_ATTRIB_TEX0, slots::FRAG_ATTRIB_TEX7),
            slots::FRAG_ATTRIB_VAR0 => bit_range(
                slots::FRAG_ATTRIB_VAR0,
                slots::FRAG_ATTRIB_VAR0 + limits.max_varying - 1,
            ),
            _ => 1 << index,
        },
        ShaderStage::Geometry => match index {
            slots::GEOM_ATTRIB_VAR0 => bit_range(
                slots::GEOM_ATTRIB_VAR0,
                slots::GEOM_ATTRIB_VAR0 + limits.max_varying - 1,
            ),
            _ => 1 << index,
        },
    }
}

/// Mask of output slots a reference may write; see [`inputs_read_mask`]
/// for the relative-addressing expansion.
pub(crate) fn outputs_written_mask(
    stage: ShaderStage,
    index: u32,
    rel_addr: bool,
    limits: &Limits,
) -> u64 {
    if !rel_addr {
        return 1 << index;
    }
    match stage {
        ShaderStage::Vertex => match index {
            slots::VERT_RESULT_TEX0 => bit_range(
                slots::VERT_RESULT_TEX0,
                slots::VERT_RESULT_TEX0 + limits.max_texture_coord_units - 1,
            ),
            slots::VERT_RESULT_VAR0 => bit_range(
                slots::VERT_RESULT_VAR0,
                slots::VERT_RESULT_VAR0 + limits.max_varying - 1,
            ),
            _ => 1 << index,
        },
        ShaderStage::Fragment => match index {
            slots::FRAG_RESULT_DATA0 => bit_range(
                slots::FRAG_RESULT_DATA0,
                slots::FRAG_RESULT_DATA0 + limits.max_draw_buffers - 1,
            ),
            _ => 1 << index,
        },
        ShaderStage::Geometry => match index {
            slots::GEOM_RESULT_TEX0 => bit_range(
                slots::GEOM_RESULT_TEX0,
                slots::GEOM_RESULT_TEX0 + limits.max_texture_coord_units - 1,
            ),
            slots::GEOM_RESULT_VAR0 => bit_range(
                slots::GEOM_RESULT_VAR0,
                slots::GEOM_RESULT_VAR0 + limits.max_varying - 1,
            ),
            _ => 1 << index,
        },
    }
}

/// Recomputes `inputs_read`, `outputs_written` and `num_address_regs`
/// from the instruction stream.
pub(crate) fn update_inputs_outputs(base: &mut ProgramBase, limits: &Limits) {
    let stage = base.stage;
    let mut inputs = 0u64;
    let mut outputs = 0u64;
    let mut max_addr = 0u32;

    for inst in &base.instructions {
        for src in &inst.srcs {
            match src.file {
                RegisterFile::Input => {
                    // Geometry inputs are two-dimensional; the attribute
                    // lives in the secondary index.
                    let mask = match src.second {
                        Some(second) if stage == ShaderStage::Geometry => {
                            inputs_read_mask(stage, second.index, second.rel_addr, limits)
                        }
                        _ => inputs_read_mask(stage, src.index, src.rel_addr, limits),
                    };
                    inputs |= mask;
                }
                RegisterFile::Address => max_addr = max_addr.max(src.index + 1),
                _ => {}
            }
        }
        if let Some(dst) = &inst.dst {
            match dst.file {
                RegisterFile::Output => {
                    outputs |= outputs_written_mask(stage, dst.index, dst.rel_addr, limits);
                }
                RegisterFile::Address => max_addr = max_addr.max(dst.index + 1),
                _ => {}
            }
        }
    }

    base.inputs_read = inputs;
    base.outputs_written = outputs;
    base.num_address_regs = max_addr;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glslink_ir::{Instruction, Opcode, RegisterRef};

    #[test]
    fn relative_texcoord_reads_cover_the_array() {
        let limits = Limits::default();
        let mask = inputs_read_mask(ShaderStage::Fragment, slots::FRAG_ATTRIB_TEX0, true, &limits);
        assert_eq!(mask, bit_range(slots::FRAG_ATTRIB_TEX0, slots::FRAG_ATTRIB_TEX7));
    }

    #[test]
    fn relative_generic_reads_flood_the_upper_bits() {
        let limits = Limits::default();
        let mask = inputs_read_mask(
            ShaderStage::Vertex,
            slots::VERT_ATTRIB_GENERIC0,
            true,
            &limits,
        );
        assert_eq!(mask, !0u64 - ((1u64 << slots::VERT_ATTRIB_GENERIC0) - 1));
    }

    #[test]
    fn relative_reads_off_an_array_base_degrade_to_one_bit() {
        let limits = Limits::default();
        let mask = inputs_read_mask(ShaderStage::Fragment, slots::FRAG_ATTRIB_TEX0 + 2, true, &limits);
        assert_eq!(mask, 1 << (slots::FRAG_ATTRIB_TEX0 + 2));
    }

    #[test]
    fn relative_varying_reads_expand_in_the_program_mask() {
        let limits = Limits::default();
        let mut base = ProgramBase::new(ShaderStage::Fragment);
        base.instructions.push(Instruction::new(
            Opcode::Mov,
            RegisterRef::new(RegisterFile::Temporary, 0),
            &[RegisterRef::relative(
                RegisterFile::Input,
                slots::FRAG_ATTRIB_VAR0,
            )],
        ));
        update_inputs_outputs(&mut base, &limits);
        assert_eq!(
            base.inputs_read,
            bit_range(
                slots::FRAG_ATTRIB_VAR0,
                slots::FRAG_ATTRIB_VAR0 + limits.max_varying - 1
            )
        );
    }

    #[test]
    fn geometry_masks_come_from_the_secondary_index() {
        let limits = Limits::default();
        let mut base = ProgramBase::new(ShaderStage::Geometry);
        base.instructions.push(Instruction::new(
            Opcode::Mov,
            RegisterRef::new(RegisterFile::Temporary, 0),
            &[RegisterRef::new(RegisterFile::Input, 1)
                .with_second(slots::GEOM_ATTRIB_VAR0 + 2, false)],
        ));
        update_inputs_outputs(&mut base, &limits);
        assert_eq!(base.inputs_read, 1 << (slots::GEOM_ATTRIB_VAR0 + 2));
    }

    #[test]
    fn temporaries_count_includes_destinations() {
        let mut base = ProgramBase::new(ShaderStage::Vertex);
        base.instructions.push(Instruction::new(
            Opcode::Mov,
            RegisterRef::new(RegisterFile::Temporary, 7),
            &[RegisterRef::new(RegisterFile::Constant, 0)],
        ));
        base.instructions.push(Instruction::end());
        count_temporaries(&mut base);
        assert_eq!(base.num_temporaries, 8);
    }

    #[test]
    fn address_registers_are_counted_from_both_sides() {
        let limits = Limits::default();
        let mut base = ProgramBase::new(ShaderStage::Vertex);
        base.instructions.push(Instruction::new(
            Opcode::Arl,
            RegisterRef::new(RegisterFile::Address, 0),
            &[RegisterRef::new(RegisterFile::Constant, 0)],
        ));
        update_inputs_outputs(&mut base, &limits);
        assert_eq!(base.num_address_regs, 1);
    }
}
