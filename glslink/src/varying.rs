//! Cross-stage varying reconciliation.
use crate::{
    error::LinkError,
    rewrite::{rewrite_registers, RefSite},
};
use glslink_ir::{slots, ParameterFlags, ParameterList, ProgramBase, RegisterFile, ShaderStage};

/// Checks that `bit` is either set or clear in both flag sets.
fn bits_agree(a: ParameterFlags, b: ParameterFlags, bit: ParameterFlags) -> bool {
    a.contains(bit) == b.contains(bit)
}

/// Merges the stage's varyings into the program-wide list and retargets
/// every `Varying` register reference to the stage's linked slots.
///
/// The stage's read/written masks are cleared; they are recomputed once
/// every pass has retargeted its registers.
pub(crate) fn link_varying_vars(
    merged: &mut ParameterList,
    base: &mut ProgramBase,
    max_varying: u32,
) -> Result<(), LinkError> {
    // Varyings are ordinary outputs of the producing stage and ordinary
    // inputs of the consuming stage; the first varying slot and the
    // replacement file differ per stage.
    let (src_file, src_base, dst_file, dst_base) = match base.stage {
        ShaderStage::Vertex => (
            RegisterFile::Output,
            slots::VERT_RESULT_VAR0,
            RegisterFile::Output,
            slots::VERT_RESULT_VAR0,
        ),
        ShaderStage::Geometry => (
            RegisterFile::Input,
            slots::GEOM_ATTRIB_VAR0,
            RegisterFile::Output,
            slots::GEOM_RESULT_VAR0,
        ),
        ShaderStage::Fragment => (
            RegisterFile::Input,
            slots::FRAG_ATTRIB_VAR0,
            RegisterFile::Input,
            slots::FRAG_ATTRIB_VAR0,
        ),
    };

    let mut map = vec![0u32; base.varyings.len()];

    let flags_table = match base.stage {
        ShaderStage::Fragment => &mut base.input_flags,
        ShaderStage::Vertex | ShaderStage::Geometry => &mut base.output_flags,
    };
    let varyings = &base.varyings;

    let mut i = 0;
    while i < varyings.len() {
        let var = &varyings.as_slice()[i];
        let j = match merged.find(&var.name) {
            Some(j) => {
                let linked = &merged.as_slice()[j as usize];
                if var.size != linked.size {
                    return Err(LinkError::VaryingTypeMismatch);
                }
                if !bits_agree(var.flags, linked.flags, ParameterFlags::CENTROID) {
                    return Err(LinkError::CentroidModifierMismatch(var.name.clone()));
                }
                if !bits_agree(var.flags, linked.flags, ParameterFlags::INVARIANT) {
                    return Err(LinkError::InvariantModifierMismatch(var.name.clone()));
                }
                j
            }
            None => merged.add_varying(var.name.clone(), var.size, var.data_type, var.flags),
        };

        if merged.len() as u32 > max_varying {
            return Err(LinkError::TooManyVaryings);
        }

        // Declarations wider than one register slot map slot by slot onto
        // the merged list.
        let mut j = j as usize;
        let mut remaining = var.size as i64;
        loop {
            flags_table[dst_base as usize + j] = var.flags;
            map[i] = j as u32;
            i += 1;
            j += 1;
            remaining -= 4;
            if remaining <= 0 {
                break;
            }
        }
    }

    rewrite_registers(&mut base.instructions, |site, reg| {
        if reg.file == RegisterFile::Varying {
            match site {
                RefSite::Dst => {
                    reg.file = dst_file;
                    reg.index = dst_base + map[reg.index as usize];
                }
                RefSite::Src => {
                    reg.file = src_file;
                    reg.index = src_base + map[reg.index as usize];
                }
            }
        }
    });

    base.inputs_read = 0;
    base.outputs_written = 0;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glslink_ir::{DataType, Instruction, Opcode, RegisterRef, ShaderStage};

    #[test]
    fn vertex_varyings_become_outputs() {
        let mut base = ProgramBase::new(ShaderStage::Vertex);
        base.varyings
            .add_varying("color", 4, DataType::Vec4, ParameterFlags::empty());
        base.instructions.push(Instruction::new(
            Opcode::Mov,
            RegisterRef::new(RegisterFile::Varying, 0),
            &[RegisterRef::new(RegisterFile::Temporary, 0)],
        ));

        let mut merged = ParameterList::new();
        link_varying_vars(&mut merged, &mut base, 16).unwrap();

        assert_eq!(merged.find("color"), Some(0));
        let dst = base.instructions[0].dst.unwrap();
        assert_eq!(dst.file, RegisterFile::Output);
        assert_eq!(dst.index, slots::VERT_RESULT_VAR0);
    }

    #[test]
    fn consumer_reuses_producer_slot_order() {
        let mut vert = ProgramBase::new(ShaderStage::Vertex);
        vert.varyings
            .add_varying("a", 4, DataType::Vec4, ParameterFlags::empty());
        vert.varyings
            .add_varying("b", 4, DataType::Vec4, ParameterFlags::empty());

        // Fragment declares them in the opposite order; slots follow the
        // merged list, not the local declaration order.
        let mut frag = ProgramBase::new(ShaderStage::Fragment);
        frag.varyings
            .add_varying("b", 4, DataType::Vec4, ParameterFlags::empty());
        frag.varyings
            .add_varying("a", 4, DataType::Vec4, ParameterFlags::empty());
        frag.instructions.push(Instruction::new(
            Opcode::Mov,
            RegisterRef::new(RegisterFile::Temporary, 0),
            &[RegisterRef::new(RegisterFile::Varying, 0)],
        ));

        let mut merged = ParameterList::new();
        link_varying_vars(&mut merged, &mut vert, 16).unwrap();
        link_varying_vars(&mut merged, &mut frag, 16).unwrap();

        // Fragment's varying 0 is "b", merged slot 1.
        let src = frag.instructions[0].srcs[0];
        assert_eq!(src.file, RegisterFile::Input);
        assert_eq!(src.index, slots::FRAG_ATTRIB_VAR0 + 1);
    }

    #[test]
    fn centroid_mismatch_is_rejected() {
        let mut vert = ProgramBase::new(ShaderStage::Vertex);
        vert.varyings
            .add_varying("v", 4, DataType::Vec4, ParameterFlags::CENTROID);
        let mut frag = ProgramBase::new(ShaderStage::Fragment);
        frag.varyings
            .add_varying("v", 4, DataType::Vec4, ParameterFlags::empty());

        let mut merged = ParameterList::new();
        link_varying_vars(&mut merged, &mut vert, 16).unwrap();
        let err = link_varying_vars(&mut merged, &mut frag, 16).unwrap_err();
        assert_eq!(err, LinkError::CentroidModifierMismatch("v".into()));
    }
}
