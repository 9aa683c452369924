//! Shared instruction-rewriting helpers used by the linker passes.
use glslink_ir::{Instruction, RegisterRef, TexAccess};

/// Which operand of an instruction a register reference occupies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RefSite {
    Dst,
    Src,
}

/// Applies `f` to the destination and every source reference of each
/// instruction, in order. The secondary geometry index is reachable
/// through the reference itself. An idempotent transform keeps the whole
/// pass idempotent.
pub fn rewrite_registers<F>(instructions: &mut [Instruction], mut f: F)
where
    F: FnMut(RefSite, &mut RegisterRef),
{
    for inst in instructions {
        if let Some(dst) = inst.dst.as_mut() {
            f(RefSite::Dst, dst);
        }
        for src in inst.srcs.iter_mut() {
            f(RefSite::Src, src);
        }
    }
}

/// Applies `f` to the texture access of every TEX-class instruction.
pub fn rewrite_texture_units<F>(instructions: &mut [Instruction], mut f: F)
where
    F: FnMut(&mut TexAccess),
{
    for inst in instructions {
        if let Some(tex) = inst.tex.as_mut() {
            f(tex);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glslink_ir::{Opcode, RegisterFile, RegisterRef};

    #[test]
    fn idempotent_transform_keeps_pass_idempotent() {
        let mut insts = vec![
            Instruction::new(
                Opcode::Mov,
                RegisterRef::new(RegisterFile::Output, 0),
                &[RegisterRef::new(RegisterFile::Varying, 2)],
            ),
            Instruction::end(),
        ];
        let retarget = |_: RefSite, reg: &mut RegisterRef| {
            if reg.file == RegisterFile::Varying {
                reg.file = RegisterFile::Input;
                reg.index += 10;
            }
        };
        rewrite_registers(&mut insts, retarget);
        let once = insts.clone();
        rewrite_registers(&mut insts, retarget);
        assert_eq!(insts, once);
        assert_eq!(insts[0].srcs[0].file, RegisterFile::Input);
        assert_eq!(insts[0].srcs[0].index, 12);
    }
}
