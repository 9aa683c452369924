//! Instructions and register references.
use smallvec::SmallVec;
use std::fmt;

/// Register files addressable by instruction operands.
///
/// `Varying` is transient: it only appears in freshly compiled per-stage
/// programs. Linking retargets every varying reference to `Input` or
/// `Output`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegisterFile {
    Temporary,
    Input,
    Output,
    Varying,
    Uniform,
    Sampler,
    Constant,
    StateVar,
    Address,
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RegisterFile::Temporary => "TEMP",
            RegisterFile::Input => "INPUT",
            RegisterFile::Output => "OUTPUT",
            RegisterFile::Varying => "VARYING",
            RegisterFile::Uniform => "UNIFORM",
            RegisterFile::Sampler => "SAMPLER",
            RegisterFile::Constant => "CONST",
            RegisterFile::StateVar => "STATE",
            RegisterFile::Address => "ADDR",
        };
        f.write_str(name)
    }
}

/// Second index of a two-dimensional register reference.
///
/// Geometry stage inputs are addressed per input vertex; the secondary
/// index selects the attribute within that vertex.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SecondaryIndex {
    pub index: u32,
    pub rel_addr: bool,
}

/// A source or destination operand of an instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RegisterRef {
    pub file: RegisterFile,
    pub index: u32,
    /// Relative addressing (`base[addr]`): the reference may touch any
    /// element of the array starting at `index`.
    pub rel_addr: bool,
    pub second: Option<SecondaryIndex>,
}

impl RegisterRef {
    pub fn new(file: RegisterFile, index: u32) -> RegisterRef {
        RegisterRef {
            file,
            index,
            rel_addr: false,
            second: None,
        }
    }

    pub fn relative(file: RegisterFile, index: u32) -> RegisterRef {
        RegisterRef {
            file,
            index,
            rel_addr: true,
            second: None,
        }
    }

    pub fn with_second(mut self, index: u32, rel_addr: bool) -> RegisterRef {
        self.second = Some(SecondaryIndex { index, rel_addr });
        self
    }
}

impl fmt::Display for RegisterRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[", self.file)?;
        if self.rel_addr {
            write!(f, "ADDR+")?;
        }
        write!(f, "{}]", self.index)?;
        if let Some(second) = self.second {
            write!(f, "[")?;
            if second.rel_addr {
                write!(f, "ADDR+")?;
            }
            write!(f, "{}]", second.index)?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Opcode {
    Add,
    Arl,
    Cmp,
    Dp3,
    Dp4,
    End,
    Ex2,
    Flr,
    Frc,
    Kil,
    Lg2,
    Mad,
    Max,
    Min,
    Mov,
    Mul,
    Pow,
    Rcp,
    Rsq,
    Sge,
    Slt,
    Sub,
    Tex,
    Txb,
    Txd,
    Txl,
    Txp,
    Xpd,
}

impl Opcode {
    /// TEX-class opcodes sample through a texture unit.
    pub fn is_texture(self) -> bool {
        matches!(
            self,
            Opcode::Tex | Opcode::Txb | Opcode::Txd | Opcode::Txl | Opcode::Txp
        )
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Arl => "ARL",
            Opcode::Cmp => "CMP",
            Opcode::Dp3 => "DP3",
            Opcode::Dp4 => "DP4",
            Opcode::End => "END",
            Opcode::Ex2 => "EX2",
            Opcode::Flr => "FLR",
            Opcode::Frc => "FRC",
            Opcode::Kil => "KIL",
            Opcode::Lg2 => "LG2",
            Opcode::Mad => "MAD",
            Opcode::Max => "MAX",
            Opcode::Min => "MIN",
            Opcode::Mov => "MOV",
            Opcode::Mul => "MUL",
            Opcode::Pow => "POW",
            Opcode::Rcp => "RCP",
            Opcode::Rsq => "RSQ",
            Opcode::Sge => "SGE",
            Opcode::Slt => "SLT",
            Opcode::Sub => "SUB",
            Opcode::Tex => "TEX",
            Opcode::Txb => "TXB",
            Opcode::Txd => "TXD",
            Opcode::Txl => "TXL",
            Opcode::Txp => "TXP",
            Opcode::Xpd => "XPD",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TextureTarget {
    Tex1D,
    Tex2D,
    Tex3D,
    Cube,
    Rect,
}

impl Default for TextureTarget {
    fn default() -> TextureTarget {
        TextureTarget::Tex2D
    }
}

impl fmt::Display for TextureTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TextureTarget::Tex1D => "1D",
            TextureTarget::Tex2D => "2D",
            TextureTarget::Tex3D => "3D",
            TextureTarget::Cube => "CUBE",
            TextureTarget::Rect => "RECT",
        };
        f.write_str(name)
    }
}

/// Texture access of a TEX-class instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TexAccess {
    /// Texture unit; a sampler unit before linking, an image unit after.
    pub unit: u32,
    pub target: TextureTarget,
    pub shadow: bool,
}

/// One fixed-layout instruction record. Linking mutates register
/// references in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub dst: Option<RegisterRef>,
    pub srcs: SmallVec<[RegisterRef; 3]>,
    pub tex: Option<TexAccess>,
}

impl Instruction {
    pub fn new(opcode: Opcode, dst: RegisterRef, srcs: &[RegisterRef]) -> Instruction {
        Instruction {
            opcode,
            dst: Some(dst),
            srcs: SmallVec::from_slice(srcs),
            tex: None,
        }
    }

    pub fn texture(
        opcode: Opcode,
        dst: RegisterRef,
        src: RegisterRef,
        tex: TexAccess,
    ) -> Instruction {
        Instruction {
            opcode,
            dst: Some(dst),
            srcs: SmallVec::from_slice(&[src]),
            tex: Some(tex),
        }
    }

    pub fn end() -> Instruction {
        Instruction {
            opcode: Opcode::End,
            dst: None,
            srcs: SmallVec::new(),
            tex: None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        let mut sep = " ";
        if let Some(dst) = &self.dst {
            write!(f, "{}{}", sep, dst)?;
            sep = ", ";
        }
        for src in &self.srcs {
            write!(f, "{}{}", sep, src)?;
            sep = ", ";
        }
        if let Some(tex) = &self.tex {
            write!(f, "{}texture[{}], {}", sep, tex.unit, tex.target)?;
        }
        Ok(())
    }
}
