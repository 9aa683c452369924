//! Shader program intermediate representation shared by the link stage.
pub mod inst;
pub mod param;
pub mod program;
pub mod slots;

use std::fmt;

pub use crate::{
    inst::{Instruction, Opcode, RegisterFile, RegisterRef, SecondaryIndex, TexAccess, TextureTarget},
    param::{DataType, Parameter, ParameterFlags, ParameterKind, ParameterList},
    program::{
        FragmentProgram, GeometryProgram, InputPrimitive, OutputPrimitive, Program, ProgramBase,
        VertexProgram, MAX_PROGRAM_SLOTS, MAX_SAMPLERS,
    },
};

/// Pipeline stage a shader or program belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl ShaderStage {
    pub const COUNT: usize = 3;

    /// Stable index for per-stage tables.
    pub fn index(self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Geometry => 1,
            ShaderStage::Fragment => 2,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        };
        f.write_str(name)
    }
}
