//! Per-stage programs.
use crate::{
    inst::{Instruction, TextureTarget},
    param::{ParameterFlags, ParameterList},
    ShaderStage,
};
use std::fmt;

/// Number of texture image units a single program can address.
pub const MAX_SAMPLERS: usize = 16;

/// Size of the per-slot input/output qualifier tables; covers every stage's
/// slot space at the default limits.
pub const MAX_PROGRAM_SLOTS: usize = 64;

/// State common to every program stage.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramBase {
    pub stage: ShaderStage,
    pub instructions: Vec<Instruction>,
    pub parameters: ParameterList,
    pub varyings: ParameterList,
    pub attributes: ParameterList,
    /// Bitmask of input slots read; recomputed after linking.
    pub inputs_read: u64,
    /// Bitmask of output slots written; recomputed after linking.
    pub outputs_written: u64,
    /// Qualifier bits per input slot.
    pub input_flags: [ParameterFlags; MAX_PROGRAM_SLOTS],
    /// Qualifier bits per output slot.
    pub output_flags: [ParameterFlags; MAX_PROGRAM_SLOTS],
    pub num_temporaries: u32,
    pub num_address_regs: u32,
    /// Bitmask of texture image units sampled by this stage.
    pub samplers_used: u32,
    /// Bitmask of units sampled with depth comparison.
    pub shadow_samplers: u32,
    pub sampler_targets: [TextureTarget; MAX_SAMPLERS],
}

impl ProgramBase {
    pub fn new(stage: ShaderStage) -> ProgramBase {
        ProgramBase {
            stage,
            instructions: Vec::new(),
            parameters: ParameterList::new(),
            varyings: ParameterList::new(),
            attributes: ParameterList::new(),
            inputs_read: 0,
            outputs_written: 0,
            input_flags: [ParameterFlags::empty(); MAX_PROGRAM_SLOTS],
            output_flags: [ParameterFlags::empty(); MAX_PROGRAM_SLOTS],
            num_temporaries: 0,
            num_address_regs: 0,
            samplers_used: 0,
            shadow_samplers: 0,
            sampler_targets: [TextureTarget::Tex2D; MAX_SAMPLERS],
        }
    }
}

impl fmt::Display for ProgramBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "# {} program, {} instructions", self.stage, self.instructions.len())?;
        for (i, inst) in self.instructions.iter().enumerate() {
            writeln!(f, "{:3}: {}", i, inst)?;
        }
        Ok(())
    }
}

/// Input primitive type declared for a geometry stage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputPrimitive {
    Points,
    Lines,
    Triangles,
    LinesAdjacency,
    TrianglesAdjacency,
}

impl InputPrimitive {
    /// Number of vertices per input primitive.
    pub fn vertex_count(self) -> u32 {
        match self {
            InputPrimitive::Points => 1,
            InputPrimitive::Lines => 2,
            InputPrimitive::Triangles => 3,
            InputPrimitive::LinesAdjacency => 4,
            InputPrimitive::TrianglesAdjacency => 6,
        }
    }
}

/// Output primitive type produced by a geometry stage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputPrimitive {
    Points,
    LineStrip,
    TriangleStrip,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VertexProgram {
    pub base: ProgramBase,
}

impl VertexProgram {
    pub fn new() -> VertexProgram {
        VertexProgram {
            base: ProgramBase::new(ShaderStage::Vertex),
        }
    }
}

impl Default for VertexProgram {
    fn default() -> VertexProgram {
        VertexProgram::new()
    }
}

/// Geometry stage together with its primitive layout.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryProgram {
    pub base: ProgramBase,
    pub input_primitive: Option<InputPrimitive>,
    pub vertices_out: u32,
    pub output_primitive: OutputPrimitive,
}

impl GeometryProgram {
    pub fn new() -> GeometryProgram {
        GeometryProgram {
            base: ProgramBase::new(ShaderStage::Geometry),
            input_primitive: None,
            vertices_out: 0,
            output_primitive: OutputPrimitive::TriangleStrip,
        }
    }
}

impl Default for GeometryProgram {
    fn default() -> GeometryProgram {
        GeometryProgram::new()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentProgram {
    pub base: ProgramBase,
}

impl FragmentProgram {
    pub fn new() -> FragmentProgram {
        FragmentProgram {
            base: ProgramBase::new(ShaderStage::Fragment),
        }
    }
}

impl Default for FragmentProgram {
    fn default() -> FragmentProgram {
        FragmentProgram::new()
    }
}

/// A compiled per-stage program, dispatched by tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Program {
    Vertex(VertexProgram),
    Geometry(GeometryProgram),
    Fragment(FragmentProgram),
}

impl Program {
    pub fn stage(&self) -> ShaderStage {
        match self {
            Program::Vertex(_) => ShaderStage::Vertex,
            Program::Geometry(_) => ShaderStage::Geometry,
            Program::Fragment(_) => ShaderStage::Fragment,
        }
    }

    pub fn base(&self) -> &ProgramBase {
        match self {
            Program::Vertex(p) => &p.base,
            Program::Geometry(p) => &p.base,
            Program::Fragment(p) => &p.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ProgramBase {
        match self {
            Program::Vertex(p) => &mut p.base,
            Program::Geometry(p) => &mut p.base,
            Program::Fragment(p) => &mut p.base,
        }
    }

    pub fn into_vertex(self) -> Option<VertexProgram> {
        match self {
            Program::Vertex(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_geometry(self) -> Option<GeometryProgram> {
        match self {
            Program::Geometry(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_fragment(self) -> Option<FragmentProgram> {
        match self {
            Program::Fragment(p) => Some(p),
            _ => None,
        }
    }
}
