//! Shader objects and the front-end compiler seam.
use bitflags::bitflags;
use glslink_ir::{Program, ShaderStage};

bitflags! {
    /// Per-shader compiler pragma toggles, inherited verbatim when a stage
    /// is reassembled from several sources.
    pub struct Pragmas: u32 {
        const OPTIMIZE = 1 << 0;
        const DEBUG = 1 << 1;
        const IGNORE_OPTIMIZE = 1 << 2;
        const IGNORE_DEBUG = 1 << 3;
    }
}

impl Default for Pragmas {
    fn default() -> Pragmas {
        Pragmas::empty()
    }
}

/// A shader object as produced by the front-end compiler.
#[derive(Clone, Debug)]
pub struct Shader {
    pub stage: ShaderStage,
    pub source: String,
    pub compile_status: bool,
    /// The compiled object defines the stage entry point.
    pub has_main: bool,
    /// Symbols left dangling after compilation; resolved by reassembling
    /// the stage from all of its sources.
    pub unresolved_refs: bool,
    pub pragmas: Pragmas,
    pub program: Option<Program>,
}

impl Shader {
    pub fn new(stage: ShaderStage, source: impl Into<String>) -> Shader {
        Shader {
            stage,
            source: source.into(),
            compile_status: false,
            has_main: false,
            unresolved_refs: false,
            pragmas: Pragmas::empty(),
            program: None,
        }
    }
}

/// Front-end compiler invoked when a stage has to be reassembled from its
/// attached sources.
pub trait Compiler {
    /// Compiles `shader.source`, filling `compile_status`, `has_main`,
    /// `unresolved_refs` and `program`.
    fn compile(&self, shader: &mut Shader);
}
