//! Link-time context: implementation limits and the back-end seam.
use crate::shader::Compiler;
use glslink_ir::{ProgramBase, ShaderStage};

/// Implementation limits consulted during the link.
#[derive(Copy, Clone, Debug)]
pub struct Limits {
    pub max_varying: u32,
    pub max_vertex_generic_attribs: u32,
    /// Must not exceed [`glslink_ir::MAX_SAMPLERS`].
    pub max_texture_image_units: u32,
    pub max_texture_coord_units: u32,
    pub max_draw_buffers: u32,
    pub max_transform_feedback_interleaved_components: u32,
    pub max_transform_feedback_separate_components: u32,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_varying: 16,
            max_vertex_generic_attribs: 16,
            max_texture_image_units: 16,
            max_texture_coord_units: 8,
            max_draw_buffers: 8,
            max_transform_feedback_interleaved_components: 64,
            max_transform_feedback_separate_components: 4,
        }
    }
}

/// Host API profile the program object belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Api {
    OpenGl,
    OpenGlEs2,
}

/// Back-end driver notified of every linked stage.
pub trait DriverCallbacks {
    /// Returns false to reject the program, which fails the link.
    fn notify_linked_program(&mut self, stage: ShaderStage, program: &ProgramBase) -> bool;
}

/// Everything the link stage consumes from its environment.
pub struct LinkContext<'a> {
    pub api: Api,
    pub limits: Limits,
    pub compiler: &'a dyn Compiler,
    pub driver: &'a mut dyn DriverCallbacks,
}
