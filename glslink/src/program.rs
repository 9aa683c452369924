//! Program objects: attached shaders, pre-link state and link results.
use crate::shader::Shader;
use glslink_ir::{
    FragmentProgram, GeometryProgram, InputPrimitive, OutputPrimitive, ParameterList, ShaderStage,
    VertexProgram,
};
use smol_str::SmolStr;

/// A user-requested binding of a generic vertex attribute to a slot.
#[derive(Clone, Debug)]
pub struct AttributeBinding {
    pub name: SmolStr,
    pub slot: u32,
}

/// Transform feedback buffer layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FeedbackBufferMode {
    Interleaved,
    Separate,
}

/// Varyings captured into transform feedback buffers.
#[derive(Clone, Debug)]
pub struct TransformFeedback {
    pub varying_names: Vec<SmolStr>,
    pub buffer_mode: FeedbackBufferMode,
}

impl Default for TransformFeedback {
    fn default() -> TransformFeedback {
        TransformFeedback {
            varying_names: Vec::new(),
            buffer_mode: FeedbackBufferMode::Interleaved,
        }
    }
}

/// Geometry layout declared on the program object before linking.
#[derive(Copy, Clone, Debug)]
pub struct GeometrySpec {
    pub input_primitive: Option<InputPrimitive>,
    pub vertices_out: u32,
    pub output_primitive: OutputPrimitive,
}

impl Default for GeometrySpec {
    fn default() -> GeometrySpec {
        GeometrySpec {
            input_primitive: None,
            vertices_out: 0,
            output_primitive: OutputPrimitive::TriangleStrip,
        }
    }
}

/// A program-wide uniform with its per-stage parameter indexes.
#[derive(Clone, Debug, PartialEq)]
pub struct Uniform {
    pub name: SmolStr,
    /// Stage-local parameter index, per stage; `None` until a stage binds
    /// a parameter here.
    pub slots: [Option<u32>; ShaderStage::COUNT],
    pub initialized: bool,
}

/// Ordered program-wide uniform table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformList {
    entries: Vec<Uniform>,
}

impl UniformList {
    pub fn new() -> UniformList {
        UniformList::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Uniform> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uniform> {
        self.entries.iter()
    }

    pub fn find(&self, name: &str) -> Option<&Uniform> {
        self.entries.iter().find(|u| u.name == name)
    }

    /// Binds `stage`'s parameter `index` to the uniform named `name`,
    /// creating the entry if needed. `initialized` is recorded on creation
    /// only.
    pub fn append(&mut self, name: &SmolStr, stage: ShaderStage, index: u32, initialized: bool) {
        if let Some(u) = self.entries.iter_mut().find(|u| &u.name == name) {
            u.slots[stage.index()] = Some(index);
        } else {
            let mut slots = [None; ShaderStage::COUNT];
            slots[stage.index()] = Some(index);
            self.entries.push(Uniform {
                name: name.clone(),
                slots,
                initialized,
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A program object: attached shaders plus the state produced by
/// [`link`](crate::link).
#[derive(Default)]
pub struct ShaderProgram {
    pub shaders: Vec<Shader>,
    pub attribute_bindings: Vec<AttributeBinding>,
    pub transform_feedback: TransformFeedback,
    pub geometry: GeometrySpec,

    pub link_status: bool,
    pub info_log: Option<String>,
    pub vertex_program: Option<VertexProgram>,
    pub geometry_program: Option<GeometryProgram>,
    pub fragment_program: Option<FragmentProgram>,
    pub uniforms: UniformList,
    pub varying: ParameterList,
    pub attributes: ParameterList,
}

impl ShaderProgram {
    pub fn new() -> ShaderProgram {
        ShaderProgram::default()
    }

    pub fn attach(&mut self, shader: Shader) {
        self.shaders.push(shader);
    }

    /// Requests a generic attribute slot for `name`, replacing any earlier
    /// request for the same name. Takes effect at the next link.
    pub fn bind_attribute(&mut self, name: impl Into<SmolStr>, slot: u32) {
        let name = name.into();
        if let Some(b) = self.attribute_bindings.iter_mut().find(|b| b.name == name) {
            b.slot = slot;
        } else {
            self.attribute_bindings.push(AttributeBinding { name, slot });
        }
    }

    pub(crate) fn clear_link_state(&mut self) {
        self.link_status = false;
        self.info_log = None;
        self.vertex_program = None;
        self.geometry_program = None;
        self.fragment_program = None;
        self.uniforms.clear();
        self.varying = ParameterList::new();
        self.attributes = ParameterList::new();
    }
}
