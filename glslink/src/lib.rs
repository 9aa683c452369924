//! Link stage of a shading-language toolchain.
//!
//! Combines independently compiled vertex, geometry and fragment shader
//! objects into one program whose instructions reference a unified
//! register layout: varyings get matching producer/consumer slots,
//! uniforms and samplers share one program-wide index space, generic
//! vertex attributes get concrete slot numbers, and the language's
//! link-time rules are enforced.
//!
//! The front-end compiler and the back-end driver stay external, behind
//! the [`Compiler`] and [`DriverCallbacks`] traits.

mod analyze;
mod assemble;
mod attribute;
pub mod context;
pub mod error;
mod link;
pub mod program;
pub mod rewrite;
pub mod shader;
mod uniform;
mod validate;
mod varying;

pub use crate::{
    context::{Api, DriverCallbacks, Limits, LinkContext},
    error::LinkError,
    link::link,
    program::{
        AttributeBinding, FeedbackBufferMode, GeometrySpec, ShaderProgram, TransformFeedback,
        Uniform, UniformList,
    },
    shader::{Compiler, Pragmas, Shader},
};
pub use glslink_ir as ir;
