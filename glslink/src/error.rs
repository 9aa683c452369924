//! Link-time error taxonomy.
//!
//! Each variant renders the info-log message reported for the first
//! violation; linking aborts there.
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LinkError {
    #[error("linking with uncompiled shader")]
    UncompiledShader,
    #[error("Unresolved symbols")]
    UnresolvedSymbols,
    #[error("missing vertex shader")]
    MissingVertexShader,
    #[error("missing fragment shader")]
    MissingFragmentShader,
    #[error("mismatched varying variable types")]
    VaryingTypeMismatch,
    #[error("centroid modifier mismatch for '{0}'")]
    CentroidModifierMismatch(SmolStr),
    #[error("invariant modifier mismatch for '{0}'")]
    InvariantModifierMismatch(SmolStr),
    #[error("Too many varying variables")]
    TooManyVaryings,
    #[error("Too many texture samplers ({count}, max is {max})")]
    TooManySamplers { count: u32, max: u32 },
    #[error("Too many vertex attributes")]
    TooManyAttributes,
    #[error("gl_Position was not written by vertex shader")]
    PositionNotWritten,
    #[error("Geometry shader without a vertex shader is illegal!")]
    GeometryWithoutVertex,
    #[error("GEOMETRY_VERTICES_OUT is zero")]
    GeometryVerticesOutZero,
    #[error("Fragment program using varying vars not written by vertex shader")]
    FragmentVaryingNotWritten,
    #[error("Fragment program cannot write both gl_FragColor and gl_FragData[].")]
    FragmentColorAndData,
    #[error("Transform feedback without vertex shader")]
    FeedbackWithoutVertex,
    #[error("vertex shader does not emit {0}")]
    FeedbackVaryingMissing(SmolStr),
    #[error("duplicated transform feedback varying name: {0}")]
    FeedbackVaryingDuplicated(SmolStr),
    #[error("Too many feedback components: {total}, max is {max}")]
    TooManyFeedbackComponents { total: u32, max: u32 },
    #[error("Vertex, geometry and/or fragment program rejected by driver")]
    DriverRejected,
}
