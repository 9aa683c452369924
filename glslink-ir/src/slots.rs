//! Register slot namespaces of the per-stage programs.
//!
//! Inputs and outputs of each stage live in fixed slot spaces: named
//! built-in slots first, then the open-ended ranges for generic attributes
//! and linked varyings.
use crate::param::DataType;

// Vertex stage inputs.
pub const VERT_ATTRIB_POS: u32 = 0;
pub const VERT_ATTRIB_WEIGHT: u32 = 1;
pub const VERT_ATTRIB_NORMAL: u32 = 2;
pub const VERT_ATTRIB_COLOR0: u32 = 3;
pub const VERT_ATTRIB_COLOR1: u32 = 4;
pub const VERT_ATTRIB_FOG: u32 = 5;
pub const VERT_ATTRIB_COLOR_INDEX: u32 = 6;
pub const VERT_ATTRIB_EDGEFLAG: u32 = 7;
pub const VERT_ATTRIB_TEX0: u32 = 8;
pub const VERT_ATTRIB_TEX7: u32 = 15;
pub const VERT_ATTRIB_GENERIC0: u32 = 16;

// Vertex stage outputs.
pub const VERT_RESULT_POS: u32 = 0;
pub const VERT_RESULT_COL0: u32 = 1;
pub const VERT_RESULT_COL1: u32 = 2;
pub const VERT_RESULT_FOGC: u32 = 3;
pub const VERT_RESULT_TEX0: u32 = 4;
pub const VERT_RESULT_TEX7: u32 = 11;
pub const VERT_RESULT_PSIZ: u32 = 12;
pub const VERT_RESULT_BFC0: u32 = 13;
pub const VERT_RESULT_BFC1: u32 = 14;
pub const VERT_RESULT_EDGE: u32 = 15;
pub const VERT_RESULT_VAR0: u32 = 16;

// Fragment stage inputs.
pub const FRAG_ATTRIB_WPOS: u32 = 0;
pub const FRAG_ATTRIB_COL0: u32 = 1;
pub const FRAG_ATTRIB_COL1: u32 = 2;
pub const FRAG_ATTRIB_FOGC: u32 = 3;
pub const FRAG_ATTRIB_TEX0: u32 = 4;
pub const FRAG_ATTRIB_TEX7: u32 = 11;
pub const FRAG_ATTRIB_FACE: u32 = 12;
pub const FRAG_ATTRIB_PNTC: u32 = 13;
pub const FRAG_ATTRIB_VAR0: u32 = 14;

// Fragment stage outputs. `FRAG_RESULT_DATA0` opens the indexed draw
// buffer range and stays last.
pub const FRAG_RESULT_COLOR: u32 = 0;
pub const FRAG_RESULT_DEPTH: u32 = 1;
pub const FRAG_RESULT_STENCIL: u32 = 2;
pub const FRAG_RESULT_DATA0: u32 = 3;

// Geometry stage inputs.
pub const GEOM_ATTRIB_POS: u32 = 0;
pub const GEOM_ATTRIB_COL0: u32 = 1;
pub const GEOM_ATTRIB_COL1: u32 = 2;
pub const GEOM_ATTRIB_FOGC: u32 = 3;
pub const GEOM_ATTRIB_TEX0: u32 = 4;
pub const GEOM_ATTRIB_TEX7: u32 = 11;
pub const GEOM_ATTRIB_PSIZ: u32 = 12;
pub const GEOM_ATTRIB_PRIMITIVE_ID: u32 = 13;
pub const GEOM_ATTRIB_VAR0: u32 = 16;

// Geometry stage outputs.
pub const GEOM_RESULT_POS: u32 = 0;
pub const GEOM_RESULT_COL0: u32 = 1;
pub const GEOM_RESULT_COL1: u32 = 2;
pub const GEOM_RESULT_FOGC: u32 = 3;
pub const GEOM_RESULT_TEX0: u32 = 4;
pub const GEOM_RESULT_TEX7: u32 = 11;
pub const GEOM_RESULT_PSIZ: u32 = 12;
pub const GEOM_RESULT_LAYER: u32 = 13;
pub const GEOM_RESULT_PRIMITIVE_ID: u32 = 14;
pub const GEOM_RESULT_VAR0: u32 = 16;

/// Canonical name of a built-in vertex input slot, `None` for slots the
/// shading language does not expose.
pub fn vertex_input_name(slot: u32) -> Option<&'static str> {
    match slot {
        VERT_ATTRIB_POS => Some("gl_Vertex"),
        VERT_ATTRIB_NORMAL => Some("gl_Normal"),
        VERT_ATTRIB_COLOR0 => Some("gl_Color"),
        VERT_ATTRIB_COLOR1 => Some("gl_SecondaryColor"),
        VERT_ATTRIB_FOG => Some("gl_FogCoord"),
        VERT_ATTRIB_TEX0 => Some("gl_MultiTexCoord0"),
        9 => Some("gl_MultiTexCoord1"),
        10 => Some("gl_MultiTexCoord2"),
        11 => Some("gl_MultiTexCoord3"),
        12 => Some("gl_MultiTexCoord4"),
        13 => Some("gl_MultiTexCoord5"),
        14 => Some("gl_MultiTexCoord6"),
        VERT_ATTRIB_TEX7 => Some("gl_MultiTexCoord7"),
        _ => None,
    }
}

/// Declared type of a built-in vertex input slot.
pub fn vertex_input_type(slot: u32) -> DataType {
    match slot {
        VERT_ATTRIB_NORMAL => DataType::Vec3,
        VERT_ATTRIB_FOG => DataType::Float,
        _ => DataType::Vec4,
    }
}

/// Canonical varying name of a built-in vertex output slot.
pub fn vertex_output_name(slot: u32) -> Option<&'static str> {
    match slot {
        VERT_RESULT_POS => Some("gl_Position"),
        VERT_RESULT_COL0 => Some("gl_FrontColor"),
        VERT_RESULT_COL1 => Some("gl_FrontSecondaryColor"),
        VERT_RESULT_FOGC => Some("gl_FogFragCoord"),
        VERT_RESULT_TEX0 => Some("gl_TexCoord[0]"),
        5 => Some("gl_TexCoord[1]"),
        6 => Some("gl_TexCoord[2]"),
        7 => Some("gl_TexCoord[3]"),
        8 => Some("gl_TexCoord[4]"),
        9 => Some("gl_TexCoord[5]"),
        10 => Some("gl_TexCoord[6]"),
        VERT_RESULT_TEX7 => Some("gl_TexCoord[7]"),
        VERT_RESULT_PSIZ => Some("gl_PointSize"),
        VERT_RESULT_BFC0 => Some("gl_BackColor"),
        VERT_RESULT_BFC1 => Some("gl_BackSecondaryColor"),
        _ => None,
    }
}

/// Canonical varying name of a built-in geometry output slot.
pub fn geometry_output_name(slot: u32) -> Option<&'static str> {
    match slot {
        GEOM_RESULT_POS => Some("gl_Position"),
        GEOM_RESULT_COL0 => Some("gl_FrontColor"),
        GEOM_RESULT_COL1 => Some("gl_FrontSecondaryColor"),
        GEOM_RESULT_FOGC => Some("gl_FogFragCoord"),
        GEOM_RESULT_TEX0 => Some("gl_TexCoord[0]"),
        5 => Some("gl_TexCoord[1]"),
        6 => Some("gl_TexCoord[2]"),
        7 => Some("gl_TexCoord[3]"),
        8 => Some("gl_TexCoord[4]"),
        9 => Some("gl_TexCoord[5]"),
        10 => Some("gl_TexCoord[6]"),
        GEOM_RESULT_TEX7 => Some("gl_TexCoord[7]"),
        GEOM_RESULT_PSIZ => Some("gl_PointSize"),
        GEOM_RESULT_LAYER => Some("gl_Layer"),
        GEOM_RESULT_PRIMITIVE_ID => Some("gl_PrimitiveID"),
        _ => None,
    }
}
