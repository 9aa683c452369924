//! Pre-link source assembly.
//!
//! A stage normally arrives as one shader that already defines `main` with
//! no dangling references. When it does not (the stage was split across
//! several sources) the sources are concatenated in attachment order and
//! handed back to the front-end compiler.
use crate::{
    context::LinkContext,
    error::LinkError,
    program::ShaderProgram,
    shader::Shader,
};
use glslink_ir::{Program, ShaderStage};
use tracing::warn;

/// Disables every `#version` directive after the first by overwriting its
/// first two characters with `//`. Offsets are preserved: the directive is
/// commented out in place. The front-end preprocessor accepts only one
/// such directive per source.
pub(crate) fn remove_extra_version_directives(source: &mut String) {
    let starts: Vec<usize> = source.match_indices("#version").map(|(i, _)| i).collect();
    for &start in starts.iter().skip(1) {
        source.replace_range(start..start + 2, "//");
    }
}

/// Number of vertices per geometry input primitive.
fn geometry_vertices_in(program: &ShaderProgram) -> u32 {
    match program.geometry.input_primitive {
        Some(prim) => prim.vertex_count(),
        None => {
            warn!("geometry input primitive not declared, assuming triangles");
            3
        }
    }
}

/// Returns the compiled program that provides `main` for `stage`, or
/// `None` when the stage is absent.
///
/// The first attached shader of the stage that defines `main` without
/// unresolved references wins. Otherwise the stage's sources are
/// concatenated (geometry sources are preceded by the `gl_VerticesIn`
/// constant), sanitized and recompiled.
pub(crate) fn main_program(
    ctx: &LinkContext,
    program: &ShaderProgram,
    stage: ShaderStage,
) -> Result<Option<Program>, LinkError> {
    for shader in &program.shaders {
        if shader.stage == stage && shader.has_main && !shader.unresolved_refs {
            if let Some(compiled) = &shader.program {
                return Ok(Some(compiled.clone()));
            }
        }
    }

    let stage_shaders: Vec<&Shader> = program
        .shaders
        .iter()
        .filter(|s| s.stage == stage)
        .collect();
    let total_len: usize = stage_shaders.iter().map(|s| s.source.len()).sum();
    if total_len == 0 {
        return Ok(None);
    }

    let mut source = String::with_capacity(total_len + 40);
    if stage == ShaderStage::Geometry {
        source.push_str(&format!(
            "const int gl_VerticesIn = {};\n",
            geometry_vertices_in(program)
        ));
    }
    for shader in &stage_shaders {
        source.push_str(&shader.source);
    }
    source.push('\0');
    remove_extra_version_directives(&mut source);

    let mut shader = Shader::new(stage, source);
    shader.pragmas = stage_shaders[0].pragmas;
    ctx.compiler.compile(&mut shader);

    if !shader.compile_status || !shader.has_main || shader.unresolved_refs {
        return Err(LinkError::UnresolvedSymbols);
    }
    match shader.program {
        Some(compiled) => Ok(Some(compiled)),
        None => Err(LinkError::UnresolvedSymbols),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_later_version_directives_are_disabled() {
        let mut source = String::from("#version 120\nvoid a() {}\n#version 120\nvoid b() {}\n");
        remove_extra_version_directives(&mut source);
        assert_eq!(
            source,
            "#version 120\nvoid a() {}\n//version 120\nvoid b() {}\n"
        );
        assert_eq!(source.matches("#version").count(), 1);
    }

    #[test]
    fn a_single_directive_is_preserved() {
        let mut source = String::from("#version 130\nvoid main() {}\n");
        let before = source.clone();
        remove_extra_version_directives(&mut source);
        assert_eq!(source, before);
    }
}
