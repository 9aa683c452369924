//! The link entry point.
use crate::{
    analyze, assemble, attribute,
    context::{Api, LinkContext},
    error::LinkError,
    program::ShaderProgram,
    uniform, validate, varying,
};
use glslink_ir::{slots, Program, ShaderStage};
use tracing::{debug, trace};

/// Links `program`'s attached shaders into per-stage programs sharing one
/// register layout. On success `link_status` is set and the linked clones,
/// uniform, varying and attribute tables are populated; on failure
/// `info_log` describes the first violation.
pub fn link(ctx: &mut LinkContext, program: &mut ShaderProgram) {
    program.clear_link_state();
    match link_stages(ctx, program) {
        Ok(()) => {
            program.link_status =
                program.vertex_program.is_some() || program.fragment_program.is_some();
            debug!(
                "linked: {} uniforms, {} varyings, {} attributes",
                program.uniforms.len(),
                program.varying.len(),
                program.attributes.len()
            );
        }
        Err(err) => {
            debug!("link failed: {}", err);
            program.info_log = Some(err.to_string());
            program.link_status = false;
        }
    }
}

fn link_stages(ctx: &mut LinkContext, program: &mut ShaderProgram) -> Result<(), LinkError> {
    if program.shaders.iter().any(|s| !s.compile_status) {
        return Err(LinkError::UncompiledShader);
    }

    // Find (or reassemble) the shader providing main() for each stage.
    let vertex_src = assemble::main_program(ctx, program, ShaderStage::Vertex)?
        .and_then(Program::into_vertex);
    let geometry_src = assemble::main_program(ctx, program, ShaderStage::Geometry)?
        .and_then(Program::into_geometry);
    let fragment_src = assemble::main_program(ctx, program, ShaderStage::Fragment)?
        .and_then(Program::into_fragment);

    if ctx.api == Api::OpenGlEs2 {
        if vertex_src.is_none() {
            return Err(LinkError::MissingVertexShader);
        }
        if fragment_src.is_none() {
            return Err(LinkError::MissingFragmentShader);
        }
    }

    // All register rewriting happens on copies; the compiled programs held
    // by the shader objects stay untouched.
    program.vertex_program = vertex_src.clone();
    program.geometry_program = geometry_src.clone();
    program.fragment_program = fragment_src.clone();

    if let Some(v) = program.vertex_program.as_mut() {
        varying::link_varying_vars(&mut program.varying, &mut v.base, ctx.limits.max_varying)?;
    }
    if let Some(g) = program.geometry_program.as_mut() {
        varying::link_varying_vars(&mut program.varying, &mut g.base, ctx.limits.max_varying)?;
    }
    if let Some(f) = program.fragment_program.as_mut() {
        varying::link_varying_vars(&mut program.varying, &mut f.base, ctx.limits.max_varying)?;
    }

    // One texture image unit allocator for the whole program.
    let mut num_samplers = 0u32;
    if let Some(v) = program.vertex_program.as_mut() {
        uniform::link_uniform_vars(&mut program.uniforms, &mut v.base, &mut num_samplers, &ctx.limits)?;
    }
    if let Some(g) = program.geometry_program.as_mut() {
        uniform::link_uniform_vars(&mut program.uniforms, &mut g.base, &mut num_samplers, &ctx.limits)?;
    }
    if let Some(f) = program.fragment_program.as_mut() {
        uniform::link_uniform_vars(&mut program.uniforms, &mut f.base, &mut num_samplers, &ctx.limits)?;
    }

    if let (Some(orig), Some(linked)) = (vertex_src.as_ref(), program.vertex_program.as_mut()) {
        attribute::resolve_attributes(
            &mut program.attributes,
            &program.attribute_bindings,
            orig,
            linked,
            &ctx.limits,
        )?;
    }

    if let Some(v) = program.vertex_program.as_mut() {
        analyze::update_inputs_outputs(&mut v.base, &ctx.limits);
        analyze::count_temporaries(&mut v.base);
        validate::check_position_written(&v.base)?;
    }
    if let Some(g) = program.geometry_program.as_mut() {
        if program.vertex_program.is_none() {
            return Err(LinkError::GeometryWithoutVertex);
        }
        if program.geometry.vertices_out == 0 {
            return Err(LinkError::GeometryVerticesOutZero);
        }
        analyze::count_temporaries(&mut g.base);
        analyze::update_inputs_outputs(&mut g.base, &ctx.limits);
    }
    if let Some(f) = program.fragment_program.as_mut() {
        analyze::count_temporaries(&mut f.base);
        analyze::update_inputs_outputs(&mut f.base, &ctx.limits);
    }

    // Every varying the fragment stage reads must be produced upstream.
    if let Some(f) = program.fragment_program.as_ref() {
        let read = f.base.inputs_read >> slots::FRAG_ATTRIB_VAR0;
        let written = program
            .vertex_program
            .as_ref()
            .map_or(0, |v| v.base.outputs_written >> slots::VERT_RESULT_VAR0);
        if read & written != read {
            return Err(LinkError::FragmentVaryingNotWritten);
        }
    }
    if let Some(f) = program.fragment_program.as_ref() {
        validate::check_fragment_outputs(f.base.outputs_written)?;
    }

    validate::append_builtin_varyings(
        &mut program.varying,
        program.vertex_program.as_ref().map(|v| v.base.outputs_written),
        program
            .geometry_program
            .as_ref()
            .map(|g| g.base.outputs_written),
    );

    validate::link_transform_feedback(
        &program.transform_feedback,
        &program.varying,
        program.vertex_program.is_some(),
        &ctx.limits,
    )?;

    // The geometry layout declared on the program object travels with the
    // linked clone.
    if let Some(g) = program.geometry_program.as_mut() {
        g.vertices_out = program.geometry.vertices_out;
        g.input_primitive = program.geometry.input_primitive;
        g.output_primitive = program.geometry.output_primitive;
    }

    let mut fragment_ok = true;
    let mut geometry_ok = true;
    let mut vertex_ok = true;
    if let Some(f) = program.fragment_program.as_ref() {
        trace!("post-link fragment program:\n{}", f.base);
        fragment_ok = ctx
            .driver
            .notify_linked_program(ShaderStage::Fragment, &f.base);
    }
    if let Some(g) = program.geometry_program.as_ref() {
        trace!("post-link geometry program:\n{}", g.base);
        geometry_ok = ctx
            .driver
            .notify_linked_program(ShaderStage::Geometry, &g.base);
    }
    if let Some(v) = program.vertex_program.as_ref() {
        trace!("post-link vertex program:\n{}", v.base);
        vertex_ok = ctx
            .driver
            .notify_linked_program(ShaderStage::Vertex, &v.base);
    }
    if !vertex_ok || !geometry_ok || !fragment_ok {
        return Err(LinkError::DriverRejected);
    }

    Ok(())
}
