//! Link-time semantic validation and transform feedback resolution.
use crate::{
    context::Limits,
    error::LinkError,
    program::{FeedbackBufferMode, TransformFeedback},
};
use fixedbitset::FixedBitSet;
use glslink_ir::{slots, DataType, ParameterFlags, ParameterList, ProgramBase};

/// A vertex stage must compute the position output.
pub(crate) fn check_position_written(vertex: &ProgramBase) -> Result<(), LinkError> {
    if vertex.outputs_written & (1u64 << slots::VERT_RESULT_POS) == 0 {
        return Err(LinkError::PositionNotWritten);
    }
    Ok(())
}

/// A fragment stage may write the unified color output or the indexed
/// data outputs, never both.
pub(crate) fn check_fragment_outputs(outputs_written: u64) -> Result<(), LinkError> {
    if outputs_written & (1u64 << slots::FRAG_RESULT_COLOR) != 0
        && outputs_written >= (1u64 << slots::FRAG_RESULT_DATA0)
    {
        return Err(LinkError::FragmentColorAndData);
    }
    Ok(())
}

/// Appends the canonical names of every built-in varying the vertex or
/// geometry stage writes, so they are visible to transform feedback and
/// to queries. User-defined varyings are already merged at this point.
pub(crate) fn append_builtin_varyings(
    merged: &mut ParameterList,
    vertex_outputs: Option<u64>,
    geometry_outputs: Option<u64>,
) {
    if let Some(mut written) = vertex_outputs {
        let mut slot = 0;
        while written != 0 {
            if written & 1 != 0 {
                if let Some(name) = slots::vertex_output_name(slot) {
                    merged.add_varying(name, 4, DataType::Vec4, ParameterFlags::empty());
                }
            }
            written >>= 1;
            slot += 1;
        }
    }
    if let Some(mut written) = geometry_outputs {
        let mut slot = 0;
        while written != 0 {
            if written & 1 != 0 {
                if let Some(name) = slots::geometry_output_name(slot) {
                    merged.add_varying(name, 4, DataType::Vec4, ParameterFlags::empty());
                }
            }
            written >>= 1;
            slot += 1;
        }
    }
}

/// Resolves the requested transform feedback varyings against the merged
/// varying list and checks the captured component budget.
pub(crate) fn link_transform_feedback(
    feedback: &TransformFeedback,
    merged: &ParameterList,
    has_vertex: bool,
    limits: &Limits,
) -> Result<(), LinkError> {
    if feedback.varying_names.is_empty() {
        return Ok(());
    }
    if !has_vertex {
        return Err(LinkError::FeedbackWithoutVertex);
    }

    let mut seen = FixedBitSet::with_capacity(merged.len());
    let mut total = 0u32;
    for name in &feedback.varying_names {
        let slot = merged
            .find(name)
            .ok_or_else(|| LinkError::FeedbackVaryingMissing(name.clone()))?
            as usize;
        if seen.contains(slot) {
            return Err(LinkError::FeedbackVaryingDuplicated(name.clone()));
        }
        seen.insert(slot);
        total += merged.as_slice()[slot].data_type.component_count();
    }

    let max = match feedback.buffer_mode {
        FeedbackBufferMode::Interleaved => limits.max_transform_feedback_interleaved_components,
        FeedbackBufferMode::Separate => limits.max_transform_feedback_separate_components,
    };
    if total > max {
        return Err(LinkError::TooManyFeedbackComponents { total, max });
    }

    Ok(())
}
