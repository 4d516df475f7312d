//! Instruction-stream merging.

use graft_types::{InstructionStream, MergeMode};

/// Merge two instruction streams under `mode`.
///
/// `custom_offset` is consulted only by [`MergeMode::Custom`]. Cleanup rules
/// per mode:
///
/// - **Prefix**: terminators are stripped from the base stream (a terminator
///   ahead of the base logic would end execution early); result is the patch
///   stream followed by the cleaned base.
/// - **Postfix**: terminators are stripped from the base stream; result is
///   the cleaned base followed by the patch stream.
/// - **Replace**: the result is exactly the patch stream.
/// - **Custom**: when `custom_offset` is past the last valid base index, the
///   insert is treated as "append at the end": no-ops are stripped from the
///   patch stream and the Postfix splice applies. Otherwise terminators are
///   stripped from the patch stream (an inserted terminator mid-body would
///   truncate the base method) and it is spliced in at `custom_offset`; the
///   base stream's own instructions, terminators included, are untouched.
///
/// The merger never re-adds a terminator; the caller owns the control-flow
/// shape of the result.
pub fn merge_instructions(
    base: InstructionStream,
    patch: InstructionStream,
    mode: MergeMode,
    custom_offset: usize,
) -> InstructionStream {
    match mode {
        MergeMode::Prefix => patch.concat(base.without_terminators()),
        MergeMode::Postfix => base.without_terminators().concat(patch),
        MergeMode::Replace => patch,
        MergeMode::Custom => {
            if custom_offset >= base.len() {
                base.without_terminators().concat(patch.without_nops())
            } else {
                base.insert_at(custom_offset, patch.without_terminators())
            }
        }
    }
}
