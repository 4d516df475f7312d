//! End-to-end composition of a replacement method body.

use tracing::debug;

use graft_types::{MethodBody, PatchDirective};

use crate::instructions::merge_instructions;
use crate::variables::{merge_variables, SlotRemap};

/// Compose a replacement body from a base body and a patch body under the
/// directive's mode, returning the slot-renumbering record alongside it.
///
/// Variables are merged before instructions: instruction operands that
/// reference slot indices are not rewritten here, so callers needing
/// renumbering (Prefix relocates the base return slot) apply the returned
/// [`SlotRemap`] themselves.
///
/// The composed body always carries the **base** body's
/// `has_return_value` flag; the merged method's externally observable
/// signature matches the original target regardless of mode.
pub fn compose_with_remap(
    base: MethodBody,
    patch: MethodBody,
    directive: &PatchDirective,
) -> (MethodBody, SlotRemap) {
    let has_return_value = base.has_return_value;

    debug!(
        mode = %directive.mode,
        base_instrs = base.instructions.len(),
        patch_instrs = patch.instructions.len(),
        "composing method body"
    );

    let (locals, remap) = merge_variables(
        base.locals,
        base.has_return_value,
        patch.locals,
        patch.has_return_value,
        directive.mode,
    );
    let instructions = merge_instructions(
        base.instructions,
        patch.instructions,
        directive.mode,
        directive.custom_offset,
    );

    (
        MethodBody {
            instructions,
            locals,
            has_return_value,
        },
        remap,
    )
}

/// [`compose_with_remap`] without the renumbering record.
pub fn compose(base: MethodBody, patch: MethodBody, directive: &PatchDirective) -> MethodBody {
    compose_with_remap(base, patch, directive).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_types::{
        Instruction, InstructionStream, LocalSlot, MergeMode, Opcode, QualifiedName, TypeRef,
        VariableTable,
    };

    fn stream(opcodes: &[Opcode]) -> InstructionStream {
        opcodes.iter().map(|op| Instruction::new(*op)).collect()
    }

    fn slot(name: &str) -> LocalSlot {
        LocalSlot::new(TypeRef::new(QualifiedName::new("t", name)))
    }

    fn directive(mode: MergeMode) -> PatchDirective {
        PatchDirective::new(QualifiedName::new("game", "Player"), "update", mode)
    }

    #[test]
    fn composed_body_keeps_base_return_flag() {
        let base = MethodBody::new(
            stream(&[Opcode::Ret]),
            VariableTable::from(vec![slot("Ret")]),
            true,
        );
        let patch = MethodBody::new(stream(&[Opcode::Nop]), VariableTable::new(), false);
        let merged = compose(base, patch, &directive(MergeMode::Replace));
        assert!(merged.has_return_value);

        let base = MethodBody::new(stream(&[Opcode::Ret]), VariableTable::new(), false);
        let patch = MethodBody::new(
            stream(&[Opcode::Nop]),
            VariableTable::from(vec![slot("PatchRet")]),
            true,
        );
        let merged = compose(base, patch, &directive(MergeMode::Postfix));
        assert!(!merged.has_return_value);
    }

    #[test]
    fn prefix_composition_end_to_end() {
        let base = MethodBody::new(
            stream(&[Opcode::LoadLocal, Opcode::Ret]),
            VariableTable::from(vec![slot("Ret"), slot("B1")]),
            true,
        );
        let patch = MethodBody::new(
            stream(&[Opcode::LoadConst, Opcode::StoreLocal]),
            VariableTable::from(vec![slot("P0")]),
            false,
        );
        let (merged, remap) =
            compose_with_remap(base, patch, &directive(MergeMode::Prefix));

        assert_eq!(
            merged.instructions.opcodes(),
            vec![Opcode::LoadConst, Opcode::StoreLocal, Opcode::LoadLocal]
        );
        let names: Vec<_> = merged.locals.iter().map(|s| s.ty.name.name.as_str()).collect();
        assert_eq!(names, vec!["Ret", "P0", "B1"]);
        assert_eq!(remap.base_slot(1), Some(2));
    }

    #[test]
    fn custom_composition_merges_instructions_only() {
        let base = MethodBody::new(
            stream(&[Opcode::Add, Opcode::Ret]),
            VariableTable::from(vec![slot("B0")]),
            false,
        );
        let patch = MethodBody::new(
            stream(&[Opcode::LoadConst, Opcode::Ret]),
            VariableTable::from(vec![slot("P0")]),
            false,
        );
        let merged = compose(
            base,
            patch,
            &directive(MergeMode::Custom).with_offset(1),
        );
        assert_eq!(
            merged.instructions.opcodes(),
            vec![Opcode::Add, Opcode::LoadConst, Opcode::Ret]
        );
        // Variable table untouched under Custom.
        let names: Vec<_> = merged.locals.iter().map(|s| s.ty.name.name.as_str()).collect();
        assert_eq!(names, vec!["B0"]);
    }

    #[test]
    fn applying_prefix_twice_is_not_idempotent() {
        let base = MethodBody::new(
            stream(&[Opcode::LoadLocal, Opcode::Ret]),
            VariableTable::from(vec![slot("B0")]),
            false,
        );
        let patch = MethodBody::new(
            stream(&[Opcode::LoadConst]),
            VariableTable::from(vec![slot("P0")]),
            false,
        );
        let d = directive(MergeMode::Prefix);

        let once = compose(base, patch.clone(), &d);
        let twice = compose(once.clone(), patch, &d);

        assert_ne!(once, twice);
        assert!(twice.instructions.len() > once.instructions.len());
        assert!(twice.locals.len() > once.locals.len());
    }
}
