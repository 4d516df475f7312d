//! Variable-table merging.
//!
//! Merging two tables can reorder or discard slots, so every merge also
//! produces a [`SlotRemap`] recording where each input slot landed. The
//! engine never rewrites slot references inside instruction operands;
//! callers that address slots by index apply the remap themselves.

use graft_types::{LocalSlot, MergeMode, VariableTable};

/// Records where each input slot landed in a merged variable table.
///
/// Lookup positions are pre-merge indices; the result is the post-merge
/// index, or `None` when the slot was discarded. A patch method's return
/// slot is always discarded; Replace discards every base slot past 0;
/// Custom discards every patch slot (it never merges variables).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotRemap {
    base: Vec<Option<u16>>,
    patch: Vec<Option<u16>>,
}

impl SlotRemap {
    fn new(base: Vec<Option<u16>>, patch: Vec<Option<u16>>) -> Self {
        Self { base, patch }
    }

    fn identity(base_len: usize, patch_len: usize) -> Self {
        Self {
            base: (0..base_len).map(|i| Some(i as u16)).collect(),
            patch: vec![None; patch_len],
        }
    }

    /// Where base slot `old` landed, or `None` if it was discarded.
    pub fn base_slot(&self, old: u16) -> Option<u16> {
        self.base.get(old as usize).copied().flatten()
    }

    /// Where patch slot `old` landed, or `None` if it was discarded.
    pub fn patch_slot(&self, old: u16) -> Option<u16> {
        self.patch.get(old as usize).copied().flatten()
    }

    /// Returns `true` if every base slot kept its original index.
    pub fn base_is_identity(&self) -> bool {
        self.base
            .iter()
            .enumerate()
            .all(|(i, mapped)| *mapped == Some(i as u16))
    }
}

/// Merge two variable tables under `mode`.
///
/// The patch method's return slot (slot 0 when `patch_has_return` is set)
/// is discarded first; it never survives into the merged body. Mode
/// semantics:
///
/// - **Prefix**: the base return slot (if any) stays addressable at the
///   front; then every patch slot, then the remaining base slots.
/// - **Postfix**: base slots, then patch slots. Purely additive at the
///   tail; no existing slot reference needs renumbering.
/// - **Replace**: base slot 0 is kept (when the table is non-empty), the
///   rest of the base table is discarded, and the patch slots follow.
/// - **Custom**: the base table is returned untouched. Custom is an
///   instruction-level splice only; patch locals are deliberately not
///   carried over. Callers using Custom accept that asymmetry.
pub fn merge_variables(
    base: VariableTable,
    base_has_return: bool,
    patch: VariableTable,
    patch_has_return: bool,
    mode: MergeMode,
) -> (VariableTable, SlotRemap) {
    let base_len = base.len();
    let patch_len = patch.len();

    if mode == MergeMode::Custom {
        return (base, SlotRemap::identity(base_len, patch_len));
    }
    if patch.is_empty() {
        return (base, SlotRemap::identity(base_len, 0));
    }

    let (patch, patch_return_dropped) = if patch_has_return {
        let (_, rest) = patch.split_first();
        (rest, true)
    } else {
        (patch, false)
    };
    let kept_patch_len = patch.len();

    let (merged, base_map, patch_start) = match mode {
        MergeMode::Prefix if base_has_return => {
            let (ret_slot, base_rest) = base.split_first();
            let front = u16::from(ret_slot.is_some());
            let mut merged: Vec<LocalSlot> = Vec::with_capacity(base_len + kept_patch_len);
            merged.extend(ret_slot);
            merged.extend(patch);
            merged.extend(base_rest);

            let mut base_map = Vec::with_capacity(base_len);
            if front == 1 {
                base_map.push(Some(0));
            }
            for i in 1..base_len {
                base_map.push(Some((kept_patch_len + i) as u16));
            }
            (merged, base_map, front)
        }
        MergeMode::Prefix => {
            let mut merged: Vec<LocalSlot> = patch.into_iter().collect();
            merged.extend(base);
            let base_map = (0..base_len)
                .map(|i| Some((kept_patch_len + i) as u16))
                .collect();
            (merged, base_map, 0)
        }
        MergeMode::Postfix => {
            let mut merged: Vec<LocalSlot> = base.into_iter().collect();
            merged.extend(patch);
            let base_map = (0..base_len).map(|i| Some(i as u16)).collect();
            (merged, base_map, base_len as u16)
        }
        MergeMode::Replace => {
            let (ret_slot, _discarded) = base.split_first();
            let front = u16::from(ret_slot.is_some());
            let mut merged: Vec<LocalSlot> = Vec::with_capacity(1 + kept_patch_len);
            merged.extend(ret_slot);
            merged.extend(patch);

            let mut base_map = Vec::with_capacity(base_len);
            if front == 1 {
                base_map.push(Some(0));
            }
            for _ in 1..base_len {
                base_map.push(None);
            }
            (merged, base_map, front)
        }
        MergeMode::Custom => unreachable!("handled above"),
    };

    let mut patch_map = Vec::with_capacity(patch_len);
    if patch_return_dropped {
        patch_map.push(None);
    }
    for k in 0..kept_patch_len {
        patch_map.push(Some(patch_start + k as u16));
    }

    (VariableTable::from(merged), SlotRemap::new(base_map, patch_map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_types::{QualifiedName, TypeRef};
    use proptest::prelude::*;

    fn slot(name: &str) -> LocalSlot {
        LocalSlot::new(TypeRef::new(QualifiedName::new("t", name)))
    }

    fn table(names: &[&str]) -> VariableTable {
        names.iter().map(|n| slot(n)).collect()
    }

    fn names(table: &VariableTable) -> Vec<String> {
        table.iter().map(|s| s.ty.name.name.clone()).collect()
    }

    #[test]
    fn empty_patch_returns_base_unchanged() {
        let base = table(&["A", "B"]);
        let (merged, remap) = merge_variables(
            base.clone(),
            false,
            VariableTable::new(),
            false,
            MergeMode::Prefix,
        );
        assert_eq!(merged, base);
        assert!(remap.base_is_identity());
    }

    #[test]
    fn patch_return_slot_is_discarded() {
        let base = table(&["A"]);
        let patch = table(&["PatchRet", "P0"]);
        let (merged, remap) =
            merge_variables(base, false, patch, true, MergeMode::Postfix);
        assert_eq!(names(&merged), vec!["A", "P0"]);
        assert_eq!(remap.patch_slot(0), None);
        assert_eq!(remap.patch_slot(1), Some(1));
    }

    #[test]
    fn prefix_with_base_return_keeps_return_slot_at_front() {
        let base = table(&["Ret", "B1", "B2"]);
        let patch = table(&["P0", "P1"]);
        let (merged, remap) =
            merge_variables(base, true, patch, false, MergeMode::Prefix);
        assert_eq!(names(&merged), vec!["Ret", "P0", "P1", "B1", "B2"]);
        assert_eq!(remap.base_slot(0), Some(0));
        assert_eq!(remap.base_slot(1), Some(3));
        assert_eq!(remap.base_slot(2), Some(4));
        assert_eq!(remap.patch_slot(0), Some(1));
        assert_eq!(remap.patch_slot(1), Some(2));
    }

    #[test]
    fn prefix_without_base_return_puts_patch_first() {
        let base = table(&["B0", "B1"]);
        let patch = table(&["P0"]);
        let (merged, remap) =
            merge_variables(base, false, patch, false, MergeMode::Prefix);
        assert_eq!(names(&merged), vec!["P0", "B0", "B1"]);
        // The first base slot lands right after the patch block.
        assert_eq!(remap.base_slot(0), Some(1));
        assert_eq!(remap.patch_slot(0), Some(0));
    }

    #[test]
    fn postfix_is_purely_additive() {
        let base = table(&["B0", "B1"]);
        let patch = table(&["P0", "P1"]);
        let (merged, remap) =
            merge_variables(base.clone(), true, patch, false, MergeMode::Postfix);
        assert_eq!(names(&merged), vec!["B0", "B1", "P0", "P1"]);
        assert!(remap.base_is_identity());
        assert_eq!(remap.patch_slot(0), Some(2));
    }

    #[test]
    fn replace_keeps_only_base_slot_zero() {
        let base = table(&["Ret", "B1", "B2"]);
        let patch = table(&["P0"]);
        let (merged, remap) =
            merge_variables(base, true, patch, false, MergeMode::Replace);
        assert_eq!(names(&merged), vec!["Ret", "P0"]);
        assert_eq!(remap.base_slot(0), Some(0));
        assert_eq!(remap.base_slot(1), None);
        assert_eq!(remap.base_slot(2), None);
        assert_eq!(remap.patch_slot(0), Some(1));
    }

    #[test]
    fn replace_with_empty_base_is_just_the_patch() {
        let patch = table(&["P0", "P1"]);
        let (merged, remap) =
            merge_variables(VariableTable::new(), false, patch, false, MergeMode::Replace);
        assert_eq!(names(&merged), vec!["P0", "P1"]);
        assert_eq!(remap.patch_slot(0), Some(0));
    }

    #[test]
    fn custom_leaves_base_untouched() {
        let base = table(&["B0", "B1"]);
        let patch = table(&["P0", "P1"]);
        let (merged, remap) =
            merge_variables(base.clone(), false, patch, false, MergeMode::Custom);
        assert_eq!(merged, base);
        assert!(remap.base_is_identity());
        // Patch locals are not carried over under Custom.
        assert_eq!(remap.patch_slot(0), None);
        assert_eq!(remap.patch_slot(1), None);
    }

    #[test]
    fn patch_with_only_a_return_slot_still_merges() {
        // After the return slot is discarded the patch block is empty, but
        // the mode still runs; Prefix relocation degenerates to a no-op.
        let base = table(&["Ret", "B1"]);
        let patch = table(&["PatchRet"]);
        let (merged, remap) =
            merge_variables(base, true, patch, true, MergeMode::Prefix);
        assert_eq!(names(&merged), vec!["Ret", "B1"]);
        assert_eq!(remap.patch_slot(0), None);
        assert_eq!(remap.base_slot(1), Some(1));
    }

    proptest! {
        #[test]
        fn postfix_slot_count(
            base_n in 0usize..8,
            patch_n in 1usize..8,
            patch_ret in proptest::bool::ANY,
        ) {
            let base: VariableTable =
                (0..base_n).map(|i| slot(&format!("B{i}"))).collect();
            let patch: VariableTable =
                (0..patch_n).map(|i| slot(&format!("P{i}"))).collect();

            let (merged, _) = merge_variables(
                base.clone(), false, patch, patch_ret, MergeMode::Postfix,
            );

            let dropped = usize::from(patch_ret);
            prop_assert_eq!(merged.len(), base_n + patch_n - dropped);
            for i in 0..base_n {
                prop_assert_eq!(merged.get(i), base.get(i));
            }
        }

        #[test]
        fn prefix_return_slot_position(
            base_n in 1usize..8,
            patch_n in 1usize..8,
        ) {
            let base: VariableTable =
                (0..base_n).map(|i| slot(&format!("B{i}"))).collect();
            let patch: VariableTable =
                (0..patch_n).map(|i| slot(&format!("P{i}"))).collect();

            let (with_ret, remap_ret) = merge_variables(
                base.clone(), true, patch.clone(), false, MergeMode::Prefix,
            );
            prop_assert_eq!(with_ret.get(0), base.get(0));
            prop_assert_eq!(remap_ret.base_slot(0), Some(0));

            let (_, remap_plain) = merge_variables(
                base, false, patch, false, MergeMode::Prefix,
            );
            prop_assert_eq!(remap_plain.base_slot(0), Some(patch_n as u16));
        }
    }
}
