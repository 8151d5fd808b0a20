use cde_model::{CommonDataElement, DataModel, Group};

/// Dissolves groups that hold exactly one variable and no subgroups.
///
/// The tree is rewritten bottom-up, so dissolving a child can make its
/// parent eligible in the same pass. Each hoisted variable is appended to
/// the end of the parent's variable list, and siblings dissolve in the
/// order their groups appeared. Groups outside the exact condition,
/// including empty ones, stay untouched.
pub fn squash_single_variable_groups(model: &mut DataModel) {
    let before = model.group_count();
    squash_children(&mut model.variables, &mut model.groups);
    tracing::debug!(
        model = %model.code,
        dissolved = before - model.group_count(),
        "Squashed single variable groups"
    );
}

fn squash_children(variables: &mut Vec<CommonDataElement>, groups: &mut Vec<Group>) {
    for group in groups.iter_mut() {
        squash_children(&mut group.variables, &mut group.groups);
    }
    groups.retain_mut(|group| {
        if group.groups.is_empty() && group.variables.len() == 1 {
            variables.append(&mut group.variables);
            false
        } else {
            true
        }
    });
}
