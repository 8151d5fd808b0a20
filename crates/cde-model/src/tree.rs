use serde::{Deserialize, Serialize};

use crate::element::CommonDataElement;

/// A named subtree holding its own variables and further nested groups.
///
/// `variables` and `groups` default to empty on input and are dropped from
/// serialized output when empty; catalogue trees regularly omit one or the
/// other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<CommonDataElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
}

impl Group {
    /// Number of variables in this group and all nested groups.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
            + self
                .groups
                .iter()
                .map(Group::variable_count)
                .sum::<usize>()
    }

    /// Number of groups in this subtree, counting this group itself.
    pub fn group_count(&self) -> usize {
        1 + self.groups.iter().map(Group::group_count).sum::<usize>()
    }

    /// Length of the longest group chain starting at this group.
    pub fn depth(&self) -> usize {
        1 + self.groups.iter().map(Group::depth).max().unwrap_or(0)
    }
}

/// Root of a data model tree: a named, versioned collection of variables
/// and nested groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    pub code: String,
    pub version: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitudinal: Option<bool>,
    #[serde(default)]
    pub variables: Vec<CommonDataElement>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl DataModel {
    /// Total number of variables across the root and all nested groups.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
            + self
                .groups
                .iter()
                .map(Group::variable_count)
                .sum::<usize>()
    }

    /// Total number of groups in the tree.
    pub fn group_count(&self) -> usize {
        self.groups.iter().map(Group::group_count).sum()
    }

    /// Depth of the deepest group chain. A model with no groups has depth 0.
    pub fn max_depth(&self) -> usize {
        self.groups.iter().map(Group::depth).max().unwrap_or(0)
    }

    /// True when the model is flagged as a longitudinal study.
    pub fn is_longitudinal(&self) -> bool {
        self.longitudinal.unwrap_or(false)
    }
}
