//! Directory topology DTO.
//!
//! `DirectoryNode` mirrors the on-disk directory layout under a repository
//! root. Files are not represented. Children keep the order the directory
//! listing produced them in.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Label used for the root node.
pub const ROOT_LABEL: &str = ".";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Path relative to the root; the root itself is `"."`.
    pub name: String,
    pub absolute_path: PathBuf,
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    pub fn is_root(&self) -> bool {
        self.name == ROOT_LABEL
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order walk over this subtree.
    pub fn iter(&self) -> DirectoryIter<'_> {
        DirectoryIter { stack: vec![self] }
    }

    pub fn find(&self, name: &str) -> Option<&DirectoryNode> {
        self.iter().find(|node| node.name == name)
    }
}

pub struct DirectoryIter<'a> {
    stack: Vec<&'a DirectoryNode>,
}

impl<'a> Iterator for DirectoryIter<'a> {
    type Item = &'a DirectoryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> DirectoryNode {
        DirectoryNode {
            name: name.to_string(),
            absolute_path: PathBuf::from("/repo").join(name),
            children: Vec::new(),
        }
    }

    #[test]
    fn iter_is_pre_order_in_child_order() {
        let mut src = leaf("src");
        src.children.push(leaf("src/app"));
        let root = DirectoryNode {
            name: ROOT_LABEL.to_string(),
            absolute_path: PathBuf::from("/repo"),
            children: vec![src, leaf("docs")],
        };

        let names: Vec<&str> = root.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec![".", "src", "src/app", "docs"]);
        assert_eq!(root.node_count(), 4);
        assert!(root.is_root());
        assert!(root.find("src/app").is_some());
        assert!(root.find("missing").is_none());
    }
}
