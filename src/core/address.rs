//! Hierarchical solver addresses.
//!
//! The root solver is `"0"`; every nested solver appends `_<child index>`, so
//! the second smoother of a multigrid root lives at `"0_2"` and its
//! sub-solver at `"0_2_0"`. Internally an address is the sequence of child
//! indices below the root, which makes parent/child derivation a slice
//! operation instead of string surgery.

use std::fmt;
use std::str::FromStr;

use crate::error::TreeError;

/// Marker the collaborator uses for a removed node. Never a valid address.
pub const TOMBSTONE: &str = "-1";

/// Position of a solver node in the configuration tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Vec<usize>);

impl Address {
    /// The root solver, `"0"`.
    pub fn root() -> Self {
        Address(Vec::new())
    }

    /// Address from the child indices below the root.
    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Address(indices.into())
    }

    /// Child indices below the root; empty for the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// True for `"0"`.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of levels below the root (root is 0).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index of this node within its parent, `None` for the root.
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Enclosing solver, `None` for the root.
    pub fn parent(&self) -> Option<Address> {
        self.0.split_last().map(|(_, rest)| Address(rest.to_vec()))
    }

    /// Address of sub-solver `index` below this one.
    pub fn child(&self, index: usize) -> Address {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Address(indices)
    }

    /// True if `other` lies strictly below `self`.
    pub fn is_ancestor_of(&self, other: &Address) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0")?;
        for i in &self.0 {
            write!(f, "_{i}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TreeError::InvalidAddress(s.to_string());
        let mut segments = s.split('_');
        if segments.next() != Some("0") {
            return Err(invalid());
        }
        let indices = segments
            .map(|seg| {
                // canonical decimal only, so parse and display round-trip
                let padded = seg.len() > 1 && seg.starts_with('0');
                if seg.is_empty() || padded || !seg.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                seg.parse::<usize>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Address(indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_endtag_form() {
        assert_eq!(Address::root().to_string(), "0");
        assert_eq!(Address::root().child(1).child(0).to_string(), "0_1_0");
    }

    #[test]
    fn parse_and_parent() {
        let a: Address = "0_1_2".parse().unwrap();
        assert_eq!(a.indices(), &[1, 2]);
        assert_eq!(a.parent().unwrap().to_string(), "0_1");
        assert_eq!(a.last_index(), Some(2));
        assert!(Address::root().parent().is_none());
        assert!(Address::root().is_ancestor_of(&a));
        assert!(!a.is_ancestor_of(&a));
    }

    #[test]
    fn rejects_malformed() {
        for bad in [TOMBSTONE, "", "1", "0_", "0__1", "0_x", "0_-1", "00", "0_01", "0_1_00"] {
            assert!(bad.parse::<Address>().is_err(), "{bad:?} should not parse");
        }
    }

    /// Zero is a valid index on its own, just not as padding.
    #[test]
    fn zero_segments_parse() {
        let a: Address = "0_0_10".parse().unwrap();
        assert_eq!(a.indices(), &[0, 10]);
        assert_eq!(a.to_string(), "0_0_10");
    }

    #[test]
    fn ordering_is_preorder() {
        let mut v: Vec<Address> = ["0_1", "0_0_1", "0", "0_0", "0_10", "0_2"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        v.sort();
        let s: Vec<String> = v.iter().map(ToString::to_string).collect();
        assert_eq!(s, ["0", "0_0", "0_0_1", "0_1", "0_2", "0_10"]);
    }
}
