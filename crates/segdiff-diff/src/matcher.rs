//! Pairing of matchable segments across two trees, and clustering of each
//! tree into the sequence the base matcher compares.

use la_arena::ArenaMap;
use rustc_hash::FxHashMap;
use segdiff_tree::{Child, Digest, SegmentId, SegmentTree};

/// One-to-one pairing between segments of an old and a new tree.
///
/// Paired segments are never nested on either side: once a segment is paired
/// its ancestors and descendants are out of the game.
#[derive(Debug, Default)]
pub struct Matching {
    old_to_new: ArenaMap<SegmentId, SegmentId>,
    new_to_old: ArenaMap<SegmentId, SegmentId>,
    /// Old segments with a paired descendant.
    old_covers: ArenaMap<SegmentId, ()>,
    pairs: usize,
}

impl Matching {
    /// Pairs every new matchable segment, visited in pre-order, with the
    /// earliest eligible old segment of the same digest. A new segment without
    /// a partner is searched for smaller paired segments.
    ///
    /// Each old segment takes at most one partner: when the old tree holds
    /// more copies of a segment than the new one, the extra old copies stay
    /// unpaired and come out of the diff as deletions. Empty segments are
    /// never paired.
    pub fn new(old: &SegmentTree, new: &SegmentTree) -> Self {
        let index = digest_index(old);
        let mut matching = Self::default();

        let mut stack = vec![new.root()];
        while let Some(id) = stack.pop() {
            if let Some(partner) = matching.candidate(old, &index, new, id) {
                tracing::trace!(old = ?partner, new = ?id, "paired segments");
                matching.pair(old, partner, id);
                continue;
            }

            stack.extend(new.children(id).iter().rev().filter_map(|child| match *child {
                Child::Segment(child) => Some(child),
                Child::Token(_) => None,
            }));
        }

        tracing::debug!(pairs = matching.pairs, indexed = index.len(), "matched segments");
        matching
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn new_of(&self, old: SegmentId) -> Option<SegmentId> {
        self.old_to_new.get(old).copied()
    }

    pub fn old_of(&self, new: SegmentId) -> Option<SegmentId> {
        self.new_to_old.get(new).copied()
    }

    fn candidate(
        &self,
        old: &SegmentTree,
        index: &FxHashMap<Digest, Vec<SegmentId>>,
        new: &SegmentTree,
        id: SegmentId,
    ) -> Option<SegmentId> {
        let segment = new.segment(id);
        if segment.is_empty() {
            return None;
        }
        let candidates = index.get(&segment.digest()?)?;
        candidates.iter().copied().find(|&candidate| self.is_eligible(old, candidate))
    }

    fn is_eligible(&self, old: &SegmentTree, id: SegmentId) -> bool {
        if self.old_to_new.contains_idx(id) || self.old_covers.contains_idx(id) {
            return false;
        }

        let mut parent = old.segment(id).parent();
        while let Some(ancestor) = parent {
            if self.old_to_new.contains_idx(ancestor) {
                return false;
            }
            parent = old.segment(ancestor).parent();
        }
        true
    }

    fn pair(&mut self, old: &SegmentTree, old_id: SegmentId, new_id: SegmentId) {
        self.old_to_new.insert(old_id, new_id);
        self.new_to_old.insert(new_id, old_id);
        self.pairs += 1;

        let mut parent = old.segment(old_id).parent();
        while let Some(ancestor) = parent {
            if self.old_covers.contains_idx(ancestor) {
                break;
            }
            self.old_covers.insert(ancestor, ());
            parent = old.segment(ancestor).parent();
        }
    }
}

/// Old matchable segments by digest, each list in pre-order.
fn digest_index(tree: &SegmentTree) -> FxHashMap<Digest, Vec<SegmentId>> {
    let mut index = FxHashMap::<Digest, Vec<SegmentId>>::default();
    for id in tree.descendants(tree.root()) {
        let segment = tree.segment(id);
        if let Some(digest) = segment.digest() {
            if !segment.is_empty() {
                index.entry(digest).or_default().push(id);
            }
        }
    }
    index
}

/// An element of a clustered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Token(u32),
    /// A paired segment, standing for all of its tokens.
    Segment(SegmentId),
}

impl Cluster {
    pub fn token_count(self, tree: &SegmentTree) -> usize {
        match self {
            Self::Token(_) => 1,
            Self::Segment(id) => tree.segment(id).token_count() as usize,
        }
    }
}

/// What the base matcher compares clusters by.
///
/// A paired segment is keyed by its new side id on both sides, so it equals
/// its partner and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClusterKey<'a> {
    Token(&'a str),
    Pair(SegmentId),
}

/// Flattens `tree` into tokens, stopping at the paired segments.
pub fn clusters(tree: &SegmentTree, is_paired: impl Fn(SegmentId) -> bool) -> Vec<Cluster> {
    fn go(
        tree: &SegmentTree,
        id: SegmentId,
        is_paired: &dyn Fn(SegmentId) -> bool,
        out: &mut Vec<Cluster>,
    ) {
        for &child in tree.children(id) {
            match child {
                Child::Token(index) => out.push(Cluster::Token(index)),
                Child::Segment(child) if is_paired(child) => out.push(Cluster::Segment(child)),
                Child::Segment(child) => go(tree, child, is_paired, out),
            }
        }
    }

    let mut out = Vec::with_capacity(tree.children(tree.root()).len());
    go(tree, tree.root(), &is_paired, &mut out);
    out
}

pub(crate) fn old_keys<'t>(
    tree: &'t SegmentTree,
    clusters: &[Cluster],
    matching: &Matching,
) -> Vec<ClusterKey<'t>> {
    clusters
        .iter()
        .map(|&cluster| match cluster {
            Cluster::Token(index) => ClusterKey::Token(tree.tokens()[index as usize].as_str()),
            Cluster::Segment(id) => match matching.new_of(id) {
                Some(partner) => ClusterKey::Pair(partner),
                None => panic!("clustered old segment {id:?} has no partner"),
            },
        })
        .collect()
}

pub(crate) fn new_keys<'t>(tree: &'t SegmentTree, clusters: &[Cluster]) -> Vec<ClusterKey<'t>> {
    clusters
        .iter()
        .map(|&cluster| match cluster {
            Cluster::Token(index) => ClusterKey::Token(tree.tokens()[index as usize].as_str()),
            Cluster::Segment(id) => ClusterKey::Pair(id),
        })
        .collect()
}
