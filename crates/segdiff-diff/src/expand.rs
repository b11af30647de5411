//! Turning cluster level operations back into token level ones.

use segdiff_tree::SegmentTree;

use crate::matcher::{Cluster, Matching};
use crate::{Operation, Tag};

/// Side of a diff, for the expansion bookkeeping.
struct Side<'a> {
    tree: &'a SegmentTree,
    clusters: &'a [Cluster],
    /// Token position of every cluster, plus the total token count.
    positions: Vec<usize>,
}

impl<'a> Side<'a> {
    fn new(tree: &'a SegmentTree, clusters: &'a [Cluster]) -> Self {
        let mut positions = Vec::with_capacity(clusters.len() + 1);
        let mut position = 0;
        for cluster in clusters {
            positions.push(position);
            position += cluster.token_count(tree);
        }
        positions.push(position);
        assert_eq!(position, tree.token_count(), "clusters must cover every token");

        Self { tree, clusters, positions }
    }
}

/// Expands `coarse`, a diff of the clustered sequences, into a diff of the
/// token sequences.
///
/// A paired segment inside an insertion is reported as an equality with the
/// old position of its partner. Inside a deletion it is skipped, so every
/// pair yields exactly one equality.
pub(crate) fn expand(
    coarse: &[Operation],
    old: (&SegmentTree, &[Cluster]),
    new: (&SegmentTree, &[Cluster]),
    matching: &Matching,
) -> Vec<Operation> {
    let old = Side::new(old.0, old.1);
    let new = Side::new(new.0, new.1);

    let mut operations = Vec::with_capacity(coarse.len());
    for op in coarse {
        match op.tag {
            Tag::Equal => operations.push(Operation::equal(
                old.positions[op.a1],
                old.positions[op.a2],
                new.positions[op.b1],
                new.positions[op.b2],
            )),
            Tag::Insert => {
                let at = old.positions[op.a1];
                let mut run = new.positions[op.b1];
                let mut position = run;

                for &cluster in &new.clusters[op.b1..op.b2] {
                    let Cluster::Segment(id) = cluster else {
                        position += 1;
                        continue;
                    };

                    if run < position {
                        operations.push(Operation::insert(at, at, run, position));
                    }

                    let Some(partner) = matching.old_of(id) else {
                        panic!("clustered new segment {id:?} has no partner");
                    };
                    let span = old.tree.segment(partner).span();
                    let len = new.tree.segment(id).token_count() as usize;
                    operations.push(Operation::equal(span.start, span.end, position, position + len));

                    position += len;
                    run = position;
                }

                if run < position {
                    operations.push(Operation::insert(at, at, run, position));
                }
            }
            Tag::Delete => {
                let at = new.positions[op.b1];
                let mut run = old.positions[op.a1];
                let mut position = run;

                for &cluster in &old.clusters[op.a1..op.a2] {
                    let Cluster::Segment(id) = cluster else {
                        position += 1;
                        continue;
                    };

                    if run < position {
                        operations.push(Operation::delete(run, position, at, at));
                    }
                    position += old.tree.segment(id).token_count() as usize;
                    run = position;
                }

                if run < position {
                    operations.push(Operation::delete(run, position, at, at));
                }
            }
        }
    }
    operations
}
