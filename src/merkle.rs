//! Incremental authentication paths.
//!
//! [`auth_path_step`] produces one node of an authentication path per call by
//! evaluating the sibling subtree with the classic treehash stack, so at most
//! `height - 1` nodes are held at once. It also folds that node into the
//! running root kept in [`TreeCursor::auth_path_buffer`]; once all `height`
//! steps are done, the buffer holds the root of the tree.
//!
//! Verification receives the authentication path instead of computing it and
//! only calls [`fold`].

use crate::adrs::{Adrs, AdrsType, Position};
use crate::hash::{Hasher, TIterator};
use crate::params::{ParameterSet, MAX_N};

/// Computes the leaves of one kind of tree.
pub(crate) trait LeafGenerator {
    /// The address type of the inner nodes of this kind of tree.
    const NODE_TYPE: AdrsType;

    /// Writes leaf `index` of the tree at `pos` into `output[..n]`.
    fn leaf(
        &mut self,
        ps: &ParameterSet,
        hasher: &Hasher<'_>,
        adrs: &mut Adrs,
        pos: &Position,
        index: u32,
        output: &mut [u8],
    );
}

/// The part of a context the tree-path engine moves through a tree.
pub(crate) struct TreeCursor {
    pub pos: Position,
    pub adrs: Adrs,
    /// Iterator for the two-input hashes of inner nodes.
    pub small_iter: TIterator,
    /// Root of the subtree processed so far.
    pub auth_path_buffer: [u8; MAX_N],
}

impl TreeCursor {
    pub(crate) fn new(adrs: Adrs) -> Self {
        Self {
            pos: Position::default(),
            adrs,
            small_iter: TIterator::Idle,
            auth_path_buffer: [0; MAX_N],
        }
    }
}

/// Computes the authentication path node at height `pos.merkle_level` for
/// leaf `pos.auth_path_node` into `node[..n]`, folds it into the running root
/// and advances `pos.merkle_level`.
///
/// `stack` must hold at least `merkle_level` entries; its contents are scratch.
pub(crate) fn auth_path_step<L: LeafGenerator>(
    leaves: &mut L,
    ps: &ParameterSet,
    hasher: &Hasher<'_>,
    cursor: &mut TreeCursor,
    stack: &mut [[u8; MAX_N]],
    node: &mut [u8; MAX_N],
) {
    let n = ps.n;
    let h = cursor.pos.merkle_level;
    let size_h = 1_u32 << h;
    let first = (cursor.pos.auth_path_node ^ size_h) & !(size_h - 1);

    for i in 0..size_h {
        leaves.leaf(ps, hasher, &mut cursor.adrs, &cursor.pos, first + i, node);

        // Combine with the stacked left siblings, one per trailing 1 bit of `i`.
        let mut k = 0_u32;
        let mut bits = i;
        while bits & 1 == 1 {
            cursor
                .adrs
                .set_merkle(&cursor.pos, ps.t, first + i, k, L::NODE_TYPE);
            let iter = &mut cursor.small_iter;
            *iter = hasher.init_t(&cursor.adrs);
            iter.next_t(&stack[k as usize][..n]);
            iter.next_t(&node[..n]);
            iter.final_t(&mut node[..n]);
            k += 1;
            bits >>= 1;
        }

        if k < h {
            stack[k as usize][..n].copy_from_slice(&node[..n]);
        }
    }

    fold(ps, hasher, cursor, L::NODE_TYPE, &node[..n]);
}

/// Replaces the running root with the parent of itself and `node`, the
/// authentication path node at height `pos.merkle_level`, and advances
/// `pos.merkle_level`. Bit `merkle_level` of `pos.auth_path_node` tells on
/// which side `node` lies.
pub(crate) fn fold(
    ps: &ParameterSet,
    hasher: &Hasher<'_>,
    cursor: &mut TreeCursor,
    node_type: AdrsType,
    node: &[u8],
) {
    let n = ps.n;
    let h = cursor.pos.merkle_level;
    let auth = cursor.pos.auth_path_node;
    cursor.pos.merkle_level += 1;

    cursor
        .adrs
        .set_merkle(&cursor.pos, ps.t, auth, h, node_type);
    let iter = &mut cursor.small_iter;
    *iter = hasher.init_t(&cursor.adrs);
    if auth & (1 << h) != 0 {
        iter.next_t(&node[..n]);
        iter.next_t(&cursor.auth_path_buffer[..n]);
    } else {
        iter.next_t(&cursor.auth_path_buffer[..n]);
        iter.next_t(&node[..n]);
    }
    iter.final_t(&mut cursor.auth_path_buffer[..n]);
}
