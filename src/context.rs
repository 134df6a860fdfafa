//! The state shared by an in-progress signature generation or verification.
//!
//! A [`Context`] never allocates: every buffer is sized by the worst case of
//! the compiled-in parameter sets (see [`crate::params`]), and the data that is
//! only needed in some states lives in a [`Scratch`] variant that is replaced
//! as the state machine moves on.

use crate::adrs::{Adrs, Position};
use crate::digest::HypertreePosition;
use crate::hash::{Hasher, KeyView, TIterator};
use crate::merkle::TreeCursor;
use crate::params::{
    ParameterSet, MAX_FORS_HEIGHT, MAX_FORS_TREES, MAX_MERKLE_HEIGHT, MAX_N, MAX_WOTS_DIGITS,
};
use crate::utils::low_bits_mask;
use crate::wots_plus::compute_digits;

/// Where a [`Context`] is in producing or consuming a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Next: the secret value of the selected leaf of the current FORS tree.
    ForsLeaf,
    /// Next: an authentication path node of the current FORS tree.
    Fors,
    /// Next: a W-OTS+ chain value.
    Wots,
    /// Next: an authentication path node of the current hypertree layer.
    Merkle,
    /// The whole signature has been produced.
    Done,
    /// Signing stopped on an internal inconsistency.
    SignFail,
    /// Waiting for the randomness `R`.
    VerifyInit,
    /// Waiting for the secret value of the selected leaf of the current FORS tree.
    VerifyForsLeaf,
    /// Waiting for an authentication path node of the current FORS tree.
    VerifyFors,
    /// Waiting for a W-OTS+ chain value.
    VerifyWots,
    /// Waiting for an authentication path node of the current hypertree layer.
    VerifyMerkle,
    /// The hypertree root matched the public key.
    VerifySuccess,
    /// The signature was rejected; the context accepts nothing more.
    VerifyFail,
}

impl State {
    pub(crate) fn is_signing(self) -> bool {
        matches!(
            self,
            State::ForsLeaf | State::Fors | State::Wots | State::Merkle
        )
    }

    pub(crate) fn is_verifying(self) -> bool {
        matches!(
            self,
            State::VerifyInit
                | State::VerifyForsLeaf
                | State::VerifyFors
                | State::VerifyWots
                | State::VerifyMerkle
        )
    }
}

/// Data that only some states need.
pub(crate) enum Scratch<'a> {
    Empty,
    /// The selected leaf of every FORS tree, and the treehash stack.
    Fors {
        nodes: [u16; MAX_FORS_TREES],
        stack: [[u8; MAX_N]; MAX_FORS_HEIGHT - 1],
    },
    /// The digits of the W-OTS+ signature being produced or checked.
    Wots {
        digit: usize,
        digits: [u8; MAX_WOTS_DIGITS],
    },
    /// The treehash stack of a hypertree Merkle tree.
    Merkle {
        stack: [[u8; MAX_N]; MAX_MERKLE_HEIGHT - 1],
    },
    /// The message, until the randomness `R` arrives.
    Verify { message: &'a [u8] },
}

/// An in-progress signature generation ([`Context::init_sign`]) or
/// verification ([`Context::init_verify`]).
///
/// A context is single use and holds no heap memory. It borrows the message
/// (for verification), the key and the parameter set.
pub struct Context<'a> {
    pub(crate) ps: &'a ParameterSet,
    pub(crate) hasher: Hasher<'a>,
    pub(crate) state: State,
    /// `n` bytes of signature, drained by signing and filled by verification.
    pub(crate) buffer: [u8; MAX_N],
    pub(crate) buffer_offset: usize,
    pub(crate) cursor: TreeCursor,
    /// Iterator compressing the FORS roots, or the W-OTS+ chain tops of a key pair.
    pub(crate) big_iter: TIterator,
    pub(crate) scratch: Scratch<'a>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        ps: &'a ParameterSet,
        key: KeyView<'a>,
        state: State,
        scratch: Scratch<'a>,
    ) -> Self {
        Self {
            ps,
            hasher: Hasher::new(ps.family, ps.n, key),
            state,
            buffer: [0; MAX_N],
            buffer_offset: 0,
            cursor: TreeCursor::new(Adrs::new(ps.family)),
            big_iter: TIterator::Idle,
            scratch,
        }
    }

    /// Where this context is in the signature.
    pub fn state(&self) -> State {
        self.state
    }

    /// The parameter set this context works with.
    pub fn parameter_set(&self) -> &'a ParameterSet {
        self.ps
    }

    /// Positions the context at the first FORS tree selected by `position` and
    /// starts compressing the FORS roots.
    pub(crate) fn start_fors(&mut self, position: HypertreePosition) {
        self.cursor.pos = Position {
            tree_address: position.tree_address,
            fors_keypair_addr: position.keypair,
            ..Position::default()
        };
        self.scratch = Scratch::Fors {
            nodes: position.fors_nodes,
            stack: [[0; MAX_N]; MAX_FORS_HEIGHT - 1],
        };
        self.cursor.adrs.set_fors_root(&self.cursor.pos);
        self.big_iter = self.hasher.init_t(&self.cursor.adrs);
    }

    /// Prepares the W-OTS+ signature of key pair `next_leaf` over the root in
    /// the authentication path buffer, which came from the FORS key or the
    /// layer below.
    pub(crate) fn start_wots(&mut self, next_leaf: u32) {
        let mut digits = [0; MAX_WOTS_DIGITS];
        compute_digits(&mut digits, &self.cursor.auth_path_buffer[..self.ps.n]);
        self.scratch = Scratch::Wots { digit: 0, digits };

        let pos = &mut self.cursor.pos;
        pos.auth_path_node = next_leaf;
        pos.fors_tree = 0;
        pos.fors_keypair_addr = 0;
        pos.merkle_level = 0;
    }

    /// Moves up one hypertree layer. Returns the key pair to sign with in the
    /// parent tree, or `None` when the top layer has been finished.
    pub(crate) fn climb(&mut self) -> Option<u32> {
        let ps = self.ps;
        let pos = &mut self.cursor.pos;
        pos.hypertree_level += 1;
        if pos.hypertree_level as usize == ps.d {
            return None;
        }
        let next_leaf = pos.tree_address & low_bits_mask(ps.merkle_h);
        pos.tree_address >>= ps.merkle_h;
        log::trace!(
            "{}: moving to hypertree layer {} (tree {}, key pair {})",
            ps.name,
            pos.hypertree_level,
            pos.tree_address,
            next_leaf
        );
        Some(next_leaf as u32)
    }
}
