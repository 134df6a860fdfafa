//! Incremental signature generation.
//!
//! The signature is produced front to back, `n` bytes at a time:
//!
//! ```text
//! R || k * (FORS secret || t auth nodes) || d * (W-OTS+ signature || merkle_h auth nodes)
//! ```
//!
//! Only one `n`-byte piece exists at any moment; [`Context::sign`] hands out
//! as much of it as the caller asks for and computes the next piece once the
//! current one is drained.

use rand::RngCore;

use crate::context::{Context, Scratch, State};
use crate::digest::decompose;
use crate::fors::{fors_prf, ForsLeaves};
use crate::hash::KeyView;
use crate::merkle::{self, LeafGenerator};
use crate::params::{ParameterSet, MAX_MERKLE_HEIGHT, MAX_MESSAGE_HASH, MAX_N};
use crate::wots_plus::{chain_start, gen_chain, WotsLeaves};
use crate::{Error, Result};

impl<'a> Context<'a> {
    /// Starts signing `message` with `private_key` (`4n` bytes).
    ///
    /// With an `rng`, `n` fresh bytes randomize the signature; a failing `rng`
    /// is an error. Without one, the public seed is used instead and signing is
    /// deterministic.
    ///
    /// The first `n` bytes of the signature, the randomness `R`, are ready
    /// when this returns.
    pub fn init_sign(
        message: &[u8],
        ps: &'a ParameterSet,
        private_key: &'a [u8],
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Self> {
        let n = ps.n;
        if private_key.len() != ps.size_private_key() {
            return Err(Error::BadLength(ps.size_private_key(), private_key.len()));
        }

        let key = KeyView::from_private(private_key, n);
        let mut opt_rand = [0_u8; MAX_N];
        match rng {
            Some(rng) => rng
                .try_fill_bytes(&mut opt_rand[..n])
                .map_err(|_| Error::RandomnessFailure(n))?,
            None => opt_rand[..n].copy_from_slice(key.public_seed),
        }

        let mut ctx = Context::new(ps, key, State::ForsLeaf, Scratch::Empty);
        ctx.hasher.prf_msg(&opt_rand[..n], message, &mut ctx.buffer);

        let mut digest = [0_u8; MAX_MESSAGE_HASH];
        ctx.hasher.hash_msg(&ctx.buffer[..n], message, &mut digest);
        ctx.start_fors(decompose(ps, &digest));
        ctx.buffer_offset = 0;

        Ok(ctx)
    }

    /// Writes the next `dest.len()` bytes of the signature into `dest`.
    ///
    /// Returns the number of bytes written. It is `dest.len()` until the end of
    /// the signature is reached, and 0 once the signature is complete, for a
    /// verification context and for a failed context.
    pub fn sign(&mut self, dest: &mut [u8]) -> usize {
        // The last piece is still drained after reaching `Done`.
        if !self.state.is_signing() && self.state != State::Done {
            return 0;
        }

        let n = self.ps.n;
        let mut written = 0;
        while written < dest.len() {
            let remain = n - self.buffer_offset;
            if remain > 0 {
                let len = remain.min(dest.len() - written);
                dest[written..written + len]
                    .copy_from_slice(&self.buffer[self.buffer_offset..self.buffer_offset + len]);
                self.buffer_offset += len;
                written += len;
                continue;
            }
            if !self.next_signature_piece() {
                break;
            }
        }
        written
    }

    /// Computes the next `n` bytes of the signature into the buffer.
    /// Returns `false` at the end of the signature or on failure.
    fn next_signature_piece(&mut self) -> bool {
        let advanced = match self.state {
            State::ForsLeaf => self.sign_fors_leaf(),
            State::Fors => self.sign_fors(),
            State::Wots => self.sign_wots(),
            State::Merkle => self.sign_merkle(),
            _ => return false,
        };
        if !advanced {
            log::debug!(
                "{}: signing context in state {:?} lost its scratch data",
                self.ps.name,
                self.state
            );
            self.state = State::SignFail;
        }
        advanced
    }

    /// Emits the secret value of the selected leaf of the current FORS tree
    /// and seeds the running root with that leaf.
    fn sign_fors_leaf(&mut self) -> bool {
        let ps = self.ps;
        let node = match &self.scratch {
            Scratch::Fors { nodes, .. } => match nodes.get(self.cursor.pos.fors_tree as usize) {
                Some(&node) => u32::from(node),
                None => return false,
            },
            _ => return false,
        };

        let cursor = &mut self.cursor;
        cursor.pos.auth_path_node = node;
        cursor.pos.merkle_level = 0;
        fors_prf(
            ps,
            &self.hasher,
            &mut cursor.adrs,
            &cursor.pos,
            node,
            &mut self.buffer,
        );
        self.buffer_offset = 0;

        ForsLeaves.leaf(
            ps,
            &self.hasher,
            &mut cursor.adrs,
            &cursor.pos,
            node,
            &mut cursor.auth_path_buffer,
        );
        self.state = State::Fors;
        true
    }

    /// Emits the next FORS authentication path node. At the top of the tree
    /// the root joins the FORS public key; after the last tree, that key is
    /// the message signed by the bottom layer's W-OTS+ key pair.
    fn sign_fors(&mut self) -> bool {
        let ps = self.ps;
        let n = ps.n;
        let Context {
            hasher,
            buffer,
            buffer_offset,
            cursor,
            big_iter,
            scratch,
            ..
        } = self;
        let stack = match scratch {
            Scratch::Fors { stack, .. } => stack,
            _ => return false,
        };

        merkle::auth_path_step(&mut ForsLeaves, ps, hasher, cursor, &mut stack[..], buffer);
        *buffer_offset = 0;

        if cursor.pos.merkle_level as usize == ps.t {
            big_iter.next_t(&cursor.auth_path_buffer[..n]);
            cursor.pos.fors_tree += 1;
            self.state = State::ForsLeaf;

            if self.cursor.pos.fors_tree as usize == ps.k {
                self.big_iter.final_t(&mut self.cursor.auth_path_buffer[..n]);
                let keypair = self.cursor.pos.fors_keypair_addr;
                self.start_wots(keypair);
                self.state = State::Wots;
            }
        }
        true
    }

    /// Emits the next W-OTS+ chain value. After the last one, computes the
    /// key pair's public key as the leaf the Merkle authentication path starts from.
    fn sign_wots(&mut self) -> bool {
        let ps = self.ps;
        let (digit, target) = match &mut self.scratch {
            Scratch::Wots { digit, digits } => match digits.get(*digit) {
                Some(&target) => {
                    *digit += 1;
                    (*digit - 1, target)
                }
                None => return false,
            },
            _ => return false,
        };

        let cursor = &mut self.cursor;
        let leaf = cursor.pos.auth_path_node;
        chain_start(
            &self.hasher,
            &mut cursor.adrs,
            &cursor.pos,
            leaf,
            digit as u32,
            &mut self.buffer,
        );
        gen_chain(
            &self.hasher,
            &mut cursor.adrs,
            &cursor.pos,
            leaf,
            digit as u32,
            &mut self.buffer,
            0..u32::from(target),
        );
        self.buffer_offset = 0;

        if digit + 1 == ps.wots_digits() {
            self.scratch = Scratch::Merkle {
                stack: [[0; MAX_N]; MAX_MERKLE_HEIGHT - 1],
            };
            cursor.pos.merkle_level = 0;
            WotsLeaves {
                iter: &mut self.big_iter,
            }
            .leaf(
                ps,
                &self.hasher,
                &mut cursor.adrs,
                &cursor.pos,
                leaf,
                &mut cursor.auth_path_buffer,
            );
            self.state = State::Merkle;
        }
        true
    }

    /// Emits the next authentication path node of the current hypertree
    /// layer. At the top of the layer, moves on to the W-OTS+ signature of the
    /// layer above, or finishes.
    fn sign_merkle(&mut self) -> bool {
        let ps = self.ps;
        let Context {
            hasher,
            buffer,
            buffer_offset,
            cursor,
            big_iter,
            scratch,
            ..
        } = self;
        let stack = match scratch {
            Scratch::Merkle { stack } => stack,
            _ => return false,
        };

        let mut leaves = WotsLeaves { iter: big_iter };
        merkle::auth_path_step(&mut leaves, ps, hasher, cursor, &mut stack[..], buffer);
        *buffer_offset = 0;

        if cursor.pos.merkle_level as usize == ps.merkle_h {
            match self.climb() {
                Some(next_leaf) => {
                    self.start_wots(next_leaf);
                    self.state = State::Wots;
                }
                None => {
                    self.scratch = Scratch::Empty;
                    self.state = State::Done;
                }
            }
        }
        true
    }
}
