//! Incremental signature verification.
//!
//! The verifier mirrors the signer: signature bytes are pushed through
//! [`Context::update_verify`] in chunks of any size and every complete `n`-byte
//! piece is consumed as it arrives. Authentication path nodes are folded into
//! the running root and W-OTS+ chain values are completed, so nothing but the
//! current piece is ever stored.

use crate::adrs::AdrsType;
use crate::context::{Context, Scratch, State};
use crate::digest::decompose;
use crate::hash::KeyView;
use crate::merkle;
use crate::params::{ParameterSet, MAX_MESSAGE_HASH, WOTS_W};
use crate::wots_plus::gen_chain;
use crate::{Error, Result};

impl<'a> Context<'a> {
    /// Starts verifying a signature of `message` under `public_key` (`2n` bytes).
    ///
    /// No signature bytes are consumed yet; feed them with
    /// [`Context::update_verify`] and conclude with [`Context::verify`].
    pub fn init_verify(
        message: &'a [u8],
        ps: &'a ParameterSet,
        public_key: &'a [u8],
    ) -> Result<Self> {
        if public_key.len() != ps.size_public_key() {
            return Err(Error::BadLength(ps.size_public_key(), public_key.len()));
        }
        Ok(Context::new(
            ps,
            KeyView::from_public(public_key, ps.n),
            State::VerifyInit,
            Scratch::Verify { message },
        ))
    }

    /// Consumes the next `chunk` of the signature.
    ///
    /// Returns `false` as soon as the signature is known to be invalid: the
    /// hypertree root does not match the public key, or the signature carries
    /// bytes after its last node. The context then stays in
    /// [`State::VerifyFail`]. A context that is not verifying, or has already
    /// failed, returns `false` and is left as is.
    ///
    /// `true` only means no inconsistency has been found so far; the outcome
    /// comes from [`Context::verify`].
    pub fn update_verify(&mut self, chunk: &[u8]) -> bool {
        if self.state == State::VerifySuccess {
            if chunk.is_empty() {
                return true;
            }
            log::debug!(
                "{}: {} bytes past the end of the signature",
                self.ps.name,
                chunk.len()
            );
            self.state = State::VerifyFail;
            return false;
        }
        if !self.state.is_verifying() {
            return false;
        }

        let n = self.ps.n;
        let mut chunk = chunk;
        loop {
            let len = (n - self.buffer_offset).min(chunk.len());
            self.buffer[self.buffer_offset..self.buffer_offset + len]
                .copy_from_slice(&chunk[..len]);
            self.buffer_offset += len;
            chunk = &chunk[len..];
            if self.buffer_offset < n {
                return true;
            }
            self.buffer_offset = 0;

            let consistent = match self.state {
                State::VerifyInit => self.verify_randomness(),
                State::VerifyForsLeaf => self.verify_fors_leaf(),
                State::VerifyFors => self.verify_fors(),
                State::VerifyWots => self.verify_wots(),
                State::VerifyMerkle => self.verify_merkle(chunk.is_empty()),
                _ => false,
            };
            if !consistent {
                log::debug!(
                    "{}: signature rejected in state {:?}",
                    self.ps.name,
                    self.state
                );
                self.state = State::VerifyFail;
                return false;
            }
            if self.state == State::VerifySuccess {
                return true;
            }
        }
    }

    /// Whether the signature was valid: the hypertree root matched the public
    /// key and exactly the signature's bytes were supplied.
    pub fn verify(&self) -> bool {
        self.state == State::VerifySuccess && self.buffer_offset == 0
    }

    /// The buffer holds `R`: hash the message and find the FORS leaves and
    /// the hypertree position it commits to.
    fn verify_randomness(&mut self) -> bool {
        let message = match &self.scratch {
            Scratch::Verify { message } => *message,
            _ => return false,
        };
        let mut digest = [0_u8; MAX_MESSAGE_HASH];
        self.hasher
            .hash_msg(&self.buffer[..self.ps.n], message, &mut digest);
        self.start_fors(decompose(self.ps, &digest));
        self.state = State::VerifyForsLeaf;
        true
    }

    /// The buffer holds a FORS secret value; its leaf starts the running root.
    fn verify_fors_leaf(&mut self) -> bool {
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
        cursor.adrs.set_fors_leaf(&cursor.pos, ps.t, node);
        self.hasher
            .f(&cursor.adrs, &self.buffer[..ps.n], &mut cursor.auth_path_buffer);
        self.state = State::VerifyFors;
        true
    }

    /// The buffer holds a FORS authentication path node.
    fn verify_fors(&mut self) -> bool {
        let ps = self.ps;
        let n = ps.n;
        if !matches!(self.scratch, Scratch::Fors { .. }) {
            return false;
        }

        merkle::fold(
            ps,
            &self.hasher,
            &mut self.cursor,
            AdrsType::ForsTree,
            &self.buffer[..n],
        );
        if self.cursor.pos.merkle_level as usize == ps.t {
            self.big_iter.next_t(&self.cursor.auth_path_buffer[..n]);
            self.cursor.pos.fors_tree += 1;
            self.state = State::VerifyForsLeaf;

            if self.cursor.pos.fors_tree as usize == ps.k {
                self.big_iter.final_t(&mut self.cursor.auth_path_buffer[..n]);
                let keypair = self.cursor.pos.fors_keypair_addr;
                self.start_wots_verify(keypair);
            }
        }
        true
    }

    /// Prepares checking the W-OTS+ signature of key pair `next_leaf` over the
    /// root in the authentication path buffer.
    fn start_wots_verify(&mut self, next_leaf: u32) {
        self.start_wots(next_leaf);
        let cursor = &mut self.cursor;
        cursor.adrs.set_wots_header(&cursor.pos, next_leaf);
        self.big_iter = self.hasher.init_t(&cursor.adrs);
        self.state = State::VerifyWots;
    }

    /// The buffer holds a W-OTS+ chain value: complete the chain and absorb
    /// its top into the key pair's public key.
    fn verify_wots(&mut self) -> bool {
        let ps = self.ps;
        let n = ps.n;
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
        gen_chain(
            &self.hasher,
            &mut cursor.adrs,
            &cursor.pos,
            leaf,
            digit as u32,
            &mut self.buffer,
            u32::from(target)..WOTS_W as u32 - 1,
        );
        self.big_iter.next_t(&self.buffer[..n]);

        if digit + 1 == ps.wots_digits() {
            self.big_iter.final_t(&mut cursor.auth_path_buffer[..n]);
            self.scratch = Scratch::Empty;
            self.state = State::VerifyMerkle;
        }
        true
    }

    /// The buffer holds a hypertree authentication path node. At the top of
    /// the last layer, the root must equal the public key's and `end_of_chunk`
    /// must hold.
    fn verify_merkle(&mut self, end_of_chunk: bool) -> bool {
        let ps = self.ps;
        let n = ps.n;
        merkle::fold(
            ps,
            &self.hasher,
            &mut self.cursor,
            AdrsType::Tree,
            &self.buffer[..n],
        );
        if self.cursor.pos.merkle_level as usize != ps.merkle_h {
            return true;
        }

        match self.climb() {
            Some(next_leaf) => {
                self.start_wots_verify(next_leaf);
                true
            }
            None if !end_of_chunk => {
                log::debug!("{}: bytes past the end of the signature", ps.name);
                false
            }
            None if self.cursor.auth_path_buffer[..n] != *self.hasher.key().root => {
                log::debug!("{}: hypertree root does not match the public key", ps.name);
                false
            }
            None => {
                self.state = State::VerifySuccess;
                true
            }
        }
    }
}
