//! # Winternitz One-Time Signature Scheme Plus (W-OTS+)
//!
//! W-OTS+ with `w = 16` as used inside the SPHINCS+ hypertree. Nothing here
//! holds a whole W-OTS+ key or signature: chains are evaluated one at a time,
//! and a public key is compressed on the fly through a [`TIterator`].
//!
//! * [`compute_digits`] turns an `n`-byte root into `2n` base-16 message
//!   digits followed by 3 checksum digits.
//! * [`chain_start`] and [`gen_chain`] derive a chain's secret start and walk
//!   it. The signer stops after `digit` steps, the verifier completes the
//!   remaining `15 - digit` steps.
//! * [`WotsLeaves`] computes the compressed public key of a key pair, which is
//!   a leaf of a hypertree Merkle tree.

use core::ops::Range;

use crate::adrs::{Adrs, AdrsType, Position};
use crate::hash::{Hasher, TIterator};
use crate::merkle::LeafGenerator;
use crate::params::{ParameterSet, MAX_N, MAX_WOTS_DIGITS, WOTS_W};

/// Number of checksum digits for `w = 16` and every supported `n`.
const CHECKSUM_DIGITS: usize = 3;

/// Converts `hash` into its `2 * hash.len()` base-16 digits, high nibble first,
/// followed by the 3-digit checksum `2 * 15 * n - sum(digits)`.
pub(crate) fn compute_digits(digits: &mut [u8; MAX_WOTS_DIGITS], hash: &[u8]) {
    let n = hash.len();
    let mut sum = (2 * (WOTS_W - 1) * n) as u32;

    for (pair, &byte) in digits.chunks_exact_mut(2).zip(hash) {
        pair[0] = byte >> 4;
        pair[1] = byte & 0xf;
        sum -= u32::from(pair[0]) + u32::from(pair[1]);
    }

    let checksum = &mut digits[2 * n..2 * n + CHECKSUM_DIGITS];
    checksum[0] = ((sum >> 8) & 0xf) as u8;
    checksum[1] = ((sum >> 4) & 0xf) as u8;
    checksum[2] = (sum & 0xf) as u8;
}

/// Writes the secret start of chain `digit` of key pair `leaf` into `output[..n]`.
pub(crate) fn chain_start(
    hasher: &Hasher<'_>,
    adrs: &mut Adrs,
    pos: &Position,
    leaf: u32,
    digit: u32,
    output: &mut [u8],
) {
    adrs.set_wots_prf(pos, leaf, digit);
    hasher.prf(adrs, output);
}

/// Computes the chaining function in place.
///
/// Interprets `buffer[..n]` as the `steps.start`-th value of chain `digit` of
/// key pair `leaf` and advances it to the `steps.end`-th value.
pub(crate) fn gen_chain(
    hasher: &Hasher<'_>,
    adrs: &mut Adrs,
    pos: &Position,
    leaf: u32,
    digit: u32,
    buffer: &mut [u8],
    steps: Range<u32>,
) {
    for step in steps {
        adrs.set_wots_f(pos, leaf, digit, step);
        hasher.f_inplace(adrs, buffer);
    }
}

/// Generates W-OTS+ public keys, compressing all chain tops of a key pair
/// through the borrowed iterator.
pub(crate) struct WotsLeaves<'i> {
    pub iter: &'i mut TIterator,
}

impl LeafGenerator for WotsLeaves<'_> {
    const NODE_TYPE: AdrsType = AdrsType::Tree;

    fn leaf(
        &mut self,
        ps: &ParameterSet,
        hasher: &Hasher<'_>,
        adrs: &mut Adrs,
        pos: &Position,
        index: u32,
        output: &mut [u8],
    ) {
        let n = ps.n;
        adrs.set_wots_header(pos, index);
        *self.iter = hasher.init_t(adrs);

        let mut chain = [0_u8; MAX_N];
        for digit in 0..ps.wots_digits() as u32 {
            chain_start(hasher, adrs, pos, index, digit, &mut chain);
            gen_chain(hasher, adrs, pos, index, digit, &mut chain, 0..WOTS_W as u32 - 1);
            self.iter.next_t(&chain[..n]);
        }
        self.iter.final_t(&mut output[..n]);
    }
}
