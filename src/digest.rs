//! Splitting the message digest into FORS leaf indices and a hypertree position.

use crate::params::{ParameterSet, MAX_FORS_TREES};
use crate::utils::{bytes_to_u64, low_bits_mask};

/// Where a message digest places a signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HypertreePosition {
    /// The selected leaf of each of the `k` FORS trees.
    pub fors_nodes: [u16; MAX_FORS_TREES],
    /// The bottom-layer Merkle tree, `h - merkle_h` bits.
    pub tree_address: u64,
    /// The leaf of that tree, i.e. the FORS key pair, `merkle_h` bits.
    pub keypair: u32,
}

/// Decomposes the output of `H_msg`.
///
/// The first `k * t` bits are the FORS indices, `t` bits each, most
/// significant bit first. The tree address and then the key pair follow, each
/// starting on a fresh byte and read big-endian from `ceil(bits / 8)` bytes.
/// `digest` must hold at least as many bytes as that takes; 49 always suffice.
pub(crate) fn decompose(ps: &ParameterSet, digest: &[u8]) -> HypertreePosition {
    let mut fors_nodes = [0_u16; MAX_FORS_TREES];

    let mut offset = 0;
    let mut bits_so_far = 0;
    let mut byte = digest[0];
    for node in fors_nodes[..ps.k].iter_mut() {
        let mut index = 0_u16;
        for _ in 0..ps.t {
            if bits_so_far == 8 {
                offset += 1;
                byte = digest[offset];
                bits_so_far = 0;
            }
            index = 2 * index + u16::from(byte >> 7);
            byte <<= 1;
            bits_so_far += 1;
        }
        *node = index;
    }
    offset += 1;

    let tree_bits = ps.h - ps.merkle_h;
    let tree_bytes = (tree_bits + 7) / 8;
    let tree_address = bytes_to_u64(&digest[offset..offset + tree_bytes]) & low_bits_mask(tree_bits);
    offset += tree_bytes;

    let leaf_bytes = (ps.merkle_h + 7) / 8;
    let keypair =
        bytes_to_u64(&digest[offset..offset + leaf_bytes]) & low_bits_mask(ps.merkle_h);

    HypertreePosition {
        fors_nodes,
        tree_address,
        keypair: keypair as u32,
    }
}
