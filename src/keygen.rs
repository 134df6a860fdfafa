use rand::RngCore;

use crate::adrs::Adrs;
use crate::hash::{Hasher, KeyView, TIterator};
use crate::merkle::{self, LeafGenerator, TreeCursor};
use crate::params::{ParameterSet, MAX_MERKLE_HEIGHT, MAX_N};
use crate::wots_plus::WotsLeaves;
use crate::{Error, Result};

/// Generates a key pair for `ps`.
///
/// `private_key` (`4n` bytes) receives `SK.seed||SK.prf||PK.seed||PK.root`;
/// the three seeds come from `rng`. If `public_key` (`2n` bytes) is given, it
/// receives `PK.seed||PK.root`, the tail of the private key.
pub fn generate_key(
    private_key: &mut [u8],
    public_key: Option<&mut [u8]>,
    ps: &ParameterSet,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let n = ps.n;
    if private_key.len() != ps.size_private_key() {
        return Err(Error::BadLength(ps.size_private_key(), private_key.len()));
    }
    if let Some(public_key) = &public_key {
        if public_key.len() != ps.size_public_key() {
            return Err(Error::BadLength(ps.size_public_key(), public_key.len()));
        }
    }

    rng.try_fill_bytes(&mut private_key[..3 * n])
        .map_err(|_| Error::RandomnessFailure(3 * n))?;

    let root = hypertree_root(ps, &private_key[..3 * n]);
    private_key[3 * n..].copy_from_slice(&root[..n]);
    if let Some(public_key) = public_key {
        public_key.copy_from_slice(&private_key[2 * n..]);
    }

    log::debug!("{}: generated key pair", ps.name);
    Ok(())
}

/// Computes the root of the top hypertree layer (layer `d - 1`, tree 0) from
/// the three seeds, by walking the authentication path of its leaf 0.
fn hypertree_root(ps: &ParameterSet, seeds: &[u8]) -> [u8; MAX_N] {
    let hasher = Hasher::new(ps.family, ps.n, KeyView::from_private(seeds, ps.n));
    let mut cursor = TreeCursor::new(Adrs::new(ps.family));
    cursor.pos.hypertree_level = (ps.d - 1) as u32;

    let mut iter = TIterator::Idle;
    let mut leaves = WotsLeaves { iter: &mut iter };
    leaves.leaf(
        ps,
        &hasher,
        &mut cursor.adrs,
        &cursor.pos,
        0,
        &mut cursor.auth_path_buffer,
    );

    let mut stack = [[0_u8; MAX_N]; MAX_MERKLE_HEIGHT - 1];
    let mut node = [0_u8; MAX_N];
    for _ in 0..ps.merkle_h {
        merkle::auth_path_step(&mut leaves, ps, &hasher, &mut cursor, &mut stack, &mut node);
    }
    cursor.auth_path_buffer
}
