//! FORS: the few-time signature at the bottom of the hypertree.
//!
//! A FORS signature is, per tree, the secret value of the selected leaf
//! followed by its authentication path; the `k` tree roots are compressed
//! into the FORS public key under the FORS-roots address.

use crate::adrs::{Adrs, AdrsType, Position};
use crate::hash::Hasher;
use crate::merkle::LeafGenerator;
use crate::params::ParameterSet;

/// Writes the secret value of leaf `index` of the current FORS tree into `output[..n]`.
pub(crate) fn fors_prf(
    ps: &ParameterSet,
    hasher: &Hasher<'_>,
    adrs: &mut Adrs,
    pos: &Position,
    index: u32,
    output: &mut [u8],
) {
    adrs.set_fors_prf(pos, ps.t, index);
    hasher.prf(adrs, output);
}

/// Generates FORS leaves: `F` of the secret value under the FORS-leaf address.
pub(crate) struct ForsLeaves;

impl LeafGenerator for ForsLeaves {
    const NODE_TYPE: AdrsType = AdrsType::ForsTree;

    fn leaf(
        &mut self,
        ps: &ParameterSet,
        hasher: &Hasher<'_>,
        adrs: &mut Adrs,
        pos: &Position,
        index: u32,
        output: &mut [u8],
    ) {
        fors_prf(ps, hasher, adrs, pos, index, output);
        adrs.set_fors_leaf(pos, ps.t, index);
        hasher.f_inplace(adrs, output);
    }
}
