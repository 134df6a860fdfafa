//! SPHINCS+ "simple" parameter sets and the compile-time bounds they imply.
//!
//! Every parameter set is a `const` [`ParameterSet`]; contexts hold a shared
//! reference to one. Which sets exist is controlled by Cargo features:
//!
//! * `sha2`, `shake`: hash families,
//! * `level3`, `level5`: security levels above L1 (`level5` implies `level3`),
//! * `small`: the "s" (small signature) variants; "f" variants are always built.
//!
//! The enabled sets determine the worst-case buffer sizes ([`MAX_N`],
//! [`MAX_FORS_HEIGHT`], ...) of a [`Context`](crate::Context); disabling sets that
//! are not needed shrinks every context.

use crate::hash::HashFamily;
use crate::{Error, Result};

#[cfg(not(any(feature = "sha2", feature = "shake")))]
compile_error!("enable at least one hash family: the `sha2` or the `shake` feature");

/// Winternitz parameter. Only `w = 16` is supported.
pub const WOTS_W: usize = 16;

/// Largest hash output length of any enabled parameter set.
pub const MAX_N: usize = if cfg!(feature = "level5") {
    32
} else if cfg!(feature = "level3") {
    24
} else {
    16
};

/// Largest number of FORS trees of any parameter set.
pub const MAX_FORS_TREES: usize = 35;

/// Largest FORS tree height of any enabled parameter set.
pub const MAX_FORS_HEIGHT: usize = if cfg!(feature = "small") {
    if cfg!(feature = "level3") {
        14
    } else {
        12
    }
} else if cfg!(feature = "level5") {
    9
} else if cfg!(feature = "level3") {
    8
} else {
    6
};

/// Largest height of a single hypertree layer of any enabled parameter set.
pub const MAX_MERKLE_HEIGHT: usize = if cfg!(feature = "small") {
    9
} else if cfg!(feature = "level5") {
    4
} else {
    3
};

/// Number of WOTS+ digits (message digits plus 3 checksum digits) at [`MAX_N`].
pub const MAX_WOTS_DIGITS: usize = 2 * MAX_N + 3;

/// Bytes requested from `HASH_msg`. Enough for every parameter set.
pub const MAX_MESSAGE_HASH: usize = 49;

/// An immutable description of one SPHINCS+ instance.
#[derive(Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// Name as used by the reference implementation, e.g. `sha2_128s_simple`.
    pub name: &'static str,
    /// Hash output length in bytes.
    pub n: usize,
    /// Number of FORS trees.
    pub k: usize,
    /// Height of each FORS tree.
    pub t: usize,
    /// Height of the hypertree.
    pub h: usize,
    /// Number of hypertree layers.
    pub d: usize,
    /// Height of each hypertree layer, `h / d`.
    pub merkle_h: usize,
    /// The hash functions of this instance.
    pub family: HashFamily,
}

impl ParameterSet {
    pub const fn size_private_key(&self) -> usize {
        4 * self.n
    }

    pub const fn size_public_key(&self) -> usize {
        2 * self.n
    }

    /// `n * (1 + (t + 1) * k + d * (2n + 3) + h)`: R, the FORS trees, one WOTS+
    /// signature per layer and the Merkle authentication paths.
    pub const fn size_signature(&self) -> usize {
        self.n * (1 + (self.t + 1) * self.k + self.d * self.wots_digits() + self.h)
    }

    /// Number of WOTS+ chains, `2n + 3`.
    pub const fn wots_digits(&self) -> usize {
        2 * self.n + 3
    }

    /// Looks up a compiled-in parameter set by name.
    pub fn by_name(name: &str) -> Result<&'static ParameterSet> {
        PARAMETER_SETS
            .iter()
            .copied()
            .find(|ps| ps.name == name)
            .ok_or_else(|| Error::UnknownParameterSet(name.to_string()))
    }
}

#[cfg(feature = "sha2")]
pub const SHA2_128F_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_128f_simple",
    n: 16,
    k: 33,
    t: 6,
    h: 66,
    d: 22,
    merkle_h: 3,
    family: HashFamily::Sha2L1,
};

#[cfg(all(feature = "sha2", feature = "small"))]
pub const SHA2_128S_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_128s_simple",
    n: 16,
    k: 14,
    t: 12,
    h: 63,
    d: 7,
    merkle_h: 9,
    family: HashFamily::Sha2L1,
};

#[cfg(all(feature = "sha2", feature = "level3"))]
pub const SHA2_192F_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_192f_simple",
    n: 24,
    k: 33,
    t: 8,
    h: 66,
    d: 22,
    merkle_h: 3,
    family: HashFamily::Sha2L35,
};

#[cfg(all(feature = "sha2", feature = "level3", feature = "small"))]
pub const SHA2_192S_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_192s_simple",
    n: 24,
    k: 17,
    t: 14,
    h: 63,
    d: 7,
    merkle_h: 9,
    family: HashFamily::Sha2L35,
};

#[cfg(all(feature = "sha2", feature = "level5"))]
pub const SHA2_256F_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_256f_simple",
    n: 32,
    k: 35,
    t: 9,
    h: 68,
    d: 17,
    merkle_h: 4,
    family: HashFamily::Sha2L35,
};

#[cfg(all(feature = "sha2", feature = "level5", feature = "small"))]
pub const SHA2_256S_SIMPLE: ParameterSet = ParameterSet {
    name: "sha2_256s_simple",
    n: 32,
    k: 22,
    t: 14,
    h: 64,
    d: 8,
    merkle_h: 8,
    family: HashFamily::Sha2L35,
};

#[cfg(feature = "shake")]
pub const SHAKE_128F_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_128f_simple",
    n: 16,
    k: 33,
    t: 6,
    h: 66,
    d: 22,
    merkle_h: 3,
    family: HashFamily::Shake256,
};

#[cfg(all(feature = "shake", feature = "small"))]
pub const SHAKE_128S_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_128s_simple",
    n: 16,
    k: 14,
    t: 12,
    h: 63,
    d: 7,
    merkle_h: 9,
    family: HashFamily::Shake256,
};

#[cfg(all(feature = "shake", feature = "level3"))]
pub const SHAKE_192F_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_192f_simple",
    n: 24,
    k: 33,
    t: 8,
    h: 66,
    d: 22,
    merkle_h: 3,
    family: HashFamily::Shake256,
};

#[cfg(all(feature = "shake", feature = "level3", feature = "small"))]
pub const SHAKE_192S_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_192s_simple",
    n: 24,
    k: 17,
    t: 14,
    h: 63,
    d: 7,
    merkle_h: 9,
    family: HashFamily::Shake256,
};

#[cfg(all(feature = "shake", feature = "level5"))]
pub const SHAKE_256F_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_256f_simple",
    n: 32,
    k: 35,
    t: 9,
    h: 68,
    d: 17,
    merkle_h: 4,
    family: HashFamily::Shake256,
};

#[cfg(all(feature = "shake", feature = "level5", feature = "small"))]
pub const SHAKE_256S_SIMPLE: ParameterSet = ParameterSet {
    name: "shake_256s_simple",
    n: 32,
    k: 22,
    t: 14,
    h: 64,
    d: 8,
    merkle_h: 8,
    family: HashFamily::Shake256,
};

/// Every compiled-in parameter set.
pub const PARAMETER_SETS: &[&ParameterSet] = &[
    #[cfg(all(feature = "sha2", feature = "small"))]
    &SHA2_128S_SIMPLE,
    #[cfg(feature = "sha2")]
    &SHA2_128F_SIMPLE,
    #[cfg(all(feature = "sha2", feature = "level3", feature = "small"))]
    &SHA2_192S_SIMPLE,
    #[cfg(all(feature = "sha2", feature = "level3"))]
    &SHA2_192F_SIMPLE,
    #[cfg(all(feature = "sha2", feature = "level5", feature = "small"))]
    &SHA2_256S_SIMPLE,
    #[cfg(all(feature = "sha2", feature = "level5"))]
    &SHA2_256F_SIMPLE,
    #[cfg(all(feature = "shake", feature = "small"))]
    &SHAKE_128S_SIMPLE,
    #[cfg(feature = "shake")]
    &SHAKE_128F_SIMPLE,
    #[cfg(all(feature = "shake", feature = "level3", feature = "small"))]
    &SHAKE_192S_SIMPLE,
    #[cfg(all(feature = "shake", feature = "level3"))]
    &SHAKE_192F_SIMPLE,
    #[cfg(all(feature = "shake", feature = "level5", feature = "small"))]
    &SHAKE_256S_SIMPLE,
    #[cfg(all(feature = "shake", feature = "level5"))]
    &SHAKE_256F_SIMPLE,
];
