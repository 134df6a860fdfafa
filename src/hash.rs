//! The tweakable hash functions of SPHINCS+ "simple" for both hash families.
//!
//! A [`Hasher`] is built once per context from the parameter set's
//! [`HashFamily`] and a [`KeyView`]. For the SHA-2 family it keeps states that
//! have already absorbed `BlockPad(PK.seed)`, so every `F`, `PRF` and `T`
//! evaluation starts from a clone instead of rehashing the public seed.
//!
//! Multi-input hashes (`H` and `T_l`) are computed incrementally through a
//! [`TIterator`]: [`Hasher::init_t`], then [`TIterator::next_t`] once per
//! `n`-byte input, then [`TIterator::final_t`].

#[cfg(feature = "sha2")]
mod sha2;
#[cfg(feature = "shake")]
mod shake;

use crate::adrs::Adrs;
use crate::params::MAX_N;

#[cfg(feature = "sha2")]
use ::sha2::{Sha256, Sha512};
#[cfg(feature = "shake")]
use ::sha3::Shake256;

/// The hash instantiation of a parameter set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HashFamily {
    /// SHAKE256 for every function, full 32-byte addresses.
    #[cfg(feature = "shake")]
    Shake256,
    /// SHA2-256 for every function (security level 1), compressed addresses.
    #[cfg(feature = "sha2")]
    Sha2L1,
    /// SHA2-256 for `F` and `PRF`, SHA2-512 for `H`, `T_l`, `PRF_msg` and
    /// `H_msg` (security levels 3 and 5), compressed addresses.
    #[cfg(feature = "sha2")]
    Sha2L35,
}

impl HashFamily {
    /// Whether this family uses the compressed 22-byte address layout.
    pub(crate) fn compressed_adrs(self) -> bool {
        match self {
            #[cfg(feature = "shake")]
            HashFamily::Shake256 => false,
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L1 | HashFamily::Sha2L35 => true,
        }
    }
}

/// Named views of the key material a context works with.
///
/// A private key is `SK.seed||SK.prf||PK.seed||PK.root`, a public key is
/// `PK.seed||PK.root`. The secret fields are `None` for a view of a public key.
#[derive(Copy, Clone)]
pub(crate) struct KeyView<'a> {
    pub secret_seed: Option<&'a [u8]>,
    pub prf_seed: Option<&'a [u8]>,
    pub public_seed: &'a [u8],
    pub root: &'a [u8],
}

impl<'a> KeyView<'a> {
    /// Splits a private key of at least `3n` bytes. With only the three seeds
    /// present (during key generation) the root is empty.
    pub(crate) fn from_private(private_key: &'a [u8], n: usize) -> Self {
        Self {
            secret_seed: Some(&private_key[..n]),
            prf_seed: Some(&private_key[n..2 * n]),
            public_seed: &private_key[2 * n..3 * n],
            root: &private_key[3 * n..],
        }
    }

    pub(crate) fn from_public(public_key: &'a [u8], n: usize) -> Self {
        Self {
            secret_seed: None,
            prf_seed: None,
            public_seed: &public_key[..n],
            root: &public_key[n..2 * n],
        }
    }
}

enum Backend {
    #[cfg(feature = "shake")]
    Shake,
    #[cfg(feature = "sha2")]
    Sha2L1 { sha256: Sha256 },
    #[cfg(feature = "sha2")]
    Sha2L35 { sha256: Sha256, sha512: Sha512 },
}

/// An in-progress `T` (or `H`) evaluation.
#[derive(Clone)]
pub(crate) enum TIterator {
    Idle,
    #[cfg(feature = "shake")]
    Shake(Shake256),
    #[cfg(feature = "sha2")]
    Sha256(Sha256),
    #[cfg(feature = "sha2")]
    Sha512(Sha512),
}

impl Default for TIterator {
    fn default() -> Self {
        TIterator::Idle
    }
}

impl TIterator {
    /// Absorbs the next `n`-byte input block.
    pub(crate) fn next_t(&mut self, input: &[u8]) {
        match self {
            TIterator::Idle => {}
            #[cfg(feature = "shake")]
            TIterator::Shake(hasher) => shake::absorb(hasher, input),
            #[cfg(feature = "sha2")]
            TIterator::Sha256(hasher) => sha2::absorb(hasher, input),
            #[cfg(feature = "sha2")]
            TIterator::Sha512(hasher) => sha2::absorb(hasher, input),
        }
    }

    /// Writes the `output.len()`-byte result and leaves the iterator idle.
    /// An idle iterator leaves `output` untouched.
    pub(crate) fn final_t(&mut self, output: &mut [u8]) {
        match core::mem::take(self) {
            TIterator::Idle => {}
            #[cfg(feature = "shake")]
            TIterator::Shake(hasher) => shake::squeeze(hasher, output),
            #[cfg(feature = "sha2")]
            TIterator::Sha256(hasher) => sha2::finalize_into(hasher, output),
            #[cfg(feature = "sha2")]
            TIterator::Sha512(hasher) => sha2::finalize_into(hasher, output),
        }
    }
}

/// The hash functions of one parameter set, bound to one key.
pub(crate) struct Hasher<'a> {
    n: usize,
    key: KeyView<'a>,
    backend: Backend,
}

impl<'a> Hasher<'a> {
    pub(crate) fn new(family: HashFamily, n: usize, key: KeyView<'a>) -> Self {
        let backend = match family {
            #[cfg(feature = "shake")]
            HashFamily::Shake256 => Backend::Shake,
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L1 => Backend::Sha2L1 {
                sha256: sha2::prehash::<Sha256, { sha2::SHA256_BLOCK_BYTES }>(key.public_seed),
            },
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L35 => Backend::Sha2L35 {
                sha256: sha2::prehash::<Sha256, { sha2::SHA256_BLOCK_BYTES }>(key.public_seed),
                sha512: sha2::prehash::<Sha512, { sha2::SHA512_BLOCK_BYTES }>(key.public_seed),
            },
        };
        Self { n, key, backend }
    }

    pub(crate) fn key(&self) -> &KeyView<'a> {
        &self.key
    }

    /// F(PK.seed, ADRS, M1) into `output[..n]`.
    ///
    /// * SHAKE: SHAKE256(PK.seed||ADRS||M1, 8n)
    /// * SHA-2: SHA2-256(BlockPad(PK.seed)||ADRSc||M1)
    pub(crate) fn f(&self, adrs: &Adrs, input: &[u8], output: &mut [u8]) {
        let n = self.n;
        let input = &input[..n];
        match &self.backend {
            #[cfg(feature = "shake")]
            Backend::Shake => {
                shake::shake256(&mut output[..n], &[self.key.public_seed, adrs.as_ref(), input])
            }
            #[cfg(feature = "sha2")]
            Backend::Sha2L1 { sha256 } | Backend::Sha2L35 { sha256, .. } => {
                let mut hasher = sha256.clone();
                sha2::absorb(&mut hasher, adrs.as_ref());
                sha2::absorb(&mut hasher, input);
                sha2::finalize_into(hasher, &mut output[..n]);
            }
        }
    }

    /// Applies [`Hasher::f`], replacing the first `n` bytes of `inout` with the result.
    pub(crate) fn f_inplace(&self, adrs: &Adrs, inout: &mut [u8]) {
        let mut input = [0_u8; MAX_N];
        input[..self.n].copy_from_slice(&inout[..self.n]);
        self.f(adrs, &input[..self.n], inout);
    }

    /// PRF(PK.seed, SK.seed, ADRS): `F` applied to the secret seed.
    /// A view of a public key has no secret seed and leaves `output` untouched.
    pub(crate) fn prf(&self, adrs: &Adrs, output: &mut [u8]) {
        if let Some(secret_seed) = self.key.secret_seed {
            self.f(adrs, secret_seed, output);
        }
    }

    /// Starts `T`/`H` under `adrs`.
    ///
    /// * SHAKE: SHAKE256(PK.seed||ADRS||...)
    /// * SHA-2 level 1: SHA2-256(BlockPad(PK.seed)||ADRSc||...)
    /// * SHA-2 levels 3 and 5: SHA2-512(BlockPad(PK.seed)||ADRSc||...)
    pub(crate) fn init_t(&self, adrs: &Adrs) -> TIterator {
        match &self.backend {
            #[cfg(feature = "shake")]
            Backend::Shake => {
                TIterator::Shake(shake::absorbing(&[self.key.public_seed, adrs.as_ref()]))
            }
            #[cfg(feature = "sha2")]
            Backend::Sha2L1 { sha256 } => {
                let mut hasher = sha256.clone();
                sha2::absorb(&mut hasher, adrs.as_ref());
                TIterator::Sha256(hasher)
            }
            #[cfg(feature = "sha2")]
            Backend::Sha2L35 { sha512, .. } => {
                let mut hasher = sha512.clone();
                sha2::absorb(&mut hasher, adrs.as_ref());
                TIterator::Sha512(hasher)
            }
        }
    }

    /// PRF_msg(SK.prf, OptRand, M) into `output[..n]`.
    pub(crate) fn prf_msg(&self, opt_rand: &[u8], message: &[u8], output: &mut [u8]) {
        let n = self.n;
        let prf_seed = self.key.prf_seed.unwrap_or_default();
        let opt_rand = &opt_rand[..n];
        match &self.backend {
            #[cfg(feature = "shake")]
            Backend::Shake => shake::shake256(&mut output[..n], &[prf_seed, opt_rand, message]),
            #[cfg(feature = "sha2")]
            Backend::Sha2L1 { .. } => sha2::hmac::<Sha256>(
                &mut output[..n],
                prf_seed,
                opt_rand,
                message,
            ),
            #[cfg(feature = "sha2")]
            Backend::Sha2L35 { .. } => sha2::hmac::<Sha512>(
                &mut output[..n],
                prf_seed,
                opt_rand,
                message,
            ),
        }
    }

    /// H_msg(R, PK.seed, PK.root, M), filling all of `output`.
    pub(crate) fn hash_msg(&self, randomness: &[u8], message: &[u8], output: &mut [u8]) {
        let randomness = &randomness[..self.n];
        let KeyView {
            public_seed, root, ..
        } = self.key;
        match &self.backend {
            #[cfg(feature = "shake")]
            Backend::Shake => shake::shake256(output, &[randomness, public_seed, root, message]),
            #[cfg(feature = "sha2")]
            Backend::Sha2L1 { .. } => {
                sha2::mgf1::<Sha256>(output, randomness, public_seed, root, message)
            }
            #[cfg(feature = "sha2")]
            Backend::Sha2L35 { .. } => {
                sha2::mgf1::<Sha512>(output, randomness, public_seed, root, message)
            }
        }
    }
}
