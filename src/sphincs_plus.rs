//! # Whole-signature convenience API
//!
//! [`Context`] streams a signature in pieces and never holds it in memory.
//! When the whole signature fits in memory anyway, [`SphincsPlus`] wraps key
//! generation, signing and verification into one call each, with owned key
//! types that are wiped from memory when dropped.
//!
//! ## Usage Example
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use tiny_sphincs::SphincsPlus;
//!
//! let sphincs = SphincsPlus::default();
//! let (public_key, secret_key) = sphincs.keygen(&mut OsRng).expect("key generation failed");
//!
//! let message = b"post-quantum message";
//! let signature = sphincs
//!     .sign(message, &secret_key, Some(&mut OsRng))
//!     .expect("signing failed");
//! assert_eq!(signature.len(), sphincs.parameter_set().size_signature());
//!
//! assert!(sphincs.verify(&signature, message, &public_key).is_ok());
//! assert!(sphincs.verify(&signature, b"another message", &public_key).is_err());
//! ```
//!
//! ## Security Considerations
//!
//! - [`SecretKey`] zeroizes its bytes on drop. Cloning it duplicates secret
//!   material in memory.
//! - Signing without a random source is deterministic: the same message
//!   always gets the same signature.

use core::fmt;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serialization")]
use serde_big_array::BigArray;

use crate::context::Context;
use crate::keygen::generate_key;
use crate::params::{ParameterSet, MAX_N};
use crate::{Error, Result, VerificationError};

/// `PublicKey` holds `PK.seed||PK.root` of any compiled-in parameter set in a
/// fixed-capacity buffer.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PublicKey {
    #[cfg_attr(feature = "serialization", serde(with = "BigArray"))]
    bytes: [u8; 2 * MAX_N],
    len: usize,
}

/// `SecretKey` holds `SK.seed||SK.prf||PK.seed||PK.root` in a fixed-capacity
/// buffer. It implements `ZeroizeOnDrop`, so the key is wiped from memory when
/// dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SecretKey {
    #[cfg_attr(feature = "serialization", serde(with = "BigArray"))]
    bytes: [u8; 4 * MAX_N],
    len: usize,
}

macro_rules! impl_key_bytes {
    ($key:ident, $size:ident) => {
        impl $key {
            fn zeroed(ps: &ParameterSet) -> Self {
                Self {
                    bytes: [0; $key::CAPACITY],
                    len: ps.$size(),
                }
            }
        }

        impl AsRef<[u8]> for $key {
            fn as_ref(&self) -> &[u8] {
                self.bytes.get(..self.len).unwrap_or_default()
            }
        }

        impl TryFrom<(&ParameterSet, &[u8])> for $key {
            type Error = Error;

            fn try_from((ps, data): (&ParameterSet, &[u8])) -> Result<Self> {
                if data.len() != ps.$size() {
                    return Err(Error::BadLength(ps.$size(), data.len()));
                }
                let mut key = Self::zeroed(ps);
                key.bytes[..data.len()].copy_from_slice(data);
                Ok(key)
            }
        }
    };
}

impl PublicKey {
    const CAPACITY: usize = 2 * MAX_N;
}

impl SecretKey {
    const CAPACITY: usize = 4 * MAX_N;

    /// The public key embedded in the tail of this secret key.
    pub fn public_key(&self) -> PublicKey {
        let bytes = self.as_ref();
        let half = bytes.len() / 2;
        let mut public_key = PublicKey {
            bytes: [0; PublicKey::CAPACITY],
            len: half,
        };
        public_key.bytes[..half].copy_from_slice(&bytes[half..]);
        public_key
    }
}

impl_key_bytes!(PublicKey, size_public_key);
impl_key_bytes!(SecretKey, size_private_key);

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.as_ref()).finish()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("len", &self.len).finish_non_exhaustive()
    }
}

/// `SphincsPlus` produces and checks whole signatures for one parameter set.
#[derive(Clone, Copy, Debug)]
pub struct SphincsPlus {
    ps: &'static ParameterSet,
}

impl Default for SphincsPlus {
    /// SHAKE-128f when SHAKE is enabled, SHA2-128f otherwise.
    fn default() -> Self {
        #[cfg(feature = "shake")]
        let ps = &crate::params::SHAKE_128F_SIMPLE;
        #[cfg(not(feature = "shake"))]
        let ps = &crate::params::SHA2_128F_SIMPLE;
        Self::new(ps)
    }
}

impl SphincsPlus {
    pub fn new(ps: &'static ParameterSet) -> Self {
        Self { ps }
    }

    /// Looks up the parameter set by name, e.g. `"sha2_128s_simple"`.
    pub fn by_name(name: &str) -> Result<Self> {
        ParameterSet::by_name(name).map(Self::new)
    }

    pub fn parameter_set(&self) -> &'static ParameterSet {
        self.ps
    }

    /// Generates a (public key, secret key) pair with seeds drawn from `rng`.
    pub fn keygen(&self, rng: &mut dyn RngCore) -> Result<(PublicKey, SecretKey)> {
        let mut sk = SecretKey::zeroed(self.ps);
        let mut pk = PublicKey::zeroed(self.ps);
        generate_key(
            &mut sk.bytes[..self.ps.size_private_key()],
            Some(&mut pk.bytes[..self.ps.size_public_key()]),
            self.ps,
            rng,
        )?;
        Ok((pk, sk))
    }

    /// Signs `message` and returns the whole signature. With `rng` set to
    /// `None` the signature is deterministic.
    ///
    /// Returns [`Error::SigningFailed`] if the signing context stops before
    /// the end of the signature.
    pub fn sign(
        &self,
        message: &[u8],
        sk: &SecretKey,
        rng: Option<&mut dyn RngCore>,
    ) -> Result<Vec<u8>> {
        let mut ctx = Context::init_sign(message, self.ps, sk.as_ref(), rng)?;
        collect_signature(&mut ctx, self.ps.size_signature())
    }

    /// Verifies `signature` of `message` under `pk`.
    ///
    /// Returns [`VerificationError::Rejected`] for an invalid signature and
    /// [`VerificationError::Incomplete`] when `signature` is a valid prefix
    /// that ends early.
    pub fn verify(&self, signature: &[u8], message: &[u8], pk: &PublicKey) -> Result<()> {
        let mut ctx = Context::init_verify(message, self.ps, pk.as_ref())?;
        if !ctx.update_verify(signature) {
            return Err(VerificationError::Rejected.into());
        }
        if !ctx.verify() {
            return Err(VerificationError::Incomplete.into());
        }
        Ok(())
    }
}

/// Drains `ctx` into a signature of exactly `len` bytes.
fn collect_signature(ctx: &mut Context<'_>, len: usize) -> Result<Vec<u8>> {
    let mut signature = vec![0_u8; len];
    let written = ctx.sign(&mut signature);
    if written != len {
        return Err(Error::SigningFailed(written, len));
    }
    Ok(signature)
}
