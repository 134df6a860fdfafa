//! # Tiny SPHINCS+
//!
//! SPHINCS+ "simple" signatures (FIPS 205) generated and verified
//! incrementally. A [`Context`] produces a signature `n` bytes at a time, or
//! consumes one in chunks of any size, without allocating and without ever
//! holding the signature or a whole tree in memory.
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use tiny_sphincs::{generate_key, Context, SHAKE_128F_SIMPLE};
//!
//! let ps = &SHAKE_128F_SIMPLE;
//! let mut private_key = [0_u8; 64];
//! let mut public_key = [0_u8; 32];
//! generate_key(&mut private_key, Some(&mut public_key), ps, &mut OsRng).unwrap();
//!
//! let mut signer = Context::init_sign(b"abc", ps, &private_key, Some(&mut OsRng)).unwrap();
//! let mut verifier = Context::init_verify(b"abc", ps, &public_key).unwrap();
//! let mut piece = [0_u8; 100];
//! loop {
//!     let len = signer.sign(&mut piece);
//!     if len == 0 {
//!         break;
//!     }
//!     assert!(verifier.update_verify(&piece[..len]));
//! }
//! assert!(verifier.verify());
//! ```

mod adrs;
mod context;
mod digest;
mod error;
mod fors;
mod hash;
mod keygen;
mod merkle;
mod sign;
mod utils;
mod verify;
mod wots_plus;


pub mod params;
pub mod sphincs_plus;

pub use crate::context::{Context, State};
pub use crate::error::{Error, Result, VerificationError};
pub use crate::hash::HashFamily;
pub use crate::keygen::generate_key;
pub use crate::params::{ParameterSet, PARAMETER_SETS};
pub use crate::sphincs_plus::{PublicKey, SecretKey, SphincsPlus};

#[cfg(feature = "sha2")]
pub use crate::params::SHA2_128F_SIMPLE;
#[cfg(all(feature = "sha2", feature = "small"))]
pub use crate::params::SHA2_128S_SIMPLE;
#[cfg(all(feature = "sha2", feature = "level3"))]
pub use crate::params::SHA2_192F_SIMPLE;
#[cfg(all(feature = "sha2", feature = "level3", feature = "small"))]
pub use crate::params::SHA2_192S_SIMPLE;
#[cfg(all(feature = "sha2", feature = "level5"))]
pub use crate::params::SHA2_256F_SIMPLE;
#[cfg(all(feature = "sha2", feature = "level5", feature = "small"))]
pub use crate::params::SHA2_256S_SIMPLE;
#[cfg(feature = "shake")]
pub use crate::params::SHAKE_128F_SIMPLE;
#[cfg(all(feature = "shake", feature = "small"))]
pub use crate::params::SHAKE_128S_SIMPLE;
#[cfg(all(feature = "shake", feature = "level3"))]
pub use crate::params::SHAKE_192F_SIMPLE;
#[cfg(all(feature = "shake", feature = "level3", feature = "small"))]
pub use crate::params::SHAKE_192S_SIMPLE;
#[cfg(all(feature = "shake", feature = "level5"))]
pub use crate::params::SHAKE_256F_SIMPLE;
#[cfg(all(feature = "shake", feature = "level5", feature = "small"))]
pub use crate::params::SHAKE_256S_SIMPLE;
