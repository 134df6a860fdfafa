use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid length: expected {0} bytes, found {1} bytes")]
    BadLength(usize, usize),
    #[error("The randomness source failed to produce {0} bytes")]
    RandomnessFailure(usize),
    #[error("Signing stopped after {0} of {1} signature bytes")]
    SigningFailed(usize, usize),
    #[error("Unknown parameter set '{0}'")]
    UnknownParameterSet(String),
    #[error("Signature verification failed: {0}")]
    VerificationFailed(#[from] VerificationError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VerificationError {
    /// The signature was rejected: the hypertree root did not match, or it carried extra bytes.
    #[error("signature rejected")]
    Rejected,
    /// Every byte was consumed but the signature ended before the hypertree root.
    #[error("signature is incomplete")]
    Incomplete,
}

pub type Result<T> = std::result::Result<T, Error>;
