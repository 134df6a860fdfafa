use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

/// Returns a SHAKE256 state that has absorbed every part of `inputs`, in order.
pub(crate) fn absorbing(inputs: &[&[u8]]) -> Shake256 {
    let mut hasher = Shake256::default();
    for input in inputs {
        hasher.update(input);
    }
    hasher
}

pub(crate) fn absorb(hasher: &mut Shake256, input: &[u8]) {
    hasher.update(input);
}

/// Finalizes `hasher` and squeezes `output.len()` bytes.
pub(crate) fn squeeze(hasher: Shake256, output: &mut [u8]) {
    let mut reader = hasher.finalize_xof();
    reader.read(output);
}

/// SHAKE256(inputs[0]||inputs[1]||...), squeezing `output.len()` bytes.
pub(crate) fn shake256(output: &mut [u8], inputs: &[&[u8]]) {
    squeeze(absorbing(inputs), output);
}
