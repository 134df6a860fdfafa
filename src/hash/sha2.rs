use ::hmac::digest::core_api::BlockSizeUser;
use ::hmac::digest::{Key, KeyInit};
use ::hmac::{Mac, SimpleHmac};
use sha2::Digest;

/// SHA2-256 block byte size.
pub(crate) const SHA256_BLOCK_BYTES: usize = 64;

/// SHA2-512 block byte size.
pub(crate) const SHA512_BLOCK_BYTES: usize = 128;

/// Returns a hasher that has absorbed `BlockPad(pub_seed)`, i.e. `pub_seed`
/// followed by zeros up to a full `BLOCK`-byte block. Every tweakable hash of
/// the SHA-2 family starts from a clone of this state.
pub(crate) fn prehash<D: Digest, const BLOCK: usize>(pub_seed: &[u8]) -> D {
    let mut block = [0_u8; BLOCK];
    block[..pub_seed.len()].copy_from_slice(pub_seed);
    let mut hasher = D::new();
    hasher.update(&block[..]);
    hasher
}

pub(crate) fn absorb<D: Digest>(hasher: &mut D, input: &[u8]) {
    hasher.update(input);
}

/// Finalizes `hasher` and writes the first `output.len()` bytes of the digest.
pub(crate) fn finalize_into<D: Digest>(hasher: D, output: &mut [u8]) {
    let digest = hasher.finalize();
    let len = output.len();
    output.copy_from_slice(&digest[..len]);
}

/// PRF_msg(SK.prf, OptRand, M) = HMAC(SK.prf, OptRand||M), truncated to `output.len()`.
pub(crate) fn hmac<D: Digest + BlockSizeUser>(
    output: &mut [u8],
    sk_prf: &[u8],
    opt_rand: &[u8],
    message: &[u8],
) {
    // A key shorter than the block is zero padded by HMAC itself.
    let mut key = Key::<SimpleHmac<D>>::default();
    key[..sk_prf.len()].copy_from_slice(sk_prf);
    let mut mac = <SimpleHmac<D> as KeyInit>::new(&key);
    Mac::update(&mut mac, opt_rand);
    Mac::update(&mut mac, message);
    let tag = mac.finalize().into_bytes();

    let len = output.len();
    output.copy_from_slice(&tag[..len]);
}

/// H_msg(R, PK.seed, PK.root, M) = MGF1(R||PK.seed||H(R||PK.seed||PK.root||M)),
/// filling all of `output`.
pub(crate) fn mgf1<D: Digest>(
    output: &mut [u8],
    randomness: &[u8],
    pub_seed: &[u8],
    root: &[u8],
    message: &[u8],
) {
    let seed = D::new()
        .chain_update(randomness)
        .chain_update(pub_seed)
        .chain_update(root)
        .chain_update(message)
        .finalize();

    for (counter, chunk) in output.chunks_mut(<D as Digest>::output_size()).enumerate() {
        let block = D::new()
            .chain_update(randomness)
            .chain_update(pub_seed)
            .chain_update(seed.as_slice())
            .chain_update((counter as u32).to_be_bytes())
            .finalize();
        let len = chunk.len();
        chunk.copy_from_slice(&block[..len]);
    }
}
