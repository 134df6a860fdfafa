//! A direct, allocating transcription of SPHINCS+ "simple" as in FIPS 205.
//!
//! Trees are recomputed recursively and every intermediate value is a `Vec`.
//! It is slow and shares no code with the streaming implementation, which is
//! what makes it useful as a known-answer source for the fast parameter sets.

#[cfg(feature = "sha2")]
use sha2::{Digest, Sha256, Sha512};
#[cfg(feature = "shake")]
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake256,
};

use crate::hash::HashFamily;
use crate::params::ParameterSet;

const WOTS_HASH: u32 = 0;
const WOTS_PK: u32 = 1;
const TREE: u32 = 2;
const FORS_TREE: u32 = 3;
const FORS_ROOTS: u32 = 4;
const WOTS_PRF: u32 = 5;
const FORS_PRF: u32 = 6;

#[derive(Clone, Copy, Default)]
struct Address {
    layer: u32,
    tree: u64,
    kind: u32,
    keypair: u32,
    /// Chain address for WOTS+, tree height otherwise.
    height: u32,
    /// Hash address for WOTS+, tree index otherwise.
    index: u32,
}

impl Address {
    /// Same layer and tree, new type, everything else cleared.
    fn with_kind(&self, kind: u32) -> Self {
        Address {
            layer: self.layer,
            tree: self.tree,
            kind,
            ..Address::default()
        }
    }

    fn encode(&self, compressed: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(32);
        if compressed {
            out.push(self.layer as u8);
            out.extend_from_slice(&self.tree.to_be_bytes());
            out.push(self.kind as u8);
        } else {
            out.extend_from_slice(&self.layer.to_be_bytes());
            out.extend_from_slice(&[0; 4]);
            out.extend_from_slice(&self.tree.to_be_bytes());
            out.extend_from_slice(&self.kind.to_be_bytes());
        }
        out.extend_from_slice(&self.keypair.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.index.to_be_bytes());
        out
    }
}

#[cfg(feature = "shake")]
fn shake(inputs: &[&[u8]], len: usize) -> Vec<u8> {
    let mut hasher = Shake256::default();
    for input in inputs {
        Update::update(&mut hasher, input);
    }
    let mut out = vec![0; len];
    hasher.finalize_xof().read(&mut out);
    out
}

#[cfg(feature = "sha2")]
fn hmac<D: Digest>(block: usize, key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut key = key.to_vec();
    key.resize(block, 0);
    let inner: Vec<u8> = key
        .iter()
        .map(|b| b ^ 0x36)
        .chain(message.iter().copied())
        .collect();
    let inner = D::digest(&inner);
    let outer: Vec<u8> = key
        .iter()
        .map(|b| b ^ 0x5c)
        .chain(inner.iter().copied())
        .collect();
    D::digest(&outer).to_vec()
}

#[cfg(feature = "sha2")]
fn mgf1<D: Digest>(seed: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut counter = 0_u32;
    while out.len() < len {
        let block = [seed, &counter.to_be_bytes()[..]].concat();
        out.extend_from_slice(&D::digest(&block));
        counter += 1;
    }
    out.truncate(len);
    out
}

/// Interprets `bytes` as a big-endian bit string and cuts `count` integers of
/// `bits` bits from its front.
fn base_2b(bytes: &[u8], bits: usize, count: usize) -> Vec<u32> {
    let mut out = Vec::with_capacity(count);
    let mut total = 0_u64;
    let mut available = 0;
    let mut next = bytes.iter();
    for _ in 0..count {
        while available < bits {
            total = (total << 8) | u64::from(*next.next().unwrap());
            available += 8;
        }
        available -= bits;
        out.push(((total >> available) & ((1 << bits) - 1)) as u32);
        total &= (1 << available) - 1;
    }
    out
}

fn to_int(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b))
}

/// SPHINCS+ for one parameter set and one set of seeds.
pub(crate) struct Reference<'a> {
    ps: &'a ParameterSet,
    sk_seed: Vec<u8>,
    sk_prf: Vec<u8>,
    pk_seed: Vec<u8>,
}

impl<'a> Reference<'a> {
    /// Takes `SK.seed||SK.prf||PK.seed` (or a whole private key).
    pub(crate) fn new(ps: &'a ParameterSet, seeds: &[u8]) -> Self {
        let n = ps.n;
        Self {
            ps,
            sk_seed: seeds[..n].to_vec(),
            sk_prf: seeds[n..2 * n].to_vec(),
            pk_seed: seeds[2 * n..3 * n].to_vec(),
        }
    }

    fn tweak(&self, adrs: &Address, input: &[u8], wide: bool) -> Vec<u8> {
        let n = self.ps.n;
        match self.ps.family {
            #[cfg(feature = "shake")]
            HashFamily::Shake256 => shake(&[&self.pk_seed[..], &adrs.encode(false)[..], input], n),
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L35 if wide => {
                let mut data = self.pk_seed.clone();
                data.resize(128, 0);
                data.extend(adrs.encode(true));
                data.extend_from_slice(input);
                Sha512::digest(&data)[..n].to_vec()
            }
            #[cfg(feature = "sha2")]
            _ => {
                let mut data = self.pk_seed.clone();
                data.resize(64, 0);
                data.extend(adrs.encode(true));
                data.extend_from_slice(input);
                Sha256::digest(&data)[..n].to_vec()
            }
        }
    }

    fn f(&self, adrs: &Address, input: &[u8]) -> Vec<u8> {
        self.tweak(adrs, input, false)
    }

    fn t(&self, adrs: &Address, input: &[u8]) -> Vec<u8> {
        self.tweak(adrs, input, true)
    }

    fn prf(&self, adrs: &Address) -> Vec<u8> {
        self.tweak(adrs, &self.sk_seed, false)
    }

    fn prf_msg(&self, opt_rand: &[u8], message: &[u8]) -> Vec<u8> {
        let n = self.ps.n;
        match self.ps.family {
            #[cfg(feature = "shake")]
            HashFamily::Shake256 => shake(&[&self.sk_prf[..], opt_rand, message], n),
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L1 => {
                hmac::<Sha256>(64, &self.sk_prf, &[opt_rand, message].concat())[..n].to_vec()
            }
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L35 => {
                hmac::<Sha512>(128, &self.sk_prf, &[opt_rand, message].concat())[..n].to_vec()
            }
        }
    }

    fn h_msg(&self, r: &[u8], root: &[u8], message: &[u8], len: usize) -> Vec<u8> {
        match self.ps.family {
            #[cfg(feature = "shake")]
            HashFamily::Shake256 => shake(&[r, &self.pk_seed[..], root, message], len),
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L1 => {
                let inner = Sha256::digest(&[r, &self.pk_seed[..], root, message].concat());
                mgf1::<Sha256>(&[r, &self.pk_seed[..], &inner[..]].concat(), len)
            }
            #[cfg(feature = "sha2")]
            HashFamily::Sha2L35 => {
                let inner = Sha512::digest(&[r, &self.pk_seed[..], root, message].concat());
                mgf1::<Sha512>(&[r, &self.pk_seed[..], &inner[..]].concat(), len)
            }
        }
    }

    fn chain(&self, mut x: Vec<u8>, start: u32, steps: u32, adrs: &mut Address) -> Vec<u8> {
        for j in start..start + steps {
            adrs.index = j;
            x = self.f(adrs, &x);
        }
        x
    }

    fn wots_len(&self) -> u32 {
        2 * self.ps.n as u32 + 3
    }

    fn wots_chain_start(&self, adrs: &Address, chain: u32) -> Vec<u8> {
        let mut sk_adrs = adrs.with_kind(WOTS_PRF);
        sk_adrs.keypair = adrs.keypair;
        sk_adrs.height = chain;
        self.prf(&sk_adrs)
    }

    fn wots_pk(&self, adrs: &Address) -> Vec<u8> {
        let mut tops = Vec::new();
        for chain in 0..self.wots_len() {
            let mut chain_adrs = *adrs;
            chain_adrs.height = chain;
            let start = self.wots_chain_start(adrs, chain);
            tops.extend(self.chain(start, 0, 15, &mut chain_adrs));
        }
        let mut pk_adrs = adrs.with_kind(WOTS_PK);
        pk_adrs.keypair = adrs.keypair;
        self.t(&pk_adrs, &tops)
    }

    fn wots_sign(&self, message: &[u8], adrs: &Address) -> Vec<u8> {
        let mut digits = base_2b(message, 4, 2 * self.ps.n);
        let checksum: u32 = digits.iter().map(|d| 15 - d).sum();
        // toByte(csum << 4, 2), cut into three 4-bit digits.
        let checksum = ((checksum << 4) as u16).to_be_bytes();
        digits.extend(base_2b(&checksum, 4, 3));

        let mut sig = Vec::new();
        for (chain, &digit) in digits.iter().enumerate() {
            let mut chain_adrs = *adrs;
            chain_adrs.height = chain as u32;
            let start = self.wots_chain_start(adrs, chain as u32);
            sig.extend(self.chain(start, 0, digit, &mut chain_adrs));
        }
        sig
    }

    fn xmss_node(&self, i: u32, z: u32, adrs: &Address) -> Vec<u8> {
        if z == 0 {
            let mut leaf_adrs = adrs.with_kind(WOTS_HASH);
            leaf_adrs.keypair = i;
            return self.wots_pk(&leaf_adrs);
        }
        let mut children = self.xmss_node(2 * i, z - 1, adrs);
        children.extend(self.xmss_node(2 * i + 1, z - 1, adrs));
        let mut node_adrs = adrs.with_kind(TREE);
        node_adrs.height = z;
        node_adrs.index = i;
        self.t(&node_adrs, &children)
    }

    fn xmss_sign(&self, message: &[u8], leaf: u32, adrs: &Address) -> Vec<u8> {
        let mut wots_adrs = adrs.with_kind(WOTS_HASH);
        wots_adrs.keypair = leaf;
        let mut sig = self.wots_sign(message, &wots_adrs);
        for j in 0..self.ps.merkle_h as u32 {
            sig.extend(self.xmss_node((leaf >> j) ^ 1, j, adrs));
        }
        sig
    }

    fn ht_sign(&self, message: &[u8], mut tree: u64, mut leaf: u32) -> Vec<u8> {
        let height = self.ps.merkle_h as u32;
        let mut sig = Vec::new();
        let mut root = message.to_vec();
        for layer in 0..self.ps.d as u32 {
            let adrs = Address {
                layer,
                tree,
                ..Address::default()
            };
            sig.extend(self.xmss_sign(&root, leaf, &adrs));
            root = self.xmss_node(0, height, &adrs);
            leaf = (tree & ((1 << height) - 1)) as u32;
            tree >>= height;
        }
        sig
    }

    fn fors_sk(&self, adrs: &Address, index: u32) -> Vec<u8> {
        let mut sk_adrs = adrs.with_kind(FORS_PRF);
        sk_adrs.keypair = adrs.keypair;
        sk_adrs.index = index;
        self.prf(&sk_adrs)
    }

    fn fors_node(&self, i: u32, z: u32, adrs: &Address) -> Vec<u8> {
        let mut node_adrs = *adrs;
        node_adrs.height = z;
        node_adrs.index = i;
        if z == 0 {
            let sk = self.fors_sk(adrs, i);
            return self.f(&node_adrs, &sk);
        }
        let mut children = self.fors_node(2 * i, z - 1, adrs);
        children.extend(self.fors_node(2 * i + 1, z - 1, adrs));
        self.t(&node_adrs, &children)
    }

    /// Returns the FORS signature and the FORS public key.
    fn fors_sign(&self, indices: &[u32], adrs: &Address) -> (Vec<u8>, Vec<u8>) {
        let a = self.ps.t as u32;
        let mut sig = Vec::new();
        let mut roots = Vec::new();
        for (tree, &index) in indices.iter().enumerate() {
            let tree = tree as u32;
            sig.extend(self.fors_sk(adrs, (tree << a) + index));
            for j in 0..a {
                let sibling = (index >> j) ^ 1;
                sig.extend(self.fors_node((tree << (a - j)) + sibling, j, adrs));
            }
            roots.extend(self.fors_node(tree, a, adrs));
        }
        let mut pk_adrs = adrs.with_kind(FORS_ROOTS);
        pk_adrs.keypair = adrs.keypair;
        (sig, self.t(&pk_adrs, &roots))
    }

    /// The hypertree root, `PK.root`.
    pub(crate) fn root(&self) -> Vec<u8> {
        let top = Address {
            layer: self.ps.d as u32 - 1,
            ..Address::default()
        };
        self.xmss_node(0, self.ps.merkle_h as u32, &top)
    }

    /// `PK.seed||PK.root`.
    pub(crate) fn public_key(&self) -> Vec<u8> {
        [self.pk_seed.clone(), self.root()].concat()
    }

    /// The whole signature of `message` with the given `opt_rand`.
    pub(crate) fn sign(&self, opt_rand: &[u8], message: &[u8]) -> Vec<u8> {
        let ps = self.ps;
        let root = self.root();
        let r = self.prf_msg(opt_rand, message);

        let fors_bytes = (ps.k * ps.t + 7) / 8;
        let tree_bits = ps.h - ps.merkle_h;
        let tree_bytes = (tree_bits + 7) / 8;
        let leaf_bytes = (ps.merkle_h + 7) / 8;
        let digest = self.h_msg(&r, &root, message, fors_bytes + tree_bytes + leaf_bytes);

        let indices = base_2b(&digest[..fors_bytes], ps.t, ps.k);
        let tree = to_int(&digest[fors_bytes..fors_bytes + tree_bytes]) & (u64::MAX >> (64 - tree_bits));
        let leaf = to_int(&digest[fors_bytes + tree_bytes..]) as u32 & ((1 << ps.merkle_h) - 1);

        let fors_adrs = Address {
            tree,
            kind: FORS_TREE,
            keypair: leaf,
            ..Address::default()
        };
        let (fors_sig, fors_pk) = self.fors_sign(&indices, &fors_adrs);
        [r, fors_sig, self.ht_sign(&fors_pk, tree, leaf)].concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::generate_key;
    use crate::testing::{CountingRng, FixedRng};
    use crate::Context;

    /// Checks a fixed-seed key and a fixed-randomness signature of "abc",
    /// produced in 42-byte pieces and verified piece by piece.
    fn known_answer(ps: &ParameterSet) {
        let n = ps.n;
        let mut private_key = vec![0_u8; ps.size_private_key()];
        let mut public_key = vec![0_u8; ps.size_public_key()];
        generate_key(&mut private_key, Some(&mut public_key), ps, &mut CountingRng::new(0)).unwrap();

        let seeds: Vec<u8> = (0..3 * n as u8).collect();
        let reference = Reference::new(ps, &seeds);
        assert_eq!(public_key, reference.public_key(), "{}", ps.name);

        let opt_rand: Vec<u8> = (0..n as u8).map(|i| i.wrapping_mul(37) ^ 0xa5).collect();
        let expected = reference.sign(&opt_rand, b"abc");
        assert_eq!(expected.len(), ps.size_signature());

        let mut signer =
            Context::init_sign(b"abc", ps, &private_key, Some(&mut FixedRng(&opt_rand))).unwrap();
        let mut verifier = Context::init_verify(b"abc", ps, &public_key).unwrap();
        let mut signature = Vec::new();
        let mut piece = [0_u8; 42];
        loop {
            let len = signer.sign(&mut piece);
            if len == 0 {
                break;
            }
            assert!(verifier.update_verify(&piece[..len]), "{}", ps.name);
            signature.extend_from_slice(&piece[..len]);
        }
        assert!(signature == expected, "{}: signature differs", ps.name);
        assert!(verifier.verify(), "{}", ps.name);

        // Without a random source, the public seed stands in for opt_rand.
        let expected = reference.sign(&public_key[..n], b"abc");
        let mut signer = Context::init_sign(b"abc", ps, &private_key, None).unwrap();
        let mut signature = vec![0_u8; ps.size_signature()];
        assert_eq!(signer.sign(&mut signature), ps.size_signature());
        assert!(signature == expected, "{}: deterministic signature differs", ps.name);
    }

    #[test]
    fn test_base_2b() {
        assert_eq!(base_2b(&[0b1010_0101, 0b1100_0011], 4, 4), vec![10, 5, 12, 3]);
        assert_eq!(base_2b(&[0b1010_0101, 0b1100_0011], 6, 2), vec![0b10_1001, 0b01_1100]);
    }

    #[cfg(feature = "sha2")]
    #[test]
    fn test_known_answer_sha2_128f() {
        known_answer(&crate::params::SHA2_128F_SIMPLE);
    }

    #[cfg(all(feature = "sha2", feature = "level3"))]
    #[test]
    fn test_known_answer_sha2_192f() {
        known_answer(&crate::params::SHA2_192F_SIMPLE);
    }

    #[cfg(feature = "shake")]
    #[test]
    fn test_known_answer_shake_128f() {
        known_answer(&crate::params::SHAKE_128F_SIMPLE);
    }
}
