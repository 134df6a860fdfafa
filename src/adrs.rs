use crate::hash::HashFamily;
use crate::utils::{set_byte_at, set_uint_at};

/// Offsets of the fields of the compressed 22-byte address used by the SHA-2 family.
pub(crate) mod sha2_offsets {
    /// SHA-2 address byte size.
    pub const ADDR_BYTES: usize = 22;
    /// The byte used to specify the Merkle tree layer.
    pub const OFFSET_LAYER: usize = 0;
    /// The start of the 8 byte field used to specify the tree.
    pub const OFFSET_TREE: usize = 1;
    /// The byte used to specify the hash type (reason).
    pub const OFFSET_TYPE: usize = 9;
    /// The start of the 4 byte key pair field (which one-time signature).
    pub const OFFSET_KEYPAIR: usize = 10;
    /// The start of the 4 byte chain address or tree height field.
    pub const OFFSET_TREE_HGT: usize = 14;
    /// The start of the 4 byte hash address or tree index field.
    pub const OFFSET_TREE_INDEX: usize = 18;
}

/// Offsets of the fields of the full 32-byte address used by the SHAKE family.
pub(crate) mod shake_offsets {
    pub const ADDR_BYTES: usize = 32;
    pub const OFFSET_LAYER: usize = 0;
    pub const OFFSET_TREE: usize = 4;
    pub const OFFSET_TYPE: usize = 16;
    pub const OFFSET_KEYPAIR: usize = 20;
    pub const OFFSET_TREE_HGT: usize = 24;
    pub const OFFSET_TREE_INDEX: usize = 28;
}

/// Width of the address buffer: the full layout if SHAKE is compiled in, else the compressed one.
pub(crate) const ADR_MAX: usize = if cfg!(feature = "shake") {
    shake_offsets::ADDR_BYTES
} else {
    sha2_offsets::ADDR_BYTES
};

/// All 7 types of ADRS defined for SPHINCS+.
/// The corresponding value is set as the `type` in an ADRS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum AdrsType {
    /// 0, used for hashing through a chain.
    WotsHash,
    /// 1, used for compression of the WOTS+ public key.
    WotsPk,
    /// 2, used for the nodes of a hypertree Merkle tree.
    Tree,
    /// 3, used for FORS leaves and the nodes of a FORS tree.
    ForsTree,
    /// 4, used for compression of the FORS roots.
    ForsRoots,
    /// 5, used for generating the start of each WOTS+ chain.
    WotsPrf,
    /// 6, used for generating FORS secret values.
    ForsPrf,
}

/// Where the engine currently is inside the hypertree.
///
/// The address shapes below read these fields; every shape writes all six
/// address fields so that nothing leaks from a previous hash.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Position {
    /// Layer of the hypertree, 0 is the bottom.
    pub hypertree_level: u32,
    /// Index of the Merkle tree within its layer.
    pub tree_address: u64,
    /// Which FORS tree is being processed; 0 outside of FORS.
    pub fors_tree: u32,
    /// FORS keypair (bottom layer leaf) while in FORS; 0 in the hypertree.
    pub fors_keypair_addr: u32,
    /// The leaf whose authentication path is being produced.
    pub auth_path_node: u32,
    /// Height of the next authentication path node.
    pub merkle_level: u32,
}

/// A SPHINCS+ address in either the compressed SHA-2 layout or the full layout.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Adrs {
    bytes: [u8; ADR_MAX],
    compressed: bool,
}

impl AsRef<[u8]> for Adrs {
    fn as_ref(&self) -> &[u8] {
        if self.compressed {
            &self.bytes[..sha2_offsets::ADDR_BYTES]
        } else {
            &self.bytes
        }
    }
}

impl Adrs {
    pub(crate) fn new(family: HashFamily) -> Self {
        Self {
            bytes: [0; ADR_MAX],
            compressed: family.compressed_adrs(),
        }
    }

    /// Specify which level of Merkle tree (the "layer") we're working on.
    fn set_layer_addr(&mut self, layer: u32) {
        if self.compressed {
            set_byte_at(&mut self.bytes, layer as u8, sha2_offsets::OFFSET_LAYER);
        } else {
            set_uint_at(&mut self.bytes, layer.into(), shake_offsets::OFFSET_LAYER, 4);
        }
    }

    /// Specify which Merkle tree within the level (the "tree address") we're working on.
    fn set_tree_addr(&mut self, tree: u64) {
        if self.compressed {
            set_uint_at(&mut self.bytes, tree, sha2_offsets::OFFSET_TREE, 8);
        } else {
            set_uint_at(&mut self.bytes, tree, shake_offsets::OFFSET_TREE, 12);
        }
    }

    /// Specify the reason we'll use this address structure for, that is, what
    /// hash will we compute with it.
    fn set_type(&mut self, adrs_type: AdrsType) {
        if self.compressed {
            set_byte_at(&mut self.bytes, adrs_type as u8, sha2_offsets::OFFSET_TYPE);
        } else {
            set_uint_at(&mut self.bytes, adrs_type as u64, shake_offsets::OFFSET_TYPE, 4);
        }
    }

    /// Specify which Merkle leaf we're working on; that is, which OTS keypair
    /// we're talking about.
    fn set_keypair_addr(&mut self, keypair: u32) {
        let offset = if self.compressed {
            sha2_offsets::OFFSET_KEYPAIR
        } else {
            shake_offsets::OFFSET_KEYPAIR
        };
        set_uint_at(&mut self.bytes, keypair.into(), offset, 4);
    }

    /// Specify the height of the node in the Merkle/FORS tree, or the chain
    /// within a WOTS+ key; both share the same field.
    fn set_tree_height(&mut self, tree_height: u32) {
        let offset = if self.compressed {
            sha2_offsets::OFFSET_TREE_HGT
        } else {
            shake_offsets::OFFSET_TREE_HGT
        };
        set_uint_at(&mut self.bytes, tree_height.into(), offset, 4);
    }

    /// Specify the distance from the left edge of the node in the Merkle/FORS
    /// tree, or the position within a WOTS+ chain; both share the same field.
    fn set_tree_index(&mut self, tree_index: u32) {
        let offset = if self.compressed {
            sha2_offsets::OFFSET_TREE_INDEX
        } else {
            shake_offsets::OFFSET_TREE_INDEX
        };
        set_uint_at(&mut self.bytes, tree_index.into(), offset, 4);
    }

    fn set_all(
        &mut self,
        layer: u32,
        tree: u64,
        adrs_type: AdrsType,
        keypair: u32,
        height: u32,
        index: u32,
    ) {
        self.set_layer_addr(layer);
        self.set_tree_addr(tree);
        self.set_type(adrs_type);
        self.set_keypair_addr(keypair);
        self.set_tree_height(height);
        self.set_tree_index(index);
    }

    /// Address of the FORS secret value `leaf` of the current FORS tree.
    pub(crate) fn set_fors_prf(&mut self, pos: &Position, t: usize, leaf: u32) {
        self.set_all(
            0,
            pos.tree_address,
            AdrsType::ForsPrf,
            pos.fors_keypair_addr,
            0,
            (pos.fors_tree << t) + leaf,
        );
    }

    /// Address of the FORS leaf `leaf`; identical to [`Adrs::set_fors_prf`] but for the type.
    pub(crate) fn set_fors_leaf(&mut self, pos: &Position, t: usize, leaf: u32) {
        self.set_all(
            0,
            pos.tree_address,
            AdrsType::ForsTree,
            pos.fors_keypair_addr,
            0,
            (pos.fors_tree << t) + leaf,
        );
    }

    /// Address under which the `k` FORS roots are compressed.
    pub(crate) fn set_fors_root(&mut self, pos: &Position) {
        self.set_all(
            0,
            pos.tree_address,
            AdrsType::ForsRoots,
            pos.fors_keypair_addr,
            0,
            0,
        );
    }

    /// Address of the start of chain `digit` of WOTS+ key `leaf`.
    pub(crate) fn set_wots_prf(&mut self, pos: &Position, leaf: u32, digit: u32) {
        self.set_all(
            pos.hypertree_level,
            pos.tree_address,
            AdrsType::WotsPrf,
            leaf,
            digit,
            0,
        );
    }

    /// Address of step `step` of chain `digit` of WOTS+ key `leaf`.
    pub(crate) fn set_wots_f(&mut self, pos: &Position, leaf: u32, digit: u32, step: u32) {
        self.set_all(
            pos.hypertree_level,
            pos.tree_address,
            AdrsType::WotsHash,
            leaf,
            digit,
            step,
        );
    }

    /// Address under which the chain tops of WOTS+ key `leaf` are compressed.
    pub(crate) fn set_wots_header(&mut self, pos: &Position, leaf: u32) {
        self.set_all(
            pos.hypertree_level,
            pos.tree_address,
            AdrsType::WotsPk,
            leaf,
            0,
            0,
        );
    }

    /// Address of the parent at height `level + 1` of the node `node` at height `level`.
    pub(crate) fn set_merkle(
        &mut self,
        pos: &Position,
        t: usize,
        node: u32,
        level: u32,
        node_type: AdrsType,
    ) {
        self.set_all(
            pos.hypertree_level,
            pos.tree_address,
            node_type,
            pos.fors_keypair_addr,
            level + 1,
            ((pos.fors_tree << t) + node) >> (level + 1),
        );
    }
}
