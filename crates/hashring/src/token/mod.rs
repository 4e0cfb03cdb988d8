//! Token positions on the circular hash space.
//!
//! The hash space is the full `u32` range, wrapping from `u32::MAX` back to
//! zero. Both keys and virtual points are placed on it with MD5:
//!
//! - a key's token is the first four digest bytes read little-endian;
//! - a node owns [`DIGESTS_PER_WEIGHT`] digests per unit of weight, hashed
//!   from `"{node}-{index}"`, and each digest yields [`POINTS_PER_DIGEST`]
//!   tokens from consecutive little-endian words.
//!
//! These are constants, not configuration: processes that build a ring from
//! the same node weights must produce bit-identical point tables.

use std::fmt;

use md5::{Digest, Md5};

use crate::node::Weight;

/// MD5 digests computed per unit of node weight.
pub const DIGESTS_PER_WEIGHT: usize = 40;

/// Tokens taken from each digest.
pub const POINTS_PER_DIGEST: usize = 2;

/// Number of virtual points a node of the given weight owns.
#[inline]
pub fn points_for_weight(weight: Weight) -> usize {
    (weight as usize)
        .saturating_mul(DIGESTS_PER_WEIGHT)
        .saturating_mul(POINTS_PER_DIGEST)
}

/// A position on the ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Token(pub u32);

impl Token {
    pub const MIN: Token = Token(u32::MIN);
    pub const MAX: Token = Token(u32::MAX);

    /// Token of a lookup key.
    pub fn from_key(key: &str) -> Self {
        let digest = Md5::digest(key.as_bytes());
        Token(u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]))
    }

    /// Tokens derived from one digest of a node's point set.
    ///
    /// `digest_index` ranges over `0..weight * DIGESTS_PER_WEIGHT`.
    pub fn from_node_digest(node: &str, digest_index: usize) -> [Token; POINTS_PER_DIGEST] {
        let mut hasher = Md5::new();
        hasher.update(node.as_bytes());
        hasher.update(b"-");
        hasher.update(digest_index.to_string().as_bytes());
        let digest = hasher.finalize();

        let mut tokens = [Token::MIN; POINTS_PER_DIGEST];
        for (word, token) in tokens.iter_mut().enumerate() {
            let off = word * 4;
            *token = Token(u32::from_le_bytes([
                digest[off],
                digest[off + 1],
                digest[off + 2],
                digest[off + 3],
            ]));
        }
        tokens
    }

    /// Clockwise distance from `self` to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u32 {
        other.0.wrapping_sub(self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:#010x})", self.0)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}
