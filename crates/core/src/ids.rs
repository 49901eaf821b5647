//! Deterministic 32-byte identities for pools, tokens, and accounts
//!
//! Every resource a pool owns is addressed by a one-way hash over a
//! domain tag and the defining fields, so any party holding the seed and
//! the token pair can recompute the pool's identities without a registry
//! lookup. The pair is hashed in sorted order: (x, y) and (y, x) name the
//! same pool.

use sha2::{Digest, Sha256};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Parse from the hex form produced by `Display`
            pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes)?;
                Ok($name(bytes))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        // Hex-string serde so identities can key JSON maps in the store.
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
                ser.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(de)?;
                $name::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

id_type! {
    /// Identity of a tradable or share token type
    TokenId
}
id_type! {
    /// Identity of a ledger account (a balance holder)
    AccountId
}
id_type! {
    /// Identity of one pool, derived from its seed and token pair
    PoolId
}

fn hash_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

impl PoolId {
    /// Derive the pool identity from its seed and (unordered) token pair
    pub fn derive(seed: u64, token_x: &TokenId, token_y: &TokenId) -> Self {
        let (lo, hi) = if token_x.0 <= token_y.0 {
            (token_x, token_y)
        } else {
            (token_y, token_x)
        };
        PoolId(hash_parts(&[
            b"eddy:config",
            &seed.to_le_bytes(),
            &lo.0,
            &hi.0,
        ]))
    }

    /// The pool's liquidity share token
    pub fn share_token(&self) -> TokenId {
        TokenId(hash_parts(&[b"eddy:lp", &self.0]))
    }

    /// The vault account holding one side of the pair
    pub fn vault(&self, token: &TokenId) -> AccountId {
        AccountId(hash_parts(&[b"eddy:vault", &self.0, &token.0]))
    }
}

impl TokenId {
    /// Name-addressed token identity, for callers without real asset ids
    pub fn named(name: &str) -> Self {
        TokenId(hash_parts(&[b"eddy:token", name.as_bytes()]))
    }
}

impl AccountId {
    /// Name-addressed account identity, for callers without real keys
    pub fn named(name: &str) -> Self {
        AccountId(hash_parts(&[b"eddy:actor", name.as_bytes()]))
    }
}
