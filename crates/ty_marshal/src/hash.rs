//! Hash containers keyed with a fixed `foldhash` seed.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

const FIXED_STATE: FixedState = FixedState::with_seed(0x5D2B_A4C1_7E90_36F1);

/// Builds [`FoldHasher`]s from a constant seed, so maps can be created in
/// `const` context (the global field cache is a `static`).
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_STATE.build_hasher()
    }
}

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
