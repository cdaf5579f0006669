//! Interned literal constants.

use core::borrow::Borrow;
use core::hash::Hash;

use hashbrown::HashMap;

use super::ResolveError;
use crate::{String, Vec};

/// Largest number of entries a single pool may hold.
pub const MAX_POOL_ENTRIES: usize = u32::MAX as usize;

/// Append-only table handing out one stable index per distinct value.
#[derive(Debug)]
pub struct Pool<K> {
    name: &'static str,
    entries: Vec<K>,
    index: HashMap<K, usize>,
}

impl<K: Hash + Eq + Clone> Pool<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Index of `key`, adding it if this is the first occurrence.
    pub fn intern<Q>(&mut self, key: &Q) -> Result<usize, ResolveError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        if let Some(&existing) = self.index.get(key) {
            return Ok(existing);
        }
        let index = self.entries.len();
        if index >= MAX_POOL_ENTRIES {
            return Err(ResolveError::PoolOverflow {
                pool: self.name,
                limit: MAX_POOL_ENTRIES,
            });
        }
        let owned = key.to_owned();
        self.entries.push(owned.clone());
        self.index.insert(owned, index);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<&K> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[K] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The integer, float and string pools shared by every node resolved with
/// them. Owned by the driver and passed to the resolver explicitly.
#[derive(Debug)]
pub struct ConstantPools {
    ints: Pool<i64>,
    /// Floats are keyed by bit pattern, so `0.0` and `-0.0` are distinct
    /// entries and NaN can be interned.
    floats: Pool<u64>,
    strings: Pool<String>,
}

impl ConstantPools {
    pub fn new() -> Self {
        Self {
            ints: Pool::new("integer"),
            floats: Pool::new("float"),
            strings: Pool::new("string"),
        }
    }

    pub fn int_index(&mut self, value: i64) -> Result<usize, ResolveError> {
        self.ints.intern(&value)
    }

    pub fn float_index(&mut self, value: f64) -> Result<usize, ResolveError> {
        self.floats.intern(&value.to_bits())
    }

    pub fn str_index(&mut self, value: &str) -> Result<usize, ResolveError> {
        self.strings.intern(value)
    }

    pub fn int(&self, index: usize) -> Option<i64> {
        self.ints.get(index).copied()
    }

    pub fn float(&self, index: usize) -> Option<f64> {
        self.floats.get(index).copied().map(f64::from_bits)
    }

    pub fn string(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn ints(&self) -> &Pool<i64> {
        &self.ints
    }

    pub fn floats(&self) -> &Pool<u64> {
        &self.floats
    }

    pub fn strings(&self) -> &Pool<String> {
        &self.strings
    }
}

impl Default for ConstantPools {
    fn default() -> Self {
        Self::new()
    }
}
