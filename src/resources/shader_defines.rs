//! Shader Macro Definitions
//!
//! An ordered set of `name -> value` pairs fed to the shader templates.
//! Ordering is by key, so two sets with the same content always hash the
//! same regardless of insertion order. That hash is part of the program
//! cache key.
//!
//! ```rust,ignore
//! let mut defines = ShaderDefines::new();
//! defines.set("use_map", "1");
//! let hash = defines.compute_hash();
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShaderDefines {
    defines: BTreeMap<String, String>,
}

impl ShaderDefines {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a define.
    pub fn set(&mut self, key: &str, value: &str) {
        self.defines.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.defines.remove(key).is_some()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.defines.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.defines.get(key).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defines.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Values from `other` win on conflict.
    pub fn merge(&mut self, other: &ShaderDefines) {
        for (key, value) in &other.defines {
            self.defines.insert(key.clone(), value.clone());
        }
    }

    /// Content hash used in program cache keys.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        use std::hash::BuildHasher;

        rustc_hash::FxBuildHasher.hash_one(self)
    }

    /// Map view for template rendering.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.defines
    }
}

impl From<&[(&str, &str)]> for ShaderDefines {
    fn from(defines: &[(&str, &str)]) -> Self {
        let mut result = Self::new();
        for (k, v) in defines {
            result.set(k, v);
        }
        result
    }
}
