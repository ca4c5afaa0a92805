//! Lightweight uniform data container
//!
//! Holds a small Pod uniform block inline and tracks a dirty version.
//! Writing through `DerefMut` marks the slot dirty automatically.

use bytemuck::Pod;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone)]
pub struct UniformSlot<T: Pod> {
    data: T,
    version: u64,
    label: &'static str,
}

impl<T: Pod> UniformSlot<T> {
    pub fn new(data: T, label: &'static str) -> Self {
        Self {
            data,
            version: 0,
            label,
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.data
    }

    /// Replaces the whole block.
    pub fn set(&mut self, data: T) {
        self.data = data;
        self.mark_dirty();
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Byte view for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.data)
    }
}

impl<T: Pod> Deref for UniformSlot<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T: Pod> DerefMut for UniformSlot<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.mark_dirty();
        &mut self.data
    }
}
