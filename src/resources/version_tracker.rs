/// Mutable guard over a piece of material state.
///
/// Snapshots the value on creation and bumps `version` on drop only if the
/// value actually changed, so touching settings without modifying them does
/// not force a program rebuild.
pub struct MutGuard<'a, T: Clone + PartialEq> {
    data: &'a mut T,
    version: &'a mut u64,
    initial: T,
}

impl<'a, T: Clone + PartialEq> MutGuard<'a, T> {
    pub fn new(data: &'a mut T, version: &'a mut u64) -> Self {
        let initial = data.clone();
        Self { data, version, initial }
    }
}

impl<T: Clone + PartialEq> std::ops::Deref for MutGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<T: Clone + PartialEq> std::ops::DerefMut for MutGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<T: Clone + PartialEq> Drop for MutGuard<'_, T> {
    fn drop(&mut self) {
        if *self.data != self.initial {
            *self.version = self.version.wrapping_add(1);
        }
    }
}
