use std::collections::HashSet;

/// Externally configured switches for one composition pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Attach runtime ids and classes to emitted fragments.
    pub include_runtime_metadata: bool,
    /// Compose the contents of `clipPath` elements as ordinary drawings.
    pub rendering_clip_region: bool,
    /// Ask the geometry builder for simplified geometry.
    pub optimize_path: bool,
}

/// Session state shared by the compositions of one document.
///
/// Holds the options and the registry of element ids already attached to a
/// fragment. The registry must be reset between independent documents;
/// [`Composer::compose_document`](crate::compose::Composer::compose_document)
/// does so.
#[derive(Debug, Default)]
pub struct Session {
    options: ComposeOptions,
    registered_ids: HashSet<String>,
}

impl Session {
    pub fn new(options: ComposeOptions) -> Self {
        Self { options, registered_ids: HashSet::new() }
    }

    #[inline]
    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    #[inline]
    pub fn is_registered_id(&self, id: &str) -> bool {
        self.registered_ids.contains(id)
    }

    /// Returns `false` if the id was already registered.
    pub fn register_id(&mut self, id: &str) -> bool {
        if self.registered_ids.contains(id) {
            return false;
        }
        self.registered_ids.insert(id.to_owned())
    }

    pub fn reset(&mut self) {
        self.registered_ids.clear();
    }

    /// Swaps in an empty registry; the returned one goes back through
    /// [`Session::restore_registry`].
    pub(crate) fn scratch_registry(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.registered_ids)
    }

    pub(crate) fn restore_registry(&mut self, registry: HashSet<String>) {
        self.registered_ids = registry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_register_once_until_reset() {
        let mut s = Session::default();
        assert!(!s.is_registered_id("a"));
        assert!(s.register_id("a"));
        assert!(!s.register_id("a"));
        assert!(s.is_registered_id("a"));
        s.reset();
        assert!(!s.is_registered_id("a"));
    }

    #[test]
    fn scratch_registry_leaves_outer_ids_alone() {
        let mut s = Session::default();
        s.register_id("outer");
        let saved = s.scratch_registry();
        assert!(s.register_id("outer"));
        assert!(s.register_id("inner"));
        s.restore_registry(saved);
        assert!(s.is_registered_id("outer"));
        assert!(!s.is_registered_id("inner"));
    }
}
