//! Resolve XObject names against a page's resources.

use crate::error::{Error, Result};
use crate::model::XObject;
use crate::parser::{PageId, PdfBackend};

/// Resolves names for one page.
pub struct ResourceResolver<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page: PageId,
}

impl<'a, B: PdfBackend + ?Sized> ResourceResolver<'a, B> {
    /// Create a resolver bound to `page`.
    pub fn new(backend: &'a B, page: PageId) -> Self {
        Self { backend, page }
    }

    /// Look up `name`.
    ///
    /// `Ok(None)` when the name does not resolve; that is not an error. `Err`
    /// only when the target exists but its stream cannot be read.
    pub fn resolve(&self, name: &[u8]) -> Result<Option<XObject>> {
        let resolved = self.backend.lookup_xobject(self.page, name)?;
        if resolved.is_none() {
            let unresolved = Error::UnresolvedResource(String::from_utf8_lossy(name).into_owned());
            log::debug!("page object {:?}: {}", self.page, unresolved);
        }
        Ok(resolved)
    }
}
