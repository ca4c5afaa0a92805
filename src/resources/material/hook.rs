use std::fmt;
use std::sync::Arc;

use crate::render::pipeline::ShaderDescription;

/// Callback run against a material's shader sources right before they are
/// rendered into a program.
///
/// The hook receives a fresh [`ShaderDescription`] on every compilation, so
/// whatever it patches is rebuilt from the template each time rather than
/// layered on a previous result.
#[derive(Clone)]
pub struct CompileHook(Arc<dyn Fn(&mut ShaderDescription) + Send + Sync>);

impl CompileHook {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut ShaderDescription) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, shader: &mut ShaderDescription) {
        (self.0)(shader);
    }
}

impl fmt::Debug for CompileHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompileHook(..)")
    }
}
