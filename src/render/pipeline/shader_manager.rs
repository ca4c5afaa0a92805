use std::borrow::Cow;
use std::sync::OnceLock;

use minijinja::{Environment, Error as TemplateError, ErrorKind, syntax::SyntaxConfig};
use rust_embed::RustEmbed;

use crate::errors::{Error, Result};

// Global template environment
pub static SHADER_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "src/render/pipeline/shaders"]
struct ShaderAssets;

/// Template every material uses for its vertex stage.
pub const VERTEX_TEMPLATE: &str = "templates/mesh_vertex";

pub fn get_env() -> &'static Environment<'static> {
    SHADER_ENV.get_or_init(|| {
        let mut env = Environment::new();

        // `{$ $}` blocks and `$$` line statements keep the templates readable
        // next to WGSL's own braces.
        let syntax = SyntaxConfig::builder()
            .block_delimiters("{$", "$}")
            .variable_delimiters("{{", "}}")
            .line_statement_prefix("$$")
            .build()
            .expect("Failed to configure shader template syntax");

        env.set_syntax(syntax);
        env.set_undefined_behavior(minijinja::UndefinedBehavior::SemiStrict);
        env.set_loader(shader_loader);

        env
    })
}

/// Resolves `{$ include "chunks/xxx" $}`; the `.wgsl` suffix is optional.
fn shader_loader(name: &str) -> std::result::Result<Option<String>, TemplateError> {
    match read_embedded(name) {
        None => Ok(None),
        Some(Ok(source)) => Ok(Some(source)),
        Some(Err(e)) => Err(TemplateError::new(ErrorKind::InvalidOperation, e.to_string())),
    }
}

fn read_embedded(name: &str) -> Option<std::result::Result<String, Error>> {
    let filename = if name.ends_with(".wgsl") {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}.wgsl"))
    };

    let file = ShaderAssets::get(filename.as_ref())?;
    Some(
        std::str::from_utf8(file.data.as_ref())
            .map(str::to_string)
            .map_err(|_| Error::TemplateEncoding(filename.into_owned())),
    )
}

/// Raw, unrendered template text.
///
/// This is what pre-compile hooks see and patch: includes and `$$` guards
/// are still in place.
pub fn load_source(name: &str) -> Result<String> {
    read_embedded(name).unwrap_or_else(|| Err(Error::TemplateNotFound(name.to_string())))
}
