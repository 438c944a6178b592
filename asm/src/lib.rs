pub mod directive;
pub mod encoder;
pub mod error;
pub mod image;
pub mod line;
pub mod parser;
pub mod symbol;
pub mod util;

use crate::directive::Directives;
use crate::encoder::Encoded;
use crate::error::Diag;
use crate::image::Image;
use crate::line::Line;
use crate::symbol::Symbols;

/// Result of one assembly run: the final image plus the per-instruction
/// encodings (for the dump listing).
#[derive(Debug)]
pub struct Assembly {
    pub image: Image,
    pub code: Vec<Encoded>,
}

/// Assemble one source unit. Pure batch computation: no I/O, and every run
/// owns its own symbol table and line buffer.
pub fn assemble(source: &str) -> Result<Assembly, Diag> {
    let lines = Line::clean(source);

    let mut symbols = Symbols::new();
    let (directives, lines) = directive::extract(lines, &mut symbols)?;
    let Directives { origin, export } = directives;

    let insts = parser::statements(&lines, origin, &mut symbols)?;

    let mut code = Vec::with_capacity(insts.len());
    for inst in insts {
        let bytes = encoder::encode(&inst, &symbols).map_err(|err| Diag::at(err, &inst.line))?;
        code.push(Encoded { inst, bytes });
    }

    let export = match &export {
        Some((expr, line)) => {
            let addr =
                encoder::resolve_expr(expr, &symbols).map_err(|err| Diag::at(err, line))?;
            Some(addr)
        }
        None => None,
    };

    let image = image::build(origin, export, &code).map_err(Diag::bare)?;
    Ok(Assembly { image, code })
}
