use anyhow::{Result, anyhow};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_minifier::{
    CompressOptions as OxcCompressOptions, MangleOptions as OxcMangleOptions, Minifier,
    MinifierOptions,
};
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;

use crate::{options::MinifyOptions, types::Loader};

/// Minifies `source` and returns the generated code.
///
/// An empty string is a valid result (for example a file holding only comments);
/// callers decide what to do with it.
pub fn minify(source: &str, loader: Loader, options: &MinifyOptions) -> Result<String> {
    let allocator = Allocator::default();
    let mut program = parse(&allocator, source, loader)?;

    let minified = Minifier::new(minifier_options(options)).minify(&allocator, &mut program);

    let code = Codegen::new()
        .with_options(codegen_options(options))
        .with_scoping(minified.scoping)
        .build(&program)
        .code;
    trace!("Minified {} bytes to {} bytes", source.len(), code.len());
    Ok(code)
}

fn parse<'a>(allocator: &'a Allocator, source: &'a str, loader: Loader) -> Result<Program<'a>> {
    let first = OxcParser::new(allocator, source, source_type_for(loader)).parse();
    if is_clean(&first) {
        return Ok(first.program);
    }

    // Plain `.js` files in a static directory may be ES modules too
    if loader == Loader::Script {
        debug!("Script parse failed, retrying as module");
        let retry = OxcParser::new(allocator, source, source_type_for(Loader::Module)).parse();
        if is_clean(&retry) {
            return Ok(retry.program);
        }
    }

    match first.errors.first() {
        Some(diagnostic) => Err(anyhow!("Parse error: {}", diagnostic)),
        None => Err(anyhow!("Parse error: parser aborted")),
    }
}

fn is_clean(ret: &ParserReturn<'_>) -> bool {
    !ret.panicked && ret.errors.is_empty()
}

fn source_type_for(loader: Loader) -> SourceType {
    SourceType::default()
        .with_jsx(matches!(loader, Loader::Jsx | Loader::Tsx))
        .with_typescript(matches!(loader, Loader::Ts | Loader::Tsx))
        .with_module(!matches!(loader, Loader::Script))
}

fn minifier_options(options: &MinifyOptions) -> MinifierOptions {
    let compress = options.compress.enabled.then(|| OxcCompressOptions {
        drop_console: options.compress.drop_console,
        drop_debugger: options.compress.drop_debugger,
        ..OxcCompressOptions::default()
    });
    let mangle = options.mangle.enabled.then(|| OxcMangleOptions {
        top_level: options.mangle.top_level,
        ..OxcMangleOptions::default()
    });
    MinifierOptions { mangle, compress }
}

fn codegen_options(options: &MinifyOptions) -> CodegenOptions {
    CodegenOptions {
        minify: true,
        single_quote: options.format.single_quote,
        comments: if options.format.comments {
            CommentOptions::default()
        } else {
            CommentOptions::disabled()
        },
        ..CodegenOptions::default()
    }
}
