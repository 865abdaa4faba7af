//! `blade translate`: runs the rewrite pipeline over one file, bypassing the cache.

use blade_compiler::Pipeline;

use crate::{GlobalArgs, TranslateArgs};

/// Runs the `blade translate` command.
pub fn run(args: &TranslateArgs, _global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let source = blade_cache::fs::load_string(&args.file)?;
    print!("{}", Pipeline::standard().translate(&source));
    Ok(0)
}
