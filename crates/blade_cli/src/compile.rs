//! `blade compile`: prints a view's translated text, refreshing its artifact.

use crate::project::open_engine;
use crate::{CompileArgs, GlobalArgs};

/// Runs the `blade compile` command.
pub fn run(args: &CompileArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let blade = open_engine(global)?;
    let translated = blade.compile(&args.name)?;
    if !global.quiet {
        let source = blade.find_view(&args.name)?;
        eprintln!(
            "   Compiled {} -> {}",
            source.display(),
            blade.cache().artifact_path(&source).display()
        );
    }
    print!("{translated}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views");
        std::fs::create_dir_all(views.join("pages")).unwrap();
        std::fs::write(views.join("pages").join("home.blade"), "{{ $A }}").unwrap();

        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(dir.path().to_str().unwrap().to_string()),
        };
        let args = CompileArgs {
            name: "pages.home".to_string(),
        };
        assert_eq!(run(&args, &global).unwrap(), 0);

        let artifacts = std::fs::read_dir(dir.path().join(".blade-cache"))
            .unwrap()
            .count();
        assert_eq!(artifacts, 1);
    }

    #[test]
    fn compile_unknown_view_fails() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(dir.path().to_str().unwrap().to_string()),
        };
        let args = CompileArgs {
            name: "missing".to_string(),
        };
        let err = run(&args, &global).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
