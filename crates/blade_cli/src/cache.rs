//! `blade cache`: inspects and clears compiled artifacts.

use crate::project::open_engine;
use crate::{CacheCommand, GlobalArgs};

/// Runs a `blade cache` subcommand.
pub fn run(command: &CacheCommand, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let blade = open_engine(global)?;
    match command {
        CacheCommand::Clear => {
            let removed = blade.cache().purge()?;
            if !global.quiet {
                eprintln!(
                    "    Removed {removed} artifact(s) from {}",
                    blade.cache().cache_dir().display()
                );
            }
            Ok(0)
        }
        CacheCommand::Status { name } => {
            let source = blade.find_view(name)?;
            let state = if blade.cache().is_expired(&source)? {
                "stale"
            } else {
                "fresh"
            };
            println!("{name}: {state}");
            if global.verbose {
                println!("  source:   {}", source.display());
                println!("  artifact: {}", blade.cache().artifact_path(&source).display());
            }
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> (tempfile::TempDir, GlobalArgs) {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views");
        std::fs::create_dir_all(&views).unwrap();
        std::fs::write(views.join("home.blade"), "x").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(dir.path().to_str().unwrap().to_string()),
        };
        (dir, global)
    }

    #[test]
    fn clear_removes_artifacts() {
        let (dir, global) = project();
        open_engine(&global).unwrap().compile("home").unwrap();
        let cache_dir = dir.path().join(".blade-cache");
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 1);

        assert_eq!(run(&CacheCommand::Clear, &global).unwrap(), 0);
        assert_eq!(std::fs::read_dir(&cache_dir).unwrap().count(), 0);
    }

    #[test]
    fn clear_without_cache_dir_succeeds() {
        let (_dir, global) = project();
        assert_eq!(run(&CacheCommand::Clear, &global).unwrap(), 0);
    }

    #[test]
    fn status_of_missing_view_fails() {
        let (_dir, global) = project();
        let command = CacheCommand::Status {
            name: "missing".to_string(),
        };
        assert!(run(&command, &global).is_err());
    }

    #[test]
    fn status_of_existing_view() {
        let (_dir, global) = project();
        let command = CacheCommand::Status {
            name: "home".to_string(),
        };
        assert_eq!(run(&command, &global).unwrap(), 0);
    }
}
