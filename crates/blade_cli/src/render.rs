//! `blade render`: renders a view with JSON data and prints the result.

use std::path::Path;

use serde_json::{Map, Value};

use crate::project::open_engine;
use crate::{GlobalArgs, RenderArgs};

/// Runs the `blade render` command.
pub fn run(args: &RenderArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let data = build_data(args.data.as_deref().map(Path::new), &args.set)?;
    let blade = open_engine(global)?;
    let output = blade.run(&args.name, &data)?;
    print!("{output}");
    Ok(0)
}

/// Merges the `--data` file and `--set` pairs into one object. `--set` wins.
pub fn build_data(
    data_file: Option<&Path>,
    sets: &[String],
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut data = match data_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => map,
                _ => return Err(format!("{} must contain a JSON object", path.display()).into()),
            }
        }
        None => Map::new(),
    };

    for set in sets {
        let (key, value) = parse_set(set)?;
        data.insert(key, value);
    }
    Ok(Value::Object(data))
}

/// Parses `key=value`. The value is read as JSON when it parses, otherwise
/// kept as a plain string.
pub fn parse_set(pair: &str) -> Result<(String, Value), String> {
    let (key, raw) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{pair}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{pair}'"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}
