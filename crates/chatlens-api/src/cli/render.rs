//! Offline rendering of JSON records through a template.

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value;

use chatlens_core::template::render_data;

/// Parse `data` (or stdin when it is `-`), render it, and print the text.
pub fn render(template: &str, separator: &str, data: &str, json: bool) -> Result<()> {
    let raw = if data == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read data from stdin")?;
        buf
    } else {
        data.to_string()
    };

    let output = render_input(template, separator, &raw)?;

    if json {
        let body = serde_json::json!({ "parsed_data": output });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{output}");
    }

    Ok(())
}

fn render_input(template: &str, separator: &str, raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw).context("data is not valid JSON")?;
    Ok(render_data(template, &value, separator)?)
}
