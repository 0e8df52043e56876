//! `chatlens config`: show the effective configuration.

use anyhow::Result;
use console::style;

use chatlens_types::config::ChatlensConfig;

/// Print the merged configuration and whether the credential variable is set.
///
/// The credential value itself is never printed.
pub fn show_config(config: &ChatlensConfig, json: bool) -> Result<()> {
    let key_set = std::env::var(&config.completion.api_key_env)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);

    if json {
        let body = serde_json::json!({
            "config": config,
            "api_key_set": key_set,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{}", toml::to_string_pretty(config)?);

    let mark = if key_set {
        style("set").green()
    } else {
        style("not set").red()
    };
    eprintln!(
        "  {} {}",
        style(format!("${}", config.completion.api_key_env)).dim(),
        mark
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&ChatlensConfig::default()).unwrap();
        assert!(text.contains("[server]"));
        assert!(text.contains("port = 5000"));
        assert!(text.contains("llama-3.1-8b-instant"));

        let back: ChatlensConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.server.port, 5000);
        assert_eq!(back.prompt.query_field, "user_query");
    }
}
