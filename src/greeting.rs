//! Greeting build specs, parsed from repeated `--greeting NAME:TEXT` flags.

/// One requested firmware variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingSpec {
    /// Short label; becomes the build-dir suffix and the output file stem.
    pub name: String,
    /// Display text compiled into the slave firmware.
    pub text: String,
}

/// Parse a `NAME:TEXT` spec, splitting on the first colon so the text may
/// itself contain colons. Both sides are trimmed and must be non-empty.
///
/// The `Err` message is surfaced verbatim by clap's value-parser reporting.
pub fn parse_spec(value: &str) -> Result<GreetingSpec, String> {
    let Some((name, text)) = value.split_once(':') else {
        return Err("greeting must be NAME:TEXT".to_string());
    };
    let name = name.trim();
    let text = text.trim();
    if name.is_empty() {
        return Err("greeting name cannot be empty".to_string());
    }
    if text.is_empty() {
        return Err("greeting text cannot be empty".to_string());
    }
    Ok(GreetingSpec {
        name: name.to_string(),
        text: text.to_string(),
    })
}

/// Variants built when no `--greeting` flags are given.
pub fn default_set() -> Vec<GreetingSpec> {
    vec![
        GreetingSpec {
            name: "hello".to_string(),
            text: "Hello from slave".to_string(),
        },
        GreetingSpec {
            name: "bye".to_string(),
            text: "Bye from slave".to_string(),
        },
    ]
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_text() {
        let spec = parse_spec("hello:Hello from slave").unwrap();
        assert_eq!(spec.name, "hello");
        assert_eq!(spec.text, "Hello from slave");
    }

    #[test]
    fn splits_on_first_colon_only() {
        let spec = parse_spec("greet:one: two: three").unwrap();
        assert_eq!(spec.name, "greet");
        assert_eq!(spec.text, "one: two: three");
    }

    #[test]
    fn trims_both_sides() {
        let spec = parse_spec("  hi  :  Hi there  ").unwrap();
        assert_eq!(spec.name, "hi");
        assert_eq!(spec.text, "Hi there");
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(parse_spec("hello").is_err());
        assert!(parse_spec("").is_err());
    }

    #[test]
    fn rejects_empty_name() {
        assert!(parse_spec(":text").is_err());
        assert!(parse_spec("  :text").is_err());
    }

    #[test]
    fn rejects_empty_text() {
        assert!(parse_spec("name:").is_err());
        assert!(parse_spec("name:   ").is_err());
    }

    #[test]
    fn default_set_is_the_hello_bye_pair() {
        let defaults = default_set();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults[0].name, "hello");
        assert_eq!(defaults[1].name, "bye");
    }
}
