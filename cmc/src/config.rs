use crate::error::Error;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

/// Compiler settings. Every key is optional.
///
/// ```yaml
/// indent: 4
/// extension: jasm
/// lenient: false
/// dump: false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces before every instruction line
    pub indent: usize,
    /// Output file extension
    pub extension: String,
    /// Compile out-of-range literals and bad calls with warnings
    pub lenient: bool,
    /// Print the syntax tree
    pub dump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: 4,
            extension: format!("jasm"),
            lenient: false,
            dump: false,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileRead(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_string(), e))
    }

    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = Config::parse("lenient: true").unwrap();
        assert_eq!(
            config,
            Config {
                lenient: true,
                ..Config::default()
            }
        );
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Config::parse("indnet: 2").is_err());
        assert!(Config::parse("indent: two").is_err());
    }
}
