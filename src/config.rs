//! Engine configuration.
//!
//! Every setting defaults to the reference rules; the opt-in switches add
//! stricter legality checks. Settings can be changed by name, which is how
//! the text protocol's `setoption` reaches them.

use serde::{Deserialize, Serialize};

/// What the validator does when the requested orientation is not in the
/// catalog (dropped as a symmetric duplicate, or reflection disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantPolicy {
    /// Use the shape's first catalog variant instead.
    #[default]
    Fallback,
    /// Reject with `VARIANT_NOT_FOUND`.
    Reject,
}

/// Errors raised when setting an option by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option: '{0}'")]
    UnknownOption(String),

    #[error("option '{name}' needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Option declarations advertised by the protocol handshake.
pub const OPTION_DECLARATIONS: [&str; 4] = [
    "option name AllowReflection type check default true",
    "option name VariantPolicy type combo default fallback var fallback var reject",
    "option name EnforceTurn type check default false",
    "option name RejectAfterFinish type check default false",
];

/// Rules configuration for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether reflected variants are legal orientations.
    pub allow_reflection: bool,
    pub variant_policy: VariantPolicy,
    /// Reject pieces owned by the player not on turn.
    pub enforce_turn: bool,
    /// Reject every placement once the game is finished.
    pub reject_after_finish: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            allow_reflection: true,
            variant_policy: VariantPolicy::Fallback,
            enforce_turn: false,
            reject_after_finish: false,
        }
    }
}

impl EngineConfig {
    /// Sets an option by its protocol name (case-insensitive).
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.ok_or_else(|| ConfigError::MissingValue { name: name.to_string() })?;
        match name.to_ascii_lowercase().as_str() {
            "allowreflection" => self.allow_reflection = parse_bool(name, value)?,
            "enforceturn" => self.enforce_turn = parse_bool(name, value)?,
            "rejectafterfinish" => self.reject_after_finish = parse_bool(name, value)?,
            "variantpolicy" => {
                self.variant_policy = match value.to_ascii_lowercase().as_str() {
                    "fallback" => VariantPolicy::Fallback,
                    "reject" => VariantPolicy::Reject,
                    _ => return Err(invalid(name, value)),
                }
            }
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue { name: name.to_string(), value: value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_rules() {
        let c = EngineConfig::default();
        assert!(c.allow_reflection);
        assert_eq!(c.variant_policy, VariantPolicy::Fallback);
        assert!(!c.enforce_turn);
        assert!(!c.reject_after_finish);
    }

    #[test]
    fn set_options_by_name() {
        let mut c = EngineConfig::default();
        c.set_option("AllowReflection", Some("false")).unwrap();
        c.set_option("enforceturn", Some("on")).unwrap();
        c.set_option("RejectAfterFinish", Some("1")).unwrap();
        c.set_option("VariantPolicy", Some("Reject")).unwrap();
        assert!(!c.allow_reflection);
        assert!(c.enforce_turn);
        assert!(c.reject_after_finish);
        assert_eq!(c.variant_policy, VariantPolicy::Reject);
    }

    #[test]
    fn bad_options_are_reported() {
        let mut c = EngineConfig::default();
        assert_eq!(
            c.set_option("Threads", Some("4")),
            Err(ConfigError::UnknownOption("Threads".into()))
        );
        assert_eq!(
            c.set_option("EnforceTurn", None),
            Err(ConfigError::MissingValue { name: "EnforceTurn".into() })
        );
        assert!(matches!(
            c.set_option("VariantPolicy", Some("random")),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn declarations_have_types() {
        for decl in OPTION_DECLARATIONS {
            assert!(decl.starts_with("option name "));
            assert!(decl.contains(" type "));
        }
    }
}
