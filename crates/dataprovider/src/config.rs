//! Runtime configuration for dataprovider.
//!
//! The module exposes the process-wide default name template used by
//! providers that do not set their own `format`.

use std::sync::RwLock;

/// Template used when neither the provider nor the environment sets one.
pub const DEFAULT_FORMAT: &str = "%m[%i: %p[0..-1]]";

/// Environment variable consulted for the default template.
pub const DEFAULT_FORMAT_ENV: &str = "DATAPROVIDER_DEFAULT_FORMAT";

static DEFAULT_FORMAT_OVERRIDE: RwLock<Option<String>> = RwLock::new(None);

fn env_default_format() -> Option<String> {
    std::env::var(DEFAULT_FORMAT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn override_state() -> Option<String> {
    DEFAULT_FORMAT_OVERRIDE
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

/// Determine the template used by providers without an explicit `format`.
#[must_use]
pub fn default_format() -> String {
    override_state()
        .or_else(env_default_format)
        .unwrap_or_else(|| DEFAULT_FORMAT.to_owned())
}

/// Override the default template for the current process.
///
/// Tests may call [`clear_default_format_override`] to restore environment
/// driven behaviour afterwards.
pub fn set_default_format(template: impl Into<String>) {
    *DEFAULT_FORMAT_OVERRIDE
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(template.into());
}

/// Remove any in-process override of the default template.
pub fn clear_default_format_override() {
    *DEFAULT_FORMAT_OVERRIDE
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn reset_override() {
        clear_default_format_override();
    }

    #[test]
    #[serial]
    fn falls_back_to_builtin_template() {
        reset_override();
        if env_default_format().is_none() {
            assert_eq!(default_format(), DEFAULT_FORMAT);
        }
    }

    #[test]
    #[serial]
    fn override_takes_precedence() {
        reset_override();
        set_default_format("%c.%m#%i");
        assert_eq!(default_format(), "%c.%m#%i");
        reset_override();
        assert_ne!(default_format(), "%c.%m#%i");
    }
}
