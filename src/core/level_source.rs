//! Where loggers look up the environment-provided level

/// Environment variable consulted by [`EnvLevel::default`]
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Supplies the level used when no override sets one.
///
/// Queried every time a logger recomputes its effective configuration.
pub trait LevelSource: Send + Sync {
    fn level(&self) -> Option<String>;
}

/// Reads a process environment variable
#[derive(Debug, Clone)]
pub struct EnvLevel {
    var: String,
}

impl EnvLevel {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvLevel {
    fn default() -> Self {
        Self::new(LOG_LEVEL_ENV)
    }
}

impl LevelSource for EnvLevel {
    fn level(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|value| !value.is_empty())
    }
}

/// Constant level, for tests and embedders that bypass the environment
#[derive(Debug, Clone, Default)]
pub struct FixedLevel(Option<String>);

impl FixedLevel {
    pub fn new(level: impl Into<String>) -> Self {
        Self(Some(level.into()))
    }

    pub fn unset() -> Self {
        Self(None)
    }
}

impl LevelSource for FixedLevel {
    fn level(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_level() {
        assert_eq!(FixedLevel::new("info").level().as_deref(), Some("info"));
        assert_eq!(FixedLevel::unset().level(), None);
    }

    #[test]
    fn test_env_level_reads_variable() {
        let var = "CONTEXT_LOGGER_TEST_LEVEL_SOURCE";
        let source = EnvLevel::new(var);
        std::env::remove_var(var);
        assert_eq!(source.level(), None);

        std::env::set_var(var, "error");
        assert_eq!(source.level().as_deref(), Some("error"));

        std::env::set_var(var, "");
        assert_eq!(source.level(), None);
        std::env::remove_var(var);
    }
}
