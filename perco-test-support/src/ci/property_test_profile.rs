//! Property-test run profile read from the environment.
//!
//! Every proptest suite in the workspace builds its configuration from this
//! profile, so CI can raise case counts or enable forking in one place.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const PERCO_PBT_CASES_ENV_KEY: &str = "PERCO_PBT_CASES";
/// Environment variable enabling forked proptest execution.
pub const PERCO_PBT_FORK_ENV_KEY: &str = "PERCO_PBT_FORK";

/// Case count and fork flag for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the supplied
    /// defaults when a variable is unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use perco_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(PERCO_PBT_CASES_ENV_KEY, default_cases, parse_cases),
            fork: read_override(PERCO_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_override<T: Copy>(
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Result<T, String>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("case count must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("not a case count: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected true/false, 1/0, yes/no or on/off".to_owned()),
    }
}
