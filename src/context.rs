use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Linux,
    Windows,
    Wsl,
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(platform_to_str(*self))
    }
}

/// Environment snapshot that declarative conditions are evaluated against.
#[derive(Debug, Clone)]
pub struct ConditionEnv {
    vars: BTreeMap<String, String>,
    platform: Platform,
}

impl ConditionEnv {
    pub fn new(vars: BTreeMap<String, String>, platform: Platform) -> Self {
        Self { vars, platform }
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        let vars: BTreeMap<String, String> = std::env::vars().collect();
        let platform = detect_platform(&vars);
        Self { vars, platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Value of `key` if set and not blank.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// First of `keys` that is set and not blank.
    pub fn first_present<'a>(&'a self, keys: &'a [String]) -> Option<(&'a str, &'a str)> {
        keys.iter()
            .find_map(|k| self.var(k).map(|v| (k.as_str(), v)))
    }
}

fn detect_platform(vars: &BTreeMap<String, String>) -> Platform {
    let is_wsl = vars.contains_key("WSL_DISTRO_NAME") || vars.contains_key("WSL_INTEROP");
    if is_wsl {
        return Platform::Wsl;
    }

    if cfg!(target_os = "macos") {
        Platform::Mac
    } else if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "linux") {
        Platform::Linux
    } else {
        Platform::Other
    }
}

fn platform_to_str(p: Platform) -> &'static str {
    match p {
        Platform::Mac => "mac",
        Platform::Linux => "linux",
        Platform::Windows => "windows",
        Platform::Wsl => "wsl",
        Platform::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wsl_markers_win_over_target_os() {
        let mut vars = BTreeMap::new();
        vars.insert("WSL_DISTRO_NAME".to_string(), "Ubuntu".to_string());
        assert_eq!(detect_platform(&vars), Platform::Wsl);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let mut vars = BTreeMap::new();
        vars.insert("EMPTY".to_string(), "   ".to_string());
        vars.insert("SET".to_string(), " yes ".to_string());
        let env = ConditionEnv::new(vars, Platform::Linux);

        assert_eq!(env.var("EMPTY"), None);
        assert_eq!(env.var("SET"), Some("yes"));
        assert_eq!(
            env.first_present(&["EMPTY".to_string(), "SET".to_string()]),
            Some(("SET", "yes"))
        );
    }
}
