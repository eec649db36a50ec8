use anyhow::{bail, Context as _, Result};
use serde::Deserialize;
use std::{collections::BTreeSet, sync::Arc};

use crate::{
    context::{ConditionEnv, Platform},
    module::{Condition, Module},
    registry::ModuleRegistry,
};

fn default_true() -> bool {
    true
}

/// Declarative description of a whole registry.
#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ModuleConfig {
    pub name: String,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub condition: Option<ConditionConfig>,
}

/// Activation rule evaluated against a [`ConditionEnv`].
///
/// Empty `platforms` and empty `env.any_of` both match everything.
#[derive(Debug, Clone, Deserialize)]
pub struct ConditionConfig {
    pub trigger: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub platforms: Vec<Platform>,

    #[serde(default)]
    pub env: AnyOf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnyOf {
    #[serde(default)]
    pub any_of: Vec<String>,
}

impl ConditionConfig {
    pub fn matches(&self, env: &ConditionEnv) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.platforms.is_empty() && !self.platforms.contains(&env.platform()) {
            return false;
        }
        self.env.any_of.is_empty() || env.first_present(&self.env.any_of).is_some()
    }

    fn into_condition(self, env: Arc<ConditionEnv>) -> Condition {
        let trigger = self.trigger.clone();
        Condition::new(trigger, move |_| self.matches(&env))
    }
}

impl RegistryConfig {
    /// Validate every entry and build a registry whose conditions are
    /// evaluated against `env`.
    ///
    /// Dependencies naming unregistered modules are accepted here; they only
    /// fail resolution when reachable.
    pub fn build(self, env: &ConditionEnv) -> Result<ModuleRegistry> {
        let env = Arc::new(env.clone());
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut reg = ModuleRegistry::new();

        for (idx, m) in self.modules.into_iter().enumerate() {
            let module = m
                .into_module(&env)
                .with_context(|| format!("modules[{idx}]: invalid module"))?;

            if !seen.insert(module.name.clone()) {
                bail!("modules[{idx}]: duplicate module '{}'", module.name);
            }

            reg.add_module(module);
        }

        Ok(reg)
    }
}

impl ModuleConfig {
    fn into_module(self, env: &Arc<ConditionEnv>) -> Result<Module> {
        let name = normalize_name(&self.name).context("module name")?;

        let mut dependencies = Vec::with_capacity(self.dependencies.len());
        for raw in &self.dependencies {
            let dep = normalize_name(raw)
                .with_context(|| format!("{name}: invalid dependency"))?;
            if dep == name {
                bail!("{name}: module cannot depend on itself");
            }
            dependencies.push(dep);
        }

        let mut module = Module::new(name.clone()).with_dependencies(dependencies);

        if let Some(mut cond) = self.condition {
            cond.trigger = normalize_name(&cond.trigger)
                .with_context(|| format!("{name}: invalid condition trigger"))?;
            module = module.with_condition(cond.into_condition(Arc::clone(env)));
        }

        Ok(module)
    }
}

fn normalize_name(raw: &str) -> Result<String> {
    let s = raw.trim();
    if s.is_empty() {
        bail!("name cannot be empty");
    }
    Ok(s.to_string())
}
