use std::collections::BTreeMap;

use tracing::warn;

use crate::module::Module;

/// Read side of a module registry, as consumed by the resolver.
pub trait ModuleSource {
    fn module(&self, name: &str) -> Option<&Module>;

    /// Candidate names to consider when `trigger` is visited, in order.
    fn conditional_modules(&self, trigger: &str) -> &[String];
}

#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, Module>,
    conditional: BTreeMap<String, Vec<String>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, replacing any module with the same name.
    ///
    /// A module with a condition is also indexed under its trigger.
    /// The replaced module's trigger entry is dropped.
    pub fn add_module(&mut self, module: Module) -> Option<Module> {
        let name = module.name.clone();
        let trigger = module.condition.as_ref().map(|c| c.trigger().to_string());

        let prev = self.modules.insert(name.clone(), module);
        if let Some(p) = prev.as_ref() {
            warn!(module = %p.name, "replacing previously registered module");
            if let Some(old) = p.condition.as_ref() {
                self.remove_conditional(old.trigger(), &name);
            }
        }

        if let Some(trigger) = trigger {
            self.add_conditional(trigger, name);
        }
        prev
    }

    /// Index `name` as a conditional candidate of `trigger`.
    pub fn add_conditional(&mut self, trigger: impl Into<String>, name: impl Into<String>) {
        let name = name.into();
        let list = self.conditional.entry(trigger.into()).or_default();
        if !list.contains(&name) {
            list.push(name);
        }
    }

    fn remove_conditional(&mut self, trigger: &str, name: &str) {
        if let Some(list) = self.conditional.get_mut(trigger) {
            list.retain(|n| n != name);
            if list.is_empty() {
                self.conditional.remove(trigger);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn modules(&self) -> &BTreeMap<String, Module> {
        &self.modules
    }

    pub fn conditional_index(&self) -> &BTreeMap<String, Vec<String>> {
        &self.conditional
    }
}

impl ModuleSource for ModuleRegistry {
    fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    fn conditional_modules(&self, trigger: &str) -> &[String] {
        self.conditional
            .get(trigger)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FromIterator<Module> for ModuleRegistry {
    fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
        let mut reg = Self::new();
        for m in iter {
            reg.add_module(m);
        }
        reg
    }
}
