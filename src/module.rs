use std::fmt;
use std::sync::Arc;

type Test = Arc<dyn Fn(&Module) -> bool + Send + Sync>;

/// Activation rule for a conditional module.
///
/// When the module named by `trigger` is visited during resolution, every
/// module whose condition names it becomes a candidate, and is queued only
/// if `test` returns true for it.
#[derive(Clone)]
pub struct Condition {
    trigger: String,
    test: Test,
}

impl Condition {
    pub fn new<F>(trigger: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Module) -> bool + Send + Sync + 'static,
    {
        Self {
            trigger: trigger.into(),
            test: Arc::new(test),
        }
    }

    pub fn always(trigger: impl Into<String>) -> Self {
        Self::new(trigger, |_| true)
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Evaluate the predicate with the owning module as context.
    pub fn test(&self, module: &Module) -> bool {
        (self.test)(module)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub dependencies: Vec<String>, // declared order is visit order
    pub condition: Option<Condition>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dependencies: Vec::new(),
            condition: None,
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// A module without a condition is always included once it is a candidate.
    pub fn is_active(&self) -> bool {
        self.condition.as_ref().map_or(true, |c| c.test(self))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
