use thiserror::Error;

/// Failures that abort a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A module was reached again while still on the active path.
    #[error("dependency cycle detected at module '{module}': {}", .path.join(" -> "))]
    CycleDetected {
        module: String,
        /// Active path from `module` back to itself, e.g. `a -> b -> a`.
        path: Vec<String>,
    },

    /// A requested, depended-on or conditional name has no registry entry.
    #[error("{}", unknown_message(.name, .referrer.as_deref()))]
    UnknownModule {
        name: String,
        referrer: Option<String>,
    },
}

fn unknown_message(name: &str, referrer: Option<&str>) -> String {
    match referrer {
        Some(r) => format!("unknown module '{name}' referenced by '{r}'"),
        None => format!("unknown module '{name}' requested"),
    }
}

impl ResolveError {
    /// Name of the module the error is about.
    pub fn module(&self) -> &str {
        match self {
            ResolveError::CycleDetected { module, .. } => module,
            ResolveError::UnknownModule { name, .. } => name,
        }
    }
}
