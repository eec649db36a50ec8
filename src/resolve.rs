use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::{error::ResolveError, module::Module, registry::ModuleSource};

/// Computes load orders over a borrowed, read-only module source.
///
/// All traversal state lives in the call to [`Resolver::resolve`], so one
/// resolver (or many resolvers over the same source) can be used repeatedly
/// and from several threads at once.
pub struct Resolver<'a, S: ModuleSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: ModuleSource + ?Sized> Resolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Order `requested`, their transitive dependencies and any activated
    /// conditional modules so that every module follows its dependencies.
    pub fn resolve<N: AsRef<str>>(&self, requested: &[N]) -> Result<Vec<String>, ResolveError> {
        debug!(requested = requested.len(), "resolving modules");

        let mut walk = Walk::new(self.source, requested);
        walk.run()?;

        debug!(
            resolved = walk.result.len(),
            queued = walk.queue.len(),
            "resolved modules"
        );
        Ok(walk.result)
    }
}

impl<'a, S: ModuleSource + ?Sized> Clone for Resolver<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: ModuleSource + ?Sized> Copy for Resolver<'a, S> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnPath,
    Resolved,
}

struct Frame<'a> {
    module: &'a Module,
    next: usize, // index of the next dependency to visit
}

/// Working state of one resolve call.
struct Walk<'a, S: ModuleSource + ?Sized> {
    source: &'a S,
    queue: Vec<String>,
    queued: HashSet<String>,
    marks: HashMap<&'a str, Mark>,
    expanded: HashSet<&'a str>,
    stack: Vec<Frame<'a>>,
    result: Vec<String>,
}

impl<'a, S: ModuleSource + ?Sized> Walk<'a, S> {
    fn new<N: AsRef<str>>(source: &'a S, requested: &[N]) -> Self {
        let queue: Vec<String> = requested.iter().map(|n| n.as_ref().to_string()).collect();
        let queued = queue.iter().cloned().collect();

        Self {
            source,
            queue,
            queued,
            marks: HashMap::new(),
            expanded: HashSet::new(),
            stack: Vec::new(),
            result: Vec::new(),
        }
    }

    /// Walk the queue by index; conditional modules appended while walking
    /// are visited in the same pass.
    fn run(&mut self) -> Result<(), ResolveError> {
        let mut i = 0;
        while i < self.queue.len() {
            let module = self.lookup(&self.queue[i], None)?;
            if !self.is_resolved(module) {
                self.visit(module)?;
            }
            i += 1;
        }
        Ok(())
    }

    /// Depth-first post-order walk from `root` on an explicit frame stack.
    fn visit(&mut self, root: &'a Module) -> Result<(), ResolveError> {
        self.enter(root)?;

        while let Some(frame) = self.stack.last_mut() {
            let module = frame.module;

            if let Some(dep) = module.dependencies.get(frame.next) {
                frame.next += 1;
                let dep = self.lookup(dep, Some(module.name.as_str()))?;
                self.enter(dep)?;
                continue;
            }

            self.stack.pop();
            self.marks.insert(module.name.as_str(), Mark::Resolved);
            trace!(module = %module.name, "emit");
            self.result.push(module.name.clone());
        }

        Ok(())
    }

    /// Reach `module` from the current path. Pushes a frame unless the
    /// module is already resolved.
    fn enter(&mut self, module: &'a Module) -> Result<(), ResolveError> {
        if self.marks.get(module.name.as_str()) == Some(&Mark::OnPath) {
            return Err(self.cycle_at(module));
        }

        self.expand_conditionals(module)?;

        if self.is_resolved(module) {
            return Ok(());
        }

        self.marks.insert(module.name.as_str(), Mark::OnPath);
        self.stack.push(Frame { module, next: 0 });
        Ok(())
    }

    /// Queue the conditional candidates triggered by `module`, at most once
    /// per call.
    fn expand_conditionals(&mut self, module: &'a Module) -> Result<(), ResolveError> {
        if !self.expanded.insert(module.name.as_str()) {
            return Ok(());
        }

        let source = self.source;
        for name in source.conditional_modules(&module.name) {
            let candidate = self.lookup(name, Some(module.name.as_str()))?;
            if self.queued.contains(name) {
                continue;
            }

            if candidate.is_active() {
                trace!(module = %name, trigger = %module.name, "queued conditional module");
                self.queued.insert(name.clone());
                self.queue.push(name.clone());
            } else {
                trace!(module = %name, trigger = %module.name, "conditional module inactive");
            }
        }

        Ok(())
    }

    fn is_resolved(&self, module: &Module) -> bool {
        self.marks.get(module.name.as_str()) == Some(&Mark::Resolved)
    }

    fn lookup(&self, name: &str, referrer: Option<&str>) -> Result<&'a Module, ResolveError> {
        let source = self.source;
        source
            .module(name)
            .ok_or_else(|| ResolveError::UnknownModule {
                name: name.to_string(),
                referrer: referrer.map(str::to_string),
            })
    }

    fn cycle_at(&self, module: &Module) -> ResolveError {
        let start = self
            .stack
            .iter()
            .position(|f| f.module.name == module.name)
            .unwrap_or(0);

        let mut path: Vec<String> = self.stack[start..]
            .iter()
            .map(|f| f.module.name.clone())
            .collect();
        path.push(module.name.clone());

        ResolveError::CycleDetected {
            module: module.name.clone(),
            path,
        }
    }
}
