//! Page module graphs.
//!
//! Building a page's graph happens in two phases. [`ModuleGraph::load`] reads
//! and parses every module reachable from the page's references exactly once.
//! [`ModuleGraph::order`] then walks the loaded graph depth first and yields
//! the modules dependencies-first, rejecting cycles. Nothing is rewritten
//! until ordering has succeeded.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::runtime::Runtime;
use crate::syntax::{ModuleSyntax, parse_module};
use crate::{Error, ModuleMap, ModuleName, Result};

/// A module read from the module directory.
#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub name: ModuleName,
    pub path: PathBuf,
    pub source: String,
    pub syntax: ModuleSyntax,
}

/// Every module reachable from one page, keyed by name in discovery order.
#[derive(Debug)]
pub struct ModuleGraph {
    module_dir: PathBuf,
    modules: ModuleMap<LoadedModule>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl ModuleGraph {
    /// Load every module reachable from `roots`.
    ///
    /// Each module is read from `module_dir/<name>` and parsed once, no
    /// matter how many times it is referenced.
    #[instrument(skip_all, fields(module_dir = %module_dir.display(), roots = roots.len()))]
    pub async fn load(
        runtime: &dyn Runtime,
        module_dir: &Path,
        roots: &[ModuleName],
    ) -> Result<Self> {
        let mut modules = ModuleMap::new();
        let mut queue: VecDeque<ModuleName> = roots.iter().cloned().collect();

        while let Some(name) = queue.pop_front() {
            if modules.contains(&name) {
                continue;
            }
            let module = load_module(runtime, module_dir, name.clone()).await?;
            queue.extend(
                module
                    .syntax
                    .dependencies()
                    .filter(|dep| !modules.contains(dep))
                    .cloned(),
            );
            modules.insert_if_absent(name, module);
        }

        debug!(modules = modules.len(), "Loaded module graph");
        Ok(Self {
            module_dir: module_dir.to_path_buf(),
            modules,
        })
    }

    pub fn get(&self, name: &ModuleName) -> Option<&LoadedModule> {
        self.modules.get(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in dependency-first order.
    ///
    /// Roots are visited left to right and each module's imports in source
    /// order; a module follows all of its first-discovered dependencies.
    /// Duplicate references collapse onto the first occurrence.
    pub fn order(&self, roots: &[ModuleName]) -> Result<ModuleMap<&LoadedModule>> {
        let mut marks = FxHashMap::default();
        let mut path = Vec::new();
        let mut ordered = ModuleMap::new();

        for root in roots {
            self.visit(root, &mut marks, &mut path, &mut ordered)?;
        }
        Ok(ordered)
    }

    fn visit<'g>(
        &'g self,
        name: &ModuleName,
        marks: &mut FxHashMap<ModuleName, Mark>,
        path: &mut Vec<ModuleName>,
        ordered: &mut ModuleMap<&'g LoadedModule>,
    ) -> Result<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = path.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(name.clone());
                return Err(Error::CyclicDependency { cycle });
            }
            None => {}
        }

        let module = self.modules.get(name).ok_or_else(|| Error::ModuleNotFound {
            name: name.clone(),
            path: self.module_dir.join(name.as_str()),
        })?;

        marks.insert(name.clone(), Mark::Visiting);
        path.push(name.clone());
        for dep in module.syntax.dependencies() {
            self.visit(dep, marks, path, ordered)?;
        }
        path.pop();
        marks.insert(name.clone(), Mark::Done);

        ordered.insert_if_absent(name.clone(), module);
        Ok(())
    }
}

async fn load_module(
    runtime: &dyn Runtime,
    module_dir: &Path,
    name: ModuleName,
) -> Result<LoadedModule> {
    let path = module_dir.join(name.as_str());
    let source = match read_text(runtime, &path).await {
        Err(Error::Runtime(err)) if err.is_not_found() => {
            return Err(Error::ModuleNotFound { name, path });
        }
        other => other?,
    };

    let syntax = parse_module(&source).map_err(|error| Error::UnsupportedSyntax {
        module: name.clone(),
        error,
    })?;
    debug!(
        module = %name,
        imports = syntax.imports.len(),
        dynamic_imports = syntax.dynamic_imports.len(),
        "Loaded module"
    );

    Ok(LoadedModule {
        name,
        path,
        source,
        syntax,
    })
}

/// Read a whole file as UTF-8 text.
pub async fn read_text(runtime: &dyn Runtime, path: &Path) -> Result<String> {
    let bytes = runtime.read_file(path).await?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8(path.to_path_buf()))
}
