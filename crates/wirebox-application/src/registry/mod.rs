//! Factory Registry
//!
//! Maps class identifiers to service factories. Dotted identifiers form a
//! namespace tree: registering `app.mail.Mailer` creates the namespaces `app`
//! and `app.mail` with `Mailer` as a member of the latter. Identifiers whose
//! extension is one of the direct-lookup extensions (`plugin.wasm`) are kept
//! whole as a single segment.

mod linked;

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use wirebox_domain::{ClassResolver, Error, Result, Service, ServiceFactory, Value};

pub use linked::{SERVICE_FACTORIES, ServiceFactoryEntry, list_linked_factories};

/// Extensions whose identifiers are looked up as a single segment
pub const DIRECT_LOOKUP_EXTENSIONS: &[&str] = &["so", "dylib", "dll", "wasm"];

const NAMESPACE_SEPARATOR: char = '.';

enum Member {
    Factory(ServiceFactory),
    Namespace(Namespace),
}

#[derive(Default)]
struct Namespace {
    members: BTreeMap<String, Member>,
}

impl Namespace {
    fn collect_names(&self, prefix: &str, names: &mut Vec<String>) {
        for (segment, member) in &self.members {
            let path = if prefix.is_empty() {
                segment.clone()
            } else {
                format!("{prefix}{NAMESPACE_SEPARATOR}{segment}")
            };
            match member {
                Member::Factory(_) => names.push(path),
                Member::Namespace(namespace) => namespace.collect_names(&path, names),
            }
        }
    }
}

/// Registry of service factories, usable as the container's [`ClassResolver`]
pub struct FactoryRegistry {
    root: Namespace,
    direct: BTreeMap<String, ServiceFactory>,
    direct_extensions: Vec<String>,
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryRegistry {
    /// Create an empty registry with the default direct-lookup extensions
    pub fn new() -> Self {
        Self {
            root: Namespace::default(),
            direct: BTreeMap::new(),
            direct_extensions: DIRECT_LOOKUP_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }

    /// Replace the direct-lookup extensions
    #[must_use]
    pub fn with_direct_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.direct_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Create a registry holding every factory contributed through
    /// [`SERVICE_FACTORIES`]
    pub fn with_linked() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_linked()?;
        Ok(registry)
    }

    /// Register every factory contributed through [`SERVICE_FACTORIES`]
    pub fn register_linked(&mut self) -> Result<()> {
        for entry in SERVICE_FACTORIES {
            self.register(entry.name, entry.factory)?;
        }
        debug!(count = SERVICE_FACTORIES.len(), "registered linked factories");
        Ok(())
    }

    /// Register a factory under a class identifier
    ///
    /// Fails with [`Error::Class`] when the identifier is already taken or
    /// one of its namespaces is a class.
    pub fn register<F>(&mut self, class: &str, factory: F) -> Result<()>
    where
        F: Fn(Vec<Value>) -> Result<Box<dyn Service>> + Send + Sync + 'static,
    {
        if self.is_direct(class) {
            return self.register_direct(class, factory);
        }

        let segments = split_segments(class)?;
        let Some((name, namespaces)) = segments.split_last() else {
            return Err(Error::class(class, "identifier is empty"));
        };

        let mut namespace = &mut self.root;
        for segment in namespaces {
            let member = namespace
                .members
                .entry((*segment).to_string())
                .or_insert_with(|| Member::Namespace(Namespace::default()));
            namespace = match member {
                Member::Namespace(inner) => inner,
                Member::Factory(_) => {
                    return Err(Error::class(
                        class,
                        format!("\"{segment}\" is a class, not a namespace"),
                    ));
                }
            };
        }

        if namespace.members.contains_key(*name) {
            return Err(Error::class(class, "already registered"));
        }
        namespace
            .members
            .insert((*name).to_string(), Member::Factory(Arc::new(factory)));
        Ok(())
    }

    /// Register a factory returning a concrete service type
    pub fn register_type<S, F>(&mut self, class: &str, factory: F) -> Result<()>
    where
        S: Service,
        F: Fn(Vec<Value>) -> Result<S> + Send + Sync + 'static,
    {
        self.register(class, move |args| {
            factory(args).map(|service| Box::new(service) as Box<dyn Service>)
        })
    }

    /// Register a factory looked up by its whole identifier
    pub fn register_direct<F>(&mut self, class: &str, factory: F) -> Result<()>
    where
        F: Fn(Vec<Value>) -> Result<Box<dyn Service>> + Send + Sync + 'static,
    {
        if class.is_empty() {
            return Err(Error::class(class, "identifier is empty"));
        }
        if self.direct.contains_key(class) {
            return Err(Error::class(class, "already registered"));
        }
        self.direct.insert(class.to_string(), Arc::new(factory));
        Ok(())
    }

    /// Registered class identifiers, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.root.collect_names("", &mut names);
        names.extend(self.direct.keys().cloned());
        names.sort();
        names
    }

    fn is_direct(&self, class: &str) -> bool {
        Path::new(class)
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.direct_extensions.iter().any(|known| known == ext))
    }

    fn lookup(&self, class: &str) -> Option<&ServiceFactory> {
        if self.is_direct(class) {
            return self.direct.get(class);
        }

        let segments = split_segments(class).ok()?;
        let (name, namespaces) = segments.split_last()?;
        let mut namespace = &self.root;
        for segment in namespaces {
            match namespace.members.get(*segment)? {
                Member::Namespace(inner) => namespace = inner,
                Member::Factory(_) => return None,
            }
        }
        match namespace.members.get(*name)? {
            Member::Factory(factory) => Some(factory),
            Member::Namespace(_) => None,
        }
    }
}

impl ClassResolver for FactoryRegistry {
    fn resolve(&self, class: &str) -> Result<ServiceFactory> {
        if let Some(factory) = self.lookup(class) {
            return Ok(Arc::clone(factory));
        }
        let available = self.list();
        let message = if available.is_empty() {
            "no classes are registered".to_string()
        } else {
            format!("available classes: {}", available.join(", "))
        };
        Err(Error::class(class, message))
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("classes", &self.list())
            .field("direct_extensions", &self.direct_extensions)
            .finish()
    }
}

fn split_segments(class: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = class.split(NAMESPACE_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::class(class, "identifier has an empty segment"));
    }
    Ok(segments)
}
