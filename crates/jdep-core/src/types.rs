use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Dense index of a package inside a [`PackageGraph`](crate::graph::PackageGraph).
///
/// Ids are handed out in creation order and stay valid for the lifetime of the
/// graph, since packages are never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(pub(crate) usize);

impl PackageId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural facts decoded from one compiled class.
///
/// Built once by the decoder and never mutated afterwards. The owning package
/// is never part of `referenced_packages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    qualified_name: String,
    package_name: String,
    source_file: Option<String>,
    is_abstract: bool,
    referenced_packages: BTreeSet<String>,
}

impl ClassRecord {
    /// Create a record for `qualified_name` (dot-delimited, nested types keep
    /// their `$` marker). Any reference to the class's own package is dropped.
    pub fn new<I>(
        qualified_name: impl Into<String>,
        source_file: Option<String>,
        is_abstract: bool,
        referenced_packages: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let qualified_name = qualified_name.into();
        let package_name = package_of(&qualified_name).to_string();
        let referenced_packages = referenced_packages
            .into_iter()
            .map(Into::<String>::into)
            .filter(|p| *p != package_name)
            .collect();
        Self {
            qualified_name,
            package_name,
            source_file,
            is_abstract,
            referenced_packages,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Package name, empty for the default package.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Simple name without the package prefix.
    pub fn simple_name(&self) -> &str {
        match self.qualified_name.rsplit_once('.') {
            Some((_, simple)) => simple,
            None => &self.qualified_name,
        }
    }

    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }

    /// True for interfaces and abstract classes.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn referenced_packages(&self) -> &BTreeSet<String> {
        &self.referenced_packages
    }

    pub fn is_inner_class(&self) -> bool {
        self.simple_name().contains('$')
    }
}

/// Package prefix of a dot-delimited type name: everything before the last
/// dot, or the empty string for the default package.
pub fn package_of(qualified_name: &str) -> &str {
    match qualified_name.rsplit_once('.') {
        Some((package, _)) => package,
        None => "",
    }
}
