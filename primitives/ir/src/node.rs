//! Typed node capabilities
//!
//! The dependency resolver and the emitters do not care whether they look at
//! an alias or a structure. They only need a name, a mutable dependency set,
//! documentation and the version metadata, which [`TypedNode`] exposes.

use std::collections::BTreeSet;

use types::ProtocolVersion;

use crate::{Enumeration, Interface, TypeAlias, TypeRef};

/// Version metadata carried by entities and type expressions.
pub trait Versioned {
    /// Raw `since` tag, if any.
    fn since(&self) -> Option<&str>;

    /// Deprecation message, if any.
    fn deprecated(&self) -> Option<&str>;

    /// Whether the entity is deprecated.
    fn is_deprecated(&self) -> bool { self.deprecated().is_some() }

    /// Parsed `since` tag. Tags that do not parse are treated as absent.
    fn since_version(&self) -> Option<ProtocolVersion> {
        self.since().and_then(|s| ProtocolVersion::from_string(s).ok())
    }
}

/// A named entity that takes part in dependency-ordered emission.
pub trait TypedNode: Versioned {
    /// Entity name.
    fn name(&self) -> &str;

    /// Documentation text.
    fn documentation(&self) -> &str;

    /// Names that must be emitted before this entity.
    fn dependencies(&self) -> &BTreeSet<String>;

    /// Mutable access to the dependency set.
    fn dependencies_mut(&mut self) -> &mut BTreeSet<String>;

    /// Whether the entity is a structure rather than an alias.
    fn is_interface(&self) -> bool;
}

macro_rules! impl_versioned {
    ($($ty:ty),*) => {
        $(
            impl Versioned for $ty {
                fn since(&self) -> Option<&str> { self.since.as_deref() }

                fn deprecated(&self) -> Option<&str> { self.deprecated.as_deref() }
            }
        )*
    };
}

impl_versioned!(Enumeration, TypeAlias, Interface, TypeRef);

impl TypedNode for TypeAlias {
    fn name(&self) -> &str { &self.name }

    fn documentation(&self) -> &str { &self.documentation }

    fn dependencies(&self) -> &BTreeSet<String> { &self.dependencies }

    fn dependencies_mut(&mut self) -> &mut BTreeSet<String> { &mut self.dependencies }

    fn is_interface(&self) -> bool { false }
}

impl TypedNode for Interface {
    fn name(&self) -> &str { &self.name }

    fn documentation(&self) -> &str { &self.documentation }

    fn dependencies(&self) -> &BTreeSet<String> { &self.dependencies }

    fn dependencies_mut(&mut self) -> &mut BTreeSet<String> { &mut self.dependencies }

    fn is_interface(&self) -> bool { true }
}

/// Either kind of ordered entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A type alias
    Alias(TypeAlias),
    /// A structure
    Interface(Interface),
}

impl Versioned for Node {
    fn since(&self) -> Option<&str> {
        match self {
            Node::Alias(alias) => alias.since(),
            Node::Interface(interface) => interface.since(),
        }
    }

    fn deprecated(&self) -> Option<&str> {
        match self {
            Node::Alias(alias) => alias.deprecated(),
            Node::Interface(interface) => interface.deprecated(),
        }
    }
}

impl TypedNode for Node {
    fn name(&self) -> &str {
        match self {
            Node::Alias(alias) => alias.name(),
            Node::Interface(interface) => interface.name(),
        }
    }

    fn documentation(&self) -> &str {
        match self {
            Node::Alias(alias) => alias.documentation(),
            Node::Interface(interface) => interface.documentation(),
        }
    }

    fn dependencies(&self) -> &BTreeSet<String> {
        match self {
            Node::Alias(alias) => alias.dependencies(),
            Node::Interface(interface) => interface.dependencies(),
        }
    }

    fn dependencies_mut(&mut self) -> &mut BTreeSet<String> {
        match self {
            Node::Alias(alias) => alias.dependencies_mut(),
            Node::Interface(interface) => interface.dependencies_mut(),
        }
    }

    fn is_interface(&self) -> bool { matches!(self, Node::Interface(_)) }
}

impl From<TypeAlias> for Node {
    fn from(alias: TypeAlias) -> Self { Node::Alias(alias) }
}

impl From<Interface> for Node {
    fn from(interface: Interface) -> Self { Node::Interface(interface) }
}
