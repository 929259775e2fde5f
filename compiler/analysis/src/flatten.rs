//! Inheritance flattening for serialization bindings

use std::collections::BTreeMap;

use ir::Interface;
use tracing::warn;

/// Computes the inherited field list of an interface.
#[derive(Debug)]
pub struct InterfaceFlattener<'a> {
    by_name: BTreeMap<&'a str, &'a Interface>,
}

impl<'a> InterfaceFlattener<'a> {
    /// Index `interfaces` by name. The first interface of a given name wins.
    pub fn new(interfaces: &'a [Interface]) -> Self {
        let mut by_name = BTreeMap::new();
        for interface in interfaces {
            by_name.entry(interface.name.as_str()).or_insert(interface);
        }
        Self { by_name }
    }

    /// Look up an indexed interface.
    pub fn get(&self, name: &str) -> Option<&'a Interface> { self.by_name.get(name).copied() }

    /// Own field names, then the flattened fields of each extended interface
    /// in declaration order. Children are not included and nothing is
    /// de-duplicated.
    pub fn flatten(&self, interface: &Interface) -> Vec<String> {
        let mut fields = Vec::new();
        let mut visiting = vec![interface.name.clone()];
        self.collect(interface, &mut visiting, &mut fields);
        fields
    }

    fn collect(&self, interface: &Interface, visiting: &mut Vec<String>, fields: &mut Vec<String>) {
        fields.extend(interface.properties.iter().map(|p| p.field_name()));

        for base in &interface.extends {
            let Some(parent) = self.get(base) else {
                continue;
            };
            if visiting.iter().any(|name| name == base) {
                warn!("Extension cycle through {} while flattening {}", base, interface.name);
                continue;
            }
            visiting.push(base.clone());
            self.collect(parent, visiting, fields);
            visiting.pop();
        }
    }
}
