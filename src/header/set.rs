//! Ordered collection of header definitions.

/// Header sections, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Platform,
    CallingConvention,
    Mode,
    Diagnostics,
    Features,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Platform,
        Section::CallingConvention,
        Section::Mode,
        Section::Diagnostics,
        Section::Features,
    ];

    /// Comment line introducing the section.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Platform => "Platform",
            Section::CallingConvention => "Calling convention",
            Section::Mode => "Runtime mode",
            Section::Diagnostics => "Diagnostics",
            Section::Features => "Detected features",
        }
    }
}

/// Preprocessor condition for [`Definition::Conditional`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Defined(String),
    NotDefined(String),
}

/// One preprocessor construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// `#define NAME [value]`
    Define { name: String, value: Option<String> },
    /// `#include` of a system (`<x.h>`) or quoted (`"x.h"`) header, given verbatim.
    Include(String),
    /// `#ifdef`/`#ifndef` block with an optional `#else` branch.
    Conditional {
        condition: Condition,
        then: Vec<Definition>,
        otherwise: Vec<Definition>,
    },
}

impl Definition {
    pub fn define(name: &str) -> Self {
        Definition::Define {
            name: name.to_string(),
            value: None,
        }
    }

    pub fn define_as(name: &str, value: &str) -> Self {
        Definition::Define {
            name: name.to_string(),
            value: Some(value.to_string()),
        }
    }

    pub fn include(header: &str) -> Self {
        Definition::Include(header.to_string())
    }

    pub fn if_defined(name: &str, then: Vec<Definition>, otherwise: Vec<Definition>) -> Self {
        Definition::Conditional {
            condition: Condition::Defined(name.to_string()),
            then,
            otherwise,
        }
    }

    pub fn if_not_defined(name: &str, then: Vec<Definition>) -> Self {
        Definition::Conditional {
            condition: Condition::NotDefined(name.to_string()),
            then,
            otherwise: Vec::new(),
        }
    }

    /// `#ifndef NAME` / `#define NAME [value]` / `#endif`
    pub fn fallback(name: &str, value: Option<&str>) -> Self {
        let inner = match value {
            Some(value) => Definition::define_as(name, value),
            None => Definition::define(name),
        };
        Definition::if_not_defined(name, vec![inner])
    }

    /// Render as header lines.
    pub fn render(&self, out: &mut Vec<String>) {
        match self {
            Definition::Define { name, value: None } => out.push(format!("#define {}", name)),
            Definition::Define {
                name,
                value: Some(value),
            } => out.push(format!("#define {} {}", name, value)),
            Definition::Include(header) => out.push(format!("#include {}", header)),
            Definition::Conditional {
                condition,
                then,
                otherwise,
            } => {
                match condition {
                    Condition::Defined(name) => out.push(format!("#ifdef {}", name)),
                    Condition::NotDefined(name) => out.push(format!("#ifndef {}", name)),
                }
                for definition in then {
                    definition.render(out);
                }
                if !otherwise.is_empty() {
                    out.push("#else".to_string());
                    for definition in otherwise {
                        definition.render(out);
                    }
                }
                out.push("#endif".to_string());
            }
        }
    }

    /// Count `#define name` directives, including nested ones.
    pub fn count_defines(&self, target: &str) -> usize {
        match self {
            Definition::Define { name, .. } => usize::from(name == target),
            Definition::Include(_) => 0,
            Definition::Conditional { then, otherwise, .. } => then
                .iter()
                .chain(otherwise)
                .map(|d| d.count_defines(target))
                .sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    section: Section,
    key: String,
    definition: Definition,
}

/// Keyed header definitions, grouped by [`Section`].
///
/// Entries keep insertion order within their section. Setting a key that
/// already exists replaces the definition where it stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationSet {
    entries: Vec<Entry>,
}

impl ConfigurationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for `key`.
    pub fn set(&mut self, section: Section, key: &str, definition: Definition) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => {
                entry.section = section;
                entry.definition = definition;
            }
            None => self.entries.push(Entry {
                section,
                key: key.to_string(),
                definition,
            }),
        }
    }

    /// `#define name`, keyed by the macro name.
    pub fn define(&mut self, section: Section, name: &str) {
        self.set(section, name, Definition::define(name));
    }

    /// `#define name value`, keyed by the macro name.
    pub fn define_as(&mut self, section: Section, name: &str, value: &str) {
        self.set(section, name, Definition::define_as(name, value));
    }

    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.definition)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions of `section` in insertion order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = (&str, &Definition)> {
        self.entries
            .iter()
            .filter(move |e| e.section == section)
            .map(|e| (e.key.as_str(), &e.definition))
    }

    /// Number of `#define name` directives across every section.
    pub fn count_defines(&self, name: &str) -> usize {
        self.entries
            .iter()
            .map(|e| e.definition.count_defines(name))
            .sum()
    }
}
