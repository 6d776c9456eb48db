use std::fmt;

use serde::{Serialize, Serializer};

use crate::params::ParamSpec;

/// Closed set of generator methods.
///
/// Settings stores carry methods as free strings; [`MethodId::from_title`] is
/// the only way such a string becomes a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodId {
    /// No generation: the field is passed through untouched.
    None,
    Uniform,
    Constant,
    Bernoulli,
    Increment,
    Normal,
    Exponential,
    Words,
    Pattern,
    Email,
    Name,
    Now,
    Length,
}

impl MethodId {
    pub const ALL: &'static [MethodId] = &[
        MethodId::None,
        MethodId::Uniform,
        MethodId::Constant,
        MethodId::Bernoulli,
        MethodId::Increment,
        MethodId::Normal,
        MethodId::Exponential,
        MethodId::Words,
        MethodId::Pattern,
        MethodId::Email,
        MethodId::Name,
        MethodId::Now,
        MethodId::Length,
    ];

    /// Identifier used in persisted settings.
    pub fn title(self) -> &'static str {
        match self {
            MethodId::None => "None",
            MethodId::Uniform => "Uniform",
            MethodId::Constant => "Constant",
            MethodId::Bernoulli => "Bernoulli",
            MethodId::Increment => "Increment",
            MethodId::Normal => "Normal",
            MethodId::Exponential => "Exponential",
            MethodId::Words => "Words",
            MethodId::Pattern => "Pattern",
            MethodId::Email => "Email",
            MethodId::Name => "Name",
            MethodId::Now => "Now",
            MethodId::Length => "Length",
        }
    }

    /// Exact match against known titles.
    pub fn from_title(title: &str) -> Option<MethodId> {
        Self::ALL.iter().copied().find(|id| id.title() == title)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl Serialize for MethodId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title())
    }
}

/// A generator method applicable to a SQL type, with its declared config.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub id: MethodId,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl MethodSpec {
    pub fn new(id: MethodId, description: &'static str) -> Self {
        Self {
            id,
            description,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn param(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.key == key)
    }
}
