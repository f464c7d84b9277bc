use std::fmt;

use im::HashMap;
use itertools::Itertools;

use crate::value::Value;

type Scope = HashMap<String, Value>;

/// Env maps symbol names to values.
///
/// Bindings live in a persistent map, so `extend` hands out a private copy in constant time: whatever the copy
/// binds afterwards is invisible to the original, and the other way round.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Env {
    bindings: Scope,
}

impl Env {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// extend returns a snapshot of this environment for a callee or a closure to own.
    pub fn extend(&self) -> Self {
        self.clone()
    }

    pub fn add_bindings(&mut self, bindings: &[(String, Value)]) {
        bindings.iter().for_each(|(k, v)| {
            self.bindings.insert(k.clone(), v.clone());
        })
    }

    /// define binds `name`, overwriting any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.bindings.get(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut bindings = self.bindings.iter().collect::<Vec<_>>();
        bindings.sort_by(|(a, _), (b, _)| a.cmp(b));

        write!(f, "Env {{")?;
        write!(
            f,
            "{}",
            bindings
                .into_iter()
                .map(|(k, v)| format!("{:?} {}", k, v))
                .format(" ")
        )?;
        write!(f, "}}")
    }
}
