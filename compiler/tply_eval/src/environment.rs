//! Scopes for name lookup.
//!
//! Scopes form a chain: the prelude of builtins at the root, the globals
//! (initial bindings and top-level script assignments) below it, then one
//! child scope per loop iteration or script run. Writes always go to the
//! scope they are made in, so sibling iterations never see each other's
//! bindings.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::Value;

#[derive(Default)]
struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Env>,
    is_prelude: bool,
}

/// A handle to one scope in the chain. Cloning shares the scope.
#[derive(Clone)]
pub struct Env(Rc<RefCell<Scope>>);

impl Env {
    /// A root scope holding every builtin.
    pub fn prelude() -> Self {
        let env = Env(Rc::new(RefCell::new(Scope {
            is_prelude: true,
            ..Scope::default()
        })));
        crate::builtins::install(&env);
        env
    }

    /// A fresh global scope below a new prelude.
    pub fn globals() -> Self {
        Env::prelude().child()
    }

    #[must_use]
    pub fn child(&self) -> Self {
        Env(Rc::new(RefCell::new(Scope {
            parent: Some(self.clone()),
            ..Scope::default()
        })))
    }

    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// The outermost scope that is not the prelude.
    #[must_use]
    pub fn global(&self) -> Env {
        let mut current = self.clone();
        loop {
            let parent = current.0.borrow().parent.clone();
            match parent {
                Some(parent) if !parent.0.borrow().is_prelude => current = parent,
                _ => return current,
            }
        }
    }

    /// Bindings made directly in this scope.
    pub fn own_bindings(&self) -> BTreeMap<String, Value> {
        let scope = self.0.borrow();
        scope
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Every binding visible from this scope, prelude excluded. Nearer
    /// scopes shadow outer ones.
    pub fn visible_bindings(&self) -> BTreeMap<String, Value> {
        let mut chain = Vec::new();
        let mut current = Some(self.clone());
        while let Some(env) = current {
            if env.0.borrow().is_prelude {
                break;
            }
            current = env.0.borrow().parent.clone();
            chain.push(env);
        }
        let mut visible = BTreeMap::new();
        for env in chain.iter().rev() {
            visible.extend(env.own_bindings());
        }
        visible
    }

    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Env")
            .field("bindings", &names)
            .field("is_prelude", &scope.is_prelude)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
