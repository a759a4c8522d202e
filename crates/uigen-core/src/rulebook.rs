//! Rule dispatch table
//!
//! Provides [`RuleBook`], a mapping from component kind to the rules that
//! apply to it. Critique and validation each own one; adding rules for a new
//! kind is a `register` call, not an edit to a conditional chain.
//!
//! A [`Rule`] is generic over the findings it reports into, so the same
//! table serves both stages.

use indexmap::IndexMap;
use std::fmt;
use uigen_spec::ComponentNode;

/// A check over one component
pub trait Rule<T>: Send + Sync {
    /// Rule name, for logs
    fn name(&self) -> &str;

    /// Inspect the component at `index`, reporting into `findings`
    fn check(&self, index: usize, node: &ComponentNode, findings: &mut T);
}

/// Rule backed by a function
pub struct FnRule<F> {
    name: &'static str,
    check: F,
}

impl<F> FnRule<F> {
    /// Wrap a function as a boxed rule
    #[must_use]
    pub fn boxed<T>(name: &'static str, check: F) -> Box<dyn Rule<T>>
    where
        F: Fn(usize, &ComponentNode, &mut T) + Send + Sync + 'static,
        T: 'static,
    {
        Box::new(Self { name, check })
    }
}

impl<T, F> Rule<T> for FnRule<F>
where
    F: Fn(usize, &ComponentNode, &mut T) + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn check(&self, index: usize, node: &ComponentNode, findings: &mut T) {
        (self.check)(index, node, findings);
    }
}

/// Kind identifier → rules, in registration order
pub struct RuleBook<R: ?Sized> {
    table: IndexMap<String, Vec<Box<R>>>,
}

impl<R: ?Sized> RuleBook<R> {
    /// Create empty rule book
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: IndexMap::new(),
        }
    }

    /// Register a rule for a kind
    pub fn register(&mut self, kind: impl Into<String>, rule: Box<R>) {
        self.table.entry(kind.into()).or_default().push(rule);
    }

    /// With a rule for a kind
    #[inline]
    #[must_use]
    pub fn with(mut self, kind: impl Into<String>, rule: Box<R>) -> Self {
        self.register(kind, rule);
        self
    }

    /// Rules for a kind (empty if none)
    #[must_use]
    pub fn rules_for(&self, kind: &str) -> &[Box<R>] {
        self.table.get(kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Kinds with at least one rule
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Total number of rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// Check if no rule is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: ?Sized> Default for RuleBook<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ?Sized> fmt::Debug for RuleBook<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, rules) in &self.table {
            map.entry(kind, &rules.len());
        }
        map.finish()
    }
}
