//! The state of one top-level serialization or deserialization call.
//!
//! Contexts are created by the entry points of the managers,
//! passed by reference through every recursive call, and dropped when the call returns.
//! They can also be built directly, e.g. pre-seeded with visited objects.
use crate::issue::Issue;
use crate::object::{ObjectKey, ObjectRef, Value};
use rdfbean_term::Identifier;
use std::collections::{HashMap, HashSet};

/// The state of a serialization call.
#[derive(Debug, Default)]
pub struct SerializationContext {
    // the handle is retained so that the address of a visited object is not reused
    visited: HashMap<ObjectKey, (ObjectRef, Identifier)>,
    statics: HashSet<Identifier>,
    depth: usize,
}

impl SerializationContext {
    /// A fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifier already assigned to `object`, if it has been visited.
    pub fn get(&self, object: &ObjectRef) -> Option<&Identifier> {
        self.visited.get(&object.key()).map(|(_, id)| id)
    }

    /// Record that `object` is identified by `id`.
    ///
    /// Further visits of `object` will return `id` without serializing it again.
    pub fn visit(&mut self, object: &ObjectRef, id: Identifier) {
        self.visited.insert(object.key(), (object.clone(), id));
    }

    /// The number of visited objects.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Record that the static resource `id` has been emitted.
    ///
    /// Return `false` if it had already been emitted in this context.
    pub fn mark_static(&mut self, id: &Identifier) -> bool {
        self.statics.insert(id.clone())
    }

    /// The current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// The state of a deserialization call.
#[derive(Debug, Default)]
pub struct DeserializationContext {
    objects: HashMap<Identifier, Value>,
    issues: Vec<Issue>,
    depth: usize,
}

impl DeserializationContext {
    /// A fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` has been deserialized as `value`.
    ///
    /// Complex values must be registered *before* their content is deserialized,
    /// so that cyclic references to them resolve to the same instance.
    pub fn register(&mut self, id: Identifier, value: Value) {
        self.objects.insert(id, value);
    }

    /// The value already deserialized for `id`, if any.
    pub fn get(&self, id: &Identifier) -> Option<&Value> {
        self.objects.get(id)
    }

    /// Record a non-fatal problem.
    pub fn add_issue(&mut self, issue: Issue) {
        log::warn!("{}", issue);
        self.issues.push(issue);
    }

    /// The problems recorded so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume this context, returning the recorded problems.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// The current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn enter(&mut self) -> usize {
        self.depth += 1;
        self.depth
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::issue::IssueKind;

    #[test]
    fn visited() {
        let mut ctx = SerializationContext::new();
        let a = ObjectRef::bean("A");
        let b = ObjectRef::bean("A");
        assert!(ctx.get(&a).is_none());
        ctx.visit(&a, Identifier::resource("http://example.org/a"));
        assert_eq!(
            ctx.get(&a.clone()),
            Some(&Identifier::resource("http://example.org/a"))
        );
        assert!(ctx.get(&b).is_none());
        assert_eq!(ctx.visited_count(), 1);
    }

    #[test]
    fn statics() {
        let mut ctx = SerializationContext::new();
        let id = Identifier::resource("http://example.org/Config");
        assert!(ctx.mark_static(&id));
        assert!(!ctx.mark_static(&id));
    }

    #[test]
    fn depth() {
        let mut ctx = DeserializationContext::new();
        assert_eq!(ctx.enter(), 1);
        assert_eq!(ctx.enter(), 2);
        ctx.leave();
        assert_eq!(ctx.depth(), 1);
        ctx.leave();
        ctx.leave();
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn registered_objects_and_issues() {
        let mut ctx = DeserializationContext::new();
        let id = Identifier::blank("b1");
        let obj = Value::from(ObjectRef::bean("A"));
        ctx.register(id.clone(), obj.clone());
        assert_eq!(ctx.get(&id), Some(&obj));
        assert!(ctx.get(&Identifier::blank("b2")).is_none());
        ctx.add_issue(Issue::new(IssueKind::UnresolvableType {
            identifier: "_:b2".into(),
        }));
        assert_eq!(ctx.issues().len(), 1);
        assert_eq!(ctx.into_issues().len(), 1);
    }
}
