//! Declarative tagging rules
//!
//! A rule table is an ordered slice of (tag, predicate) pairs. Evaluation
//! walks the table once, keeping table order and dropping repeated tags.

/// One entry of a rule table.
pub struct Rule<C: ?Sized> {
    pub tag: &'static str,
    pub predicate: fn(&C) -> bool,
}

impl<C: ?Sized> Rule<C> {
    pub const fn new(tag: &'static str, predicate: fn(&C) -> bool) -> Self {
        Self { tag, predicate }
    }

    pub fn fires(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

/// Tags of every rule that fires, in table order, without duplicates.
pub fn evaluate<C: ?Sized>(rules: &[Rule<C>], context: &C) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for rule in rules {
        if rule.fires(context) && !tags.iter().any(|t| t == rule.tag) {
            tags.push(rule.tag.to_string());
        }
    }
    tags
}
