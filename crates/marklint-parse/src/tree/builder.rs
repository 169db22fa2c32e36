//! Tree builder: reconstructs parent/child structure from the flat node
//! sequence in one forward pass.
//!
//! The builder keeps a stack of currently-open tag nodes (by arena index)
//! and applies two families of rules while walking the sequence in
//! document order: implicit closing (a new `li` ends an open `li`, and so
//! on per the optional-tags rules) and recovery for mismatched end tags.
//! Malformed input is corrected, never reported: tags that cannot be
//! matched are left dangling open at end of input.
//!
//! The two stack rules are public: the traversal dispatcher replays them
//! over the flat list so its `end_element` events land exactly where this
//! builder closed each element.

use marklint_nodes::{NodeId, NodeKind, SourceTree};

use super::tables::{closes_implicitly, is_known_element, is_void};

/// What the builder does with one node, extracted up front so the arena
/// can be mutated afterwards.
enum Step {
    /// Text / CDATA: adopt under the innermost open element.
    Adopt,
    /// An opening tag with its lowercased name.
    Open { lower_name: String, pushable: bool },
    /// A closing tag with its lowercased name.
    Close { lower_name: String },
    /// Comments, directives, expressions: never attached.
    Skip,
}

/// Link every tag and text node of the arena into a hierarchy. Comments,
/// directives, and expressions are deliberately left parentless.
pub(crate) fn build(tree: &mut SourceTree) {
    let mut stack: Vec<NodeId> = Vec::new();
    let ids: Vec<NodeId> = tree.ids().collect();

    for id in ids {
        let step = match tree.get(id).map(|n| &n.kind) {
            Some(NodeKind::Text | NodeKind::Cdata) => Step::Adopt,
            Some(NodeKind::Tag(data)) => {
                let lower_name = data.name.to_ascii_lowercase();
                if data.is_end {
                    Step::Close { lower_name }
                } else {
                    // void and self-closed tags are never pushed, so they
                    // can never acquire children
                    let pushable = !data.self_closing && !is_void(&lower_name);
                    Step::Open {
                        lower_name,
                        pushable,
                    }
                }
            }
            _ => Step::Skip,
        };

        match step {
            Step::Adopt => {
                if let Some(&top) = stack.last() {
                    tree.attach(top, id);
                }
            }
            Step::Open {
                lower_name,
                pushable,
            } => {
                let _ = pop_implicitly_closed(tree, &mut stack, &lower_name);
                if let Some(&top) = stack.last() {
                    tree.attach(top, id);
                }
                if pushable {
                    stack.push(id);
                }
            }
            Step::Close { lower_name } => {
                let _ = close_element(tree, &mut stack, &lower_name);
            }
            Step::Skip => {}
        }
    }
    // Whatever is still on the stack at end of input stays dangling open.
}

/// Before attaching a new tag named `incoming` (lowercase), pop every open
/// element that it implicitly closes, plus any void element that somehow
/// stayed open. Returns the popped elements, innermost first.
pub fn pop_implicitly_closed(
    tree: &SourceTree,
    stack: &mut Vec<NodeId>,
    incoming: &str,
) -> Vec<NodeId> {
    let mut popped = Vec::new();
    while let Some(&top) = stack.last() {
        let closes = tree.as_tag(top).is_some_and(|top_data| {
            let top_name = top_data.name.to_ascii_lowercase();
            is_void(&top_name) || closes_implicitly(&top_name, incoming)
        });
        if !closes {
            break;
        }
        let _ = stack.pop();
        popped.push(top);
    }
    popped
}

/// Close the element named `lower_name`. If the top of the stack matches,
/// pop it. Otherwise scan down for a matching open element and — recovery
/// for non-well-formed markup — pop everything down to and including it,
/// but only if the elements being discarded are all recognized standard
/// HTML elements. Unrecognized (custom / component) tags are never
/// discarded this way, to avoid destroying legitimate custom-element
/// nesting around a stray close tag.
///
/// Returns the popped elements, innermost first; empty if the end tag
/// matched nothing.
pub fn close_element(tree: &SourceTree, stack: &mut Vec<NodeId>, lower_name: &str) -> Vec<NodeId> {
    let matches_name = |id: NodeId| {
        tree.as_tag(id)
            .is_some_and(|data| data.name.eq_ignore_ascii_case(lower_name))
    };

    match stack.last() {
        Some(&top) if matches_name(top) => {
            let _ = stack.pop();
            return vec![top];
        }
        Some(_) => {}
        None => return Vec::new(),
    }

    let Some(match_idx) = (0..stack.len()).rev().find(|&idx| matches_name(stack[idx])) else {
        // No matching open element at all: the end tag dangles, nothing
        // to correct.
        return Vec::new();
    };

    let discardable = stack[match_idx + 1..].iter().all(|&open| {
        tree.as_tag(open)
            .is_some_and(|data| is_known_element(&data.name.to_ascii_lowercase()))
    });
    let mut popped = Vec::new();
    if discardable {
        while stack.len() > match_idx {
            if let Some(top) = stack.pop() {
                popped.push(top);
            }
        }
    }
    popped
}
