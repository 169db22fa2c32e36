//! Vue single-file-component post-processing.
//!
//! An SFC wraps its markup in a top-level `<template>` block, with sibling
//! `<script>` and `<style>` blocks that are not markup at all. This pass
//! runs after the full flat sequence (hierarchy included) is built and
//! narrows the node list to the contents of the *first* top-level
//! `<template>` block, exclusive of the wrapper pair itself. Nested
//! `<template>` elements inside the block (a real Vue construct) are
//! retained, tracked with a nesting counter. Any second top-level block is
//! ignored.

use marklint_nodes::{NodeId, SourceTree};

/// Narrow the flat node list to the first top-level `<template>` block.
/// Returns an empty list if the file has no such block.
pub(crate) fn extract_template(tree: &SourceTree) -> Vec<NodeId> {
    let mut retained = Vec::new();
    let mut nesting = 0usize;

    for (id, node) in tree.nodes() {
        let template_tag = node
            .as_tag()
            .filter(|data| data.has_name("template") && !data.self_closing);

        match template_tag {
            Some(data) if !data.is_end => {
                if nesting > 0 {
                    retained.push(id);
                }
                nesting += 1;
            }
            Some(_) => {
                if nesting == 0 {
                    // stray close before any open; not part of a block
                    continue;
                }
                nesting -= 1;
                if nesting == 0 {
                    // first top-level block finished; later blocks ignored
                    break;
                }
                retained.push(id);
            }
            None => {
                if nesting > 0 {
                    retained.push(id);
                }
            }
        }
    }
    retained
}
