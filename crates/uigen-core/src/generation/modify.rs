//! Modify path
//!
//! Derives an ordered list of edits from request keywords. Edits are applied
//! by the generator to a revised copy of the prior specification.

use super::classify::{contains_any, Topic};
use super::templates;
use uigen_spec::{props, ComponentNode, Properties};

/// One edit to a specification
#[derive(Debug, Clone, PartialEq)]
pub enum Modification {
    /// Merge properties into the component at an index
    Patch { index: usize, patch: Properties },
    /// Append a component
    Append(ComponentNode),
    /// Remove every component of a kind
    Remove(&'static str),
}

/// Edits requested by `text`, in application order
#[must_use]
pub fn modifications(text: &str) -> Vec<Modification> {
    let text = text.to_lowercase();
    let mut edits = Vec::new();

    if text.contains("modern") {
        edits.push(patch_first(props! { "variant" => "modern" }));
    }
    if text.contains("minimal") {
        edits.push(patch_first(props! { "variant" => "minimal" }));
    }
    if text.contains("dark") {
        edits.push(patch_first(props! { "theme" => "dark" }));
    }
    if contains_any(&text, &["bigger", "larger"]) {
        edits.push(patch_first(props! { "size" => "lg" }));
    } else if text.contains("smaller") {
        edits.push(patch_first(props! { "size" => "sm" }));
    }

    let tokens = words(&text);
    let removals = objects(&tokens, "remove");

    if !removals.is_empty() {
        for object in removals {
            edits.extend(object_topic(object).map(|t| Modification::Remove(t.kind())));
        }
    } else {
        for object in objects(&tokens, "add") {
            if let Some(topic) = object_topic(object) {
                edits.push(Modification::Append(templates::template(topic)));
            } else if CTA_PHRASES.iter().any(|p| starts_with_phrase(object, p)) {
                edits.push(Modification::Append(templates::call_to_action()));
            }
        }
    }

    edits
}

fn patch_first(patch: Properties) -> Modification {
    Modification::Patch { index: 0, patch }
}

const ARTICLES: &[&str] = &["a", "an", "the", "another", "some", "more"];
const CTA_PHRASES: &[&str] = &["cta", "call to action", "button"];

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Word runs directly after each whole-word `verb`, leading articles skipped
fn objects<'a>(words: &'a [&'a str], verb: &str) -> Vec<&'a [&'a str]> {
    words
        .iter()
        .enumerate()
        .filter(|(_, w)| **w == verb)
        .map(|(i, _)| {
            let mut rest = &words[i + 1..];
            while let Some((first, tail)) = rest.split_first() {
                if !ARTICLES.contains(first) {
                    break;
                }
                rest = tail;
            }
            rest
        })
        .collect()
}

/// Whether `object` opens with `phrase`, allowing a plural last word
fn starts_with_phrase(object: &[&str], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split(' ').collect();
    parts.len() <= object.len()
        && parts
            .iter()
            .zip(object)
            .enumerate()
            .all(|(i, (p, w))| {
                w == p || (i + 1 == parts.len() && w.strip_suffix('s') == Some(*p))
            })
}

fn object_topic(object: &[&str]) -> Option<Topic> {
    Topic::ALL
        .into_iter()
        .find(|t| t.keywords().iter().any(|k| starts_with_phrase(object, k)))
}
