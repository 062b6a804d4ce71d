//! Whole-file conditional detection.
//!
//! A template whose entire body sits inside `{{#if flag}} ... {{/if}}` blocks
//! with every guard off would render to an empty file. Such templates are
//! dropped instead of written.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::context::RenderingContext;

/// Any mustache tag, with optional whitespace control on either side.
fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"\{\{~?\s*([^}]*?)\s*~?\}\}").expect("valid tag pattern"))
}

fn guard_pattern() -> &'static Regex {
    static GUARD: OnceLock<Regex> = OnceLock::new();
    GUARD.get_or_init(|| Regex::new(r"^[A-Za-z_$][\w$]*$").expect("valid guard pattern"))
}

#[derive(Debug, PartialEq)]
enum Tag<'a> {
    /// `{{#if guard}}`; `None` when the guard is not a bare identifier
    OpenIf(Option<&'a str>),
    OpenBlock,
    Else,
    Close,
    Other,
}

fn classify(inner: &str) -> Tag<'_> {
    let inner = inner.trim();

    if let Some(rest) = inner.strip_prefix("#if") {
        if rest.starts_with(char::is_whitespace) {
            let guard = rest.trim();
            return Tag::OpenIf(guard_pattern().is_match(guard).then_some(guard));
        }
    }

    if inner == "else" || inner.starts_with("else ") || inner == "^" {
        Tag::Else
    } else if inner.starts_with('#') || inner.starts_with('^') {
        Tag::OpenBlock
    } else if inner.starts_with('/') {
        Tag::Close
    } else {
        Tag::Other
    }
}

/// A top-level `{{#if}}` block found in the raw template.
#[derive(Debug)]
struct GuardedBlock<'a> {
    guard: Option<&'a str>,
    has_else: bool,
}

/// Decide whether a template file should be omitted from output.
///
/// True only when the body consists of top-level `{{#if <name>}}` blocks and
/// whitespace, none of the blocks has an `{{else}}` branch, and every guard is
/// `false`, `null` or absent in the context. Unbalanced blocks never trigger a
/// skip; the renderer reports them.
pub fn should_skip(raw: &str, context: &RenderingContext) -> bool {
    let mut blocks: Vec<GuardedBlock<'_>> = Vec::new();
    // true for a top-level #if that may be removed
    let mut stack: Vec<bool> = Vec::new();
    let mut residue = String::new();
    let mut cursor = 0;

    for caps in tag_pattern().captures_iter(raw) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        match classify(inner.as_str()) {
            Tag::OpenIf(guard) if stack.is_empty() => {
                residue.push_str(&raw[cursor..whole.start()]);
                blocks.push(GuardedBlock {
                    guard,
                    has_else: false,
                });
                stack.push(true);
            }
            Tag::OpenIf(_) | Tag::OpenBlock => stack.push(false),
            Tag::Else => {
                if stack.len() == 1 && stack[0] {
                    if let Some(block) = blocks.last_mut() {
                        block.has_else = true;
                    }
                }
            }
            Tag::Close => match stack.pop() {
                Some(true) => cursor = whole.end(),
                Some(false) => {}
                None => return false,
            },
            Tag::Other => {}
        }
    }

    if !stack.is_empty() || blocks.is_empty() {
        return false;
    }
    residue.push_str(&raw[cursor..]);
    if !residue.trim().is_empty() {
        return false;
    }

    blocks.iter().all(|block| match block.guard {
        Some(guard) if !block.has_else => is_off(context.get(guard)),
        _ => false,
    })
}

fn is_off(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RenderingContext {
        match json!({"router": false, "typescript": true, "qiankunMode": null}) {
            Value::Object(map) => RenderingContext::from_map(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_whole_file_false_guard() {
        let raw = "{{#if router}}\nimport { createRouter } from 'vue-router'\n{{/if}}\n";
        assert!(should_skip(raw, &ctx()));
    }

    #[test]
    fn test_whole_file_missing_and_null_guard() {
        assert!(should_skip("{{#if qiankun}}x{{/if}}", &ctx()));
        assert!(should_skip("  {{#if qiankunMode}}x{{/if}}  ", &ctx()));
    }

    #[test]
    fn test_whole_file_true_guard() {
        assert!(!should_skip("{{#if typescript}}x{{/if}}", &ctx()));
    }

    #[test]
    fn test_partial_conditional_not_skipped() {
        let raw = "import App from './App'\n{{#if router}}use(router){{/if}}\nmount()\n";
        assert!(!should_skip(raw, &ctx()));
    }

    #[test]
    fn test_nested_blocks() {
        let raw = "{{#if router}}{{#if typescript}}ts{{/if}} routes{{/if}}";
        assert!(should_skip(raw, &ctx()));
    }

    #[test]
    fn test_else_branch_not_skipped() {
        let raw = "{{#if router}}with{{else}}without{{/if}}";
        assert!(!should_skip(raw, &ctx()));
    }

    #[test]
    fn test_mixed_guards_not_skipped() {
        let raw = "{{#if router}}a{{/if}}\n{{#if typescript}}b{{/if}}";
        assert!(!should_skip(raw, &ctx()));
    }

    #[test]
    fn test_whitespace_control_tags() {
        assert!(should_skip("{{~#if router~}}\nx\n{{~/if~}}", &ctx()));
    }

    #[test]
    fn test_subexpression_guard_not_skipped() {
        assert!(!should_skip("{{#if (not typescript)}}x{{/if}}", &ctx()));
    }

    #[test]
    fn test_unbalanced_not_skipped() {
        assert!(!should_skip("{{#if router}}x", &ctx()));
        assert!(!should_skip("x{{/if}}", &ctx()));
    }

    #[test]
    fn test_no_blocks_not_skipped() {
        assert!(!should_skip("", &ctx()));
        assert!(!should_skip("plain text", &ctx()));
    }
}
