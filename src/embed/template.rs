//! Template types for typed slot injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Templates without slots render verbatim.
impl TemplateVars for () {
    fn apply(&self, content: &str) -> String {
        content.to_string()
    }
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    /// Render the template, trimming the trailing newline of the source file.
    pub fn render(&self, vars: &V) -> String {
        let mut rendered = vars.apply(self.content);
        rendered.truncate(rendered.trim_end().len());
        rendered
    }
}

/// Fill `__NAME__` slots in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a value that happens to contain
/// another slot name (user markup, user script) is copied through untouched.
/// Unknown `__` sequences are kept as-is.
pub fn fill_slots(content: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    'scan: while let Some(pos) = rest.find("__") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        for (name, value) in slots {
            if let Some(after) = tail.strip_prefix(name) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push_str("__");
        rest = &tail[2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_slots_single_pass() {
        let filled = fill_slots(
            "a=__A__; b=__B__;",
            &[("__A__", "__B__"), ("__B__", "2")],
        );
        assert_eq!(filled, "a=__B__; b=2;");
    }

    #[test]
    fn test_fill_slots_unknown_marker_kept() {
        let filled = fill_slots("x.__proto__ = __V__", &[("__V__", "1")]);
        assert_eq!(filled, "x.__proto__ = 1");
    }

    #[test]
    fn test_render_trims_trailing_newline() {
        const T: Template<()> = Template::new("updateSize();\n\n");
        assert_eq!(T.render(&()), "updateSize();");
    }
}
