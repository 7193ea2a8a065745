//! Embedded script and markup templates.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed slot injection
//! - `script` - Measurement script fragments (`script/*.js`)
//! - `html` - Markup wrapper for inline sources (`html/injected.html`)
//!
//! Every template is a plain source file with `__NAME__` slots. Slots are
//! filled in one pass by [`fill_slots`], so user text substituted into one slot
//! can never be mistaken for another slot.
//!
//! # Usage
//!
//! ```ignore
//! use embed::script::{VIEWPORT_JS, ViewportVars};
//!
//! let js = VIEWPORT_JS.render(&ViewportVars { zoomable: false });
//! assert!(js.contains("user-scalable=no"));
//! ```

mod template;

pub use template::{Template, TemplateVars, fill_slots};

pub mod script {
    use super::{Template, TemplateVars, fill_slots};

    /// Variables for wrapper.js.
    pub struct WrapperVars {
        pub wrapper_id: &'static str,
    }

    impl TemplateVars for WrapperVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(content, &[("__WRAPPER_ID__", self.wrapper_id)])
        }
    }

    /// Moves body children into the measurement wrapper (once).
    pub const WRAPPER_JS: Template<WrapperVars> =
        Template::new(include_str!("script/wrapper.js"));

    /// Variables for update_size.js.
    pub struct UpdateSizeVars {
        /// Scale expression: `1` or `screen.width / window.innerWidth`.
        pub scale: &'static str,
        pub max_stable_reads: u32,
        pub refresh_delay_ms: u32,
        pub transport_retry_ms: u32,
        /// Already escaped for a single-quoted literal.
        pub transport_object: String,
        /// Already escaped for a single-quoted literal.
        pub transport_method: String,
    }

    impl TemplateVars for UpdateSizeVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(
                content,
                &[
                    ("__SCALE__", self.scale),
                    ("__MAX_STABLE_READS__", &self.max_stable_reads.to_string()),
                    ("__REFRESH_DELAY_MS__", &self.refresh_delay_ms.to_string()),
                    (
                        "__TRANSPORT_RETRY_MS__",
                        &self.transport_retry_ms.to_string(),
                    ),
                    ("__TRANSPORT_OBJECT__", &self.transport_object),
                    ("__TRANSPORT_METHOD__", &self.transport_method),
                ],
            )
        }
    }

    /// `updateSize` with the stabilization loop.
    pub const UPDATE_SIZE_JS: Template<UpdateSizeVars> =
        Template::new(include_str!("script/update_size.js"));

    /// Load and resize listeners.
    pub const EVENTS_JS: Template<()> = Template::new(include_str!("script/events.js"));

    /// Mutation observer over the whole document.
    pub const OBSERVER_JS: Template<()> = Template::new(include_str!("script/observer.js"));

    /// First measurement.
    pub const INITIAL_JS: Template<()> = Template::new(include_str!("script/initial.js"));

    /// Variables for viewport.js.
    pub struct ViewportVars {
        pub zoomable: bool,
    }

    impl TemplateVars for ViewportVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(
                content,
                &[(
                    "__USER_SCALABLE__",
                    if self.zoomable { "yes" } else { "no" },
                )],
            )
        }
    }

    /// Viewport `<meta>` creation.
    pub const VIEWPORT_JS: Template<ViewportVars> =
        Template::new(include_str!("script/viewport.js"));

    /// Variables for link.js. Values are already escaped.
    pub struct LinkVars {
        pub rel: String,
        pub mime_type: String,
        pub href: String,
    }

    impl TemplateVars for LinkVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(
                content,
                &[
                    ("__REL__", &self.rel),
                    ("__TYPE__", &self.mime_type),
                    ("__HREF__", &self.href),
                ],
            )
        }
    }

    /// One `<link>` appended to the head.
    pub const LINK_JS: Template<LinkVars> =
        Template::new(include_str!("script/link.js"));

    /// Variables for style.js. The stylesheet is already escaped.
    pub struct StyleVars {
        pub stylesheet: String,
    }

    impl TemplateVars for StyleVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(content, &[("__STYLE__", &self.stylesheet)])
        }
    }

    /// Inline `<style>` appended to the head.
    pub const STYLE_JS: Template<StyleVars> =
        Template::new(include_str!("script/style.js"));

    /// Variables for scope.js.
    pub struct ScopeVars {
        pub body: String,
    }

    impl TemplateVars for ScopeVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(content, &[("__BODY__", &self.body)])
        }
    }

    /// Immediately-invoked function keeping script locals out of the page scope.
    pub const SCOPE_JS: Template<ScopeVars> =
        Template::new(include_str!("script/scope.js"));
}

pub mod html {
    use super::{Template, TemplateVars, fill_slots};

    /// Variables for injected.html.
    pub struct InjectedVars {
        pub html: String,
        pub script: String,
    }

    impl TemplateVars for InjectedVars {
        fn apply(&self, content: &str) -> String {
            fill_slots(
                content,
                &[("__HTML__", &self.html), ("__SCRIPT__", &self.script)],
            )
        }
    }

    /// Inline markup followed by the measurement script.
    pub const INJECTED_HTML: Template<InjectedVars> =
        Template::new(include_str!("html/injected.html"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_template() {
        let rendered = script::VIEWPORT_JS.render(&script::ViewportVars { zoomable: true });
        assert!(rendered.contains("user-scalable=yes"));
        assert!(!rendered.contains("__USER_SCALABLE__"));
    }

    #[test]
    fn test_update_size_template_slots() {
        let rendered = script::UPDATE_SIZE_JS.render(&script::UpdateSizeVars {
            scale: "1",
            max_stable_reads: 5,
            refresh_delay_ms: 1000,
            transport_retry_ms: 200,
            transport_object: "ipc".to_string(),
            transport_method: "postMessage".to_string(),
        });
        assert!(rendered.contains("var scale = 1;"));
        assert!(rendered.contains("var maxHeightTheSameTimes = 5;"));
        assert!(rendered.contains("var forceRefreshDelay = 1000;"));
        assert!(rendered.contains("setTimeout(updateSize, 200);"));
        assert!(rendered.contains("window['ipc']"));
        assert!(!rendered.contains("__TRANSPORT_"));
        assert!(!rendered.contains("__SCALE__"));
    }

    #[test]
    fn test_injected_html_keeps_user_markers() {
        let rendered = html::INJECTED_HTML.render(&html::InjectedVars {
            html: "<p>__SCRIPT__</p>".to_string(),
            script: "run();".to_string(),
        });
        assert_eq!(rendered, "<p>__SCRIPT__</p>\n<script>\nrun();\n</script>");
    }
}
