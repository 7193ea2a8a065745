//! Script fragment builders.
//!
//! Each builder renders one embedded template into a [`Fragment`]. Builders
//! are pure: the same arguments always give the same text.

use crate::config::FileDescriptor;
use crate::embed::script::{
    EVENTS_JS, INITIAL_JS, LINK_JS, LinkVars, OBSERVER_JS, STYLE_JS, StyleVars, UPDATE_SIZE_JS,
    UpdateSizeVars, VIEWPORT_JS, ViewportVars, WRAPPER_JS, WrapperVars,
};
use crate::env::{Platform, Transport};

use super::escape::single_quoted;

/// Id of the element wrapping the body content.
pub const WRAPPER_ID: &str = "rnahw-wrapper";
/// Delay before retrying when the transport is not there yet.
pub const TRANSPORT_RETRY_MS: u32 = 200;
/// Base delay of the stabilization loop.
pub const REFRESH_DELAY_MS: u32 = 1000;
/// Consecutive equal heights after which the stabilization loop stops.
pub const MAX_STABLE_READS: u32 = 5;

/// Zero body margin and padding, always injected before any custom style.
pub const BODY_STYLE: &str = "\nbody {\n  margin: 0;\n  padding: 0;\n}\n";

/// What a fragment does. Used to inspect the order of a composed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    CustomScript,
    Style,
    Link,
    WrapperSetup,
    SizeUpdater,
    EventWiring,
    MutationObserver,
    ViewportMeta,
    InitialCall,
}

/// One named block of script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    kind: FragmentKind,
    body: String,
}

impl Fragment {
    fn new(kind: FragmentKind, body: String) -> Self {
        Self { kind, body }
    }

    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Wrap all body children in `#rnahw-wrapper`, unless already wrapped.
pub fn wrapper_setup() -> Fragment {
    let body = WRAPPER_JS.render(&WrapperVars {
        wrapper_id: WRAPPER_ID,
    });
    Fragment::new(FragmentKind::WrapperSetup, body)
}

/// Define `updateSize` and its stabilization loop.
pub fn size_updater(scales_page_to_fit: bool, transport: &Transport) -> Fragment {
    let scale = if scales_page_to_fit {
        "screen.width / window.innerWidth"
    } else {
        "1"
    };
    let body = UPDATE_SIZE_JS.render(&UpdateSizeVars {
        scale,
        max_stable_reads: MAX_STABLE_READS,
        refresh_delay_ms: REFRESH_DELAY_MS,
        transport_retry_ms: TRANSPORT_RETRY_MS,
        transport_object: single_quoted(&transport.object).into_owned(),
        transport_method: single_quoted(&transport.method).into_owned(),
    });
    Fragment::new(FragmentKind::SizeUpdater, body)
}

/// Re-measure on window load and resize.
pub fn event_wiring() -> Fragment {
    Fragment::new(FragmentKind::EventWiring, EVENTS_JS.render(&()))
}

/// Re-measure on any DOM mutation.
pub fn mutation_observer() -> Fragment {
    Fragment::new(FragmentKind::MutationObserver, OBSERVER_JS.render(&()))
}

/// Viewport `<meta>`, or `None` under scale-to-fit or on a platform that
/// manages the viewport itself.
pub fn viewport_meta(
    zoomable: bool,
    scales_page_to_fit: bool,
    platform: Platform,
) -> Option<Fragment> {
    if scales_page_to_fit || platform.manages_viewport() {
        return None;
    }
    let body = VIEWPORT_JS.render(&ViewportVars { zoomable });
    Some(Fragment::new(FragmentKind::ViewportMeta, body))
}

/// First measurement, right after setup.
pub fn initial_call() -> Fragment {
    Fragment::new(FragmentKind::InitialCall, INITIAL_JS.render(&()))
}

/// Create and append one `<link>` to the head.
pub fn link_element(file: &FileDescriptor) -> Fragment {
    let body = LINK_JS.render(&LinkVars {
        rel: single_quoted(&file.rel).into_owned(),
        mime_type: single_quoted(&file.mime_type).into_owned(),
        href: single_quoted(&file.href).into_owned(),
    });
    Fragment::new(FragmentKind::Link, body)
}

/// Inline `<style>` holding the baseline body style plus `custom_style`.
pub fn style_element(custom_style: Option<&str>) -> Fragment {
    let mut stylesheet = String::from(BODY_STYLE);
    if let Some(custom) = custom_style {
        stylesheet.push_str(custom);
    }
    let body = STYLE_JS.render(&StyleVars {
        stylesheet: single_quoted(&stylesheet).into_owned(),
    });
    Fragment::new(FragmentKind::Style, body)
}

/// The caller's script, terminated so the next fragment starts a statement.
pub fn custom_script(script: &str) -> Fragment {
    Fragment::new(FragmentKind::CustomScript, format!("{script}\n;"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_setup_checks_flag_first() {
        let fragment = wrapper_setup();
        let body = fragment.body();
        let lookup = body.find("getElementById('rnahw-wrapper')").unwrap();
        let flag = body.find("if (!wrapped)").unwrap();
        let create = body.find("createElement('div')").unwrap();
        assert!(lookup < flag && flag < create);
    }

    #[test]
    fn test_size_updater_scale() {
        let plain = size_updater(false, &Transport::default());
        assert!(plain.body().contains("var scale = 1;"));

        let fit = size_updater(true, &Transport::default());
        assert!(fit.body().contains("var scale = screen.width / window.innerWidth;"));
    }

    #[test]
    fn test_size_updater_measurements() {
        let body = size_updater(false, &Transport::default()).body().to_string();
        for metric in [
            "document.documentElement.clientHeight",
            "document.documentElement.scrollHeight",
            "document.body.clientHeight",
            "document.body.scrollHeight",
        ] {
            assert!(body.contains(metric), "missing {metric}");
        }
        assert!(body.contains("wrapper.offsetWidth || document.documentElement.offsetWidth"));
        assert!(body.contains("var needScale = width > screen.width;"));
    }

    #[test]
    fn test_size_updater_stabilization_loop() {
        let body = size_updater(false, &Transport::default()).body().to_string();
        assert!(body.contains("var maxHeightTheSameTimes = 5;"));
        assert!(body.contains("var forceRefreshDelay = 1000;"));
        assert!(body.contains("heightTheSameTimes = 1;"));
        assert!(body.contains("heightTheSameTimes * forceRefreshDelay"));
        // Cancel comes before any reschedule.
        let cancel = body.find("refreshTimer.cancel();").unwrap();
        let schedule = body.find("refreshTimer.schedule(").unwrap();
        assert!(cancel < schedule);
    }

    #[test]
    fn test_size_updater_transport_retry() {
        let body = size_updater(false, &Transport::ipc()).body().to_string();
        assert!(body.contains("window['ipc']"));
        assert!(body.contains("transport['postMessage']"));
        assert!(body.contains("setTimeout(updateSize, 200);"));
    }

    #[test]
    fn test_size_updater_declares_locals() {
        let body = size_updater(false, &Transport::default()).body().to_string();
        assert!(body.contains("var height = Math.max("));
        assert!(body.contains("var width = wrapper.offsetWidth"));
    }

    #[test]
    fn test_event_wiring() {
        let fragment = event_wiring();
        assert_eq!(fragment.kind(), FragmentKind::EventWiring);
        let body = fragment.body();
        let load = body.find("window.addEventListener('load', updateSize);").unwrap();
        let resize = body.find("window.addEventListener('resize', updateSize);").unwrap();
        assert!(load < resize);
    }

    #[test]
    fn test_mutation_observer() {
        let fragment = mutation_observer();
        assert_eq!(fragment.kind(), FragmentKind::MutationObserver);
        let body = fragment.body();
        assert!(body.contains("window.MutationObserver || window.WebKitMutationObserver"));
        assert!(body.contains("new MutationObserver(updateSize)"));
        assert!(body.contains("observer.observe(document, {"));
        assert!(body.contains("subtree: true"));
        assert!(body.contains("attributes: true"));
    }

    #[test]
    fn test_viewport_meta() {
        let meta = viewport_meta(false, false, Platform::Ios).unwrap();
        assert!(meta.body().contains("user-scalable=no"));
        assert!(meta.body().contains("setAttribute('name', 'viewport')"));

        let meta = viewport_meta(true, false, Platform::Other).unwrap();
        assert!(meta.body().contains("user-scalable=yes"));

        assert!(viewport_meta(false, true, Platform::Ios).is_none());
        assert!(viewport_meta(false, false, Platform::Android).is_none());
    }

    #[test]
    fn test_link_element() {
        let link = link_element(&FileDescriptor::stylesheet("a.css"));
        assert_eq!(link.kind(), FragmentKind::Link);
        assert!(link.body().contains("link.rel = 'stylesheet';"));
        assert!(link.body().contains("link.type = 'text/css';"));
        assert!(link.body().contains("link.href = 'a.css';"));
        assert!(link.body().contains("document.head.appendChild(link);"));
    }

    #[test]
    fn test_style_element_escapes() {
        let style = style_element(Some("p { font-family: 'Inter'; }\n"));
        let expected = "styleElement.innerHTML = '\\nbody {\\n  margin: 0;\\n  padding: 0;\\n}\\np { font-family: \\'Inter\\'; }\\n';";
        assert!(style.body().contains(expected), "{}", style.body());
    }

    #[test]
    fn test_style_element_baseline_only() {
        let style = style_element(None);
        assert!(style.body().contains(
            "styleElement.innerHTML = '\\nbody {\\n  margin: 0;\\n  padding: 0;\\n}\\n';"
        ));
    }

    #[test]
    fn test_custom_script_terminated() {
        let fragment = custom_script("window.ready = true");
        assert_eq!(fragment.body(), "window.ready = true\n;");
    }
}
