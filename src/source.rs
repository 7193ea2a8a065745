//! Source reducer: what the host renders, and how the script gets there.
//!
//! Inline markup carries the script itself, appended in a trailing
//! `<script>` element. Anything else is rendered as-is and the script is
//! handed back for the host's own injection mechanism.

use serde::Serialize;

use crate::config::{Configuration, Source};
use crate::debug;
use crate::embed::html::{INJECTED_HTML, InjectedVars};
use crate::env::Environment;
use crate::script::{Script, compose};

/// Output handed to the host. Rebuilt on every configuration change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    pub current_source: Source,
    /// Present only when the source cannot carry the script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
}

/// Resolve the renderable source for `config`.
pub fn reduce(config: &Configuration, env: &Environment) -> Derived {
    let script = compose(config, env);

    match &config.source {
        Source::Html { html, base_url } if !html.is_empty() => {
            debug!("source"; "embedding script into {} bytes of markup", html.len());
            let html = INJECTED_HTML.render(&InjectedVars {
                html: html.clone(),
                script: script.into_string(),
            });
            Derived {
                current_source: Source::Html {
                    html,
                    base_url: base_url.clone(),
                },
                script: None,
            }
        }
        source => {
            debug!("source"; "opaque source, script delivered separately");
            Derived {
                current_source: source.clone(),
                script: Some(script),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileDescriptor;
    use crate::env::{Platform, Transport};

    fn env() -> Environment {
        Environment::new(Platform::Ios, Transport::default())
    }

    #[test]
    fn test_inline_markup_embeds_script() {
        let config = Configuration::new(Source::Html {
            html: "<p>Hello</p>".into(),
            base_url: Some("https://example.com/".into()),
        });
        let derived = reduce(&config, &env());
        assert!(derived.script.is_none());

        let Source::Html { html, base_url } = derived.current_source else {
            panic!("expected inline source");
        };
        assert_eq!(base_url.as_deref(), Some("https://example.com/"));
        assert!(html.starts_with("<p>Hello</p>\n<script>\n(function () {"));
        assert!(html.ends_with("})();\n</script>"));
        assert!(html.contains(compose(&config, &env()).as_str()));
    }

    #[test]
    fn test_custom_script_before_wrapper_in_markup() {
        let config =
            Configuration::new(Source::html("<div>x</div>")).with_custom_script("var early = 1;");
        let derived = reduce(&config, &env());
        let Source::Html { html, .. } = derived.current_source else {
            panic!("expected inline source");
        };
        let script_start = html.find("<script>").unwrap();
        let custom = html.find("var early = 1;").unwrap();
        let wrapper = html.find("getElementById('rnahw-wrapper')").unwrap();
        assert!(script_start < custom && custom < wrapper);
    }

    #[test]
    fn test_remote_source_returns_script() {
        let source = Source::uri("https://example.com/embed");
        let config = Configuration::new(source.clone())
            .with_files(vec![FileDescriptor::stylesheet("a.css")]);
        let derived = reduce(&config, &env());

        assert_eq!(derived.current_source, source);
        let script = derived.script.unwrap();
        assert_eq!(script, compose(&config, &env()));
        assert!(script.as_str().contains("link.href = 'a.css';"));
    }

    #[test]
    fn test_empty_markup_is_opaque() {
        let config = Configuration::new(Source::html(""));
        let derived = reduce(&config, &env());
        assert_eq!(derived.current_source, Source::html(""));
        assert!(derived.script.is_some());
    }

    #[test]
    fn test_derived_json_shape() {
        let config = Configuration::new(Source::uri("https://example.com"));
        let json = serde_json::to_value(reduce(&config, &env())).unwrap();
        assert_eq!(json["currentSource"]["uri"], "https://example.com");
        assert!(json["script"].as_str().unwrap().starts_with("(function () {"));

        let config = Configuration::new(Source::html("<p/>"));
        let json = serde_json::to_value(reduce(&config, &env())).unwrap();
        assert!(json.get("script").is_none());
        assert!(json["currentSource"]["html"].as_str().unwrap().contains("<script>"));
    }
}
