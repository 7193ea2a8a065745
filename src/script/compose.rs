//! Script composer: orders fragments and renders the final script.
//!
//! Assembly works on fragments, not text. Each step prepends to the
//! accumulated list, mirroring how each wrap nests the previous script:
//!
//! ```text
//! custom script → style → link(files[0]) … link(files[n]) → base
//! base = wrapper → updateSize → events → observer → viewport? → updateSize()
//! ```
//!
//! Text is produced once, at the end, inside an immediately-invoked function.

use std::collections::VecDeque;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::Configuration;
use crate::debug;
use crate::embed::script::{SCOPE_JS, ScopeVars};
use crate::env::Environment;

use super::fragment::{self, Fragment, FragmentKind};

/// A composed measurement script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    kinds: Vec<FragmentKind>,
    text: String,
}

impl Script {
    fn render(fragments: VecDeque<Fragment>) -> Self {
        let kinds = fragments.iter().map(Fragment::kind).collect();
        let body = fragments
            .iter()
            .map(Fragment::body)
            .collect::<Vec<_>>()
            .join("\n");
        let text = SCOPE_JS.render(&ScopeVars { body });
        Self { kinds, text }
    }

    /// Fragment order, first to last.
    pub fn kinds(&self) -> &[FragmentKind] {
        &self.kinds
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Setup, measurement and event wiring, ending with the first measurement.
fn base(config: &Configuration, env: &Environment) -> VecDeque<Fragment> {
    let mut fragments = VecDeque::with_capacity(6);
    fragments.push_back(fragment::wrapper_setup());
    fragments.push_back(fragment::size_updater(
        config.scales_page_to_fit,
        &env.transport,
    ));
    fragments.push_back(fragment::event_wiring());
    fragments.push_back(fragment::mutation_observer());
    if let Some(meta) =
        fragment::viewport_meta(config.zoomable, config.scales_page_to_fit, env.platform)
    {
        fragments.push_back(meta);
    }
    fragments.push_back(fragment::initial_call());
    fragments
}

/// Compose the full measurement script for `config`.
pub fn compose(config: &Configuration, env: &Environment) -> Script {
    let base = base(config, env);

    // Right-to-left: the last file is wrapped first, so the first file's link
    // ends up outermost and runs first.
    let mut fragments = config.files.iter().rfold(base, |mut combined, file| {
        combined.push_front(fragment::link_element(file));
        combined
    });

    fragments.push_front(fragment::style_element(config.custom_style.as_deref()));

    if let Some(custom) = config.custom_script.as_deref().filter(|s| !s.is_empty()) {
        fragments.push_front(fragment::custom_script(custom));
    }

    debug!(
        "compose";
        "{} fragments ({} links, viewport: {})",
        fragments.len(),
        config.files.len(),
        fragments.iter().any(|f| f.kind() == FragmentKind::ViewportMeta)
    );

    Script::render(fragments)
}
