// SPDX-License-Identifier: MPL-2.0
//! The engine: an explicit context object holding the current language,
//! the loaded bundle, the document, and the host adapters.
//!
//! One engine per document. Embedding code constructs it with a
//! [`PreferenceStore`], a [`TranslationSource`], and the [`Document`] to
//! paint, then calls [`Engine::init`] once and [`Engine::switch_language`]
//! on demand. There is no process-wide state; everything the components
//! need is threaded through this struct.
//!
//! # Concurrency
//!
//! Execution is single-threaded and cooperative: the only suspension
//! points are the bundle fetches. Within one switch the documented step
//! sequence runs strictly in order. Overlapping switches are not
//! serialized; instead every switch carries a generation stamp taken
//! when it commits, and a switch whose load finishes after a newer one
//! has committed discards its bundle ([`SwitchOutcome::Superseded`])
//! rather than painting stale text.

use log::{debug, error, warn};

use crate::apply::apply_translations;
use crate::bundle::{Bundle, Resolution};
use crate::config::EngineConfig;
use crate::detect::{detect_language, DetectionInputs};
use crate::frames::{FrameHub, FrameSender};
use crate::loader::{load_bundle, TranslationSource};
use crate::page::{self, Document};
use crate::storage::PreferenceStore;
use crate::switcher::bind_switch_controls;

/// Payload of the language-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub lang: String,
}

/// Outcome of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The switch ran to completion and the document was repainted.
    Applied,
    /// The target code is outside the supported set; nothing changed.
    Rejected,
    /// A newer switch committed while this one's bundle was loading; the
    /// late result was discarded.
    Superseded,
}

/// A switch whose synchronous steps have committed and whose bundle load
/// has not yet run. Produced by [`Engine::begin_switch`].
#[derive(Debug)]
pub struct PendingSwitch {
    lang: String,
    generation: u64,
}

pub struct Engine<S, T>
where
    S: PreferenceStore,
    T: TranslationSource,
{
    config: EngineConfig,
    store: S,
    source: T,
    doc: Document,
    frames: FrameHub,
    origin: String,
    current: String,
    bundle: Option<Bundle>,
    generation: u64,
    host_locale: Option<String>,
    listeners: Vec<Box<dyn Fn(&LanguageChanged)>>,
}

impl<S, T> Engine<S, T>
where
    S: PreferenceStore,
    T: TranslationSource,
{
    pub fn new(config: EngineConfig, store: S, source: T, doc: Document) -> Self {
        let origin = doc.origin();
        let frames = FrameHub::new(config.allowed_origins.clone());
        let current = config.default_language.clone();
        Self {
            config,
            store,
            source,
            doc,
            frames,
            origin,
            current,
            bundle: None,
            generation: 0,
            host_locale: sys_locale::get_locale(),
            listeners: Vec::new(),
        }
    }

    /// Overrides the host locale consulted by detection. Tests and
    /// embeddings that know better than `sys-locale` use this.
    #[must_use]
    pub fn with_host_locale(mut self, locale: Option<&str>) -> Self {
        self.host_locale = locale.map(str::to_string);
        self
    }

    pub fn current_lang(&self) -> &str {
        &self.current
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn bundle(&self) -> Option<&Bundle> {
        self.bundle.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves a key path to display text. With no bundle loaded, or on
    /// any resolution failure, the key path renders verbatim.
    pub fn t(&self, key_path: &str) -> String {
        match &self.bundle {
            Some(bundle) => match bundle.resolve(key_path) {
                Resolution::Resolved(text) => text,
                Resolution::Missing => key_path.to_string(),
            },
            None => key_path.to_string(),
        }
    }

    /// Runs detection against a fresh snapshot of the environment: the
    /// URL query parameter, the persisted preference, the host locale.
    pub fn detect(&self) -> String {
        detect_language(
            &self.config,
            DetectionInputs {
                query_lang: self.doc.query_param(&self.config.query_param),
                stored: self.store.get(&self.config.storage_key),
                host_locale: self.host_locale.clone(),
            },
        )
    }

    /// Startup: detect, load, paint, bind. Commits no durable state;
    /// only an explicit switch persists the preference or rewrites the
    /// URL.
    pub async fn init(&mut self) {
        let lang = self.detect();
        debug!("initializing with language '{lang}'");
        self.current = lang.clone();
        self.doc.set_lang(&lang);
        self.generation += 1;
        self.bundle = load_bundle(&self.source, &self.config, &lang).await;
        apply_translations(&mut self.doc, self.bundle.as_ref());
        bind_switch_controls(&mut self.doc, &self.current);
    }

    /// Registers a listener for the language-changed notification fired
    /// after every applied switch.
    pub fn on_language_changed(&mut self, listener: impl Fn(&LanguageChanged) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handle other frames use to post language changes to this engine.
    pub fn mailbox(&self) -> FrameSender {
        self.frames.mailbox()
    }

    /// Registers an embedded frame to notify on every applied switch.
    pub fn connect_frame(&mut self, origin: &str, sender: FrameSender) {
        self.frames.connect(origin, sender);
    }

    /// Validates the target and commits the synchronous half of a switch:
    /// current language, persisted preference, in-place URL rewrite, and
    /// the generation stamp. Returns `None` (no state change) for codes
    /// outside the supported set.
    pub fn begin_switch(&mut self, lang: &str) -> Option<PendingSwitch> {
        if !self.config.is_supported(lang) {
            warn!("ignoring switch to unsupported language '{lang}'");
            return None;
        }

        self.current = lang.to_string();
        if let Err(err) = self.store.set(&self.config.storage_key, lang) {
            error!("failed to persist language preference: {err}");
        }
        let param = self.config.query_param.clone();
        self.doc.replace_query_param(&param, lang);
        self.generation += 1;

        Some(PendingSwitch {
            lang: lang.to_string(),
            generation: self.generation,
        })
    }

    /// Finishes a switch: load, stale check, repaint, rebind, document
    /// language attribute, listener and frame notification.
    pub async fn complete_switch(&mut self, pending: PendingSwitch) -> SwitchOutcome {
        let loaded = load_bundle(&self.source, &self.config, &pending.lang).await;
        if pending.generation != self.generation {
            debug!("discarding superseded switch to '{}'", pending.lang);
            return SwitchOutcome::Superseded;
        }

        self.bundle = loaded;
        apply_translations(&mut self.doc, self.bundle.as_ref());
        bind_switch_controls(&mut self.doc, &self.current);
        self.doc.set_lang(&pending.lang);

        let event = LanguageChanged {
            lang: pending.lang.clone(),
        };
        for listener in &self.listeners {
            listener(&event);
        }
        self.frames.broadcast(&self.origin, &pending.lang);

        SwitchOutcome::Applied
    }

    /// The end-to-end switch: validate → commit → persist → URL rewrite →
    /// load → apply → rebind → document language → notify.
    pub async fn switch_language(&mut self, lang: &str) -> SwitchOutcome {
        match self.begin_switch(lang) {
            Some(pending) => self.complete_switch(pending).await,
            None => SwitchOutcome::Rejected,
        }
    }

    /// Click entry point for a bound switch control. `None` when no
    /// control in the document carries `code`.
    pub async fn click_switch(&mut self, code: &str) -> Option<SwitchOutcome> {
        if !self.doc.any(|el| el.attr(page::ATTR_SWITCH) == Some(code)) {
            return None;
        }
        Some(self.switch_language(code).await)
    }

    /// Change entry point for the dropdown. `None` when the document has
    /// no `lang-select` element.
    pub async fn select_change(&mut self, value: &str) -> Option<SwitchOutcome> {
        self.doc.element_by_id(page::SELECT_ID)?;
        Some(self.switch_language(value).await)
    }

    /// Drains inbound frame messages and performs one switch per accepted
    /// message. Codes are re-validated by the switch itself.
    pub async fn pump_frames(&mut self) {
        for envelope in self.frames.drain() {
            debug!(
                "frame message from '{}': switching to '{}'",
                envelope.origin, envelope.message.lang
            );
            let _ = self.switch_language(&envelope.message.lang).await;
        }
    }
}
