use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::engine::error::PollError;

/// Element whose content the poller replaces each cycle.
pub const CHARACTER_TABLE_ID: &str = "characterTable";

/// Somewhere rendered HTML can be placed, addressed by element id.
pub trait RenderTarget: Send {
    fn replace_content(&mut self, element_id: &str, html: &str) -> Result<(), PollError>;
}

/// In-memory stand-in for the page: element id -> current inner HTML.
/// Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct ContainerTarget {
    elements: Arc<Mutex<HashMap<String, String>>>,
}

impl ContainerTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, element_id: &str) -> Option<String> {
        self.elements
            .lock()
            .ok()
            .and_then(|e| e.get(element_id).cloned())
    }
}

impl RenderTarget for ContainerTarget {
    fn replace_content(&mut self, element_id: &str, html: &str) -> Result<(), PollError> {
        if let Ok(mut elements) = self.elements.lock() {
            elements.insert(element_id.to_string(), html.to_string());
        }
        Ok(())
    }
}

/// Writes `<dir>/<element_id>.html`, replacing the file each time.
#[derive(Debug, Clone)]
pub struct HtmlFileTarget {
    dir: PathBuf,
}

impl HtmlFileTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, element_id: &str) -> PathBuf {
        self.dir.join(format!("{}.html", element_id))
    }
}

impl RenderTarget for HtmlFileTarget {
    fn replace_content(&mut self, element_id: &str, html: &str) -> Result<(), PollError> {
        fs::create_dir_all(&self.dir)?;
        let page = format!(
            "<!DOCTYPE html>\n<html>\n<body>\n<table id=\"{id}\">{html}\n</table>\n</body>\n</html>\n",
            id = element_id,
            html = html,
        );
        fs::write(self.path_for(element_id), page)?;
        Ok(())
    }
}

/// The set of places one cycle renders into. The primary decides whether a
/// render succeeded; mirrors are best-effort copies whose failures are only
/// logged.
pub struct RenderTargets {
    primary: Box<dyn RenderTarget>,
    mirrors: Vec<Box<dyn RenderTarget>>,
}

impl RenderTargets {
    pub fn new(primary: impl RenderTarget + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            mirrors: Vec::new(),
        }
    }

    pub fn with_mirror(mut self, mirror: impl RenderTarget + 'static) -> Self {
        self.mirrors.push(Box::new(mirror));
        self
    }

    /// Replaces the primary first. If that fails, no mirror is touched.
    pub fn replace_content(&mut self, element_id: &str, html: &str) -> Result<(), PollError> {
        self.primary.replace_content(element_id, html)?;

        for mirror in self.mirrors.iter_mut() {
            if let Err(e) = mirror.replace_content(element_id, html) {
                warn!(element_id, error = %e, "mirror render failed");
            }
        }

        Ok(())
    }
}
