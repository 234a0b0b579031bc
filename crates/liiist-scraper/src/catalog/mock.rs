//! In-memory [`BrowserSession`] for crawler tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::error::CatalogError;
use super::session::{BrowserSession, Locator};

fn missing(locator: &Locator) -> CatalogError {
    CatalogError::WebDriver(format!("no such element: {locator}"))
}

#[derive(Debug, Default)]
pub(crate) struct FakeBrowser {
    counts: HashMap<Locator, usize>,
    texts: HashMap<Locator, String>,
    attrs: HashMap<(Locator, String), String>,
    /// Successful clicks left per locator; absent means every click fails.
    clicks_left: HashMap<Locator, u32>,
    /// Match-count increments applied after a successful click.
    on_click: HashMap<Locator, Vec<(Locator, usize)>>,
    /// Count polls that still report zero before the element shows up.
    hidden_polls: HashMap<Locator, u32>,
    failing_gotos: Vec<String>,
    failing_scrolls: Vec<Locator>,
    pub actions: Vec<String>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&mut self, locator: Locator) -> &mut Self {
        self.elements(locator, 1)
    }

    pub fn elements(&mut self, locator: Locator, count: usize) -> &mut Self {
        self.counts.insert(locator, count);
        self
    }

    pub fn text(&mut self, locator: Locator, text: &str) -> &mut Self {
        self.counts.entry(locator.clone()).or_insert(1);
        self.texts.insert(locator, text.to_owned());
        self
    }

    pub fn attr(&mut self, locator: Locator, name: &str, value: &str) -> &mut Self {
        self.counts.entry(locator.clone()).or_insert(1);
        self.attrs
            .insert((locator, name.to_owned()), value.to_owned());
        self
    }

    pub fn clickable(&mut self, locator: Locator, times: u32) -> &mut Self {
        self.counts.entry(locator.clone()).or_insert(1);
        self.clicks_left.insert(locator, times);
        self
    }

    pub fn on_click_add(&mut self, clicked: Locator, target: Locator, added: usize) -> &mut Self {
        self.on_click.entry(clicked).or_default().push((target, added));
        self
    }

    pub fn appears_after(&mut self, locator: Locator, polls: u32) -> &mut Self {
        self.hidden_polls.insert(locator, polls);
        self
    }

    pub fn failing_goto(&mut self, url: &str) -> &mut Self {
        self.failing_gotos.push(url.to_owned());
        self
    }

    pub fn failing_scroll(&mut self, locator: Locator) -> &mut Self {
        self.failing_scrolls.push(locator);
        self
    }

    pub fn count_actions(&self, prefix: &str) -> usize {
        self.actions.iter().filter(|a| a.starts_with(prefix)).count()
    }

    fn present(&self, locator: &Locator) -> bool {
        self.counts.get(locator).copied().unwrap_or(0) > 0
    }
}

impl BrowserSession for FakeBrowser {
    async fn goto(&mut self, url: &str) -> Result<(), CatalogError> {
        self.actions.push(format!("goto {url}"));
        if self.failing_gotos.iter().any(|u| u == url) {
            return Err(CatalogError::WebDriver(format!("navigation to {url} failed")));
        }
        Ok(())
    }

    async fn count(&mut self, locator: &Locator) -> Result<usize, CatalogError> {
        if let Some(polls) = self.hidden_polls.get_mut(locator) {
            if *polls > 0 {
                *polls -= 1;
                return Ok(0);
            }
        }
        Ok(self.counts.get(locator).copied().unwrap_or(0))
    }

    async fn text(&mut self, locator: &Locator) -> Result<String, CatalogError> {
        if !self.present(locator) {
            return Err(missing(locator));
        }
        Ok(self.texts.get(locator).cloned().unwrap_or_default())
    }

    async fn attr(
        &mut self,
        locator: &Locator,
        name: &str,
    ) -> Result<Option<String>, CatalogError> {
        if !self.present(locator) {
            return Err(missing(locator));
        }
        Ok(self.attrs.get(&(locator.clone(), name.to_owned())).cloned())
    }

    async fn click(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        let left = self.clicks_left.get_mut(locator).filter(|n| **n > 0);
        let Some(left) = left else {
            return Err(missing(locator));
        };
        *left -= 1;
        self.actions.push(format!("click {locator}"));
        if let Some(effects) = self.on_click.get(locator) {
            for (target, added) in effects.clone() {
                *self.counts.entry(target).or_insert(0) += added;
            }
        }
        Ok(())
    }

    async fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        if self.failing_scrolls.contains(locator) || !self.present(locator) {
            return Err(missing(locator));
        }
        self.actions.push(format!("scroll {locator}"));
        Ok(())
    }

    async fn send_keys(&mut self, locator: &Locator, text: &str) -> Result<(), CatalogError> {
        if !self.present(locator) {
            return Err(missing(locator));
        }
        self.actions.push(format!("type {text}"));
        Ok(())
    }

    async fn press_enter(&mut self, locator: &Locator) -> Result<(), CatalogError> {
        if !self.present(locator) {
            return Err(missing(locator));
        }
        self.actions.push("enter".to_owned());
        Ok(())
    }

    async fn close(self) -> Result<(), CatalogError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
