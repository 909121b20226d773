//! Thumbnail/original image source swapping
//!
//! Upgrading decodes the original off-screen first: a hidden clone carrying
//! the original `src` is appended next to the target, and only after
//! [`SOURCE_SWAP_DELAY_MS`] does the visible element switch over. Swapping
//! immediately makes Firefox flash an empty box. Downgrading is synchronous.

use tracing::trace;

use crate::host::DomHost;
use crate::style::StyleProp;
use crate::types::{TimerId, SOURCE_SWAP_DELAY_MS};

/// Original (high resolution) source of a zoomable image: `data-original`,
/// or the `href` of a wrapping `<a>`
pub fn original_source<H: DomHost>(host: &H, el: &H::Element) -> Option<String> {
    if let Some(original) = host.attribute(el, "data-original") {
        if !original.is_empty() {
            return Some(original);
        }
    }
    let parent = host.parent(el)?;
    if host.tag_name(&parent).eq_ignore_ascii_case("a") {
        host.attribute(&parent, "href")
    } else {
        None
    }
}

/// Source attributes captured when a target opens
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageSources {
    pub thumbnail: Option<String>,
    pub srcset: Option<String>,
    pub original: Option<String>,
}

impl ImageSources {
    pub fn capture<H: DomHost>(host: &H, el: &H::Element) -> Self {
        Self {
            thumbnail: host.attribute(el, "src"),
            srcset: host.attribute(el, "srcset"),
            original: original_source(host, el),
        }
    }
}

struct PendingSwap<E> {
    timer: TimerId,
    clone: E,
    parent: E,
}

/// Performs the delayed upgrade and the immediate downgrade
pub struct SourceSwitcher<E> {
    pending: Option<PendingSwap<E>>,
}

impl<E> Default for SourceSwitcher<E> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<E: Clone + PartialEq> SourceSwitcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer of the swap waiting to happen, if any
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|p| p.timer)
    }

    /// Start switching `el` to its original source. `timer` is used for the
    /// delayed swap; returns false when there is nothing to upgrade to.
    pub fn upgrade<H>(&mut self, host: &mut H, el: &E, sources: &ImageSources, timer: TimerId) -> bool
    where
        H: DomHost<Element = E>,
    {
        let Some(original) = sources.original.as_deref() else {
            return false;
        };

        if sources.srcset.is_some() {
            host.remove_attribute(el, "srcset");
        }

        let Some(parent) = host.parent(el) else {
            // Detached: nothing to flicker, swap right away
            host.set_attribute(el, "src", original);
            return true;
        };

        self.cancel(host);
        let clone = host.clone_node(el);
        host.set_attribute(&clone, "src", original);
        host.set_style(&clone, StyleProp::Position, "fixed");
        host.set_style(&clone, StyleProp::Visibility, "hidden");
        host.append_child(&parent, &clone);

        host.set_timeout(timer, SOURCE_SWAP_DELAY_MS);
        trace!(%timer, "source upgrade scheduled");
        self.pending = Some(PendingSwap {
            timer,
            clone,
            parent,
        });
        true
    }

    /// Finish a scheduled upgrade when its timer fires. Returns false if
    /// `timer` does not belong to the switcher.
    pub fn complete<H>(&mut self, host: &mut H, el: &E, sources: &ImageSources, timer: TimerId) -> bool
    where
        H: DomHost<Element = E>,
    {
        if self.pending_timer() != Some(timer) {
            return false;
        }
        if let Some(swap) = self.pending.take() {
            if let Some(original) = sources.original.as_deref() {
                host.set_attribute(el, "src", original);
            }
            host.remove_child(&swap.parent, &swap.clone);
        }
        true
    }

    /// Put the thumbnail back, dropping any swap still in flight
    pub fn downgrade<H>(&mut self, host: &mut H, el: &E, sources: &ImageSources)
    where
        H: DomHost<Element = E>,
    {
        self.cancel(host);
        if sources.original.is_none() {
            return;
        }
        if let Some(srcset) = sources.srcset.as_deref() {
            host.set_attribute(el, "srcset", srcset);
        }
        if let Some(thumbnail) = sources.thumbnail.as_deref() {
            host.set_attribute(el, "src", thumbnail);
        }
    }

    fn cancel<H>(&mut self, host: &mut H)
    where
        H: DomHost<Element = E>,
    {
        if let Some(swap) = self.pending.take() {
            host.clear_timeout(swap.timer);
            host.remove_child(&swap.parent, &swap.clone);
        }
    }
}
