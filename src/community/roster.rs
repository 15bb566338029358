use super::handle::normalize_handle;
use super::store::SupporterStore;
use crate::error::{HandleError, ShowcaseError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Supporter handles in display order. Two handles differing only in case are
/// the same supporter; the first spelling seen is kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SupporterRoster {
    handles: Vec<String>,
}

impl SupporterRoster {
    /// Remote list first, then local additions it does not already contain.
    /// A failed fetch leaves only the local list.
    pub fn from_sources(remote: Result<Vec<String>, ShowcaseError>, local: Vec<String>) -> Self {
        let remote = remote.unwrap_or_else(|e| {
            log::warn!("{e}; showing local supporters only");
            Vec::new()
        });
        let mut roster = Self::default();
        for handle in remote.into_iter().chain(local) {
            roster.add(handle);
        }
        roster
    }

    pub fn contains(&self, handle: &str) -> bool {
        let wanted = handle.to_lowercase();
        self.handles.iter().any(|h| h.to_lowercase() == wanted)
    }

    pub fn add(&mut self, handle: String) -> AddOutcome {
        if self.contains(&handle) {
            return AddOutcome::AlreadyPresent;
        }
        self.handles.push(handle);
        AddOutcome::Added
    }

    pub fn handles(&self) -> &[String] {
        &self.handles
    }

    /// Shown once the roster reaches `milestone`.
    pub fn count_label(&self, milestone: usize) -> Option<String> {
        let count = self.handles.len();
        (count >= milestone).then(|| format!("{count} visual builders and counting"))
    }
}

/// Validates a form submission and adds it to `roster`. Only a handle the
/// roster did not already hold is persisted; a failed write is logged and the
/// handle still shows for this visit.
pub fn submit(
    roster: &mut SupporterRoster,
    store: &impl SupporterStore,
    raw: &str,
) -> Result<AddOutcome, HandleError> {
    let handle = normalize_handle(raw)?;
    let outcome = roster.add(handle.clone());
    if outcome == AddOutcome::Added {
        if let Err(e) = store.append(&handle) {
            log::warn!("supporter not persisted: {e}");
        }
    }
    Ok(outcome)
}
