//! Group link handling.
//!
//! Whether duplicate links are allowed is a deployment choice rather than a
//! data invariant. [`LinkPolicy::Preserve`] stores links exactly as given.
//! [`LinkPolicy::Deduplicate`] compares trimmed links, rejects blank ones and
//! keeps the first occurrence of each.

use std::collections::HashSet;

/// Rejected link input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkValidationError {
    /// A link is empty once trimmed.
    #[error("link at index {index} must not be blank")]
    Blank { index: usize },
}

/// Server-side treatment of a group's link list on update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Store links as given, duplicates included.
    #[default]
    Preserve,
    /// Drop repeated links, keeping first-occurrence order.
    Deduplicate,
}

impl LinkPolicy {
    /// Choose the policy from the `dedupe_group_links` setting.
    pub fn from_dedupe_flag(dedupe: bool) -> Self {
        if dedupe {
            Self::Deduplicate
        } else {
            Self::Preserve
        }
    }

    /// Apply the policy to `links`.
    ///
    /// `Preserve` never alters or rejects input. `Deduplicate` trims each
    /// link and fails on the first blank one.
    ///
    /// # Examples
    /// ```
    /// use propdesk::domain::LinkPolicy;
    ///
    /// let links = vec!["https://x/1.jpg".to_owned(), " https://x/1.jpg".to_owned()];
    /// assert_eq!(LinkPolicy::Preserve.apply(links.clone()), Ok(links.clone()));
    /// assert_eq!(LinkPolicy::Deduplicate.apply(links).map(|l| l.len()), Ok(1));
    /// ```
    pub fn apply(self, links: Vec<String>) -> Result<Vec<String>, LinkValidationError> {
        if self == Self::Preserve {
            return Ok(links);
        }
        let mut seen = HashSet::new();
        let mut normalised = Vec::with_capacity(links.len());
        for (index, link) in links.into_iter().enumerate() {
            let trimmed = link.trim();
            if trimmed.is_empty() {
                return Err(LinkValidationError::Blank { index });
            }
            if !seen.insert(trimmed.to_owned()) {
                continue;
            }
            normalised.push(trimmed.to_owned());
        }
        Ok(normalised)
    }
}
