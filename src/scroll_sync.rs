//! Scroll-sync group membership.
//!
//! The controller only announces which scrollable regions belong together;
//! mirroring scroll offsets is left to whoever implements [`ScrollSync`].

use std::collections::BTreeMap;

/// Handle returned by [`ScrollSync::register`]. Passing it back to
/// [`ScrollSync::unregister`] removes exactly that registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrollSyncToken {
    pub group: String,
    seq: u64,
}

pub trait ScrollSync {
    /// Adds `region` to `group`, creating the group on first use.
    fn register(&mut self, group: &str, region: &str) -> ScrollSyncToken;

    /// Removes a registration. Unknown tokens are ignored.
    fn unregister(&mut self, token: &ScrollSyncToken);

    /// Regions currently registered in `group`, in registration order.
    fn members(&self, group: &str) -> Vec<String>;
}

#[derive(Debug, Default)]
pub struct ScrollSyncRegistry {
    groups: BTreeMap<String, Vec<(u64, String)>>,
    next_seq: u64,
}

impl ScrollSyncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl ScrollSync for ScrollSyncRegistry {
    fn register(&mut self, group: &str, region: &str) -> ScrollSyncToken {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.groups
            .entry(group.to_string())
            .or_default()
            .push((seq, region.to_string()));
        tracing::debug!(group, region, "scroll region registered");
        ScrollSyncToken {
            group: group.to_string(),
            seq,
        }
    }

    fn unregister(&mut self, token: &ScrollSyncToken) {
        let Some(members) = self.groups.get_mut(&token.group) else {
            return;
        };
        members.retain(|(seq, _)| *seq != token.seq);
        if members.is_empty() {
            self.groups.remove(&token.group);
        }
    }

    fn members(&self, group: &str) -> Vec<String> {
        self.groups
            .get(group)
            .map(|members| members.iter().map(|(_, region)| region.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_created_on_demand_and_dropped_when_empty() {
        let mut reg = ScrollSyncRegistry::new();
        let a = reg.register("logs", "a");
        let b = reg.register("logs", "b");
        assert_eq!(reg.members("logs"), vec!["a", "b"]);
        reg.unregister(&a);
        assert_eq!(reg.members("logs"), vec!["b"]);
        reg.unregister(&b);
        assert_eq!(reg.group_count(), 0);
    }

    #[test]
    fn unregister_is_specific_to_the_token() {
        let mut reg = ScrollSyncRegistry::new();
        let first = reg.register("g", "same");
        reg.register("g", "same");
        reg.unregister(&first);
        reg.unregister(&first);
        assert_eq!(reg.members("g"), vec!["same"]);
    }
}
