//! Cluster membership as seen by the dashboard.
//!
//! Only the current leader is ever looked up. [`MemberList`] is a local view
//! fed by heartbeats, used when the agent has no external membership layer.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub name: String,
    pub addr: String,
}

impl Member {
    pub fn new(name: impl Into<String>, addr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addr: addr.into(),
        }
    }
}

#[async_trait]
pub trait Membership: Send + Sync {
    /// The member currently acting as scheduling coordinator, if one is known.
    async fn current_leader(&self) -> Result<Option<Member>>;
}

#[derive(Debug, Clone)]
struct MemberState {
    member: Member,
    last_heartbeat: Instant,
}

impl MemberState {
    fn is_alive(&self, timeout_ms: u64) -> bool {
        self.last_heartbeat.elapsed().as_millis() < timeout_ms as u128
    }
}

#[derive(Debug, Default)]
struct Inner {
    members: HashMap<String, MemberState>,
    leader: Option<String>,
}

/// Heartbeat-driven member table with an externally elected leader
#[derive(Debug)]
pub struct MemberList {
    inner: RwLock<Inner>,
    member_timeout_ms: u64,
}

impl MemberList {
    pub fn new(member_timeout_ms: u64) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            member_timeout_ms,
        }
    }

    /// Register a member, or refresh it if it is already known
    pub async fn join(&self, member: Member) {
        let mut inner = self.inner.write().await;
        tracing::info!(member = %member.name, addr = %member.addr, "Member joined");
        inner.members.insert(
            member.name.clone(),
            MemberState {
                member,
                last_heartbeat: Instant::now(),
            },
        );
    }

    /// Returns false if the member is unknown
    pub async fn heartbeat(&self, name: &str) -> bool {
        let mut inner = self.inner.write().await;
        match inner.members.get_mut(name) {
            Some(state) => {
                state.last_heartbeat = Instant::now();
                true
            }
            None => false,
        }
    }

    pub async fn set_leader(&self, name: Option<String>) {
        let mut inner = self.inner.write().await;
        tracing::info!(leader = ?name, "Leader changed");
        inner.leader = name;
    }

    /// Names of members whose heartbeat is within the timeout
    pub async fn alive_members(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut alive: Vec<String> = inner
            .members
            .values()
            .filter(|s| s.is_alive(self.member_timeout_ms))
            .map(|s| s.member.name.clone())
            .collect();
        alive.sort();
        alive
    }
}

#[async_trait]
impl Membership for MemberList {
    async fn current_leader(&self) -> Result<Option<Member>> {
        let inner = self.inner.read().await;
        let leader = inner
            .leader
            .as_ref()
            .and_then(|name| inner.members.get(name))
            .filter(|state| state.is_alive(self.member_timeout_ms))
            .map(|state| state.member.clone());
        Ok(leader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn no_leader_until_elected() {
        let members = MemberList::new(5_000);
        members.join(Member::new("node-1", "10.0.0.1:8946")).await;
        assert!(members.current_leader().await.unwrap().is_none());

        members.set_leader(Some("node-1".to_string())).await;
        let leader = members.current_leader().await.unwrap().unwrap();
        assert_eq!(leader.name, "node-1");
        assert_eq!(leader.addr, "10.0.0.1:8946");
    }

    #[tokio::test]
    async fn unknown_leader_name_resolves_to_none() {
        let members = MemberList::new(5_000);
        members.set_leader(Some("node-9".to_string())).await;
        assert!(members.current_leader().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn silent_leader_is_not_reported() {
        let members = MemberList::new(1_000);
        members.join(Member::new("node-1", "10.0.0.1:8946")).await;
        members.join(Member::new("node-2", "10.0.0.2:8946")).await;
        members.set_leader(Some("node-1".to_string())).await;

        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(members.heartbeat("node-2").await);
        tokio::time::advance(Duration::from_millis(600)).await;

        assert!(members.current_leader().await.unwrap().is_none());
        assert_eq!(members.alive_members().await, vec!["node-2".to_string()]);
    }

    #[tokio::test]
    async fn heartbeat_from_unknown_member_is_ignored() {
        let members = MemberList::new(5_000);
        assert!(!members.heartbeat("stranger").await);
        assert!(members.alive_members().await.is_empty());
    }
}
