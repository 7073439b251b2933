//! In-memory repository for pull requests.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::domain::UserId;
use crate::review::{
    domain::{PullRequest, PullRequestId},
    ports::{PullRequestRepository, PullRequestRepositoryError, PullRequestRepositoryResult},
};

/// Thread-safe in-memory pull request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPullRequestRepository {
    state: Arc<RwLock<InMemoryPullRequestState>>,
}

#[derive(Debug, Default)]
struct InMemoryPullRequestState {
    pull_requests: HashMap<PullRequestId, StoredPullRequest>,
    next_sequence: u64,
}

/// Insertion sequence breaks ties between equal creation timestamps.
#[derive(Debug, Clone)]
struct StoredPullRequest {
    sequence: u64,
    pull_request: PullRequest,
}

impl InMemoryPullRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> PullRequestRepositoryResult<RwLockReadGuard<'_, InMemoryPullRequestState>> {
        self.state.read().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> PullRequestRepositoryResult<RwLockWriteGuard<'_, InMemoryPullRequestState>> {
        self.state.write().map_err(|err| {
            PullRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl PullRequestRepository for InMemoryPullRequestRepository {
    async fn store(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let mut state = self.write()?;
        if state.pull_requests.contains_key(pull_request.id()) {
            return Err(PullRequestRepositoryError::DuplicatePullRequest(
                pull_request.id().clone(),
            ));
        }
        let sequence = state.next_sequence;
        state.next_sequence = sequence.saturating_add(1);
        state.pull_requests.insert(
            pull_request.id().clone(),
            StoredPullRequest {
                sequence,
                pull_request: pull_request.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, pull_request: &PullRequest) -> PullRequestRepositoryResult<()> {
        let mut state = self.write()?;
        let stored = state
            .pull_requests
            .get_mut(pull_request.id())
            .ok_or_else(|| PullRequestRepositoryError::NotFound(pull_request.id().clone()))?;
        stored.pull_request = pull_request.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &PullRequestId,
    ) -> PullRequestRepositoryResult<Option<PullRequest>> {
        let state = self.read()?;
        Ok(state
            .pull_requests
            .get(id)
            .map(|stored| stored.pull_request.clone()))
    }

    async fn exists(&self, id: &PullRequestId) -> PullRequestRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.pull_requests.contains_key(id))
    }

    async fn list_by_reviewer(
        &self,
        reviewer_id: &UserId,
    ) -> PullRequestRepositoryResult<Vec<PullRequest>> {
        let state = self.read()?;
        let mut matching: Vec<&StoredPullRequest> = state
            .pull_requests
            .values()
            .filter(|stored| stored.pull_request.is_reviewer(reviewer_id))
            .collect();
        matching.sort_by_key(|stored| Reverse((stored.pull_request.created_at(), stored.sequence)));
        Ok(matching
            .into_iter()
            .map(|stored| stored.pull_request.clone())
            .collect())
    }
}
