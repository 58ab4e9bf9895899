//! Client-side optimistic mutation: apply the new state locally, issue the
//! backend call, and restore the snapshot if the call fails.
//!
//! Speculative state is owned exclusively by the board that created it; the
//! store is never written from here. Two in-flight mutations on the same
//! entity are not serialized: if the first call fails after the second was
//! applied, its rollback clobbers the second's effect (accepted single-actor
//! race, see DESIGN.md).

use crate::dto::{CandidateListQuery, JobListQuery, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::{Candidate, Job, Stage};
use crate::services::{CandidateService, JobService};
use std::collections::BTreeMap;
use std::future::Future;

/// Snapshot the state, apply the mutation synchronously, then await the
/// backend call. On any failure the snapshot is restored exactly and the
/// error is handed back for the caller to surface (retryable when it is
/// `ServiceUnavailable`).
pub async fn speculate<S, R, Fut>(state: &mut S, apply: impl FnOnce(&mut S), call: Fut) -> Result<R>
where
    S: Clone,
    Fut: Future<Output = Result<R>>,
{
    let snapshot = state.clone();
    apply(state);
    match call.await {
        Ok(result) => Ok(result),
        Err(err) => {
            *state = snapshot;
            Err(err)
        }
    }
}

/// One loaded page of jobs in display order, with drag-reorder applied
/// optimistically.
#[derive(Debug, Clone)]
pub struct JobBoard {
    jobs: Vec<Job>,
    /// 0-based index of the first loaded job within the full ordered set.
    page_offset: i64,
}

impl JobBoard {
    pub async fn load(service: &JobService, query: &JobListQuery) -> Result<Self> {
        let page = service.list(query).await?;
        let page_offset = (query.page.max(1) as i64 - 1) * query.page_size.max(1) as i64;
        Ok(Self {
            jobs: page.items,
            page_offset,
        })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Move the job at `from` to `to` (page-local indices). The visible
    /// order changes immediately; a failed reorder call puts it back.
    pub async fn move_job(&mut self, service: &JobService, from: usize, to: usize) -> Result<()> {
        if from == to || from >= self.jobs.len() || to >= self.jobs.len() {
            return Ok(());
        }
        let id = self.jobs[from].id.clone();
        let target_order = self.page_offset + to as i64 + 1;
        speculate(
            &mut self.jobs,
            |jobs| {
                let moved = jobs.remove(from);
                jobs.insert(to, moved);
            },
            service.reorder(&id, target_order),
        )
        .await
    }
}

/// Kanban columns keyed by stage, with drag-between-columns applied
/// optimistically.
#[derive(Debug, Clone)]
pub struct PipelineBoard {
    columns: BTreeMap<Stage, Vec<Candidate>>,
}

impl PipelineBoard {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut columns: BTreeMap<Stage, Vec<Candidate>> =
            Stage::ALL.iter().map(|s| (*s, Vec::new())).collect();
        for candidate in candidates {
            columns.entry(candidate.stage).or_default().push(candidate);
        }
        Self { columns }
    }

    pub async fn load(service: &CandidateService, query: &CandidateListQuery) -> Result<Self> {
        let page = service.list(query).await?;
        Ok(Self::new(page.items))
    }

    pub fn column(&self, stage: Stage) -> &[Candidate] {
        self.columns.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop a candidate into another stage's column. The card moves
    /// immediately (to the top of the target column); a failed patch call
    /// restores every column to its pre-drag state.
    pub async fn move_candidate(
        &mut self,
        service: &CandidateService,
        candidate_id: &str,
        to_stage: Stage,
    ) -> Result<()> {
        let from_stage = self
            .columns
            .iter()
            .find_map(|(stage, cards)| {
                cards.iter().any(|c| c.id == candidate_id).then_some(*stage)
            })
            .ok_or_else(|| Error::NotFound(format!("Candidate {candidate_id}")))?;
        if from_stage == to_stage {
            return Ok(());
        }

        let updated = speculate(
            &mut self.columns,
            |columns| {
                let Some(source) = columns.get_mut(&from_stage) else {
                    return;
                };
                let Some(pos) = source.iter().position(|c| c.id == candidate_id) else {
                    return;
                };
                let mut card = source.remove(pos);
                card.stage = to_stage;
                columns.entry(to_stage).or_default().insert(0, card);
            },
            service.patch(candidate_id, UpdateCandidatePayload::stage(to_stage)),
        )
        .await?;

        // Confirmed: adopt the canonical record the backend returned.
        if let Some(cards) = self.columns.get_mut(&to_stage) {
            if let Some(card) = cards.iter_mut().find(|c| c.id == candidate_id) {
                *card = updated;
            }
        }
        Ok(())
    }
}
