use talentflow_backend::dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use talentflow_backend::models::{Stage, TimelineAction};
use talentflow_backend::services::SimPolicy;
use talentflow_backend::{Backend, Error};
use tempfile::TempDir;

async fn backend() -> (Backend, TempDir) {
    let _ = tracing_subscriber::fmt().with_env_filter("warn").try_init();
    let dir = TempDir::new().expect("temp dir");
    let pool = talentflow_backend::database::create_pool(&dir.path().join("test.sqlite"))
        .await
        .expect("pool");
    (Backend::new(pool, SimPolicy::instant()), dir)
}

fn create_payload(name: &str, email: &str) -> CreateCandidatePayload {
    CreateCandidatePayload {
        name: name.to_string(),
        email: email.to_string(),
        job_id: None,
        stage: None,
    }
}

#[tokio::test]
async fn create_defaults_stage_and_logs_creation() {
    let (backend, _dir) = backend().await;

    let candidate = backend
        .candidates
        .create(create_payload("Amit Shah", "amit.shah@example.com"))
        .await
        .expect("create");
    assert_eq!(candidate.stage, Stage::Applied);

    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, TimelineAction::Created);
    assert_eq!(events[0].to_stage, None);
}

#[tokio::test]
async fn stage_change_appends_exactly_one_event() {
    let (backend, _dir) = backend().await;

    let candidate = backend
        .candidates
        .create(create_payload("Sana Kumar", "sana.kumar@example.com"))
        .await
        .expect("create");

    let updated = backend
        .candidates
        .patch(&candidate.id, UpdateCandidatePayload::stage(Stage::Screen))
        .await
        .expect("patch stage");
    assert_eq!(updated.stage, Stage::Screen);

    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].action, TimelineAction::StageChange);
    assert_eq!(events[1].to_stage, Some(Stage::Screen));

    // Re-stating the current stage is a no-op for the timeline.
    backend
        .candidates
        .patch(&candidate.id, UpdateCandidatePayload::stage(Stage::Screen))
        .await
        .expect("same-stage patch");
    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 2);

    // So is a patch that only touches other fields.
    backend
        .candidates
        .patch(
            &candidate.id,
            UpdateCandidatePayload {
                name: Some("Sana K.".to_string()),
                ..UpdateCandidatePayload::default()
            },
        )
        .await
        .expect("name patch");
    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn timeline_is_sorted_ascending() {
    let (backend, _dir) = backend().await;

    let candidate = backend
        .candidates
        .create(create_payload("Karan Patel", "karan.patel@example.com"))
        .await
        .expect("create");

    for stage in [Stage::Screen, Stage::Tech, Stage::Offer] {
        backend
            .candidates
            .patch(&candidate.id, UpdateCandidatePayload::stage(stage))
            .await
            .expect("patch");
    }

    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 4);
    assert!(events.windows(2).all(|w| w[0].at <= w[1].at));
    let stages: Vec<_> = events.iter().filter_map(|e| e.to_stage).collect();
    assert_eq!(stages, vec![Stage::Screen, Stage::Tech, Stage::Offer]);
}

#[tokio::test]
async fn patch_missing_candidate_is_not_found() {
    let (backend, _dir) = backend().await;
    let err = backend
        .candidates
        .patch("missing-id", UpdateCandidatePayload::stage(Stage::Screen))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn injected_failure_leaves_store_untouched() {
    let (backend, _dir) = backend().await;
    let candidate = backend
        .candidates
        .create(create_payload("Priya Singh", "priya.singh@example.com"))
        .await
        .expect("create");

    let failing = Backend::new(backend.pool.clone(), SimPolicy::always_failing());

    let err = failing
        .candidates
        .create(create_payload("Rahul Iyer", "rahul.iyer@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable));

    let err = failing
        .candidates
        .patch(&candidate.id, UpdateCandidatePayload::stage(Stage::Hired))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable));

    let page = backend
        .candidates
        .list(&CandidateListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].stage, Stage::Applied);
    let events = backend
        .candidates
        .timeline(&candidate.id)
        .await
        .expect("timeline");
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let (backend, _dir) = backend().await;

    for i in 1..=12 {
        let mut payload = create_payload(&format!("Person {i}"), &format!("person{i}@example.com"));
        payload.stage = Some(if i % 3 == 0 { Stage::Tech } else { Stage::Applied });
        backend.candidates.create(payload).await.expect("create");
    }

    let page = backend
        .candidates
        .list(&CandidateListQuery {
            search: Some("PERSON 1".to_string()),
            ..CandidateListQuery::default()
        })
        .await
        .expect("search");
    // "Person 1", "Person 10", "Person 11", "Person 12"
    assert_eq!(page.total, 4);

    let page = backend
        .candidates
        .list(&CandidateListQuery {
            search: Some("person3@".to_string()),
            ..CandidateListQuery::default()
        })
        .await
        .expect("email search");
    assert_eq!(page.total, 1);

    let page = backend
        .candidates
        .list(&CandidateListQuery {
            stage: Some(Stage::Tech),
            ..CandidateListQuery::default()
        })
        .await
        .expect("stage filter");
    assert_eq!(page.total, 4);

    let page = backend
        .candidates
        .list(&CandidateListQuery {
            page: 2,
            page_size: 5,
            ..CandidateListQuery::default()
        })
        .await
        .expect("page 2");
    assert_eq!(page.total, 12);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].name, "Person 6");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let (backend, _dir) = backend().await;
    let err = backend
        .candidates
        .create(create_payload("No Email", "not-an-email"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
