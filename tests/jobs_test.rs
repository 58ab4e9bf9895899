use std::collections::HashSet;

use talentflow_backend::dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use talentflow_backend::models::JobStatus;
use talentflow_backend::services::SimPolicy;
use talentflow_backend::store::jobs::JobSort;
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

fn create_payload(title: &str) -> CreateJobPayload {
    CreateJobPayload {
        title: title.to_string(),
        slug: None,
        tags: vec![],
        status: None,
    }
}

#[tokio::test]
async fn create_assigns_server_fields() {
    let (backend, _dir) = backend().await;

    let job = backend
        .jobs
        .create(CreateJobPayload {
            title: "Senior Rust Engineer".to_string(),
            slug: None,
            tags: vec!["backend".to_string()],
            status: None,
        })
        .await
        .expect("create");

    assert!(!job.id.is_empty());
    assert_eq!(job.slug, "senior-rust-engineer");
    assert_eq!(job.status, JobStatus::Active);
    assert_eq!(job.order, 1);

    let second = backend
        .jobs
        .create(create_payload("Backend Engineer"))
        .await
        .expect("create second");
    assert_eq!(second.order, 2);
}

#[tokio::test]
async fn duplicate_slug_is_rejected_without_writing() {
    let (backend, _dir) = backend().await;

    backend
        .jobs
        .create(create_payload("Platform Engineer"))
        .await
        .expect("first create");

    let err = backend
        .jobs
        .create(create_payload("Platform Engineer"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateSlug(_)));

    let page = backend.jobs.list(&JobListQuery::default()).await.expect("list");
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn patch_edits_fields_and_guards_slug() {
    let (backend, _dir) = backend().await;

    let a = backend.jobs.create(create_payload("Job A")).await.expect("a");
    let b = backend.jobs.create(create_payload("Job B")).await.expect("b");

    let updated = backend
        .jobs
        .patch(
            &a.id,
            UpdateJobPayload {
                title: Some("Job A2".to_string()),
                status: Some(JobStatus::Archived),
                ..UpdateJobPayload::default()
            },
        )
        .await
        .expect("patch");
    assert_eq!(updated.title, "Job A2");
    assert_eq!(updated.status, JobStatus::Archived);
    // Slug untouched by a title edit.
    assert_eq!(updated.slug, "job-a");

    let err = backend
        .jobs
        .patch(
            &b.id,
            UpdateJobPayload {
                slug: Some("job-a".to_string()),
                ..UpdateJobPayload::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateSlug(_)));

    // Re-stating the current slug is not a collision.
    backend
        .jobs
        .patch(
            &b.id,
            UpdateJobPayload {
                slug: Some("job-b".to_string()),
                ..UpdateJobPayload::default()
            },
        )
        .await
        .expect("no-op slug patch");

    let err = backend
        .jobs
        .patch("missing-id", UpdateJobPayload::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

async fn assert_dense_orders(backend: &Backend, expected_len: usize) {
    let page = backend
        .jobs
        .list(&JobListQuery {
            page_size: 1000,
            ..JobListQuery::default()
        })
        .await
        .expect("list");
    assert_eq!(page.items.len(), expected_len);
    let orders: HashSet<i64> = page.items.iter().map(|j| j.order).collect();
    let expected: HashSet<i64> = (1..=expected_len as i64).collect();
    assert_eq!(orders, expected);
    // Sorted ascending by order.
    let ranks: Vec<i64> = page.items.iter().map(|j| j.order).collect();
    assert_eq!(ranks, (1..=expected_len as i64).collect::<Vec<_>>());
}

#[tokio::test]
async fn reorder_keeps_orders_dense() {
    let (backend, _dir) = backend().await;

    let a = backend.jobs.create(create_payload("Job A")).await.expect("a");
    let b = backend.jobs.create(create_payload("Job B")).await.expect("b");
    let c = backend.jobs.create(create_payload("Job C")).await.expect("c");

    backend.jobs.reorder(&a.id, 3).await.expect("reorder");
    assert_dense_orders(&backend, 3).await;

    let page = backend.jobs.list(&JobListQuery::default()).await.expect("list");
    let titles: Vec<&str> = page.items.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["Job B", "Job C", "Job A"]);

    // A short shuffle, checking the invariant after every completed move.
    for (id, to) in [(&b.id, 1_i64), (&c.id, 2), (&a.id, 1), (&b.id, 3)] {
        backend.jobs.reorder(id, to).await.expect("reorder");
        assert_dense_orders(&backend, 3).await;
    }
}

#[tokio::test]
async fn reorder_clamps_out_of_range_targets() {
    let (backend, _dir) = backend().await;

    let a = backend.jobs.create(create_payload("Job A")).await.expect("a");
    backend.jobs.create(create_payload("Job B")).await.expect("b");
    backend.jobs.create(create_payload("Job C")).await.expect("c");

    backend.jobs.reorder(&a.id, 99).await.expect("clamp high");
    let page = backend.jobs.list(&JobListQuery::default()).await.expect("list");
    assert_eq!(page.items.last().map(|j| j.title.as_str()), Some("Job A"));
    assert_dense_orders(&backend, 3).await;

    backend.jobs.reorder(&a.id, 0).await.expect("clamp low");
    let page = backend.jobs.list(&JobListQuery::default()).await.expect("list");
    assert_eq!(page.items.first().map(|j| j.title.as_str()), Some("Job A"));
    assert_dense_orders(&backend, 3).await;

    let err = backend.jobs.reorder("missing-id", 1).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn injected_failure_leaves_store_untouched() {
    let (backend, _dir) = backend().await;
    let a = backend.jobs.create(create_payload("Job A")).await.expect("a");

    let failing = Backend::new(backend.pool.clone(), SimPolicy::always_failing());

    let err = failing.jobs.create(create_payload("Job B")).await.unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable));
    assert!(err.is_retryable());

    let err = failing
        .jobs
        .patch(
            &a.id,
            UpdateJobPayload {
                title: Some("Changed".to_string()),
                ..UpdateJobPayload::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable));

    let err = failing.jobs.reorder(&a.id, 1).await.unwrap_err();
    assert!(matches!(err, Error::ServiceUnavailable));

    let page = backend.jobs.list(&JobListQuery::default()).await.expect("list");
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].title, "Job A");
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let (backend, _dir) = backend().await;

    for i in 1..=30 {
        let mut payload = create_payload(&format!("Job {i}"));
        payload.tags = if i % 2 == 0 {
            vec!["frontend".to_string()]
        } else {
            vec!["backend".to_string()]
        };
        let job = backend.jobs.create(payload).await.expect("create");
        if i % 5 == 0 {
            backend
                .jobs
                .patch(
                    &job.id,
                    UpdateJobPayload {
                        status: Some(JobStatus::Archived),
                        ..UpdateJobPayload::default()
                    },
                )
                .await
                .expect("archive");
        }
    }

    // Page 2 of the order-sorted set.
    let page = backend
        .jobs
        .list(&JobListQuery {
            page: 2,
            ..JobListQuery::default()
        })
        .await
        .expect("page 2");
    assert_eq!(page.total, 30);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.items[0].order, 26);
    assert_eq!(page.items[4].order, 30);

    // Case-insensitive substring over title and tags.
    let page = backend
        .jobs
        .list(&JobListQuery {
            search: Some("JOB 3".to_string()),
            page_size: 1000,
            ..JobListQuery::default()
        })
        .await
        .expect("search");
    assert_eq!(page.total, 2); // "Job 3" and "Job 30"

    let page = backend
        .jobs
        .list(&JobListQuery {
            search: Some("FRONTend".to_string()),
            page_size: 1000,
            ..JobListQuery::default()
        })
        .await
        .expect("tag search");
    assert_eq!(page.total, 15);

    let page = backend
        .jobs
        .list(&JobListQuery {
            status: Some(JobStatus::Archived),
            page_size: 1000,
            ..JobListQuery::default()
        })
        .await
        .expect("status filter");
    assert_eq!(page.total, 6);

    // Alternative sort key still pages consistently.
    let page = backend
        .jobs
        .list(&JobListQuery {
            sort: JobSort::Title,
            page_size: 5,
            ..JobListQuery::default()
        })
        .await
        .expect("title sort");
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total, 30);
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let (backend, _dir) = backend().await;
    let err = backend.jobs.create(create_payload("")).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}
