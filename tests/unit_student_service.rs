mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{InMemoryStudentRepository, date, student_for, student_service};
use studentdesk::modules::students::cache::CacheStatus;
use studentdesk::modules::students::model::UpdateStudentDto;
use studentdesk_auth::{Principal, Role};
use studentdesk_cache::MemoryCache;
use uuid::Uuid;

fn admin() -> Principal {
    Principal::new(Uuid::new_v4(), "root", Role::Admin)
}

#[tokio::test(start_paused = true)]
async fn test_cached_profile_expires_after_ttl() {
    let repo = Arc::new(InMemoryStudentRepository::new());
    let record = student_for(Uuid::new_v4(), date(2024, 9, 1));
    repo.insert(record.clone());

    let ttl = Duration::from_secs(3600);
    let service = student_service(repo.clone(), Arc::new(MemoryCache::new()), ttl);
    let principal = admin();

    let (_, status) = service.retrieve(&principal, record.id).await.unwrap();
    assert_eq!(status, CacheStatus::Miss);

    tokio::time::advance(ttl - Duration::from_secs(1)).await;
    let (_, status) = service.retrieve(&principal, record.id).await.unwrap();
    assert_eq!(status, CacheStatus::Hit);

    tokio::time::advance(Duration::from_secs(1)).await;
    let (_, status) = service.retrieve(&principal, record.id).await.unwrap();
    assert_eq!(status, CacheStatus::Miss);

    assert_eq!(repo.fetch_count(), 2);
}

#[tokio::test]
async fn test_stale_window_closes_after_update() {
    let repo = Arc::new(InMemoryStudentRepository::new());
    let owner = Uuid::new_v4();
    let record = student_for(owner, date(2024, 9, 1));
    repo.insert(record.clone());

    let service = student_service(
        repo.clone(),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(3600),
    );
    let student = Principal::new(owner, "ada", Role::Student);

    let (before, _) = service.retrieve(&student, record.id).await.unwrap();
    assert_eq!(before.grade_level.as_deref(), Some("10"));

    let dto = UpdateStudentDto {
        grade_level: Some("11".to_string()),
        ..Default::default()
    };
    service.update(&student, record.id, dto).await.unwrap();

    let (after, status) = service.retrieve(&student, record.id).await.unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(after.grade_level.as_deref(), Some("11"));
}

#[tokio::test]
async fn test_service_delete_rejects_non_admin() {
    let repo = Arc::new(InMemoryStudentRepository::new());
    let owner = Uuid::new_v4();
    let record = student_for(owner, date(2024, 9, 1));
    repo.insert(record.clone());

    let service = student_service(
        repo.clone(),
        Arc::new(MemoryCache::new()),
        Duration::from_secs(3600),
    );

    let err = service
        .delete(&Principal::new(owner, "ada", Role::Student), record.id)
        .await
        .unwrap_err();
    assert_eq!(err.status.as_u16(), 403);
    assert!(repo.get(record.id).is_some());

    service.delete(&admin(), record.id).await.unwrap();
    assert!(repo.get(record.id).is_none());
}
