use chrono::{NaiveDate, Utc};
use ombaro_application::AttendanceRepository;
use ombaro_core::AppError;
use ombaro_domain::{
    AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, LeaveType, UserId,
};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresAttendanceRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres attendance tests: {error}");
    }

    Some(pool)
}

async fn ensure_user(pool: &PgPool) -> UserId {
    let user_id = UserId::new();
    let insert = sqlx::query(
        r#"
            INSERT INTO user_profiles (id, name, role)
            VALUES ($1, 'Attendance Tester', 'employee')
            "#,
    )
    .bind(user_id.as_uuid())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    user_id
}

fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|error| panic!("{error}"))
}

fn record(user_id: UserId, date: &str) -> AttendanceRecord {
    AttendanceRecord {
        id: Uuid::new_v4(),
        user_id,
        date: day(date),
        status: AttendanceStatus::Present,
        check_in: Some(Utc::now()),
        check_out: None,
        notes: Some("front desk".to_owned()),
    }
}

#[tokio::test]
async fn attendance_is_unique_per_day_and_range_filtered() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let user_id = ensure_user(&pool).await;
    let repository = PostgresAttendanceRepository::new(pool);
    for date in ["2026-03-02", "2026-03-03", "2026-03-04"] {
        repository
            .insert_attendance(record(user_id, date))
            .await
            .unwrap_or_else(|error| panic!("{error}"));
    }

    let duplicate = repository
        .insert_attendance(record(user_id, "2026-03-03"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let mut checked_out = repository
        .find_attendance(user_id, day("2026-03-03"))
        .await
        .unwrap_or_else(|error| panic!("{error}"))
        .unwrap_or_else(|| panic!("attendance should exist"));
    checked_out.check_out = Some(Utc::now());
    let stored = repository
        .update_attendance(checked_out)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(stored.check_out.is_some());

    let ranged = repository
        .list_attendance(user_id, Some(day("2026-03-03")), None)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    let dates: Vec<NaiveDate> = ranged.iter().map(|record| record.date).collect();
    assert_eq!(dates, vec![day("2026-03-04"), day("2026-03-03")]);
}

#[tokio::test]
async fn leave_review_round_trips() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let user_id = ensure_user(&pool).await;
    let repository = PostgresAttendanceRepository::new(pool);
    let request = repository
        .insert_leave(LeaveRequest {
            id: Uuid::new_v4(),
            user_id,
            leave_type: LeaveType::Annual,
            start_date: day("2026-04-06"),
            end_date: day("2026-04-08"),
            number_of_days: 3,
            reason: "family trip".to_owned(),
            status: LeaveStatus::Pending,
            applied_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
            reviewer_comments: None,
        })
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let pending = repository
        .list_leaves_by_status(LeaveStatus::Pending)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(pending.iter().any(|pending| pending.id == request.id));

    let reviewer = UserId::new();
    let reviewed = repository
        .update_leave(LeaveRequest {
            status: LeaveStatus::Approved,
            reviewed_at: Some(Utc::now()),
            reviewed_by: Some(reviewer),
            reviewer_comments: Some("enjoy".to_owned()),
            ..request.clone()
        })
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(reviewed.status, LeaveStatus::Approved);
    assert_eq!(reviewed.reviewed_by, Some(reviewer));

    let mine = repository
        .list_leaves_for_user(user_id)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].number_of_days, 3);
}
