use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::db::connect;
use crate::member::NewMember;
use crate::payment::InsertOutcome;
use crate::{member, payment, tenant};

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn new_member(doc: &str) -> NewMember {
    NewMember {
        document_number: doc.to_string(),
        first_name: "Ana".into(),
        last_name: "Gomez".into(),
        category: "senior".into(),
        phone: None,
        birth_date: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
        join_date: None,
        active: true,
        scholarship: false,
    }
}

#[tokio::test]
async fn test_duplicate_month_is_skipped_not_erred() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let t = tenant::create(&db, &format!("ledger_dup_{}", Uuid::new_v4())).await?;
    let m = member::insert(&db, t.id, 1, &new_member("d-100")).await?;

    let paid_on = NaiveDate::from_ymd_opt(2026, 6, 5).unwrap();
    let amount = Decimal::new(10000, 2);

    let first = payment::insert_skip_duplicate(&db, t.id, m.id, 2026, 6, amount, paid_on).await?;
    assert!(matches!(first, InsertOutcome::Inserted(_)));

    let second = payment::insert_skip_duplicate(&db, t.id, m.id, 2026, 6, amount, paid_on).await?;
    assert!(matches!(second, InsertOutcome::AlreadyPaid));

    let rows = payment::list_for_member(&db, t.id, m.id, 2026).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].month, 6);
    assert_eq!(rows[0].amount, amount);

    tenant::Entity::delete_by_id(t.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = Arc::new(setup_test_db().await?);
    let t = tenant::create(db.as_ref(), &format!("ledger_race_{}", Uuid::new_v4())).await?;
    let m = member::insert(db.as_ref(), t.id, 1, &new_member("d-200")).await?;

    let num_tasks = 8;
    let barrier = Arc::new(Barrier::new(num_tasks));
    let mut handles: Vec<tokio::task::JoinHandle<anyhow::Result<bool>>> = vec![];

    for _ in 0..num_tasks {
        let db = Arc::clone(&db);
        let barrier = Arc::clone(&barrier);
        let (tenant_id, member_id) = (t.id, m.id);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            let paid_on = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
            let outcome = payment::insert_skip_duplicate(
                db.as_ref(),
                tenant_id,
                member_id,
                2026,
                3,
                Decimal::new(5000, 2),
                paid_on,
            )
            .await?;
            Ok(matches!(outcome, InsertOutcome::Inserted(_)))
        }));
    }

    let mut inserted_count = 0;
    for handle in handles {
        if handle.await?? {
            inserted_count += 1;
        }
    }
    // Exactly one writer wins; the rest observe "already paid".
    assert_eq!(inserted_count, 1);

    let rows = payment::Entity::find()
        .filter(payment::Column::TenantId.eq(t.id))
        .filter(payment::Column::MemberId.eq(m.id))
        .all(db.as_ref())
        .await?;
    assert_eq!(rows.len(), 1);

    tenant::Entity::delete_by_id(t.id).exec(db.as_ref()).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_member_number_conflicts() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let t = tenant::create(&db, &format!("member_dup_{}", Uuid::new_v4())).await?;

    member::insert(&db, t.id, 7, &new_member("d-300")).await?;
    let err = member::insert(&db, t.id, 7, &new_member("d-301")).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Conflict(_)));

    tenant::Entity::delete_by_id(t.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_tenant_delete_cascades_to_ledger() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let t = tenant::create(&db, &format!("cascade_{}", Uuid::new_v4())).await?;
    let m = member::insert(&db, t.id, 1, &new_member("d-400")).await?;
    let paid_on = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    payment::insert_skip_duplicate(&db, t.id, m.id, 2026, 1, Decimal::new(2500, 2), paid_on).await?;

    tenant::Entity::delete_by_id(t.id).exec(&db).await?;

    let members = member::list_by_tenant(&db, t.id).await?;
    assert!(members.is_empty());
    let payments = payment::list_for_member(&db, t.id, m.id, 2026).await?;
    assert!(payments.is_empty());
    Ok(())
}
