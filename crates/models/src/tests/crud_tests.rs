use crate::db::connect_with_config;
use crate::{business, product, user};
use crate::business::{BusinessCategory, NewBusiness};
use crate::product::{NewProduct, ProductCategory};
use crate::user::{NewUser, Role};
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, ColumnTrait};
use anyhow::Result;
use migration::MigratorTrait;
use tokio::sync::OnceCell;
use uuid::Uuid;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Setup test database with migrations applied once per test binary
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&configs::DatabaseConfig::from_env()).await?;
    MIGRATED
        .get_or_try_init(|| async { migration::Migrator::up(&db, None).await })
        .await?;
    Ok(db)
}

fn skip() -> bool { std::env::var("SKIP_DB_TESTS").is_ok() }

async fn new_owner(db: &DatabaseConnection) -> Result<user::Model> {
    let u = user::create(db, NewUser {
        name: "Owner".into(),
        email: format!("owner_{}@example.com", Uuid::new_v4()),
        password_hash: "$argon2id$placeholder".into(),
        role: Role::Business,
        city: "New York".into(),
    })
    .await?;
    Ok(u)
}

fn pizza_place() -> NewBusiness {
    NewBusiness {
        name: "Pizza Place".into(),
        category: BusinessCategory::Restaurant,
        address: "1 Main St".into(),
        city: "New York".into(),
        phone: Some("555-0100".into()),
        description: None,
    }
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let email = format!("Crud_{}@Example.com", Uuid::new_v4());
    let created = user::create(&db, NewUser {
        name: "  Jane  ".into(),
        email: email.clone(),
        password_hash: "$argon2id$placeholder".into(),
        role: Role::Customer,
        city: "Los Angeles".into(),
    })
    .await?;
    assert_eq!(created.name, "Jane");
    assert_eq!(created.email, email.to_lowercase());
    assert_eq!(created.role, Role::Customer);

    // lookup is case-insensitive because emails are stored lower-cased
    let found = user::find_by_email(&db, &email.to_uppercase()).await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    user::hard_delete(&db, created.id).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = new_owner(&db).await?;
    let dup = user::create(&db, NewUser {
        name: "Other".into(),
        email: owner.email.clone(),
        password_hash: "x".into(),
        role: Role::Customer,
        city: "Chicago".into(),
    })
    .await;
    assert!(matches!(dup, Err(crate::errors::ModelError::Conflict(ref m)) if m == "User already exists"));

    user::hard_delete(&db, owner.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_business_crud_and_approval() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = new_owner(&db).await?;
    let created = business::create(&db, owner.id, pizza_place(), false).await?;
    assert!(!created.approved);
    assert_eq!(created.category, BusinessCategory::Restaurant);

    let by_owner = business::find_by_owner(&db, owner.id).await?;
    assert_eq!(by_owner.map(|b| b.id), Some(created.id));

    let approved = business::set_approved(&db, created.id, true).await?.expect("business exists");
    assert!(approved.approved);
    assert!(approved.updated_at >= created.updated_at);

    // one business per owner
    let second = business::create(&db, owner.id, pizza_place(), false).await;
    assert!(matches!(second, Err(crate::errors::ModelError::Conflict(_))));

    assert!(business::set_approved(&db, Uuid::new_v4(), true).await?.is_none());

    user::hard_delete(&db, owner.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_product_crud_and_relations() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = new_owner(&db).await?;
    let biz = business::create(&db, owner.id, pizza_place(), true).await?;
    let created = product::create(&db, biz.id, NewProduct {
        name: "Margherita Pizza".into(),
        price: 12.99,
        category: ProductCategory::FoodAndBeverages,
        description: "Classic margherita".into(),
        availability: true,
    })
    .await?;
    assert_eq!(created.business_id, biz.id);
    assert_eq!(created.category, ProductCategory::FoodAndBeverages);

    let related = biz.find_related(product::Entity).all(&db).await?;
    assert_eq!(related.len(), 1);
    let parent = created.find_related(business::Entity).one(&db).await?;
    assert_eq!(parent.map(|b| b.owner_id), Some(owner.id));

    let negative = product::create(&db, biz.id, NewProduct {
        name: "Free money".into(),
        price: -1.0,
        category: ProductCategory::Other,
        description: "nope".into(),
        availability: true,
    })
    .await;
    assert!(negative.is_err());

    let removed = product::delete_by_business(&db, biz.id).await?;
    assert_eq!(removed, 1);

    user::hard_delete(&db, owner.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_owner_delete_cascades() -> Result<()> {
    if skip() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let owner = new_owner(&db).await?;
    let biz = business::create(&db, owner.id, pizza_place(), true).await?;
    product::create(&db, biz.id, NewProduct {
        name: "Caesar Salad".into(),
        price: 8.99,
        category: ProductCategory::FoodAndBeverages,
        description: "Romaine and parmesan".into(),
        availability: true,
    })
    .await?;

    user::hard_delete(&db, owner.id).await?;

    assert!(business::Entity::find_by_id(biz.id).one(&db).await?.is_none());
    let orphans = product::Entity::find()
        .filter(product::Column::BusinessId.eq(biz.id))
        .all(&db)
        .await?;
    assert!(orphans.is_empty());
    Ok(())
}
