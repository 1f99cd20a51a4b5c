use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait};

use crate::db::{connect_with_config, in_memory_config};
use crate::{card, card_product, product};

async fn setup() -> Result<DatabaseConnection> {
    let db = connect_with_config(&in_memory_config()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn create_assigns_ids() -> Result<()> {
    let db = setup().await?;

    let c1 = card::create(&db, "Gold").await?;
    let c2 = card::create(&db, "Silver").await?;
    assert!(c1.id > 0);
    assert_ne!(c1.id, c2.id);

    let p = product::create(&db, "Coffee").await?;
    assert_eq!(p.name, "Coffee");

    let found = card::Entity::find_by_id(c1.id).one(&db).await?;
    assert_eq!(found.map(|c| c.name), Some("Gold".to_string()));
    Ok(())
}

#[tokio::test]
async fn create_rejects_blank_name() -> Result<()> {
    let db = setup().await?;
    assert!(card::create(&db, "  ").await.is_err());
    assert!(product::create(&db, "").await.is_err());
    assert_eq!(card::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn link_is_visible_from_both_sides() -> Result<()> {
    let db = setup().await?;
    let c = card::create(&db, "Gold").await?;
    let p = product::create(&db, "Coffee").await?;

    card_product::link(&db, c.id, p.id).await?;

    let products = c.find_related(product::Entity).all(&db).await?;
    assert_eq!(products, vec![p.clone()]);
    let cards = p.find_related(card::Entity).all(&db).await?;
    assert_eq!(cards, vec![c.clone()]);
    Ok(())
}

#[tokio::test]
async fn link_twice_keeps_one_row() -> Result<()> {
    let db = setup().await?;
    let c = card::create(&db, "Gold").await?;
    let p = product::create(&db, "Coffee").await?;

    card_product::link(&db, c.id, p.id).await?;
    card_product::link(&db, c.id, p.id).await?;

    assert_eq!(card_product::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn unlink_reports_whether_row_existed() -> Result<()> {
    let db = setup().await?;
    let c = card::create(&db, "Gold").await?;
    let p = product::create(&db, "Coffee").await?;
    card_product::link(&db, c.id, p.id).await?;

    assert!(card_product::unlink(&db, c.id, p.id).await?);
    assert!(!card_product::unlink(&db, c.id, p.id).await?);
    assert!(c.find_related(product::Entity).all(&db).await?.is_empty());
    Ok(())
}
