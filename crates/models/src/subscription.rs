use sea_orm::{entity::prelude::*, DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Stored form of a subscription. `price_per_month` is kept as decimal text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "abonnement")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub subscription_id: i32,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub term: i32,
    #[sea_orm(column_type = "Text")]
    pub price_per_month: String,
    #[sea_orm(column_type = "Text")]
    pub start_month: String,
    #[sea_orm(column_type = "Text")]
    pub end_month: String,
    pub restance: bool,
    #[sea_orm(column_type = "Text")]
    pub contract_information: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert one row and return the identity the store assigned.
pub async fn insert(db: &DatabaseConnection, am: ActiveModel) -> Result<i32, errors::ModelError> {
    let res = Entity::insert(am).exec(db).await?;
    Ok(res.last_insert_id)
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    let rows = Entity::find()
        .order_by_asc(Column::SubscriptionId)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}
