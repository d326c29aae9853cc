use sea_orm::entity::prelude::*;

/// Energy used by one player on one UTC calendar day.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "energy_usage")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub torn_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    pub energy: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
