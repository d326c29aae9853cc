use sea_orm::entity::prelude::*;

/// Daily snapshot of a faction member's gym energy contributions.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "gym_contribution")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub torn_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    pub strength: i64,
    pub speed: i64,
    pub defense: i64,
    pub dexterity: i64,
    pub total: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
