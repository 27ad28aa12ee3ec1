//! `members` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub github_username: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub joined_org_at: Option<DateTimeWithTimeZone>,
    pub repo_provisioned_at: Option<DateTimeWithTimeZone>,
    pub notified_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
