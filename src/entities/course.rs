//! `SeaORM` Entity for course table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "course"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub class_group_id: i32,
    pub teacher_id: i32,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub status: String,
    pub created_by: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Name,
    Description,
    Level,
    ClassGroupId,
    TeacherId,
    StartDate,
    EndDate,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ClassGroup,
    Teacher,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::Description => ColumnType::Text.def().null(),
            Self::Level => ColumnType::String(StringLen::None).def().null(),
            Self::ClassGroupId => ColumnType::Integer.def(),
            Self::TeacherId => ColumnType::Integer.def(),
            Self::StartDate => ColumnType::DateTime.def(),
            Self::EndDate => ColumnType::DateTime.def(),
            Self::Status => ColumnType::String(StringLen::None).def(),
            Self::CreatedBy => ColumnType::Integer.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::ClassGroup => Entity::belongs_to(super::class_group::Entity)
                .from(Column::ClassGroupId)
                .to(super::class_group::Column::Id)
                .into(),
            Self::Teacher => Entity::belongs_to(super::user::Entity)
                .from(Column::TeacherId)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::class_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassGroup.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
