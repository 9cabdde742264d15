//! `SeaORM` Entity for student_parent table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student_parent"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub student_id: i32,
    pub parent_name: String,
    pub relationship: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: bool,
    pub created_by: i32,
    pub updated_by: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentId,
    ParentName,
    Relationship,
    Phone,
    Email,
    IsPrimary,
    CreatedBy,
    UpdatedBy,
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
    Student,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::ParentName => ColumnType::String(StringLen::None).def(),
            Self::Relationship => ColumnType::String(StringLen::None).def(),
            Self::Phone => ColumnType::String(StringLen::None).def().null(),
            Self::Email => ColumnType::String(StringLen::None).def().null(),
            Self::IsPrimary => ColumnType::Boolean.def(),
            Self::CreatedBy => ColumnType::Integer.def(),
            Self::UpdatedBy => ColumnType::Integer.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::user::Entity)
                .from(Column::StudentId)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
