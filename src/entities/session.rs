//! `SeaORM` Entity for session table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "session"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub course_id: i32,
    pub session_date: DateTime,
    pub start_time: DateTime,
    pub end_time: DateTime,
    pub teacher_id: i32,
    pub content: Option<String>,
    pub status: String,
    pub created_by: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    CourseId,
    SessionDate,
    StartTime,
    EndTime,
    TeacherId,
    Content,
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
    Course,
    Teacher,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::CourseId => ColumnType::Integer.def(),
            Self::SessionDate => ColumnType::DateTime.def(),
            Self::StartTime => ColumnType::DateTime.def(),
            Self::EndTime => ColumnType::DateTime.def(),
            Self::TeacherId => ColumnType::Integer.def(),
            Self::Content => ColumnType::Text.def().null(),
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
            Self::Course => Entity::belongs_to(super::course::Entity)
                .from(Column::CourseId)
                .to(super::course::Column::Id)
                .into(),
            Self::Teacher => Entity::belongs_to(super::user::Entity)
                .from(Column::TeacherId)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
