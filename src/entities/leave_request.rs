//! `SeaORM` Entity for leave_request table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::LeaveStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "leave_request"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub r#type: String,
    pub reason: String,
    pub status: LeaveStatus,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentId,
    CourseId,
    Type,
    Reason,
    Status,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
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
    Course,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::CourseId => ColumnType::Integer.def(),
            Self::Type => ColumnType::String(StringLen::None).def(),
            Self::Reason => ColumnType::Text.def(),
            Self::Status => LeaveStatus::db_type(),
            Self::ApprovedBy => ColumnType::Integer.def().null(),
            Self::ApprovedAt => ColumnType::DateTime.def().null(),
            Self::RejectionReason => ColumnType::Text.def().null(),
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
            Self::Course => Entity::belongs_to(super::course::Entity)
                .from(Column::CourseId)
                .to(super::course::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
