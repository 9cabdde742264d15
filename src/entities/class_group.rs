//! `SeaORM` Entity for class_group table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "class_group"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: String,
    pub academic_year: String,
    pub semester: String,
    pub status: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub class_teacher_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Name,
    AcademicYear,
    Semester,
    Status,
    Description,
    CreatedBy,
    ClassTeacherId,
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
    ClassTeacher,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::Name => ColumnType::String(StringLen::None).def(),
            Self::AcademicYear => ColumnType::String(StringLen::None).def(),
            Self::Semester => ColumnType::String(StringLen::None).def(),
            Self::Status => ColumnType::String(StringLen::None).def(),
            Self::Description => ColumnType::Text.def().null(),
            Self::CreatedBy => ColumnType::Integer.def(),
            Self::ClassTeacherId => ColumnType::Integer.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::ClassTeacher => Entity::belongs_to(super::user::Entity)
                .from(Column::ClassTeacherId)
                .to(super::user::Column::Id)
                .into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
