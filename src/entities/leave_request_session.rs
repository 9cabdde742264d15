//! `SeaORM` Entity for leave_request_session join table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "leave_request_session"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub leave_request_id: i32,
    pub session_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    LeaveRequestId,
    SessionId,
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
    LeaveRequest,
    Session,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::LeaveRequestId => ColumnType::Integer.def(),
            Self::SessionId => ColumnType::Integer.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::LeaveRequest => Entity::belongs_to(super::leave_request::Entity)
                .from(Column::LeaveRequestId)
                .to(super::leave_request::Column::Id)
                .into(),
            Self::Session => Entity::belongs_to(super::session::Entity)
                .from(Column::SessionId)
                .to(super::session::Column::Id)
                .into(),
        }
    }
}

impl Related<super::leave_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequest.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
