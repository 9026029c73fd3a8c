use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::copy_status::CopyStatus;
use super::{format_for_form, format_medium};

/// A physical copy of a book.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub book_id: i32,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_medium(self.due_back)
    }

    pub fn due_back_for_form(&self) -> String {
        format_for_form(self.due_back)
    }
}
