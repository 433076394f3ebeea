use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::Condition;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "joke")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub author: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` wildcards so the phrase matches literally.
pub fn escape_like(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    for c in phrase.chars() {
        if c == LIKE_ESCAPE || c == '%' || c == '_' {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `question LIKE %phrase% OR answer LIKE %phrase%`.
///
/// Case sensitivity is whatever the column collation gives `LIKE`; on
/// PostgreSQL that is case-sensitive. An empty phrase matches every row.
pub fn contains_phrase(phrase: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(phrase));
    Condition::any()
        .add(Expr::col(Column::Question).like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
        .add(Expr::col(Column::Answer).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
}
