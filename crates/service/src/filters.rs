//! Query-string filters for the business and product list operations,
//! compiled into SeaORM conditions so filtering happens in SQL.

use models::business::{self, BusinessCategory};
use models::product::{self, ProductCategory};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, IdenStatic};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessFilter {
    pub city: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Lower-cased `%needle%` with LIKE metacharacters escaped.
pub fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// `LOWER(table.col) LIKE pattern`
fn contains_ci<E, C>(entity: E, col: C, needle: &str) -> SimpleExpr
where
    E: IdenStatic,
    C: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col((entity, col)))).like(like_pattern(needle))
}

impl BusinessFilter {
    /// `None` when the filter can match nothing (unknown category).
    pub fn condition(&self, include_unapproved: bool) -> Option<Condition> {
        let mut cond = Condition::all();
        if !include_unapproved {
            cond = cond.add(business::Column::Approved.eq(true));
        }
        if let Some(city) = non_blank(&self.city) {
            cond = cond.add(contains_ci(business::Entity, business::Column::City, city));
        }
        if let Some(cat) = non_blank(&self.category) {
            let cat = BusinessCategory::parse(cat).ok()?;
            cond = cond.add(business::Column::Category.eq(cat));
        }
        Some(cond)
    }
}

impl ProductFilter {
    /// Condition over `product` joined with its `business`. `None` when the
    /// category is unknown.
    pub fn condition(&self, include_unapproved: bool) -> Option<Condition> {
        let mut cond = Condition::all();
        if !include_unapproved {
            cond = cond.add(business::Column::Approved.eq(true));
        }
        if let Some(kw) = non_blank(&self.keyword) {
            cond = cond.add(
                Condition::any()
                    .add(contains_ci(product::Entity, product::Column::Name, kw))
                    .add(contains_ci(product::Entity, product::Column::Description, kw)),
            );
        }
        if let Some(cat) = non_blank(&self.category) {
            let cat = ProductCategory::parse(cat).ok()?;
            cond = cond.add(product::Column::Category.eq(cat));
        }
        if let Some(city) = non_blank(&self.city) {
            cond = cond.add(contains_ci(business::Entity, business::Column::City, city));
        }
        Some(cond)
    }
}
