//! 列表查询类型
//!
//! `EntityQuery` 描述一次列表请求 (搜索 / 排序 / 过滤 / 分页),
//! 并序列化为 query-string 参数。每次请求一个不可变的值。

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Query construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Ordering field is empty")]
    EmptyOrdering,

    #[error("Cannot order by '{0}'")]
    UnsortableField(String),
}

/// 排序字段 ("name" 升序, "-name" 降序)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

impl Ordering {
    /// Parse `"field"` / `"-field"`, rejecting fields outside `allowed`.
    pub fn parse(raw: &str, allowed: &[&str]) -> Result<Self, QueryError> {
        let raw = raw.trim();
        let (field, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        if field.is_empty() {
            return Err(QueryError::EmptyOrdering);
        }
        if !allowed.contains(&field) {
            return Err(QueryError::UnsortableField(field.to_string()));
        }
        Ok(Self {
            field: field.to_string(),
            descending,
        })
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Same field, opposite direction
    pub fn toggled(&self) -> Self {
        Self {
            field: self.field.clone(),
            descending: !self.descending,
        }
    }

    /// Header-click semantics: a new column starts ascending, the current
    /// column flips direction.
    pub fn next_for(current: Option<&Ordering>, field: &str) -> Self {
        match current {
            Some(cur) if cur.field == field => cur.toggled(),
            _ => Self::asc(field),
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// 列表查询请求
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityQuery {
    /// 全文搜索
    pub search: Option<String>,
    /// 排序字段
    pub ordering: Option<Ordering>,
    /// 仅激活 / 仅停用 (None = 全部)
    pub is_active: Option<bool>,
    /// 页码 (从 1 开始)
    pub page: Option<u32>,
    /// 每页数量
    pub page_size: Option<u32>,
    /// 实体特定的过滤条件 (store, role, scope, ...)
    pub filters: BTreeMap<String, Value>,
}

impl EntityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    pub fn active(mut self, is_active: Option<bool>) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Set an entity-specific filter; `Value::Null` removes it.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        match value.into() {
            Value::Null => {
                self.filters.remove(&key);
            }
            value => {
                self.filters.insert(key, value);
            }
        }
        self
    }

    /// Reject an ordering on a field outside `allowed`
    ///
    /// `Ordering::asc` and struct literals are not checked at construction.
    pub fn check_ordering(&self, allowed: &[&str]) -> Result<(), QueryError> {
        match &self.ordering {
            Some(ordering) if ordering.field.is_empty() => Err(QueryError::EmptyOrdering),
            Some(ordering) if !allowed.contains(&ordering.field.as_str()) => {
                Err(QueryError::UnsortableField(ordering.field.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Serialize to query-string pairs
    ///
    /// Blank search and null filters are omitted; filters come out in key order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering".to_string(), ordering.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active".to_string(), active.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_string(), size.to_string()));
        }
        for (key, value) in &self.filters {
            if let Some(rendered) = render_value(value) {
                pairs.push((key.clone(), rendered));
            }
        }
        pairs
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // 多值过滤: "1,2,3"
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTABLE: &[&str] = &["id", "code", "name", "priority"];

    #[test]
    fn test_ordering_parse() {
        let asc = Ordering::parse("priority", SORTABLE).unwrap();
        assert_eq!(asc.field, "priority");
        assert!(!asc.descending);

        let desc = Ordering::parse("-name", SORTABLE).unwrap();
        assert!(desc.descending);
        assert_eq!(desc.to_string(), "-name");

        assert_eq!(
            Ordering::parse("password", SORTABLE),
            Err(QueryError::UnsortableField("password".to_string()))
        );
        assert_eq!(Ordering::parse("-", SORTABLE), Err(QueryError::EmptyOrdering));
    }

    #[test]
    fn test_ordering_header_click() {
        let first = Ordering::next_for(None, "code");
        assert_eq!(first.to_string(), "code");
        let second = Ordering::next_for(Some(&first), "code");
        assert_eq!(second.to_string(), "-code");
        let other = Ordering::next_for(Some(&second), "name");
        assert_eq!(other.to_string(), "name");
    }

    #[test]
    fn test_query_pairs() {
        let query = EntityQuery::new()
            .search("  abc ")
            .order_by(Ordering::asc("priority"))
            .active(Some(false))
            .paginate(2, 25)
            .filter("store", 7)
            .filter("scope", "STORE");

        assert_eq!(
            query.to_pairs(),
            vec![
                ("search".to_string(), "abc".to_string()),
                ("ordering".to_string(), "priority".to_string()),
                ("is_active".to_string(), "false".to_string()),
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "25".to_string()),
                ("scope".to_string(), "STORE".to_string()),
                ("store".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_and_null_filter_omitted() {
        let query = EntityQuery::new()
            .search("   ")
            .filter("role", "admin")
            .filter("role", Value::Null);
        assert!(query.to_pairs().is_empty());
    }

    #[test]
    fn test_array_filter() {
        let query = EntityQuery::new().filter("id__in", vec![1, 2, 3]);
        assert_eq!(
            query.to_pairs(),
            vec![("id__in".to_string(), "1,2,3".to_string())]
        );
    }

    #[test]
    fn test_check_ordering_against_allow_list() {
        let allowed = ["id", "name"];
        assert_eq!(EntityQuery::new().check_ordering(&allowed), Ok(()));
        assert_eq!(
            EntityQuery::new()
                .order_by(Ordering::asc("name").toggled())
                .check_ordering(&allowed),
            Ok(())
        );
        assert_eq!(
            EntityQuery::new()
                .order_by(Ordering::asc("password"))
                .check_ordering(&allowed),
            Err(QueryError::UnsortableField("password".to_string()))
        );
        assert_eq!(
            EntityQuery::new().order_by(Ordering::asc("")).check_ordering(&allowed),
            Err(QueryError::EmptyOrdering)
        );
    }
}
