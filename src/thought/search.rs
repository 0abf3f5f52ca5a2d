//! Read path — filtered listing with pagination and full-text search.
//!
//! Filtering reads the pre-computed annotation columns; nothing here
//! re-invokes the analysis pipeline.

use anyhow::Result;
use rusqlite::{Connection, ToSql};
use serde::{Deserialize, Serialize};

use crate::analysis::{Category, Emotion};
use crate::thought::types::Thought;
use crate::thought::{thought_from_row, THOUGHT_COLUMNS};

/// Hard cap on page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Filters over stored thoughts. All fields are optional and AND-combined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThoughtFilter {
    pub category: Option<Category>,
    pub emotion: Option<Emotion>,
    /// Match thoughts carrying this tag.
    pub tag: Option<String>,
    pub min_importance: Option<f64>,
    pub max_importance: Option<f64>,
    /// RFC 3339 lower bound on creation time, inclusive.
    pub created_after: Option<String>,
    /// RFC 3339 upper bound on creation time, inclusive.
    pub created_before: Option<String>,
    /// Free-text query, matched against content via the FTS index.
    pub search: Option<String>,
}

/// Column to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Importance,
    Novelty,
    Sentiment,
    Complexity,
    Category,
}

impl SortKey {
    fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Importance => "importance",
            Self::Novelty => "novelty",
            Self::Sentiment => "sentiment",
            Self::Complexity => "complexity",
            Self::Category => "category",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            "importance" => Ok(Self::Importance),
            "novelty" => Ok(Self::Novelty),
            "sentiment" => Ok(Self::Sentiment),
            "complexity" => Ok(Self::Complexity),
            "category" => Ok(Self::Category),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// Sort order for listings. Defaults to newest first.
#[derive(Debug, Clone, Copy)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            descending: true,
        }
    }
}

/// 1-based pagination request.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, size: 50 }
    }
}

/// One page of results plus totals.
#[derive(Debug, Serialize)]
pub struct ThoughtListResponse {
    pub thoughts: Vec<Thought>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: u64,
}

/// List thoughts matching `filter`, ordered and paginated.
pub fn list_thoughts(
    conn: &Connection,
    filter: &ThoughtFilter,
    order: SortOrder,
    page: PageRequest,
) -> Result<ThoughtListResponse> {
    let (where_clause, params) = build_where(filter);

    let total: i64 = {
        let sql = format!("SELECT COUNT(*) FROM thoughts {where_clause}");
        let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
        conn.query_row(&sql, param_refs.as_slice(), |row| row.get(0))?
    };

    let page_num = page.page.max(1);
    let page_size = page.size.clamp(1, MAX_PAGE_SIZE);
    let offset = (page_num - 1) * page_size;
    let direction = if order.descending { "DESC" } else { "ASC" };

    let sql = format!(
        "SELECT {THOUGHT_COLUMNS} FROM thoughts {where_clause} \
         ORDER BY {col} {direction}, rowid {direction} LIMIT {page_size} OFFSET {offset}",
        col = order.key.as_column(),
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let thoughts: Vec<Thought> = stmt
        .query_map(param_refs.as_slice(), thought_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let total = total as u64;
    let total_pages = total.div_ceil(page_size as u64);

    Ok(ThoughtListResponse {
        thoughts,
        total,
        page: page_num,
        page_size,
        total_pages,
    })
}

/// Build the WHERE clause and its bound parameters from a filter.
fn build_where(filter: &ThoughtFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(category) = filter.category {
        clauses.push("category = ?".into());
        params.push(Box::new(category.as_str()));
    }
    if let Some(emotion) = filter.emotion {
        clauses.push("emotion = ?".into());
        params.push(Box::new(emotion.as_str()));
    }
    if let Some(ref tag) = filter.tag {
        clauses.push(
            "EXISTS (SELECT 1 FROM json_each(thoughts.tags) WHERE json_each.value = ?)".into(),
        );
        params.push(Box::new(tag.trim().to_lowercase()));
    }
    if let Some(min) = filter.min_importance {
        clauses.push("importance >= ?".into());
        params.push(Box::new(min));
    }
    if let Some(max) = filter.max_importance {
        clauses.push("importance <= ?".into());
        params.push(Box::new(max));
    }
    if let Some(ref after) = filter.created_after {
        clauses.push("created_at >= ?".into());
        params.push(Box::new(after.clone()));
    }
    if let Some(ref before) = filter.created_before {
        clauses.push("created_at <= ?".into());
        params.push(Box::new(before.clone()));
    }
    if let Some(ref term) = filter.search {
        if !term.trim().is_empty() {
            clauses.push("id IN (SELECT id FROM thoughts_fts WHERE thoughts_fts MATCH ?)".into());
            params.push(Box::new(fts_phrase(term)));
        }
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_clause, params)
}

/// Quote a user-supplied term as an FTS5 phrase so query syntax characters
/// cannot leak into the match expression.
fn fts_phrase(term: &str) -> String {
    format!("\"{}\"", term.trim().replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Lexicon;
    use crate::config::AnalysisConfig;
    use crate::thought::store::create_thought;
    use crate::thought::types::NewThought;

    fn seed(conn: &mut Connection, content: &str, category: Category, tags: &[&str]) -> Thought {
        let lexicon = Lexicon::builtin();
        create_thought(
            conn,
            &lexicon,
            &AnalysisConfig::default(),
            &NewThought {
                category,
                content: content.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn test_db() -> Connection {
        crate::db::open_memory_database().unwrap()
    }

    #[test]
    fn unfiltered_list_returns_newest_first() {
        let mut conn = test_db();
        seed(&mut conn, "first entry", Category::Reflection, &[]);
        seed(&mut conn, "second entry", Category::Reflection, &[]);

        let response = list_thoughts(
            &conn,
            &ThoughtFilter::default(),
            SortOrder::default(),
            PageRequest::default(),
        )
        .unwrap();

        assert_eq!(response.total, 2);
        assert_eq!(response.thoughts[0].content, "second entry");
        assert_eq!(response.thoughts[1].content, "first entry");
    }

    #[test]
    fn category_and_emotion_filters_apply() {
        let mut conn = test_db();
        seed(&mut conn, "decided to migrate", Category::Decision, &[]);
        seed(&mut conn, "so worried about cost", Category::Reflection, &[]);

        let filter = ThoughtFilter {
            category: Some(Category::Decision),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.thoughts[0].category, Category::Decision);

        let filter = ThoughtFilter {
            emotion: Some(Emotion::Anxious),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.thoughts[0].emotion, Some(Emotion::Anxious));
    }

    #[test]
    fn tag_filter_matches_normalized_tags() {
        let mut conn = test_db();
        seed(&mut conn, "tagged entry", Category::Reflection, &["Work"]);
        seed(&mut conn, "untagged entry", Category::Reflection, &[]);

        let filter = ThoughtFilter {
            tag: Some("work".to_string()),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.thoughts[0].content, "tagged entry");

        // Filter input is normalized the same way tags were on write.
        let filter = ThoughtFilter {
            tag: Some("  WORK ".to_string()),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
    }

    #[test]
    fn importance_bounds_filter() {
        let mut conn = test_db();
        let lexicon = Lexicon::builtin();
        for (content, importance) in [("low", 0.1), ("mid", 0.5), ("high", 0.9)] {
            create_thought(
                &mut conn,
                &lexicon,
                &AnalysisConfig::default(),
                &NewThought {
                    content: content.to_string(),
                    importance: Some(importance),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let filter = ThoughtFilter {
            min_importance: Some(0.4),
            max_importance: Some(0.6),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.thoughts[0].content, "mid");
    }

    #[test]
    fn free_text_search_uses_fts() {
        let mut conn = test_db();
        seed(&mut conn, "the quantum computer hums", Category::Observation, &[]);
        seed(&mut conn, "watered the plants", Category::Observation, &[]);

        let filter = ThoughtFilter {
            search: Some("quantum".to_string()),
            ..Default::default()
        };
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 1);
        assert!(response.thoughts[0].content.contains("quantum"));
    }

    #[test]
    fn search_term_with_quotes_is_safe() {
        let mut conn = test_db();
        seed(&mut conn, "plain entry", Category::Reflection, &[]);

        let filter = ThoughtFilter {
            search: Some("\"; DROP TABLE thoughts; --".to_string()),
            ..Default::default()
        };
        // Must not error — the term is treated as a phrase, matching nothing.
        let response =
            list_thoughts(&conn, &filter, SortOrder::default(), PageRequest::default()).unwrap();
        assert_eq!(response.total, 0);
    }

    #[test]
    fn pagination_slices_and_counts() {
        let mut conn = test_db();
        for i in 0..5 {
            seed(&mut conn, &format!("entry number {i}"), Category::Reflection, &[]);
        }

        let page = PageRequest { page: 2, size: 2 };
        let response =
            list_thoughts(&conn, &ThoughtFilter::default(), SortOrder::default(), page).unwrap();

        assert_eq!(response.total, 5);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.page, 2);
        assert_eq!(response.thoughts.len(), 2);
        // Newest-first: page 2 holds entries 2 and 1.
        assert_eq!(response.thoughts[0].content, "entry number 2");
    }

    #[test]
    fn ordering_by_importance_ascending() {
        let mut conn = test_db();
        let lexicon = Lexicon::builtin();
        for (content, importance) in [("b", 0.9), ("a", 0.1)] {
            create_thought(
                &mut conn,
                &lexicon,
                &AnalysisConfig::default(),
                &NewThought {
                    content: content.to_string(),
                    importance: Some(importance),
                    ..Default::default()
                },
            )
            .unwrap();
        }

        let order = SortOrder {
            key: SortKey::Importance,
            descending: false,
        };
        let response =
            list_thoughts(&conn, &ThoughtFilter::default(), order, PageRequest::default())
                .unwrap();
        assert_eq!(response.thoughts[0].content, "a");
        assert_eq!(response.thoughts[1].content, "b");
    }
}
