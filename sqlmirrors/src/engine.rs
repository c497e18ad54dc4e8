//! Adapter around the external SQL grammar engine.
//!
//! Every component parses and re-serializes through this type so the dialect
//! choice and identifier-quoting normalization live in one place. The process
//! normally uses the shared [`SqlEngine::global`] handle; tests may construct
//! their own instance.

use once_cell::sync::OnceCell;
use sqlparser::ast::{Select, SetExpr, Statement};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::error::{Result, SqlMirrorError};

static ENGINE: OnceCell<SqlEngine> = OnceCell::new();

/// Parser/printer handle. Cheap to construct, but callers are expected to go
/// through [`SqlEngine::global`] so initialization happens once per process;
/// concurrent first callers block on the same initialization.
#[derive(Debug, Default)]
pub struct SqlEngine {
    dialect: GenericDialect,
}

impl SqlEngine {
    pub fn new() -> Self {
        Self {
            dialect: GenericDialect {},
        }
    }

    pub fn global() -> &'static SqlEngine {
        ENGINE.get_or_init(|| {
            tracing::debug!("initializing sql engine");
            SqlEngine::new()
        })
    }

    /// Parse a single `SELECT` statement. Anything else is unsupported: the
    /// visual builder only ever produces or edits one `SELECT` at a time.
    pub fn parse_select(&self, sql: &str) -> Result<Statement> {
        let mut statements = Parser::parse_sql(&self.dialect, sql)?;
        if statements.len() != 1 {
            return Err(SqlMirrorError::Unsupported(format!(
                "expected a single statement, got {}",
                statements.len()
            )));
        }
        let statement = statements
            .pop()
            .ok_or_else(|| SqlMirrorError::Unsupported("empty input".to_string()))?;
        match statement {
            Statement::Query(query) => {
                if matches!(query.body.as_ref(), SetExpr::Select(_)) {
                    Ok(Statement::Query(query))
                } else {
                    Err(SqlMirrorError::Unsupported(format!(
                        "not a plain SELECT: {query}"
                    )))
                }
            }
            other => Err(SqlMirrorError::Unsupported(format!(
                "not a query statement: {other}"
            ))),
        }
    }

    /// Serialize a statement. Backtick identifier quoting (accepted on input)
    /// is normalized to the double-quote form the SQL editor displays.
    pub fn print(&self, statement: &Statement) -> String {
        statement.to_string().replace('`', "\"")
    }
}

/// The `SELECT` body of a statement returned by [`SqlEngine::parse_select`].
pub fn select_of(statement: &Statement) -> Result<&Select> {
    if let Statement::Query(query) = statement {
        if let SetExpr::Select(select) = query.body.as_ref() {
            return Ok(select);
        }
    }
    Err(SqlMirrorError::Unsupported(
        "statement has no SELECT body".to_string(),
    ))
}

pub fn select_mut(statement: &mut Statement) -> Result<&mut Select> {
    if let Statement::Query(query) = statement {
        if let SetExpr::Select(select) = query.body.as_mut() {
            return Ok(select);
        }
    }
    Err(SqlMirrorError::Unsupported(
        "statement has no SELECT body".to_string(),
    ))
}
