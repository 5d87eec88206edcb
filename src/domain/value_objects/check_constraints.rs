use anyhow::{Result, bail};

use crate::domain::value_objects::enums::plan_types::PlanType;

/// A `CHECK (column IN (...))` constraint restricting a text column to a closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCheckConstraint {
    table: String,
    constraint_name: String,
    column: String,
    allowed_values: Vec<String>,
}

impl EnumCheckConstraint {
    pub fn new(
        table: &str,
        constraint_name: &str,
        column: &str,
        allowed_values: Vec<String>,
    ) -> Result<Self> {
        let table = normalize_identifier("table", table)?;
        let constraint_name = normalize_identifier("constraint", constraint_name)?;
        let column = normalize_identifier("column", column)?;

        if allowed_values.is_empty() {
            bail!("Allowed values for {constraint_name} must not be empty");
        }

        let mut deduped: Vec<String> = Vec::with_capacity(allowed_values.len());
        for value in allowed_values {
            if value.trim().is_empty() {
                bail!("Allowed values for {constraint_name} must be non-empty strings");
            }
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }

        Ok(Self {
            table,
            constraint_name,
            column,
            allowed_values: deduped,
        })
    }

    pub fn for_plan_types(table: &str, constraint_name: &str, column: &str) -> Result<Self> {
        let allowed = PlanType::ALL.iter().map(|t| t.as_str().to_string()).collect();
        Self::new(table, constraint_name, column, allowed)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn constraint_name(&self) -> &str {
        &self.constraint_name
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    pub fn drop_sql(&self) -> String {
        format!(
            "ALTER TABLE {} DROP CONSTRAINT IF EXISTS {}",
            self.table, self.constraint_name
        )
    }

    pub fn add_sql(&self) -> String {
        let values = self
            .allowed_values
            .iter()
            .map(|value| quote_literal(value))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "ALTER TABLE {} ADD CONSTRAINT {} CHECK ({} IN ({}))",
            self.table, self.constraint_name, self.column, values
        )
    }
}

/// Validates a plain SQL identifier and folds it to lower case, the form
/// Postgres stores for unquoted names and lists in its catalogs.
pub fn normalize_identifier(kind: &str, ident: &str) -> Result<String> {
    let mut chars = ident.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("Invalid {kind} identifier: {ident:?}");
    }
    Ok(ident.to_ascii_lowercase())
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
