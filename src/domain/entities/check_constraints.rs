use diesel::prelude::*;
use diesel::sql_types::Text;

/// Row of `information_schema.check_constraints`.
#[derive(Debug, Clone, QueryableByName)]
pub struct CheckClauseRow {
    #[diesel(sql_type = Text)]
    pub check_clause: String,
}
