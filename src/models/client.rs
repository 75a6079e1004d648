use std::fmt;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={}, First name={}, Last name={}, Email={}",
            self.id, self.first_name, self.last_name, self.email
        )
    }
}

/// Sparse update for a client row.
///
/// Each field is applied only when present and non-empty; an empty string is
/// treated the same as an absent field and leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ClientPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Column/value pairs that will actually be written, in column order.
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Render a single `UPDATE` covering every assigned column.
    ///
    /// Returns `None` when nothing would change. The client id is bound last,
    /// after the column values, in the returned parameter order.
    pub fn update_statement(&self) -> Option<(String, Vec<&str>)> {
        let assignments = self.assignments();
        if assignments.is_empty() {
            return None;
        }

        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ${}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE clients SET {set_clause} WHERE id = ${}",
            assignments.len() + 1
        );
        let values = assignments.into_iter().map(|(_, v)| v).collect();

        Some((sql, values))
    }
}
