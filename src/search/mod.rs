//! Optional-criteria client search.
//!
//! A [`SearchCriteria`] holds up to four substring patterns. Every present,
//! non-empty pattern becomes one case-insensitive condition; the conditions are
//! joined by the criteria's [`Combinator`] and rendered into a parameterized
//! `SELECT` that yields at most one client.

use std::fmt;

use crate::models::Client;

const SELECT_CLIENT: &str = "SELECT c.id, c.first_name, c.last_name, c.email FROM clients c";

/// How multiple conditions are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combinator {
    /// A client matches when any condition holds (`OR`).
    #[default]
    Any,
    /// A client matches only when every condition holds (`AND`).
    All,
}

impl Combinator {
    fn separator(self) -> &'static str {
        match self {
            Combinator::Any => " OR ",
            Combinator::All => " AND ",
        }
    }
}

/// A searchable field. `Phone` is virtual: it is checked against the phones
/// owned by the client rather than a column of `clients`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
}

impl Field {
    fn condition(self, placeholder: usize) -> String {
        match self {
            Field::FirstName => format!("c.first_name ILIKE ${placeholder}"),
            Field::LastName => format!("c.last_name ILIKE ${placeholder}"),
            Field::Email => format!("c.email ILIKE ${placeholder}"),
            Field::Phone => format!(
                "EXISTS (SELECT 1 FROM phones p WHERE p.client_id = c.id AND p.phone ILIKE ${placeholder})"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub combinator: Combinator,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, pattern: impl Into<String>) -> Self {
        self.first_name = Some(pattern.into());
        self
    }

    pub fn last_name(mut self, pattern: impl Into<String>) -> Self {
        self.last_name = Some(pattern.into());
        self
    }

    pub fn email(mut self, pattern: impl Into<String>) -> Self {
        self.email = Some(pattern.into());
        self
    }

    pub fn phone(mut self, pattern: impl Into<String>) -> Self {
        self.phone = Some(pattern.into());
        self
    }

    pub fn combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Fields that contribute a condition, with their raw patterns.
    pub fn active(&self) -> Vec<(Field, &str)> {
        [
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::Email, &self.email),
            (Field::Phone, &self.phone),
        ]
        .into_iter()
        .filter_map(|(field, pattern)| match pattern.as_deref() {
            Some(p) if !p.is_empty() => Some((field, p)),
            _ => None,
        })
        .collect()
    }

    /// Render the lookup query. Parameters line up with `$1..$n` in order.
    pub fn to_query(&self) -> ClientQuery {
        let active = self.active();

        let mut sql = String::from(SELECT_CLIENT);
        if !active.is_empty() {
            let conditions = active
                .iter()
                .enumerate()
                .map(|(i, (field, _))| field.condition(i + 1))
                .collect::<Vec<_>>()
                .join(self.combinator.separator());
            sql.push_str(" WHERE ");
            sql.push_str(&conditions);
        }
        sql.push_str(" ORDER BY c.id LIMIT 1");

        let params = active
            .into_iter()
            .map(|(_, pattern)| contains_pattern(pattern))
            .collect();

        ClientQuery { sql, params }
    }
}

/// SQL text plus its positional bind values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Wrap `value` for a literal substring `ILIKE` match.
///
/// `\`, `%` and `_` are escaped with the default backslash escape so they
/// match themselves instead of acting as wildcards.
pub fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Result of a best-effort client lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    Found(Client),
    NotFound,
    /// The lookup failed; carries the error message.
    Failed(String),
}

impl FindOutcome {
    pub fn client(&self) -> Option<&Client> {
        match self {
            FindOutcome::Found(client) => Some(client),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FindOutcome::NotFound)
    }
}

impl fmt::Display for FindOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindOutcome::Found(client) => write!(f, "Found client: {client}"),
            FindOutcome::NotFound => write!(f, "Client not found."),
            FindOutcome::Failed(message) => write!(f, "{message}"),
        }
    }
}
