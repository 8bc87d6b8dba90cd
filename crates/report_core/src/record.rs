/// Shown in place of a value the upstream API did not provide.
pub const PLACEHOLDER: &str = "—";

/// Canonical user entry. Every field is always populated; empty strings and
/// [`PLACEHOLDER`] are allowed, absence is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
}

impl UserRecord {
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Name => &self.name,
            Column::Email => &self.email,
            Column::Phone => &self.phone,
            Column::Company => &self.company_name,
        }
    }
}

/// A table column. Doubles as sort key and export column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    Email,
    Phone,
    Company,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 4] = [Column::Name, Column::Email, Column::Phone, Column::Company];

    pub fn label(self) -> &'static str {
        match self {
            Column::Name => "Имя",
            Column::Email => "Email",
            Column::Phone => "Телефон",
            Column::Company => "Компания",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
