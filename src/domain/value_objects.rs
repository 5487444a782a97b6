use std::fmt;

/// Customer identity, assigned by the registry and stable across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId(u64);

impl CustomerId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identity after this one, or `None` once `u64` is exhausted.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Film code, chosen by whoever registers the film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilmCode(i32);

impl FilmCode {
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for FilmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer document (CPF)
///
/// Kept exactly as entered (trimmed). Equality for lookup and uniqueness
/// goes through [`Document::normalized`], which keeps only decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document(String);

impl Document {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        normalize_document(&self.0)
    }

    /// Whether `other` names the same document once both sides are reduced to digits.
    pub fn matches(&self, other: &str) -> bool {
        self.normalized() == normalize_document(other)
    }

    pub fn has_digits(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips every character that is not a decimal digit.
pub fn normalize_document(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Canonical genre label
///
/// Single-letter shorthands expand to the full Portuguese word; anything
/// longer is kept as typed (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre(String);

impl Genre {
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let canonical = match (chars.next(), chars.next()) {
            (None, _) => "",
            (Some(letter), None) => match letter.to_ascii_uppercase() {
                'A' => "Ação",
                'R' => "Romance",
                'D' => "Drama",
                'T' => "Terror",
                'F' => "Ficção Científica",
                _ => trimmed,
            },
            _ => trimmed,
        };
        Self(canonical.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of registered user.
///
/// Only `Cliente` is ever created by the registry; `Funcionario` survives
/// when it is read back from an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserKind {
    #[default]
    Cliente,
    Funcionario,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Cliente => "Cliente",
            UserKind::Funcionario => "Funcionario",
        }
    }

    /// Accepts the full word or the legacy single letter, case-insensitively.
    /// Unknown values fall back to `Cliente`.
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "f" | "funcionario" | "funcionário" => UserKind::Funcionario,
            _ => UserKind::Cliente,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UserKind::Cliente => "Cliente da Locadora",
            UserKind::Funcionario => "Funcionário da Locadora",
        }
    }
}
