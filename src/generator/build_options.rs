use serde::{Deserialize, Serialize};

/// Layout of the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildOptions {
    /// One clause per line with indented lists; single line otherwise.
    pub format_sql: bool,
    /// Prefix the statement with comments describing the structure.
    pub include_comments: bool,
    pub indent_width: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { format_sql: true, include_comments: false, indent_width: 4 }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { format_sql: false, ..Self::default() }
    }

    pub fn with_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
