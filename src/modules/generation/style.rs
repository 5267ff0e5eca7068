/// Generation mode selecting the instruction prepended to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Casual,
    Formal,
    Blended,
}

struct StyleEntry {
    style: Style,
    name: &'static str,
    instruction: &'static str,
}

/// Name and instruction per style, in generation order
const STYLE_TABLE: &[StyleEntry] = &[
    StyleEntry {
        style: Style::Casual,
        name: "casual",
        instruction: "Respond in a casual and creative way",
    },
    StyleEntry {
        style: Style::Formal,
        name: "formal",
        instruction: "Provide a formal response shortly",
    },
    StyleEntry {
        style: Style::Blended,
        name: "blended",
        instruction: "Respond as a blend of both casual and formal styles",
    },
];

impl Style {
    /// Every style, in the order a create request generates them
    pub const ALL: [Style; 3] = [Style::Casual, Style::Formal, Style::Blended];

    fn entry(self) -> Option<&'static StyleEntry> {
        STYLE_TABLE.iter().find(|entry| entry.style == self)
    }

    pub fn instruction(self) -> &'static str {
        self.entry().map(|e| e.instruction).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.entry().map(|e| e.name).unwrap_or_default()
    }

    /// Full prompt text sent upstream for `query`
    pub fn build_prompt(self, query: &str) -> String {
        format!("{} to this query: {}", self.instruction(), query)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
