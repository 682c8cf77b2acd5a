/// Log tags identifying the subsystem a message originates from
///
/// Tags are rendered as a fixed-width colored column so log output stays
/// aligned and scannable.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Cache,
    Store,
    Api,
    Market,
    Config,
}

impl LogTag {
    /// Plain uppercase name, used for file output (no ANSI codes)
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Cache => "CACHE",
            LogTag::Store => "STORE",
            LogTag::Api => "API",
            LogTag::Market => "MARKET",
            LogTag::Config => "CONFIG",
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
