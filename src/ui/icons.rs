pub struct Icons;

impl Icons {
    pub const PILL: &str = "💊";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
}
