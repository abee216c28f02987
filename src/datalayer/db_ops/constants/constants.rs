pub const URL: &str = "mongodb://localhost:27017/lendify";
pub const DEFAULT_DATABASE: &str = "lendify";

/// Collections summarised by the dashboard service
pub const DASHBOARD_COLLECTIONS: [&str; 3] = ["students", "books", "loans"];
