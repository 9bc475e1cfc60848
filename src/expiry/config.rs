// -----------------------------------------------
// EXPIRY RESOLUTION
// -----------------------------------------------
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound on next-month retargets when a monthly expiry is holiday-blocked
pub const MAX_MONTH_ADVANCES: u32 = 12;

// -----------------------------------------------
// REQUEST DEFAULTS
// -----------------------------------------------
pub const DEFAULT_INDEX: &str = "NIFTY";
pub const DEFAULT_EXPIRY_KIND: &str = "both";

pub const EXAMPLE_GET: &str = "/api/expiry?index=NIFTY&date=2024-01-15";
pub const EXAMPLE_POST: &str = r#"Send JSON: {"index": "NIFTY", "date": "2024-01-15"}"#;

// -----------------------------------------------
// SERVICE METADATA
// -----------------------------------------------
pub const SERVICE_NAME: &str = "Expiry Date API";

pub const INDEX_HTML: &str = r#"<html>
    <head>
        <title>Expiry Date API</title>
        <style>
            body { font-family: Arial, sans-serif; margin: 40px; }
            .endpoint { background: #f5f5f5; padding: 15px; margin: 10px 0; border-radius: 5px; }
            code { background: #eee; padding: 2px 5px; }
        </style>
    </head>
    <body>
        <h1>Expiry Date API</h1>
        <div class="endpoint">
            <h3>Expiry endpoints</h3>
            <ul>
                <li><code>GET /api/health</code> - Health check</li>
                <li><code>GET|POST /api/expiry?index=NIFTY&date=2024-01-15</code> - Monthly and weekly expiry</li>
                <li><code>GET /api/expiry/monthly?index=NIFTY&date=2024-01-15</code> - Monthly expiry only</li>
                <li><code>GET /api/expiry/weekly?index=NIFTY&date=2024-01-15</code> - Weekly expiry only</li>
                <li><code>GET /api/holidays</code> - Market holidays</li>
            </ul>
        </div>
        <div class="endpoint">
            <h3>Market data utilities</h3>
            <ul>
                <li><code>POST /api/instruments</code> - NSE equity symbol to instrument token map</li>
                <li><code>GET|POST /api/price-history/download</code> - Download and resample price history</li>
                <li><code>GET|POST /api/sma</code> - Simple moving average</li>
                <li><code>GET|POST /api/options</code> - In-memory options list</li>
            </ul>
        </div>
    </body>
</html>"#;

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Optional JSON file (`{"YYYY-MM-DD": "label"}`) replacing the built-in holiday table
pub fn get_holidays_file() -> Option<String> {
    std::env::var("EXPIRY_HOLIDAYS_FILE").ok().filter(|p| !p.trim().is_empty())
}

/// Reference date for single mode, defaults to today when unset
pub fn get_single_date() -> Option<String> {
    std::env::var("EXPIRY_DATE").ok()
}

pub fn get_single_index() -> String {
    std::env::var("EXPIRY_INDEX").unwrap_or_else(|_| DEFAULT_INDEX.to_string())
}
