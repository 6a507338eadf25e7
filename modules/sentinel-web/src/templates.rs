use sentinel_common::{IntelRecord, IntelSnapshot};

const STYLE: &str = r#"
body { background-color: #000; color: #f2f2f7; font-family: -apple-system, system-ui, sans-serif; margin: 0; overflow: hidden; }
a { color: inherit; text-decoration: none; }
.terminal-grid { display: grid; grid-template-columns: 420px 1fr 320px; grid-template-rows: 100px 1fr; height: 100vh; gap: 1px; background: #1c1c1e; }
.module { background: #000; padding: 40px; overflow-y: auto; }
.header-container { grid-column: 1 / span 3; background: #000; display: flex; justify-content: space-between; align-items: center; padding: 0 60px; border-bottom: 1px solid #2c2c2e; }
.header-container h1 { margin: 0; letter-spacing: 4px; font-size: 28px; font-weight: 800; }
.header-container p { font-size: 11px; color: #8e8e93; margin-top: 4px; max-width: 700px; }
.section-label { color: #8e8e93; font-size: 12px; font-weight: 700; letter-spacing: 3px; margin-bottom: 30px; }
.data-row { padding: 20px 25px; border-bottom: 1px solid #1c1c1e; border-left: 5px solid transparent; display: flex; justify-content: space-between; align-items: center; min-height: 95px; box-sizing: border-box; transition: 0.2s; }
.data-row:hover { background: #1c1c1e; }
.data-row.selected { background: #1c1c1e; border-left: 5px solid #ff3b30; }
.city-label { font-weight: 700; font-size: 18px; color: #fff; }
.sub-info { font-size: 11px; color: #8e8e93; margin-top: 6px; display: block; font-family: 'Courier New', monospace; font-weight: bold; line-height: 1.4; }
.status-tag { font-size: 10px; font-weight: 800; height: 26px; line-height: 24px; width: 95px; border: 1px solid; text-align: center; font-family: 'Courier New', monospace; display: inline-block; box-sizing: border-box; flex-shrink: 0; }
.risk-bar { height: 6px; background: #1c1c1e; width: 100%; margin-top: 15px; position: relative; border-radius: 3px; }
.risk-fill { height: 100%; position: absolute; left: 0; top: 0; border-radius: 3px; }
.live-dot { height: 10px; width: 10px; background-color: #32d74b; border-radius: 50%; display: inline-block; margin-right: 15px; animation: blink-green 2s infinite ease-in-out; }
@keyframes blink-green { 0% { opacity: 1; box-shadow: 0 0 12px #32d74b; } 50% { opacity: 0.3; box-shadow: 0 0 0 #32d74b; } 100% { opacity: 1; box-shadow: 0 0 12px #32d74b; } }
.scanline { position: fixed; top: 0; left: 0; width: 100%; height: 100%; background: linear-gradient(rgba(18, 16, 16, 0) 50%, rgba(0, 0, 0, 0.05) 50%); background-size: 100% 4px; z-index: 1000; pointer-events: none; }
.tz-select { background: #1c1c1e; border: 1px solid #2c2c2e; color: #8e8e93; font-family: monospace; font-size: 11px; height: 34px; min-width: 160px; }
.clock { font-size: 24px; color: #ff3b30; font-weight: 700; font-family: monospace; text-align: right; letter-spacing: 2px; }
.metric-label { font-size: 12px; color: #8e8e93; margin-bottom: 10px; font-weight: 600; }
.placeholder { color: #3a3a3c; text-align: center; margin-top: 250px; font-size: 16px; font-weight: 600; }
"#;

const CLOCK_SCRIPT: &str = r#"
<script>
(function () {
    const select = document.getElementById('tz-selector');
    const clock = document.getElementById('utc-clock');
    const saved = window.localStorage.getItem('sentinel-tz');
    if (saved) select.value = saved;
    select.addEventListener('change', () => {
        window.localStorage.setItem('sentinel-tz', select.value);
        tick();
    });
    function tick() {
        const tz = select.value;
        const opts = { hour: '2-digit', minute: '2-digit', second: '2-digit', hour12: false };
        let suffix = 'LCL';
        if (tz !== 'LOCAL') {
            opts.timeZone = tz;
            suffix = tz.includes('/') ? tz.split('/').pop() : tz;
        }
        const time = new Intl.DateTimeFormat('en-GB', opts).format(new Date());
        clock.textContent = time + ' ' + suffix.slice(0, 3).toUpperCase();
    }
    tick();
    setInterval(tick, 1000);
})();
</script>
"#;

/// Timezone selector entries: (value, label).
const TIMEZONES: &[(&str, &str)] = &[
    ("UTC", "UTC (ZULU)"),
    ("LOCAL", "LOCAL (AUTO)"),
    ("US/Eastern", "EST (NEW YORK)"),
    ("Europe/London", "GMT (LONDON)"),
    ("Asia/Tokyo", "JST (TOKYO)"),
];

/// Render the full dashboard, optionally with one node selected.
pub fn render_dashboard(snapshot: &IntelSnapshot, selected: Option<&IntelRecord>) -> String {
    let rows: String = snapshot
        .records()
        .iter()
        .map(|r| render_row(r, selected.is_some_and(|s| s.name == r.name)))
        .collect();

    let (briefing, metrics) = match selected {
        Some(record) => (render_briefing(record, snapshot), render_metrics(record)),
        None => (
            r#"<div class="placeholder">SELECT A NODE TO BEGIN ANALYSIS.</div>"#.to_string(),
            String::new(),
        ),
    };

    let tz_options: String = TIMEZONES
        .iter()
        .map(|(value, label)| format!(r#"<option value="{value}">{label}</option>"#))
        .collect();

    let content = format!(
        r#"<div class="terminal-grid">
    <div class="header-container">
        <div>
            <h1><a href="/">SENTINEL // NODE MONITOR</a></h1>
            <p>Strategic intelligence grid tracking emerging global instability.</p>
        </div>
        <div>
            <div style="display:flex;align-items:center;margin-bottom:5px;">
                <span style="font-size:9px;color:#48484a;margin-right:10px;font-weight:800;font-family:monospace;">TIMEZONE:</span>
                <select id="tz-selector" class="tz-select">{tz_options}</select>
            </div>
            <div id="utc-clock" class="clock"></div>
        </div>
    </div>
    <div class="module">
        <div style="margin-bottom:30px;"><span class="live-dot"></span><span style="color:#8e8e93;font-size:12px;font-weight:700;letter-spacing:2px;">NETWORK SENSORS</span></div>
        {rows}
    </div>
    <div class="module">
        <div class="section-label">INTELLIGENCE DOSSIER</div>
        <div id="detail-view">{briefing}</div>
    </div>
    <div class="module">
        <div class="section-label" style="margin-bottom:40px;">SIGNAL ANALYTICS</div>
        <div id="dynamic-metrics">{metrics}</div>
    </div>
</div>
{CLOCK_SCRIPT}"#
    );

    build_page("SENTINEL", &content)
}

fn render_row(record: &IntelRecord, is_selected: bool) -> String {
    let class = if is_selected { "data-row selected" } else { "data-row" };
    let color = record.color.hex();
    format!(
        r#"<a href="/nodes/{href}" class="{class}">
    <div>
        <span class="city-label">{name}</span>
        <span class="sub-info">SCORE: {risk}% // {country}</span>
    </div>
    <span class="status-tag" style="color:{color};border-color:{color};">{status}</span>
</a>"#,
        href = urlencoding::encode(&record.name),
        name = html_escape(&record.name.to_uppercase()),
        risk = record.risk,
        country = html_escape(&record.country.to_uppercase()),
        status = record.status,
    )
}

fn render_briefing(record: &IntelRecord, snapshot: &IntelSnapshot) -> String {
    let color = record.color.hex();
    // Last two characters of the uplink id, e.g. "04".
    let channel = record
        .source
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| &record.source[i..])
        .unwrap_or(&record.source);

    format!(
        r#"<div style="margin-bottom:60px;">
    <div style="color:#636366;font-size:13px;font-weight:700;font-family:monospace;">ORIGIN: {country}</div>
    <h2 style="font-size:72px;margin:10px 0;color:#fff;font-weight:900;letter-spacing:-1px;">{name}</h2>
    <div style="color:#32d74b;font-size:14px;font-weight:700;font-family:monospace;">LAST SYNC: {synced} UTC</div>
</div>
<div style="padding:50px;border:1px solid {color}44;background:rgba(28,28,30,0.4);border-radius:8px;">
    <div style="margin-bottom:25px;">
        <span style="color:#8e8e93;font-weight:700;font-size:13px;">REPORT CAPTURE: </span>
        <span style="color:#48484a;font-size:12px;margin-left:10px;font-family:monospace;">SOURCE_SAT_UPLINK_{channel}</span>
    </div>
    <p style="font-size:28px;line-height:1.4;color:{color};font-weight:800;margin:0;">{intel}</p>
</div>"#,
        country = html_escape(&record.country.to_uppercase()),
        name = html_escape(&record.name.to_uppercase()),
        synced = snapshot.synced_at.format("%Y-%m-%d %H:%M:%S"),
        channel = html_escape(channel),
        intel = html_escape(&record.intel),
    )
}

fn render_metrics(record: &IntelRecord) -> String {
    format!(
        r#"<div style="margin-bottom:50px;">
    <div class="metric-label">THREAT RISK</div>
    <div class="risk-bar"><div class="risk-fill" style="width:{risk}%;background-color:{color};"></div></div>
</div>
<div style="margin-bottom:40px;">
    <div class="metric-label">SIGNAL PARITY</div>
    <div style="color:#32d74b;font-size:32px;font-weight:800;font-family:monospace;">99.98%</div>
</div>
<div>
    <div class="metric-label">DATA INTEGRITY</div>
    <div style="color:#ffd60a;font-size:28px;font-weight:800;font-family:monospace;">VERIFIED</div>
</div>"#,
        risk = record.risk.min(100),
        color = record.color.hex(),
    )
}

pub fn render_not_found(name: &str) -> String {
    let content = format!(
        r#"<div class="module" style="height:100vh;"><div class="placeholder">NO SIGNAL FOR NODE {}. <a href="/" style="color:#ff3b30;">RETURN</a></div></div>"#,
        html_escape(&name.to_uppercase())
    );
    build_page("SENTINEL // UNKNOWN NODE", &content)
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body><div class="scanline"></div>{content}</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sentinel_common::{SignalColor, ThreatStatus};

    fn record() -> IntelRecord {
        IntelRecord {
            name: "Tel Aviv".to_string(),
            country: "Israel".to_string(),
            intel: "IRON DOME <INTERCEPTS> OVER TEL AVIV.".to_string(),
            source: "SAT_UPLINK_04".to_string(),
            risk: 82,
            status: ThreatStatus::High,
            color: SignalColor::Orange,
            is_fallback: false,
            latitude: "32.08".to_string(),
            longitude: "34.78".to_string(),
        }
    }

    #[test]
    fn test_row_links_are_percent_encoded() {
        let mut nyc = record();
        nyc.name = "New York City".to_string();
        let html = render_row(&nyc, false);
        assert!(html.contains(r#"href="/nodes/New%20York%20City""#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_dashboard_without_selection_shows_placeholder() {
        let snapshot = IntelSnapshot::new(vec![record()], Utc::now());
        let html = render_dashboard(&snapshot, None);
        assert!(html.contains("SELECT A NODE TO BEGIN ANALYSIS."));
        assert!(html.contains("/nodes/Tel%20Aviv"));
        assert!(html.contains("SCORE: 82% // ISRAEL"));
        assert!(!html.contains("data-row selected"));
    }

    #[test]
    fn test_dashboard_with_selection_renders_briefing() {
        let snapshot = IntelSnapshot::new(vec![record()], Utc::now());
        let html = render_dashboard(&snapshot, snapshot.find("Tel Aviv"));
        assert!(html.contains("data-row selected"));
        assert!(html.contains("SOURCE_SAT_UPLINK_04"));
        assert!(html.contains("IRON DOME &lt;INTERCEPTS&gt; OVER TEL AVIV."));
        assert!(html.contains("width:82%"));
        assert!(html.contains("ORIGIN: ISRAEL"));
    }
}
