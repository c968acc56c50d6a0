use crate::Result;
use crate::model::ReportData;

/// Render a self-contained HTML report with the trace data embedded as JSON.
///
/// The template is substituted, not `format!`ed: its JS leans on `${}`
/// template literals, whose braces would collide with Rust format strings.
pub fn render_html_report(data: &ReportData) -> Result<String> {
    let json = serde_json::to_string(data)?; // embedded as a JS object literal

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Particle Traces</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  .legend { display: flex; gap: 12px; flex-wrap: wrap; padding: 10px 16px; font-size: 14px; }
  .key { cursor: pointer; user-select: none; display: inline-flex; align-items: center; gap: 6px;
         padding: 2px 6px; border-radius: 4px; }
  .key:hover { background: #f3f3f3; }
  .key.off { opacity: 0.35; }
  .swatch { display: inline-block; width: 12px; height: 12px; border-radius: 3px; }

  .panels { display: flex; gap: 16px; flex-wrap: wrap; padding: 0 16px 16px; }
  .panel h2 { font-size: 16px; margin: 8px 0; text-align: center; }
  svg { border: 1px solid #eee; background: white; }
  .grid { stroke: #eee; stroke-width: 1; }
  .frame { fill: none; stroke: #bbb; stroke-width: 1; }
  .tick { fill: #666; font-size: 11px; font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="legend" id="legend"></div>

<div class="panels">
  <div class="panel">
    <h2>Position</h2>
    <svg id="position" width="560" height="460"></svg>
  </div>
  <div class="panel">
    <h2>Momenta</h2>
    <svg id="momenta" width="560" height="460"></svg>
  </div>
</div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const PALETTE = ["#3366cc", "#dc3912", "#ff9900", "#109618", "#990099",
                 "#0099c6", "#dd4477", "#66aa00", "#b82e2e", "#316395"];

const PANELS = [
  { el: "position", key: "position" },
  { el: "momenta", key: "momenta" }
];

const W = 560, H = 460;
const M = { left: 56, right: 12, top: 12, bottom: 32 };

const state = {
  hidden: new Set()
};

function color(i) {
  return PALETTE[i % PALETTE.length];
}

function fmtTick(x) {
  const a = Math.abs(x);
  if (a !== 0 && (a < 0.001 || a >= 100000)) return x.toExponential(2);
  return String(Math.round(x * 1000) / 1000);
}

function ticks(lo, hi, n) {
  const out = [];
  const step = (hi - lo) / (n - 1);
  for (let i = 0; i < n; i++) out.push(lo + step * i);
  return out;
}

// Bounds are computed over all particles (not just visible ones) so the
// axes stay put while traces are toggled.
function seriesBounds(key) {
  let minX = Infinity, maxX = -Infinity, minY = Infinity, maxY = -Infinity;
  for (const p of DATA.particles) {
    for (const [x, y] of p[key]) {
      if (x < minX) minX = x;
      if (x > maxX) maxX = x;
      if (y < minY) minY = y;
      if (y > maxY) maxY = y;
    }
  }
  if (minX > maxX) { minX = -1; maxX = 1; minY = -1; maxY = 1; }
  const padX = (maxX - minX || 2) * 0.05;
  const padY = (maxY - minY || 2) * 0.05;
  return { minX: minX - padX, maxX: maxX + padX, minY: minY - padY, maxY: maxY + padY };
}

function renderPanel(panel) {
  const b = seriesBounds(panel.key);
  const sx = x => M.left + (x - b.minX) / (b.maxX - b.minX) * (W - M.left - M.right);
  const sy = y => H - M.bottom - (y - b.minY) / (b.maxY - b.minY) * (H - M.top - M.bottom);

  const parts = [];

  for (const t of ticks(b.minX, b.maxX, 5)) {
    const x = sx(t);
    parts.push(`<line class="grid" x1="${x}" y1="${M.top}" x2="${x}" y2="${H - M.bottom}"/>`);
    parts.push(`<text class="tick" x="${x}" y="${H - M.bottom + 18}" text-anchor="middle">${fmtTick(t)}</text>`);
  }
  for (const t of ticks(b.minY, b.maxY, 5)) {
    const y = sy(t);
    parts.push(`<line class="grid" x1="${M.left}" y1="${y}" x2="${W - M.right}" y2="${y}"/>`);
    parts.push(`<text class="tick" x="${M.left - 6}" y="${y + 4}" text-anchor="end">${fmtTick(t)}</text>`);
  }
  parts.push(`<rect class="frame" x="${M.left}" y="${M.top}" width="${W - M.left - M.right}" height="${H - M.top - M.bottom}"/>`);

  DATA.particles.forEach((p, i) => {
    if (state.hidden.has(i)) return;
    const pts = p[panel.key].map(([x, y]) => `${sx(x)},${sy(y)}`).join(" ");
    parts.push(`<polyline points="${pts}" fill="none" stroke="${color(i)}" stroke-width="1.5"/>`);
  });

  if (DATA.particles.length === 0) {
    parts.push(`<text class="tick" x="${W / 2}" y="${H / 2}" text-anchor="middle">no data records</text>`);
  }

  document.getElementById(panel.el).innerHTML = parts.join("");
}

function renderLegend() {
  const el = document.getElementById("legend");
  el.innerHTML = DATA.particles.map((p, i) => {
    const off = state.hidden.has(i) ? " off" : "";
    return `<span class="key${off}" data-idx="${i}">` +
      `<span class="swatch" style="background:${color(i)}"></span>particle ${p.id}</span>`;
  }).join("");

  for (const key of el.querySelectorAll(".key")) {
    key.addEventListener("click", () => {
      const i = Number(key.dataset.idx);
      if (state.hidden.has(i)) state.hidden.delete(i);
      else state.hidden.add(i);
      renderAll();
    });
  }
}

function renderSummary() {
  const t = DATA.totals;
  const span = t.elapsed_seconds == null ? "n/a" : `${fmtTick(t.elapsed_seconds)} s`;
  document.getElementById("summary").innerHTML = `
    <span class="pill">rows: <b>${t.rows}</b></span>
    <span class="pill">columns: <b>${t.columns}</b></span>
    <span class="pill">particles: <b>${t.particles}</b></span>
    <span class="pill">time span: <b>${span}</b></span>
  `;
}

function renderAll() {
  renderSummary();
  renderLegend();
  for (const p of PANELS) renderPanel(p);
}

renderAll();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
