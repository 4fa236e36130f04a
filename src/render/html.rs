use crate::model::Diagram;

/// Render a self-contained HTML report (diagram embedded as JSON).
///
/// The template is filled with `replace` rather than `format!()` because the
/// embedded JS is full of `{}` and `${x}`.
pub fn render_html_report(diagram: &Diagram) -> anyhow::Result<String> {
    // `</` would end the script element early.
    let json = serde_json::to_string(diagram)?.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .container { display: flex; height: calc(100vh - 58px); }
  .sidebar { width: 380px; border-right: 1px solid #ddd; padding: 12px; overflow: auto; }
  .main { flex: 1; padding: 12px; overflow: auto; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  .group { margin-top: 8px; font-size: 12px; color: #555; text-transform: uppercase; }
  .res { cursor: pointer; user-select: none; padding: 2px 4px; border-radius: 4px; }
  .res:hover { background: #f3f3f3; }
  .res.selected { background: #e9f2ff; border: 1px solid #cfe3ff; }
  .muted { color: #777; font-size: 12px; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
  a { color: #1a73e8; cursor: pointer; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="container">
  <div class="sidebar">
    <input id="search" placeholder="Search name or type..." style="width: 100%; box-sizing: border-box; padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px;">
    <div id="list"></div>
  </div>

  <div class="main">
    <h2 id="title">Select a resource</h2>
    <div id="meta" class="muted"></div>

    <table id="linksTable" style="display:none;">
      <thead>
        <tr>
          <th>direction</th>
          <th>resource</th>
          <th>icon</th>
        </tr>
      </thead>
      <tbody id="linksBody"></tbody>
    </table>
  </div>
</div>

<script>
// Embedded diagram (JSON object literal)
const DATA = __DATA__;

const byId = new Map(DATA.nodes.map(n => [n.id, n]));
const state = { selected: null, search: "" };

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function linksOf(id) {
  const out = [];
  for (const e of DATA.edges) {
    if (e.from === id) out.push({ dir: e.bidirectional ? "both" : "out", other: e.to });
    else if (e.to === id) out.push({ dir: e.bidirectional ? "both" : "in", other: e.from });
  }
  return out;
}

function renderSummary() {
  const types = new Set(DATA.nodes.map(n => n.resource_type));
  const both = DATA.edges.filter(e => e.bidirectional).length;
  document.getElementById("summary").innerHTML = `
    <span class="pill"><b>${escapeHtml(DATA.title)}</b></span>
    <span class="pill">provider: <b>${escapeHtml(DATA.provider)}</b></span>
    <span class="pill">resources: <b>${DATA.nodes.length}</b></span>
    <span class="pill">types: <b>${types.size}</b></span>
    <span class="pill">edges: <b>${DATA.edges.length}</b> (${both} mutual)</span>
  `;
}

function matches(node) {
  if (!state.search) return true;
  const s = state.search.toLowerCase();
  return node.label.toLowerCase().includes(s) || node.resource_type.toLowerCase().includes(s);
}

function renderList() {
  const root = document.getElementById("list");
  root.innerHTML = "";

  const groups = new Map();
  for (const n of DATA.nodes) {
    if (!matches(n)) continue;
    if (!groups.has(n.resource_type)) groups.set(n.resource_type, []);
    groups.get(n.resource_type).push(n);
  }

  for (const [type, nodes] of [...groups.entries()].sort()) {
    const head = document.createElement("div");
    head.className = "group";
    head.textContent = type;
    root.appendChild(head);

    for (const n of nodes) {
      const row = document.createElement("div");
      row.className = "res" + (state.selected === n.id ? " selected" : "");
      row.onclick = () => selectNode(n.id);
      row.innerHTML = `${escapeHtml(n.label)} <span class="muted">${escapeHtml(n.icon)} · ${linksOf(n.id).length} links</span>`;
      root.appendChild(row);
    }
  }
}

function selectNode(id) {
  state.selected = id;
  const node = byId.get(id);
  document.getElementById("title").textContent = node.label;
  document.getElementById("meta").innerHTML =
    `id: <code>${escapeHtml(node.id)}</code> | type: <code>${escapeHtml(node.resource_type)}</code> | icon: <code>${escapeHtml(node.icon_class)}</code>`;

  const tbl = document.getElementById("linksTable");
  const body = document.getElementById("linksBody");
  body.innerHTML = "";

  const links = linksOf(id);
  if (links.length === 0) {
    tbl.style.display = "none";
  } else {
    tbl.style.display = "table";
    for (const l of links) {
      const other = byId.get(l.other);
      const tr = document.createElement("tr");
      const arrow = l.dir === "both" ? "⇄" : (l.dir === "out" ? "→" : "←");
      tr.innerHTML = `
        <td>${arrow}</td>
        <td><a>${escapeHtml(other.label)}</a> <span class="muted">${escapeHtml(other.resource_type)}</span></td>
        <td><code>${escapeHtml(other.icon_class)}</code></td>
      `;
      tr.querySelector("a").onclick = () => selectNode(other.id);
      body.appendChild(tr);
    }
  }

  renderList();
}

document.getElementById("search").addEventListener("input", (e) => {
  state.search = e.target.value || "";
  renderList();
});

renderSummary();
renderList();
if (DATA.nodes.length) selectNode(DATA.nodes[0].id);
</script>
</body>
</html>
"#;

    let title = escape_html(&diagram.title);
    Ok(TEMPLATE
        .replace("__TITLE__", &title)
        .replace("__DATA__", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
