use crate::config::MESSAGE_DISMISS_MS;
use crate::dashboard::{DashboardView, GroupView, IndexCell};
use crate::format::{escape_html, script_json};
use tracing::error;

pub fn render_index(error: Option<&str>) -> String {
    let (message, hidden) = match error {
        Some(message) => (escape_html(message), ""),
        None => (String::new(), " hidden"),
    };
    INDEX_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{DISMISS_MS}}", &MESSAGE_DISMISS_MS.to_string())
        .replace("{{ERROR_HIDDEN}}", hidden)
        .replace("{{ERROR}}", &message)
}

pub fn render_dashboard(view: Option<&DashboardView>) -> String {
    let chart_json = view.and_then(|view| match serde_json::to_string(&view.chart) {
        Ok(json) => Some(json),
        Err(err) => {
            error!("failed to serialize chart config: {err}");
            None
        }
    });

    let (no_data_hidden, results_hidden, results, chart) = match (view, chart_json) {
        (Some(view), Some(json)) => (
            " hidden",
            "",
            render_results(view),
            CHART_SCRIPT.replace("{{CHART_JSON}}", &script_json(&json)),
        ),
        _ => ("", " hidden", String::new(), String::new()),
    };

    DASHBOARD_HTML
        .replace("{{STYLE}}", BASE_STYLE)
        .replace("{{NO_DATA_HIDDEN}}", no_data_hidden)
        .replace("{{RESULTS_HIDDEN}}", results_hidden)
        .replace("{{RESULTS}}", &results)
        .replace("{{CHART}}", &chart)
}

fn render_results(view: &DashboardView) -> String {
    let mut out = String::new();
    out.push_str(&group_card("whipple", "Indice de Whipple", &view.whipple));
    out.push_str(&group_card("myers", "Indice de Myers", &view.myers));
    out.push_str(&group_card("bachi", "Indice de Bachi", &view.bachi));

    let icnu = &view.icnu;
    out.push_str(&format!(
        r#"
      <article class="card" id="icnu-card">
        <h2>Indice combiné des Nations Unies</h2>
        <div class="grid">
          <div class="stat"><span class="label">Indice A (hommes)</span><span class="value" id="icnu-a">{a}</span></div>
          <div class="stat"><span class="label">Indice B (femmes)</span><span class="value" id="icnu-b">{b}</span></div>
          <div class="stat"><span class="label">Indice C (masculinité)</span><span class="value" id="icnu-c">{c}</span></div>
          <div class="stat"><span class="label">ICNU</span><span class="value" id="icnu-total">{total}</span>{quality}</div>
        </div>
      </article>"#,
        a = escape_html(&icnu.indice_a),
        b = escape_html(&icnu.indice_b),
        c = escape_html(&icnu.indice_c),
        total = escape_html(&icnu.total.display),
        quality = quality_tag("icnu-quality", &icnu.total),
    ));
    out
}

fn group_card(prefix: &str, title: &str, group: &GroupView) -> String {
    let stat = |key: &str, label: &str, cell: &IndexCell| {
        format!(
            r#"<div class="stat"><span class="label">{label}</span><span class="value" id="{prefix}-{key}">{value}</span>{quality}</div>"#,
            value = escape_html(&cell.display),
            quality = quality_tag(&format!("{prefix}-{key}-quality"), cell),
        )
    };

    format!(
        r#"
      <article class="card" id="{prefix}-card">
        <h2>{title}</h2>
        <div class="grid">
          {homme}
          {femme}
          {ensemble}
        </div>
      </article>"#,
        homme = stat("homme", "Hommes", &group.homme),
        femme = stat("femme", "Femmes", &group.femme),
        ensemble = stat("ensemble", "Ensemble", &group.ensemble),
    )
}

fn quality_tag(id: &str, cell: &IndexCell) -> String {
    match &cell.rating {
        Some(rating) => format!(
            r#"<span class="quality {class}" id="{id}">{label}</span>"#,
            class = rating.class,
            label = escape_html(rating.label),
        ),
        None => String::new(),
    }
}

const BASE_STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f6;
      --bg-2: #c9dde8;
      --ink: #22303a;
      --accent: #2f6f9f;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3edf3 60%, #f4f7f9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.25rem;
    }

    .subtitle {
      margin: 0;
      color: #5f6a72;
    }

    .card {
      background: white;
      border-radius: 20px;
      padding: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .stat {
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a93;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .quality {
      font-size: 0.85rem;
      font-weight: 600;
      border-radius: 999px;
      padding: 4px 10px;
      justify-self: start;
    }

    .quality-good {
      background: #e1f3e8;
      color: #2d7a4b;
    }

    .quality-acceptable {
      background: #fff1d6;
      color: #9a6a12;
    }

    .quality-poor {
      background: #fbe2de;
      color: #c63b2b;
    }

    button,
    .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 22px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      box-shadow: 0 10px 24px rgba(47, 111, 159, 0.3);
    }

    [hidden] {
      display: none !important;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Qualité des données démographiques</title>
  <style>
{{STYLE}}
    form {
      display: grid;
      gap: 16px;
    }

    input[type="file"] {
      padding: 18px;
      border: 2px dashed rgba(47, 72, 88, 0.25);
      border-radius: 18px;
      background: white;
    }

    .message {
      border-radius: 14px;
      padding: 12px 16px;
      transition: opacity 400ms ease;
    }

    .message.error {
      background: #fbe2de;
      color: #c63b2b;
    }

    .message.fading {
      opacity: 0;
    }

    .spinner {
      color: #5f6a72;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Qualité des données démographiques</h1>
      <p class="subtitle">Chargez un fichier Excel (colonnes Age, Homme, Femme) pour calculer les indices de Whipple, Myers, Bachi et l'ICNU.</p>
    </header>

    <form id="uploadForm" method="post" action="/upload" enctype="multipart/form-data">
      <input type="file" id="fileInput" name="file" accept=".xlsx,.xls" />
      <button type="submit">Analyser le fichier</button>
    </form>

    <div id="loadingSpinner" class="spinner" hidden>Traitement en cours...</div>
    <div id="errorMessage" class="message error" role="alert" data-dismiss-ms="{{DISMISS_MS}}"{{ERROR_HIDDEN}}>{{ERROR}}</div>
  </main>

  <script>
    const form = document.getElementById('uploadForm');
    const fileInput = document.getElementById('fileInput');
    const spinner = document.getElementById('loadingSpinner');
    const errorEl = document.getElementById('errorMessage');
    const dismissMs = Number(errorEl.dataset.dismissMs);
    let dismissTimer = null;

    const scheduleDismiss = () => {
      clearTimeout(dismissTimer);
      dismissTimer = setTimeout(() => {
        errorEl.classList.add('fading');
        setTimeout(() => {
          errorEl.hidden = true;
          errorEl.classList.remove('fading');
        }, 400);
      }, dismissMs);
    };

    const showError = (message) => {
      errorEl.textContent = message;
      errorEl.classList.remove('fading');
      errorEl.hidden = false;
      scheduleDismiss();
    };

    const extensionOf = (name) => {
      const dot = name.lastIndexOf('.');
      return dot < 0 ? '' : name.slice(dot + 1).toLowerCase();
    };

    form.addEventListener('submit', (event) => {
      const file = fileInput.files[0];
      if (!file) {
        event.preventDefault();
        showError('Veuillez sélectionner un fichier');
        return;
      }
      const ext = extensionOf(file.name);
      if (ext !== 'xlsx' && ext !== 'xls') {
        event.preventDefault();
        showError('Le fichier doit être au format Excel (.xlsx ou .xls)');
        return;
      }
      errorEl.hidden = true;
      spinner.hidden = false;
    });

    window.addEventListener('pageshow', () => {
      spinner.hidden = true;
    });

    if (!errorEl.hidden) {
      scheduleDismiss();
    }
  </script>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Résultats - qualité des données démographiques</title>
  <style>
{{STYLE}}
    .chart-card canvas {
      width: 100%;
    }

    .empty {
      display: grid;
      gap: 16px;
      justify-items: start;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Résultats de l'analyse</h1>
      <p class="subtitle">Indices d'attraction des âges calculés à partir du fichier chargé.</p>
    </header>

    <section id="noData" class="card empty"{{NO_DATA_HIDDEN}}>
      <h2>Aucune donnée disponible</h2>
      <p class="subtitle">Chargez d'abord un fichier pour afficher les résultats.</p>
      <a class="button" href="/">Charger un fichier</a>
    </section>

    <section id="resultsContainer"{{RESULTS_HIDDEN}}>
      <div class="app-results" style="display: grid; gap: 20px;">{{RESULTS}}
        <article class="card chart-card">
          <canvas id="populationChart"></canvas>
        </article>
        <a class="button" href="/">Analyser un autre fichier</a>
      </div>
    </section>
  </main>
{{CHART}}
</body>
</html>
"#;

const CHART_SCRIPT: &str = r#"
  <script type="application/json" id="chartConfig">{{CHART_JSON}}</script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <script>
    const chartConfig = JSON.parse(document.getElementById('chartConfig').textContent);
    const ctx = document.getElementById('populationChart').getContext('2d');
    new Chart(ctx, chartConfig);
  </script>
"#;
