use crate::dates::parse_date;
use crate::models::{Exercise, SummaryResponse, TARGET};
use crate::sync::SessionState;
use chrono::{Local, NaiveDate};

/// Renders the page for one reference date. A configured remote without a
/// session gates the whole page behind sign-in; otherwise the log is shown,
/// with the account controls only when signed in.
pub fn render_index(summary: &SummaryResponse, session: &SessionState) -> String {
    if *session == SessionState::SignedOut {
        return GATE_HTML.to_string();
    }

    let date = parse_date(&summary.date).unwrap_or_else(|| Local::now().date_naive());
    let today = Local::now().date_naive();

    let mut html = MAIN_HTML
        .replace("{{DATE}}", &summary.date)
        .replace("{{TODAY}}", &today.format("%Y-%m-%d").to_string())
        .replace("{{DATE_LABEL}}", &date_label(date, today))
        .replace("{{DAY_OF_YEAR}}", &summary.day_of_year.to_string())
        .replace("{{WEEK_NUMBER}}", &summary.week_number.to_string())
        .replace("{{DAYS_LEFT}}", &summary.days_left.to_string())
        .replace("{{TARGET}}", &TARGET.to_string())
        .replace("{{PREV_DATE}}", &nav_date(date.pred_opt(), date))
        .replace("{{NEXT_NAV}}", &next_nav(date, today))
        .replace("{{WEEK_TOTAL}}", &summary.week.combined().to_string())
        .replace("{{YEAR_TOTAL}}", &thousands(summary.year.combined()))
        .replace(
            "{{REMAINING}}",
            &thousands(TARGET.saturating_sub(summary.year.get(Exercise::Pullups))),
        )
        .replace("{{ACCOUNT}}", &account_html(session));

    for exercise in Exercise::ALL {
        let prefix = match exercise {
            Exercise::Pushups => "PUSHUPS",
            Exercise::Squats => "SQUATS",
            Exercise::Pullups => "PULLUPS",
        };
        let year = summary.year.get(exercise);
        let pct = year as f64 / TARGET as f64 * 100.0;
        html = html
            .replace(
                &format!("{{{{{prefix}_DAY}}}}"),
                &summary.day.get(exercise).to_string(),
            )
            .replace(
                &format!("{{{{{prefix}_WEEK}}}}"),
                &summary.week.get(exercise).to_string(),
            )
            .replace(&format!("{{{{{prefix}_YEAR}}}}"), &thousands(year))
            .replace(&format!("{{{{{prefix}_PCT}}}}"), &format!("{pct:.1}"))
            .replace(
                &format!("{{{{{prefix}_BAR}}}}"),
                &format!("{:.1}", pct.min(100.0)),
            );
    }

    html
}

fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}

fn nav_date(target: Option<NaiveDate>, fallback: NaiveDate) -> String {
    target.unwrap_or(fallback).format("%Y-%m-%d").to_string()
}

// Future dates are not navigable; the arrow goes inert at today.
fn next_nav(date: NaiveDate, today: NaiveDate) -> String {
    if date < today {
        format!(
            r#"<a class="nav-btn" id="next-day" href="/?date={}">&rarr;</a>"#,
            nav_date(date.succ_opt(), date)
        )
    } else {
        r#"<span class="nav-btn nav-disabled" id="next-day">&rarr;</span>"#.to_string()
    }
}

fn account_html(session: &SessionState) -> String {
    match session {
        SessionState::SignedIn(user_id) => format!(
            r#"<div class="account"><span class="account-user">{}</span><button type="button" id="signout-btn">Sign out</button></div>"#,
            escape_html(user_id)
        ),
        _ => String::new(),
    }
}

fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const GATE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Misogi 2026</title>
  <style>
    :root {
      --bg: #09090b;
      --card: #18181b;
      --border: #27272a;
      --ink: #fafafa;
      --muted: #71717a;
      --accent: #f59e0b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .gate {
      width: min(380px, 100%);
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 20px;
      padding: 32px 28px;
      text-align: center;
      display: grid;
      gap: 14px;
    }

    h1 {
      margin: 0;
      font-size: 1.6rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 12px;
      padding: 14px 18px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: #09090b;
    }

    button:active {
      transform: scale(0.98);
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main class="gate">
    <h1>Misogi 2026</h1>
    <p class="subtitle">10,000 each &middot; 30,000 total</p>
    <button type="button" id="signin-btn">Sign in</button>
    <div class="status" id="status"></div>
  </main>

  <script>
    const signinBtn = document.getElementById('signin-btn');
    const statusEl = document.getElementById('status');

    signinBtn.addEventListener('click', async () => {
      statusEl.textContent = 'Waiting for sign-in...';
      try {
        const res = await fetch('/api/signin', { method: 'POST' });
        if (!res.ok) {
          throw new Error((await res.text()) || 'Sign-in failed');
        }
        const timer = setInterval(async () => {
          try {
            const session = await (await fetch('/api/session')).json();
            if (session.state === 'signed_in') {
              clearInterval(timer);
              location.reload();
            }
          } catch (err) {
            // Keep polling; the session may still land.
          }
        }, 1000);
      } catch (err) {
        statusEl.textContent = err.message;
      }
    });
  </script>
</body>
</html>
"#;

const MAIN_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Misogi 2026</title>
  <style>
    :root {
      --bg: #09090b;
      --card: #18181b;
      --raised: #27272a;
      --border: #27272a;
      --ink: #fafafa;
      --muted: #71717a;
      --faint: #52525b;
      --pushups: #f59e0b;
      --squats: #10b981;
      --pullups: #0ea5e9;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      padding: 16px 16px 80px;
    }

    .app {
      width: min(448px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 16px;
    }

    header {
      text-align: center;
      display: grid;
      gap: 4px;
    }

    h1 {
      margin: 0;
      font-size: 1.5rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    .day-nav {
      display: flex;
      align-items: center;
      justify-content: center;
      gap: 8px;
    }

    .nav-btn {
      background: var(--raised);
      border: none;
      border-radius: 10px;
      padding: 10px 14px;
      color: var(--ink);
      text-decoration: none;
      font-size: 1rem;
      cursor: pointer;
    }

    .nav-disabled {
      opacity: 0.35;
      cursor: default;
    }

    .day-label {
      background: var(--raised);
      border-radius: 10px;
      padding: 8px 18px;
      text-align: center;
      min-width: 160px;
    }

    .day-label .date {
      font-weight: 600;
    }

    .day-label .ordinal {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 16px;
      display: grid;
      gap: 12px;
    }

    .card h3 {
      margin: 0;
      font-size: 1rem;
    }

    .exercise-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .exercise-name {
      display: flex;
      align-items: center;
      gap: 8px;
      font-weight: 600;
    }

    .exercise-today {
      text-align: right;
    }

    .exercise-today .count {
      font-size: 1.5rem;
      font-weight: 700;
    }

    .exercise-today .caption {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .quick-row {
      display: flex;
      gap: 8px;
    }

    .quick-row form {
      flex: 1;
      display: flex;
    }

    .quick-row button {
      flex: 1;
      background: var(--raised);
      border: none;
      border-radius: 12px;
      padding: 12px 0;
      color: var(--ink);
      font-weight: 500;
      font-size: 0.95rem;
      cursor: pointer;
    }

    .quick-row button:active {
      background: #3f3f46;
    }

    .custom-form {
      display: flex;
    }

    .custom-form input {
      width: 52px;
      background: var(--raised);
      border: none;
      border-radius: 12px 0 0 12px;
      color: var(--ink);
      text-align: center;
      outline: none;
      font-size: 0.95rem;
    }

    .custom-form button {
      flex: 0 0 auto;
      border-radius: 0 12px 12px 0;
      padding: 12px 14px;
      background: #3f3f46;
    }

    .bar {
      height: 8px;
      background: var(--raised);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar-fill {
      height: 100%;
      border-radius: 999px;
    }

    .bar-fill.pushups { background: var(--pushups); }
    .bar-fill.squats { background: var(--squats); }
    .bar-fill.pullups { background: var(--pullups); }

    .bar-caption {
      display: flex;
      justify-content: space-between;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .triple {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 12px;
      text-align: center;
    }

    .triple .count {
      font-size: 1.25rem;
      font-weight: 700;
    }

    .triple .caption {
      font-size: 0.75rem;
      color: var(--muted);
    }

    .card-total {
      text-align: center;
      border-top: 1px solid var(--border);
      padding-top: 10px;
      color: var(--muted);
    }

    .card-total strong {
      color: var(--ink);
    }

    .year-rows {
      display: grid;
      gap: 8px;
      font-size: 0.9rem;
    }

    .year-row {
      display: flex;
      justify-content: space-between;
    }

    .year-row .name {
      color: var(--muted);
    }

    .year-row .per-target {
      color: var(--faint);
    }

    .year-row.total {
      font-weight: 700;
      border-top: 1px solid var(--border);
      padding-top: 8px;
    }

    .footer-line {
      text-align: center;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .account {
      display: flex;
      justify-content: center;
      align-items: center;
      gap: 12px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .account button {
      background: none;
      border: 1px solid var(--border);
      border-radius: 8px;
      color: var(--muted);
      padding: 6px 12px;
      cursor: pointer;
    }

    .status {
      text-align: center;
      font-size: 0.85rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #f87171;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Misogi 2026</h1>
      <p class="subtitle">10,000 each &middot; 30,000 total</p>
    </header>

    <nav class="day-nav">
      <a class="nav-btn" id="prev-day" href="/?date={{PREV_DATE}}">&larr;</a>
      <div class="day-label">
        <div class="date" id="date-label">{{DATE_LABEL}}</div>
        <div class="ordinal">Day <span id="day-of-year">{{DAY_OF_YEAR}}</span></div>
      </div>
      {{NEXT_NAV}}
    </nav>

    <section class="card" data-card="pushups">
      <div class="exercise-head">
        <div class="exercise-name"><span>&#128170;</span><span>Push-ups</span></div>
        <div class="exercise-today">
          <div class="count" data-day="pushups">{{PUSHUPS_DAY}}</div>
          <div class="caption">today</div>
        </div>
      </div>
      <div class="quick-row">
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pushups" />
          <input type="hidden" name="amount" value="1" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+1</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pushups" />
          <input type="hidden" name="amount" value="5" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+5</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pushups" />
          <input type="hidden" name="amount" value="10" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+10</button>
        </form>
        <form class="log-form custom-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pushups" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <input type="number" inputmode="numeric" name="amount" placeholder="#" />
          <button type="submit">+</button>
        </form>
      </div>
      <div class="bar"><div class="bar-fill pushups" data-bar="pushups" style="width: {{PUSHUPS_BAR}}%"></div></div>
      <div class="bar-caption">
        <span><span data-year="pushups">{{PUSHUPS_YEAR}}</span> / 10,000</span>
        <span><span data-pct="pushups">{{PUSHUPS_PCT}}</span>%</span>
      </div>
    </section>

    <section class="card" data-card="squats">
      <div class="exercise-head">
        <div class="exercise-name"><span>&#129462;</span><span>Squats</span></div>
        <div class="exercise-today">
          <div class="count" data-day="squats">{{SQUATS_DAY}}</div>
          <div class="caption">today</div>
        </div>
      </div>
      <div class="quick-row">
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="squats" />
          <input type="hidden" name="amount" value="1" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+1</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="squats" />
          <input type="hidden" name="amount" value="5" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+5</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="squats" />
          <input type="hidden" name="amount" value="10" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+10</button>
        </form>
        <form class="log-form custom-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="squats" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <input type="number" inputmode="numeric" name="amount" placeholder="#" />
          <button type="submit">+</button>
        </form>
      </div>
      <div class="bar"><div class="bar-fill squats" data-bar="squats" style="width: {{SQUATS_BAR}}%"></div></div>
      <div class="bar-caption">
        <span><span data-year="squats">{{SQUATS_YEAR}}</span> / 10,000</span>
        <span><span data-pct="squats">{{SQUATS_PCT}}</span>%</span>
      </div>
    </section>

    <section class="card" data-card="pullups">
      <div class="exercise-head">
        <div class="exercise-name"><span>&#127947;</span><span>Pull-ups</span></div>
        <div class="exercise-today">
          <div class="count" data-day="pullups">{{PULLUPS_DAY}}</div>
          <div class="caption">today</div>
        </div>
      </div>
      <div class="quick-row">
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pullups" />
          <input type="hidden" name="amount" value="1" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+1</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pullups" />
          <input type="hidden" name="amount" value="5" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+5</button>
        </form>
        <form class="log-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pullups" />
          <input type="hidden" name="amount" value="10" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <button type="submit">+10</button>
        </form>
        <form class="log-form custom-form" method="post" action="/log/add">
          <input type="hidden" name="exercise" value="pullups" />
          <input type="hidden" name="date" value="{{DATE}}" />
          <input type="number" inputmode="numeric" name="amount" placeholder="#" />
          <button type="submit">+</button>
        </form>
      </div>
      <div class="bar"><div class="bar-fill pullups" data-bar="pullups" style="width: {{PULLUPS_BAR}}%"></div></div>
      <div class="bar-caption">
        <span><span data-year="pullups">{{PULLUPS_YEAR}}</span> / 10,000</span>
        <span><span data-pct="pullups">{{PULLUPS_PCT}}</span>%</span>
      </div>
    </section>

    <section class="card">
      <h3>Week <span id="week-number">{{WEEK_NUMBER}}</span> Progress</h3>
      <div class="triple">
        <div>
          <div class="count" data-week="pushups">{{PUSHUPS_WEEK}}</div>
          <div class="caption">Push-ups</div>
        </div>
        <div>
          <div class="count" data-week="squats">{{SQUATS_WEEK}}</div>
          <div class="caption">Squats</div>
        </div>
        <div>
          <div class="count" data-week="pullups">{{PULLUPS_WEEK}}</div>
          <div class="caption">Pull-ups</div>
        </div>
      </div>
      <div class="card-total">Week Total: <strong id="week-total">{{WEEK_TOTAL}}</strong></div>
    </section>

    <section class="card">
      <h3>2026 Year-to-Date</h3>
      <div class="year-rows">
        <div class="year-row">
          <span class="name">Push-ups</span>
          <span><span data-year="pushups">{{PUSHUPS_YEAR}}</span> <span class="per-target">/ 10k</span></span>
        </div>
        <div class="year-row">
          <span class="name">Squats</span>
          <span><span data-year="squats">{{SQUATS_YEAR}}</span> <span class="per-target">/ 10k</span></span>
        </div>
        <div class="year-row">
          <span class="name">Pull-ups</span>
          <span><span data-year="pullups">{{PULLUPS_YEAR}}</span> <span class="per-target">/ 10k</span></span>
        </div>
        <div class="year-row total">
          <span>Total</span>
          <span><span id="year-total">{{YEAR_TOTAL}}</span> <span class="per-target">/ 30k</span></span>
        </div>
      </div>
    </section>

    <p class="footer-line"><span id="remaining">{{REMAINING}}</span> pull-ups to go &middot; <span id="days-left">{{DAYS_LEFT}}</span> days left</p>

    {{ACCOUNT}}

    <div class="status" id="status"></div>
  </main>

  <script>
    const TARGET = {{TARGET}};
    const today = '{{TODAY}}';
    let selectedDate = '{{DATE}}';

    const statusEl = document.getElementById('status');
    const dateLabelEl = document.getElementById('date-label');
    const dayOfYearEl = document.getElementById('day-of-year');
    const weekNumberEl = document.getElementById('week-number');
    const weekTotalEl = document.getElementById('week-total');
    const yearTotalEl = document.getElementById('year-total');
    const remainingEl = document.getElementById('remaining');
    const daysLeftEl = document.getElementById('days-left');
    const prevBtn = document.getElementById('prev-day');
    const nextBtn = document.getElementById('next-day');
    const exercises = ['pushups', 'squats', 'pullups'];

    const fmt = (n) => n.toLocaleString('en-US');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setAll = (selector, text) => {
      document.querySelectorAll(selector).forEach((el) => {
        el.textContent = text;
      });
    };

    const labelFor = (date) => {
      if (date === today) {
        return 'Today';
      }
      return new Date(date + 'T00:00:00').toLocaleDateString('en-US', {
        weekday: 'short',
        month: 'short',
        day: 'numeric'
      });
    };

    const shiftDate = (date, delta) => {
      const d = new Date(date + 'T00:00:00');
      d.setDate(d.getDate() + delta);
      const pad = (n) => String(n).padStart(2, '0');
      return `${d.getFullYear()}-${pad(d.getMonth() + 1)}-${pad(d.getDate())}`;
    };

    const applySummary = (data) => {
      selectedDate = data.date;
      dateLabelEl.textContent = labelFor(data.date);
      dayOfYearEl.textContent = data.day_of_year;
      weekNumberEl.textContent = data.week_number;
      daysLeftEl.textContent = data.days_left;

      let weekTotal = 0;
      let yearTotal = 0;
      exercises.forEach((exercise) => {
        const year = data.year[exercise];
        const pct = (year / TARGET) * 100;
        weekTotal += data.week[exercise];
        yearTotal += year;
        setAll(`[data-day="${exercise}"]`, data.day[exercise]);
        setAll(`[data-week="${exercise}"]`, data.week[exercise]);
        setAll(`[data-year="${exercise}"]`, fmt(year));
        setAll(`[data-pct="${exercise}"]`, pct.toFixed(1));
        document.querySelector(`[data-bar="${exercise}"]`).style.width =
          `${Math.min(100, pct).toFixed(1)}%`;
      });
      weekTotalEl.textContent = weekTotal;
      yearTotalEl.textContent = fmt(yearTotal);
      remainingEl.textContent = fmt(Math.max(0, TARGET - data.year.pullups));

      prevBtn.href = `/?date=${shiftDate(data.date, -1)}`;
      const atToday = data.date >= today;
      nextBtn.classList.toggle('nav-disabled', atToday);
      if (nextBtn.tagName === 'A') {
        nextBtn.href = atToday ? '#' : `/?date=${shiftDate(data.date, 1)}`;
      }
      document.querySelectorAll('form.log-form input[name="date"]').forEach((input) => {
        input.value = data.date;
      });
    };

    const loadSummary = async (date) => {
      const res = await fetch(`/api/summary?date=${date}`);
      if (!res.ok) {
        throw new Error('Unable to load summary');
      }
      applySummary(await res.json());
    };

    const send = async (exercise, amount) => {
      const res = await fetch('/api/log', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ exercise, amount, date: selectedDate })
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      const updated = await res.json();
      setAll(`[data-day="${exercise}"]`, updated.counts[exercise]);
      await loadSummary(selectedDate);
    };

    document.querySelectorAll('form.log-form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        const exercise = form.elements.exercise.value;
        const amount = parseInt(form.elements.amount.value, 10);
        if (!Number.isFinite(amount) || amount < 1) {
          return;
        }
        if (form.classList.contains('custom-form')) {
          form.elements.amount.value = '';
        }
        send(exercise, amount).catch((err) => setStatus(err.message, 'error'));
      });
    });

    const navigate = (delta) => {
      const target = shiftDate(selectedDate, delta);
      if (target > today) {
        return;
      }
      loadSummary(target).catch((err) => setStatus(err.message, 'error'));
    };

    prevBtn.addEventListener('click', (event) => {
      event.preventDefault();
      navigate(-1);
    });

    nextBtn.addEventListener('click', (event) => {
      event.preventDefault();
      navigate(1);
    });

    const signoutBtn = document.getElementById('signout-btn');
    if (signoutBtn) {
      signoutBtn.addEventListener('click', async () => {
        try {
          const res = await fetch('/api/signout', { method: 'POST' });
          if (!res.ok) {
            throw new Error((await res.text()) || 'Sign-out failed');
          }
          location.reload();
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    }
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepCounts;

    fn summary() -> SummaryResponse {
        SummaryResponse {
            date: "2026-03-02".to_string(),
            day_of_year: 61,
            week_number: 10,
            target: TARGET,
            days_left: 304,
            day: RepCounts {
                pushups: 30,
                squats: 0,
                pullups: 7,
            },
            week: RepCounts {
                pushups: 55,
                squats: 20,
                pullups: 7,
            },
            year: RepCounts {
                pushups: 2500,
                squats: 1200,
                pullups: 310,
            },
        }
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(10_000), "10,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b>&"x'"#),
            "&lt;b&gt;&amp;&quot;x&#39;"
        );
    }

    #[test]
    fn main_page_renders_summary_values() {
        let html = render_index(&summary(), &SessionState::NoRemote);
        assert!(html.contains("Misogi 2026"));
        assert!(html.contains("Week <span id=\"week-number\">10</span>"));
        assert!(html.contains("2,500"));
        assert!(html.contains("25.0"));
        assert!(html.contains("9,690 pull-ups to go") || html.contains(">9,690</span> pull-ups"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn past_date_links_forward_navigation() {
        let mut past = summary();
        past.date = "2020-03-02".to_string();
        let html = render_index(&past, &SessionState::NoRemote);
        assert!(html.contains("/?date=2020-03-01"));
        assert!(html.contains("/?date=2020-03-03"));
    }

    #[test]
    fn signed_out_page_gates_on_sign_in() {
        let html = render_index(&summary(), &SessionState::SignedOut);
        assert!(html.contains("Sign in"));
        assert!(!html.contains("Push-ups"));
    }

    #[test]
    fn signed_in_page_shows_escaped_account() {
        let html = render_index(
            &summary(),
            &SessionState::SignedIn("a<b>@example.com".to_string()),
        );
        assert!(html.contains("a&lt;b&gt;@example.com"));
        assert!(html.contains("Sign out"));
    }
}
