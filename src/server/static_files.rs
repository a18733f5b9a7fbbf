//! The embedded single-page widget.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Dual Chronos</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main>
    <h1>What time is it over there?</h1>
    <div class="pickers">
      <label>Reference location
        <select id="first"><option value="">-- Select Location --</option></select>
      </label>
      <label>Location to compare
        <select id="second"><option value="">-- Select Location --</option></select>
      </label>
    </div>
    <p id="first-line" class="time" hidden></p>
    <p id="second-line" class="time" hidden></p>
    <p id="distance-line" class="distance" hidden></p>
  </main>
  <script src="/app.js"></script>
</body>
</html>
"#;

pub const STYLE_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  color: #333;
  background: #fff;
}
main {
  max-width: 48rem;
  margin: 4rem auto;
  text-align: center;
}
.pickers {
  display: flex;
  gap: 1rem;
  justify-content: center;
  margin-top: 2rem;
}
.pickers label {
  display: flex;
  flex-direction: column;
  flex: 1;
  text-align: left;
}
select {
  padding: 0.5rem;
  font-size: 1rem;
}
.time {
  font-size: 1.5rem;
  color: #666;
}
.distance {
  font-size: 1.25rem;
  color: #666;
}
"#;

pub const APP_JS: &str = r#"(() => {
  const first = document.getElementById('first');
  const second = document.getElementById('second');
  const firstLine = document.getElementById('first-line');
  const secondLine = document.getElementById('second-line');
  const distanceLine = document.getElementById('distance-line');
  let timer = null;
  let times = { first: '', second: '' };

  function render() {
    firstLine.hidden = !first.value;
    secondLine.hidden = !second.value;
    firstLine.textContent = `${first.value} ${times.first}`;
    secondLine.textContent = `${second.value} ${times.second}`;
    distanceLine.hidden = !(first.value && second.value);
  }

  // Responses for a pair the user has since changed are dropped.
  function isStale(pair) {
    return pair.first !== first.value || pair.second !== second.value;
  }

  async function refresh() {
    if (!first.value || !second.value) return;
    const pair = { first: first.value, second: second.value };
    const res = await fetch(`/api/compare?${new URLSearchParams(pair)}`);
    const body = await res.json();
    if (isStale(pair) || !body.snapshot) return;
    times = { first: body.snapshot.first.time, second: body.snapshot.second.time };
    render();
  }

  async function updateDistance() {
    const pair = { first: first.value, second: second.value };
    const res = await fetch(`/api/distance?${new URLSearchParams(pair)}`);
    const body = await res.json();
    if (isStale(pair)) return;
    distanceLine.textContent = `Distance between us: ${body.distance}`;
  }

  function onChange() {
    if (timer !== null) clearInterval(timer);
    timer = setInterval(refresh, 1000);
    times = { first: '', second: '' };
    render();
    if (first.value && second.value) updateDistance();
  }

  window.addEventListener('beforeunload', () => {
    if (timer !== null) clearInterval(timer);
  });

  fetch('/api/locations')
    .then((res) => res.json())
    .then((locations) => {
      for (const loc of locations) {
        first.add(new Option(loc.name, loc.name));
        second.add(new Option(loc.name, loc.name));
      }
    });

  first.addEventListener('change', onChange);
  second.addEventListener('change', onChange);
})();
"#;
