use crate::client::{CACHE_KEY, MILESTONE_INTERVAL, PLACEHOLDER_COUNT};

pub fn render_index() -> String {
    INDEX_HTML
        .replace("{{MILESTONE_INTERVAL}}", &MILESTONE_INTERVAL.to_string())
        .replace("{{PLACEHOLDER_COUNT}}", PLACEHOLDER_COUNT)
        .replace("{{CACHE_KEY}}", CACHE_KEY)
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Resume</title>
  <style>
    :root {
      --bg: #f7f5f0;
      --ink: #27272a;
      --muted: #71717a;
      --primary-color: #2f4858;
      --card: #ffffff;
      --shadow: 0 10px 30px rgba(39, 39, 42, 0.08);
    }

    [data-theme="dark"] {
      --bg: #18181b;
      --ink: #e4e4e7;
      --muted: #a1a1aa;
      --primary-color: #7dd3fc;
      --card: #232327;
      --shadow: 0 10px 30px rgba(0, 0, 0, 0.4);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      line-height: 1.6;
    }

    .navbar {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 16px 32px;
    }

    .nav-menu {
      display: flex;
      gap: 20px;
      list-style: none;
      margin: 0;
      padding: 0;
    }

    .nav-link {
      color: var(--ink);
      text-decoration: none;
    }

    .theme-toggle {
      background: none;
      border: none;
      color: var(--ink);
      cursor: pointer;
      font-size: 1.1rem;
    }

    main {
      width: min(760px, 92%);
      margin: 0 auto 48px;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
      padding: 24px 28px;
    }

    h1 {
      margin: 0;
      font-size: 2rem;
    }

    h2 {
      margin-top: 0;
      color: var(--primary-color);
    }

    .subtitle,
    footer {
      color: var(--muted);
    }

    footer {
      text-align: center;
      padding: 24px 0 40px;
    }

    .visit-counter {
      font-weight: 600;
    }

    #visitCount.loading {
      opacity: 0.5;
    }

    #visitCount {
      transition: transform 300ms ease;
      display: inline-block;
    }

    #lastUpdated {
      display: none;
      font-size: 0.85rem;
      margin: 6px 0 0;
    }

    .celebrating {
      color: var(--primary-color);
    }

    .celebration-emoji {
      display: inline-block;
    }

    .milestone-toast {
      position: fixed;
      top: 20px;
      right: 20px;
      background: var(--primary-color);
      color: white;
      padding: 15px 20px;
      border-radius: 8px;
      box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
      z-index: 1000;
      animation: slideIn 0.3s ease-out;
    }

    .toast-content {
      display: flex;
      align-items: center;
    }

    @keyframes emojiCelebrate {
      0% { opacity: 0; transform: scale(0.4); }
      30% { opacity: 1; transform: scale(1.3); }
      100% { opacity: 0; transform: scale(1); }
    }

    @keyframes slideIn {
      from { transform: translateX(120%); }
      to { transform: translateX(0); }
    }

    @keyframes slideOut {
      from { transform: translateX(0); }
      to { transform: translateX(120%); }
    }
  </style>
</head>
<body>
  <nav class="navbar">
    <strong>Resume</strong>
    <ul class="nav-menu">
      <li><a class="nav-link" href="#about">About</a></li>
      <li><a class="nav-link" href="#experience">Experience</a></li>
      <li><a class="nav-link" href="#skills">Skills</a></li>
    </ul>
    <button class="theme-toggle" aria-label="Switch theme">&#9789;</button>
  </nav>

  <main>
    <section id="about">
      <h1>Ada Developer</h1>
      <p class="subtitle">Software engineer. Distributed systems, tooling, and the occasional frontend.</p>
    </section>

    <section id="experience">
      <h2>Experience</h2>
      <p>Senior engineer building storage and platform services. Previously shipped
      developer tools and far too many internal dashboards.</p>
    </section>

    <section id="skills">
      <h2>Skills</h2>
      <p>Rust, distributed storage, HTTP APIs, observability, CI plumbing.</p>
    </section>
  </main>

  <footer>
    <span class="visit-counter">&#128065; <span id="visitCount">...</span> visits</span>
    <p id="lastUpdated"></p>
  </footer>

  <script>
    (function () {
      const COUNTER_URL = '/api/counter';
      const MILESTONE_INTERVAL = {{MILESTONE_INTERVAL}};
      const PLACEHOLDER_COUNT = '{{PLACEHOLDER_COUNT}}';
      const CACHE_KEY = '{{CACHE_KEY}}';
      const CALL_TIMEOUT_MS = 5000;

      const counterElements = document.querySelectorAll('#visitCount');
      const lastUpdatedElement = document.querySelector('#lastUpdated');

      function formatTimestamp(iso) {
        const date = new Date(iso);
        const formattedDate = date.toLocaleDateString('en-US', {
          month: 'numeric', day: 'numeric', year: 'numeric'
        });
        const formattedTime = date.toLocaleTimeString('en-US', {
          hour: 'numeric', minute: '2-digit', second: '2-digit'
        });
        return formattedDate + ', ' + formattedTime;
      }

      function showCount(count, opacity) {
        counterElements.forEach(function (element) {
          element.classList.remove('loading');
          element.textContent = count.toLocaleString();
          element.style.opacity = opacity;
        });
      }

      function showStatusLine(text) {
        if (lastUpdatedElement) {
          lastUpdatedElement.textContent = text;
          lastUpdatedElement.style.display = 'block';
        }
      }

      function updateDisplay(data) {
        showCount(data.count, '1');
        counterElements.forEach(function (element) {
          element.style.transform = 'scale(1.1)';
          setTimeout(function () { element.style.transform = 'scale(1)'; }, 300);
        });
        if (data.lastUpdated) {
          showStatusLine('Visit count was last updated: ' + formatTimestamp(data.lastUpdated));
        }
      }

      function celebrateMilestone(count) {
        counterElements.forEach(function (element) {
          const emoji = document.createElement('span');
          emoji.textContent = ' 🎉';
          emoji.className = 'celebration-emoji';
          emoji.style.animation = 'emojiCelebrate 2s ease-in-out';
          element.appendChild(emoji);
          element.classList.add('celebrating');
          setTimeout(function () {
            if (emoji.parentNode === element) {
              element.removeChild(emoji);
            }
            element.classList.remove('celebrating');
          }, 2000);
        });

        const toast = document.createElement('div');
        toast.className = 'milestone-toast';
        toast.innerHTML = '<div class="toast-content">' +
          '<span style="font-size: 1.5em; margin-right: 10px;">🎉</span>' +
          '<div><strong>Milestone Achieved!</strong><br>' +
          count.toLocaleString() + ' views reached!</div></div>';
        document.body.appendChild(toast);
        setTimeout(function () {
          toast.style.animation = 'slideOut 0.3s ease-out';
          setTimeout(function () {
            if (toast.parentNode) {
              document.body.removeChild(toast);
            }
          }, 300);
        }, 5000);
      }

      function displayCachedData() {
        try {
          const cached = localStorage.getItem(CACHE_KEY);
          if (!cached) {
            displayFallback();
            return;
          }
          const data = JSON.parse(cached);
          showCount(data.count, '0.8');
          if (data.lastUpdated) {
            showStatusLine('Last known update: ' + formatTimestamp(data.lastUpdated));
          }
        } catch (error) {
          displayFallback();
        }
      }

      function displayFallback() {
        counterElements.forEach(function (element) {
          element.classList.remove('loading');
          element.textContent = PLACEHOLDER_COUNT;
          element.style.opacity = '0.7';
        });
      }

      async function updateCounter() {
        try {
          const response = await fetch(COUNTER_URL, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            signal: AbortSignal.timeout(CALL_TIMEOUT_MS),
            body: JSON.stringify({
              page: window.location.pathname,
              timestamp: new Date().toISOString(),
              userAgent: navigator.userAgent.substring(0, 100),
              referrer: document.referrer || 'direct'
            })
          });

          if (!response.ok) {
            throw new Error('HTTP error! status: ' + response.status);
          }

          const data = await response.json();
          if (!data.success) {
            displayCachedData();
            return;
          }

          localStorage.setItem(CACHE_KEY, JSON.stringify({
            count: data.count,
            lastUpdated: data.lastUpdated,
            timestamp: Date.now()
          }));
          updateDisplay(data);
          if (data.count > 0 && data.count % MILESTONE_INTERVAL === 0) {
            celebrateMilestone(data.count);
          }
        } catch (error) {
          displayCachedData();
        }
      }

      const themeToggle = document.querySelector('.theme-toggle');
      if (themeToggle) {
        themeToggle.addEventListener('click', function () {
          const next = document.documentElement.dataset.theme === 'dark' ? 'light' : 'dark';
          document.documentElement.dataset.theme = next;
          localStorage.setItem('theme', next);
        });
        const saved = localStorage.getItem('theme');
        if (saved) {
          document.documentElement.dataset.theme = saved;
        }
      }

      if (counterElements.length === 0) {
        return;
      }
      counterElements.forEach(function (element) {
        element.classList.add('loading');
      });
      updateCounter();
    })();
  </script>
</body>
</html>
"##;
