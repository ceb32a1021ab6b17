//! JavaScript sources evaluated by the `node` child process.
//!
//! Each script reads one JSON request from stdin and writes one JSON reply to
//! stdout: `{"ok": <payload>}` or `{"error": "<message>"}`. Libraries are
//! resolved from the child's working directory, so a project's own
//! `node_modules` takes precedence.

/// Shared request/reply plumbing
const PRELUDE: &str = r#"
const serve = (handle) => {
  let input = ''
  process.stdin.setEncoding('utf8')
  process.stdin.on('data', (chunk) => { input += chunk })
  process.stdin.on('end', () => {
    let settled = false
    const reply = (err, ok) => {
      if (settled) return
      settled = true
      const message = err
        ? { error: String((err && err.message) || err) }
        : { ok: ok }
      process.stdout.write(JSON.stringify(message))
    }
    try {
      handle(JSON.parse(input), reply)
    } catch (e) {
      reply(e)
    }
  })
}
"#;

/// `lintText` in fix mode; works with both callback and promise APIs
const LINT_FIX: &str = r#"
serve((req, reply) => {
  const linter = require(req.package)
  const done = (err, res) => {
    if (err) return reply(err)
    const results = Array.isArray(res) ? res : ((res && res.results) || [])
    reply(null, {
      results: results.map((r) => ({
        output: r && typeof r.output === 'string' ? r.output : null
      }))
    })
  }
  const pending = linter.lintText(req.text, { fix: true }, done)
  if (pending && typeof pending.then === 'function') {
    pending.then((res) => done(null, res), done)
  }
})
"#;

/// `prettier.format`; synchronous in prettier 2, a promise in prettier 3
const PRETTIER_FORMAT: &str = r#"
serve((req, reply) => {
  const prettier = require('prettier')
  Promise.resolve(prettier.format(req.text, req.options))
    .then((formatted) => reply(null, formatted), reply)
})
"#;

/// Script running the style fixer
pub fn lint_fix_script() -> String {
    format!("{PRELUDE}{LINT_FIX}")
}

/// Script running prettier
pub fn prettier_script() -> String {
    format!("{PRELUDE}{PRETTIER_FORMAT}")
}
