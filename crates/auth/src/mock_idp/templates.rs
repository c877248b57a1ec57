//! HTML templates for the Mock IdP consent page.

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate the consent page of the mock authorization endpoint.
///
/// Both buttons post to `/authorize/submit`; the `decision` field tells the
/// handler whether to send a code or an `access_denied` error back.
pub fn authorize_page(client_id: &str, scope: &str, state: &str, redirect_uri: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Mock GitHub Authorization (DEV ONLY)</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, sans-serif;
            max-width: 400px;
            margin: 100px auto;
            padding: 20px;
        }}
        .warning {{
            background: #fff3cd;
            border: 1px solid #ffc107;
            padding: 15px;
            border-radius: 8px;
            margin-bottom: 20px;
        }}
        .warning h2 {{
            color: #856404;
            margin-top: 0;
        }}
        form {{
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
        }}
        label {{
            display: block;
            margin-bottom: 5px;
            font-weight: 500;
        }}
        input[type="email"], input[type="text"] {{
            width: 100%;
            padding: 10px;
            margin-bottom: 15px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            box-sizing: border-box;
        }}
        button {{
            width: 48%;
            padding: 12px;
            border: none;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }}
        button[value="approve"] {{
            background: #2da44e;
            color: white;
        }}
        button[value="deny"] {{
            background: #e9ecef;
        }}
    </style>
</head>
<body>
    <div class="warning">
        <h2>Development Only</h2>
        <p>This is a <strong>mock GitHub authorization</strong> for development purposes.</p>
        <p>Application <code>{client_id}</code> requests <code>{scope}</code>.</p>
    </div>

    <form action="/authorize/submit" method="POST">
        <input type="hidden" name="state" value="{state}" />
        <input type="hidden" name="redirect_uri" value="{redirect_uri}" />

        <label for="login">Username</label>
        <input type="text" id="login" name="login" placeholder="octocat" required />

        <label for="name">Name (optional)</label>
        <input type="text" id="name" name="name" placeholder="The Octocat" />

        <label for="email">Email Address (optional)</label>
        <input type="email" id="email" name="email" placeholder="octocat@example.com" />

        <button type="submit" name="decision" value="approve">Authorize</button>
        <button type="submit" name="decision" value="deny" formnovalidate>Cancel</button>
    </form>
</body>
</html>"#,
        client_id = html_escape(client_id),
        scope = html_escape(scope),
        state = html_escape(state),
        redirect_uri = html_escape(redirect_uri),
    )
}
