//! Deterministic template used whenever the completion service cannot produce code
//!
//! Both the generation route and the in-process generation path call
//! [`fallback_code`], so there is a single copy of the template.

use crate::models::GeneratedCode;

const PROMPT_PLACEHOLDER: &str = "{prompt}";

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{prompt}</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <div class="container">
        <h1>{prompt}</h1>
        <div class="content">
            <p>Generated application for: {prompt}</p>
            <button id="actionBtn">Click Me</button>
        </div>
    </div>
    <script src="script.js"></script>
</body>
</html>"#;

const CSS_TEMPLATE: &str = r#"* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
}

.container {
    background: white;
    padding: 2rem;
    border-radius: 15px;
    box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2);
    max-width: 600px;
    width: 90%;
    text-align: center;
}

h1 {
    color: #333;
    margin-bottom: 1rem;
    font-size: 2rem;
}

.content {
    color: #666;
    line-height: 1.6;
}

button {
    background: #667eea;
    color: white;
    border: none;
    padding: 12px 24px;
    border-radius: 25px;
    cursor: pointer;
    font-size: 1rem;
    margin-top: 1rem;
    transition: all 0.3s ease;
}

button:hover {
    background: #764ba2;
    transform: translateY(-2px);
    box-shadow: 0 5px 15px rgba(0, 0, 0, 0.2);
}"#;

const JS_TEMPLATE: &str = r#"document.addEventListener('DOMContentLoaded', function() {
    const actionBtn = document.getElementById('actionBtn');

    actionBtn.addEventListener('click', function() {
        alert('Hello! This is a generated application for: {prompt}');

        // Visual feedback
        this.style.background = '#4CAF50';
        this.textContent = 'Clicked!';

        setTimeout(() => {
            this.style.background = '#667eea';
            this.textContent = 'Click Me';
        }, 2000);
    });

    const container = document.querySelector('.container');

    container.addEventListener('mouseenter', function() {
        this.style.transform = 'scale(1.02)';
        this.style.transition = 'transform 0.3s ease';
    });

    container.addEventListener('mouseleave', function() {
        this.style.transform = 'scale(1)';
    });
});"#;

/// Builds the fallback triplet for a prompt.
///
/// The prompt is inserted verbatim into the page title, the heading, the
/// paragraph and the alert message. The stylesheet does not depend on it.
pub fn fallback_code(prompt: &str) -> GeneratedCode {
    GeneratedCode {
        html: HTML_TEMPLATE.replace(PROMPT_PLACEHOLDER, prompt),
        css: CSS_TEMPLATE.to_string(),
        javascript: JS_TEMPLATE.replace(PROMPT_PLACEHOLDER, prompt),
    }
}
