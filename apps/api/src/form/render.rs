//! HTML rendering for the readiness page. Every interpolated value is escaped.

use std::fmt::Write;

use crate::form::FormState;
use crate::models::analysis::{AnalysisResult, Country};

/// Scores above this read as market-ready.
const STRONG_SCORE_THRESHOLD: i64 = 70;

const JOB_PLATFORMS: [(&str, &str); 3] = [
    ("LinkedIn Jobs", "https://www.linkedin.com/jobs"),
    ("NaukriGulf", "https://www.naukrigulf.com"),
    ("Bayt", "https://www.bayt.com"),
];

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; background: #020617; color: #e2e8f0; font-family: system-ui, sans-serif; display: flex; flex-direction: column; align-items: center; padding: 24px; }
header, .card { max-width: 42rem; width: 100%; }
header { text-align: center; margin: 32px 0 40px; }
h1 { font-size: 2.25rem; color: #fff; margin: 0; }
.tagline { color: #94a3b8; font-size: 1.1rem; }
.card { background: #0f172a; border: 1px solid #1e293b; border-radius: 16px; padding: 32px; box-sizing: border-box; margin-bottom: 40px; }
label { display: block; font-size: .875rem; margin-bottom: 8px; color: #cbd5e1; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 12px; background: #1e293b; border: 1px solid #334155; border-radius: 12px; color: #f1f5f9; margin-bottom: 24px; }
button { width: 100%; padding: 16px; background: #2563eb; color: #fff; font-weight: bold; font-size: 1.1rem; border: 0; border-radius: 12px; cursor: pointer; }
button:disabled { opacity: .5; cursor: default; }
.error { background: #450a0a; border: 1px solid #7f1d1d; color: #fecaca; border-radius: 12px; padding: 16px; margin-top: 24px; }
.score { font-size: 3rem; font-weight: 900; }
.score.strong { color: #4ade80; }
.score.developing { color: #fbbf24; }
.score span { font-size: 1.5rem; color: #64748b; }
.summary { background: #1e293b80; border: 1px solid #334155; border-radius: 12px; padding: 20px; line-height: 1.6; }
.strengths h3 { color: #4ade80; }
.gaps h3 { color: #fbbf24; }
ol.steps li { background: #1e293b4d; border: 1px solid #1e293b; border-radius: 12px; padding: 16px; margin-bottom: 12px; }
.platforms a { display: inline-block; margin: 0 12px 12px 0; padding: 8px 16px; border-radius: 999px; background: #1e293b; color: #60a5fa; text-decoration: none; }
"#;

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full page for the given form state.
pub fn render_page(state: &FormState) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>GCC Job Readiness</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n");
    html.push_str(
        "<header><h1>GCC Job Readiness</h1>\
         <p class=\"tagline\">An honest, AI-powered assessment for the Gulf market. \
         No hype. No data storage. Just clarity.</p></header>\n",
    );

    render_form(&mut html, state);

    if let Some(result) = state.result() {
        render_result(&mut html, result);
        html.push_str(
            "<script>document.getElementById('results-section')\
             .scrollIntoView({ behavior: 'smooth' });</script>\n",
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, state: &FormState) {
    let fields = &state.fields;

    html.push_str("<div class=\"card\">\n");
    html.push_str(
        "<form method=\"post\" action=\"/\" onsubmit=\"var b=this.querySelector('button');\
         b.disabled=true;b.textContent='Analyzing Profile...';\">\n",
    );

    html.push_str("<label for=\"country\">Target Country</label>\n");
    html.push_str("<select id=\"country\" name=\"country\">\n");
    for country in Country::ALL {
        let selected = if fields.country == country.value() {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            escape_html(country.value()),
            escape_html(country.label()),
        );
    }
    html.push_str("</select>\n");

    let _ = writeln!(
        html,
        "<label for=\"experience\">Years of Experience</label>\n\
         <input type=\"number\" id=\"experience\" name=\"experience\" required min=\"0\" \
         placeholder=\"e.g. 5\" value=\"{}\">",
        escape_html(&fields.experience),
    );
    let _ = writeln!(
        html,
        "<label for=\"role\">Target Role</label>\n\
         <input type=\"text\" id=\"role\" name=\"role\" required \
         placeholder=\"e.g. Senior Project Manager\" value=\"{}\">",
        escape_html(&fields.role),
    );
    let _ = writeln!(
        html,
        "<label for=\"resume\">Paste Resume Text</label>\n\
         <textarea id=\"resume\" name=\"resume\" required rows=\"6\" \
         placeholder=\"Copy and paste the text from your CV here. Don't worry about formatting.\">{}</textarea>",
        escape_html(&fields.resume),
    );

    if state.in_flight {
        html.push_str("<button type=\"submit\" disabled>Analyzing Profile...</button>\n");
    } else {
        html.push_str("<button type=\"submit\">Analyze My Readiness</button>\n");
    }
    html.push_str("</form>\n");

    if let Some(message) = state.error() {
        let _ = writeln!(
            html,
            "<p class=\"error\" role=\"alert\">{}</p>",
            escape_html(message)
        );
    }

    html.push_str("</div>\n");
}

fn render_result(html: &mut String, result: &AnalysisResult) {
    let score_class = match result.score {
        Some(score) if score > STRONG_SCORE_THRESHOLD => "strong",
        _ => "developing",
    };
    let score_text = result.score.map(|s| s.to_string()).unwrap_or_default();

    html.push_str("<section id=\"results-section\" class=\"card\">\n");
    let _ = writeln!(
        html,
        "<div class=\"score-header\"><h2>Readiness Score</h2>\
         <p class=\"tagline\">Based on current GCC market standards</p>\
         <div class=\"score {score_class}\">{score_text}<span>/100</span></div></div>",
    );
    let _ = writeln!(
        html,
        "<div class=\"summary\">{}</div>",
        escape_html(&result.summary)
    );

    render_list(html, "strengths", "Strengths", &result.strengths);
    render_list(html, "gaps", "Gaps to Fix", &result.gaps);

    html.push_str("<div class=\"action-plan\"><h3>Recommended Next Steps</h3>\n<ol class=\"steps\">\n");
    for step in &result.action_plan {
        let _ = writeln!(html, "<li>{}</li>", escape_html(step));
    }
    html.push_str("</ol></div>\n");

    html.push_str("<div class=\"platforms\"><h3>Recommended Search Platforms</h3>\n");
    for (name, url) in JOB_PLATFORMS {
        let _ = writeln!(
            html,
            "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{name} &#8599;</a>"
        );
    }
    html.push_str("</div>\n</section>\n");
}

fn render_list(html: &mut String, class: &str, title: &str, items: &[String]) {
    let _ = writeln!(html, "<div class=\"{class}\"><h3>{title}</h3>\n<ul>");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul></div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Outcome;
    use crate::models::analysis::AnalysisRequest;

    fn pm_result() -> AnalysisResult {
        AnalysisResult {
            score: Some(72),
            summary: "Solid mid-level candidate.".to_string(),
            strengths: vec!["PMP certified".to_string()],
            gaps: vec!["No GCC experience".to_string()],
            action_plan: vec!["Get NEBOSH cert".to_string()],
        }
    }

    fn with_outcome(outcome: Outcome) -> FormState {
        let mut state = FormState::default();
        state.outcome = Some(outcome);
        state
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"R&D" 'lead'</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;lead&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_empty_form_has_no_result_or_error() {
        let html = render_page(&FormState::default());
        assert!(html.contains("<option value=\"UAE\" selected>United Arab Emirates</option>"));
        assert!(html.contains("Analyze My Readiness"));
        assert!(!html.contains("results-section"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[test]
    fn test_success_renders_all_sections() {
        let html = render_page(&with_outcome(Outcome::Success(pm_result())));

        assert!(html.contains("<section id=\"results-section\""));
        assert!(html.contains("<div class=\"score strong\">72<span>/100</span></div>"));
        assert!(html.contains("Solid mid-level candidate."));
        assert!(html.contains("<li>PMP certified</li>"));
        assert!(html.contains("<li>No GCC experience</li>"));
        assert!(html.contains("<ol class=\"steps\">\n<li>Get NEBOSH cert</li>"));
        assert!(html.contains("https://www.naukrigulf.com"));
        assert!(html.contains("scrollIntoView"));
    }

    #[test]
    fn test_score_at_threshold_is_developing() {
        let mut result = pm_result();
        result.score = Some(70);
        let html = render_page(&with_outcome(Outcome::Success(result)));
        assert!(html.contains("score developing"));
    }

    #[test]
    fn test_empty_result_renders_blank_card() {
        let html = render_page(&with_outcome(Outcome::Success(AnalysisResult::default())));
        assert!(html.contains("<div class=\"score developing\"><span>/100</span></div>"));
        assert!(html.contains("<ol class=\"steps\">\n</ol>"));
    }

    #[test]
    fn test_failure_renders_message_without_result() {
        let html = render_page(&with_outcome(Outcome::Failure(
            "Failed to analyze profile.".to_string(),
        )));
        assert!(html.contains("<p class=\"error\" role=\"alert\">Failed to analyze profile.</p>"));
        assert!(!html.contains("results-section"));
        assert!(!html.contains("scrollIntoView"));
    }

    #[test]
    fn test_field_values_are_escaped_and_kept() {
        let state = FormState::new(AnalysisRequest {
            role: "\"><script>alert(1)</script>".to_string(),
            experience: "4".to_string(),
            country: "Qatar".to_string(),
            resume: "</textarea><b>x</b>".to_string(),
        });
        let html = render_page(&state);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;/textarea&gt;&lt;b&gt;x&lt;/b&gt;</textarea>"));
        assert!(html.contains("<option value=\"Qatar\" selected>Qatar</option>"));
        assert!(html.contains("value=\"4\""));
    }

    #[test]
    fn test_in_flight_disables_button() {
        let mut state = FormState::default();
        state.in_flight = true;
        let html = render_page(&state);
        assert!(html.contains("<button type=\"submit\" disabled>Analyzing Profile...</button>"));
    }
}
