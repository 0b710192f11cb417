//! Server-rendered pages. Every page is a pure function of a
//! `SessionSnapshot`; askama escapes all resume and model text.

use askama::Template;

use crate::models::analysis::{ImprovedBullet, Rating};
use crate::session::{SessionSnapshot, Status};

pub mod score;

use score::{format_score, score_percent, ScoreBand};

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a;margin:0}
main{max-width:56rem;margin:0 auto;padding:2.5rem 1rem}
.card{background:#fff;border:1px solid #e2e8f0;border-radius:1rem;padding:1.5rem;margin-bottom:1.5rem}
textarea{width:100%;box-sizing:border-box;font:inherit;padding:1rem;border-radius:.75rem;border:1px solid #e2e8f0}
button{font:inherit;font-weight:600;padding:.6rem 1.5rem;border-radius:.75rem;border:0;background:#4f46e5;color:#fff;cursor:pointer}
button:disabled{background:#a5b4fc;cursor:not-allowed}
.error{background:#fff1f2;border:1px solid #ffe4e6;color:#be123c;padding:1rem;border-radius:.75rem}
.badge{font-size:.75rem;font-weight:600;padding:.2rem .6rem;border-radius:999px}
.rating-good,.band-strong{background:#d1fae5;color:#047857}
.rating-fair,.band-moderate{background:#fef3c7;color:#b45309}
.rating-needs-improvement,.band-weak{background:#ffe4e6;color:#be123c}
.gauge{font-size:2.5rem;font-weight:800;padding:1rem 1.5rem;border-radius:1rem;text-align:center}
.chip{display:inline-block;font-size:.75rem;text-transform:uppercase;background:#eef2ff;color:#4338ca;padding:.25rem .75rem;border-radius:.5rem;margin:0 .25rem .25rem 0}
.original{color:#475569;font-style:italic}
.improved{font-weight:600}
.reason{font-size:.8rem;color:#64748b}";

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Coach</title>
    <style>{{ styles|safe }}</style>
</head>
<body>
<main>
    <h1>Score your resume for entry-level success.</h1>
    <p>Built for students and freshers. Get instant feedback on your resume content,
    identify missing sections, and rewrite weak points with AI.</p>

    <div class="card">
        <form method="post" action="/analyze">
            <label for="resume-text"><strong>Paste Resume Content</strong></label>
            <textarea id="resume-text" name="resume_text" rows="12"
                placeholder="E.g. Full Name, Education, Experience, Skills..."
                {% if !can_edit %}disabled{% endif %}>{{ resume_text }}</textarea>
            <p>
                <button type="submit" {% if !can_submit %}disabled{% endif %}>
                    {% if loading %}Analyzing...{% else %}Analyze My Resume{% endif %}
                </button>
            </p>
        </form>

        <form method="post" action="/upload" enctype="multipart/form-data">
            <label for="resume-file">Upload .txt file</label>
            <input id="resume-file" type="file" name="file" accept=".txt" {% if !can_edit %}disabled{% endif %}>
            <button type="submit" {% if !can_edit %}disabled{% endif %}>Load</button>
        </form>

        {% if let Some(message) = error_message %}
        <p class="error" role="alert">{{ message }}</p>
        {% endif %}
    </div>
</main>
</body>
</html>"#,
    ext = "html"
)]
struct InputPage<'a> {
    styles: &'a str,
    resume_text: &'a str,
    can_edit: bool,
    can_submit: bool,
    loading: bool,
    error_message: Option<&'a str>,
}

struct FeedbackRow<'a> {
    section: &'a str,
    rating: &'static str,
    rating_class: &'static str,
    comment: &'a str,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Coach: Analysis</title>
    <style>{{ styles|safe }}</style>
</head>
<body>
<main>
    <div class="card">
        <h2>Your Resume Analysis</h2>
        <div class="gauge {{ band_class }}" data-percent="{{ score_percent }}">{{ score }}<small>/10</small></div>
        <p>{{ summary }}</p>
        {% if let Some(at) = analyzed_at %}<p class="reason">Analyzed {{ at }}</p>{% endif %}
    </div>

    <div class="card">
        <h3>Section Breakdown</h3>
        {% for item in feedback %}
        <div>
            <strong>{{ item.section }}</strong>
            <span class="badge {{ item.rating_class }}">{{ item.rating }}</span>
            <p>{{ item.comment }}</p>
        </div>
        {% endfor %}
    </div>

    <div class="card">
        <h3>Quick Improvements</h3>
        {% if !missing_sections.is_empty() %}
        <p><strong>Consider Adding:</strong></p>
        <p>{% for section in missing_sections %}<span class="chip">{{ section }}</span>{% endfor %}</p>
        {% endif %}
        <ul>
            {% for tip in ats_tips %}<li>{{ tip }}</li>{% endfor %}
        </ul>
    </div>

    <div class="card">
        <h3>AI-Suggested Rewrites</h3>
        {% for bullet in improved_bullets %}
        <div>
            <p class="original">Original: "{{ bullet.original }}"</p>
            <p class="improved">Improved (ATS Ready): "{{ bullet.improved }}"</p>
            <p class="reason">{{ bullet.reason }}</p>
        </div>
        {% endfor %}
    </div>

    <div class="card">
        <h3>Need a Fresh Start?</h3>
        <p>You can re-upload or edit your resume text to see how your changes affect the score.</p>
        <form method="post" action="/reset">
            <button type="submit">Analyze New Resume</button>
        </form>
    </div>
</main>
</body>
</html>"#,
    ext = "html"
)]
struct ResultPage<'a> {
    styles: &'a str,
    score: String,
    score_percent: u32,
    band_class: &'static str,
    summary: &'a str,
    analyzed_at: Option<String>,
    feedback: Vec<FeedbackRow<'a>>,
    missing_sections: &'a [String],
    ats_tips: &'a [String],
    improved_bullets: &'a [ImprovedBullet],
}

fn rating_class(rating: Rating) -> &'static str {
    match rating {
        Rating::Good => "rating-good",
        Rating::Fair => "rating-fair",
        Rating::NeedsImprovement => "rating-needs-improvement",
    }
}

/// Renders the page for the current state: the result view on Success,
/// the input form otherwise.
pub fn render_page(snapshot: &SessionSnapshot) -> Result<String, askama::Error> {
    if let (Status::Success, Some(result)) = (snapshot.status, &snapshot.result) {
        let page = ResultPage {
            styles: STYLES,
            score: format_score(result.score),
            score_percent: score_percent(result.score),
            band_class: ScoreBand::from_score(result.score).css_class(),
            summary: &result.summary,
            analyzed_at: snapshot
                .analyzed_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string()),
            feedback: result
                .feedback
                .iter()
                .map(|item| FeedbackRow {
                    section: &item.section,
                    rating: item.rating.label(),
                    rating_class: rating_class(item.rating),
                    comment: &item.comment,
                })
                .collect(),
            missing_sections: &result.missing_sections,
            ats_tips: &result.ats_tips,
            improved_bullets: &result.improved_bullets,
        };
        return page.render();
    }

    InputPage {
        styles: STYLES,
        resume_text: &snapshot.resume_text,
        can_edit: snapshot.can_edit,
        can_submit: snapshot.can_submit,
        loading: snapshot.status == Status::Loading,
        error_message: snapshot.error_message.as_deref(),
    }
    .render()
}
