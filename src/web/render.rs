use std::fmt::Write;

use axum::http::StatusCode;

use crate::models::{Lesson, Level};
use crate::navigation::{DeferredNavigation, Route};
use crate::validation::{Field, FieldErrors, LessonForm};
use crate::views::{CreateView, DetailView, EditView, FetchState, ListView, SubmitState};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

pub fn escape(text: &str) -> String {
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

/// Minutes with thousands separators and at most three decimals: `1,234.5`.
pub fn format_minutes(minutes: f64) -> String {
    let text = format!("{:.3}", minutes.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if minutes < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn layout(title: &str, redirect: Option<&DeferredNavigation>, body: &str) -> String {
    let refresh = redirect
        .map(|r| {
            format!(
                r#"<meta http-equiv="refresh" content="{};url={}">"#,
                r.delay().as_secs(),
                escape(&r.route().path())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body>
{nav}
<div class="container mt-4">
{body}
</div>
</body>
</html>
"#,
        refresh = refresh,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        nav = nav_bar(),
        body = body,
    )
}

fn nav_bar() -> String {
    format!(
        r#"<nav class="navbar bg-light mx-3"><div class="nav me-auto">
<a class="navbar-brand" href="{home}">Home</a>
<a class="nav-link" href="{all}">All Lesson</a>
<a class="nav-link" href="{completed}">Completed Lesson</a>
</div></nav>"#,
        home = Route::Home.path(),
        all = Route::AllLessons.path(),
        completed = Route::CompletedLessons.path(),
    )
}

fn alert(variant: &str, text: &str) -> String {
    format!(
        r#"<div class="alert alert-{}" role="alert">{}</div>"#,
        variant,
        escape(text)
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<h1>{}</h1>{}<a class="btn btn-outline-secondary" href="{}">Back to All Lessons</a>"#,
        escape(&status.to_string()),
        alert("danger", message),
        Route::AllLessons.path()
    );
    layout("Error", None, &body)
}

fn loading() -> &'static str {
    r#"<div class="d-flex justify-content-center"><div class="spinner-border" role="status"><span class="visually-hidden">Loading...</span></div></div>"#
}

pub fn lesson_table_page(view: &ListView) -> String {
    let mut body = format!(
        r#"<div class="d-flex justify-content-between"><h1 class="mb-4">All Lessons</h1><a class="btn btn-primary mx-4 mt-3" href="{}">Add Lesson</a></div>"#,
        Route::AddLesson.path()
    );

    match view.state() {
        FetchState::Idle | FetchState::Loading => body.push_str(loading()),
        FetchState::Error(msg) => body.push_str(&alert("danger", &format!("Error: {}", msg))),
        FetchState::Success(lessons) if lessons.is_empty() => {
            body.push_str(&alert("info", "No lessons available."))
        }
        FetchState::Success(lessons) => {
            body.push_str(
                r#"<table class="table table-striped table-bordered table-hover"><thead><tr><th>Id</th><th>Image</th><th>Title</th><th>Level</th><th>Estimated Time</th><th>Action</th></tr></thead><tbody>"#,
            );
            for lesson in lessons {
                push_table_row(&mut body, lesson, view.is_busy());
            }
            body.push_str("</tbody></table>");
        }
    }

    layout("All Lessons", None, &body)
}

fn push_table_row(body: &mut String, lesson: &Lesson, busy: bool) {
    let id = escape(lesson.id.as_str());
    let title = escape(&lesson.lesson_title);
    let _ = write!(
        body,
        r#"<tr><td>{id}</td><td style="width: 100px"><img class="img-thumbnail" src="{image}" alt="{title}"></td><td><a href="{detail}">{title}</a></td><td><span class="badge bg-info text-dark">{level}</span></td><td>{time} min</td><td><div class="d-flex gap-2"><a class="btn btn-outline-primary btn-sm" href="{edit}">Edit</a><form method="post" action="/lessons/{id}/delete"><button type="submit" class="btn btn-outline-danger btn-sm"{disabled}>Delete</button></form></div></td></tr>"#,
        id = id,
        image = escape(&lesson.lesson_image),
        title = title,
        detail = escape(&Route::Detail(lesson.id.clone()).path()),
        level = lesson.level,
        time = lesson.estimated_time,
        edit = escape(&Route::Edit(lesson.id.clone()).path()),
        disabled = if busy { " disabled" } else { "" },
    );
}

/// Card grid used by Home and Completed.
pub fn lesson_cards_page(view: &ListView, heading: &str) -> String {
    let mut body = format!("<h1>{}</h1>", escape(heading));

    match view.state() {
        FetchState::Idle | FetchState::Loading => {
            body.push_str(r#"<div class="text-center">Loading courses...</div>"#)
        }
        FetchState::Error(msg) => {
            body.push_str(&alert("danger", &format!("Error loading courses: {}", msg)))
        }
        FetchState::Success(lessons) if lessons.is_empty() => {
            body.push_str(&alert("info", "No courses available."))
        }
        FetchState::Success(lessons) => {
            body.push_str(r#"<div class="row">"#);
            for lesson in lessons {
                let title = escape(&lesson.lesson_title);
                let _ = write!(
                    body,
                    r#"<div class="col-md-6 col-lg-4 mb-4"><div class="card h-100"><img class="card-img-top" src="{image}" alt="{title}" style="height: 200px; object-fit: cover"><div class="card-body d-flex flex-column"><h5 class="card-title"><a href="{detail}">{title}</a></h5><p class="card-text">Level: {level}</p><p class="card-text">Estimated Time: {time} min</p></div></div></div>"#,
                    image = escape(&lesson.lesson_image),
                    title = title,
                    detail = escape(&Route::Detail(lesson.id.clone()).path()),
                    level = lesson.level,
                    time = lesson.estimated_time,
                );
            }
            body.push_str("</div>");
        }
    }

    layout(heading, None, &body)
}

pub fn detail_page(view: &DetailView) -> String {
    let back = format!(
        r#"<a class="btn btn-outline-secondary" href="{}">Back to All Lessons</a>"#,
        Route::AllLessons.path()
    );

    let body = match view.state() {
        FetchState::Idle | FetchState::Loading => loading().to_string(),
        FetchState::Error(msg) => format!(
            r#"<div class="alert alert-danger" role="alert"><h4 class="alert-heading">Error Loading Lesson</h4><p>{}</p><hr>{}</div>"#,
            escape(msg),
            back
        ),
        FetchState::Success(None) => format!(
            r#"<div class="alert alert-warning" role="alert"><h4 class="alert-heading">Lesson Not Found</h4><p>The lesson you&#39;re looking for doesn&#39;t exist.</p><hr>{}</div>"#,
            back
        ),
        FetchState::Success(Some(lesson)) => {
            let title = escape(&lesson.lesson_title);
            let (status_bg, status) = if lesson.is_completed {
                ("success", "Completed")
            } else {
                ("secondary", "Not Completed")
            };
            format!(
                r#"<nav aria-label="breadcrumb"><ol class="breadcrumb"><li class="breadcrumb-item"><a href="{home}">Home</a></li><li class="breadcrumb-item"><a href="{all}">All Lessons</a></li><li class="breadcrumb-item active" aria-current="page">{title}</li></ol></nav>
<div class="card shadow-sm"><img class="card-img-top" src="{image}" alt="{title}" style="height: 300px; object-fit: cover">
<div class="card-body p-4"><h2 class="card-title mb-3">{title}</h2>
<p><strong>Level:</strong> <span class="badge bg-info text-dark">{level}</span></p>
<p><strong>Estimated Time:</strong> <span class="text-success fw-bold">{time} minutes</span></p>
<p><strong>Status:</strong> <span class="badge bg-{status_bg}">{status}</span></p>
<p><strong>Lesson ID:</strong> <span class="text-muted">#{id}</span></p>
<div class="d-flex gap-3 mt-4"><a class="btn btn-primary btn-lg" href="{edit}">Edit Lesson</a>{back}</div>
</div></div>"#,
                home = Route::Home.path(),
                all = Route::AllLessons.path(),
                title = title,
                image = escape(&lesson.lesson_image),
                level = lesson.level,
                time = format_minutes(lesson.estimated_time),
                status_bg = status_bg,
                status = status,
                id = escape(lesson.id.as_str()),
                edit = escape(&Route::Edit(lesson.id.clone()).path()),
                back = back,
            )
        }
    };

    layout("Lesson Detail", None, &body)
}

struct FormPage<'a> {
    heading: &'a str,
    action: String,
    form: &'a LessonForm,
    errors: &'a FieldErrors,
    submit: &'a SubmitState,
    busy: bool,
    success: &'a str,
    failure: &'a str,
    submit_label: &'a str,
    secondary: String,
}

fn form_page(page: FormPage<'_>, redirect: Option<&DeferredNavigation>) -> String {
    let mut body = format!(
        r#"<div class="card shadow-sm"><div class="card-header"><h3 class="mb-0">{}</h3></div><div class="card-body p-4">"#,
        escape(page.heading)
    );

    match page.submit {
        SubmitState::Success => body.push_str(&alert("success", page.success)),
        SubmitState::Error(msg) => {
            body.push_str(&alert("danger", &format!("{}: {}", page.failure, msg)))
        }
        SubmitState::Idle | SubmitState::Submitting => {}
    }

    let disabled = if page.busy { " disabled" } else { "" };
    let _ = write!(body, r#"<form method="post" action="{}" novalidate>"#, escape(&page.action));
    push_text_input(&mut body, Field::LessonTitle, "Lesson Title", "text", &page.form.lesson_title, page.errors);
    push_text_input(&mut body, Field::LessonImage, "Lesson Image URL", "url", &page.form.lesson_image, page.errors);
    push_level_select(&mut body, &page.form.level, page.errors);
    push_text_input(&mut body, Field::EstimatedTime, "Estimated Time (minutes)", "number", &page.form.estimated_time, page.errors);
    let _ = write!(
        body,
        r#"<div class="form-check form-switch mb-4"><input class="form-check-input" type="checkbox" id="isCompleted" name="isCompleted" value="true"{checked}><label class="form-check-label" for="isCompleted">Mark as completed</label></div>
<div class="d-flex gap-3 justify-content-end">{secondary}<button type="submit" class="btn btn-primary px-4"{disabled}>{label}</button></div></form></div></div>"#,
        checked = if page.form.is_completed { " checked" } else { "" },
        secondary = page.secondary,
        disabled = disabled,
        label = escape(page.submit_label),
    );

    layout(page.heading, redirect, &body)
}

fn push_text_input(
    body: &mut String,
    field: Field,
    label: &str,
    input_type: &str,
    value: &str,
    errors: &FieldErrors,
) {
    let error = errors.get(field);
    let _ = write!(
        body,
        r#"<div class="mb-3"><label class="form-label" for="{name}">{label}</label><input class="form-control{invalid}" type="{input_type}" id="{name}" name="{name}" value="{value}">{feedback}</div>"#,
        name = field.name(),
        label = escape(label),
        invalid = if error.is_some() { " is-invalid" } else { "" },
        input_type = input_type,
        value = escape(value),
        feedback = feedback(error),
    );
}

fn push_level_select(body: &mut String, selected: &str, errors: &FieldErrors) {
    let error = errors.get(Field::Level);
    let mut options = String::from(r#"<option value="">Select level</option>"#);
    for level in Level::ALL {
        let _ = write!(
            options,
            r#"<option value="{code}"{sel}>{code}</option>"#,
            code = level.code(),
            sel = if level.code() == selected { " selected" } else { "" },
        );
    }
    let _ = write!(
        body,
        r#"<div class="mb-3"><label class="form-label" for="level">Level</label><select class="form-select{invalid}" id="level" name="level">{options}</select>{feedback}</div>"#,
        invalid = if error.is_some() { " is-invalid" } else { "" },
        options = options,
        feedback = feedback(error),
    );
}

fn feedback(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<div class="invalid-feedback">{}</div>"#, escape(msg)))
        .unwrap_or_default()
}

pub fn create_page(view: &CreateView) -> String {
    form_page(
        FormPage {
            heading: "Add New Lesson",
            action: Route::AddLesson.path(),
            form: view.form(),
            errors: view.errors(),
            submit: view.submit_state(),
            busy: view.is_busy(),
            success: "Lesson created successfully! Redirecting to all lessons...",
            failure: "Error creating lesson",
            submit_label: "Add Lesson",
            secondary: format!(
                r#"<a class="btn btn-outline-secondary" href="{}">Reset</a>"#,
                Route::AddLesson.path()
            ),
        },
        view.redirect(),
    )
}

pub fn edit_page(view: &EditView) -> String {
    match view.fetch_state() {
        FetchState::Idle | FetchState::Loading => layout("Edit Lesson", None, loading()),
        FetchState::Error(msg) => layout(
            "Edit Lesson",
            None,
            &format!(
                r#"<div class="alert alert-danger" role="alert"><h4 class="alert-heading">Error Loading Lesson</h4><p>Failed to load lesson data: {}</p><hr><a class="btn btn-outline-danger" href="{}">Back to All Lessons</a></div>"#,
                escape(msg),
                Route::AllLessons.path()
            ),
        ),
        FetchState::Success(None) => layout(
            "Edit Lesson",
            None,
            &format!(
                r#"<div class="alert alert-warning" role="alert"><h4 class="alert-heading">Lesson Not Found</h4><p>The lesson you&#39;re looking for doesn&#39;t exist.</p><hr><a class="btn btn-outline-warning" href="{}">Back to All Lessons</a></div>"#,
                Route::AllLessons.path()
            ),
        ),
        FetchState::Success(Some(_)) => form_page(
            FormPage {
                heading: "Edit Lesson",
                action: Route::Edit(view.id().clone()).path(),
                form: view.form(),
                errors: view.errors(),
                submit: view.submit_state(),
                busy: view.is_busy(),
                success: "Lesson updated successfully! Redirecting to all lessons...",
                failure: "Error updating lesson",
                submit_label: "Update Lesson",
                secondary: format!(
                    r#"<a class="btn btn-outline-secondary" href="{}">Cancel</a>"#,
                    Route::AllLessons.path()
                ),
            },
            view.redirect(),
        ),
    }
}
