//! Note viewer HTML rendering and the browser-open side effect.
//!
//! [`render_note_html`] is a pure function of the last ingested payload, so
//! it can be tested without any HTTP machinery. Unlike the raw mappings it
//! renders, user content is HTML-escaped on interpolation; text nodes only
//! escape `&`, `<` and `>` so plain text and pretty-printed JSON still read
//! verbatim in the page source.

use emrmock_core::{NoteBody, NotePayload};

/// Fixed page returned when no note has been ingested yet.
pub const NOT_FOUND_PAGE: &str =
    "<h1>No note data available.</h1><p>Please post a note from the extension first.</p>";

const PAGE_STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; padding: 20px; max-width: 900px; margin: auto; background-color: #f4f7f9; color: #333; }
    h1, h2 { color: #1a2b4d; border-bottom: 2px solid #e0e0e0; padding-bottom: 10px; }
    .container { background-color: #fff; padding: 20px 30px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.08); }
    pre { background-color: #2d2d2d; color: #f8f8f2; padding: 15px; border-radius: 5px; white-space: pre-wrap; word-wrap: break-word; font-family: "Courier New", Courier, monospace; }
    .label { font-weight: bold; color: #555; }
"#;

/// Renders the most recently ingested note as a standalone HTML document.
///
/// Shows the patient id, the encounter id (or `New` when the submission did
/// not carry one), one inline audio player per `audio_base64` entry, the
/// transcript, and the note body (verbatim text, or pretty-printed JSON for
/// structured notes).
pub fn render_note_html(note: &NotePayload) -> String {
    let audio_players: String = note
        .audio_base64
        .iter()
        .enumerate()
        .map(|(index, data_uri)| {
            format!(
                r#"<h2>Audio Recording {number}</h2>
    <audio controls style="width: 100%;">
      <source src="{src}" type="audio/webm">
      Your browser does not support the audio element.
    </audio>
"#,
                number = index + 1,
                src = escape_attr(data_uri),
            )
        })
        .collect();

    let notes_section = match &note.body {
        NoteBody::Text(text) => format!("<pre>{}</pre>", escape_text(text)),
        NoteBody::Structured { json, .. } => {
            let pretty = serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string());
            format!("<pre>{}</pre>", escape_text(&pretty))
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Test Note</title>
  <style>{style}</style>
</head>
<body>
  <div class="container">
    <h1>Received Medical Note</h1>
    <h2>Patient Information</h2>
    <p><span class="label">Patient ID:</span> {patient_id}</p>
    <p><span class="label">Encounter:</span> {encounter}</p>
    {audio_players}
    <h2>Full Transcript</h2>
    <pre>{transcript}</pre>
    <h2>Formatted Notes</h2>
    {notes_section}
  </div>
</body>
</html>
"#,
        style = PAGE_STYLE,
        patient_id = escape_text(&note.patient_id),
        encounter = escape_text(note.encounter_id.as_deref().unwrap_or("New")),
        audio_players = audio_players,
        transcript = escape_text(note.transcript.as_deref().unwrap_or_default()),
        notes_section = notes_section,
    )
}

/// Opens the given URL in the default browser as a fire-and-forget task.
///
/// The outcome is observed only for logging; a failure to open never fails
/// the request that triggered it.
pub fn open_in_background(url: String) {
    tokio::task::spawn_blocking(move || match open::that(&url) {
        Ok(()) => tracing::info!(%url, "note viewer opened in browser"),
        Err(err) => tracing::warn!(%url, "failed to open note viewer in browser: {err}"),
    });
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(input: &str) -> String {
    escape_text(input)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
